//! Domain types for the school directory.
//!
//! # Design
//! These mirror the backend's JSON schema but are defined independently of
//! the mock-server crate; the integration tests catch schema drift. The
//! backend is loosely typed, so deserialization is lenient: ids may be
//! numbers or strings, a `null` name reads as empty, and any rating that is
//! not a finite number reads as missing.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque record identifier, kept as text whatever the JSON carried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId")]
pub struct SchoolId(String);

impl SchoolId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(serde_json::Number),
    Text(String),
}

impl From<RawId> for SchoolId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => SchoolId(n.to_string()),
            RawId::Text(s) => SchoolId(s),
        }
    }
}

/// A single school as returned by the API. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRecord {
    pub id: SchoolId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub school_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl SchoolRecord {
    /// Present, non-empty location parts joined with `", "`.
    pub fn location_label(&self) -> String {
        [self.city.as_deref(), self.district.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_f64())
        .filter(|rating| rating.is_finite()))
}

/// Ordering applied to the result set for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Rating,
    Location,
}

impl SortKey {
    /// Parse a sort selector value. Unknown values fall back to `Name`.
    pub fn from_selector(value: &str) -> Self {
        match value.trim() {
            "rating" => SortKey::Rating,
            "location" => SortKey::Location,
            _ => SortKey::Name,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Rating => "rating",
            SortKey::Location => "location",
        }
    }
}

/// The four user-controlled search constraints. Empty means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub name: String,
    pub city: String,
    pub board: String,
    pub school_type: String,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.city.is_empty()
            && self.board.is_empty()
            && self.school_type.is_empty()
    }
}

/// One of the three option-backed filter selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    City,
    Board,
    Type,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [FilterKind::City, FilterKind::Board, FilterKind::Type];

    /// Endpoint segment under `/schools`.
    pub fn endpoint(&self) -> &'static str {
        match self {
            FilterKind::City => "cities",
            FilterKind::Board => "boards",
            FilterKind::Type => "types",
        }
    }

    /// Label of the leading "no constraint" option.
    pub fn sentinel_label(&self) -> &'static str {
        match self {
            FilterKind::City => "All Cities",
            FilterKind::Board => "All Boards",
            FilterKind::Type => "All Types",
        }
    }
}

/// Permissible values for the three option-backed selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub cities: Vec<String>,
    pub boards: Vec<String>,
    pub types: Vec<String>,
}

impl FilterOptions {
    pub fn values(&self, kind: FilterKind) -> &[String] {
        match kind {
            FilterKind::City => &self.cities,
            FilterKind::Board => &self.boards,
            FilterKind::Type => &self.types,
        }
    }
}
