//! Stateless HTTP request builder and response parser for the school API.
//!
//! # Design
//! `SchoolClient` holds only a `base_url` and carries no mutable state
//! between calls. Each endpoint is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The host executes the round-trip in between.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::encode_search_query;
use crate::types::{FilterKind, FilterSelection, SchoolId, SchoolRecord};

/// Synchronous, stateless client for the school directory API.
#[derive(Debug, Clone)]
pub struct SchoolClient {
    base_url: String,
}

impl SchoolClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_schools(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/schools", self.base_url))
    }

    pub fn build_search_schools(&self, filters: &FilterSelection) -> HttpRequest {
        let query = encode_search_query(filters);
        HttpRequest::get(format!("{}/schools/search?{query}", self.base_url))
    }

    pub fn build_get_school(&self, id: &SchoolId) -> HttpRequest {
        // byte_serialize is form encoding; a path segment needs %20 for spaces.
        let segment = form_urlencoded::byte_serialize(id.as_str().as_bytes())
            .collect::<String>()
            .replace('+', "%20");
        HttpRequest::get(format!("{}/schools/{segment}", self.base_url))
    }

    pub fn build_filter_values(&self, kind: FilterKind) -> HttpRequest {
        HttpRequest::get(format!("{}/schools/{}", self.base_url, kind.endpoint()))
    }

    /// Parse a response from either the listing or the search endpoint.
    pub fn parse_school_list(&self, response: HttpResponse) -> Result<Vec<SchoolRecord>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_school(&self, response: HttpResponse) -> Result<SchoolRecord, ApiError> {
        parse_json(response)
    }

    pub fn parse_filter_values(&self, response: HttpResponse) -> Result<Vec<String>, ApiError> {
        parse_json(response)
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    Ok(serde_json::from_str(&response.body)?)
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
