use std::{collections::BTreeSet, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub school_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub city: Option<String>,
    pub board: Option<String>,
    #[serde(rename = "type")]
    pub school_type: Option<String>,
}

pub type Db = Arc<Vec<School>>;

/// Router over the built-in fixture records.
pub fn app() -> Router {
    app_with(seed())
}

/// Router over `schools`, mounted under `/api`.
pub fn app_with(schools: Vec<School>) -> Router {
    let db: Db = Arc::new(schools);
    let schools = Router::new()
        .route("/schools", get(list_schools))
        .route("/schools/search", get(search_schools))
        .route("/schools/cities", get(list_cities))
        .route("/schools/boards", get(list_boards))
        .route("/schools/types", get(list_types))
        .route("/schools/{id}", get(get_school))
        .with_state(db);
    Router::new().nest("/api", schools)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_schools(State(db): State<Db>) -> Json<Vec<School>> {
    Json(db.to_vec())
}

async fn search_schools(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<School>> {
    tracing::debug!(?params, "search");
    Json(db.iter().filter(|s| matches(s, &params)).cloned().collect())
}

async fn get_school(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<School>, StatusCode> {
    db.iter()
        .find(|s| s.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_cities(State(db): State<Db>) -> Json<Vec<String>> {
    Json(distinct(&db, |s| s.city.as_deref()))
}

async fn list_boards(State(db): State<Db>) -> Json<Vec<String>> {
    Json(distinct(&db, |s| s.board.as_deref()))
}

async fn list_types(State(db): State<Db>) -> Json<Vec<String>> {
    Json(distinct(&db, |s| s.school_type.as_deref()))
}

/// `name` is a case-insensitive substring match; the rest are
/// case-insensitive exact matches. Empty parameters are ignored.
fn matches(school: &School, params: &SearchParams) -> bool {
    fn given(param: &Option<String>) -> Option<&str> {
        param.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
    fn same(field: &Option<String>, wanted: &str) -> bool {
        field
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case(wanted))
    }

    if let Some(name) = given(&params.name) {
        if !school.name.to_lowercase().contains(&name.to_lowercase()) {
            return false;
        }
    }
    [
        (&school.city, given(&params.city)),
        (&school.board, given(&params.board)),
        (&school.school_type, given(&params.school_type)),
    ]
    .into_iter()
    .all(|(field, wanted)| wanted.map_or(true, |w| same(field, w)))
}

fn distinct<'a, F>(db: &'a [School], field: F) -> Vec<String>
where
    F: Fn(&'a School) -> Option<&'a str>,
{
    db.iter()
        .filter_map(field)
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn school(
    id: u64,
    name: &str,
    city: &str,
    district: &str,
    board: &str,
    school_type: &str,
    rating: Option<f64>,
    website: Option<&str>,
) -> School {
    School {
        id,
        name: name.to_string(),
        city: Some(city.to_string()),
        district: Some(district.to_string()),
        board: Some(board.to_string()),
        school_type: Some(school_type.to_string()),
        rating,
        contact: Some(format!("0674-25{id:05}")),
        address: Some(format!("Plot {id}, {city}")),
        website: website.map(str::to_string),
    }
}

/// Fixture records. Ids are stable so tests can address them.
pub fn seed() -> Vec<School> {
    vec![
        school(1, "DAV Public School", "Bhubaneswar", "Khurda", "CBSE", "Private", Some(4.6), Some("https://dav.example")),
        school(2, "Kendriya Vidyalaya No. 1", "Bhubaneswar", "Khurda", "CBSE", "Government", Some(4.3), None),
        school(3, "St. Joseph's Girls High School", "Cuttack", "Cuttack", "ICSE", "Private", Some(4.8), Some("https://stjoseph.example")),
        school(4, "Ravenshaw Collegiate School", "Cuttack", "Cuttack", "BSE Odisha", "Government", None, None),
        school(5, "Sai International School", "Bhubaneswar", "Khurda", "CBSE", "Private", Some(4.567), Some("https://sai.example")),
        school(6, "Blackboard Public School", "Puri", "Puri", "CBSE", "Private", Some(3.9), None),
        school(7, "Zilla School", "Puri", "Puri", "BSE Odisha", "Government", None, None),
        school(8, "Mother's Public School", "Bhubaneswar", "Khurda", "CBSE", "Private", Some(4.1), None),
        School {
            id: 9,
            name: "Stewart School".to_string(),
            city: Some("Cuttack".to_string()),
            district: None,
            board: Some("ICSE".to_string()),
            school_type: None,
            rating: None,
            contact: None,
            address: None,
            website: None,
        },
    ]
}
