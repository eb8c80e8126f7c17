//! Search query construction.

use crate::types::FilterSelection;

/// Encode the non-empty fields of `filters` as a form-urlencoded query.
///
/// Fields are appended in the order `name`, `city`, `board`, `type`; the
/// name is trimmed first. An unconstrained selection yields an empty string.
pub fn encode_search_query(filters: &FilterSelection) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let pairs = [
        ("name", filters.name.trim()),
        ("city", filters.city.as_str()),
        ("board", filters.board.as_str()),
        ("type", filters.school_type.as_str()),
    ];
    for (key, value) in pairs {
        if !value.is_empty() {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// Extract the city from a footer shortcut label such as `"Schools in Puri"`.
///
/// Matching is case-insensitive and takes the first line of the label that
/// names a city. Returns `None` when no line does.
pub fn footer_city(label: &str) -> Option<String> {
    label.lines().find_map(city_in_line)
}

fn city_in_line(line: &str) -> Option<String> {
    const MARKER: &str = "schools in ";
    let start = line.to_ascii_lowercase().find(MARKER)? + MARKER.len();
    let city = line[start..].trim();
    (!city.is_empty()).then(|| city.to_string())
}
