//! Display ordering for the result set.
//!
//! `sort_schools` never mutates its input and always uses a stable sort, so
//! records that compare equal (including several with no rating) keep the
//! order in which the server returned them.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::{SchoolRecord, SortKey};

/// Return a new list holding `schools` ordered by `key`.
pub fn sort_schools(schools: &[SchoolRecord], key: SortKey) -> Vec<SchoolRecord> {
    let mut sorted = schools.to_vec();
    match key {
        SortKey::Name => sorted.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        SortKey::Rating => sorted.sort_by(|a, b| rating_desc(a.rating, b.rating)),
        SortKey::Location => {
            sorted.sort_by_cached_key(|s| collation_key(&location_key(s)));
        }
    }
    sorted
}

/// Highest rating first; missing ratings rank below every present one.
fn rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn location_key(school: &SchoolRecord) -> String {
    format!(
        "{} {}",
        school.city.as_deref().unwrap_or_default(),
        school.district.as_deref().unwrap_or_default()
    )
}

/// Locale-style comparison: base letters first, then lowercase before
/// uppercase, then raw code points.
pub(crate) fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| case_tiebreak(a, b))
        .then_with(|| a.cmp(b))
}

/// Lowercased, NFKC-folded string with accents stripped.
fn collation_key(s: &str) -> String {
    s.to_lowercase()
        .nfkc()
        .collect::<String>()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn case_tiebreak(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) if cb.is_uppercase() => return Ordering::Less,
            (false, true) if ca.is_uppercase() => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SchoolId;

    fn school(id: &str, name: &str) -> SchoolRecord {
        SchoolRecord {
            id: SchoolId::new(id),
            name: name.to_string(),
            city: None,
            district: None,
            board: None,
            school_type: None,
            rating: None,
            contact: None,
            address: None,
            website: None,
        }
    }

    fn rated(id: &str, rating: Option<f64>) -> SchoolRecord {
        SchoolRecord {
            rating,
            ..school(id, id)
        }
    }

    fn located(id: &str, city: Option<&str>, district: Option<&str>) -> SchoolRecord {
        SchoolRecord {
            city: city.map(str::to_string),
            district: district.map(str::to_string),
            ..school(id, id)
        }
    }

    fn ids(schools: &[SchoolRecord]) -> Vec<&str> {
        schools.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn name_sort_puts_empty_first() {
        let input = vec![school("1", "B"), school("2", "A"), school("3", "")];
        let sorted = sort_schools(&input, SortKey::Name);
        let names: Vec<&str> = sorted.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["", "A", "B"]);
    }

    #[test]
    fn name_sort_is_case_and_accent_aware() {
        let input = vec![
            school("1", "zebra"),
            school("2", "Éclair"),
            school("3", "apple"),
            school("4", "Apple"),
        ];
        let sorted = sort_schools(&input, SortKey::Name);
        assert_eq!(ids(&sorted), vec!["3", "4", "2", "1"]);
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let input = vec![school("1", "B"), school("2", "A")];
        let _ = sort_schools(&input, SortKey::Name);
        assert_eq!(ids(&input), vec!["1", "2"]);
    }

    #[test]
    fn rating_sort_is_descending_with_missing_last() {
        let input = vec![rated("a", Some(3.2)), rated("b", None), rated("c", Some(4.8))];
        let sorted = sort_schools(&input, SortKey::Rating);
        let ratings: Vec<Option<f64>> = sorted.iter().map(|s| s.rating).collect();
        assert_eq!(ratings, vec![Some(4.8), Some(3.2), None]);
    }

    #[test]
    fn missing_ratings_keep_arrival_order() {
        let input = vec![
            rated("x", None),
            rated("y", Some(1.0)),
            rated("z", None),
            rated("w", None),
        ];
        let sorted = sort_schools(&input, SortKey::Rating);
        assert_eq!(ids(&sorted), vec!["y", "x", "z", "w"]);
    }

    #[test]
    fn location_sort_is_case_insensitive_and_stable() {
        let input = vec![
            located("1", Some("bhubaneswar"), None),
            located("2", Some("Angul"), None),
            located("3", Some("Bhubaneswar"), None),
        ];
        let sorted = sort_schools(&input, SortKey::Location);
        assert_eq!(ids(&sorted), vec!["2", "1", "3"]);

        let reversed = vec![input[2].clone(), input[1].clone(), input[0].clone()];
        let sorted = sort_schools(&reversed, SortKey::Location);
        assert_eq!(ids(&sorted), vec!["2", "3", "1"]);
    }

    #[test]
    fn location_sort_uses_district_after_city() {
        let input = vec![
            located("1", Some("Cuttack"), Some("Z")),
            located("2", Some("Cuttack"), Some("A")),
            located("3", None, Some("Khurda")),
        ];
        let sorted = sort_schools(&input, SortKey::Location);
        assert_eq!(ids(&sorted), vec!["3", "2", "1"]);
    }

    #[test]
    fn locale_cmp_orders_lowercase_before_uppercase() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("A", "b"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }
}
