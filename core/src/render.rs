//! Pure renderers from plain data to HTML markup.
//!
//! # Design
//! Nothing here knows about the controller or the network: each function
//! takes records (or a message) and returns a markup string the host can
//! insert into its results region, overlay, or selector. Every piece of
//! record or user text goes through `escape_html` before interpolation.

use std::fmt::Write;

use crate::pagination::PageWindow;
use crate::types::{FilterKind, SchoolRecord};

/// Shown wherever an optional field is absent or empty.
pub const PLACEHOLDER: &str = "\u{2014}";

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => escape_html(v),
        _ => PLACEHOLDER.to_string(),
    }
}

/// `"1 school found"` / `"N schools found"`.
pub fn counter_text(total: usize) -> String {
    let noun = if total == 1 { "school" } else { "schools" };
    format!("{total} {noun} found")
}

/// Rating formatted to one decimal, or `None` when there is no badge.
/// Exact halves round away from zero, so `4.25` shows as `4.3`.
pub fn rating_badge(rating: Option<f64>) -> Option<String> {
    rating.filter(|r| r.is_finite()).map(one_decimal)
}

fn one_decimal(r: f64) -> String {
    // Only quarter values (.25, .75) sit exactly halfway at one decimal.
    let exact_half = (r * 4.0).fract() == 0.0 && (r * 2.0).fract() != 0.0;
    if exact_half {
        format!("{:.1}", (r * 10.0).round() / 10.0)
    } else {
        format!("{r:.1}")
    }
}

pub fn render_loading() -> String {
    "<div class=\"loading\"><p>Loading schools...</p></div>".to_string()
}

pub fn render_error(message: &str) -> String {
    let message = if message.is_empty() {
        "Something went wrong"
    } else {
        message
    };
    format!(
        "<div class=\"error\"><h3>Error</h3><p>{}</p></div>",
        escape_html(message)
    )
}

pub fn render_empty() -> String {
    "<div class=\"no-results\"><h3>No schools found</h3>\
     <p>Try adjusting your search or filters</p></div>"
        .to_string()
}

/// A single result card.
pub fn render_card(school: &SchoolRecord) -> String {
    let mut html = String::from("<div class=\"school-card\"><div class=\"school-header\">");
    if let Some(badge) = rating_badge(school.rating) {
        let _ = write!(html, "<div class=\"school-badge\">{badge}</div>");
    }
    let location = school.location_label();
    let _ = write!(
        html,
        "<h3 class=\"school-name\">{name}</h3>\
         <div class=\"school-location\"><span>{location}</span></div></div>\
         <div class=\"school-details\">\
         <div class=\"school-info\"><span>{board}</span></div>\
         <div class=\"school-info\"><span>{kind}</span></div>\
         <div class=\"school-info\"><span>{contact}</span></div>\
         <button class=\"view-more-btn\" data-id=\"{id}\">View More Details</button>\
         </div></div>",
        name = escape_html(&school.name),
        location = or_placeholder(Some(location.as_str())),
        board = or_placeholder(school.board.as_deref()),
        kind = or_placeholder(school.school_type.as_deref()),
        contact = or_placeholder(school.contact.as_deref()),
        id = escape_html(school.id.as_str()),
    );
    html
}

/// The windowed cards, with a "Show More" control when the window does not
/// cover every record. An empty list renders the empty state instead.
pub fn render_listing(schools: &[SchoolRecord], window: &PageWindow) -> String {
    if schools.is_empty() {
        return render_empty();
    }
    let mut html = String::new();
    for school in window.slice(schools) {
        html.push_str(&render_card(school));
    }
    if window.has_more(schools.len()) {
        html.push_str("<button class=\"show-more-btn\" data-action=\"show-more\">Show More</button>");
    }
    html
}

/// Only absolute http(s) URLs are linked.
fn linkable_website(website: Option<&str>) -> Option<&str> {
    let url = website?.trim();
    let lower = url.to_ascii_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://")).then_some(url)
}

/// Read-only detail panel for the overlay.
pub fn render_detail(school: &SchoolRecord) -> String {
    let location = school.location_label();
    let mut html = format!(
        "<h2 class=\"modal-school-name\">{name}</h2>\
         <div class=\"modal-school-info\">\
         <p><strong>Location:</strong> {location}</p>\
         <p><strong>Board:</strong> {board}</p>\
         <p><strong>Type:</strong> {kind}</p>\
         <p><strong>Address:</strong> {address}</p>\
         <p><strong>Contact:</strong> {contact}</p>\
         </div>",
        name = escape_html(&school.name),
        location = or_placeholder(Some(location.as_str())),
        board = or_placeholder(school.board.as_deref()),
        kind = or_placeholder(school.school_type.as_deref()),
        address = or_placeholder(school.address.as_deref()),
        contact = or_placeholder(school.contact.as_deref()),
    );
    if let Some(url) = linkable_website(school.website.as_deref()) {
        let _ = write!(
            html,
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"website-link\">Visit Website</a>",
            escape_html(url)
        );
    }
    html
}

/// `<option>` list for a selector: the sentinel first, then one option per
/// value with identical value and label.
pub fn render_filter_options(kind: FilterKind, values: &[String]) -> String {
    let mut html = format!("<option value=\"\">{}</option>", kind.sentinel_label());
    for value in values {
        let value = escape_html(value);
        let _ = write!(html, "<option value=\"{value}\">{value}</option>");
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SchoolId;

    fn school(id: &str) -> SchoolRecord {
        SchoolRecord {
            id: SchoolId::new(id),
            name: format!("School {id}"),
            city: Some("Bhubaneswar".into()),
            district: Some("Khurda".into()),
            board: Some("CBSE".into()),
            school_type: Some("Private".into()),
            rating: Some(4.2),
            contact: Some("0674-000000".into()),
            address: Some("Unit 1".into()),
            website: Some("https://example.org".into()),
        }
    }

    fn bare(id: &str) -> SchoolRecord {
        SchoolRecord {
            id: SchoolId::new(id),
            name: String::new(),
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

    #[test]
    fn escape_covers_all_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn counter_pluralizes() {
        assert_eq!(counter_text(0), "0 schools found");
        assert_eq!(counter_text(1), "1 school found");
        assert_eq!(counter_text(8), "8 schools found");
    }

    #[test]
    fn rating_badge_rounds_to_one_decimal() {
        assert_eq!(rating_badge(Some(4.567)).as_deref(), Some("4.6"));
        assert_eq!(rating_badge(Some(4.0)).as_deref(), Some("4.0"));
        assert_eq!(rating_badge(None), None);
        assert_eq!(rating_badge(Some(f64::NAN)), None);
    }

    #[test]
    fn rating_badge_rounds_exact_halves_up() {
        let badges: Vec<String> = [4.25, 3.75, 0.25, 4.45, 2.05]
            .into_iter()
            .filter_map(|r| rating_badge(Some(r)))
            .collect();
        assert_eq!(badges, vec!["4.3", "3.8", "0.3", "4.5", "2.0"]);
    }

    #[test]
    fn card_without_rating_has_no_badge() {
        let html = render_card(&bare("1"));
        assert!(!html.contains("school-badge"));
        assert!(html.contains(PLACEHOLDER));
    }

    #[test]
    fn card_with_rating_shows_badge() {
        let mut s = school("1");
        s.rating = Some(4.567);
        let html = render_card(&s);
        assert!(html.contains("<div class=\"school-badge\">4.6</div>"));
        assert!(html.contains("Bhubaneswar, Khurda"));
        assert!(html.contains("data-id=\"1\""));
    }

    #[test]
    fn script_in_any_field_is_escaped() {
        let payload = "<script>alert('x')</script>";
        let s = SchoolRecord {
            id: SchoolId::new(payload),
            name: payload.into(),
            city: Some(payload.into()),
            district: Some(payload.into()),
            board: Some(payload.into()),
            school_type: Some(payload.into()),
            rating: None,
            contact: Some(payload.into()),
            address: Some(payload.into()),
            website: Some(format!("https://x.org/\"{payload}")),
        };
        for html in [render_card(&s), render_detail(&s)] {
            assert!(!html.contains("<script>"), "{html}");
            assert!(html.contains("&lt;script&gt;"));
        }
        let options = render_filter_options(FilterKind::City, &[payload.to_string()]);
        assert!(!options.contains("<script>"));
    }

    #[test]
    fn empty_listing_renders_empty_state() {
        let html = render_listing(&[], &PageWindow::new(6));
        assert!(html.contains("No schools found"));
        assert!(!html.contains("school-card"));
    }

    #[test]
    fn listing_windows_cards_and_offers_show_more() {
        let schools: Vec<SchoolRecord> = (1..=8).map(|i| school(&i.to_string())).collect();
        let mut window = PageWindow::new(6);
        let html = render_listing(&schools, &window);
        assert_eq!(html.matches("class=\"school-card\"").count(), 6);
        assert!(html.contains("Show More"));

        window.grow();
        let html = render_listing(&schools, &window);
        assert_eq!(html.matches("class=\"school-card\"").count(), 8);
        assert!(!html.contains("Show More"));
    }

    #[test]
    fn detail_links_website_only_when_present() {
        let html = render_detail(&school("1"));
        assert!(html.contains("href=\"https://example.org\""));
        assert!(html.contains("Visit Website"));

        let html = render_detail(&bare("2"));
        assert!(!html.contains("website-link"));
        assert_eq!(html.matches(PLACEHOLDER).count(), 5);
    }

    #[test]
    fn detail_drops_non_http_website() {
        let mut s = school("1");
        s.website = Some("javascript:alert(1)".into());
        assert!(!render_detail(&s).contains("website-link"));
        s.website = Some(String::new());
        assert!(!render_detail(&s).contains("website-link"));
    }

    #[test]
    fn filter_options_keep_sentinel_first() {
        let html = render_filter_options(
            FilterKind::Board,
            &["CBSE".to_string(), "ICSE".to_string()],
        );
        assert_eq!(
            html,
            "<option value=\"\">All Boards</option>\
             <option value=\"CBSE\">CBSE</option>\
             <option value=\"ICSE\">ICSE</option>"
        );
    }
}
