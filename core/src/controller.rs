//! The directory browser's state machine.
//!
//! # Design
//! `DirectoryController` owns every piece of mutable state: the result set,
//! the page window, the filter selection, the sort key, the filter options
//! and the detail overlay. Hosts drive it with `begin_*` calls (which return
//! plain-data requests to execute) and the matching `complete_*` / `fail_*`
//! calls (which hand back the response or a transport failure). Rendering is
//! read-only and can be repeated at any time.
//!
//! Listing and search requests carry a `RequestTicket`. Only the most
//! recently issued ticket is accepted; a response for any older ticket is
//! discarded so an out-of-order reply cannot overwrite newer results.

use tracing::{debug, warn};

use crate::client::SchoolClient;
use crate::config::DirectoryConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::pagination::PageWindow;
use crate::query::footer_city;
use crate::render;
use crate::sort::sort_schools;
use crate::types::{FilterKind, FilterOptions, FilterSelection, SchoolId, SchoolRecord, SortKey};

pub const LOAD_FAILED: &str = "Failed to load schools.";
pub const SEARCH_FAILED: &str = "Failed to search schools.";
pub const OPTIONS_FAILED: &str = "Failed to load filter options.";
pub const DETAIL_FAILED: &str = "Failed to load school details.";

/// Sequence number attached to a listing or search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A listing or search request ready for the host to execute.
#[derive(Debug, Clone)]
pub struct PendingListing {
    pub ticket: RequestTicket,
    pub request: HttpRequest,
}

/// The three filter-option requests. The host runs them concurrently and
/// hands all three results back together.
#[derive(Debug, Clone)]
pub struct FilterOptionRequests {
    pub cities: HttpRequest,
    pub boards: HttpRequest,
    pub types: HttpRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListingKind {
    LoadAll,
    Search,
}

impl ListingKind {
    fn failure_message(&self) -> &'static str {
        match self {
            ListingKind::LoadAll => LOAD_FAILED,
            ListingKind::Search => SEARCH_FAILED,
        }
    }
}

/// What the results region currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsStatus {
    /// Nothing requested yet.
    Idle,
    Loading,
    /// The result set is rendered.
    Ready,
    /// An error message replaces the results region. The previous result
    /// set is still held.
    Failed(String),
}

/// Result of handing a listing response to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOutcome {
    /// The response replaced the result set.
    Accepted { total: usize },
    /// The request failed; the previous result set is kept.
    Failed,
    /// A newer request was issued after this one; nothing changed.
    Stale,
}

/// Effect of a key press routed to the controller.
#[derive(Debug, Clone)]
pub enum KeyAction {
    Ignored,
    OverlayClosed,
    Search(PendingListing),
}

#[derive(Debug, Clone)]
pub struct DirectoryController {
    client: SchoolClient,
    filters: FilterSelection,
    sort_key: SortKey,
    window: PageWindow,
    results: Vec<SchoolRecord>,
    status: ResultsStatus,
    options: FilterOptions,
    overlay: Option<SchoolRecord>,
    next_ticket: u64,
    in_flight: Option<(RequestTicket, ListingKind)>,
}

impl DirectoryController {
    pub fn new(config: &DirectoryConfig) -> Self {
        Self::with_client(SchoolClient::new(&config.api_base_url), config.page_size)
    }

    pub fn with_client(client: SchoolClient, page_size: usize) -> Self {
        debug!(base_url = client.base_url(), page_size, "directory controller ready");
        Self {
            client,
            filters: FilterSelection::default(),
            sort_key: SortKey::default(),
            window: PageWindow::new(page_size),
            results: Vec::new(),
            status: ResultsStatus::Idle,
            options: FilterOptions::default(),
            overlay: None,
            next_ticket: 1,
            in_flight: None,
        }
    }

    pub fn client(&self) -> &SchoolClient {
        &self.client
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: FilterSelection) {
        self.filters = filters;
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    /// The full, sorted result set from the last accepted fetch.
    pub fn results(&self) -> &[SchoolRecord] {
        &self.results
    }

    /// The leading records currently materialized.
    pub fn visible_results(&self) -> &[SchoolRecord] {
        self.window.slice(&self.results)
    }

    pub fn status(&self) -> &ResultsStatus {
        &self.status
    }

    pub fn filter_options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn overlay(&self) -> Option<&SchoolRecord> {
        self.overlay.as_ref()
    }

    pub fn is_overlay_open(&self) -> bool {
        self.overlay.is_some()
    }

    // -----------------------------------------------------------------------
    // Listing and search
    // -----------------------------------------------------------------------

    /// Start an unfiltered load.
    pub fn begin_load_all(&mut self) -> PendingListing {
        let request = self.client.build_list_schools();
        self.issue(ListingKind::LoadAll, request)
    }

    /// Start a search with the current filter selection.
    pub fn begin_search(&mut self) -> PendingListing {
        let request = self.client.build_search_schools(&self.filters);
        self.issue(ListingKind::Search, request)
    }

    /// Footer shortcut: set the city filter from a `"Schools in <city>"`
    /// label and search. The host should scroll the search region into view
    /// when this returns a request. Labels without a city are ignored.
    pub fn begin_footer_search(&mut self, label: &str) -> Option<PendingListing> {
        let city = footer_city(label)?;
        debug!(%city, "footer shortcut");
        self.filters.city = city;
        Some(self.begin_search())
    }

    /// Clear every filter, restore the default sort and reload everything.
    pub fn reset(&mut self) -> PendingListing {
        self.filters = FilterSelection::default();
        self.sort_key = SortKey::default();
        self.begin_load_all()
    }

    fn issue(&mut self, kind: ListingKind, request: HttpRequest) -> PendingListing {
        let ticket = RequestTicket(self.next_ticket);
        self.next_ticket += 1;
        self.window.reset();
        self.status = ResultsStatus::Loading;
        self.in_flight = Some((ticket, kind));
        debug!(
            ticket = ticket.raw(),
            method = request.method.as_str(),
            url = %request.url,
            ?kind,
            "issuing listing request"
        );
        PendingListing { ticket, request }
    }

    pub fn complete_listing(
        &mut self,
        ticket: RequestTicket,
        response: HttpResponse,
    ) -> ListingOutcome {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.raw(), "discarding stale listing response");
            return ListingOutcome::Stale;
        }
        let parsed = self.client.parse_school_list(response);
        self.settle_listing(ticket, parsed)
    }

    /// The host could not execute the listing request.
    pub fn fail_listing(&mut self, ticket: RequestTicket, reason: &str) -> ListingOutcome {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.raw(), "discarding stale listing failure");
            return ListingOutcome::Stale;
        }
        self.settle_listing(ticket, Err(ApiError::Transport(reason.to_string())))
    }

    fn is_current(&self, ticket: RequestTicket) -> bool {
        matches!(self.in_flight, Some((current, _)) if current == ticket)
    }

    fn settle_listing(
        &mut self,
        ticket: RequestTicket,
        parsed: Result<Vec<SchoolRecord>, ApiError>,
    ) -> ListingOutcome {
        let Some((_, kind)) = self.in_flight.take() else {
            return ListingOutcome::Stale;
        };
        match parsed {
            Ok(schools) => {
                self.results = sort_schools(&schools, self.sort_key);
                self.status = ResultsStatus::Ready;
                debug!(ticket = ticket.raw(), total = self.results.len(), "listing accepted");
                ListingOutcome::Accepted {
                    total: self.results.len(),
                }
            }
            Err(err) => {
                warn!(ticket = ticket.raw(), error = %err, ?kind, "listing request failed");
                self.status = ResultsStatus::Failed(kind.failure_message().to_string());
                ListingOutcome::Failed
            }
        }
    }

    // -----------------------------------------------------------------------
    // Sorting and pagination
    // -----------------------------------------------------------------------

    /// Re-sort the held result set without fetching. The page window is
    /// kept.
    pub fn change_sort(&mut self, key: SortKey) {
        debug!(sort = key.as_str(), "re-sorting results");
        self.sort_key = key;
        self.results = sort_schools(&self.results, key);
        self.status = ResultsStatus::Ready;
    }

    /// Grow the page window by one page. Returns `false` when there is no
    /// "Show More" control to activate.
    pub fn show_more(&mut self) -> bool {
        if self.status != ResultsStatus::Ready || !self.window.has_more(self.results.len()) {
            return false;
        }
        self.window.grow();
        true
    }

    // -----------------------------------------------------------------------
    // Filter options
    // -----------------------------------------------------------------------

    pub fn begin_filter_options(&self) -> FilterOptionRequests {
        FilterOptionRequests {
            cities: self.client.build_filter_values(FilterKind::City),
            boards: self.client.build_filter_values(FilterKind::Board),
            types: self.client.build_filter_values(FilterKind::Type),
        }
    }

    /// Populate all three selectors, or none of them if any response fails.
    pub fn complete_filter_options(
        &mut self,
        cities: HttpResponse,
        boards: HttpResponse,
        types: HttpResponse,
    ) -> Result<(), ApiError> {
        let joined = self.parse_filter_options(cities, boards, types);
        self.settle_filter_options(joined)
    }

    /// The host could not execute one of the filter-option requests.
    pub fn fail_filter_options(&mut self, reason: &str) -> Result<(), ApiError> {
        self.settle_filter_options(Err(ApiError::Transport(reason.to_string())))
    }

    fn parse_filter_options(
        &self,
        cities: HttpResponse,
        boards: HttpResponse,
        types: HttpResponse,
    ) -> Result<FilterOptions, ApiError> {
        Ok(FilterOptions {
            cities: self.client.parse_filter_values(cities)?,
            boards: self.client.parse_filter_values(boards)?,
            types: self.client.parse_filter_values(types)?,
        })
    }

    fn settle_filter_options(
        &mut self,
        joined: Result<FilterOptions, ApiError>,
    ) -> Result<(), ApiError> {
        match joined {
            Ok(options) => {
                debug!(
                    cities = options.cities.len(),
                    boards = options.boards.len(),
                    types = options.types.len(),
                    "filter options loaded"
                );
                self.options = options;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "filter options failed");
                self.status = ResultsStatus::Failed(OPTIONS_FAILED.to_string());
                Err(err)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Detail overlay
    // -----------------------------------------------------------------------

    pub fn begin_detail(&self, id: &SchoolId) -> HttpRequest {
        self.client.build_get_school(id)
    }

    /// Open the overlay with the fetched record, or show an error instead.
    pub fn complete_detail(&mut self, response: HttpResponse) -> Result<(), ApiError> {
        let parsed = self.client.parse_get_school(response);
        self.settle_detail(parsed)
    }

    pub fn fail_detail(&mut self, reason: &str) -> Result<(), ApiError> {
        self.settle_detail(Err(ApiError::Transport(reason.to_string())))
    }

    fn settle_detail(&mut self, parsed: Result<SchoolRecord, ApiError>) -> Result<(), ApiError> {
        match parsed {
            Ok(school) => {
                debug!(id = %school.id, "opening detail overlay");
                self.overlay = Some(school);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "detail request failed");
                self.status = ResultsStatus::Failed(DETAIL_FAILED.to_string());
                Err(err)
            }
        }
    }

    /// Close control. Returns whether the overlay was open.
    pub fn close_overlay(&mut self) -> bool {
        self.overlay.take().is_some()
    }

    /// A click anywhere while the overlay is shown. Only a click on the
    /// backdrop, outside the content area, closes it.
    pub fn click(&mut self, on_backdrop: bool) -> bool {
        on_backdrop && self.close_overlay()
    }

    /// Escape closes the overlay; Enter inside a search or filter field
    /// starts a search.
    pub fn handle_key(&mut self, key: &str, in_search_field: bool) -> KeyAction {
        match key {
            "Escape" if self.close_overlay() => KeyAction::OverlayClosed,
            "Enter" if in_search_field => KeyAction::Search(self.begin_search()),
            _ => KeyAction::Ignored,
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Markup for the results region in its current state.
    pub fn render_results(&self) -> String {
        match &self.status {
            ResultsStatus::Idle => String::new(),
            ResultsStatus::Loading => render::render_loading(),
            ResultsStatus::Failed(message) => render::render_error(message),
            ResultsStatus::Ready => render::render_listing(&self.results, &self.window),
        }
    }

    /// Counter text, only while the result set is shown. Otherwise the host
    /// keeps whatever counter it last displayed.
    pub fn counter_text(&self) -> Option<String> {
        (self.status == ResultsStatus::Ready).then(|| render::counter_text(self.results.len()))
    }

    pub fn render_overlay(&self) -> Option<String> {
        self.overlay.as_ref().map(render::render_detail)
    }

    pub fn render_filter_options(&self, kind: FilterKind) -> String {
        render::render_filter_options(kind, self.options.values(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> DirectoryController {
        DirectoryController::with_client(SchoolClient::new("http://api.test"), 6)
    }

    fn schools_json(count: usize) -> String {
        let items: Vec<String> = (1..=count)
            .map(|i| format!(r#"{{"id":{i},"name":"School {i:02}"}}"#))
            .collect();
        format!("[{}]", items.join(","))
    }

    fn ok(body: impl Into<String>) -> HttpResponse {
        HttpResponse::new(200, body)
    }

    #[test]
    fn load_all_shows_loading_then_results() {
        let mut c = controller();
        let pending = c.begin_load_all();
        assert_eq!(pending.request.url, "http://api.test/schools");
        assert_eq!(c.status(), &ResultsStatus::Loading);
        assert!(c.render_results().contains("Loading schools"));

        let outcome = c.complete_listing(pending.ticket, ok(schools_json(3)));
        assert_eq!(outcome, ListingOutcome::Accepted { total: 3 });
        assert_eq!(c.counter_text().as_deref(), Some("3 schools found"));
        assert_eq!(c.render_results().matches("school-card").count(), 3);
    }

    #[test]
    fn empty_result_renders_zero_count_and_no_cards() {
        let mut c = controller();
        let pending = c.begin_load_all();
        c.complete_listing(pending.ticket, ok("[]"));
        assert_eq!(c.counter_text().as_deref(), Some("0 schools found"));
        let html = c.render_results();
        assert!(html.contains("No schools found"));
        assert!(!html.contains("school-card"));
    }

    #[test]
    fn show_more_grows_window_without_refetch() {
        let mut c = controller();
        let pending = c.begin_load_all();
        c.complete_listing(pending.ticket, ok(schools_json(8)));

        let html = c.render_results();
        assert_eq!(html.matches("class=\"school-card\"").count(), 6);
        assert!(html.contains("Show More"));

        assert!(c.show_more());
        let html = c.render_results();
        assert_eq!(html.matches("class=\"school-card\"").count(), 8);
        assert!(!html.contains("Show More"));
        assert!(!c.show_more());
    }

    #[test]
    fn fresh_search_resets_window() {
        let mut c = controller();
        let pending = c.begin_load_all();
        c.complete_listing(pending.ticket, ok(schools_json(20)));
        c.show_more();
        c.show_more();
        assert_eq!(c.window().visible(), 18);

        c.begin_search();
        assert_eq!(c.window().visible(), 6);
    }

    #[test]
    fn search_sends_only_non_empty_filters() {
        let mut c = controller();
        c.set_filters(FilterSelection {
            name: " dav ".into(),
            board: "CBSE".into(),
            ..Default::default()
        });
        let pending = c.begin_search();
        assert_eq!(
            pending.request.url,
            "http://api.test/schools/search?name=dav&board=CBSE"
        );
    }

    #[test]
    fn failure_keeps_previous_results_and_shows_message() {
        let mut c = controller();
        let pending = c.begin_load_all();
        c.complete_listing(pending.ticket, ok(schools_json(2)));

        let pending = c.begin_search();
        let outcome = c.complete_listing(pending.ticket, HttpResponse::new(500, "boom"));
        assert_eq!(outcome, ListingOutcome::Failed);
        assert_eq!(c.results().len(), 2);
        assert_eq!(c.status(), &ResultsStatus::Failed(SEARCH_FAILED.to_string()));
        assert!(c.render_results().contains(SEARCH_FAILED));
        assert_eq!(c.counter_text(), None);
    }

    #[test]
    fn malformed_json_and_transport_failures_collapse_to_one_message() {
        let mut c = controller();
        let pending = c.begin_load_all();
        c.complete_listing(pending.ticket, ok("{not json"));
        assert_eq!(c.status(), &ResultsStatus::Failed(LOAD_FAILED.to_string()));

        let pending = c.begin_load_all();
        let outcome = c.fail_listing(pending.ticket, "connection refused");
        assert_eq!(outcome, ListingOutcome::Failed);
        assert_eq!(c.status(), &ResultsStatus::Failed(LOAD_FAILED.to_string()));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut c = controller();
        let older = c.begin_load_all();
        let newer = c.begin_search();

        let outcome = c.complete_listing(newer.ticket, ok(schools_json(1)));
        assert_eq!(outcome, ListingOutcome::Accepted { total: 1 });

        let outcome = c.complete_listing(older.ticket, ok(schools_json(5)));
        assert_eq!(outcome, ListingOutcome::Stale);
        assert_eq!(c.results().len(), 1);
    }

    #[test]
    fn older_response_arriving_first_is_also_discarded() {
        let mut c = controller();
        let older = c.begin_load_all();
        let newer = c.begin_load_all();
        assert_eq!(
            c.complete_listing(older.ticket, ok(schools_json(5))),
            ListingOutcome::Stale
        );
        assert_eq!(c.status(), &ResultsStatus::Loading);
        assert_eq!(
            c.complete_listing(newer.ticket, ok(schools_json(2))),
            ListingOutcome::Accepted { total: 2 }
        );
        assert_eq!(
            c.complete_listing(newer.ticket, ok(schools_json(9))),
            ListingOutcome::Stale
        );
    }

    #[test]
    fn results_are_sorted_by_active_key_on_arrival() {
        let mut c = controller();
        c.change_sort(SortKey::Rating);
        let pending = c.begin_load_all();
        c.complete_listing(
            pending.ticket,
            ok(r#"[{"id":1,"name":"A","rating":3.2},{"id":2,"name":"B"},{"id":3,"name":"C","rating":4.8}]"#),
        );
        let ids: Vec<&str> = c.results().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn sort_change_resorts_without_touching_window() {
        let mut c = controller();
        let pending = c.begin_load_all();
        c.complete_listing(pending.ticket, ok(schools_json(10)));
        c.show_more();

        c.change_sort(SortKey::Rating);
        assert_eq!(c.window().visible(), 12);
        assert_eq!(c.sort_key(), SortKey::Rating);

        c.change_sort(SortKey::Name);
        assert_eq!(c.results()[0].name, "School 01");
    }

    #[test]
    fn reset_clears_filters_and_reloads_everything() {
        let mut c = controller();
        c.set_filters(FilterSelection {
            city: "Puri".into(),
            ..Default::default()
        });
        c.change_sort(SortKey::Location);
        let pending = c.begin_search();
        c.complete_listing(pending.ticket, ok(schools_json(9)));
        c.show_more();

        let pending = c.reset();
        assert_eq!(pending.request.url, "http://api.test/schools");
        assert!(c.filters().is_empty());
        assert_eq!(c.sort_key(), SortKey::Name);
        assert_eq!(c.window().visible(), 6);

        c.complete_listing(pending.ticket, ok(schools_json(2)));
        assert_eq!(c.results().len(), 2);
    }

    #[test]
    fn footer_shortcut_sets_city_and_searches() {
        let mut c = controller();
        let pending = c.begin_footer_search("Schools in Cuttack").unwrap();
        assert_eq!(c.filters().city, "Cuttack");
        assert_eq!(pending.request.url, "http://api.test/schools/search?city=Cuttack");
        assert!(c.begin_footer_search("Contact us").is_none());
    }

    #[test]
    fn enter_in_field_searches_and_escape_closes_overlay() {
        let mut c = controller();
        assert!(matches!(c.handle_key("Enter", true), KeyAction::Search(_)));
        assert!(matches!(c.handle_key("Enter", false), KeyAction::Ignored));
        assert!(matches!(c.handle_key("Escape", false), KeyAction::Ignored));

        c.complete_detail(ok(r#"{"id":1,"name":"A"}"#)).unwrap();
        assert!(matches!(c.handle_key("Escape", false), KeyAction::OverlayClosed));
        assert!(!c.is_overlay_open());
    }

    #[test]
    fn filter_options_populate_all_three() {
        let mut c = controller();
        let requests = c.begin_filter_options();
        assert_eq!(requests.cities.url, "http://api.test/schools/cities");
        assert_eq!(requests.boards.url, "http://api.test/schools/boards");
        assert_eq!(requests.types.url, "http://api.test/schools/types");

        c.complete_filter_options(
            ok(r#"["Cuttack","Puri"]"#),
            ok(r#"["CBSE"]"#),
            ok(r#"["Private"]"#),
        )
        .unwrap();
        assert_eq!(c.filter_options().cities, vec!["Cuttack", "Puri"]);
        let html = c.render_filter_options(FilterKind::City);
        assert!(html.starts_with("<option value=\"\">All Cities</option>"));
        assert_eq!(html.matches("<option").count(), 3);
    }

    #[test]
    fn one_failing_filter_list_populates_none() {
        let mut c = controller();
        let err = c
            .complete_filter_options(
                ok(r#"["Cuttack"]"#),
                HttpResponse::new(503, ""),
                ok(r#"["Private"]"#),
            )
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 503, .. }));
        assert_eq!(c.filter_options(), &FilterOptions::default());
        assert_eq!(
            c.render_filter_options(FilterKind::Type),
            "<option value=\"\">All Types</option>"
        );
        assert!(c.render_results().contains(OPTIONS_FAILED));

        assert!(c.fail_filter_options("offline").is_err());
        assert_eq!(c.filter_options(), &FilterOptions::default());
    }

    #[test]
    fn detail_success_opens_overlay() {
        let mut c = controller();
        let req = c.begin_detail(&SchoolId::new("7"));
        assert_eq!(req.url, "http://api.test/schools/7");

        c.complete_detail(ok(
            r#"{"id":7,"name":"Kendriya Vidyalaya","website":"https://kv.example"}"#,
        ))
        .unwrap();
        let html = c.render_overlay().unwrap();
        assert!(html.contains("Kendriya Vidyalaya"));
        assert!(html.contains("Visit Website"));
    }

    #[test]
    fn detail_failure_keeps_overlay_closed() {
        let mut c = controller();
        let err = c.complete_detail(HttpResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        assert!(c.render_overlay().is_none());
        assert!(c.render_results().contains(DETAIL_FAILED));

        assert!(c.fail_detail("timeout").is_err());
        assert!(!c.is_overlay_open());
    }

    #[test]
    fn overlay_close_triggers_are_idempotent() {
        let mut c = controller();
        c.complete_detail(ok(r#"{"id":1,"name":"A"}"#)).unwrap();

        assert!(!c.click(false));
        assert!(c.is_overlay_open());
        assert!(c.click(true));
        assert!(!c.click(true));

        c.complete_detail(ok(r#"{"id":1,"name":"A"}"#)).unwrap();
        assert!(c.close_overlay());
        assert!(!c.close_overlay());
        assert!(matches!(c.handle_key("Escape", false), KeyAction::Ignored));
    }

    #[test]
    fn escaped_markup_survives_the_full_cycle() {
        let mut c = controller();
        let pending = c.begin_load_all();
        c.complete_listing(
            pending.ticket,
            ok(r#"[{"id":1,"name":"<script>alert(1)</script>","city":"<b>"}]"#),
        );
        let html = c.render_results();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
    }
}
