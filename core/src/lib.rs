//! Client core for the school directory browser.
//!
//! # Overview
//! Fetches school records from a REST API, filters, sorts and paginates them
//! in memory, and renders escaped HTML for the results region, the detail
//! overlay and the filter selectors. The core never touches the network: it
//! builds `HttpRequest` values and parses `HttpResponse` values, and the host
//! runs the round-trip (host-does-IO pattern).
//!
//! # Design
//! - `SchoolClient` is stateless; it holds only the base URL.
//! - `DirectoryController` owns all mutable state and is the only place
//!   that state changes.
//! - Sorting, windowing and rendering are pure functions over plain data.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod pagination;
pub mod query;
pub mod render;
pub mod sort;
pub mod types;

pub use client::SchoolClient;
pub use config::{ConfigError, DirectoryConfig};
pub use controller::{
    DirectoryController, FilterOptionRequests, KeyAction, ListingOutcome, PendingListing,
    RequestTicket, ResultsStatus,
};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use pagination::PageWindow;
pub use sort::sort_schools;
pub use types::{FilterKind, FilterOptions, FilterSelection, SchoolId, SchoolRecord, SortKey};
