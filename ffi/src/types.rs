//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Enums only flow out of the library;
//! values coming in from C (sort selector, filter kind) are plain strings or
//! integers so an unexpected value can never be an invalid discriminant.

use std::ffi::CString;
use std::os::raw::c_char;

use school_finder_core::{DirectoryController, FilterKind, HttpRequest, ListingOutcome};

/// Opaque handle to a `DirectoryController`. C callers receive a pointer to
/// this and pass it back into every FFI function.
pub struct FfiController {
    pub(crate) inner: DirectoryController,
}

/// Convert to a C string, dropping interior NULs rather than failing.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    let s = if s.contains('\0') { s.replace('\0', "") } else { s };
    CString::new(s).unwrap_or_default().into_raw()
}

/// Map the integer filter kind used across the boundary.
pub(crate) fn filter_kind_from_raw(raw: u32) -> Option<FilterKind> {
    match raw {
        0 => Some(FilterKind::City),
        1 => Some(FilterKind::Board),
        2 => Some(FilterKind::Type),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A GET request described as C-compatible plain data.
///
/// `ticket` is non-zero for listing and search requests and must be passed
/// back to `sf_complete_listing` / `sf_fail_listing`; it is zero otherwise.
#[repr(C)]
pub struct FfiHttpRequest {
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub ticket: u64,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest, ticket: u64) -> *mut Self {
        let url = into_c_string(req.url);

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            // Boxed slice so capacity equals length when freeing.
            let boxed: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: into_c_string(k),
                    value: into_c_string(v),
                })
                .collect();
            Box::into_raw(boxed) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            url,
            headers,
            headers_len,
            ticket,
        }))
    }
}

/// The three filter-option requests. The caller runs them concurrently and
/// passes all three responses to `sf_complete_filter_options`.
#[repr(C)]
pub struct FfiFilterOptionRequests {
    pub cities: *mut FfiHttpRequest,
    pub boards: *mut FfiHttpRequest,
    pub types: *mut FfiHttpRequest,
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request and
/// passes a pointer in. The FFI layer reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Status returned by every mutating call.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiOutcome {
    /// The operation took effect.
    Ok = 0,
    /// The request failed; an error message now fills the results region.
    Failed = 1,
    /// A newer listing request superseded this one; nothing changed.
    Stale = 2,
    /// Nothing to do (no "Show More" control, overlay already closed).
    Ignored = 3,
    NullArg = 4,
    Panic = 5,
}

impl From<ListingOutcome> for FfiOutcome {
    fn from(outcome: ListingOutcome) -> Self {
        match outcome {
            ListingOutcome::Accepted { .. } => FfiOutcome::Ok,
            ListingOutcome::Failed => FfiOutcome::Failed,
            ListingOutcome::Stale => FfiOutcome::Stale,
        }
    }
}

impl<E> From<Result<(), E>> for FfiOutcome {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => FfiOutcome::Ok,
            Err(_) => FfiOutcome::Failed,
        }
    }
}

impl FfiOutcome {
    pub(crate) fn from_flag(took_effect: bool) -> Self {
        if took_effect {
            FfiOutcome::Ok
        } else {
            FfiOutcome::Ignored
        }
    }
}

/// Effect of `sf_handle_key`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiKeyAction {
    Ignored = 0,
    OverlayClosed = 1,
    /// A search request was written to the out parameter.
    Search = 2,
    NullArg = 3,
    Panic = 4,
}
