//! C-ABI wrapper around `school-finder-core`.
//!
//! # Overview
//! Exposes the directory controller through `extern "C"` functions so a
//! webview shell or any language with a C FFI can drive the browse cycle
//! without linking to serde or an async runtime. The host executes every
//! request it receives and passes the response back.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `sf_begin_*` functions return heap-allocated requests; `sf_complete_*`
//!   and `sf_fail_*` functions take the response (or a transport failure
//!   message) and return an `FfiOutcome`.
//! - `sf_render_*` functions return owned HTML strings.
//! - The C caller owns all returned pointers and must call the matching
//!   `sf_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use school_finder_core::{
    DirectoryConfig, DirectoryController, FilterSelection, HttpResponse, KeyAction,
    PendingListing, RequestTicket, SchoolClient, SchoolId, SortKey,
};

use types::*;

/// Read a C string; null or invalid UTF-8 reads as empty.
fn c_str_or_empty(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .unwrap_or("")
        .to_string()
}

fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    HttpResponse::new(resp.status, c_str_or_empty(resp.body))
}

fn listing_request(pending: PendingListing) -> *mut FfiHttpRequest {
    FfiHttpRequest::from_core(pending.request, pending.ticket.raw())
}

// ---------------------------------------------------------------------------
// Controller lifecycle
// ---------------------------------------------------------------------------

/// Create a controller bound to `base_url`. A `page_size` of zero selects
/// the default page size.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `sf_controller_free`.
#[unsafe(no_mangle)]
pub extern "C" fn sf_controller_new(base_url: *const c_char, page_size: u32) -> *mut FfiController {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let page_size = match page_size {
            0 => DirectoryConfig::default().page_size,
            n => n as usize,
        };
        let client = SchoolClient::new(&c_str_or_empty(base_url));
        let inner = DirectoryController::with_client(client, page_size);
        Box::into_raw(Box::new(FfiController { inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a controller created by `sf_controller_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn sf_controller_free(ctrl: *mut FfiController) {
    if !ctrl.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(ctrl) });
        });
    }
}

// ---------------------------------------------------------------------------
// Listing and search
// ---------------------------------------------------------------------------

/// Start an unfiltered load. Returns null if `ctrl` is null.
#[unsafe(no_mangle)]
pub extern "C" fn sf_begin_load_all(ctrl: *mut FfiController) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if ctrl.is_null() {
            return std::ptr::null_mut();
        }
        let ctrl = unsafe { &mut *ctrl };
        listing_request(ctrl.inner.begin_load_all())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Replace the filter selection. Null strings mean "no constraint".
#[unsafe(no_mangle)]
pub extern "C" fn sf_set_filters(
    ctrl: *mut FfiController,
    name: *const c_char,
    city: *const c_char,
    board: *const c_char,
    school_type: *const c_char,
) -> FfiOutcome {
    catch_unwind(|| {
        if ctrl.is_null() {
            return FfiOutcome::NullArg;
        }
        let ctrl = unsafe { &mut *ctrl };
        ctrl.inner.set_filters(FilterSelection {
            name: c_str_or_empty(name),
            city: c_str_or_empty(city),
            board: c_str_or_empty(board),
            school_type: c_str_or_empty(school_type),
        });
        FfiOutcome::Ok
    })
    .unwrap_or(FfiOutcome::Panic)
}

/// Start a search with the current filter selection.
#[unsafe(no_mangle)]
pub extern "C" fn sf_begin_search(ctrl: *mut FfiController) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if ctrl.is_null() {
            return std::ptr::null_mut();
        }
        let ctrl = unsafe { &mut *ctrl };
        listing_request(ctrl.inner.begin_search())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Footer shortcut. Returns null when `label` names no city; otherwise the
/// caller should scroll the search region into view and execute the request.
#[unsafe(no_mangle)]
pub extern "C" fn sf_begin_footer_search(
    ctrl: *mut FfiController,
    label: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if ctrl.is_null() || label.is_null() {
            return std::ptr::null_mut();
        }
        let ctrl = unsafe { &mut *ctrl };
        match ctrl.inner.begin_footer_search(&c_str_or_empty(label)) {
            Some(pending) => listing_request(pending),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Clear filters and sort, then start an unfiltered load.
#[unsafe(no_mangle)]
pub extern "C" fn sf_reset(ctrl: *mut FfiController) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if ctrl.is_null() {
            return std::ptr::null_mut();
        }
        let ctrl = unsafe { &mut *ctrl };
        listing_request(ctrl.inner.reset())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Hand back the response for a listing or search request.
#[unsafe(no_mangle)]
pub extern "C" fn sf_complete_listing(
    ctrl: *mut FfiController,
    ticket: u64,
    response: *const FfiHttpResponse,
) -> FfiOutcome {
    catch_unwind(|| {
        if ctrl.is_null() || response.is_null() {
            return FfiOutcome::NullArg;
        }
        let ctrl = unsafe { &mut *ctrl };
        let resp = ffi_response_to_core(unsafe { &*response });
        ctrl.inner
            .complete_listing(RequestTicket::from_raw(ticket), resp)
            .into()
    })
    .unwrap_or(FfiOutcome::Panic)
}

/// Report that a listing or search request could not be executed.
#[unsafe(no_mangle)]
pub extern "C" fn sf_fail_listing(
    ctrl: *mut FfiController,
    ticket: u64,
    reason: *const c_char,
) -> FfiOutcome {
    catch_unwind(|| {
        if ctrl.is_null() {
            return FfiOutcome::NullArg;
        }
        let ctrl = unsafe { &mut *ctrl };
        ctrl.inner
            .fail_listing(RequestTicket::from_raw(ticket), &c_str_or_empty(reason))
            .into()
    })
    .unwrap_or(FfiOutcome::Panic)
}

// ---------------------------------------------------------------------------
// Sorting and pagination
// ---------------------------------------------------------------------------

/// Re-sort by a selector value (`"name"`, `"rating"`, `"location"`).
/// Unknown or null values sort by name.
#[unsafe(no_mangle)]
pub extern "C" fn sf_change_sort(ctrl: *mut FfiController, selector: *const c_char) -> FfiOutcome {
    catch_unwind(|| {
        if ctrl.is_null() {
            return FfiOutcome::NullArg;
        }
        let ctrl = unsafe { &mut *ctrl };
        ctrl.inner
            .change_sort(SortKey::from_selector(&c_str_or_empty(selector)));
        FfiOutcome::Ok
    })
    .unwrap_or(FfiOutcome::Panic)
}

/// Activate "Show More". Returns `Ignored` when there is nothing more.
#[unsafe(no_mangle)]
pub extern "C" fn sf_show_more(ctrl: *mut FfiController) -> FfiOutcome {
    catch_unwind(|| {
        if ctrl.is_null() {
            return FfiOutcome::NullArg;
        }
        let ctrl = unsafe { &mut *ctrl };
        FfiOutcome::from_flag(ctrl.inner.show_more())
    })
    .unwrap_or(FfiOutcome::Panic)
}

// ---------------------------------------------------------------------------
// Filter options
// ---------------------------------------------------------------------------

/// Build the three filter-option requests.
/// The caller must free the result with `sf_free_filter_requests`.
#[unsafe(no_mangle)]
pub extern "C" fn sf_begin_filter_options(ctrl: *const FfiController) -> *mut FfiFilterOptionRequests {
    catch_unwind(|| {
        if ctrl.is_null() {
            return std::ptr::null_mut();
        }
        let ctrl = unsafe { &*ctrl };
        let requests = ctrl.inner.begin_filter_options();
        Box::into_raw(Box::new(FfiFilterOptionRequests {
            cities: FfiHttpRequest::from_core(requests.cities, 0),
            boards: FfiHttpRequest::from_core(requests.boards, 0),
            types: FfiHttpRequest::from_core(requests.types, 0),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Hand back all three filter-option responses at once.
#[unsafe(no_mangle)]
pub extern "C" fn sf_complete_filter_options(
    ctrl: *mut FfiController,
    cities: *const FfiHttpResponse,
    boards: *const FfiHttpResponse,
    types: *const FfiHttpResponse,
) -> FfiOutcome {
    catch_unwind(|| {
        if ctrl.is_null() || cities.is_null() || boards.is_null() || types.is_null() {
            return FfiOutcome::NullArg;
        }
        let ctrl = unsafe { &mut *ctrl };
        let (cities, boards, types) = unsafe {
            (
                ffi_response_to_core(&*cities),
                ffi_response_to_core(&*boards),
                ffi_response_to_core(&*types),
            )
        };
        ctrl.inner
            .complete_filter_options(cities, boards, types)
            .into()
    })
    .unwrap_or(FfiOutcome::Panic)
}

/// Report that any of the filter-option requests could not be executed.
#[unsafe(no_mangle)]
pub extern "C" fn sf_fail_filter_options(ctrl: *mut FfiController, reason: *const c_char) -> FfiOutcome {
    catch_unwind(|| {
        if ctrl.is_null() {
            return FfiOutcome::NullArg;
        }
        let ctrl = unsafe { &mut *ctrl };
        ctrl.inner.fail_filter_options(&c_str_or_empty(reason)).into()
    })
    .unwrap_or(FfiOutcome::Panic)
}

// ---------------------------------------------------------------------------
// Detail overlay
// ---------------------------------------------------------------------------

/// Build the detail request for `id`. Returns null if either is null.
#[unsafe(no_mangle)]
pub extern "C" fn sf_begin_detail(ctrl: *const FfiController, id: *const c_char) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if ctrl.is_null() || id.is_null() {
            return std::ptr::null_mut();
        }
        let ctrl = unsafe { &*ctrl };
        let req = ctrl.inner.begin_detail(&SchoolId::new(c_str_or_empty(id)));
        FfiHttpRequest::from_core(req, 0)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Hand back the detail response. `Ok` means the overlay is now open.
#[unsafe(no_mangle)]
pub extern "C" fn sf_complete_detail(
    ctrl: *mut FfiController,
    response: *const FfiHttpResponse,
) -> FfiOutcome {
    catch_unwind(|| {
        if ctrl.is_null() || response.is_null() {
            return FfiOutcome::NullArg;
        }
        let ctrl = unsafe { &mut *ctrl };
        let resp = ffi_response_to_core(unsafe { &*response });
        ctrl.inner.complete_detail(resp).into()
    })
    .unwrap_or(FfiOutcome::Panic)
}

#[unsafe(no_mangle)]
pub extern "C" fn sf_fail_detail(ctrl: *mut FfiController, reason: *const c_char) -> FfiOutcome {
    catch_unwind(|| {
        if ctrl.is_null() {
            return FfiOutcome::NullArg;
        }
        let ctrl = unsafe { &mut *ctrl };
        ctrl.inner.fail_detail(&c_str_or_empty(reason)).into()
    })
    .unwrap_or(FfiOutcome::Panic)
}

/// Close control. Returns `Ignored` if the overlay was already closed.
#[unsafe(no_mangle)]
pub extern "C" fn sf_close_overlay(ctrl: *mut FfiController) -> FfiOutcome {
    catch_unwind(|| {
        if ctrl.is_null() {
            return FfiOutcome::NullArg;
        }
        let ctrl = unsafe { &mut *ctrl };
        FfiOutcome::from_flag(ctrl.inner.close_overlay())
    })
    .unwrap_or(FfiOutcome::Panic)
}

/// A click while the overlay is shown; only a backdrop click closes it.
#[unsafe(no_mangle)]
pub extern "C" fn sf_click(ctrl: *mut FfiController, on_backdrop: bool) -> FfiOutcome {
    catch_unwind(|| {
        if ctrl.is_null() {
            return FfiOutcome::NullArg;
        }
        let ctrl = unsafe { &mut *ctrl };
        FfiOutcome::from_flag(ctrl.inner.click(on_backdrop))
    })
    .unwrap_or(FfiOutcome::Panic)
}

/// Route a key press. On `Search`, a request is written to `out_request`
/// (if non-null) and must be freed with `sf_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn sf_handle_key(
    ctrl: *mut FfiController,
    key: *const c_char,
    in_search_field: bool,
    out_request: *mut *mut FfiHttpRequest,
) -> FfiKeyAction {
    catch_unwind(|| {
        if ctrl.is_null() || key.is_null() {
            return FfiKeyAction::NullArg;
        }
        let ctrl = unsafe { &mut *ctrl };
        match ctrl.inner.handle_key(&c_str_or_empty(key), in_search_field) {
            KeyAction::Ignored => FfiKeyAction::Ignored,
            KeyAction::OverlayClosed => FfiKeyAction::OverlayClosed,
            KeyAction::Search(pending) => {
                if !out_request.is_null() {
                    unsafe { *out_request = listing_request(pending) };
                }
                FfiKeyAction::Search
            }
        }
    })
    .unwrap_or(FfiKeyAction::Panic)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Markup for the results region. Never null unless `ctrl` is null.
#[unsafe(no_mangle)]
pub extern "C" fn sf_render_results(ctrl: *const FfiController) -> *mut c_char {
    catch_unwind(|| {
        if ctrl.is_null() {
            return std::ptr::null_mut();
        }
        let ctrl = unsafe { &*ctrl };
        into_c_string(ctrl.inner.render_results())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Counter text, or null while no result set is shown.
#[unsafe(no_mangle)]
pub extern "C" fn sf_counter_text(ctrl: *const FfiController) -> *mut c_char {
    catch_unwind(|| {
        if ctrl.is_null() {
            return std::ptr::null_mut();
        }
        let ctrl = unsafe { &*ctrl };
        ctrl.inner
            .counter_text()
            .map_or(std::ptr::null_mut(), into_c_string)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Detail panel markup, or null while the overlay is closed.
#[unsafe(no_mangle)]
pub extern "C" fn sf_render_overlay(ctrl: *const FfiController) -> *mut c_char {
    catch_unwind(|| {
        if ctrl.is_null() {
            return std::ptr::null_mut();
        }
        let ctrl = unsafe { &*ctrl };
        ctrl.inner
            .render_overlay()
            .map_or(std::ptr::null_mut(), into_c_string)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// `<option>` markup for a selector: 0 = city, 1 = board, 2 = type.
/// Returns null for any other kind.
#[unsafe(no_mangle)]
pub extern "C" fn sf_render_filter_options(ctrl: *const FfiController, kind: u32) -> *mut c_char {
    catch_unwind(|| {
        if ctrl.is_null() {
            return std::ptr::null_mut();
        }
        let Some(kind) = filter_kind_from_raw(kind) else {
            return std::ptr::null_mut();
        };
        let ctrl = unsafe { &*ctrl };
        into_c_string(ctrl.inner.render_filter_options(kind))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `sf_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn sf_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| free_request(req));
}

fn free_request(req: *mut FfiHttpRequest) {
    let req = unsafe { Box::from_raw(req) };
    if !req.url.is_null() {
        drop(unsafe { std::ffi::CString::from_raw(req.url) });
    }
    if !req.headers.is_null() && req.headers_len > 0 {
        let headers = unsafe {
            Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                req.headers,
                req.headers_len as usize,
            ))
        };
        for h in headers.iter() {
            if !h.key.is_null() {
                drop(unsafe { std::ffi::CString::from_raw(h.key) });
            }
            if !h.value.is_null() {
                drop(unsafe { std::ffi::CString::from_raw(h.value) });
            }
        }
    }
}

/// Free the bundle returned by `sf_begin_filter_options`, including the
/// three requests. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn sf_free_filter_requests(requests: *mut FfiFilterOptionRequests) {
    if requests.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let requests = unsafe { Box::from_raw(requests) };
        for req in [requests.cities, requests.boards, requests.types] {
            if !req.is_null() {
                free_request(req);
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn sf_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { std::ffi::CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
