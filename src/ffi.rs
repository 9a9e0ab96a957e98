//! FFI bindings for Synheart Survey
//!
//! This module provides C-compatible functions for driving a survey trial
//! from other languages. All functions use C strings (null-terminated) and
//! return allocated memory that must be freed by the caller using
//! `survey_free_string`. Command outcomes and view states are JSON strings.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::controller::SurveyController;
use crate::types::SurveyConfig;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Helper to serialize a value to a newly allocated JSON C string
fn json_to_cstr<T: serde::Serialize>(value: &T) -> *mut c_char {
    match serde_json::to_string(value) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Controller API
// ============================================================================

/// Opaque handle to a SurveyController
pub struct SurveyControllerHandle {
    controller: SurveyController,
}

/// Create a new survey controller from a JSON configuration.
///
/// # Safety
/// - `config_json` must be a valid null-terminated C string.
/// - Returns a pointer to a newly allocated controller.
/// - Must be freed with `survey_controller_free`.
/// - Returns NULL on error; call `survey_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn survey_controller_new(
    config_json: *const c_char,
) -> *mut SurveyControllerHandle {
    clear_last_error();

    let json_str = match cstr_to_string(config_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid config string pointer");
            return ptr::null_mut();
        }
    };

    let config: SurveyConfig = match serde_json::from_str(&json_str) {
        Ok(config) => config,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    match SurveyController::new(config) {
        Ok(controller) => Box::into_raw(Box::new(SurveyControllerHandle { controller })),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a survey controller.
///
/// # Safety
/// - `handle` must be a valid pointer returned by `survey_controller_new`.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn survey_controller_free(handle: *mut SurveyControllerHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Record a selection on the active page.
///
/// # Safety
/// - `handle` must be a valid pointer returned by `survey_controller_new`.
/// - `name` must be a valid null-terminated C string.
/// - Returns a newly allocated JSON outcome string that must be freed with
///   `survey_free_string`.
/// - Returns NULL on error; call `survey_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn survey_on_select(
    handle: *mut SurveyControllerHandle,
    name: *const c_char,
    option_pos: u32,
) -> *mut c_char {
    clear_last_error();

    if handle.is_null() {
        set_last_error("Null controller pointer");
        return ptr::null_mut();
    }

    let name_str = match cstr_to_string(name) {
        Some(s) => s,
        None => {
            set_last_error("Invalid name string pointer");
            return ptr::null_mut();
        }
    };

    let handle = &mut *handle;
    let outcome = handle.controller.on_select(&name_str, option_pos as usize);
    json_to_cstr(&outcome)
}

/// Request a forward transition.
///
/// # Safety
/// - `handle` must be a valid pointer returned by `survey_controller_new`.
/// - Returns a newly allocated JSON outcome string that must be freed with
///   `survey_free_string`.
/// - Returns NULL on error; call `survey_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn survey_on_advance(handle: *mut SurveyControllerHandle) -> *mut c_char {
    clear_last_error();

    if handle.is_null() {
        set_last_error("Null controller pointer");
        return ptr::null_mut();
    }

    let handle = &mut *handle;
    let outcome = handle.controller.on_advance_requested();
    json_to_cstr(&outcome)
}

/// Request a backward transition.
///
/// # Safety
/// - `handle` must be a valid pointer returned by `survey_controller_new`.
/// - Returns a newly allocated JSON outcome string that must be freed with
///   `survey_free_string`.
/// - Returns NULL on error; call `survey_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn survey_on_retreat(handle: *mut SurveyControllerHandle) -> *mut c_char {
    clear_last_error();

    if handle.is_null() {
        set_last_error("Null controller pointer");
        return ptr::null_mut();
    }

    let handle = &mut *handle;
    let outcome = handle.controller.on_retreat_requested();
    json_to_cstr(&outcome)
}

/// Fire a due auto-advance, if one is pending.
///
/// # Safety
/// - `handle` must be a valid pointer returned by `survey_controller_new`.
/// - Returns a newly allocated JSON string that must be freed with
///   `survey_free_string`: an outcome object when a deadline fired, the
///   JSON literal `null` otherwise.
/// - Returns NULL on error; call `survey_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn survey_tick(handle: *mut SurveyControllerHandle) -> *mut c_char {
    clear_last_error();

    if handle.is_null() {
        set_last_error("Null controller pointer");
        return ptr::null_mut();
    }

    let handle = &mut *handle;
    let outcome = handle.controller.tick();
    json_to_cstr(&outcome)
}

/// Get the current renderable state of the trial.
///
/// # Safety
/// - `handle` must be a valid pointer returned by `survey_controller_new`.
/// - Returns a newly allocated JSON string that must be freed with
///   `survey_free_string`.
/// - Returns NULL on error; call `survey_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn survey_view_state(handle: *mut SurveyControllerHandle) -> *mut c_char {
    clear_last_error();

    if handle.is_null() {
        set_last_error("Null controller pointer");
        return ptr::null_mut();
    }

    let handle = &*handle;
    let view = handle.controller.view_state();
    json_to_cstr(&view)
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by survey functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a survey function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn survey_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next survey function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn survey_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the survey library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn survey_version() -> *const c_char {
    // Use a static CString to avoid allocation
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
