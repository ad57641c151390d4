//! Checks shared by the scenarios. Each one panics with the expected and the
//! actual value on mismatch.

use crate::{util, ApiResponse};
use serde_json::Value;

pub const JSON_MEDIA_TYPE: &str = "application/json";

const BODY_PREVIEW_CHARS: usize = 500;

#[track_caller]
pub fn assert_status(response: &ApiResponse, expected: u16) {
    let actual = response.status_code();
    if actual != expected {
        panic!(
            "unexpected status for {}: expected {}, got {}\nbody: {}",
            response.request_line(),
            expected,
            actual,
            preview(response)
        );
    }
}

/// Passes when the status is any of `allowed`.
#[track_caller]
pub fn assert_status_in(response: &ApiResponse, allowed: &[u16]) {
    let actual = response.status_code();
    if !allowed.contains(&actual) {
        panic!(
            "unexpected status for {}: expected one of {:?}, got {}\nbody: {}",
            response.request_line(),
            allowed,
            actual,
            preview(response)
        );
    }
}

/// Requires a JSON content type on successful responses. Error responses
/// (status >= 400) pass regardless of their format.
#[track_caller]
pub fn assert_json_content_type(response: &ApiResponse) {
    if response.status_code() >= 400 {
        return;
    }

    let content_type = response.content_type().unwrap_or("");
    if !content_type.to_lowercase().contains(JSON_MEDIA_TYPE) {
        panic!(
            "unexpected content type for {}: expected {}, got {:?}",
            response.request_line(),
            JSON_MEDIA_TYPE,
            content_type
        );
    }
}

/// Decodes the body, `None` if it isn't JSON.
pub fn try_json(response: &ApiResponse) -> Option<Value> {
    serde_json::from_str(response.text()).ok()
}

/// Requires a JSON object carrying an `id`. `None` passes.
#[track_caller]
pub fn assert_note_shape(note: Option<&Value>) {
    let note = match note {
        Some(note) => note,
        None => return,
    };

    match note.as_object() {
        Some(object) if object.contains_key("id") => {}
        Some(_) => panic!("expected a note with an \"id\" field, got {}", note),
        None => panic!("expected a note object, got {}", note),
    }
}

fn preview(response: &ApiResponse) -> String {
    util::truncate_chars(response.text(), BODY_PREVIEW_CHARS, "...").into_owned()
}
