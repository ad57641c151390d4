use crate::{
    error::Error,
    report::{allure::Attachment, ResultsStore},
    util, ApiResponse, ApiSession, Configuration,
};
use tracing::warn;

pub const LAST_RESPONSE_ATTACHMENT: &str = "last_response.txt";
pub const RESPONSE_META_ATTACHMENT: &str = "response_meta.txt";
pub const ATTACH_ERROR_ATTACHMENT: &str = "allure_attach_error.txt";
pub const TRUNCATION_MARKER: &str = "\n... [truncated]";

/// Attaches the session's last response to the report.
///
/// Does nothing when the session hasn't answered a request yet. Failures are
/// turned into an error attachment and never reach the caller.
pub fn attach_last_response(
    session: &ApiSession,
    store: &ResultsStore,
    configuration: &Configuration,
) -> Vec<Attachment> {
    let response = match session.last_response() {
        Some(response) => response,
        None => return Vec::new(),
    };

    let mut attachments = Vec::new();
    if let Err(error) = attach_response(response, store, configuration, &mut attachments) {
        warn!(%error, "couldn't attach the last response");

        match store.attach_text(ATTACH_ERROR_ATTACHMENT, &error.to_string()) {
            Ok(attachment) => attachments.push(attachment),
            Err(error) => warn!(%error, "couldn't attach the attachment error either"),
        }
    }

    attachments
}

fn attach_response(
    response: &ApiResponse,
    store: &ResultsStore,
    configuration: &Configuration,
    attachments: &mut Vec<Attachment>,
) -> Result<(), Error> {
    let last_response = render_last_response(response, configuration.max_body_capture());
    attachments.push(store.attach_text(LAST_RESPONSE_ATTACHMENT, &last_response)?);

    let meta = render_meta(response, configuration)?;
    attachments.push(store.attach_text(RESPONSE_META_ATTACHMENT, &meta)?);

    Ok(())
}

pub fn render_last_response(response: &ApiResponse, max_body_chars: usize) -> String {
    let body = util::truncate_chars(response.text(), max_body_chars, TRUNCATION_MARKER);

    format!("{}\n{}", response.request_line(), body)
}

pub fn render_meta(response: &ApiResponse, configuration: &Configuration) -> Result<String, Error> {
    let headers = util::headers_to_json(response.headers(), configuration.redacted_headers())?;

    Ok(format!(
        "Status: {}\nHeaders: {}",
        response.status_code(),
        serde_json::to_string(&headers)?
    ))
}
