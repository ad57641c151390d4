use crate::error::Error;
use reqwest::{header::HeaderMap, Method, StatusCode, Url};
use serde::de::DeserializeOwned;

/// A request as handed to the transport.
#[derive(Debug, Clone)]
pub struct RequestData {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// Snapshot of a received response together with the request line that
/// produced it. The body is read eagerly so the snapshot can be kept after
/// the connection is released.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    method: Method,
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl ApiResponse {
    pub fn new<S: Into<String>>(
        method: Method,
        url: Url,
        status: StatusCode,
        headers: HeaderMap,
        body: S,
    ) -> Self {
        Self {
            method,
            url,
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as text, `None` when absent or not valid text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(reqwest::header::CONTENT_TYPE.as_str())
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// The request line as it appears in the report.
    pub fn request_line(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}
