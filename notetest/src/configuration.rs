use lazy_static::lazy_static;
use regex::Regex;
use std::{env, path::PathBuf, str::FromStr, time::Duration};
use tracing::warn;

pub const BASE_URL_VAR: &str = "BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "NOTES_REQUEST_TIMEOUT_SECS";
pub const MAX_BODY_CAPTURE_VAR: &str = "NOTES_MAX_BODY_CAPTURE";
pub const RESULTS_DIR_VAR: &str = "ALLURE_RESULTS_DIR";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_BODY_CAPTURE: usize = 20_000;
pub const DEFAULT_RESULTS_DIR: &str = "allure-results";

lazy_static! {
    static ref CREDENTIAL_HEADERS: Regex =
        Regex::new(r"(?i)^(authorization|proxy-authorization|cookie|set-cookie)$").unwrap();
}

/// Settings for one test run. Built once when the run starts and handed to
/// the session, the report store and the report hook.
#[derive(Debug, Clone)]
pub struct Configuration {
    base_url: String,
    request_timeout: Duration,
    max_body_capture: usize,
    results_dir: PathBuf,
    redacted_headers: Vec<Regex>,
    default_headers: Vec<(String, String)>,
}

impl Configuration {
    pub fn new() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_body_capture: DEFAULT_MAX_BODY_CAPTURE,
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            redacted_headers: Vec::new(),
            default_headers: vec![(String::from("Accept"), String::from("application/json"))],
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let mut configuration = Self::new();

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|value| !value.trim().is_empty()) {
            configuration.set_base_url(base_url);
        }
        if let Some(seconds) = parse_var::<u64, _>(&lookup, REQUEST_TIMEOUT_VAR) {
            configuration.set_request_timeout(Duration::from_secs(seconds));
        }
        if let Some(max) = parse_var::<usize, _>(&lookup, MAX_BODY_CAPTURE_VAR) {
            configuration.set_max_body_capture(max);
        }
        if let Some(dir) = lookup(RESULTS_DIR_VAR).filter(|value| !value.is_empty()) {
            configuration.set_results_dir(dir);
        }

        configuration
    }

    pub fn set_base_url<S: Into<String>>(&mut self, base_url: S) {
        let base_url = base_url.into();
        self.base_url = String::from(base_url.trim().trim_end_matches('/'));
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_request_timeout(&mut self, timeout: Duration) {
        self.request_timeout = timeout;
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn set_max_body_capture(&mut self, max_chars: usize) {
        self.max_body_capture = max_chars;
    }

    pub fn max_body_capture(&self) -> usize {
        self.max_body_capture
    }

    pub fn set_results_dir<P: Into<PathBuf>>(&mut self, dir: P) {
        self.results_dir = dir.into();
    }

    pub fn results_dir(&self) -> &PathBuf {
        &self.results_dir
    }

    /// Masks `authorization`, `proxy-authorization`, `cookie` and `set-cookie`
    /// in `response_meta.txt`. Headers are attached as received otherwise.
    pub fn redact_credential_headers(&mut self) {
        self.redacted_headers.push(CREDENTIAL_HEADERS.clone());
    }

    pub fn add_redacted_header(&mut self, pattern: Regex) {
        self.redacted_headers.push(pattern);
    }

    pub fn clear_redacted_headers(&mut self) {
        self.redacted_headers.clear();
    }

    pub fn redacted_headers(&self) -> &[Regex] {
        &self.redacted_headers
    }

    pub fn add_default_header<S1: Into<String>, S2: Into<String>>(&mut self, name: S1, value: S2) {
        self.default_headers.push((name.into(), value.into()));
    }

    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    /// Key/value pairs written to `environment.properties`.
    pub fn environment_properties(&self) -> Vec<(String, String)> {
        vec![
            (String::from(BASE_URL_VAR), self.base_url.clone()),
            (
                String::from("REQUEST_TIMEOUT_SECS"),
                self.request_timeout.as_secs().to_string(),
            ),
        ]
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_var<T: FromStr, F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = key, value = %raw, "ignoring unparseable value, using default");
            None
        }
    }
}
