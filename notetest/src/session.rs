use crate::{
    error::Error,
    http_client::{HttpClient, ReqwestHttpClient},
    ApiResponse, Configuration, RequestData,
};
use reqwest::{Method, Url};
use serde::Serialize;
use std::time::Duration;

/// HTTP session shared by the tests of one run.
///
/// Every response received through the session is kept as the *last response*
/// until the next request overwrites it. The slot is only reachable through
/// `&mut self`, so a session serves one call at a time.
#[derive(Debug)]
pub struct ApiSession {
    client: Box<dyn HttpClient + Send>,
    base_url: String,
    timeout: Duration,
    last_response: Option<ApiResponse>,
}

impl ApiSession {
    pub fn new(configuration: &Configuration) -> Result<Self, Error> {
        let client = ReqwestHttpClient::new(configuration.default_headers())?;

        Ok(Self::with_client(
            Box::new(client),
            configuration.base_url(),
            configuration.request_timeout(),
        ))
    }

    pub fn with_client<S: Into<String>>(
        client: Box<dyn HttpClient + Send>,
        base_url: S,
        timeout: Duration,
    ) -> Self {
        let base_url = base_url.into();

        Self {
            client,
            base_url: String::from(base_url.trim_end_matches('/')),
            timeout,
            last_response: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get<S: Into<String>>(&mut self, path: S) -> Call<'_> {
        self.request(Method::GET, path)
    }

    pub fn post<S: Into<String>>(&mut self, path: S) -> Call<'_> {
        self.request(Method::POST, path)
    }

    pub fn put<S: Into<String>>(&mut self, path: S) -> Call<'_> {
        self.request(Method::PUT, path)
    }

    pub fn delete<S: Into<String>>(&mut self, path: S) -> Call<'_> {
        self.request(Method::DELETE, path)
    }

    pub fn request<S: Into<String>>(&mut self, method: Method, path: S) -> Call<'_> {
        let timeout = self.timeout;

        Call {
            session: self,
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
            timeout,
        }
    }

    pub fn last_response(&self) -> Option<&ApiResponse> {
        self.last_response.as_ref()
    }

    pub fn take_last_response(&mut self) -> Option<ApiResponse> {
        self.last_response.take()
    }

    fn url_for(&self, path: &str) -> Result<Url, Error> {
        let raw = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };

        Url::parse(&raw).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))
    }

    fn send(&mut self, request: RequestData, timeout: Duration) -> Result<ApiResponse, Error> {
        // A failed call leaves the previous response in place.
        let response = self.client.execute(request, timeout)?;
        self.last_response = Some(response.clone());

        Ok(response)
    }
}

/// One pending request on an [`ApiSession`].
#[derive(Debug)]
pub struct Call<'a> {
    session: &'a mut ApiSession,
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Result<Vec<u8>, Error>>,
    timeout: Duration,
}

impl<'a> Call<'a> {
    pub fn header<S1: Into<String>, S2: Into<String>>(mut self, name: S1, value: S2) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Serializes `body` as the JSON request payload.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_vec(body).map_err(Error::from));
        self.header("content-type", "application/json")
    }

    pub fn body<B: Into<Vec<u8>>>(mut self, body: B) -> Self {
        self.body = Some(Ok(body.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn send(self) -> Result<ApiResponse, Error> {
        let url = self.session.url_for(&self.path)?;
        let body = self.body.transpose()?;

        let request = RequestData {
            method: self.method,
            url,
            headers: self.headers,
            body,
        };

        self.session.send(request, self.timeout)
    }
}
