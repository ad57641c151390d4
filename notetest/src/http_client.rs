use crate::{error::Error, util, ApiResponse, RequestData};
use reqwest::{blocking::Client, header::HeaderMap};
use std::{fmt::Debug, time::Duration};
use tracing::debug;

/// Transport used by [`ApiSession`](crate::ApiSession). Errors are returned as
/// raised by the transport; nothing is retried.
pub trait HttpClient: Debug {
    fn execute(&self, request: RequestData, timeout: Duration) -> Result<ApiResponse, Error>;
}

#[derive(Debug)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Builds a blocking client that sends `default_headers` with every request.
    pub fn new(default_headers: &[(String, String)]) -> Result<Self, Error> {
        let mut header_map = HeaderMap::new();
        util::put_headers(
            &mut header_map,
            default_headers.iter().map(|(name, value)| (name, value)),
        )?;

        let client = Client::builder().default_headers(header_map).build()?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: RequestData, timeout: Duration) -> Result<ApiResponse, Error> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let mut request_builder = self
            .client
            .request(request.method.clone(), request.url)
            .timeout(timeout);

        for (name, value) in &request.headers {
            request_builder = request_builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            request_builder = request_builder.body(body);
        }

        let response = request_builder.send()?;

        let status = response.status();
        let url = response.url().clone();
        let headers = response.headers().clone();
        let body = response.bytes()?;
        let body: String = String::from_utf8_lossy(&body).into();

        debug!(status = status.as_u16(), url = %url, bytes = body.len(), "received response");

        Ok(ApiResponse::new(request.method, url, status, headers, body))
    }
}
