use reqwest::header;
use std::{fmt::Display, io};

#[derive(Debug)]
pub enum Error {
    ReqwestError(reqwest::Error),
    Timeout(reqwest::Error),
    IoError(io::Error),
    SerializationError(serde_json::Error),
    InvalidUrl(String),
    InvalidHeaderName,
    InvalidHeaderValue(String),
    SessionInUse,
    NotConfigured,
}

impl Error {
    /// `true` for failures raised by the transport before a response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::ReqwestError(_) | Error::Timeout(_))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ReqwestError(e) | Error::Timeout(e) => Some(e),
            Error::IoError(e) => Some(e),
            Error::SerializationError(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ReqwestError(e) => write!(f, "reqwest error: {}", e),
            Error::Timeout(e) => write!(f, "Request timed out: {}", e),
            Error::IoError(e) => write!(f, "IoError: {}", e),
            Error::SerializationError(e) => write!(f, "Serialization error: {}", e),
            Error::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            Error::InvalidHeaderName => write!(f, "Invalid header name"),
            Error::InvalidHeaderValue(name) => {
                write!(f, "The value of header \"{}\" is not valid text", name)
            }
            Error::SessionInUse => write!(f, "The session is already checked out by a test"),
            Error::NotConfigured => write!(f, "The test run hasn't been configured"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IoError(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout(e)
        } else {
            Error::ReqwestError(e)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e)
    }
}

impl From<header::InvalidHeaderName> for Error {
    fn from(_: header::InvalidHeaderName) -> Self {
        Error::InvalidHeaderName
    }
}
