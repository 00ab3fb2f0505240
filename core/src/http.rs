//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The client builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network; a
//! `Transport` (see `transport.rs`) performs the actual round-trip.
//!
//! Status handling is family based: the HockeyApp endpoints answer "not a
//! member" or "already invited" with a 4xx, which is a normal outcome, while
//! 1xx/3xx/5xx mean something went wrong on the way.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `path` is the absolute URL including any query string.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Class of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFamily {
    Informational,
    Successful,
    Redirection,
    ClientError,
    ServerError,
    Other,
}

impl StatusFamily {
    pub fn of(status: u16) -> Self {
        match status / 100 {
            1 => StatusFamily::Informational,
            2 => StatusFamily::Successful,
            3 => StatusFamily::Redirection,
            4 => StatusFamily::ClientError,
            5 => StatusFamily::ServerError,
            _ => StatusFamily::Other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StatusFamily::Informational => "INFORMATIONAL",
            StatusFamily::Successful => "SUCCESSFUL",
            StatusFamily::Redirection => "REDIRECTION",
            StatusFamily::ClientError => "CLIENT_ERROR",
            StatusFamily::ServerError => "SERVER_ERROR",
            StatusFamily::Other => "OTHER",
        }
    }
}

/// Canonical reason phrase for `status`, or an empty string when unknown.
pub fn reason_phrase(status: u16) -> &'static str {
    ::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("")
}

/// Build the error for a status outside the families an operation handles.
pub(crate) fn unexpected_status(status: u16) -> ApiError {
    let family = StatusFamily::of(status);
    tracing::warn!(status, family = family.name(), "unexpected response status");
    ApiError::UnexpectedStatus {
        status,
        reason: reason_phrase(status).to_string(),
        family: family.name(),
    }
}

/// Classify a response to a boolean operation.
///
/// 2xx is `Ok(true)`, 4xx is `Ok(false)`, every other family is
/// `ApiError::UnexpectedStatus`.
pub fn classify(response: &HttpResponse) -> Result<bool, ApiError> {
    match StatusFamily::of(response.status) {
        StatusFamily::Successful => Ok(true),
        StatusFamily::ClientError => Ok(false),
        StatusFamily::Informational
        | StatusFamily::Redirection
        | StatusFamily::ServerError
        | StatusFamily::Other => Err(unexpected_status(response.status)),
    }
}
