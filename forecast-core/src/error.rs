//! Failure taxonomy for forecast requests.
//!
//! Every failure path ends in a [`ClassifiedError`] whose message can be shown
//! to the user verbatim.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

const INVALID_REQUEST: &str = "Invalid request. Please check your input.";
const UNAUTHORIZED: &str = "Unauthorized to access weather provider.";
const RATE_LIMITED: &str = "Too many requests. Please wait before retrying.";
const SERVICE_UNAVAILABLE: &str = "Weather service is temporarily unavailable. Please try again later.";
const SERVER_ERROR: &str = "An unexpected server error occurred. Please try again later.";
const TIMEOUT: &str = "Request timeout. Please try again.";
const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";
pub(crate) const UNSUCCESSFUL: &str = "Failed to fetch weather data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCategory {
    InvalidRequest,
    Unauthorized,
    NotFound,
    RateLimited,
    ServiceUnavailable,
    ServerError,
    Timeout,
    NetworkError,
    MalformedResponse,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::InvalidRequest => "invalid_request",
            ErrorCategory::Unauthorized => "unauthorized",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::RateLimited => "rate_limited",
            ErrorCategory::ServiceUnavailable => "service_unavailable",
            ErrorCategory::ServerError => "server_error",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::NetworkError => "network_error",
            ErrorCategory::MalformedResponse => "malformed_response",
        }
    }

    pub const fn all() -> &'static [ErrorCategory] {
        &[
            ErrorCategory::InvalidRequest,
            ErrorCategory::Unauthorized,
            ErrorCategory::NotFound,
            ErrorCategory::RateLimited,
            ErrorCategory::ServiceUnavailable,
            ErrorCategory::ServerError,
            ErrorCategory::Timeout,
            ErrorCategory::NetworkError,
            ErrorCategory::MalformedResponse,
        ]
    }

    fn for_status(status: u16) -> Self {
        match status {
            400 => ErrorCategory::InvalidRequest,
            401 => ErrorCategory::Unauthorized,
            404 => ErrorCategory::NotFound,
            429 => ErrorCategory::RateLimited,
            500 | 502 | 503 | 504 => ErrorCategory::ServiceUnavailable,
            _ => ErrorCategory::ServerError,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure as observed by the client, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The server answered with a non-success status.
    Http { status: u16, server_message: Option<String> },
    /// The fixed request timeout elapsed.
    Timeout,
    /// No response was received (DNS, refused connection, reset, ...).
    Network { detail: String },
    /// A 2xx body that could not be turned into forecast entries.
    Malformed { detail: String },
    /// A 2xx envelope that reported `success: false`.
    Unsuccessful { server_message: Option<String> },
    /// The request was rejected before being sent.
    Invalid { detail: String },
}

/// A failure mapped onto the closed taxonomy, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedError {
    pub category: ErrorCategory,
    pub message: String,
    pub http_status: Option<u16>,
}

impl ClassifiedError {
    fn new(category: ErrorCategory, message: String, http_status: Option<u16>) -> Self {
        Self { category, message, http_status }
    }
}

/// Map a raw failure to its category and user-facing message.
///
/// A non-blank server message wins over the fallback text. `city` is only used
/// in the `NotFound` fallback.
pub fn classify(failure: &Failure, city: &str) -> ClassifiedError {
    match failure {
        Failure::Http { status, server_message } => {
            let category = ErrorCategory::for_status(*status);
            let message = non_blank(server_message.as_deref())
                .map(str::to_owned)
                .unwrap_or_else(|| fallback_message(category, city));
            ClassifiedError::new(category, message, Some(*status))
        }
        Failure::Timeout => ClassifiedError::new(ErrorCategory::Timeout, TIMEOUT.to_string(), None),
        Failure::Network { .. } => {
            ClassifiedError::new(ErrorCategory::NetworkError, NETWORK_ERROR.to_string(), None)
        }
        Failure::Malformed { .. } => ClassifiedError::new(
            ErrorCategory::MalformedResponse,
            fallback_message(ErrorCategory::MalformedResponse, city),
            None,
        ),
        Failure::Unsuccessful { server_message } => {
            let message = non_blank(server_message.as_deref()).unwrap_or(UNSUCCESSFUL);
            ClassifiedError::new(ErrorCategory::ServerError, message.to_string(), None)
        }
        Failure::Invalid { .. } => {
            ClassifiedError::new(ErrorCategory::InvalidRequest, INVALID_REQUEST.to_string(), None)
        }
    }
}

fn fallback_message(category: ErrorCategory, city: &str) -> String {
    match category {
        ErrorCategory::InvalidRequest => INVALID_REQUEST.to_string(),
        ErrorCategory::Unauthorized => UNAUTHORIZED.to_string(),
        ErrorCategory::NotFound => format!("No forecast found for {city}."),
        ErrorCategory::RateLimited => RATE_LIMITED.to_string(),
        ErrorCategory::ServiceUnavailable => SERVICE_UNAVAILABLE.to_string(),
        // Malformed bodies are shown like any other server fault.
        ErrorCategory::ServerError | ErrorCategory::MalformedResponse => SERVER_ERROR.to_string(),
        ErrorCategory::Timeout => TIMEOUT.to_string(),
        ErrorCategory::NetworkError => NETWORK_ERROR.to_string(),
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
