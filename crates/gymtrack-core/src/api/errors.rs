//! Typed errors for API calls and authentication.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Categories of API errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Transport failure: DNS, connection refused, timeout.
    Network,
    /// HTTP 401 on any call.
    Unauthorized,
    /// Any other non-2xx status.
    Status(u16),
    /// 2xx response whose body could not be decoded.
    Parse,
    /// Rejected locally before any request was sent.
    InvalidInput,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::Unauthorized => write!(f, "unauthorized"),
            ApiErrorKind::Status(code) => write!(f, "http_{code}"),
            ApiErrorKind::Parse => write!(f, "parse"),
            ApiErrorKind::InvalidInput => write!(f, "invalid_input"),
        }
    }
}

/// Structured error from the remote API.
///
/// `message` is always suitable for display in a notification.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    /// Raw body or transport error text, for logs only.
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Transport failure. The reqwest error text goes to `details`.
    pub fn network(err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "The server took too long to respond. Try again later."
        } else {
            "Could not reach the server. Check your connection and try again."
        };
        Self {
            kind: ApiErrorKind::Network,
            message: message.to_string(),
            details: Some(err.to_string()),
        }
    }

    /// Non-2xx response. Uses the server's `message` field when present,
    /// `fallback` otherwise.
    pub fn from_status(status: u16, body: &str, fallback: &str) -> Self {
        let kind = if status == 401 {
            ApiErrorKind::Unauthorized
        } else {
            ApiErrorKind::Status(status)
        };
        let message = server_message(body).unwrap_or_else(|| fallback.to_string());
        Self {
            kind,
            message,
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    /// Local failure (bad file, bad URL). Nothing reached the server.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidInput, message)
    }

    pub fn parse(fallback: &str, err: &serde_json::Error) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: fallback.to_string(),
            details: Some(err.to_string()),
        }
    }

    /// True when the response means the bearer token is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

/// Extracts `{"message": "..."}` from an error body.
fn server_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let message = json.get("message")?.as_str()?.trim();
    (!message.is_empty()).then(|| message.to_string())
}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Why a sign-in attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    InvalidCredentials,
    NetworkUnreachable,
    Server,
}

/// Failed authentication attempt, carrying a displayable cause.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
}

impl AuthError {
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";
    pub const SERVER: &str = "Could not sign in. Try again later.";

    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::new(AuthErrorKind::InvalidCredentials, Self::INVALID_CREDENTIALS)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Server, message)
    }
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        let kind = match err.kind {
            ApiErrorKind::Network => AuthErrorKind::NetworkUnreachable,
            ApiErrorKind::Unauthorized | ApiErrorKind::Status(400) => {
                AuthErrorKind::InvalidCredentials
            }
            ApiErrorKind::Status(_) | ApiErrorKind::Parse | ApiErrorKind::InvalidInput => {
                AuthErrorKind::Server
            }
        };
        Self {
            kind,
            message: err.message,
        }
    }
}
