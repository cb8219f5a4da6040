use reqwest::StatusCode;
use thiserror::Error;

/// Configuration problems caught by `Config::validate`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Why a subscribe or contact submission was not forwarded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Email is required")]
    MissingEmail,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("This email is already subscribed")]
    AlreadySubscribed,

    #[error("Provider rejected the request ({status}): {detail}")]
    Provider { status: u16, detail: String },
}

/// Non-success HTTP response from an upstream API.
#[derive(Debug, Error)]
#[error("{service} error ({status}): {body}")]
pub struct ApiError {
    pub service: &'static str,
    pub status: StatusCode,
    pub body: String,
}

impl ApiError {
    /// Server errors and rate limiting can succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        self.status.is_server_error() || self.status == StatusCode::TOO_MANY_REQUESTS
    }
}
