use thiserror::Error;

use super::common::ApiErrorDetails;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error (HTTP {status}): {message}")]
    ApiError {
        status: u16,
        message: String,
        #[source]
        details: Option<Box<ApiErrorDetails>>,
    },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Authentication failed (HTTP {status}): {message}")]
    AuthError { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status of the failed call, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ApiError { status, .. } | ApiError::AuthError { status, .. } => {
                Some(*status)
            }
            ApiError::RequestError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Raw response body returned with the error
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::ApiError { message, .. } | ApiError::AuthError { message, .. }
                if !message.is_empty() =>
            {
                Some(message)
            }
            _ => None,
        }
    }

    pub fn field_errors(&self) -> Option<&std::collections::BTreeMap<String, Vec<String>>> {
        match self {
            ApiError::ApiError {
                details: Some(details),
                ..
            } => details.field_errors.as_ref(),
            _ => None,
        }
    }
}
