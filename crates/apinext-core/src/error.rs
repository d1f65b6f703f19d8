//! Error types for the gateway services.

use thiserror::Error;

/// User-facing message when model metadata cannot be produced.
pub const MODEL_INFO_ERROR: &str = "Error getting model info";

/// Package-wide API error.
///
/// Carries the HTTP status to report, a message safe to show callers, and a
/// message meant for logs only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{http_status} {user_msg} [{log_msg}]")]
pub struct ApiError {
    pub http_status: u16,
    pub user_msg: String,
    pub log_msg: String,
}

impl ApiError {
    pub fn new(http_status: u16, user_msg: impl Into<String>, log_msg: impl Into<String>) -> Self {
        Self {
            http_status,
            user_msg: user_msg.into(),
            log_msg: log_msg.into(),
        }
    }

    /// 400 with the given user message.
    pub fn bad_request(user_msg: impl Into<String>, log_msg: impl Into<String>) -> Self {
        Self::new(400, user_msg, log_msg)
    }

    /// 500 with a generic user message.
    pub fn internal(log_msg: impl Into<String>) -> Self {
        Self::new(500, "Sorry, an error occurred.", log_msg)
    }
}

/// Errors while producing the model listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelsError {
    /// A config key without the `:operation` suffix.
    #[error("Model key '{0}' has no operation part")]
    MalformedKey(String),

    /// The upstream model source could not be read.
    #[error("Model source unavailable: {0}")]
    SourceUnavailable(String),
}

impl From<ModelsError> for ApiError {
    fn from(err: ModelsError) -> Self {
        let status = match err {
            ModelsError::MalformedKey(_) => 500,
            ModelsError::SourceUnavailable(_) => 502,
        };
        Self::new(status, MODEL_INFO_ERROR, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::new(500, "boom, error occurred.", "you broke it!");
        assert_eq!(err.to_string(), "500 boom, error occurred. [you broke it!]");
    }

    #[test]
    fn test_models_error_conversion() {
        let err: ApiError = ModelsError::SourceUnavailable("connection refused".to_string()).into();
        assert_eq!(err.http_status, 502);
        assert_eq!(err.user_msg, MODEL_INFO_ERROR);
        assert_eq!(err.log_msg, "Model source unavailable: connection refused");

        let err: ApiError = ModelsError::MalformedKey("default".to_string()).into();
        assert_eq!(err.http_status, 500);
    }
}
