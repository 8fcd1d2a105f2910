use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::api::fragments;

pub type Result<T, E = CramlyError> = std::result::Result<T, E>;

/// Crate-wide error type.
///
/// The first five variants are the failure modes a request can hit on its way
/// through the AI pipeline; `Render` covers template failures and should not
/// occur with well-formed builder inputs.
#[derive(Debug, Error)]
pub enum CramlyError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error communicating with AI service: {0}")]
    Network(String),

    #[error("AI service returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("malformed AI response: {0}")]
    MalformedResponse(String),

    #[error("invalid quiz format: {0}")]
    InvalidQuizFormat(String),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

impl CramlyError {
    /// Short machine-readable tag, used for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Upstream { .. } => "upstream",
            Self::MalformedResponse(_) => "malformed_response",
            Self::InvalidQuizFormat(_) => "invalid_quiz_format",
            Self::Render(_) => "render",
        }
    }
}

/// Every failure surfaces to the client the same way: a 500 with an HTML
/// error fragment carrying the error's message. The typed distinction is
/// preserved internally and logged before collapsing.
impl IntoResponse for CramlyError {
    fn into_response(self) -> Response {
        tracing::warn!(kind = self.kind(), error = %self, "request failed");
        let fragment = fragments::error_card(&self.to_string());
        (StatusCode::INTERNAL_SERVER_ERROR, Html(fragment)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_detail() {
        let err = CramlyError::Upstream {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(err.kind(), "upstream");
    }

    #[test]
    fn config_error_display() {
        let err = CramlyError::Config("LLM_API_KEY is not set".to_string());
        assert!(err.to_string().contains("LLM_API_KEY"));
        assert_eq!(err.kind(), "config");
    }
}
