//! HTTP-facing errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rootcause::Report;
use std::fmt;
use voxgpt_skill::SkillError;

/// Errors returned by the skill endpoint.
#[derive(Debug)]
pub enum ServerError {
    /// The request was addressed to another skill.
    Forbidden(String),
    /// Processing failed after the request was accepted.
    Processing(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden(msg) => write!(f, "request rejected: {msg}"),
            Self::Processing(msg) => write!(f, "request processing failed: {msg}"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<Report<SkillError>> for ServerError {
    fn from(report: Report<SkillError>) -> Self {
        match report.current_context() {
            SkillError::SkillIdMismatch { .. } => Self::Forbidden(report.to_string()),
            _ => Self::Processing(report.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Forbidden(msg) => {
                tracing::warn!("Rejected skill request: {}", msg);
                (StatusCode::FORBIDDEN, "Request not addressed to this skill")
            }
            Self::Processing(msg) => {
                tracing::error!("Skill processing failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, message).into_response()
    }
}
