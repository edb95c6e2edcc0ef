//! Error types for the AI crate.
//!
//! `LlmError` is returned directly by [`LlmBackend`](crate::LlmBackend)
//! implementations so callers can decide how to present each failure. Higher
//! layers wrap it in their own rootcause context.

use std::fmt;

/// Errors from LLM backend operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// The provider needs an API key and none is configured.
    MissingCredential { provider: String },
    /// Provider could not be reached.
    ProviderUnavailable { provider: String, reason: String },
    /// Request failed in transport.
    RequestFailed { reason: String },
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// Response parsing failed.
    ResponseParseFailed { reason: String },
    /// Timeout waiting for response.
    Timeout,
    /// Rate limit exceeded.
    RateLimited { retry_after_secs: Option<u64> },
    /// Invalid configuration.
    InvalidConfig { reason: String },
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential { provider } => {
                write!(f, "no API key configured for LLM provider '{provider}'")
            }
            Self::ProviderUnavailable { provider, reason } => {
                write!(f, "LLM provider '{provider}' unavailable: {reason}")
            }
            Self::RequestFailed { reason } => {
                write!(f, "LLM request failed: {reason}")
            }
            Self::Api { status, message } => {
                write!(f, "LLM API returned HTTP {status}: {message}")
            }
            Self::ResponseParseFailed { reason } => {
                write!(f, "failed to parse LLM response: {reason}")
            }
            Self::Timeout => write!(f, "LLM request timed out"),
            Self::RateLimited { retry_after_secs } => {
                if let Some(secs) = retry_after_secs {
                    write!(f, "rate limited, retry after {secs}s")
                } else {
                    write!(f, "rate limited")
                }
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid LLM configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for LlmError {}

/// Coarse grouping of [`LlmError`] for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Credentials or configuration are wrong; retrying will not help.
    Configuration,
    /// The call ran out of time.
    Timeout,
    /// The provider failed or answered with something unusable.
    Unavailable,
}

impl LlmError {
    /// Returns the category used to pick a user-safe message.
    #[must_use]
    pub fn category(&self) -> FailureCategory {
        match self {
            Self::MissingCredential { .. } | Self::InvalidConfig { .. } => {
                FailureCategory::Configuration
            }
            Self::Api { status, .. } if *status == 401 || *status == 403 => {
                FailureCategory::Configuration
            }
            Self::Timeout => FailureCategory::Timeout,
            Self::ProviderUnavailable { .. }
            | Self::RequestFailed { .. }
            | Self::Api { .. }
            | Self::ResponseParseFailed { .. }
            | Self::RateLimited { .. } => FailureCategory::Unavailable,
        }
    }
}
