//! LLM access for voxgpt.
//!
//! This crate provides:
//!
//! - **Backend**: the [`LlmBackend`] trait and its request/response types
//! - **LLM Call**: a message list plus sampling parameters, executed against a backend
//! - **OpenAI**: a chat completion backend for OpenAI and OpenAI-compatible APIs

pub mod backend;
pub mod error;
pub mod llm_call;
pub mod openai;

pub use backend::{
    LlmBackend, LlmBackendConfig, LlmMessage, LlmProvider, LlmRequest, LlmResponse, MessageRole,
    TokenUsage,
};
pub use error::{FailureCategory, LlmError};
pub use llm_call::{LlmCall, LlmCallResult, SamplingParams};
pub use openai::OpenAiChatBackend;
