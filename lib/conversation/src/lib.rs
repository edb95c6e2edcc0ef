//! Conversation state for voxgpt.
//!
//! This crate provides:
//!
//! - **Session state**: chat history and last context, stored in the
//!   platform's session attributes between turns
//! - **History window**: how many past turns accompany a new question
//! - **Follow-up classifier**: detects questions that refer to the previous answer

pub mod context;
pub mod error;
pub mod followup;
pub mod message;
pub mod session;

pub use context::HistoryWindow;
pub use error::{PatternError, SessionError};
pub use followup::FollowUpClassifier;
pub use message::{LastContext, Turn};
pub use session::SessionState;
