//! Voice skill request handling for voxgpt.
//!
//! A [`SkillApp`] turns a platform [`RequestEnvelope`] into a
//! [`ResponseEnvelope`]. It loads the request's text table, decodes the
//! session state, runs the first matching [`RequestHandler`] and falls back
//! to the catch-all [`ExceptionHandler`] on any error.
//!
//! Questions are answered by an LLM through [`AnswerGenerator`]; when
//! enabled, [`FollowUpSuggester`] proposes short follow-up questions that
//! are read out after the answer.

pub mod answer;
pub mod app;
pub mod config;
pub mod envelope;
pub mod error;
pub mod format;
pub mod handler;
pub mod handlers;
pub mod response;
pub mod suggest;

#[cfg(test)]
pub(crate) mod testing;

pub use answer::{Answer, AnswerGenerator};
pub use app::{SkillApp, SkillBuilder};
pub use config::SkillConfig;
pub use envelope::{RequestEnvelope, ResponseEnvelope};
pub use error::SkillError;
pub use handler::{ExceptionHandler, HandlerInput, RequestHandler};
pub use response::{Response, ResponseBuilder, Ssml};
pub use suggest::{FollowUpSuggester, FollowUps};
