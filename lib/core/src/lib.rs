//! Core types and utilities for voxgpt.
//!
//! This crate provides the error-handling foundation and the small set of
//! value types shared by every other crate in the workspace.

pub mod error;
pub mod language;

pub use error::Result;
pub use language::{DEFAULT_LOCALE, LanguageCode, ParseLanguageError};
