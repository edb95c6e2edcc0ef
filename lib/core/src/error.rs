//! Shared `Result` alias for voxgpt.
//!
//! Error types live next to the code that raises them (`LlmError` in
//! `voxgpt-ai`, `LocaleError` in `voxgpt-locale`, and so on). Fallible
//! operations at crate boundaries return a rootcause [`Report`] carrying
//! that typed context, and callers wrap it in their own context with
//! `.context()` when it crosses into the next layer.

use rootcause::Report;

/// Result whose error is a rootcause report with context type `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
