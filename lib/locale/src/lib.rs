//! Localized text for voxgpt.
//!
//! Every spoken string, prompt and follow-up pattern comes from a per-language
//! JSON file. [`LocaleLoader`] picks the file for a request's language and
//! falls back to the default language; [`TextTable`] gives typed access to
//! its entries.

pub mod error;
pub mod loader;
pub mod table;

pub use error::LocaleError;
pub use loader::LocaleLoader;
pub use table::TextTable;
