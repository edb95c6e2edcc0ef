//! HTTP host for the voxgpt voice skill.

pub mod config;
pub mod error;
pub mod routes;

pub use routes::router;
