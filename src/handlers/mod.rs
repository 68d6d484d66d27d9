//! Request boundary: bind, validate, call the service, wrap the outcome in the envelope.
//!
//! Extractor rejections are taken as `Result` so that binding failures are
//! reported through the same envelope as every other outcome.

pub mod catalog;
pub mod menu;
pub mod recipe;
