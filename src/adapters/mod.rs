//! Adapters layer: Concrete implementations of ports.
//!
//! - `json`: artifact store reading scaler, classifier and feature manifest
//! - `sanitize`: measurement redaction for logs

pub mod json;
pub mod sanitize;

pub use json::JsonArtifactStore;
