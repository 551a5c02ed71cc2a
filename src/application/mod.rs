//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the prediction use case and the session it feeds.

mod predictor;
mod session;

pub use predictor::{ArtifactPolicy, PredictionService};
pub use session::SessionState;
