//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the externally trained model artifacts.

mod artifacts;

pub use artifacts::{ArtifactBundle, ArtifactError, ArtifactSource, Classifier, Scaler};
