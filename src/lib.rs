//! # Riskscope
//!
//! Terminal dashboard estimating diabetes risk from a pre-trained model.
//!
//! This crate provides:
//! - Feature engineering over patient measurements
//! - A prediction pipeline over externally trained scaler/classifier artifacts
//! - Terminal UI with a home dashboard and a diabetes entry form
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (measurements, feature rows, predictions)
//! - `ports`: Trait definitions for the model artifacts
//! - `adapters`: Concrete implementations (JSON artifacts, log sanitizing)
//! - `application`: Prediction service and session state
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{DiabetesLabel, FeatureRow, PatientMeasurements, Prediction, PredictionOutcome};

/// Result type for Riskscope operations
pub type Result<T> = std::result::Result<T, RiskscopeError>;

/// Main error type for Riskscope
#[derive(Debug, thiserror::Error)]
pub enum RiskscopeError {
    #[error("Model artifact error: {0}")]
    Artifact(#[from] ports::ArtifactError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
