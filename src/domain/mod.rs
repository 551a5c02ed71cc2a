//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O.
//! Feature engineering and result formatting live here so they can be
//! tested without model artifacts.

mod features;
mod patient;
mod prediction;
mod row;

pub use features::{
    engineer_features, DerivedFeatures, AGE_SQUARED, BMI_AGE, GLUCOSE_INSULIN, GLUCOSE_PER_BMI,
};
pub use patient::{PatientMeasurements, MEASUREMENT_COLUMNS};
pub use prediction::{
    scaled_confidence, DiabetesLabel, Prediction, PredictionFailure, PredictionOutcome,
    CONFIDENCE_SCALE,
};
pub use row::{FeatureManifest, FeatureRow, MissingFeatures};
