//! Prediction service: Orchestrates the artifact-backed prediction pipeline.
//!
//! This service coordinates:
//! - Artifact loading (once, or on every call)
//! - Column projection onto the feature manifest
//! - Scaling
//! - Classification
//! - Result formatting

use std::str::FromStr;

use crate::domain::{
    engineer_features, FeatureRow, PatientMeasurements, Prediction, PredictionOutcome,
};
use crate::ports::{ArtifactBundle, ArtifactError, ArtifactSource};
use crate::RiskscopeError;

/// When the service reads artifacts from their source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactPolicy {
    /// Load once at construction and reuse for every prediction.
    #[default]
    Preloaded,
    /// Load all three artifacts afresh for every prediction.
    ReloadPerCall,
}

impl FromStr for ArtifactPolicy {
    type Err = RiskscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preloaded" | "once" => Ok(Self::Preloaded),
            "reload_per_call" | "per_call" | "fresh" => Ok(Self::ReloadPerCall),
            other => Err(RiskscopeError::Validation(format!(
                "Unknown artifact policy '{other}' (expected 'preloaded' or 'reload_per_call')"
            ))),
        }
    }
}

/// Service for running diabetes predictions.
pub struct PredictionService<A: ArtifactSource> {
    source: A,
    policy: ArtifactPolicy,
    preloaded: Option<ArtifactBundle>,
}

impl<A: ArtifactSource> PredictionService<A> {
    /// Create a new prediction service.
    ///
    /// With [`ArtifactPolicy::Preloaded`] the artifacts are loaded here, so a
    /// broken artifact directory is reported before any prediction is attempted.
    ///
    /// # Errors
    /// Returns error if preloading fails.
    pub fn new(source: A, policy: ArtifactPolicy) -> Result<Self, RiskscopeError> {
        let preloaded = match policy {
            ArtifactPolicy::Preloaded => {
                tracing::info!("Preloading artifacts from {}", source.describe());
                Some(source.load()?)
            }
            ArtifactPolicy::ReloadPerCall => {
                tracing::info!(
                    "Artifacts from {} will be reloaded for every prediction",
                    source.describe()
                );
                None
            }
        };

        Ok(Self {
            source,
            policy,
            preloaded,
        })
    }

    #[must_use]
    pub fn policy(&self) -> ArtifactPolicy {
        self.policy
    }

    #[must_use]
    pub fn source(&self) -> &A {
        &self.source
    }

    /// Engineer features from raw measurements, then predict.
    ///
    /// # Errors
    /// See [`Self::predict`].
    pub fn predict_measurements(
        &self,
        measurements: &PatientMeasurements,
    ) -> Result<PredictionOutcome, RiskscopeError> {
        self.predict(&engineer_features(measurements))
    }

    /// Run the prediction pipeline on one derived record.
    ///
    /// Missing manifest columns are a recoverable
    /// [`PredictionOutcome::Failure`]; everything else that goes wrong
    /// (loading, scaling, classifying) is an `Err`.
    ///
    /// # Errors
    /// Returns `RiskscopeError::Artifact` if an artifact cannot be loaded or invoked.
    pub fn predict(&self, row: &FeatureRow) -> Result<PredictionOutcome, RiskscopeError> {
        let fresh;
        let bundle = match &self.preloaded {
            Some(bundle) => bundle,
            None => {
                tracing::debug!("Step 1: Loading artifacts...");
                fresh = self.source.load()?;
                &fresh
            }
        };

        let outcome = run_pipeline(bundle, row)?;

        match &outcome {
            PredictionOutcome::Success(prediction) => tracing::info!(
                "Prediction complete: label={}, confidence={}",
                prediction.label,
                prediction.confidence
            ),
            PredictionOutcome::Failure(failure) => {
                tracing::warn!("Prediction not possible: {failure}")
            }
        }

        Ok(outcome)
    }
}

fn run_pipeline(
    bundle: &ArtifactBundle,
    row: &FeatureRow,
) -> Result<PredictionOutcome, ArtifactError> {
    tracing::debug!("Step 2: Projecting onto {} manifest columns...", bundle.manifest.len());
    let projected = match row.project(&bundle.manifest) {
        Ok(projected) => projected,
        Err(missing) => return Ok(PredictionOutcome::Failure(missing.into())),
    };

    tracing::debug!("Step 3: Scaling...");
    let scaled = bundle.scaler.transform(&projected.values())?;

    tracing::debug!("Step 4: Classifying...");
    let class_index = bundle.classifier.predict(&scaled)?;
    let proba = bundle.classifier.predict_proba(&scaled)?;
    let class_probability = proba.get(class_index).copied().ok_or_else(|| {
        ArtifactError::Inference(format!(
            "predicted class {class_index} has no probability ({} classes)",
            proba.len()
        ))
    })?;

    tracing::debug!("Step 5: Formatting result...");
    Ok(PredictionOutcome::Success(Prediction::new(
        class_index,
        class_probability,
        projected,
    )))
}
