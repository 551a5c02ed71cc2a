//! Artifact port: Traits for the externally trained model artifacts.
//!
//! The application only ever calls these contracts; it never inspects
//! scaler or classifier internals.

use std::path::PathBuf;

use crate::domain::FeatureManifest;

/// Error type for artifact loading and invocation.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact '{name}' not found at {path:?}")]
    Missing { name: String, path: PathBuf },

    #[error("Artifact '{name}' could not be read: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact '{name}' is malformed: {reason}")]
    Malformed { name: String, reason: String },

    #[error("Artifact '{name}' does not match its recorded SHA-256 digest")]
    DigestMismatch { name: String },

    #[error("Artifact shape mismatch: {0}")]
    Shape(String),

    #[error("Model invocation failed: {0}")]
    Inference(String),
}

/// A fitted feature-scaling transform.
pub trait Scaler: Send + Sync {
    /// Number of input columns the scaler was fitted on.
    fn n_features(&self) -> usize;

    /// Scale one row of raw values.
    ///
    /// # Errors
    /// Returns `ArtifactError::Shape` if `row` has the wrong width.
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ArtifactError>;
}

/// A fitted binary classifier.
pub trait Classifier: Send + Sync {
    /// Number of input columns the classifier expects.
    fn n_features(&self) -> usize;

    /// Predicted class index for one scaled row.
    ///
    /// # Errors
    /// Returns error if the row cannot be evaluated.
    fn predict(&self, row: &[f64]) -> Result<usize, ArtifactError>;

    /// Per-class probabilities for one scaled row, indexed by class.
    ///
    /// # Errors
    /// Returns error if the row cannot be evaluated.
    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ArtifactError>;
}

/// The three artifacts a prediction needs, loaded together.
pub struct ArtifactBundle {
    pub scaler: Box<dyn Scaler>,
    pub classifier: Box<dyn Classifier>,
    pub manifest: FeatureManifest,
}

impl ArtifactBundle {
    /// Check that scaler, classifier and manifest agree on feature count.
    ///
    /// # Errors
    /// Returns `ArtifactError::Shape` describing the first disagreement.
    pub fn check_shapes(&self) -> Result<(), ArtifactError> {
        let n = self.manifest.len();
        if self.scaler.n_features() != n {
            return Err(ArtifactError::Shape(format!(
                "scaler expects {} features, manifest lists {n}",
                self.scaler.n_features()
            )));
        }
        if self.classifier.n_features() != n {
            return Err(ArtifactError::Shape(format!(
                "classifier expects {} features, manifest lists {n}",
                self.classifier.n_features()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("n_features", &self.manifest.len())
            .finish_non_exhaustive()
    }
}

/// Somewhere artifacts can be loaded from.
pub trait ArtifactSource: Send + Sync {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    /// Load scaler, classifier and feature manifest.
    ///
    /// # Errors
    /// Returns error if any artifact is missing, unreadable or inconsistent.
    fn load(&self) -> Result<ArtifactBundle, ArtifactError>;
}
