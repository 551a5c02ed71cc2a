//! JSON artifact adapter: Implementation of ArtifactSource.
//!
//! Reads the three artifacts exported by the training pipeline from one
//! directory:
//!
//! - `scaler.json`: fitted scaler parameters
//! - `model.json`: fitted classifier parameters
//! - `features.json`: ordered feature names
//!
//! An optional `checksums.json` binds the three files by SHA-256. When it is
//! present every artifact must match; `require_digests(true)` makes it
//! mandatory.

mod checksums;
mod classifier;
mod scaler;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::domain::FeatureManifest;
use crate::ports::{ArtifactBundle, ArtifactError, ArtifactSource};

pub use checksums::{sha256_hex, ArtifactChecksums};
pub use classifier::{ClassifierModel, DecisionTree, TreeNode};
pub use scaler::ScalerModel;

pub const SCALER_FILE: &str = "scaler.json";
pub const MODEL_FILE: &str = "model.json";
pub const FEATURES_FILE: &str = "features.json";
pub const CHECKSUMS_FILE: &str = "checksums.json";

/// The artifact files a bundle is built from.
pub const ARTIFACT_FILES: [&str; 3] = [SCALER_FILE, MODEL_FILE, FEATURES_FILE];

/// Artifact directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonArtifactStore {
    dir: PathBuf,
    require_digests: bool,
}

impl JsonArtifactStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            require_digests: false,
        }
    }

    /// Refuse to load artifacts that are not bound by `checksums.json`.
    #[must_use]
    pub fn require_digests(mut self, require: bool) -> Self {
        self.require_digests = require;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, ArtifactError> {
        let path = self.dir.join(name);
        std::fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ArtifactError::Missing {
                    name: name.to_string(),
                    path,
                }
            } else {
                ArtifactError::Io {
                    name: name.to_string(),
                    source,
                }
            }
        })
    }

    fn parse<T: DeserializeOwned>(name: &str, bytes: &[u8]) -> Result<T, ArtifactError> {
        serde_json::from_slice(bytes).map_err(|e| ArtifactError::Malformed {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    fn load_checksums(&self) -> Result<Option<ArtifactChecksums>, ArtifactError> {
        match self.read(CHECKSUMS_FILE) {
            Ok(bytes) => ArtifactChecksums::from_slice(&bytes).map(Some),
            Err(ArtifactError::Missing { .. }) if !self.require_digests => {
                tracing::debug!("No {CHECKSUMS_FILE} in {:?}; loading unverified", self.dir);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Read an artifact and verify it when checksums are in play.
    fn read_verified(
        &self,
        name: &str,
        checksums: Option<&ArtifactChecksums>,
    ) -> Result<Vec<u8>, ArtifactError> {
        let bytes = self.read(name)?;
        if let Some(checksums) = checksums {
            checksums.verify(name, &bytes)?;
        }
        Ok(bytes)
    }
}

impl ArtifactSource for JsonArtifactStore {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn load(&self) -> Result<ArtifactBundle, ArtifactError> {
        let checksums = self.load_checksums()?;

        let scaler: ScalerModel =
            Self::parse(SCALER_FILE, &self.read_verified(SCALER_FILE, checksums.as_ref())?)?;
        scaler.validate()?;

        let classifier: ClassifierModel =
            Self::parse(MODEL_FILE, &self.read_verified(MODEL_FILE, checksums.as_ref())?)?;
        classifier.validate()?;

        let manifest: FeatureManifest = Self::parse(
            FEATURES_FILE,
            &self.read_verified(FEATURES_FILE, checksums.as_ref())?,
        )?;

        let bundle = ArtifactBundle {
            scaler: Box::new(scaler),
            classifier: Box::new(classifier),
            manifest,
        };
        bundle.check_shapes()?;

        tracing::info!(
            "Loaded artifacts from {:?} (n_features={}, verified={})",
            self.dir,
            bundle.manifest.len(),
            checksums.is_some()
        );

        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_artifacts(dir: &Path, features: &[&str]) {
        let n = features.len();
        let scaler = ScalerModel::Standard {
            mean: vec![0.0; n],
            scale: vec![1.0; n],
        };
        let model = ClassifierModel::LogisticRegression {
            coefficients: vec![0.1; n],
            intercept: -1.0,
        };
        std::fs::write(
            dir.join(SCALER_FILE),
            serde_json::to_vec(&scaler).expect("Should serialize"),
        )
        .expect("Should write scaler");
        std::fs::write(
            dir.join(MODEL_FILE),
            serde_json::to_vec(&model).expect("Should serialize"),
        )
        .expect("Should write model");
        std::fs::write(
            dir.join(FEATURES_FILE),
            serde_json::to_vec(features).expect("Should serialize"),
        )
        .expect("Should write features");
    }

    fn write_checksums(dir: &Path) {
        let checksums = ArtifactChecksums::compute(dir, &ARTIFACT_FILES).expect("Should hash");
        std::fs::write(
            dir.join(CHECKSUMS_FILE),
            serde_json::to_vec_pretty(&checksums).expect("Should serialize"),
        )
        .expect("Should write checksums");
    }

    #[test]
    fn test_load_unverified_bundle() {
        let dir = tempdir().expect("Should create temp dir");
        write_artifacts(dir.path(), &["Age", "Glucose"]);

        let bundle = JsonArtifactStore::new(dir.path()).load().expect("Should load");
        assert_eq!(bundle.manifest.names(), ["Age".to_string(), "Glucose".to_string()]);
        assert_eq!(bundle.scaler.n_features(), 2);
    }

    #[test]
    fn test_missing_artifact_is_reported_by_name() {
        let dir = tempdir().expect("Should create temp dir");
        write_artifacts(dir.path(), &["Age"]);
        std::fs::remove_file(dir.path().join(MODEL_FILE)).expect("Should remove");

        match JsonArtifactStore::new(dir.path()).load() {
            Err(ArtifactError::Missing { name, .. }) => assert_eq!(name, MODEL_FILE),
            other => panic!("Expected missing model, got {other:?}"),
        }
    }

    #[test]
    fn test_shape_disagreement_is_rejected() {
        let dir = tempdir().expect("Should create temp dir");
        write_artifacts(dir.path(), &["Age", "Glucose"]);
        std::fs::write(dir.path().join(FEATURES_FILE), br#"["Age"]"#).expect("Should write");

        assert!(matches!(
            JsonArtifactStore::new(dir.path()).load(),
            Err(ArtifactError::Shape(_))
        ));
    }

    #[test]
    fn test_checksums_are_enforced_when_present() {
        let dir = tempdir().expect("Should create temp dir");
        write_artifacts(dir.path(), &["Age"]);
        write_checksums(dir.path());

        JsonArtifactStore::new(dir.path())
            .require_digests(true)
            .load()
            .expect("Bound artifacts should load");

        std::fs::write(dir.path().join(FEATURES_FILE), br#"["Glucose"]"#).expect("Should write");
        match JsonArtifactStore::new(dir.path()).load() {
            Err(ArtifactError::DigestMismatch { name }) => assert_eq!(name, FEATURES_FILE),
            other => panic!("Expected digest mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_require_digests_without_checksums_fails() {
        let dir = tempdir().expect("Should create temp dir");
        write_artifacts(dir.path(), &["Age"]);

        match JsonArtifactStore::new(dir.path()).require_digests(true).load() {
            Err(ArtifactError::Missing { name, .. }) => assert_eq!(name, CHECKSUMS_FILE),
            other => panic!("Expected missing checksums, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_names_the_file() {
        let dir = tempdir().expect("Should create temp dir");
        write_artifacts(dir.path(), &["Age"]);
        std::fs::write(dir.path().join(SCALER_FILE), b"{not json").expect("Should write");

        match JsonArtifactStore::new(dir.path()).load() {
            Err(ArtifactError::Malformed { name, .. }) => assert_eq!(name, SCALER_FILE),
            other => panic!("Expected malformed scaler, got {other:?}"),
        }
    }

    #[test]
    fn test_bundled_models_directory_loads() {
        let bundle = JsonArtifactStore::new("models")
            .require_digests(true)
            .load()
            .expect("Bundled artifacts should load");
        assert_eq!(bundle.manifest.len(), 12);
    }
}
