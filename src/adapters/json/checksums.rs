//! SHA-256 digests binding the artifact files that belong together.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ports::ArtifactError;

use super::CHECKSUMS_FILE;

/// Contents of `checksums.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactChecksums {
    pub version: u32,
    /// File name -> lowercase hex SHA-256
    pub files: BTreeMap<String, String>,
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

impl ArtifactChecksums {
    pub const VERSION: u32 = 1;

    /// Hash the named files inside `dir`.
    ///
    /// # Errors
    /// Returns error if any file cannot be read.
    pub fn compute(dir: &Path, names: &[&str]) -> Result<Self, ArtifactError> {
        let mut files = BTreeMap::new();
        for name in names {
            let path = dir.join(name);
            let bytes = std::fs::read(&path).map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    ArtifactError::Missing {
                        name: name.to_string(),
                        path: path.clone(),
                    }
                } else {
                    ArtifactError::Io {
                        name: name.to_string(),
                        source,
                    }
                }
            })?;
            files.insert(name.to_string(), sha256_hex(&bytes));
        }
        Ok(Self {
            version: Self::VERSION,
            files,
        })
    }

    /// Parse and check the version.
    ///
    /// # Errors
    /// Returns `ArtifactError::Malformed` on bad JSON or an unknown version.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let checksums: Self =
            serde_json::from_slice(bytes).map_err(|e| ArtifactError::Malformed {
                name: CHECKSUMS_FILE.to_string(),
                reason: e.to_string(),
            })?;
        if checksums.version != Self::VERSION {
            return Err(ArtifactError::Malformed {
                name: CHECKSUMS_FILE.to_string(),
                reason: format!("unsupported version {}", checksums.version),
            });
        }
        Ok(checksums)
    }

    /// Check `bytes` against the recorded digest for `name`.
    ///
    /// A file the checksums do not list is rejected: every artifact that is
    /// loaded must be bound.
    ///
    /// # Errors
    /// Returns `Malformed` if `name` is unlisted, `DigestMismatch` if it differs.
    pub fn verify(&self, name: &str, bytes: &[u8]) -> Result<(), ArtifactError> {
        let expected = self.files.get(name).ok_or_else(|| ArtifactError::Malformed {
            name: CHECKSUMS_FILE.to_string(),
            reason: format!("no digest recorded for {name}"),
        })?;

        if !expected.eq_ignore_ascii_case(&sha256_hex(bytes)) {
            return Err(ArtifactError::DigestMismatch {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sha256_hex_known_value() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_compute_then_verify() {
        let dir = tempdir().expect("Should create temp dir");
        std::fs::write(dir.path().join("a.json"), b"[1]").expect("Should write");

        let checksums = ArtifactChecksums::compute(dir.path(), &["a.json"]).expect("Should hash");
        checksums.verify("a.json", b"[1]").expect("Digest should match");

        assert!(matches!(
            checksums.verify("a.json", b"[2]"),
            Err(ArtifactError::DigestMismatch { .. })
        ));
        assert!(matches!(
            checksums.verify("b.json", b"[1]"),
            Err(ArtifactError::Malformed { .. })
        ));
    }

    #[test]
    fn test_compute_reports_missing_file() {
        let dir = tempdir().expect("Should create temp dir");
        assert!(matches!(
            ArtifactChecksums::compute(dir.path(), &["absent.json"]),
            Err(ArtifactError::Missing { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let result = ArtifactChecksums::from_slice(br#"{"version": 2, "files": {}}"#);
        assert!(matches!(result, Err(ArtifactError::Malformed { .. })));
    }
}
