//! Fitted scalers exported as JSON.

use serde::{Deserialize, Serialize};

use crate::ports::{ArtifactError, Scaler};

use super::SCALER_FILE;

fn unit_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// Scaler parameters, tagged by `kind`.
///
/// Matches the fitted attributes of scikit-learn's `StandardScaler`
/// (`mean_`, `scale_`) and `MinMaxScaler` (`data_min_`, `data_range_`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerModel {
    Standard {
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    MinMax {
        data_min: Vec<f64>,
        data_range: Vec<f64>,
        #[serde(default = "unit_range")]
        feature_range: (f64, f64),
    },
}

impl ScalerModel {
    /// Reject parameter sets that would produce non-finite output.
    ///
    /// # Errors
    /// Returns `ArtifactError::Malformed` naming the offending parameter.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let malformed = |reason: String| ArtifactError::Malformed {
            name: SCALER_FILE.to_string(),
            reason,
        };

        let (offsets, divisors, divisor_name) = match self {
            Self::Standard { mean, scale } => (mean, scale, "scale"),
            Self::MinMax {
                data_min,
                data_range,
                feature_range,
            } => {
                if !(feature_range.0 < feature_range.1) {
                    return Err(malformed(format!(
                        "feature_range {feature_range:?} must be increasing"
                    )));
                }
                (data_min, data_range, "data_range")
            }
        };

        if offsets.is_empty() {
            return Err(malformed("no features".into()));
        }
        if offsets.len() != divisors.len() {
            return Err(malformed(format!(
                "parameter lengths differ ({} vs {})",
                offsets.len(),
                divisors.len()
            )));
        }
        if offsets.iter().any(|v| !v.is_finite()) {
            return Err(malformed("non-finite offset".into()));
        }
        if let Some(i) = divisors.iter().position(|d| !d.is_finite() || *d == 0.0) {
            return Err(malformed(format!("{divisor_name}[{i}] must be finite and non-zero")));
        }
        Ok(())
    }
}

impl Scaler for ScalerModel {
    fn n_features(&self) -> usize {
        match self {
            Self::Standard { mean, .. } => mean.len(),
            Self::MinMax { data_min, .. } => data_min.len(),
        }
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        if row.len() != self.n_features() {
            return Err(ArtifactError::Shape(format!(
                "scaler got {} values, expected {}",
                row.len(),
                self.n_features()
            )));
        }

        let scaled = match self {
            Self::Standard { mean, scale } => row
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(x, (m, s))| (x - m) / s)
                .collect(),
            Self::MinMax {
                data_min,
                data_range,
                feature_range: (lo, hi),
            } => row
                .iter()
                .zip(data_min.iter().zip(data_range))
                .map(|(x, (min, range))| (x - min) / range * (hi - lo) + lo)
                .collect(),
        };
        Ok(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_transform() {
        let scaler = ScalerModel::Standard {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 0.5],
        };
        assert_eq!(scaler.transform(&[14.0, 1.0]).expect("Should scale"), vec![2.0, 2.0]);
    }

    #[test]
    fn test_min_max_transform_with_custom_range() {
        let scaler: ScalerModel = serde_json::from_str(
            r#"{"kind":"min_max","data_min":[0.0],"data_range":[10.0],"feature_range":[-1.0,1.0]}"#,
        )
        .expect("Should parse");
        assert_eq!(scaler.transform(&[5.0]).expect("Should scale"), vec![0.0]);
    }

    #[test]
    fn test_min_max_defaults_to_unit_range() {
        let scaler: ScalerModel =
            serde_json::from_str(r#"{"kind":"min_max","data_min":[0.0],"data_range":[4.0]}"#)
                .expect("Should parse");
        assert_eq!(scaler.transform(&[1.0]).expect("Should scale"), vec![0.25]);
    }

    #[test]
    fn test_wrong_width_is_shape_error() {
        let scaler = ScalerModel::Standard {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 1.0],
        };
        assert!(matches!(
            scaler.transform(&[1.0]),
            Err(ArtifactError::Shape(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_scale_and_length_mismatch() {
        let zero = ScalerModel::Standard {
            mean: vec![0.0],
            scale: vec![0.0],
        };
        assert!(zero.validate().is_err());

        let uneven = ScalerModel::Standard {
            mean: vec![0.0, 1.0],
            scale: vec![1.0],
        };
        assert!(uneven.validate().is_err());
    }
}
