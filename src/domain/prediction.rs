//! Prediction result types.
//!
//! Represents the formatted output of the diabetes classifier.

use serde::{Deserialize, Serialize};

use super::{FeatureRow, MissingFeatures};

/// Factor applied to the predicted-class probability before display.
///
/// Kept at 99 rather than 100 so displayed numbers match the deployed
/// dashboard; whether the ceiling is intended is still an open product question.
pub const CONFIDENCE_SCALE: f64 = 99.0;

/// Class label shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiabetesLabel {
    #[serde(rename = "Diabetic")]
    Diabetic,
    #[serde(rename = "Non-Diabetic")]
    NonDiabetic,
}

impl DiabetesLabel {
    /// Map a classifier class index to a label. Only index 1 is diabetic.
    #[must_use]
    pub fn from_class_index(index: usize) -> Self {
        if index == 1 {
            Self::Diabetic
        } else {
            Self::NonDiabetic
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diabetic => "Diabetic",
            Self::NonDiabetic => "Non-Diabetic",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Diabetic => (244, 63, 94),     // Rose (#F43F5E)
            Self::NonDiabetic => (16, 185, 129), // Emerald (#10B981)
        }
    }
}

impl std::fmt::Display for DiabetesLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scale a class probability by [`CONFIDENCE_SCALE`] and round to one decimal.
#[must_use]
pub fn scaled_confidence(probability: f64) -> f64 {
    (probability * CONFIDENCE_SCALE * 10.0).round() / 10.0
}

/// A successful prediction.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub label: DiabetesLabel,

    /// Predicted-class probability, scaled and rounded (see [`scaled_confidence`])
    pub confidence: f64,

    /// Exactly the projected, manifest-ordered features the classifier saw
    pub input: FeatureRow,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Prediction {
    /// Format classifier output into a prediction.
    #[must_use]
    pub fn new(class_index: usize, class_probability: f64, input: FeatureRow) -> Self {
        Self {
            label: DiabetesLabel::from_class_index(class_index),
            confidence: scaled_confidence(class_probability),
            input,
            created_at: chrono::Utc::now(),
        }
    }

    /// One-line summary used by both the form and the home view.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} ({}% confidence)", self.label, self.confidence)
    }
}

/// Recoverable reasons a prediction could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictionFailure {
    #[error(transparent)]
    MissingFeatures(#[from] MissingFeatures),
}

/// Outcome of one prediction request.
#[derive(Debug, Clone)]
pub enum PredictionOutcome {
    Success(Prediction),
    Failure(PredictionFailure),
}

impl PredictionOutcome {
    #[must_use]
    pub fn prediction(&self) -> Option<&Prediction> {
        match self {
            Self::Success(prediction) => Some(prediction),
            Self::Failure(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_uses_99_scale() {
        assert_eq!(scaled_confidence(0.80), 79.2);
        assert_eq!(scaled_confidence(1.0), 99.0);
        assert_eq!(scaled_confidence(0.0), 0.0);
        assert_eq!(scaled_confidence(0.5), 49.5);
    }

    #[test]
    fn test_label_from_class_index() {
        assert_eq!(DiabetesLabel::from_class_index(1), DiabetesLabel::Diabetic);
        assert_eq!(DiabetesLabel::from_class_index(0), DiabetesLabel::NonDiabetic);
        assert_eq!(DiabetesLabel::from_class_index(2), DiabetesLabel::NonDiabetic);
    }

    #[test]
    fn test_prediction_summary() {
        let prediction = Prediction::new(1, 0.80, FeatureRow::new());
        assert_eq!(prediction.summary(), "Diabetic (79.2% confidence)");
    }

    #[test]
    fn test_label_serializes_as_display_text() {
        let json = serde_json::to_string(&DiabetesLabel::NonDiabetic).expect("Should serialize");
        assert_eq!(json, r#""Non-Diabetic""#);
    }

    #[test]
    fn test_failure_message_names_columns() {
        let outcome = PredictionOutcome::Failure(
            MissingFeatures {
                missing: vec!["Insulin".to_string()],
            }
            .into(),
        );
        assert!(outcome.prediction().is_none());
        match outcome {
            PredictionOutcome::Failure(failure) => {
                assert_eq!(failure.to_string(), "Missing required features: Insulin")
            }
            PredictionOutcome::Success(_) => panic!("Expected failure"),
        }
    }
}
