//! Per-session prediction state.
//!
//! Owned by the UI loop and handed to views by reference. Nothing here is
//! shared between sessions or persisted.

use crate::domain::Prediction;

#[derive(Debug, Default)]
pub struct SessionState {
    last_result: Option<Prediction>,
    history: Vec<Prediction>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a successful prediction: overwrite the last-result slot and
    /// append to history.
    pub fn record(&mut self, prediction: Prediction) {
        self.history.push(prediction.clone());
        self.last_result = Some(prediction);
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&Prediction> {
        self.last_result.as_ref()
    }

    /// All predictions of this session, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Prediction] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DiabetesLabel, FeatureRow};

    #[test]
    fn test_empty_session() {
        let session = SessionState::new();
        assert!(session.last_result().is_none());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_last_result_overwritten_history_appended() {
        let mut session = SessionState::new();
        session.record(Prediction::new(1, 0.9, FeatureRow::new()));
        session.record(Prediction::new(0, 0.6, FeatureRow::new()));

        let last = session.last_result().expect("Should have a result");
        assert_eq!(last.label, DiabetesLabel::NonDiabetic);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].label, DiabetesLabel::Diabetic);
    }
}
