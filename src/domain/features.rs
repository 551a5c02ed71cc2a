//! Feature engineering: derived ratio and product columns.
//!
//! Both ratios shift their denominator by one so a zero insulin or BMI reading
//! never divides by zero. The resulting values are intentionally not the
//! textbook ratios; the classifier was trained on exactly these definitions.

use super::{FeatureRow, PatientMeasurements};

pub const AGE_SQUARED: &str = "Age_squared";
pub const BMI_AGE: &str = "BMI_Age";
pub const GLUCOSE_INSULIN: &str = "Glucose_Insulin";
pub const GLUCOSE_PER_BMI: &str = "Glucose_per_BMI";

/// The four columns computed from raw measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatures {
    pub age_squared: f64,
    pub bmi_age: f64,
    pub glucose_insulin: f64,
    pub glucose_per_bmi: f64,
}

impl DerivedFeatures {
    /// Compute the derived columns. No range checks are performed.
    #[must_use]
    pub fn compute(m: &PatientMeasurements) -> Self {
        let age = f64::from(m.age);
        Self {
            age_squared: age * age,
            bmi_age: m.bmi * age,
            glucose_insulin: m.glucose / (m.insulin + 1.0),
            glucose_per_bmi: m.glucose / (m.bmi + 1.0),
        }
    }

    fn apply(&self, row: &mut FeatureRow) {
        row.set(AGE_SQUARED, self.age_squared);
        row.set(BMI_AGE, self.bmi_age);
        row.set(GLUCOSE_INSULIN, self.glucose_insulin);
        row.set(GLUCOSE_PER_BMI, self.glucose_per_bmi);
    }
}

/// Build the derived record: raw columns followed by the four derived ones.
#[must_use]
pub fn engineer_features(measurements: &PatientMeasurements) -> FeatureRow {
    let mut row = measurements.to_row();
    DerivedFeatures::compute(measurements).apply(&mut row);
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MEASUREMENT_COLUMNS;
    use proptest::prelude::*;

    fn sample() -> PatientMeasurements {
        PatientMeasurements {
            age: 45,
            glucose: 120.0,
            bmi: 28.0,
            insulin: 0.0,
            blood_pressure: 72.0,
            diabetes_pedigree: 0.35,
            pregnancies: 2,
            skin_thickness: 20.0,
        }
    }

    #[test]
    fn test_reference_example() {
        let row = engineer_features(&sample());

        assert_eq!(row.get(GLUCOSE_INSULIN), Some(120.0));
        assert_eq!(row.get(AGE_SQUARED), Some(2025.0));
        assert_eq!(row.get(BMI_AGE), Some(1260.0));

        let per_bmi = row.get(GLUCOSE_PER_BMI).expect("Derived column");
        assert!((per_bmi - 120.0 / 29.0).abs() < 1e-12);
        assert!((per_bmi - 4.14).abs() < 0.005);
    }

    #[test]
    fn test_derived_columns_follow_raw_columns() {
        let row = engineer_features(&sample());
        let columns: Vec<&str> = row.columns().collect();

        assert_eq!(&columns[..8], &MEASUREMENT_COLUMNS[..]);
        assert_eq!(
            &columns[8..],
            &[AGE_SQUARED, BMI_AGE, GLUCOSE_INSULIN, GLUCOSE_PER_BMI]
        );
    }

    #[test]
    fn test_negative_inputs_accepted_silently() {
        let odd = PatientMeasurements {
            bmi: -0.5,
            insulin: -0.5,
            ..sample()
        };
        let derived = DerivedFeatures::compute(&odd);
        assert!((derived.glucose_insulin - 240.0).abs() < 1e-12);
        assert!((derived.glucose_per_bmi - 240.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_deterministic_and_finite(
            age in 18u32..=100,
            glucose in 0.0f64..400.0,
            bmi in 0.0f64..80.0,
            insulin in 0.0f64..900.0,
        ) {
            let m = PatientMeasurements { age, glucose, bmi, insulin, ..sample() };

            let first = DerivedFeatures::compute(&m);
            let second = DerivedFeatures::compute(&m);
            prop_assert_eq!(first, second);

            prop_assert_eq!(first.age_squared, f64::from(age) * f64::from(age));
            prop_assert!(first.glucose_insulin.is_finite());
            prop_assert!(first.glucose_per_bmi.is_finite());
            prop_assert!(first.glucose_insulin <= glucose);
        }
    }
}
