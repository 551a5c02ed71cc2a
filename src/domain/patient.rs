//! Patient measurement types for diabetes risk prediction.
//!
//! Field set follows the Pima Indians Diabetes dataset the classifier was
//! trained on.

use serde::{Deserialize, Serialize};

use super::FeatureRow;

/// Column names of the raw measurements, in form order.
pub const MEASUREMENT_COLUMNS: [&str; 8] = [
    "Age",
    "Glucose",
    "BMI",
    "Insulin",
    "BloodPressure",
    "DiabetesPedigreeFunction",
    "Pregnancies",
    "SkinThickness",
];

/// Raw measurements collected from the diabetes form.
///
/// Built fresh for every submission and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PatientMeasurements {
    /// Age in years (>= 18)
    pub age: u32,

    /// Plasma glucose concentration (mg/dL)
    pub glucose: f64,

    /// Body mass index (kg/m²)
    pub bmi: f64,

    /// 2-hour serum insulin (mu U/ml)
    pub insulin: f64,

    /// Diastolic blood pressure (mm Hg)
    pub blood_pressure: f64,

    /// Diabetes pedigree function score
    pub diabetes_pedigree: f64,

    /// Number of pregnancies
    pub pregnancies: u32,

    /// Triceps skin fold thickness (mm)
    pub skin_thickness: f64,
}

impl PatientMeasurements {
    /// Validate that all measurements are within the accepted ranges.
    ///
    /// # Errors
    /// Returns every violation found, not just the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.age < 18 {
            errors.push(format!("Age {} must be at least 18", self.age));
        }

        let non_negative = [
            ("Glucose", self.glucose),
            ("BMI", self.bmi),
            ("Insulin", self.insulin),
            ("BloodPressure", self.blood_pressure),
            ("DiabetesPedigreeFunction", self.diabetes_pedigree),
            ("SkinThickness", self.skin_thickness),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} {value} must be a non-negative number"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Convert to a single-row table with the columns of [`MEASUREMENT_COLUMNS`].
    #[must_use]
    pub fn to_row(&self) -> FeatureRow {
        let values = [
            f64::from(self.age),
            self.glucose,
            self.bmi,
            self.insulin,
            self.blood_pressure,
            self.diabetes_pedigree,
            f64::from(self.pregnancies),
            self.skin_thickness,
        ];

        MEASUREMENT_COLUMNS
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}
