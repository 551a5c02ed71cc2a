//! Single-row feature table and the feature manifest that projects it.

use std::collections::HashSet;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One row of named numeric columns.
///
/// Column order is significant: it is the order values are handed to the
/// scaler after projection, and the order they are rendered in the UI.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRow {
    columns: Vec<(String, f64)>,
}

impl FeatureRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a column, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| *value)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|(column, _)| column == name)
    }

    /// Set a column. Existing columns are overwritten in place, new ones appended.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.columns.iter_mut().find(|(column, _)| *column == name) {
            Some((_, slot)) => *slot = value,
            None => self.columns.push((name, value)),
        }
    }

    /// Drop a column, returning the row without it.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.columns.retain(|(column, _)| column != name);
        self
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(column, _)| column.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns
            .iter()
            .map(|(column, value)| (column.as_str(), *value))
    }

    /// Values in column order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.columns.iter().map(|(_, value)| *value).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Select exactly the manifest's columns, in manifest order.
    ///
    /// # Errors
    /// Returns [`MissingFeatures`] naming every manifest column absent from this row.
    pub fn project(&self, manifest: &FeatureManifest) -> Result<FeatureRow, MissingFeatures> {
        let missing = manifest.missing_from(self);
        if !missing.is_empty() {
            return Err(MissingFeatures { missing });
        }

        Ok(manifest
            .names()
            .iter()
            .filter_map(|name| self.get(name).map(|value| (name.clone(), value)))
            .collect())
    }
}

impl FromIterator<(String, f64)> for FeatureRow {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (name, value) in iter {
            row.set(name, value);
        }
        row
    }
}

impl Serialize for FeatureRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in &self.columns {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Manifest columns absent from an input row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required features: {}", .missing.join(", "))]
pub struct MissingFeatures {
    /// Missing column names, in manifest order
    pub missing: Vec<String>,
}

/// Ordered list of the feature names a classifier was trained on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureManifest {
    names: Vec<String>,
}

impl FeatureManifest {
    /// Build a manifest from column names.
    ///
    /// # Errors
    /// Returns error if the list is empty or names a column twice.
    pub fn new(names: Vec<String>) -> Result<Self, String> {
        if names.is_empty() {
            return Err("Feature manifest is empty".to_string());
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(format!("Feature manifest lists '{name}' more than once"));
            }
        }

        Ok(Self { names })
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Manifest names that `row` does not carry, in manifest order.
    #[must_use]
    pub fn missing_from(&self, row: &FeatureRow) -> Vec<String> {
        self.names
            .iter()
            .filter(|name| !row.contains(name))
            .cloned()
            .collect()
    }
}

impl TryFrom<Vec<String>> for FeatureManifest {
    type Error = String;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<FeatureManifest> for Vec<String> {
    fn from(manifest: FeatureManifest) -> Self {
        manifest.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(names: &[&str]) -> FeatureManifest {
        FeatureManifest::new(names.iter().map(|n| n.to_string()).collect())
            .expect("Valid manifest")
    }

    fn row(pairs: &[(&str, f64)]) -> FeatureRow {
        pairs.iter().map(|(n, v)| (n.to_string(), *v)).collect()
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut r = row(&[("Age", 40.0), ("BMI", 25.0)]);
        r.set("Age", 41.0);
        r.set("Glucose", 99.0);

        assert_eq!(r.columns().collect::<Vec<_>>(), vec!["Age", "BMI", "Glucose"]);
        assert_eq!(r.get("Age"), Some(41.0));
    }

    #[test]
    fn test_project_reorders_and_drops_extra_columns() {
        let r = row(&[("Age", 40.0), ("BMI", 25.0), ("Glucose", 99.0)]);
        let projected = r.project(&manifest(&["Glucose", "Age"])).expect("Should project");

        assert_eq!(projected.columns().collect::<Vec<_>>(), vec!["Glucose", "Age"]);
        assert_eq!(projected.values(), vec![99.0, 40.0]);
    }

    #[test]
    fn test_project_reports_every_missing_column() {
        let r = row(&[("Age", 40.0)]);
        let err = r
            .project(&manifest(&["Glucose", "Age", "Insulin"]))
            .expect_err("Should be missing columns");

        assert_eq!(err.missing, vec!["Glucose".to_string(), "Insulin".to_string()]);
        assert_eq!(err.to_string(), "Missing required features: Glucose, Insulin");
    }

    #[test]
    fn test_project_is_idempotent() {
        let m = manifest(&["BMI", "Age"]);
        let r = row(&[("Age", 40.0), ("BMI", 25.0), ("Glucose", 99.0)]);

        let once = r.project(&m).expect("Should project");
        let twice = once.project(&m).expect("Should project");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_manifest_rejects_duplicates_and_empty() {
        assert!(FeatureManifest::new(vec![]).is_err());
        assert!(FeatureManifest::new(vec!["Age".into(), "Age".into()]).is_err());
    }

    #[test]
    fn test_manifest_deserializes_from_array() {
        let m: FeatureManifest = serde_json::from_str(r#"["Age", "BMI"]"#).expect("Should parse");
        assert_eq!(m.names(), ["Age".to_string(), "BMI".to_string()]);

        let dup: Result<FeatureManifest, _> = serde_json::from_str(r#"["Age", "Age"]"#);
        assert!(dup.is_err());
    }

    #[test]
    fn test_row_serializes_in_column_order() {
        let r = row(&[("Glucose", 99.0), ("Age", 40.0)]);
        let json = serde_json::to_string(&r).expect("Should serialize");
        assert_eq!(json, r#"{"Glucose":99.0,"Age":40.0}"#);
    }
}
