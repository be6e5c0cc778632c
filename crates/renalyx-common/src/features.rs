//! Clinical feature vector and input normalisation.
//!
//! The field order below is the column order the classifier artifact was
//! trained on. Reordering it silently corrupts predictions.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

pub const FEATURE_COUNT: usize = 8;

/// Form field names, in artifact column order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "specific_gravity",
    "hypertension",
    "haemoglobin",
    "diabetes_mellitus",
    "albumin",
    "serum_creatinine",
    "aanemia",
    "pus_cell",
];

/// The 8 clinical measurements of one submission.
/// Binary indicators are canonically 0 or 1; other integers are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Urine specific gravity
    pub specific_gravity: f64,
    /// Hypertension indicator
    pub hypertension: i64,
    /// Haemoglobin, g/dL
    pub haemoglobin: f64,
    /// Diabetes mellitus indicator
    pub diabetes_mellitus: i64,
    /// Albumin
    pub albumin: f64,
    /// Serum creatinine, mg/dL
    pub serum_creatinine: f64,
    /// Anaemia indicator
    pub aanemia: i64,
    /// Pus cell indicator
    pub pus_cell: i64,
}

impl FeatureVector {
    /// Convert to the artifact's input row.
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.specific_gravity,
            self.hypertension as f64,
            self.haemoglobin,
            self.diabetes_mellitus as f64,
            self.albumin,
            self.serum_creatinine,
            self.aanemia as f64,
            self.pus_cell as f64,
        ]
    }

    /// (field name, display value) pairs in artifact order.
    pub fn named_values(&self) -> [(&'static str, String); FEATURE_COUNT] {
        [
            (FEATURE_NAMES[0], self.specific_gravity.to_string()),
            (FEATURE_NAMES[1], self.hypertension.to_string()),
            (FEATURE_NAMES[2], self.haemoglobin.to_string()),
            (FEATURE_NAMES[3], self.diabetes_mellitus.to_string()),
            (FEATURE_NAMES[4], self.albumin.to_string()),
            (FEATURE_NAMES[5], self.serum_creatinine.to_string()),
            (FEATURE_NAMES[6], self.aanemia.to_string()),
            (FEATURE_NAMES[7], self.pus_cell.to_string()),
        ]
    }
}

/// Parse raw form fields into a [`FeatureVector`].
///
/// Key order in `raw` is irrelevant; extra keys are ignored. The first
/// missing or unparsable field (in artifact order) is reported.
pub fn normalize(raw: &HashMap<String, String>) -> Result<FeatureVector, ParseError> {
    Ok(FeatureVector {
        specific_gravity: field(raw, "specific_gravity")?,
        hypertension: field(raw, "hypertension")?,
        haemoglobin: field(raw, "haemoglobin")?,
        diabetes_mellitus: field(raw, "diabetes_mellitus")?,
        albumin: field(raw, "albumin")?,
        serum_creatinine: field(raw, "serum_creatinine")?,
        aanemia: field(raw, "aanemia")?,
        pus_cell: field(raw, "pus_cell")?,
    })
}

fn field<T>(raw: &HashMap<String, String>, name: &'static str) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = raw.get(name).ok_or(ParseError::Missing { field: name })?;
    value.trim().parse::<T>().map_err(|e| ParseError::Invalid {
        field: name,
        value: value.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn scenario_a() -> Vec<(&'static str, &'static str)> {
        vec![
            ("specific_gravity", "1.02"),
            ("hypertension", "1"),
            ("haemoglobin", "11.0"),
            ("diabetes_mellitus", "1"),
            ("albumin", "40"),
            ("serum_creatinine", "6.0"),
            ("aanemia", "1"),
            ("pus_cell", "10"),
        ]
    }

    #[test]
    fn test_normalize_fixed_order_regardless_of_key_order() {
        let forward = normalize(&raw(&scenario_a())).unwrap();
        let mut reversed = scenario_a();
        reversed.reverse();
        let backward = normalize(&raw(&reversed)).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(
            forward.as_array(),
            [1.02, 1.0, 11.0, 1.0, 40.0, 6.0, 1.0, 10.0]
        );
    }

    #[test]
    fn test_every_missing_field_is_named() {
        for name in FEATURE_NAMES {
            let pairs: Vec<_> = scenario_a().into_iter().filter(|(k, _)| *k != name).collect();
            let err = normalize(&raw(&pairs)).unwrap_err();
            assert_eq!(err, ParseError::Missing { field: name });
        }
    }

    #[test]
    fn test_integer_field_rejects_float_text() {
        let mut pairs = scenario_a();
        pairs[1] = ("hypertension", "1.0");
        let err = normalize(&raw(&pairs)).unwrap_err();
        assert_eq!(err.field(), "hypertension");
        match err {
            ParseError::Invalid { value, .. } => assert_eq!(value, "1.0"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_float_field_rejects_garbage() {
        let mut pairs = scenario_a();
        pairs[5] = ("serum_creatinine", "high");
        let err = normalize(&raw(&pairs)).unwrap_err();
        assert_eq!(err.field(), "serum_creatinine");
    }

    #[test]
    fn test_whitespace_and_extra_keys_tolerated() {
        let mut pairs = scenario_a();
        pairs[0] = ("specific_gravity", " 1.02 ");
        pairs.push(("submit", "Predict"));
        let v = normalize(&raw(&pairs)).unwrap();
        assert_eq!(v.specific_gravity, 1.02);
    }

    #[test]
    fn test_out_of_domain_integers_accepted() {
        let mut pairs = scenario_a();
        pairs[6] = ("aanemia", "3");
        let v = normalize(&raw(&pairs)).unwrap();
        assert_eq!(v.aanemia, 3);
    }
}
