//! Static reference ranges shown alongside every report.

use crate::features::{FEATURE_COUNT, FEATURE_NAMES};

/// One row of the reference-range table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRange {
    /// Form field this range describes
    pub field: &'static str,
    pub measurement: &'static str,
    pub normal_range: &'static str,
}

/// Reference ranges, one per feature, in artifact column order.
pub const REFERENCE_RANGES: [ReferenceRange; FEATURE_COUNT] = [
    ReferenceRange {
        field: FEATURE_NAMES[0],
        measurement: "Specific Gravity",
        normal_range: "1.005 to 1.030",
    },
    ReferenceRange {
        field: FEATURE_NAMES[1],
        measurement: "Hypertension (blood pressure)",
        normal_range: "90 mmHg to 140 mmHg",
    },
    ReferenceRange {
        field: FEATURE_NAMES[2],
        measurement: "Haemoglobin",
        normal_range: "12.0 to 15.5 g/dL",
    },
    ReferenceRange {
        field: FEATURE_NAMES[3],
        measurement: "Diabetes Mellitus (blood sugar)",
        normal_range: "above 126 mg/dL",
    },
    ReferenceRange {
        field: FEATURE_NAMES[4],
        measurement: "Albumin",
        normal_range: "above 30 mg/dL",
    },
    ReferenceRange {
        field: FEATURE_NAMES[5],
        measurement: "Serum Creatinine",
        normal_range: "above 5.0 mg/dL (adults)",
    },
    ReferenceRange {
        field: FEATURE_NAMES[6],
        measurement: "Anemia",
        normal_range: "below 60 mg/dL",
    },
    ReferenceRange {
        field: FEATURE_NAMES[7],
        measurement: "Pus Cell (urine analysis)",
        normal_range: "above 8 pus cells",
    },
];
