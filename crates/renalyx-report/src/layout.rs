//! Report content as plain tables, independent of the output format.

use serde::Serialize;

use renalyx_common::{DecisionResult, RenderError, REFERENCE_RANGES};

/// What a report is rendered from.
#[derive(Debug, Clone, Copy)]
pub enum ReportSubject<'a> {
    /// Only the decision label is known (e.g. passed back by the browser).
    Label(&'a str),
    /// Full decision, including the submitted values.
    Decision(&'a DecisionResult),
}

impl<'a> ReportSubject<'a> {
    pub fn label(&self) -> &'a str {
        match *self {
            ReportSubject::Label(label) => label,
            ReportSubject::Decision(decision) => decision.label.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn columns(&self) -> usize {
        self.header.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLayout {
    pub heading: Option<String>,
    /// Reference ranges, prediction result, then (optionally) submitted values.
    pub tables: Vec<Table>,
}

impl ReportLayout {
    pub fn reference_table(&self) -> &Table {
        &self.tables[0]
    }

    pub fn result_table(&self) -> &Table {
        &self.tables[1]
    }

    pub fn inputs_table(&self) -> Option<&Table> {
        self.tables.get(2)
    }
}

fn strings<const N: usize>(cells: [&str; N]) -> Vec<String> {
    cells.iter().map(|s| s.to_string()).collect()
}

pub fn build_layout(
    subject: ReportSubject<'_>,
    heading: Option<&str>,
    include_inputs: bool,
) -> Result<ReportLayout, RenderError> {
    let label = subject.label().trim();
    if label.is_empty() {
        return Err(RenderError::Layout(
            "report needs a prediction label".to_string(),
        ));
    }

    let reference = Table {
        title: "CKD Ranges".to_string(),
        header: strings(["Measurement", "Normal Range"]),
        rows: REFERENCE_RANGES
            .iter()
            .map(|r| strings([r.measurement, r.normal_range]))
            .collect(),
    };

    let result = Table {
        title: "Prediction Result".to_string(),
        header: strings(["Item", "Value"]),
        rows: vec![strings(["Result", label])],
    };

    let mut tables = vec![reference, result];

    if let (true, ReportSubject::Decision(decision)) = (include_inputs, subject) {
        let rows = decision
            .inputs
            .named_values()
            .iter()
            .zip(REFERENCE_RANGES.iter())
            .map(|((_, value), range)| strings([range.measurement, value, range.normal_range]))
            .collect();
        tables.push(Table {
            title: "Submitted Values".to_string(),
            header: strings(["Measurement", "Submitted", "Normal Range"]),
            rows,
        });
    }

    Ok(ReportLayout {
        heading: heading
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string),
        tables,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use renalyx_common::FeatureVector;

    fn decision() -> DecisionResult {
        DecisionResult {
            label: "CKD Positive".to_string(),
            positive: true,
            inputs: FeatureVector {
                specific_gravity: 1.02,
                hypertension: 1,
                haemoglobin: 11.0,
                diabetes_mellitus: 1,
                albumin: 40.0,
                serum_creatinine: 6.0,
                aanemia: 1,
                pus_cell: 10,
            },
        }
    }

    #[test]
    fn test_label_only_layout() {
        let layout = build_layout(ReportSubject::Label("CKD Positive"), None, true).unwrap();
        assert_eq!(layout.tables.len(), 2);
        assert_eq!(layout.reference_table().rows.len(), 8);
        assert_eq!(
            layout.result_table().rows,
            vec![vec!["Result".to_string(), "CKD Positive".to_string()]]
        );
        assert_eq!(layout.inputs_table(), None);
    }

    #[test]
    fn test_reference_rows_verbatim() {
        let layout = build_layout(ReportSubject::Label("CKD Negative"), None, false).unwrap();
        assert_eq!(
            layout.reference_table().rows[1],
            vec!["Hypertension (blood pressure)".to_string(), "90 mmHg to 140 mmHg".to_string()]
        );
        assert_eq!(
            layout.reference_table().rows[7],
            vec!["Pus Cell (urine analysis)".to_string(), "above 8 pus cells".to_string()]
        );
    }

    #[test]
    fn test_decision_layout_lists_inputs_beside_ranges() {
        let d = decision();
        let layout = build_layout(ReportSubject::Decision(&d), Some("Your Hospital Name"), true).unwrap();
        let inputs = layout.inputs_table().unwrap();
        assert_eq!(inputs.rows.len(), 8);
        assert_eq!(
            inputs.rows[5],
            vec![
                "Serum Creatinine".to_string(),
                "6".to_string(),
                "above 5.0 mg/dL (adults)".to_string()
            ]
        );
        assert_eq!(layout.heading.as_deref(), Some("Your Hospital Name"));
    }

    #[test]
    fn test_inputs_omitted_when_disabled() {
        let d = decision();
        let layout = build_layout(ReportSubject::Decision(&d), None, false).unwrap();
        assert_eq!(layout.tables.len(), 2);
    }

    #[test]
    fn test_blank_label_rejected() {
        let err = build_layout(ReportSubject::Label("  "), None, true).unwrap_err();
        assert!(matches!(err, RenderError::Layout(_)));
    }
}
