//! Shared fixtures for renalyx tests: form submissions and PDF inspection.

use std::collections::HashMap;

use lopdf::content::Content;
use lopdf::{Document, Object};

pub use pretty_assertions;

/// Form fields of end-to-end scenario A (expected positive).
pub const SCENARIO_A: [(&str, &str); 8] = [
    ("specific_gravity", "1.02"),
    ("hypertension", "1"),
    ("haemoglobin", "11.0"),
    ("diabetes_mellitus", "1"),
    ("albumin", "40"),
    ("serum_creatinine", "6.0"),
    ("aanemia", "1"),
    ("pus_cell", "10"),
];

/// Form fields of end-to-end scenario B (expected negative).
pub const SCENARIO_B: [(&str, &str); 8] = [
    ("specific_gravity", "1.02"),
    ("hypertension", "0"),
    ("haemoglobin", "14.0"),
    ("diabetes_mellitus", "0"),
    ("albumin", "10"),
    ("serum_creatinine", "0.8"),
    ("aanemia", "0"),
    ("pus_cell", "2"),
];

/// Random forest artifact with one stump: positive when serum creatinine > 1.5.
pub const CREATININE_STUMP_JSON: &str = r#"{
    "n_features": 8,
    "classes": [0, 1],
    "trees": [{
        "children_left":  [1, -1, -1],
        "children_right": [2, -1, -1],
        "feature":        [5, -2, -2],
        "threshold":      [1.5, -2.0, -2.0],
        "value":          [[10, 10], [10, 0], [0, 10]]
    }]
}"#;

pub fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn scenario_a() -> HashMap<String, String> {
    form(&SCENARIO_A)
}

pub fn scenario_b() -> HashMap<String, String> {
    form(&SCENARIO_B)
}

/// Scenario C: scenario A without `haemoglobin`.
pub fn scenario_c() -> HashMap<String, String> {
    let mut raw = scenario_a();
    raw.remove("haemoglobin");
    raw
}

/// URL-encode a form for request bodies and query strings.
pub fn urlencoded(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Every string drawn with `Tj`, page by page, in content-stream order.
pub fn pdf_text_runs(bytes: &[u8]) -> Vec<Vec<String>> {
    let doc = Document::load_mem(bytes).expect("valid PDF");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let raw = doc.get_page_content(page_id).expect("page content");
            let content = Content::decode(&raw).expect("decodable content stream");
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| match op.operands.first() {
                    Some(Object::String(bytes, _)) => {
                        Some(String::from_utf8_lossy(bytes).into_owned())
                    }
                    _ => None,
                })
                .collect()
        })
        .collect()
}

/// All `Tj` strings of the document, pages concatenated.
pub fn pdf_text(bytes: &[u8]) -> Vec<String> {
    pdf_text_runs(bytes).into_iter().flatten().collect()
}
