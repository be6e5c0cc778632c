use std::sync::Arc;

use renalyx_common::{interpret, normalize, DecisionResult, PredictionOutcome, REFERENCE_RANGES};
use renalyx_report::{RendererPolicy, ReportOptions, ReportRenderer, ReportSubject};
use renalyx_test_utils::pretty_assertions::assert_eq;
use renalyx_test_utils::{pdf_text, scenario_a, scenario_b};

fn decision_a() -> DecisionResult {
    interpret(PredictionOutcome::POSITIVE, normalize(&scenario_a()).unwrap()).unwrap()
}

fn decision_b() -> DecisionResult {
    interpret(PredictionOutcome::NEGATIVE, normalize(&scenario_b()).unwrap()).unwrap()
}

fn count(text: &[String], needle: &str) -> usize {
    text.iter().filter(|t| *t == needle).count()
}

#[test]
fn scenario_d_ranges_then_single_result_row() {
    let renderer = ReportRenderer::new(ReportOptions {
        include_inputs: false,
        ..ReportOptions::default()
    });
    let decision = decision_a();
    let doc = renderer.render(ReportSubject::Decision(&decision)).unwrap();

    assert_eq!(doc.layout.reference_table().rows.len(), 8);
    assert_eq!(doc.layout.result_table().rows.len(), 1);
    assert_eq!(doc.layout.result_table().rows[0][1], "CKD Positive");

    let text = pdf_text(doc.as_bytes());
    for range in REFERENCE_RANGES {
        assert_eq!(count(&text, range.measurement), 1, "{}", range.measurement);
        assert_eq!(count(&text, range.normal_range), 1, "{}", range.normal_range);
    }
    assert_eq!(count(&text, "CKD Positive"), 1);

    // Reference table precedes the result table.
    let ranges_at = text.iter().position(|t| t == "CKD Ranges").unwrap();
    let result_at = text.iter().position(|t| t == "Prediction Result").unwrap();
    let label_at = text.iter().position(|t| t == "CKD Positive").unwrap();
    assert!(ranges_at < result_at && result_at < label_at);
}

#[test]
fn full_decision_lists_submitted_values() {
    let decision = decision_a();
    let doc = ReportRenderer::default()
        .render(ReportSubject::Decision(&decision))
        .unwrap();
    let text = pdf_text(doc.as_bytes());

    assert!(text.iter().any(|t| t == "Your Hospital Name"));
    assert!(text.iter().any(|t| t == "Submitted Values"));
    // Each measurement appears in the range table and again beside its value.
    assert_eq!(count(&text, "Serum Creatinine"), 2);
    assert_eq!(count(&text, "above 5.0 mg/dL (adults)"), 2);
}

#[test]
fn rendering_is_idempotent_in_content() {
    let renderer = ReportRenderer::default();
    let decision = decision_a();
    let first = renderer.render(ReportSubject::Decision(&decision)).unwrap();
    let second = renderer.render(ReportSubject::Decision(&decision)).unwrap();

    assert_eq!(first.layout, second.layout);
    assert_eq!(pdf_text(first.as_bytes()), pdf_text(second.as_bytes()));
}

#[test]
fn concurrent_reports_do_not_mix() {
    let renderer = Arc::new(ReportRenderer::default());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let renderer = Arc::clone(&renderer);
            std::thread::spawn(move || {
                let decision = if i % 2 == 0 { decision_a() } else { decision_b() };
                let doc = renderer.render(ReportSubject::Decision(&decision)).unwrap();
                (decision.label, pdf_text(doc.as_bytes()))
            })
        })
        .collect();

    for handle in handles {
        let (label, text) = handle.join().unwrap();
        let other = if label == "CKD Positive" { "CKD Negative" } else { "CKD Positive" };
        assert_eq!(count(&text, &label), 1);
        assert_eq!(count(&text, other), 0);
    }
}

#[test]
fn plain_policy_writes_lines() {
    let renderer = ReportRenderer::new(ReportOptions {
        policy: RendererPolicy::Plain,
        heading: None,
        include_inputs: false,
    });
    let doc = renderer.render(ReportSubject::Label("CKD Negative")).unwrap();
    let text = pdf_text(doc.as_bytes());

    assert_eq!(text[0], "CKD Ranges:");
    assert_eq!(text[1], "Specific Gravity: 1.005 to 1.030");
    assert_eq!(text[8], "Pus Cell (urine analysis): above 8 pus cells");
    assert_eq!(text[9], "Prediction Result:");
    assert_eq!(text[10], "Result: CKD Negative");
    assert_eq!(text.len(), 11);
}

#[test]
fn document_info_carries_metadata() {
    let doc = ReportRenderer::default()
        .render(ReportSubject::Label("CKD Negative"))
        .unwrap();
    let pdf = lopdf::Document::load_mem(doc.as_bytes()).unwrap();
    let info_id = pdf.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = pdf.get_dictionary(info_id).unwrap();

    let field = |key: &[u8]| {
        String::from_utf8_lossy(info.get(key).unwrap().as_str().unwrap()).into_owned()
    };
    assert_eq!(field(b"Title"), "CKD Prediction Report");
    assert_eq!(field(b"Producer"), "renalyx");
    assert!(field(b"CreationDate").starts_with("D:"));
    assert_eq!(field(b"ReportId"), doc.id.to_string());
}
