//! renalyx-report: Renders a prediction into a downloadable PDF report.
//!
//! A report is built in two steps: [`build_layout`] turns the decision into
//! plain tables (reference ranges first, then the result), and the PDF
//! writer draws those tables onto A4 pages. Every call renders into a fresh
//! in-memory buffer; nothing is written to a shared location.

pub mod layout;
pub mod pdf;
pub mod renderer;

pub use layout::{build_layout, ReportLayout, ReportSubject, Table};
pub use renderer::{ReportDocument, ReportOptions, ReportRenderer, RendererPolicy};

/// Attachment name used when the report is delivered.
pub const REPORT_FILENAME: &str = "CKD_Prediction_Report.pdf";

pub const CONTENT_TYPE: &str = "application/pdf";
