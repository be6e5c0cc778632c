use std::io::Write;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use renalyx_common::RenderError;

use crate::layout::{build_layout, ReportLayout, ReportSubject};
use crate::pdf::{DocumentInfo, PdfWriter};
use crate::{CONTENT_TYPE, REPORT_FILENAME};

/// How tables are drawn on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererPolicy {
    /// Gridded tables with a highlighted header row
    #[default]
    Tabular,
    /// Caption plus "name: value" lines
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub policy: RendererPolicy,
    /// Organisation name drawn above the tables
    pub heading: Option<String>,
    /// Include the submitted values when the full decision is known
    pub include_inputs: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            policy: RendererPolicy::Tabular,
            heading: Some("Your Hospital Name".to_string()),
            include_inputs: true,
        }
    }
}

/// A rendered report, held in memory until delivered.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub id: Uuid,
    pub layout: ReportLayout,
    bytes: Vec<u8>,
}

impl ReportDocument {
    pub fn filename(&self) -> &'static str {
        REPORT_FILENAME
    }

    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Stream the document to `out` (response body, file, ...).
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        out.write_all(&self.bytes)?;
        out.flush()?;
        Ok(())
    }
}

/// Stateless renderer; safe to share across concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    options: ReportOptions,
}

impl ReportRenderer {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    pub fn render(&self, subject: ReportSubject<'_>) -> Result<ReportDocument, RenderError> {
        let id = Uuid::new_v4();
        let layout = build_layout(
            subject,
            self.options.heading.as_deref(),
            self.options.include_inputs,
        )?;
        debug!(report_id = %id, tables = layout.tables.len(), "Report layout built");

        let mut writer = PdfWriter::new();
        if let Some(heading) = &layout.heading {
            writer.heading(heading);
        }
        for table in &layout.tables {
            match self.options.policy {
                RendererPolicy::Tabular => writer.table(table),
                RendererPolicy::Plain => writer.plain(table),
            }
        }
        let pages = writer.page_count();
        let bytes = writer.finish(&DocumentInfo {
            title: "CKD Prediction Report".to_string(),
            report_id: id,
            created: Utc::now(),
        })?;

        info!(
            report_id = %id,
            pages,
            bytes = bytes.len(),
            "Rendered report ({})",
            subject.label()
        );
        Ok(ReportDocument { id, layout, bytes })
    }
}
