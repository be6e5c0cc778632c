//! Minimal PDF writer: headings, styled tables and plain text lines on A4 pages.
//!
//! Uses the standard Type 1 Helvetica fonts, so no font data is embedded.
//! Text widths are estimated from an average glyph advance.

use std::io::Write;

use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use uuid::Uuid;

use renalyx_common::RenderError;

use crate::layout::Table;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;

const HEADING_SIZE: f32 = 16.0;
const TITLE_SIZE: f32 = 12.0;
const FONT_SIZE: f32 = 10.0;
const ROW_HEIGHT: f32 = 20.0;
const HEADER_PADDING: f32 = 6.0;
const CELL_PADDING: f32 = 6.0;
const BLOCK_GAP: f32 = 18.0;
/// Average Helvetica advance width, in em.
const GLYPH_WIDTH: f32 = 0.52;

const ELLIPSIS: &str = "...";

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

#[derive(Debug, Clone, Copy)]
struct Rgb(f32, f32, f32);

const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
const RED: Rgb = Rgb(1.0, 0.0, 0.0);
const GREY: Rgb = Rgb(0.5, 0.5, 0.5);
const WHITESMOKE: Rgb = Rgb(0.96, 0.96, 0.96);
const BEIGE: Rgb = Rgb(0.96, 0.96, 0.86);

/// Document-level metadata written to the `/Info` dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub report_id: Uuid,
    pub created: DateTime<Utc>,
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_WIDTH
}

/// Truncate with "..." so the text fits in `max_width` points.
fn fit_text(text: &str, size: f32, max_width: f32) -> String {
    if text_width(text, size) <= max_width {
        return text.to_string();
    }
    let budget = max_width - text_width(ELLIPSIS, size);
    let keep = if budget > 0.0 {
        (budget / (size * GLYPH_WIDTH)).floor() as usize
    } else {
        0
    };
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Codes 0x80..=0x9F, where WinAnsi departs from Latin-1.
const WIN_ANSI_EXTRA: [(char, u8); 27] = [
    ('\u{20AC}', 0x80), ('\u{201A}', 0x82), ('\u{0192}', 0x83), ('\u{201E}', 0x84),
    ('\u{2026}', 0x85), ('\u{2020}', 0x86), ('\u{2021}', 0x87), ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89), ('\u{0160}', 0x8A), ('\u{2039}', 0x8B), ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E), ('\u{2018}', 0x91), ('\u{2019}', 0x92), ('\u{201C}', 0x93),
    ('\u{201D}', 0x94), ('\u{2022}', 0x95), ('\u{2013}', 0x96), ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98), ('\u{2122}', 0x99), ('\u{0161}', 0x9A), ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C), ('\u{017E}', 0x9E), ('\u{0178}', 0x9F),
];

/// Map to WinAnsi bytes; characters the encoding lacks become `?`.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x00..=0x7F | 0xA0..=0xFF => c as u8,
            _ => WIN_ANSI_EXTRA
                .iter()
                .find(|(ch, _)| *ch == c)
                .map_or(b'?', |(_, code)| *code),
        })
        .collect()
}

fn pdf_err(e: lopdf::Error) -> RenderError {
    RenderError::Pdf(e.to_string())
}

pub struct PdfWriter {
    finished: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    /// Top of the free area on the current page.
    y: f32,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self {
            finished: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    pub fn page_count(&self) -> usize {
        self.finished.len() + 1
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.finished.push(page);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Start a new page unless `height` still fits. Returns true on a page break.
    fn ensure_space(&mut self, height: f32) -> bool {
        let fresh = self.y >= PAGE_HEIGHT - MARGIN;
        if self.y - height < MARGIN && !fresh {
            self.new_page();
            return true;
        }
        false
    }

    fn text(&mut self, font: &str, size: f32, color: Rgb, x: f32, y: f32, text: &str) {
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("rg", vec![color.0.into(), color.1.into(), color.2.into()]),
            Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(encode_text(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn fill_rect(&mut self, color: Rgb, x: f32, y: f32, w: f32, h: f32) {
        self.current.extend([
            Operation::new("rg", vec![color.0.into(), color.1.into(), color.2.into()]),
            Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]),
            Operation::new("f", vec![]),
        ]);
    }

    fn stroke_rect(&mut self, color: Rgb, x: f32, y: f32, w: f32, h: f32) {
        self.current.extend([
            Operation::new("RG", vec![color.0.into(), color.1.into(), color.2.into()]),
            Operation::new("w", vec![1.0f32.into()]),
            Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]),
            Operation::new("S", vec![]),
        ]);
    }

    pub fn heading(&mut self, text: &str) {
        self.ensure_space(HEADING_SIZE + BLOCK_GAP);
        let y = self.y - HEADING_SIZE;
        let text = fit_text(text, HEADING_SIZE, PAGE_WIDTH - 2.0 * MARGIN);
        self.text(BOLD, HEADING_SIZE, RED, MARGIN, y, &text);
        self.y = y - BLOCK_GAP;
    }

    fn title(&mut self, text: &str) {
        let y = self.y - TITLE_SIZE;
        let text = fit_text(text, TITLE_SIZE, PAGE_WIDTH - 2.0 * MARGIN);
        self.text(BOLD, TITLE_SIZE, BLACK, MARGIN, y, &text);
        self.y = y - HEADER_PADDING;
    }

    /// Grey header with whitesmoke bold text, beige body, black grid.
    pub fn table(&mut self, table: &Table) {
        let widths = column_widths(table);
        let header_height = ROW_HEIGHT + HEADER_PADDING;

        self.ensure_space(TITLE_SIZE + HEADER_PADDING + header_height + ROW_HEIGHT);
        self.title(&table.title);
        self.row(&table.header, &widths, header_height, true);

        for cells in &table.rows {
            if self.ensure_space(ROW_HEIGHT) {
                self.row(&table.header, &widths, header_height, true);
            }
            self.row(cells, &widths, ROW_HEIGHT, false);
        }
        self.y -= BLOCK_GAP;
    }

    fn row(&mut self, cells: &[String], widths: &[f32], height: f32, header: bool) {
        let bottom = self.y - height;
        let (fill, ink, font) = if header {
            (GREY, WHITESMOKE, BOLD)
        } else {
            (BEIGE, BLACK, REGULAR)
        };
        let baseline = bottom + (ROW_HEIGHT - FONT_SIZE) / 2.0 + 2.0
            + if header { HEADER_PADDING } else { 0.0 };

        let mut x = MARGIN;
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let cell = fit_text(cell, FONT_SIZE, width - 2.0 * CELL_PADDING);
            self.fill_rect(fill, x, bottom, *width, height);
            self.stroke_rect(BLACK, x, bottom, *width, height);
            let tx = x + ((width - text_width(&cell, FONT_SIZE)) / 2.0).max(CELL_PADDING);
            self.text(font, FONT_SIZE, ink, tx, baseline, &cell);
            x += width;
        }
        self.y = bottom;
    }

    /// Caption followed by one "name: value" line per row.
    pub fn plain(&mut self, table: &Table) {
        let line_height = FONT_SIZE + 6.0;
        self.ensure_space(TITLE_SIZE + HEADER_PADDING + line_height);
        self.title(&format!("{}:", table.title));

        for cells in &table.rows {
            self.ensure_space(line_height);
            let line = match cells.split_first() {
                Some((name, rest)) if !rest.is_empty() => format!("{}: {}", name, rest.join(", ")),
                Some((name, _)) => name.clone(),
                None => continue,
            };
            let y = self.y - line_height;
            let line = fit_text(&line, FONT_SIZE, PAGE_WIDTH - 2.0 * MARGIN);
            self.text(REGULAR, FONT_SIZE, BLACK, MARGIN, y + 4.0, &line);
            self.y = y;
        }
        self.y -= BLOCK_GAP;
    }

    /// Assemble the page tree and serialise the document into a buffer.
    pub fn finish(self, info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Vec::new();
        self.finish_to(info, &mut buffer)?;
        Ok(buffer)
    }

    /// Assemble the page tree and serialise the document into `out`.
    pub fn finish_to<W: Write>(self, info: &DocumentInfo, out: &mut W) -> Result<(), RenderError> {
        let mut pages = self.finished;
        pages.push(self.current);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR => regular_id,
                BOLD => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for operations in pages {
            let encoded = Content { operations }.encode().map_err(pdf_err)?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(encode_text(&info.title)),
            "Producer" => Object::string_literal("renalyx"),
            "CreationDate" => Object::string_literal(
                info.created.format("D:%Y%m%d%H%M%SZ").to_string()
            ),
            "ReportId" => Object::string_literal(info.report_id.to_string()),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        doc.save_to(out)?;
        Ok(())
    }
}

/// Widest cell per column plus padding. When the table is too wide, the
/// widest columns are capped at a shared width; narrow columns keep theirs.
fn column_widths(table: &Table) -> Vec<f32> {
    let usable = PAGE_WIDTH - 2.0 * MARGIN;
    let mut widths: Vec<f32> = (0..table.columns())
        .map(|col| {
            std::iter::once(&table.header)
                .chain(table.rows.iter())
                .filter_map(|row| row.get(col))
                .map(|cell| text_width(cell, FONT_SIZE) + 2.0 * CELL_PADDING)
                .fold(0.0f32, f32::max)
        })
        .collect();
    let total: f32 = widths.iter().sum();
    if total > usable {
        let mut sorted = widths.clone();
        sorted.sort_by(f32::total_cmp);
        let mut remaining = usable;
        let mut left = sorted.len();
        let mut cap = usable / left as f32;
        for w in sorted {
            if w > cap {
                break;
            }
            remaining -= w;
            left -= 1;
            cap = remaining / left.max(1) as f32;
        }
        widths.iter_mut().for_each(|w| *w = w.min(cap));
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> DocumentInfo {
        DocumentInfo {
            title: "CKD Prediction Report".to_string(),
            report_id: Uuid::new_v4(),
            created: Utc::now(),
        }
    }

    fn long_table(rows: usize) -> Table {
        Table {
            title: "Long".to_string(),
            header: vec!["Name".to_string(), "Value".to_string()],
            rows: (0..rows)
                .map(|i| vec![format!("row {i}"), i.to_string()])
                .collect(),
        }
    }

    #[test]
    fn test_output_is_pdf() {
        let mut writer = PdfWriter::new();
        writer.heading("Your Hospital Name");
        let bytes = writer.finish(&info()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_long_table_paginates() {
        let mut writer = PdfWriter::new();
        writer.table(&long_table(80));
        assert!(writer.page_count() > 1);

        let bytes = writer.finish(&info()).unwrap();
        let pages = renalyx_test_utils::pdf_text_runs(&bytes);
        assert!(pages.len() > 1);
        // header repeated on every page
        for page in &pages {
            assert!(page.iter().any(|t| t == "Name"));
        }
        let all: Vec<_> = pages.concat();
        assert!(all.iter().any(|t| t == "row 0"));
        assert!(all.iter().any(|t| t == "row 79"));
    }

    #[test]
    fn test_columns_fit_page() {
        let table = Table {
            title: "Wide".to_string(),
            header: vec!["A".to_string(), "B".to_string()],
            rows: vec![vec!["x".repeat(200), "y".repeat(200)]],
        };
        let total: f32 = column_widths(&table).iter().sum();
        assert!(total <= PAGE_WIDTH - 2.0 * MARGIN + 0.01);
    }

    #[test]
    fn test_narrow_column_keeps_width_when_capped() {
        let table = Table {
            title: "Prediction Result".to_string(),
            header: vec!["Item".to_string(), "Value".to_string()],
            rows: vec![vec!["Result".to_string(), "L".repeat(300)]],
        };
        let widths = column_widths(&table);
        assert_eq!(widths[0], text_width("Result", FONT_SIZE) + 2.0 * CELL_PADDING);
        assert!((widths.iter().sum::<f32>() - (PAGE_WIDTH - 2.0 * MARGIN)).abs() < 0.01);
    }

    #[test]
    fn test_non_latin_text_replaced() {
        assert_eq!(encode_text("CKD ✓"), b"CKD ?".to_vec());
        assert_eq!(encode_text("Hämoglobin"), b"H\xe4moglobin".to_vec());
    }

    #[test]
    fn test_win_ansi_specials() {
        assert_eq!(encode_text("\u{20AC}5"), b"\x805".to_vec());
        assert_eq!(encode_text("a\u{2013}b"), b"a\x96b".to_vec());
        // C1 controls have no WinAnsi glyph of their own
        assert_eq!(encode_text("\u{0080}\u{009F}"), b"??".to_vec());
    }

    #[test]
    fn test_long_cell_truncated_to_column() {
        let label = "L".repeat(300);
        let table = Table {
            title: "Prediction Result".to_string(),
            header: vec!["Item".to_string(), "Value".to_string()],
            rows: vec![vec!["Result".to_string(), label.clone()]],
        };
        let widths = column_widths(&table);
        let mut writer = PdfWriter::new();
        writer.table(&table);
        let text = renalyx_test_utils::pdf_text(&writer.finish(&info()).unwrap());

        let drawn = text
            .iter()
            .find(|t| t.starts_with('L'))
            .expect("label drawn");
        assert!(drawn.ends_with(ELLIPSIS));
        assert!(text.iter().any(|t| t == "Result"));
        assert!(drawn.len() < label.len());
        assert!(text_width(drawn, FONT_SIZE) <= widths[1] - 2.0 * CELL_PADDING);
    }

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(fit_text("CKD Positive", FONT_SIZE, 200.0), "CKD Positive");
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let mut writer = PdfWriter::new();
        writer.heading("Your Hospital Name");
        let err = writer.finish_to(&info(), &mut FailingSink).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
