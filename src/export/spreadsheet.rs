//! Spreadsheet export
//!
//! Writes an Excel 2003 XML (SpreadsheetML) workbook: a title block, a
//! header row and one row per task, with the priority columns coloured by
//! [`PriorityBand`].

use super::{PriorityBand, PRIORITY_BANDS, ROW_TIMESTAMP_FORMAT};
use crate::error::{TaggerError, TaggerResult};
use crate::record::ClassificationRecord;
use chrono::NaiveDateTime;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub const SHEET_NAME: &str = "AI Processed Tasks";
/// Associates the `.xml` file with Excel instead of the XML import dialog
const MSO_APPLICATION: &str = r#"mso-application progid="Excel.Sheet""#;
const TITLE: &str = "Smart Task Summarizer + Tagger - AI Processed Results";
const FONT: &str = "Segoe UI";
const BORDER_COLOR: &str = "#E2E8F0";
const COLUMN_COUNT: usize = 6;

/// Header label and width (in character units) per column
const COLUMNS: [(&str, f32); COLUMN_COUNT] = [
    ("Original Task", 50.0),
    ("AI Summary", 35.0),
    ("Smart Tags", 25.0),
    ("Priority Level", 15.0),
    ("Priority Score", 12.0),
    ("Processed Date", 20.0),
];

/// Approximate points per character of column width
const POINTS_PER_CHAR: f32 = 5.6;
const HEADER_ROW_HEIGHT: &str = "25";
const DATA_ROW_HEIGHT: &str = "60";

/// Render the workbook
pub fn render(records: &[ClassificationRecord], now: &NaiveDateTime) -> TaggerResult<Vec<u8>> {
    let mut sheet = SheetWriter::new();

    sheet.decl()?;
    sheet.pi(MSO_APPLICATION)?;
    sheet.start(
        "Workbook",
        &[
            ("xmlns", "urn:schemas-microsoft-com:office:spreadsheet"),
            ("xmlns:o", "urn:schemas-microsoft-com:office:office"),
            ("xmlns:x", "urn:schemas-microsoft-com:office:excel"),
            ("xmlns:ss", "urn:schemas-microsoft-com:office:spreadsheet"),
        ],
    )?;
    write_styles(&mut sheet)?;

    sheet.start("Worksheet", &[("ss:Name", SHEET_NAME)])?;
    sheet.start("Table", &[])?;

    for (_, width) in COLUMNS {
        let points = format!("{:.0}", width * POINTS_PER_CHAR);
        sheet.empty("Column", &[("ss:Width", &points)])?;
    }

    let merge = (COLUMN_COUNT - 1).to_string();
    sheet.start("Row", &[("ss:Height", "22")])?;
    sheet.cell(TITLE, "title", &[("ss:MergeAcross", &merge)])?;
    sheet.end("Row")?;

    let subtitle = format!(
        "Generated on: {} | Total Tasks: {}",
        now.format("%B %d, %Y at %I:%M %p"),
        records.len()
    );
    sheet.start("Row", &[])?;
    sheet.cell(&subtitle, "subtitle", &[("ss:MergeAcross", &merge)])?;
    sheet.end("Row")?;

    sheet.empty("Row", &[])?;

    sheet.start("Row", &[("ss:Height", HEADER_ROW_HEIGHT)])?;
    for (label, _) in COLUMNS {
        sheet.cell(label, "header", &[])?;
    }
    sheet.end("Row")?;

    let stamp = now.format(ROW_TIMESTAMP_FORMAT).to_string();
    for record in records {
        let band = PriorityBand::for_priority(record.priority);
        let band_style = format!("priority{}", record.priority);

        sheet.start("Row", &[("ss:Height", DATA_ROW_HEIGHT)])?;
        sheet.cell(&record.original, "data", &[])?;
        sheet.cell(&record.summary, "data", &[])?;
        sheet.cell(&record.tags_text(), "tags", &[])?;
        sheet.cell(band.label, &band_style, &[])?;
        sheet.number_cell(&record.priority.to_string(), &band_style)?;
        sheet.cell(&stamp, "centered", &[])?;
        sheet.end("Row")?;
    }

    sheet.end("Table")?;
    sheet.end("Worksheet")?;
    sheet.end("Workbook")?;

    Ok(sheet.finish())
}

fn write_styles(sheet: &mut SheetWriter) -> TaggerResult<()> {
    sheet.start("Styles", &[])?;

    sheet.start("Style", &[("ss:ID", "title")])?;
    sheet.font("14", &[("ss:Bold", "1"), ("ss:Color", "#1E40AF")])?;
    sheet.end("Style")?;

    sheet.start("Style", &[("ss:ID", "subtitle")])?;
    sheet.font("10", &[("ss:Italic", "1"), ("ss:Color", "#64748B")])?;
    sheet.end("Style")?;

    sheet.start("Style", &[("ss:ID", "header")])?;
    sheet.alignment("Center", "Center", false)?;
    sheet.borders()?;
    sheet.font("12", &[("ss:Bold", "1"), ("ss:Color", "#FFFFFF")])?;
    sheet.interior("#1E40AF")?;
    sheet.end("Style")?;

    sheet.start("Style", &[("ss:ID", "data")])?;
    sheet.alignment("Left", "Top", true)?;
    sheet.borders()?;
    sheet.font("10", &[])?;
    sheet.end("Style")?;

    sheet.start("Style", &[("ss:ID", "tags")])?;
    sheet.alignment("Left", "Top", true)?;
    sheet.borders()?;
    sheet.font("10", &[("ss:Italic", "1"), ("ss:Color", "#2563EB")])?;
    sheet.end("Style")?;

    sheet.start("Style", &[("ss:ID", "centered")])?;
    sheet.alignment("Center", "Center", false)?;
    sheet.borders()?;
    sheet.font("10", &[])?;
    sheet.end("Style")?;

    for (idx, band) in PRIORITY_BANDS.iter().enumerate() {
        let id = format!("priority{}", idx + 1);
        let text_color = format!("#{}", band.foreground);
        sheet.start("Style", &[("ss:ID", &id)])?;
        sheet.alignment("Center", "Center", false)?;
        sheet.borders()?;
        sheet.font("10", &[("ss:Bold", "1"), ("ss:Color", &text_color)])?;
        sheet.interior(&format!("#{}", band.background))?;
        sheet.end("Style")?;
    }

    sheet.end("Styles")
}

fn xml_error(err: impl std::fmt::Display) -> TaggerError {
    TaggerError::Export(format!("failed to write spreadsheet: {err}"))
}

/// Thin event writer over an in-memory buffer
struct SheetWriter {
    writer: Writer<Vec<u8>>,
}

impl SheetWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 1),
        }
    }

    fn write(&mut self, event: Event<'_>) -> TaggerResult<()> {
        self.writer.write_event(event).map_err(xml_error)
    }

    fn decl(&mut self) -> TaggerResult<()> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    fn pi(&mut self, content: &str) -> TaggerResult<()> {
        self.write(Event::PI(BytesPI::new(content)))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> TaggerResult<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Start(elem))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> TaggerResult<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Empty(elem))
    }

    fn end(&mut self, name: &str) -> TaggerResult<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn data(&mut self, kind: &str, value: &str) -> TaggerResult<()> {
        self.start("Data", &[("ss:Type", kind)])?;
        self.write(Event::Text(BytesText::new(value)))?;
        self.end("Data")
    }

    fn cell(&mut self, value: &str, style: &str, extra: &[(&str, &str)]) -> TaggerResult<()> {
        let mut attrs = vec![("ss:StyleID", style)];
        attrs.extend_from_slice(extra);
        self.start("Cell", &attrs)?;
        self.data("String", value)?;
        self.end("Cell")
    }

    fn number_cell(&mut self, value: &str, style: &str) -> TaggerResult<()> {
        self.start("Cell", &[("ss:StyleID", style)])?;
        self.data("Number", value)?;
        self.end("Cell")
    }

    fn font(&mut self, size: &str, extra: &[(&str, &str)]) -> TaggerResult<()> {
        let mut attrs = vec![("ss:FontName", FONT), ("ss:Size", size)];
        attrs.extend_from_slice(extra);
        self.empty("Font", &attrs)
    }

    fn alignment(&mut self, horizontal: &str, vertical: &str, wrap: bool) -> TaggerResult<()> {
        let mut attrs = vec![("ss:Horizontal", horizontal), ("ss:Vertical", vertical)];
        if wrap {
            attrs.push(("ss:WrapText", "1"));
        }
        self.empty("Alignment", &attrs)
    }

    fn interior(&mut self, color: &str) -> TaggerResult<()> {
        self.empty("Interior", &[("ss:Color", color), ("ss:Pattern", "Solid")])
    }

    fn borders(&mut self) -> TaggerResult<()> {
        self.start("Borders", &[])?;
        for position in ["Left", "Right", "Top", "Bottom"] {
            self.empty(
                "Border",
                &[
                    ("ss:Position", position),
                    ("ss:LineStyle", "Continuous"),
                    ("ss:Weight", "1"),
                    ("ss:Color", BORDER_COLOR),
                ],
            )?;
        }
        self.end("Borders")
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}
