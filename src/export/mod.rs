//! Export Formatters
//!
//! Turn classified records into downloadable tables. No decision logic lives
//! here; records are written exactly as the processor produced them.

use crate::error::{TaggerError, TaggerResult};
use crate::record::{ClassificationRecord, Priority};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::info;

pub mod csv;
pub mod spreadsheet;

/// Timestamp written into every exported row
pub const ROW_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Presentation style for one priority value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityBand {
    pub label: &'static str,
    /// Background colour, RGB hex without `#`
    pub background: &'static str,
    /// Text colour, RGB hex without `#`
    pub foreground: &'static str,
}

/// Bands for priorities 1 through 5
pub const PRIORITY_BANDS: [PriorityBand; 5] = [
    PriorityBand {
        label: "Low",
        background: "D4F6D4",
        foreground: "0D5016",
    },
    PriorityBand {
        label: "Low-Medium",
        background: "E8F5E8",
        foreground: "1B5E20",
    },
    PriorityBand {
        label: "Medium",
        background: "FFF8DC",
        foreground: "8B6914",
    },
    PriorityBand {
        label: "High",
        background: "FFE4E1",
        foreground: "B71C1C",
    },
    PriorityBand {
        label: "Urgent",
        background: "FFCDD2",
        foreground: "8B0000",
    },
];

impl PriorityBand {
    pub fn for_priority(priority: Priority) -> &'static PriorityBand {
        &PRIORITY_BANDS[usize::from(priority.value()) - 1]
    }
}

/// Supported export artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated table
    Csv,
    /// Styled Excel XML workbook
    Spreadsheet,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Spreadsheet => "xml",
        }
    }

    /// Timestamped file name, e.g. `processed_tasks_20240131_094500.csv`
    pub fn default_file_name(&self, now: &NaiveDateTime) -> String {
        let stamp = now.format("%Y%m%d_%H%M%S");
        match self {
            ExportFormat::Csv => format!("processed_tasks_{stamp}.csv"),
            ExportFormat::Spreadsheet => format!("AI_Processed_Tasks_{stamp}.xml"),
        }
    }

    /// Render records into file contents
    pub fn render(
        &self,
        records: &[ClassificationRecord],
        now: &NaiveDateTime,
    ) -> TaggerResult<Vec<u8>> {
        if records.is_empty() {
            return Err(TaggerError::NothingToExport);
        }
        match self {
            ExportFormat::Csv => Ok(csv::render(records, now).into_bytes()),
            ExportFormat::Spreadsheet => spreadsheet::render(records, now),
        }
    }

    /// Write the export to `target`.
    ///
    /// A directory target receives a file with the default name. Returns the
    /// path actually written.
    pub fn write_to(
        &self,
        target: &Path,
        records: &[ClassificationRecord],
        now: &NaiveDateTime,
    ) -> TaggerResult<PathBuf> {
        let bytes = self.render(records, now)?;

        let path = if target.is_dir() {
            target.join(self.default_file_name(now))
        } else {
            target.to_path_buf()
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, bytes)?;

        info!("📄 Exported {} task(s) to {}", records.len(), path.display());
        Ok(path)
    }
}
