//! Report export.
//!
//! Runs one of the aggregate reports against a [`ReportSource`] and writes the
//! rows as CSV into the output directory. A report without rows writes nothing.

pub mod csv;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::store::{ReportSource, StoreError};
use csv::{CsvRecord, render};

/// The available reports and their parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    TopWords { max_words: u32 },
    RollingCharCount { ceiling: u32 },
    CharCountByWords,
}

impl ReportKind {
    /// Name of the CSV file the report is written to.
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportKind::TopWords { .. } => "TopWords.csv",
            ReportKind::RollingCharCount { .. } => "RollingCharCount.csv",
            ReportKind::CharCountByWords => "CharCountByWords.csv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, rows: usize },
    NoRows,
}

impl fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportOutcome::Written { path, rows } => {
                write!(f, "Wrote {} row(s) to {}", rows, path.display())
            }
            ExportOutcome::NoRows => write!(f, "No rows found."),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Writing {} failed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub struct ReportExporter<S: ReportSource> {
    source: S,
    output_dir: PathBuf,
}

impl<S: ReportSource> ReportExporter<S> {
    pub fn new(source: S, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Runs `kind` and writes its CSV file if there are rows.
    pub fn export(&mut self, kind: ReportKind) -> Result<ExportOutcome, ReportError> {
        debug!(report = ?kind, "running report");
        match kind {
            ReportKind::TopWords { max_words } => {
                let rows = self.source.top_words(max_words)?;
                self.write(kind, &rows)
            }
            ReportKind::RollingCharCount { ceiling } => {
                let rows = self.source.rolling_char_count(ceiling)?;
                self.write(kind, &rows)
            }
            ReportKind::CharCountByWords => {
                let rows = self.source.char_count_by_words()?;
                self.write(kind, &rows)
            }
        }
    }

    fn write<R: CsvRecord>(&self, kind: ReportKind, rows: &[R]) -> Result<ExportOutcome, ReportError> {
        if rows.is_empty() {
            return Ok(ExportOutcome::NoRows);
        }

        let path = self.output_dir.join(kind.file_name());
        std::fs::write(&path, render(rows)).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), rows = rows.len(), "report written");

        Ok(ExportOutcome::Written {
            path,
            rows: rows.len(),
        })
    }
}
