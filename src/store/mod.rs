//! Relational store boundary.
//!
//! Two traits sit at the edge of the crate:
//! - [`PersistenceGateway`]: receives mutated text and the frequency tables
//!   of each processed file.
//! - [`ReportSource`]: runs the aggregate report queries.
//!
//! [`PgStore`] implements both against PostgreSQL; [`MemoryStore`] keeps
//! everything in memory for tests and dry runs. The table layout and the
//! report functions live in the database and are only referenced by name here
//! (see `queries`).

mod config;
pub mod memory;
mod pg;
mod queries;
mod rows;

use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::text::{CharacterFrequency, WordFrequency};

pub use config::StoreConfig;
pub use memory::MemoryStore;
pub use pg::PgStore;
pub use rows::{CharCountByWordsRow, RollingCharCountRow, TopWordsRow};

/// Error type for store access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Environment variable not set.
    #[error("PostgreSQL: {0} not set")]
    EnvNotSet(String),
    /// Connection failed.
    #[error("PostgreSQL: {0}")]
    Connection(String),
    /// Statement execution failed.
    #[error("PostgreSQL query error: {0}")]
    Query(String),
}

/// Receives the results of processing one file.
///
/// Each call is an independent insert. Nothing ties the three calls for one
/// file together, so a failing call leaves earlier ones in place.
pub trait PersistenceGateway {
    /// Records that `file_path` was processed, with its rewritten content.
    fn record_processing(
        &mut self,
        file_path: &Path,
        mutated_text: &str,
        start_time: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Records the per-character counts of a file.
    fn record_char_counts(
        &mut self,
        file_path: &Path,
        counts: &CharacterFrequency,
    ) -> Result<(), StoreError>;

    /// Records the per-word counts of a file.
    fn record_word_counts(
        &mut self,
        file_path: &Path,
        counts: &WordFrequency,
    ) -> Result<(), StoreError>;
}

/// Runs the named aggregate reports.
pub trait ReportSource {
    /// Most frequent words, at most `max_words` per file.
    fn top_words(&mut self, max_words: u32) -> Result<Vec<TopWordsRow>, StoreError>;

    /// Running character totals, capped at `ceiling`.
    fn rolling_char_count(&mut self, ceiling: u32) -> Result<Vec<RollingCharCountRow>, StoreError>;

    /// Character count of every stored word.
    fn char_count_by_words(&mut self) -> Result<Vec<CharCountByWordsRow>, StoreError>;
}

/// Renders a path the way it is stored in the `file_path` columns.
pub(crate) fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
