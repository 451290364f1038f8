//! In-memory store for tests and dry runs.
//!
//! Keeps every record it receives and serves report rows that were loaded in
//! advance. Individual operations can be made to fail to exercise error paths.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::{
    CharCountByWordsRow, PersistenceGateway, ReportSource, RollingCharCountRow, StoreError,
    TopWordsRow,
};
use crate::text::{CharacterFrequency, WordFrequency};

/// Store operations, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    RecordProcessing,
    RecordCharCounts,
    RecordWordCounts,
    Reports,
}

/// A processed-file record as received by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedRecord {
    pub file_path: PathBuf,
    pub mutated_text: String,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub processed: Vec<ProcessedRecord>,
    pub char_counts: Vec<(PathBuf, CharacterFrequency)>,
    pub word_counts: Vec<(PathBuf, WordFrequency)>,
    top_words: Vec<TopWordsRow>,
    rolling_char_count: Vec<RollingCharCountRow>,
    char_count_by_words: Vec<CharCountByWordsRow>,
    failing: HashSet<StoreOp>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call of `op` fail with a query error.
    pub fn fail_on(mut self, op: StoreOp) -> Self {
        self.failing.insert(op);
        self
    }

    pub fn with_top_words(mut self, rows: Vec<TopWordsRow>) -> Self {
        self.top_words = rows;
        self
    }

    pub fn with_rolling_char_count(mut self, rows: Vec<RollingCharCountRow>) -> Self {
        self.rolling_char_count = rows;
        self
    }

    pub fn with_char_count_by_words(mut self, rows: Vec<CharCountByWordsRow>) -> Self {
        self.char_count_by_words = rows;
        self
    }

    fn check(&self, op: StoreOp) -> Result<(), StoreError> {
        if self.failing.contains(&op) {
            return Err(StoreError::Query(format!("{:?} rejected", op)));
        }
        Ok(())
    }
}

impl PersistenceGateway for MemoryStore {
    fn record_processing(
        &mut self,
        file_path: &Path,
        mutated_text: &str,
        start_time: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.check(StoreOp::RecordProcessing)?;
        self.processed.push(ProcessedRecord {
            file_path: file_path.to_path_buf(),
            mutated_text: mutated_text.to_string(),
            start_time,
        });
        Ok(())
    }

    fn record_char_counts(
        &mut self,
        file_path: &Path,
        counts: &CharacterFrequency,
    ) -> Result<(), StoreError> {
        self.check(StoreOp::RecordCharCounts)?;
        self.char_counts
            .push((file_path.to_path_buf(), counts.clone()));
        Ok(())
    }

    fn record_word_counts(
        &mut self,
        file_path: &Path,
        counts: &WordFrequency,
    ) -> Result<(), StoreError> {
        self.check(StoreOp::RecordWordCounts)?;
        self.word_counts
            .push((file_path.to_path_buf(), counts.clone()));
        Ok(())
    }
}

impl ReportSource for MemoryStore {
    /// Returns the loaded rows, keeping at most `max_words` per file.
    fn top_words(&mut self, max_words: u32) -> Result<Vec<TopWordsRow>, StoreError> {
        self.check(StoreOp::Reports)?;
        let limit = max_words as usize;
        let mut per_file: HashMap<&str, usize> = HashMap::new();
        let mut rows = Vec::new();
        for row in &self.top_words {
            let seen = per_file.entry(row.file_path.as_str()).or_insert(0);
            if *seen < limit {
                *seen += 1;
                rows.push(row.clone());
            }
        }
        Ok(rows)
    }

    /// Returns the loaded rows whose running total does not exceed `ceiling`.
    fn rolling_char_count(&mut self, ceiling: u32) -> Result<Vec<RollingCharCountRow>, StoreError> {
        self.check(StoreOp::Reports)?;
        Ok(self
            .rolling_char_count
            .iter()
            .filter(|row| row.running_total <= i64::from(ceiling))
            .cloned()
            .collect())
    }

    fn char_count_by_words(&mut self) -> Result<Vec<CharCountByWordsRow>, StoreError> {
        self.check(StoreOp::Reports)?;
        Ok(self.char_count_by_words.clone())
    }
}
