//! PostgreSQL-backed store.
//!
//! The connection is opened lazily on first use and dropped when the server
//! closes it, so the next call reconnects. All values travel as bound
//! parameters of prepared statements.

use std::path::Path;

use chrono::{DateTime, Utc};
use postgres::{Client, NoTls, Row};
use tracing::{debug, info};

use super::queries::{
    CHAR_COUNT_BY_WORDS, INSERT_CHAR_COUNT, INSERT_PROCESSED, INSERT_WORD_COUNT,
    ROLLING_CHAR_COUNT, TOP_WORDS,
};
use super::{
    CharCountByWordsRow, PersistenceGateway, ReportSource, RollingCharCountRow, StoreConfig,
    StoreError, TopWordsRow, path_key,
};
use crate::text::frequency::{sorted_chars, sorted_words};
use crate::text::{CharacterFrequency, WordFrequency};

/// Store that writes statistics to, and reads reports from, PostgreSQL.
pub struct PgStore {
    config: StoreConfig,
    client: Option<Client>,
    last_error: Option<String>,
}

impl PgStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            client: None,
            last_error: None,
        }
    }

    /// Attempts to connect to PostgreSQL.
    ///
    /// Useful as a startup check before any file is touched.
    pub fn try_connect(&mut self) -> Result<(), StoreError> {
        self.ensure_connected().map(|_| ())
    }

    /// Returns the last error message, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn ensure_connected(&mut self) -> Result<&mut Client, StoreError> {
        if self.client.is_none() {
            match Client::connect(self.config.connection_string(), NoTls) {
                Ok(client) => {
                    info!(connection = %self.config.redacted(), "connected to PostgreSQL");
                    self.client = Some(client);
                    self.last_error = None;
                }
                Err(e) => {
                    let msg = format_postgres_error(&e);
                    self.last_error = Some(msg.clone());
                    return Err(StoreError::Connection(msg));
                }
            }
        }

        self.client
            .as_mut()
            .ok_or_else(|| StoreError::Connection("not connected".to_string()))
    }

    /// Runs `op` on the connection, converting driver errors.
    fn with_client<T>(
        &mut self,
        op: impl FnOnce(&mut Client) -> Result<T, postgres::Error>,
    ) -> Result<T, StoreError> {
        let client = self.ensure_connected()?;
        match op(client) {
            Ok(value) => Ok(value),
            Err(e) => {
                let closed = client.is_closed();
                let msg = format_postgres_error(&e);
                if closed {
                    self.client = None;
                }
                self.last_error = Some(msg.clone());
                Err(StoreError::Query(msg))
            }
        }
    }
}

impl PersistenceGateway for PgStore {
    fn record_processing(
        &mut self,
        file_path: &Path,
        mutated_text: &str,
        start_time: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let key = path_key(file_path);
        self.with_client(|client| {
            client.execute(INSERT_PROCESSED, &[&key, &mutated_text, &start_time])
        })?;
        debug!(path = %key, "processing recorded");
        Ok(())
    }

    fn record_char_counts(
        &mut self,
        file_path: &Path,
        counts: &CharacterFrequency,
    ) -> Result<(), StoreError> {
        let key = path_key(file_path);
        let entries = sorted_chars(counts);
        self.with_client(|client| {
            let statement = client.prepare(INSERT_CHAR_COUNT)?;
            for (c, n) in &entries {
                let value = c.to_string();
                let count = to_bigint(*n);
                client.execute(&statement, &[&key, &value, &count])?;
            }
            Ok(())
        })?;
        debug!(path = %key, chars = entries.len(), "character counts recorded");
        Ok(())
    }

    fn record_word_counts(
        &mut self,
        file_path: &Path,
        counts: &WordFrequency,
    ) -> Result<(), StoreError> {
        let key = path_key(file_path);
        let entries = sorted_words(counts);
        self.with_client(|client| {
            let statement = client.prepare(INSERT_WORD_COUNT)?;
            for (word, n) in &entries {
                let count = to_bigint(*n);
                client.execute(&statement, &[&key, word, &count])?;
            }
            Ok(())
        })?;
        debug!(path = %key, words = entries.len(), "word counts recorded");
        Ok(())
    }
}

impl ReportSource for PgStore {
    fn top_words(&mut self, max_words: u32) -> Result<Vec<TopWordsRow>, StoreError> {
        let max_words = to_int("max_words", max_words)?;
        self.with_client(|client| {
            client
                .query(TOP_WORDS, &[&max_words])?
                .iter()
                .map(decode_top_words)
                .collect()
        })
    }

    fn rolling_char_count(&mut self, ceiling: u32) -> Result<Vec<RollingCharCountRow>, StoreError> {
        let ceiling = to_int("ceiling", ceiling)?;
        self.with_client(|client| {
            client
                .query(ROLLING_CHAR_COUNT, &[&ceiling])?
                .iter()
                .map(decode_rolling_char_count)
                .collect()
        })
    }

    fn char_count_by_words(&mut self) -> Result<Vec<CharCountByWordsRow>, StoreError> {
        self.with_client(|client| {
            client
                .query(CHAR_COUNT_BY_WORDS, &[])?
                .iter()
                .map(decode_char_count_by_words)
                .collect()
        })
    }
}

fn decode_top_words(row: &Row) -> Result<TopWordsRow, postgres::Error> {
    Ok(TopWordsRow {
        file_path: row.try_get(0)?,
        word: row.try_get(1)?,
        word_count: row.try_get(2)?,
    })
}

fn decode_rolling_char_count(row: &Row) -> Result<RollingCharCountRow, postgres::Error> {
    Ok(RollingCharCountRow {
        file_path: row.try_get(0)?,
        char_value: row.try_get(1)?,
        running_total: row.try_get(2)?,
        ranking: row.try_get(3)?,
    })
}

fn decode_char_count_by_words(row: &Row) -> Result<CharCountByWordsRow, postgres::Error> {
    Ok(CharCountByWordsRow {
        file_path: row.try_get(0)?,
        word: row.try_get(1)?,
        char_count: row.try_get(2)?,
    })
}

/// Converts a report parameter to the `int` the report functions take.
fn to_int(name: &str, value: u32) -> Result<i32, StoreError> {
    i32::try_from(value)
        .map_err(|_| StoreError::Query(format!("parameter '{}' out of range: {}", name, value)))
}

fn to_bigint(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

/// Formats PostgreSQL error message for display.
pub(crate) fn format_postgres_error(e: &postgres::Error) -> String {
    if let Some(db_error) = e.as_db_error() {
        format!("{}: {}", db_error.severity(), db_error.message())
    } else {
        let msg = e.to_string();
        if msg.contains("Connection refused") {
            "connection refused".to_string()
        } else if msg.contains("password authentication failed") {
            "password authentication failed".to_string()
        } else if msg.contains("does not exist") {
            msg.split("FATAL:")
                .last()
                .unwrap_or(&msg)
                .trim()
                .to_string()
        } else {
            msg
        }
    }
}
