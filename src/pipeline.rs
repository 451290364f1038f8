//! Directory walk that rewrites each file and stores its statistics.
//!
//! Per file: read → mutate → rewrite → re-read → count → persist. The walk is
//! one level deep and visits files in listing order. File I/O problems end
//! only the affected file; a store failure ends the whole run.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::fs::FileSystem;
use crate::store::{PersistenceGateway, StoreError};
use crate::text::{Document, TextTotals, count_words, counts_for_persistence};

/// Why a single file could not be processed.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("read failed: {0}")]
    Read(#[source] io::Error),
    #[error("rewrite failed: {0}")]
    Write(#[source] io::Error),
    #[error("re-read after rewrite failed: {0}")]
    Reread(#[source] io::Error),
}

/// Errors that stop the whole run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Directory {} not found!", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("Directory {} is empty.", .0.display())]
    EmptyDirectory(PathBuf),
    #[error("Directory {} could not be listed: {source}", .path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Storing results for {} failed: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: StoreError,
    },
}

/// Statistics of a file that was processed successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    pub totals: TextTotals,
    pub distinct_chars: usize,
    pub distinct_words: usize,
}

/// Result of processing one file.
#[derive(Debug)]
pub enum FileOutcome {
    Done(FileStats),
    /// The file disappeared between listing and reading.
    Skipped(String),
    Failed(FileError),
}

impl FileOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, FileOutcome::Done(_))
    }
}

/// Outcome of every file visited in a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files: Vec<(PathBuf, FileOutcome)>,
}

impl RunSummary {
    pub fn done(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Done(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|(_, o)| pred(o)).count()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} file(s): {} done, {} skipped, {} failed",
            self.files.len(),
            self.done(),
            self.skipped(),
            self.failed()
        )
    }
}

pub struct Pipeline<F: FileSystem, G: PersistenceGateway> {
    fs: F,
    gateway: G,
}

impl<F: FileSystem, G: PersistenceGateway> Pipeline<F, G> {
    pub fn new(fs: F, gateway: G) -> Self {
        Self { fs, gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn into_parts(self) -> (F, G) {
        (self.fs, self.gateway)
    }

    /// Processes every file directly inside `dir`.
    ///
    /// `on_file` is called right after each file finishes, before the next
    /// one starts.
    pub fn run(
        &mut self,
        dir: &Path,
        mut on_file: impl FnMut(&Path, &FileOutcome),
    ) -> Result<RunSummary, RunError> {
        if !self.fs.is_dir(dir) {
            return Err(RunError::DirectoryNotFound(dir.to_path_buf()));
        }

        let files = self.fs.list_files(dir).map_err(|source| RunError::Listing {
            path: dir.to_path_buf(),
            source,
        })?;
        if files.is_empty() {
            return Err(RunError::EmptyDirectory(dir.to_path_buf()));
        }
        info!(dir = %dir.display(), files = files.len(), "processing directory");

        let mut summary = RunSummary::default();
        for path in files {
            let outcome = self.process_file(&path)?;
            on_file(&path, &outcome);
            summary.files.push((path, outcome));
        }

        info!(
            done = summary.done(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            "directory processed"
        );
        Ok(summary)
    }

    /// Runs one file through the pipeline.
    ///
    /// Only store failures are returned as `Err`; everything else ends up in
    /// the outcome.
    pub fn process_file(&mut self, path: &Path) -> Result<FileOutcome, RunError> {
        let start_time = Utc::now();

        let text = match self.fs.read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "file vanished before it could be read");
                return Ok(FileOutcome::Skipped("file vanished".to_string()));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read file");
                return Ok(FileOutcome::Failed(FileError::Read(e)));
            }
        };

        let mut document = Document::parse(path, &text);
        document.mutate();
        if let Err(e) = self.fs.write(path, &document.render()) {
            warn!(path = %path.display(), error = %e, "failed to rewrite file");
            return Ok(FileOutcome::Failed(FileError::Write(e)));
        }
        debug!(path = %path.display(), lines = document.lines().len(), "file rewritten");

        let updated = match self.fs.read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to re-read file");
                return Ok(FileOutcome::Failed(FileError::Reread(e)));
            }
        };

        let totals = TextTotals::of(&updated);
        let char_counts = counts_for_persistence(&updated);
        let word_counts = count_words(&updated);

        let persist_err = |source| RunError::Persistence {
            path: path.to_path_buf(),
            source,
        };
        self.gateway
            .record_processing(path, &updated, start_time)
            .map_err(persist_err)?;
        self.gateway
            .record_char_counts(path, &char_counts)
            .map_err(persist_err)?;
        self.gateway
            .record_word_counts(path, &word_counts)
            .map_err(persist_err)?;

        Ok(FileOutcome::Done(FileStats {
            totals,
            distinct_chars: char_counts.len(),
            distinct_words: word_counts.len(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFs;
    use crate::store::MemoryStore;
    use crate::store::memory::StoreOp;

    fn pipeline(fs: MockFs) -> Pipeline<MockFs, MemoryStore> {
        Pipeline::new(fs, MemoryStore::new())
    }

    fn run(p: &mut Pipeline<MockFs, MemoryStore>, dir: &str) -> Result<RunSummary, RunError> {
        p.run(Path::new(dir), |_, _| {})
    }

    #[test]
    fn rewrites_file_and_persists_post_mutation_statistics() {
        let mut fs = MockFs::new();
        fs.add_file("/docs/a.txt", "a cat\n\nTake time");
        let mut p = pipeline(fs);

        let summary = run(&mut p, "/docs").unwrap();
        assert_eq!(summary.done(), 1);

        let (fs, store) = p.into_parts();
        let expected = "\u{E4} c\u{E4}t\n\nek\u{E4}T emit\n";
        assert_eq!(fs.contents("/docs/a.txt"), Some(expected));

        assert_eq!(store.processed.len(), 1);
        assert_eq!(store.processed[0].file_path, PathBuf::from("/docs/a.txt"));
        assert_eq!(store.processed[0].mutated_text, expected);

        let (_, chars) = &store.char_counts[0];
        assert_eq!(chars.get(&'\u{E4}'), Some(&3));
        assert_eq!(chars.get(&'a'), None);
        assert_eq!(chars.get(&'\n'), None);

        let (_, words) = &store.word_counts[0];
        assert_eq!(words.get("ekät"), Some(&1));
        assert_eq!(words.get("emit"), Some(&1));
        assert_eq!(words.get("cät"), Some(&1));
    }

    #[test]
    fn reports_totals_including_line_feeds() {
        let mut fs = MockFs::new();
        fs.add_file("/docs/a.txt", "one two");
        let mut p = pipeline(fs);

        let summary = run(&mut p, "/docs").unwrap();
        match &summary.files[0].1 {
            FileOutcome::Done(stats) => {
                assert_eq!(stats.totals.char_count, 8);
                assert_eq!(stats.totals.word_count, 2);
                assert_eq!(stats.distinct_words, 2);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn missing_directory_aborts() {
        let mut p = pipeline(MockFs::new());
        assert!(matches!(
            run(&mut p, "/nowhere"),
            Err(RunError::DirectoryNotFound(path)) if path == Path::new("/nowhere")
        ));
    }

    #[test]
    fn empty_directory_aborts() {
        let mut fs = MockFs::new();
        fs.add_dir("/docs");
        fs.add_file("/docs/sub/deep.txt", "ignored");
        let mut p = pipeline(fs);

        let err = run(&mut p, "/docs").unwrap_err();
        assert!(matches!(err, RunError::EmptyDirectory(_)));
        assert_eq!(err.to_string(), "Directory /docs is empty.");
    }

    #[test]
    fn vanished_file_is_skipped_and_run_continues() {
        let mut fs = MockFs::new();
        fs.add_vanished_file("/docs/gone.txt");
        fs.add_file("/docs/kept.txt", "kept");
        let mut p = pipeline(fs);

        let summary = run(&mut p, "/docs").unwrap();
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.done(), 1);
        assert_eq!(p.gateway().processed.len(), 1);
        assert_eq!(
            p.gateway().processed[0].file_path,
            PathBuf::from("/docs/kept.txt")
        );
    }

    #[test]
    fn write_failure_fails_only_that_file() {
        let mut fs = MockFs::new();
        fs.add_file("/docs/locked.txt", "banana");
        fs.add_file("/docs/open.txt", "banana");
        fs.set_read_only("/docs/locked.txt");
        let mut p = pipeline(fs);

        let summary = run(&mut p, "/docs").unwrap();
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.done(), 1);

        let failed = summary
            .files
            .iter()
            .find(|(_, o)| !o.is_done())
            .map(|(path, _)| path.clone());
        assert_eq!(failed, Some(PathBuf::from("/docs/locked.txt")));

        let (fs, _) = p.into_parts();
        assert_eq!(fs.contents("/docs/locked.txt"), Some("banana"));
        assert_eq!(fs.contents("/docs/open.txt"), Some("b\u{E4}n\u{E4}n\u{E4}\n"));
    }

    #[test]
    fn persistence_failure_aborts_without_rolling_back() {
        let mut fs = MockFs::new();
        fs.add_file("/docs/a.txt", "text");
        let store = MemoryStore::new().fail_on(StoreOp::RecordWordCounts);
        let mut p = Pipeline::new(fs, store);

        let err = run(&mut p, "/docs").unwrap_err();
        assert!(matches!(err, RunError::Persistence { .. }));

        // Earlier writes for the same file stay.
        assert_eq!(p.gateway().processed.len(), 1);
        assert_eq!(p.gateway().char_counts.len(), 1);
        assert!(p.gateway().word_counts.is_empty());
    }

    #[test]
    fn callback_sees_each_file_once() {
        let mut fs = MockFs::new();
        fs.add_file("/docs/a.txt", "a");
        fs.add_file("/docs/b.txt", "b");
        fs.add_vanished_file("/docs/c.txt");
        let mut p = pipeline(fs);

        let mut seen = Vec::new();
        p.run(Path::new("/docs"), |path, _| seen.push(path.to_path_buf()))
            .unwrap();
        seen.sort();
        assert_eq!(
            seen,
            vec![
                PathBuf::from("/docs/a.txt"),
                PathBuf::from("/docs/b.txt"),
                PathBuf::from("/docs/c.txt"),
            ]
        );
    }

    #[test]
    fn summary_line() {
        let mut summary = RunSummary::default();
        summary.files.push((
            PathBuf::from("/d/a"),
            FileOutcome::Skipped("file vanished".to_string()),
        ));
        assert_eq!(
            summary.to_string(),
            "Processed 1 file(s): 0 done, 1 skipped, 0 failed"
        );
    }
}
