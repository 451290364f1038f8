use std::path::{Path, PathBuf};

use super::mutate::mutate_lines;
use super::tokenize::split_lines;

/// The lines of one text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    lines: Vec<String>,
}

impl Document {
    /// Splits `text` into lines on `'\n'`, blank lines included.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            lines: split_lines(text).into_iter().map(str::to_owned).collect(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Applies the substitution and reversal rules to every line.
    pub fn mutate(&mut self) {
        mutate_lines(&mut self.lines);
    }

    /// Renders the document for writing back, one `'\n'`-terminated record
    /// per line.
    ///
    /// Text that already ended in `'\n'` parses with a trailing empty line,
    /// so every rewrite of such a file appends one more line feed.
    pub fn render(&self) -> String {
        let capacity = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = String::with_capacity(capacity);
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
