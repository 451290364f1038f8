//! CSV rendering of report rows.
//!
//! Fields are quoted only when they contain a comma, a double quote or a line
//! break; embedded quotes are doubled.

use crate::store::{CharCountByWordsRow, RollingCharCountRow, TopWordsRow};

/// Trailing characters stripped from a rolling-count `char_value`.
const CHAR_VALUE_TRIM: [char; 6] = ['\n', '\r', '\t', '*', '`', '\u{B4}'];

/// A report row that can be written as one CSV record.
pub trait CsvRecord {
    const HEADER: &'static [&'static str];

    fn fields(&self) -> Vec<String>;
}

impl CsvRecord for TopWordsRow {
    const HEADER: &'static [&'static str] = &["filePath", "word", "wordCount"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.file_path.clone(),
            self.word.clone(),
            self.word_count.to_string(),
        ]
    }
}

impl CsvRecord for RollingCharCountRow {
    const HEADER: &'static [&'static str] = &["filePath", "charValue", "runningTotal", "ranking"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.file_path.clone(),
            self.char_value.trim_end_matches(CHAR_VALUE_TRIM).to_string(),
            self.running_total.to_string(),
            self.ranking.to_string(),
        ]
    }
}

impl CsvRecord for CharCountByWordsRow {
    const HEADER: &'static [&'static str] = &["filePath", "word", "charCount"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.file_path.clone(),
            self.word.clone(),
            self.char_count.to_string(),
        ]
    }
}

/// Renders a header line followed by one line per row.
pub fn render<R: CsvRecord>(rows: &[R]) -> String {
    let mut out = String::new();
    push_record(&mut out, R::HEADER.iter().copied());
    for row in rows {
        let fields = row.fields();
        push_record(&mut out, fields.iter().map(String::as_str));
    }
    out
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push('\n');
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
