//! Word and line splitting.

/// Characters that separate words.
///
/// Includes the SUB control character (0x1A) and the acute accent (U+00B4),
/// both of which show up in text exported from older editors.
pub const DELIMITERS: [char; 22] = [
    ' ', '\n', '\r', '\t', ',', '.', '?', '!', '\'', '"', '\u{1A}', '*', '`', '\u{B4}', '(',
    ')', '[', ']', '-', ':', ';', '_',
];

/// Returns `true` if `c` separates words.
pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Splits text into words, in order of occurrence.
///
/// A word is a maximal run of non-delimiter characters; empty runs between
/// adjacent delimiters are dropped.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(is_delimiter)
        .filter(|word| !word.is_empty())
        .collect()
}

/// Splits text on `'\n'` only, keeping empty lines.
///
/// A trailing `'\r'` stays part of its line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}
