//! Character and word frequency tables.
//!
//! Character counts come in two flavours. The display counts include every
//! code point and back the per-file console totals. The persisted counts leave
//! out `'\n'` and SUB (0x1A), which the report queries do not expect to see.

use std::collections::HashMap;

use super::tokenize::split_words;

/// Case-sensitive count per character.
pub type CharacterFrequency = HashMap<char, u64>;

/// Count per lowercased word.
pub type WordFrequency = HashMap<String, u64>;

/// Characters left out of the persisted character counts.
pub const NOT_PERSISTED: [char; 2] = ['\n', '\u{1A}'];

/// Counts every character of `text`, case-sensitively, whitespace included.
pub fn count_chars(text: &str) -> CharacterFrequency {
    let mut counts = CharacterFrequency::new();
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Character counts as shown on the console.
pub fn counts_for_display(text: &str) -> CharacterFrequency {
    count_chars(text)
}

/// Character counts as handed to the persistence gateway.
pub fn counts_for_persistence(text: &str) -> CharacterFrequency {
    let mut counts = count_chars(text);
    counts.retain(|c, _| !NOT_PERSISTED.contains(c));
    counts
}

/// Counts words case-insensitively.
///
/// Words that consist only of whitespace (e.g. a lone no-break space) are
/// skipped.
pub fn count_words(text: &str) -> WordFrequency {
    let mut counts = WordFrequency::new();
    for word in split_words(text) {
        if word.trim().is_empty() {
            continue;
        }
        *counts.entry(word.to_lowercase()).or_insert(0) += 1;
    }
    counts
}

/// Character counts ordered by character.
pub fn sorted_chars(counts: &CharacterFrequency) -> Vec<(char, u64)> {
    let mut entries: Vec<(char, u64)> = counts.iter().map(|(c, n)| (*c, *n)).collect();
    entries.sort_unstable();
    entries
}

/// Word counts ordered by word.
pub fn sorted_words(counts: &WordFrequency) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = counts.iter().map(|(w, n)| (w.as_str(), *n)).collect();
    entries.sort_unstable();
    entries
}

/// Totals printed for each processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextTotals {
    pub char_count: u64,
    pub word_count: u64,
}

impl TextTotals {
    /// Computes the totals over `text` using the display counts.
    pub fn of(text: &str) -> Self {
        Self {
            char_count: counts_for_display(text).values().sum(),
            word_count: split_words(text).len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::mutate::substitute_chars;

    #[test]
    fn count_chars_is_case_sensitive() {
        let counts = count_chars("aAa");
        assert_eq!(counts.get(&'a'), Some(&2));
        assert_eq!(counts.get(&'A'), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn counts_reflect_mutated_text() {
        let mutated = substitute_chars("aAa");
        let counts = count_chars(&mutated);
        assert_eq!(counts.get(&'\u{E4}'), Some(&2));
        assert_eq!(counts.get(&'A'), Some(&1));
        assert_eq!(counts.get(&'a'), None);
    }

    #[test]
    fn count_chars_includes_whitespace() {
        let counts = count_chars("a b\n");
        assert_eq!(counts.get(&' '), Some(&1));
        assert_eq!(counts.get(&'\n'), Some(&1));
    }

    #[test]
    fn persistence_counts_drop_line_feed_and_sub() {
        let text = "ab\n\u{1A}\r\n";
        let display = counts_for_display(text);
        let persisted = counts_for_persistence(text);

        assert_eq!(display.get(&'\n'), Some(&2));
        assert_eq!(display.get(&'\u{1A}'), Some(&1));
        assert_eq!(persisted.get(&'\n'), None);
        assert_eq!(persisted.get(&'\u{1A}'), None);
        assert_eq!(persisted.get(&'\r'), Some(&1));
        assert_eq!(persisted.get(&'a'), Some(&1));
    }

    #[test]
    fn count_words_is_case_insensitive() {
        let counts = count_words("Cat cat CAT.");
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("cat"), Some(&3));
    }

    #[test]
    fn count_words_skips_whitespace_only_words() {
        let counts = count_words("one \u{A0} two\u{B}");
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("one"), Some(&1));
        assert_eq!(counts.get("two\u{B}"), Some(&1));
    }

    #[test]
    fn empty_text_has_no_counts() {
        assert!(count_chars("").is_empty());
        assert!(count_words("").is_empty());
        assert_eq!(
            TextTotals::of(""),
            TextTotals {
                char_count: 0,
                word_count: 0
            }
        );
    }

    #[test]
    fn sorted_helpers_are_deterministic() {
        let chars = count_chars("cabca");
        assert_eq!(sorted_chars(&chars), vec![('a', 2), ('b', 1), ('c', 2)]);

        let words = count_words("beta Alpha beta");
        assert_eq!(sorted_words(&words), vec![("alpha", 1), ("beta", 2)]);
    }

    #[test]
    fn totals_count_every_character() {
        let totals = TextTotals::of("Hi there.\n\u{1A}");
        assert_eq!(totals.char_count, 11);
        assert_eq!(totals.word_count, 2);
    }
}
