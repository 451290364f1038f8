//! Text rules: tokenizing, line rewriting and frequency counting.
//!
//! Everything here is pure; reading and writing files is the pipeline's job.

mod document;
pub mod frequency;
pub mod mutate;
pub mod tokenize;

pub use document::Document;
pub use frequency::{
    CharacterFrequency, TextTotals, WordFrequency, count_chars, count_words, counts_for_display,
    counts_for_persistence,
};
pub use mutate::mutate_lines;
pub use tokenize::{split_lines, split_words};
