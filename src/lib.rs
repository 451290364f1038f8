//! textmill - batch text rewriting and word statistics.
//!
//! Provides:
//! - `text`: tokenizing, line rewriting rules, frequency counting
//! - `fs`: filesystem abstraction (real and in-memory)
//! - `pipeline`: per-directory processing of text files
//! - `store`: persistence and report boundary (PostgreSQL, in-memory)
//! - `report`: CSV export of the aggregate reports
//! - `cli`: interpretation of the command-line target

pub mod cli;
pub mod fs;
pub mod pipeline;
pub mod report;
pub mod store;
pub mod text;
