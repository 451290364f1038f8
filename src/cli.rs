//! Interpretation of the command-line target.
//!
//! The single positional argument is either a directory to process or a
//! report selector:
//! - `--1:<max_words>`: top words per file
//! - `--2:<ceiling>`: rolling character count
//! - `--3`: character count by words
//! - `--?`: usage
//!
//! The selector is the character right after `--`; a parameter follows a `:`
//! immediately after it.

use std::path::PathBuf;

use thiserror::Error;

use crate::report::ReportKind;

pub const USAGE: &str = "Usage: textmill [dir_path | --1:max_words | --2:ceiling | --3 | --?]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Usage,
    Process(PathBuf),
    Report(ReportKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A report parameter is missing, not a number or negative.
    #[error("Please note that parameter '{0}' is required to call this procedure.")]
    MalformedParameter(&'static str),
}

/// Parses the positional target; `None` or an empty string means usage.
pub fn parse_command(target: Option<&str>) -> Result<Command, CommandError> {
    let Some(target) = target.filter(|t| !t.is_empty()) else {
        return Ok(Command::Usage);
    };

    let Some(selector) = target.strip_prefix("--").filter(|s| !s.is_empty()) else {
        return Ok(Command::Process(PathBuf::from(target)));
    };

    match selector.chars().next() {
        Some('1') => {
            let max_words = parse_param(selector, "maxWords")?;
            Ok(Command::Report(ReportKind::TopWords { max_words }))
        }
        Some('2') => {
            let ceiling = parse_param(selector, "ceiling")?;
            Ok(Command::Report(ReportKind::RollingCharCount { ceiling }))
        }
        Some('3') => Ok(Command::Report(ReportKind::CharCountByWords)),
        _ => Ok(Command::Usage),
    }
}

/// Reads `N` from `<digit>:N`.
fn parse_param(selector: &str, name: &'static str) -> Result<u32, CommandError> {
    selector
        .get(1..)
        .and_then(|rest| rest.strip_prefix(':'))
        .and_then(|value| value.parse::<i32>().ok())
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(CommandError::MalformedParameter(name))
}
