//! In-place line rewriting.
//!
//! Every non-blank line gets its lowercase `a` replaced with `ä`. A blank
//! (or whitespace-only) line instead acts as a trigger: on the line right after
//! it, each word starting with `t` and ending with `e` is written backwards.
//!
//! Reversal uses plain substring replacement, so a qualifying word that also
//! occurs inside a longer word rewrites that part of the longer word too.

use super::tokenize::split_words;

/// Replacement for every lowercase `a` on a non-blank line.
pub const SUBSTITUTE_CHAR: char = '\u{E4}';

/// Returns `true` for lines that trigger reversal of the following line.
pub fn is_trigger_line(line: &str) -> bool {
    line.trim().is_empty()
}

/// Returns `true` for words starting with `t`/`T` and ending with `e`/`E`.
pub fn is_qualifying_token(token: &str) -> bool {
    match (token.chars().next(), token.chars().next_back()) {
        (Some(first), Some(last)) => {
            first.eq_ignore_ascii_case(&'t') && last.eq_ignore_ascii_case(&'e')
        }
        _ => false,
    }
}

/// Replaces every lowercase `a` with [`SUBSTITUTE_CHAR`].
pub fn substitute_chars(line: &str) -> String {
    line.replace('a', SUBSTITUTE_CHAR.encode_utf8(&mut [0; 4]))
}

/// Reverses every qualifying word of `line`.
///
/// Words are taken from the line as it was passed in. Each one is then
/// replaced, by literal substring match, in the line as rewritten so far.
pub fn reverse_qualifying_tokens(line: &str) -> String {
    let mut current = line.to_string();
    for token in split_words(line).into_iter().filter(|t| is_qualifying_token(t)) {
        let reversed: String = token.chars().rev().collect();
        current = current.replace(token, &reversed);
    }
    current
}

/// Applies the rewrite rules to all lines, top to bottom.
///
/// A trigger line reverses words on the line after it; that line is then
/// visited in turn and, unless blank itself, also gets its `a`s substituted.
/// A trigger on the last line has nothing to look at.
pub fn mutate_lines(lines: &mut [String]) {
    for i in 0..lines.len() {
        if is_trigger_line(&lines[i]) {
            if let Some(next) = lines.get(i + 1) {
                let reversed = reverse_qualifying_tokens(next);
                lines[i + 1] = reversed;
            }
        } else {
            lines[i] = substitute_chars(&lines[i]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn qualifying_token_is_case_insensitive_on_both_ends() {
        assert!(is_qualifying_token("The"));
        assert!(is_qualifying_token("tE"));
        assert!(is_qualifying_token("TABLE"));
        assert!(is_qualifying_token("tune"));
        assert!(!is_qualifying_token("cave"));
        assert!(!is_qualifying_token("Tom"));
        assert!(!is_qualifying_token("t"));
        assert!(!is_qualifying_token(""));
    }

    #[test]
    fn reversal_step_reverses_only_qualifying_tokens() {
        assert_eq!(reverse_qualifying_tokens("The cave"), "ehT cave");
    }

    #[test]
    fn reversal_uses_substring_replacement() {
        // "tee" also sits inside "steep" and gets rewritten there.
        assert_eq!(reverse_qualifying_tokens("tee steep"), "eet seetp");
    }

    #[test]
    fn reversal_replaces_every_occurrence() {
        assert_eq!(
            reverse_qualifying_tokens("Tale, tale and TALE."),
            "elaT, elat and ELAT."
        );
    }

    #[test]
    fn blank_line_reverses_following_line_then_substitutes_it() {
        let mut doc = lines(&["", "The cave"]);
        mutate_lines(&mut doc);
        assert_eq!(doc, lines(&["", "ehT c\u{E4}ve"]));
    }

    #[test]
    fn trigger_on_last_line_is_a_no_op() {
        let mut doc = lines(&["text", ""]);
        mutate_lines(&mut doc);
        assert_eq!(doc, lines(&["text", ""]));
    }

    #[test]
    fn whitespace_only_line_is_a_trigger_and_left_untouched() {
        let mut doc = lines(&[" \t\r", "tribe"]);
        mutate_lines(&mut doc);
        assert_eq!(doc, lines(&[" \t\r", "ebirt"]));
    }

    #[test]
    fn consecutive_blank_lines_chain_the_trigger() {
        let mut doc = lines(&["", "", "Tide tide"]);
        mutate_lines(&mut doc);
        assert_eq!(doc, lines(&["", "", "ediT edit"]));
    }

    #[test]
    fn line_without_preceding_blank_is_not_reversed() {
        let mut doc = lines(&["intro", "The cave"]);
        mutate_lines(&mut doc);
        assert_eq!(doc, lines(&["intro", "The c\u{E4}ve"]));
    }

    #[test]
    fn substitution_touches_only_lowercase_a() {
        assert_eq!(substitute_chars("aAa banana"), "\u{E4}A\u{E4} b\u{E4}n\u{E4}n\u{E4}");
    }

    #[test]
    fn substitution_is_single_pass() {
        let once = substitute_chars("Alpha and omega");
        assert!(!once.contains('a'));
        assert_eq!(substitute_chars(&once), once);
    }

    #[test]
    fn mutation_keeps_line_count() {
        let mut doc = lines(&["a", "", "", "tie", "b", ""]);
        mutate_lines(&mut doc);
        assert_eq!(doc.len(), 6);
    }
}
