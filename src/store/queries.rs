//! SQL used by [`PgStore`](super::PgStore).
//!
//! Expected layout (owned by the database, not created here):
//! - `processed (file_path text, updated_text text, start_time timestamptz)`
//! - `char_count (file_path text, char_value text, char_count bigint)`
//! - `word_count (file_path text, word text, word_count bigint)`
//!
//! The reports are set-returning functions. Result columns are cast so the
//! row decoding does not depend on the exact integer widths they declare.

pub(super) const INSERT_PROCESSED: &str =
    "INSERT INTO processed (file_path, updated_text, start_time) VALUES ($1, $2, $3)";

pub(super) const INSERT_CHAR_COUNT: &str =
    "INSERT INTO char_count (file_path, char_value, char_count) VALUES ($1, $2, $3)";

pub(super) const INSERT_WORD_COUNT: &str =
    "INSERT INTO word_count (file_path, word, word_count) VALUES ($1, $2, $3)";

pub(super) const TOP_WORDS: &str = r#"
    SELECT
        file_path::text,
        word::text,
        word_count::bigint
    FROM get_top_words($1::int)
"#;

pub(super) const ROLLING_CHAR_COUNT: &str = r#"
    SELECT
        file_path::text,
        char_value::text,
        running_total::bigint,
        ranking::bigint
    FROM get_rolling_char_count($1::int)
"#;

pub(super) const CHAR_COUNT_BY_WORDS: &str = r#"
    SELECT
        file_path::text,
        word::text,
        char_count::bigint
    FROM get_char_count_by_words()
"#;
