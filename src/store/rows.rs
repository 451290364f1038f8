//! Result rows of the aggregate reports.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopWordsRow {
    pub file_path: String,
    pub word: String,
    pub word_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingCharCountRow {
    pub file_path: String,
    pub char_value: String,
    pub running_total: i64,
    pub ranking: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharCountByWordsRow {
    pub file_path: String,
    pub word: String,
    pub char_count: i64,
}
