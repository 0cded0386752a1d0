use std::path::PathBuf;

use thiserror::Error;

use crate::scanner::Keyword;

/// Error types for dictionary decoding and file access
#[derive(Error, Debug)]
pub enum PoError {
    /// Error reported by the filesystem, passed through unchanged
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// CSV input with no records at all, so there is no header row to strip
    #[error("CSV input has no header row")]
    MissingCsvHeader,
    /// CSV record that cannot provide both a message id and a message string
    #[error("CSV record {record} has {fields} field(s), expected at least 2")]
    ShortCsvRow { record: usize, fields: usize },
    /// Error from the CSV reader or writer
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    /// Invalid JSON, a non-object root, or a non-string value
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Result type for dictionary operations
pub type Result<T> = std::result::Result<T, PoError>;

/// A `msgid`/`msgstr` line whose quoted string could not be found.
///
/// Never fatal: the parser skips the line and records one of these in its
/// report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line_number}: `{keyword}` directive without a quoted string: {text}")]
pub struct MalformedLine {
    /// 1-based line number in the parsed text
    pub line_number: usize,
    pub keyword: Keyword,
    pub text: String,
}
