use thiserror::Error;

/// Errors produced while validating input, building statements, or talking to
/// the backend.
///
/// Validation errors are raised eagerly, before any SQL leaves the process,
/// and identify the offending column or row precisely. Execution errors carry
/// the full SQL text and the backend's native error code so failures can be
/// diagnosed without re-running the statement.
#[derive(Debug, Error)]
pub enum SqlCourierError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Wrong top-level shape for a table name, column list, data set, or
    /// modifier bag.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Empty column name at position `index` in a condition map or data set.
    #[error("Invalid column name with index {index}, expecting non-empty string")]
    InvalidColumnName { index: usize },

    /// The value for `column` is not one of string, number, bool, or null.
    #[error("Invalid value for column '{column}', expecting string, number, bool or null")]
    InvalidValueKind { column: String },

    /// A multi-row insert row whose value count disagrees with the column
    /// list. `row_index` counts data rows from 1; position 0 is the column
    /// list itself.
    #[error("Data value count doesn't match column count on row with index {row_index}")]
    RowArityMismatch { row_index: usize },

    /// The backend rejected an assembled statement.
    #[error("Query execution error: {message} (query: {query})")]
    ExecutionError {
        /// The exact SQL text that was sent.
        query: String,
        /// The backend's native error code, when it reports one.
        code: Option<i32>,
        message: String,
    },
}

impl SqlCourierError {
    /// Wrap a backend failure together with the statement that triggered it.
    pub fn execution(query: impl Into<String>, code: Option<i32>, message: impl Into<String>) -> Self {
        Self::ExecutionError {
            query: query.into(),
            code,
            message: message.into(),
        }
    }
}
