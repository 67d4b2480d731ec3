//! Normalized result shapes returned to callers.

mod result_set;
mod row;

pub use result_set::ResultSet;
pub use row::Row;

/// The data portion of a `get`/`schema` outcome.
///
/// A one-row result fetched with the `single` modifier collapses to a bare
/// [`Row`]; every other result is a collection (empty for zero rows, full
/// even when `single` was requested but more than one row came back).
#[derive(Debug, Clone)]
pub enum Fetched {
    /// Zero or more rows.
    Rows(Vec<Row>),
    /// Exactly one row, unwrapped.
    Row(Row),
}

impl Fetched {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Rows(rows) => rows.len(),
            Self::Row(_) => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bare record, when the result collapsed to one.
    #[must_use]
    pub fn as_row(&self) -> Option<&Row> {
        match self {
            Self::Row(row) => Some(row),
            Self::Rows(_) => None,
        }
    }

    /// View the result uniformly as a slice of rows.
    #[must_use]
    pub fn as_slice(&self) -> &[Row] {
        match self {
            Self::Rows(rows) => rows,
            Self::Row(row) => std::slice::from_ref(row),
        }
    }
}
