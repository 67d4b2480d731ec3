use std::collections::HashMap;
use std::sync::Arc;

use super::row::{Row, build_index};
use crate::types::SqlValue;

/// The result of one statement execution.
///
/// Statements that produce columns fill `rows`; DML statements report only
/// `rows_affected`. The column names and their index map are built once and
/// shared by every row.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query.
    pub rows: Vec<Row>,
    /// The number of rows affected (for DML statements) or fetched.
    pub rows_affected: usize,
    columns: Option<Arc<Vec<String>>>,
    index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a result set with preallocated row capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            rows: Vec::with_capacity(capacity),
            ..ResultSet::default()
        }
    }

    /// A rows-affected-only result, as produced by DML statements.
    #[must_use]
    pub fn affected(rows_affected: usize) -> ResultSet {
        ResultSet {
            rows_affected,
            ..ResultSet::default()
        }
    }

    /// Set the column names shared by all rows of this result set.
    pub fn set_columns(&mut self, columns: Arc<Vec<String>>) {
        self.index = Some(Arc::new(build_index(&columns)));
        self.columns = Some(columns);
    }

    /// The shared column names, once set.
    #[must_use]
    pub fn columns(&self) -> Option<&Arc<Vec<String>>> {
        self.columns.as_ref()
    }

    /// Append one row of values. Requires `set_columns` to have been called;
    /// values are positional in column order.
    pub fn add_row_values(&mut self, values: Vec<SqlValue>) {
        if let (Some(columns), Some(index)) = (&self.columns, &self.index) {
            self.rows
                .push(Row::with_shared_index(columns.clone(), index.clone(), values));
            self.rows_affected += 1;
        }
    }
}
