use std::collections::HashMap;
use std::sync::Arc;

use crate::types::SqlValue;

/// A single row from a query result, with access by column name or index.
///
/// Column names and the name→index map are shared across all rows of one
/// result set.
#[derive(Debug, Clone)]
pub struct Row {
    /// The column names for this row.
    pub columns: Arc<Vec<String>>,
    /// The values, in column order.
    pub values: Vec<SqlValue>,
    index: Arc<HashMap<String, usize>>,
}

impl Row {
    #[must_use]
    pub fn new(columns: Arc<Vec<String>>, values: Vec<SqlValue>) -> Self {
        let index = Arc::new(build_index(&columns));
        Self {
            columns,
            values,
            index,
        }
    }

    pub(crate) fn with_shared_index(
        columns: Arc<Vec<String>>,
        index: Arc<HashMap<String, usize>>,
        values: Vec<SqlValue>,
    ) -> Self {
        Self {
            columns,
            values,
            index,
        }
    }

    /// Position of a column by name.
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        if let Some(&idx) = self.index.get(column) {
            return Some(idx);
        }
        // Fall back to linear search
        self.columns.iter().position(|name| name == column)
    }

    /// Value of a column by name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.column_index(column).and_then(|idx| self.values.get(idx))
    }

    /// Value of a column by position.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }
}

pub(crate) fn build_index(columns: &[String]) -> HashMap<String, usize> {
    columns
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name_and_index_agree() {
        let row = Row::new(
            Arc::new(vec!["id".to_string(), "name".to_string()]),
            vec![SqlValue::Int(5), SqlValue::Text("Ada".into())],
        );
        assert_eq!(row.get("id"), Some(&SqlValue::Int(5)));
        assert_eq!(row.get_by_index(1), Some(&SqlValue::Text("Ada".into())));
        assert_eq!(row.get("missing"), None);
    }
}
