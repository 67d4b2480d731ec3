use crate::driver::LiteralQuoter;
use crate::error::SqlCourierError;
use crate::escape::{escape_identifier, escape_literal};
use crate::types::{SqlValue, validate_scalar};

/// The data attached to an INSERT or UPDATE.
///
/// `Row` holds column/value pairs for a single record (`SET` syntax);
/// `Rows` holds a column list plus positional value tuples for a multi-row
/// insert (`(cols) VALUES (…),(…)` syntax). The two variants make the mode
/// explicit at every call site, so a single-row update whose data happens to
/// look positional can never be misread as a multi-row insert.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSet {
    /// One record as column/value pairs, in insertion order.
    Row(Vec<(String, SqlValue)>),
    /// Multi-row form: a column list and one value tuple per row. Every
    /// tuple must have exactly `columns.len()` values.
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<SqlValue>>,
    },
    /// Single-row and multi-row forms were combined. Building this always
    /// fails; a value must never vanish silently.
    Mixed,
}

impl DataSet {
    /// Start an empty single-row data set.
    #[must_use]
    pub fn row() -> Self {
        Self::Row(Vec::new())
    }

    /// Append one column/value pair to a single-row data set. Called on the
    /// multi-row form, the combination is marked invalid and rejected at
    /// build time.
    #[must_use]
    pub fn set(self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        match self {
            Self::Row(mut pairs) => {
                pairs.push((column.into(), value.into()));
                Self::Row(pairs)
            }
            Self::Rows { .. } | Self::Mixed => Self::Mixed,
        }
    }

    /// Start a multi-row data set with the given column list.
    #[must_use]
    pub fn rows<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Rows {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append one value tuple to a multi-row data set. Arity is checked at
    /// build time, not here, so the error can name the offending row index.
    /// Called on the single-row form, the combination is marked invalid and
    /// rejected at build time.
    #[must_use]
    pub fn add(self, row: Vec<SqlValue>) -> Self {
        match self {
            Self::Rows { columns, mut rows } => {
                rows.push(row);
                Self::Rows { columns, rows }
            }
            Self::Row(_) | Self::Mixed => Self::Mixed,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Row(pairs) => pairs.is_empty(),
            Self::Rows { columns, rows } => columns.is_empty() || rows.is_empty(),
            Self::Mixed => false,
        }
    }
}

/// Build the data fragment: ` SET …` for a single row, ` (cols) VALUES …`
/// for the multi-row form.
///
/// `single_row_only` is set by UPDATE, which only admits `SET` syntax; a
/// multi-row data set there is rejected outright instead of reinterpreted.
///
/// # Errors
///
/// `InvalidColumnName`/`InvalidValueKind` per entry, `RowArityMismatch` with
/// the 1-based row index for a tuple whose length disagrees with the column
/// list, `InvalidArgument` for multi-row data where only `SET` is valid and
/// for data that combined the single-row and multi-row forms.
pub(crate) fn build_data(
    quoter: &dyn LiteralQuoter,
    data: &DataSet,
    single_row_only: bool,
) -> Result<String, SqlCourierError> {
    match data {
        DataSet::Row(pairs) => build_set(quoter, pairs),
        DataSet::Mixed => Err(SqlCourierError::InvalidArgument(
            "invalid data, single-row and multi-row forms cannot be combined".to_string(),
        )),
        DataSet::Rows { .. } if single_row_only => Err(SqlCourierError::InvalidArgument(
            "multi-row data is not valid here, expecting column/value pairs".to_string(),
        )),
        DataSet::Rows { columns, rows } => build_values(quoter, columns, rows),
    }
}

fn build_set(
    quoter: &dyn LiteralQuoter,
    pairs: &[(String, SqlValue)],
) -> Result<String, SqlCourierError> {
    let mut assignments = String::new();
    for (index, (column, value)) in pairs.iter().enumerate() {
        if column.is_empty() {
            return Err(SqlCourierError::InvalidColumnName { index });
        }
        validate_scalar(value, column)?;

        if !assignments.is_empty() {
            assignments.push_str(", ");
        }
        assignments.push_str(&escape_identifier(column));
        assignments.push('=');
        assignments.push_str(&render_data_literal(quoter, value));
    }
    Ok(format!(" SET {assignments}"))
}

fn build_values(
    quoter: &dyn LiteralQuoter,
    columns: &[String],
    rows: &[Vec<SqlValue>],
) -> Result<String, SqlCourierError> {
    let mut escaped_columns = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        if column.is_empty() {
            return Err(SqlCourierError::InvalidColumnName { index });
        }
        escaped_columns.push(escape_identifier(column));
    }

    let mut values = String::new();
    for (row_offset, row) in rows.iter().enumerate() {
        // Row indices count from 1; position 0 is the column list.
        if row.len() != columns.len() {
            return Err(SqlCourierError::RowArityMismatch {
                row_index: row_offset + 1,
            });
        }

        let mut tuple = String::new();
        for (column, value) in columns.iter().zip(row) {
            validate_scalar(value, column)?;
            if !tuple.is_empty() {
                tuple.push_str(", ");
            }
            tuple.push_str(&render_data_literal(quoter, value));
        }

        if !values.is_empty() {
            values.push_str(", ");
        }
        values.push('(');
        values.push_str(&tuple);
        values.push(')');
    }

    Ok(format!(" ({}) VALUES {values}", escaped_columns.join(", ")))
}

// In data position NULL is the literal keyword, unlike the IS NULL form
// conditions use; everything else goes through the shared escaper.
fn render_data_literal(quoter: &dyn LiteralQuoter, value: &SqlValue) -> String {
    if value.is_null() {
        "NULL".to_string()
    } else {
        escape_literal(quoter, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::quote_literal_default;

    struct Quoter;

    impl LiteralQuoter for Quoter {
        fn quote_literal(&self, value: &SqlValue) -> String {
            quote_literal_default(value)
        }
    }

    #[test]
    fn single_row_emits_set_in_insertion_order() {
        let data = DataSet::row()
            .set("name", "O'Brien")
            .set("age", 30)
            .set("active", true)
            .set("deleted_at", SqlValue::Null);
        assert_eq!(
            build_data(&Quoter, &data, false).unwrap(),
            " SET `name`='O''Brien', `age`=30, `active`=1, `deleted_at`=NULL"
        );
    }

    #[test]
    fn multi_row_emits_columns_then_value_tuples() {
        let data = DataSet::rows(["name", "age"])
            .add(vec!["Ada".into(), 36.into()])
            .add(vec!["Grace".into(), 45.into()]);
        assert_eq!(
            build_data(&Quoter, &data, false).unwrap(),
            " (`name`, `age`) VALUES ('Ada', 36), ('Grace', 45)"
        );
    }

    #[test]
    fn arity_mismatch_names_the_offending_row() {
        let data = DataSet::rows(["name", "age"])
            .add(vec!["Ada".into(), 36.into()])
            .add(vec!["Grace".into()]);
        match build_data(&Quoter, &data, false).unwrap_err() {
            SqlCourierError::RowArityMismatch { row_index } => assert_eq!(row_index, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn combining_the_two_forms_is_rejected_instead_of_dropped() {
        // Neither the pair nor the tuple may vanish from the statement.
        let poisoned = DataSet::rows(["name"]).set("age", 30);
        assert!(!poisoned.is_empty());
        match build_data(&Quoter, &poisoned, false).unwrap_err() {
            SqlCourierError::InvalidArgument(_) => {}
            other => panic!("unexpected error: {other}"),
        }

        let poisoned = DataSet::row().set("name", "Ada").add(vec![30.into()]);
        match build_data(&Quoter, &poisoned, false).unwrap_err() {
            SqlCourierError::InvalidArgument(_) => {}
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn update_mode_rejects_multi_row_data() {
        let data = DataSet::rows(["a"]).add(vec![1.into()]);
        assert!(matches!(
            build_data(&Quoter, &data, true).unwrap_err(),
            SqlCourierError::InvalidArgument(_)
        ));
    }

    #[test]
    fn empty_column_name_in_column_list_is_rejected() {
        let data = DataSet::rows(["name", ""]).add(vec!["Ada".into(), 36.into()]);
        match build_data(&Quoter, &data, false).unwrap_err() {
            SqlCourierError::InvalidColumnName { index } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn composite_value_names_its_column() {
        let data = DataSet::rows(["name", "payload"])
            .add(vec!["Ada".into(), SqlValue::Blob(vec![1])]);
        match build_data(&Quoter, &data, false).unwrap_err() {
            SqlCourierError::InvalidValueKind { column } => assert_eq!(column, "payload"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
