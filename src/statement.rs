//! Statement assembly.
//!
//! Composes action prefix + escaped table + pre-built clause fragments into
//! finished SQL text. Nothing here executes anything; the table name is
//! always `prefix + table`, escaped as one identifier.

use crate::clauses::{Conditions, DataSet, Modifiers, build_data, build_modifiers, build_where};
use crate::driver::LiteralQuoter;
use crate::error::SqlCourierError;
use crate::escape::escape_identifier;

pub(crate) fn table_identifier(prefix: &str, table: &str) -> String {
    escape_identifier(&format!("{prefix}{table}"))
}

pub(crate) fn build_select(
    quoter: &dyn LiteralQuoter,
    prefix: &str,
    table: &str,
    columns: &str,
    conditions: &Conditions,
    modifiers: &Modifiers,
) -> Result<String, SqlCourierError> {
    let mut sql = format!("SELECT {columns} FROM {}", table_identifier(prefix, table));
    sql.push_str(&build_where(quoter, conditions)?);
    sql.push_str(&build_modifiers(modifiers)?);
    Ok(sql)
}

pub(crate) fn build_insert(
    quoter: &dyn LiteralQuoter,
    prefix: &str,
    table: &str,
    data: &DataSet,
) -> Result<String, SqlCourierError> {
    // A single-row map is rendered as a one-row VALUES tuple rather than
    // `INSERT ... SET`, which only MySQL understands.
    let normalized;
    let data = match data {
        DataSet::Row(pairs) => {
            let (columns, values) = pairs
                .iter()
                .map(|(column, value)| (column.clone(), value.clone()))
                .unzip();
            normalized = DataSet::Rows {
                columns,
                rows: vec![values],
            };
            &normalized
        }
        multi => multi,
    };

    // No modifier clause on INSERT.
    let mut sql = format!("INSERT INTO {}", table_identifier(prefix, table));
    sql.push_str(&build_data(quoter, data, false)?);
    Ok(sql)
}

pub(crate) fn build_update(
    quoter: &dyn LiteralQuoter,
    prefix: &str,
    table: &str,
    data: &DataSet,
    conditions: &Conditions,
    modifiers: &Modifiers,
) -> Result<String, SqlCourierError> {
    let mut sql = format!("UPDATE {}", table_identifier(prefix, table));
    sql.push_str(&build_data(quoter, data, true)?);
    sql.push_str(&build_where(quoter, conditions)?);
    sql.push_str(&build_modifiers(modifiers)?);
    Ok(sql)
}

pub(crate) fn build_delete(
    quoter: &dyn LiteralQuoter,
    prefix: &str,
    table: &str,
    conditions: &Conditions,
    modifiers: &Modifiers,
) -> Result<String, SqlCourierError> {
    let mut sql = format!("DELETE FROM {}", table_identifier(prefix, table));
    sql.push_str(&build_where(quoter, conditions)?);
    sql.push_str(&build_modifiers(modifiers)?);
    Ok(sql)
}
