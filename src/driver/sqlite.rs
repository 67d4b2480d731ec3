//! `SQLite` driver over `rusqlite`.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::Connection;
use rusqlite::types::Value;

use super::{Driver, LiteralQuoter, quote_literal_default};
use crate::config::DbConfig;
use crate::error::SqlCourierError;
use crate::results::ResultSet;
use crate::types::SqlValue;

/// One `SQLite` connection. The `database` config field is the database
/// path; `:memory:` opens an in-memory database. Host, port, user, and
/// password are ignored by this backend.
pub struct SqliteDriver {
    conn: Connection,
}

impl SqliteDriver {
    /// Open the database named by `config.database`.
    ///
    /// # Errors
    ///
    /// Returns `SqlCourierError::ConnectionError` if the database cannot be
    /// opened.
    pub fn connect(config: &DbConfig) -> Result<Self, SqlCourierError> {
        let conn = Connection::open(&config.database).map_err(|e| {
            SqlCourierError::ConnectionError(format!(
                "failed to open SQLite database '{}': {e}",
                config.database
            ))
        })?;
        Ok(Self { conn })
    }

    /// Open a throwaway in-memory database.
    ///
    /// # Errors
    ///
    /// Returns `SqlCourierError::ConnectionError` if `SQLite` refuses.
    pub fn open_in_memory() -> Result<Self, SqlCourierError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            SqlCourierError::ConnectionError(format!("failed to open in-memory database: {e}"))
        })?;
        Ok(Self { conn })
    }
}

impl LiteralQuoter for SqliteDriver {
    fn quote_literal(&self, value: &SqlValue) -> String {
        // Single-quote doubling, sqlite's own quote() rule.
        quote_literal_default(value)
    }
}

#[async_trait]
impl Driver for SqliteDriver {
    async fn execute(&mut self, sql: &str) -> Result<ResultSet, SqlCourierError> {
        let mut stmt = self.conn.prepare(sql)?;
        if stmt.column_count() > 0 {
            build_result_set(&mut stmt)
        } else {
            let affected = stmt.execute([])?;
            Ok(ResultSet::affected(affected))
        }
    }

    async fn execute_batch(&mut self, sql: &str) -> Result<(), SqlCourierError> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    async fn begin(&mut self) -> Result<(), SqlCourierError> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), SqlCourierError> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), SqlCourierError> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    fn describe_statement(&self, table: &str) -> String {
        // SQLite has no DESCRIBE; table_info reports one row per column.
        format!("PRAGMA table_info({table})")
    }

    async fn set_charset(&mut self, _charset: &str) -> Result<(), SqlCourierError> {
        // SQLite databases are UTF-8; acknowledged without effect.
        Ok(())
    }
}

fn extract_value(row: &rusqlite::Row, idx: usize) -> Result<SqlValue, SqlCourierError> {
    let value: Value = row.get(idx).map_err(SqlCourierError::SqliteError)?;
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Integer(i) => Ok(SqlValue::Int(i)),
        Value::Real(f) => Ok(SqlValue::Float(f)),
        Value::Text(s) => Ok(SqlValue::Text(s)),
        Value::Blob(b) => Ok(SqlValue::Blob(b)),
    }
}

fn build_result_set(stmt: &mut rusqlite::Statement) -> Result<ResultSet, SqlCourierError> {
    let columns: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let column_count = columns.len();

    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_columns(Arc::new(columns));

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(extract_value(row, i)?);
        }
        result_set.add_row_values(values);
    }

    Ok(result_set)
}
