//! The query facade: one connection, one depth counter, the public CRUD
//! operations.

use tracing::debug;

use crate::clauses::{Conditions, DataSet, Modifiers};
use crate::config::{DatabaseType, DbConfig};
use crate::driver::{Driver, LiteralQuoter};
use crate::error::SqlCourierError;
use crate::escape;
use crate::results::{Fetched, ResultSet};
use crate::statement;
use crate::transaction::{TxAction, TxDepth};
use crate::types::SqlValue;

#[cfg(feature = "sqlite")]
use crate::driver::SqliteDriver;

/// Outcome of a `get` or `schema` operation.
#[derive(Debug, Clone)]
pub struct GetOutcome {
    /// Number of rows fetched.
    pub count: usize,
    /// The fetched rows; a bare record when `single` collapsed the result.
    pub data: Fetched,
    /// The generated SQL, when `return_query` is configured.
    pub query: Option<String>,
}

/// Outcome of an `insert` operation.
#[derive(Debug, Clone)]
pub struct InsertOutcome {
    /// Number of rows inserted.
    pub count: usize,
    /// Identifier generated for the inserted row.
    pub id: i64,
    /// The generated SQL, when `return_query` is configured.
    pub query: Option<String>,
}

/// Outcome of an `update` or `delete` operation.
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    /// Number of rows affected.
    pub count: usize,
    /// The generated SQL, when `return_query` is configured.
    pub query: Option<String>,
}

/// A single database connection plus the query facade over it.
///
/// Holds the driver, the table prefix, the `return_query` switch, and the
/// transaction depth counter. Confine each instance to one logical unit of
/// work at a time; the depth counter is not safe for concurrent mutation.
pub struct DbConnection {
    driver: Box<dyn Driver>,
    prefix: String,
    return_query: bool,
    tx: TxDepth,
}

impl DbConnection {
    /// Connect to the backend selected by `db_type` using `config`, applying
    /// the configured charset right after the connection is established.
    ///
    /// # Errors
    ///
    /// Returns `SqlCourierError::ConnectionError` if the backend cannot be
    /// reached.
    pub async fn connect(
        db_type: DatabaseType,
        config: DbConfig,
    ) -> Result<Self, SqlCourierError> {
        let driver: Box<dyn Driver> = match db_type {
            #[cfg(feature = "sqlite")]
            DatabaseType::Sqlite => Box::new(SqliteDriver::connect(&config)?),
        };
        Self::with_driver(driver, config).await
    }

    /// Wrap an already-established driver. Used by tests and by callers with
    /// a custom [`Driver`] implementation.
    ///
    /// # Errors
    ///
    /// Propagates a failure to apply the configured charset.
    pub async fn with_driver(
        driver: Box<dyn Driver>,
        config: DbConfig,
    ) -> Result<Self, SqlCourierError> {
        let mut connection = Self {
            driver,
            prefix: config.prefix,
            return_query: config.return_query,
            tx: TxDepth::new(),
        };
        if let Some(charset) = &config.charset {
            connection.driver.set_charset(charset).await?;
        }
        Ok(connection)
    }

    /// Fetch rows from `table`.
    ///
    /// `columns` is a raw column list (`"*"` for everything). With the
    /// `single` modifier, a one-row result collapses to a bare record; zero
    /// rows yield an empty collection, and more than one row yields the full
    /// collection.
    ///
    /// # Errors
    ///
    /// Validation errors before any SQL is sent; `ExecutionError` with the
    /// full SQL text when the backend rejects the statement.
    pub async fn get(
        &mut self,
        table: &str,
        columns: &str,
        conditions: &Conditions,
        modifiers: &Modifiers,
    ) -> Result<GetOutcome, SqlCourierError> {
        validate_table(table)?;
        if columns.is_empty() {
            return Err(SqlCourierError::InvalidArgument(
                "invalid columns list, expecting non-empty string".to_string(),
            ));
        }

        let sql = {
            let quoter: &dyn LiteralQuoter = self.driver.as_ref();
            statement::build_select(quoter, &self.prefix, table, columns, conditions, modifiers)?
        };
        let result = self.run(&sql).await?;

        let count = result.rows.len();
        let mut rows = result.rows;
        let data = if modifiers.single && count == 1 {
            match rows.pop() {
                Some(row) => Fetched::Row(row),
                None => Fetched::Rows(rows),
            }
        } else {
            Fetched::Rows(rows)
        };

        Ok(GetOutcome {
            count,
            data,
            query: self.echo(sql),
        })
    }

    /// Insert one record (column/value pairs) or many (column list plus row
    /// tuples) into `table`.
    ///
    /// # Errors
    ///
    /// Validation errors (including `RowArityMismatch` naming the offending
    /// row) before any SQL is sent; `ExecutionError` on backend rejection.
    pub async fn insert(
        &mut self,
        table: &str,
        data: &DataSet,
    ) -> Result<InsertOutcome, SqlCourierError> {
        validate_table(table)?;
        validate_data(data)?;

        let sql = {
            let quoter: &dyn LiteralQuoter = self.driver.as_ref();
            statement::build_insert(quoter, &self.prefix, table, data)?
        };
        let result = self.run(&sql).await?;

        Ok(InsertOutcome {
            count: result.rows_affected,
            id: self.driver.last_insert_id(),
            query: self.echo(sql),
        })
    }

    /// Update rows of `table` matching `conditions` with the given
    /// column/value pairs. Multi-row data is rejected here; updates always
    /// use `SET` syntax.
    ///
    /// # Errors
    ///
    /// Validation errors before any SQL is sent; `ExecutionError` on backend
    /// rejection.
    pub async fn update(
        &mut self,
        table: &str,
        data: &DataSet,
        conditions: &Conditions,
        modifiers: &Modifiers,
    ) -> Result<WriteOutcome, SqlCourierError> {
        validate_table(table)?;
        validate_data(data)?;

        let sql = {
            let quoter: &dyn LiteralQuoter = self.driver.as_ref();
            statement::build_update(quoter, &self.prefix, table, data, conditions, modifiers)?
        };
        let result = self.run(&sql).await?;

        Ok(WriteOutcome {
            count: result.rows_affected,
            query: self.echo(sql),
        })
    }

    /// Delete rows of `table` matching `conditions`.
    ///
    /// # Errors
    ///
    /// Validation errors before any SQL is sent; `ExecutionError` on backend
    /// rejection.
    pub async fn delete(
        &mut self,
        table: &str,
        conditions: &Conditions,
        modifiers: &Modifiers,
    ) -> Result<WriteOutcome, SqlCourierError> {
        validate_table(table)?;

        let sql = {
            let quoter: &dyn LiteralQuoter = self.driver.as_ref();
            statement::build_delete(quoter, &self.prefix, table, conditions, modifiers)?
        };
        let result = self.run(&sql).await?;

        Ok(WriteOutcome {
            count: result.rows_affected,
            query: self.echo(sql),
        })
    }

    /// Describe the structure of `table`, one result row per column.
    ///
    /// The statement form is the driver's: standard `DESCRIBE`, or the
    /// backend's substitute (`PRAGMA table_info` for `SQLite`).
    ///
    /// # Errors
    ///
    /// `ExecutionError` when the backend rejects the describe statement.
    pub async fn schema(&mut self, table: &str) -> Result<GetOutcome, SqlCourierError> {
        validate_table(table)?;

        let sql = self
            .driver
            .describe_statement(&statement::table_identifier(&self.prefix, table));
        let result = self.run(&sql).await?;

        let count = result.rows.len();
        Ok(GetOutcome {
            count,
            data: Fetched::Rows(result.rows),
            query: self.echo(sql),
        })
    }

    /// Run a raw batch of statements with no result processing. Intended for
    /// schema setup and maintenance scripts; bypasses the builders entirely.
    ///
    /// # Errors
    ///
    /// `ExecutionError` when the backend rejects the batch.
    pub async fn execute_batch(&mut self, sql: &str) -> Result<(), SqlCourierError> {
        debug!(%sql, "executing batch");
        self.driver
            .execute_batch(sql)
            .await
            .map_err(|e| wrap_execution_error(sql, e))
    }

    /// Enter a logical transaction. Only the outermost call opens the
    /// physical transaction. Always reports `true`.
    ///
    /// # Errors
    ///
    /// Propagates a failed physical begin; the depth counter is reset so it
    /// cannot drift from the driver's state.
    pub async fn begin(&mut self) -> Result<bool, SqlCourierError> {
        match self.tx.begin() {
            TxAction::Physical => {
                debug!("opening physical transaction");
                if let Err(e) = self.driver.begin().await {
                    self.tx.reset();
                    return Err(e);
                }
            }
            TxAction::Logical | TxAction::Refused => {}
        }
        Ok(true)
    }

    /// Leave a logical transaction. Reports `false` when none is open; only
    /// the outermost commit touches the driver.
    ///
    /// # Errors
    ///
    /// Propagates a failed physical commit.
    pub async fn commit(&mut self) -> Result<bool, SqlCourierError> {
        match self.tx.commit() {
            TxAction::Refused => Ok(false),
            TxAction::Logical => Ok(true),
            TxAction::Physical => {
                debug!("committing physical transaction");
                self.driver.commit().await?;
                Ok(true)
            }
        }
    }

    /// Abort the whole logical transaction tree. Reports `false` when none
    /// is open; at any depth, the physical transaction rolls back and the
    /// depth resets to 0.
    ///
    /// # Errors
    ///
    /// Propagates a failed physical rollback.
    pub async fn rollback(&mut self) -> Result<bool, SqlCourierError> {
        match self.tx.rollback() {
            TxAction::Refused => Ok(false),
            TxAction::Logical => Ok(true),
            TxAction::Physical => {
                debug!("rolling back physical transaction");
                self.driver.rollback().await?;
                Ok(true)
            }
        }
    }

    /// Current logical transaction depth; 0 means no open transaction.
    #[must_use]
    pub fn transaction_depth(&self) -> u32 {
        self.tx.depth()
    }

    /// Quote a literal through the driver, for ad-hoc caller use.
    #[must_use]
    pub fn escape(&self, value: &SqlValue) -> String {
        let quoter: &dyn LiteralQuoter = self.driver.as_ref();
        escape::escape_literal(quoter, value)
    }

    /// Quote an identifier, for ad-hoc caller use.
    #[must_use]
    pub fn escape_identifier(&self, name: &str) -> String {
        escape::escape_identifier(name)
    }

    async fn run(&mut self, sql: &str) -> Result<ResultSet, SqlCourierError> {
        debug!(%sql, "executing statement");
        self.driver
            .execute(sql)
            .await
            .map_err(|e| wrap_execution_error(sql, e))
    }

    fn echo(&self, sql: String) -> Option<String> {
        self.return_query.then_some(sql)
    }
}

fn validate_table(table: &str) -> Result<(), SqlCourierError> {
    if table.is_empty() {
        return Err(SqlCourierError::InvalidArgument(
            "invalid table name, expecting non-empty string".to_string(),
        ));
    }
    Ok(())
}

fn validate_data(data: &DataSet) -> Result<(), SqlCourierError> {
    if data.is_empty() {
        return Err(SqlCourierError::InvalidArgument(
            "invalid data, expecting non-empty data set".to_string(),
        ));
    }
    Ok(())
}

fn wrap_execution_error(sql: &str, error: SqlCourierError) -> SqlCourierError {
    match error {
        #[cfg(feature = "sqlite")]
        SqlCourierError::SqliteError(e) => {
            let code = match &e {
                rusqlite::Error::SqliteFailure(failure, _) => Some(failure.extended_code),
                _ => None,
            };
            SqlCourierError::execution(sql, code, e.to_string())
        }
        SqlCourierError::ExecutionError {
            query,
            code,
            message,
        } if query.is_empty() => SqlCourierError::execution(sql, code, message),
        already_wrapped @ SqlCourierError::ExecutionError { .. } => already_wrapped,
        other => SqlCourierError::execution(sql, None, other.to_string()),
    }
}
