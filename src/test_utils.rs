//! Scriptable driver for exercising the facade without a real backend.
//!
//! Enabled by the `test-utils` feature. The driver records every statement
//! the facade hands it and replays scripted outcomes in order, so tests can
//! assert on the exact SQL text and on failure propagation.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::driver::{quote_literal_default, Driver, LiteralQuoter};
use crate::error::SqlCourierError;
use crate::results::ResultSet;
use crate::types::SqlValue;

/// Everything the facade asked the driver to do, in order.
#[derive(Debug, Default, Clone)]
pub struct DriverLog {
    /// SQL text of every executed statement and batch.
    pub executed: Vec<String>,
    pub begins: usize,
    pub commits: usize,
    pub rollbacks: usize,
}

enum Scripted {
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<SqlValue>>,
    },
    Affected(usize),
    Fail(String),
}

/// A driver whose responses are scripted ahead of time.
///
/// Unscripted statements succeed with an empty zero-row result, so simple
/// builder tests need no setup at all.
pub struct RecordingDriver {
    log: Arc<Mutex<DriverLog>>,
    script: VecDeque<Scripted>,
    last_insert_id: i64,
}

impl RecordingDriver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(DriverLog::default())),
            script: VecDeque::new(),
            last_insert_id: 0,
        }
    }

    /// Handle for inspecting the log after the driver has been boxed away
    /// into a connection.
    #[must_use]
    pub fn log(&self) -> Arc<Mutex<DriverLog>> {
        Arc::clone(&self.log)
    }

    /// Script the next statement to yield the given rows.
    pub fn script_rows(&mut self, columns: &[&str], rows: Vec<Vec<SqlValue>>) {
        self.script.push_back(Scripted::Rows {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows,
        });
    }

    /// Script the next statement to report `count` affected rows.
    pub fn script_affected(&mut self, count: usize) {
        self.script.push_back(Scripted::Affected(count));
    }

    /// Script the next statement to fail with a backend-style message.
    pub fn script_failure(&mut self, message: &str) {
        self.script.push_back(Scripted::Fail(message.to_string()));
    }

    pub fn set_last_insert_id(&mut self, id: i64) {
        self.last_insert_id = id;
    }

    fn record(&self, sql: &str) {
        let mut log = match self.log.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        log.executed.push(sql.to_string());
    }

    fn with_log(&self, f: impl FnOnce(&mut DriverLog)) {
        let mut log = match self.log.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut log);
    }

    fn next_outcome(&mut self, sql: &str) -> Result<ResultSet, SqlCourierError> {
        match self.script.pop_front() {
            None => Ok(ResultSet::with_capacity(0)),
            Some(Scripted::Affected(count)) => Ok(ResultSet::affected(count)),
            Some(Scripted::Fail(message)) => {
                Err(SqlCourierError::execution(sql, Some(1), message))
            }
            Some(Scripted::Rows { columns, rows }) => {
                let mut result = ResultSet::with_capacity(rows.len());
                result.set_columns(Arc::new(columns));
                for values in rows {
                    result.add_row_values(values);
                }
                Ok(result)
            }
        }
    }
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl LiteralQuoter for RecordingDriver {
    fn quote_literal(&self, value: &SqlValue) -> String {
        quote_literal_default(value)
    }
}

#[async_trait]
impl Driver for RecordingDriver {
    async fn execute(&mut self, sql: &str) -> Result<ResultSet, SqlCourierError> {
        self.record(sql);
        self.next_outcome(sql)
    }

    async fn execute_batch(&mut self, sql: &str) -> Result<(), SqlCourierError> {
        self.record(sql);
        self.next_outcome(sql).map(|_| ())
    }

    async fn begin(&mut self) -> Result<(), SqlCourierError> {
        self.with_log(|log| log.begins += 1);
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), SqlCourierError> {
        self.with_log(|log| log.commits += 1);
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), SqlCourierError> {
        self.with_log(|log| log.rollbacks += 1);
        Ok(())
    }

    fn last_insert_id(&self) -> i64 {
        self.last_insert_id
    }

    async fn set_charset(&mut self, _charset: &str) -> Result<(), SqlCourierError> {
        Ok(())
    }
}
