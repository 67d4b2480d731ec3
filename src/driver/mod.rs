//! The backend collaborator interface.
//!
//! Everything the query facade needs from a database driver is expressed
//! through [`Driver`]: execute one statement, quote one literal, manage the
//! single physical transaction, and report the last inserted row id. The
//! clause builders only need the quoting half, so that is split out as
//! [`LiteralQuoter`] and passed to them explicitly.

use async_trait::async_trait;

use crate::error::SqlCourierError;
use crate::results::ResultSet;
use crate::types::SqlValue;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDriver;

/// Backend-native literal quoting.
///
/// This is the trust boundary for every value routed through structured
/// input: the clause builders never splice a raw value into SQL text, they
/// always go through this method (booleans and NULL are normalized before
/// the call and never reach it).
pub trait LiteralQuoter {
    /// Render `value` as a SQL literal, escaped per the backend's rules.
    fn quote_literal(&self, value: &SqlValue) -> String;
}

/// A live database connection as seen by the query facade.
///
/// One driver instance backs one [`crate::connection::DbConnection`]; no
/// pooling or sharing happens at this layer.
#[async_trait]
pub trait Driver: LiteralQuoter + Send {
    /// Execute one statement. Statements that produce columns return their
    /// rows; DML statements report affected rows through
    /// [`ResultSet::rows_affected`].
    async fn execute(&mut self, sql: &str) -> Result<ResultSet, SqlCourierError>;

    /// Execute a batch of statements with no result processing, used for
    /// schema setup and maintenance scripts.
    async fn execute_batch(&mut self, sql: &str) -> Result<(), SqlCourierError>;

    /// Open the physical transaction.
    async fn begin(&mut self) -> Result<(), SqlCourierError>;

    /// Commit the physical transaction.
    async fn commit(&mut self) -> Result<(), SqlCourierError>;

    /// Roll back the physical transaction.
    async fn rollback(&mut self) -> Result<(), SqlCourierError>;

    /// Identifier generated by the most recent successful INSERT.
    fn last_insert_id(&self) -> i64;

    /// The statement that reports a table's structure, given the already
    /// escaped table identifier. Standard `DESCRIBE` unless the backend has
    /// no such statement and substitutes its own form.
    fn describe_statement(&self, table: &str) -> String {
        format!("DESCRIBE {table}")
    }

    /// Apply a character set to the connection. Backends with a fixed
    /// encoding acknowledge without effect.
    async fn set_charset(&mut self, charset: &str) -> Result<(), SqlCourierError>;
}

/// Standard-SQL literal rendering: single quotes doubled inside text, bare
/// numerals for numbers, `X'..'` hex for blobs.
///
/// Suitable for backends without a quoting primitive of their own; the
/// bundled sqlite driver and the recording test driver both use it.
#[must_use]
pub fn quote_literal_default(value: &SqlValue) -> String {
    match value {
        SqlValue::Int(i) => i.to_string(),
        SqlValue::Float(f) => f.to_string(),
        SqlValue::Text(s) => quote_text(s),
        SqlValue::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Timestamp(ts) => quote_text(&ts.format("%Y-%m-%d %H:%M:%S").to_string()),
        SqlValue::Json(v) => quote_text(&v.to_string()),
        SqlValue::Blob(bytes) => {
            let mut hex = String::with_capacity(bytes.len() * 2 + 3);
            hex.push_str("X'");
            for byte in bytes {
                hex.push_str(&format!("{byte:02X}"));
            }
            hex.push('\'');
            hex
        }
    }
}

fn quote_text(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_quoting_doubles_single_quotes() {
        assert_eq!(
            quote_literal_default(&SqlValue::Text("O'Brien".into())),
            "'O''Brien'"
        );
    }

    #[test]
    fn numbers_render_bare() {
        assert_eq!(quote_literal_default(&SqlValue::Int(30)), "30");
        assert_eq!(quote_literal_default(&SqlValue::Float(1.5)), "1.5");
    }

    #[test]
    fn blob_renders_hex() {
        assert_eq!(
            quote_literal_default(&SqlValue::Blob(vec![0xDE, 0xAD])),
            "X'DEAD'"
        );
    }
}
