//! Lightweight relational access layer: clause builders, literal and
//! identifier escaping, a depth-counted transaction coordinator, and a
//! query facade over a single backend connection.
//!
//! Every value routed through [`clauses::Conditions`] or
//! [`clauses::DataSet`] is validated and escaped before it reaches SQL
//! text; the facade never interpolates caller data directly. Generated
//! statements can be echoed back on each outcome by enabling
//! `return_query` in [`config::DbConfig`].

pub mod clauses;
pub mod config;
pub mod connection;
pub mod driver;
pub mod error;
pub mod escape;
pub mod results;
pub mod transaction;
pub mod types;

mod statement;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use clauses::{Conditions, DataSet, Modifiers};
pub use config::{DatabaseType, DbConfig, DbConfigBuilder};
pub use connection::{DbConnection, GetOutcome, InsertOutcome, WriteOutcome};
pub use driver::{Driver, LiteralQuoter};
pub use error::SqlCourierError;
pub use results::{Fetched, ResultSet, Row};
pub use types::SqlValue;

/// Convenient imports for common functionality.
///
/// Re-exports the types most callers need to build and run queries.
pub mod prelude {
    pub use crate::clauses::{Conditions, DataSet, Modifiers};
    pub use crate::config::{DatabaseType, DbConfig};
    pub use crate::connection::{DbConnection, GetOutcome, InsertOutcome, WriteOutcome};
    pub use crate::error::SqlCourierError;
    pub use crate::results::Fetched;
    pub use crate::types::SqlValue;

    #[cfg(feature = "sqlite")]
    pub use crate::driver::SqliteDriver;
}
