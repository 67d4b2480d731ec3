//! Identifier and literal escaping.
//!
//! The single choke point preventing injection for anything routed through
//! structured input. Raw condition and order strings deliberately bypass it;
//! callers using those accept the injection risk.

use crate::driver::LiteralQuoter;
use crate::types::SqlValue;

/// Quote `name` as a SQL identifier: wrapped in backticks, embedded
/// backticks escaped with a backslash.
#[must_use]
pub fn escape_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "\\`"))
}

/// Render `value` as a SQL literal.
///
/// Booleans normalize to `1`/`0` and NULL to the `NULL` keyword before the
/// driver is consulted; everything else delegates to the driver's native
/// quoting, never hand-rolled substitution.
#[must_use]
pub fn escape_literal(quoter: &dyn LiteralQuoter, value: &SqlValue) -> String {
    match value {
        SqlValue::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        SqlValue::Null => "NULL".to_string(),
        other => quoter.quote_literal(other),
    }
}
