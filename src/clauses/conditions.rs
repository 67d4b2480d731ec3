use crate::driver::LiteralQuoter;
use crate::error::SqlCourierError;
use crate::escape::{escape_identifier, escape_literal};
use crate::types::{SqlValue, validate_scalar};

/// The condition set attached to a read or write operation.
///
/// Either an ordered column/value map combined with `AND` and
/// equality/`IS NULL` semantics, or an opaque raw string inserted verbatim
/// after `WHERE`. The raw form bypasses validation and escaping entirely;
/// the caller accepts the injection risk.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Conditions {
    /// No WHERE clause.
    #[default]
    None,
    /// Column/value pairs in insertion order, joined with ` AND `.
    Map(Vec<(String, SqlValue)>),
    /// Verbatim SQL after `WHERE `. Trust boundary; not validated.
    Raw(String),
    /// Raw and column/value forms were combined. Building this always
    /// fails; a condition must never vanish silently.
    Mixed,
}

impl Conditions {
    #[must_use]
    pub fn new() -> Self {
        Self::None
    }

    /// Append an equality (or `IS NULL`) condition, preserving insertion
    /// order. Starts a map when called on `None`; called on `Raw`, the
    /// combination is marked invalid and rejected at build time.
    #[must_use]
    pub fn and(self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        match self {
            Self::None => Self::Map(vec![(column.into(), value.into())]),
            Self::Map(mut pairs) => {
                pairs.push((column.into(), value.into()));
                Self::Map(pairs)
            }
            Self::Raw(_) | Self::Mixed => Self::Mixed,
        }
    }

    /// An opaque condition string passed through verbatim.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Map(pairs) => pairs.is_empty(),
            Self::Raw(sql) => sql.is_empty(),
            Self::Mixed => false,
        }
    }
}

/// Build the ` WHERE …` fragment, or an empty string for empty conditions.
///
/// # Errors
///
/// `InvalidColumnName` for an empty column name (with its position),
/// `InvalidValueKind` for a non-scalar value (with its column name),
/// `InvalidArgument` for conditions that combined the raw and structured
/// forms.
pub(crate) fn build_where(
    quoter: &dyn LiteralQuoter,
    conditions: &Conditions,
) -> Result<String, SqlCourierError> {
    match conditions {
        Conditions::None => Ok(String::new()),
        Conditions::Mixed => Err(SqlCourierError::InvalidArgument(
            "invalid conditions, raw and column/value forms cannot be combined".to_string(),
        )),
        Conditions::Raw(sql) => {
            if sql.is_empty() {
                Ok(String::new())
            } else {
                Ok(format!(" WHERE {sql}"))
            }
        }
        Conditions::Map(pairs) => {
            if pairs.is_empty() {
                return Ok(String::new());
            }
            let mut clause = String::new();
            for (index, (column, value)) in pairs.iter().enumerate() {
                if column.is_empty() {
                    return Err(SqlCourierError::InvalidColumnName { index });
                }
                validate_scalar(value, column)?;

                if !clause.is_empty() {
                    clause.push_str(" AND ");
                }
                clause.push_str(&escape_identifier(column));
                if value.is_null() {
                    clause.push_str(" IS NULL");
                } else {
                    clause.push('=');
                    clause.push_str(&escape_literal(quoter, value));
                }
            }
            Ok(format!(" WHERE {clause}"))
        }
    }
}
