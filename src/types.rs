use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::SqlCourierError;

/// Values that can appear in a database row or be supplied as structured
/// input to the clause builders.
///
/// One enum serves both directions. On the way in, only the scalar kinds
/// (`Int`, `Float`, `Text`, `Bool`, `Null`) are accepted; see
/// [`validate_scalar`]. On the way out, rows may additionally carry
/// `Timestamp` and `Blob` values read back from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    Json(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of this value's kind, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SqlValue::Int(_) => "int",
            SqlValue::Float(_) => "float",
            SqlValue::Text(_) => "text",
            SqlValue::Bool(_) => "bool",
            SqlValue::Timestamp(_) => "timestamp",
            SqlValue::Null => "null",
            SqlValue::Json(_) => "json",
            SqlValue::Blob(_) => "blob",
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let SqlValue::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let SqlValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let SqlValue::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let SqlValue::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            // Try "YYYY-MM-DD HH:MM:SS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            // Try "YYYY-MM-DD HH:MM:SS.SSS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S.%3f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let SqlValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let SqlValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

/// The Value Validator: admit only the scalar kinds the structured input
/// path accepts.
///
/// Runs per value, per column, during clause construction so the error can
/// name the offending column. Composite and non-portable kinds (`Json`,
/// `Blob`, `Timestamp`) are rejected here even though they are legal in
/// result rows.
///
/// # Errors
///
/// Returns `SqlCourierError::InvalidValueKind` naming `column` when the
/// value is not string, number, bool, or null.
pub fn validate_scalar(value: &SqlValue, column: &str) -> Result<(), SqlCourierError> {
    match value {
        SqlValue::Int(_)
        | SqlValue::Float(_)
        | SqlValue::Text(_)
        | SqlValue::Bool(_)
        | SqlValue::Null => Ok(()),
        SqlValue::Timestamp(_) | SqlValue::Json(_) | SqlValue::Blob(_) => {
            Err(SqlCourierError::InvalidValueKind {
                column: column.to_string(),
            })
        }
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(i64::from(value))
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(value: NaiveDateTime) -> Self {
        SqlValue::Timestamp(value)
    }
}

impl From<JsonValue> for SqlValue {
    fn from(value: JsonValue) -> Self {
        SqlValue::Json(value)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        SqlValue::Blob(value)
    }
}

impl From<()> for SqlValue {
    fn from((): ()) -> Self {
        SqlValue::Null
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => SqlValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_impls_cover_scalars() {
        assert_eq!(SqlValue::from(42i64), SqlValue::Int(42));
        assert_eq!(SqlValue::from(42i32), SqlValue::Int(42));
        assert_eq!(SqlValue::from(true), SqlValue::Bool(true));
        assert_eq!(SqlValue::from("hi"), SqlValue::Text("hi".to_string()));
        assert_eq!(SqlValue::from(()), SqlValue::Null);
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(1i64)), SqlValue::Int(1));
    }

    #[test]
    fn validator_accepts_plain_scalars() {
        for value in [
            SqlValue::Int(1),
            SqlValue::Float(1.5),
            SqlValue::Text("x".into()),
            SqlValue::Bool(false),
            SqlValue::Null,
        ] {
            assert!(validate_scalar(&value, "col").is_ok(), "{value:?}");
        }
    }

    #[test]
    fn validator_rejects_composite_kinds() {
        for value in [
            SqlValue::Json(serde_json::json!({"a": 1})),
            SqlValue::Blob(vec![1, 2, 3]),
            SqlValue::Timestamp(chrono::NaiveDateTime::default()),
        ] {
            let err = validate_scalar(&value, "payload").unwrap_err();
            match err {
                SqlCourierError::InvalidValueKind { column } => assert_eq!(column, "payload"),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn bool_coercion_from_int() {
        assert_eq!(SqlValue::Int(1).as_bool(), Some(&true));
        assert_eq!(SqlValue::Int(0).as_bool(), Some(&false));
        assert_eq!(SqlValue::Int(2).as_bool(), None);
    }
}
