use crate::error::SqlCourierError;

/// The optional modifier bag attached to a read or write operation.
///
/// `order` is passed through verbatim (same trust boundary as raw
/// conditions). `single` forces `limit = 1` and makes a one-row `get` result
/// collapse to a bare record. `offset` only renders when a limit does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub order: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub single: bool,
}

impl Modifiers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw `ORDER BY` expression, inserted verbatim.
    #[must_use]
    pub fn order(mut self, expr: impl Into<String>) -> Self {
        self.order = Some(expr.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Fetch exactly one row: forces `limit = 1` and collapses a one-row
    /// result to a bare record.
    #[must_use]
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }
}

/// Build the ` ORDER BY … LIMIT … OFFSET …` fragment.
///
/// # Errors
///
/// `InvalidArgument` when an explicit limit is zero.
pub(crate) fn build_modifiers(modifiers: &Modifiers) -> Result<String, SqlCourierError> {
    let mut clause = String::new();

    if let Some(order) = &modifiers.order {
        if !order.is_empty() {
            clause.push_str(" ORDER BY ");
            clause.push_str(order);
        }
    }

    // single always wins over an explicit limit.
    let limit = if modifiers.single {
        Some(1)
    } else {
        modifiers.limit
    };

    if let Some(limit) = limit {
        if limit == 0 {
            return Err(SqlCourierError::InvalidArgument(
                "invalid 'limit' modifier, expecting number larger than 0".to_string(),
            ));
        }
        clause.push_str(&format!(" LIMIT {limit}"));

        if let Some(offset) = modifiers.offset {
            clause.push_str(&format!(" OFFSET {offset}"));
        }
    }

    Ok(clause)
}
