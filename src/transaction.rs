//! Reference-counted logical transactions over one physical transaction.
//!
//! Nested logical units of work (a helper that wraps its own writes in a
//! transaction, called from code already inside one) share a single physical
//! transaction. Only the outermost begin opens it; only the matching
//! outermost commit closes it; a rollback at any depth aborts the whole
//! tree.

/// What the caller must do to the driver after a depth transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxAction {
    /// Perform the physical begin/commit/rollback.
    Physical,
    /// Depth-only transition, nothing to send to the driver.
    Logical,
    /// Nothing was open; the operation reports failure.
    Refused,
}

/// The transaction depth counter. Depth 0 means no physical transaction is
/// open. Owned by one connection; not safe for concurrent mutation.
#[derive(Debug, Default)]
pub struct TxDepth {
    depth: u32,
}

impl TxDepth {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Enter a logical transaction. `Physical` on the 0→1 transition only.
    pub fn begin(&mut self) -> TxAction {
        self.depth += 1;
        if self.depth == 1 {
            TxAction::Physical
        } else {
            TxAction::Logical
        }
    }

    /// Leave a logical transaction. `Physical` only on the 1→0 transition;
    /// inner commits just decrement, leaving the physical transaction open
    /// for the outer caller.
    pub fn commit(&mut self) -> TxAction {
        match self.depth {
            0 => TxAction::Refused,
            1 => {
                self.depth = 0;
                TxAction::Physical
            }
            _ => {
                self.depth -= 1;
                TxAction::Logical
            }
        }
    }

    /// Abort the whole logical transaction tree. At any depth ≥ 1 the
    /// physical transaction rolls back and the depth resets to 0 —
    /// intentionally asymmetric with commit.
    pub fn rollback(&mut self) -> TxAction {
        if self.depth == 0 {
            TxAction::Refused
        } else {
            self.depth = 0;
            TxAction::Physical
        }
    }

    /// Forget the open transaction after a failed physical call, so the
    /// counter cannot drift from the driver's actual state.
    pub(crate) fn reset(&mut self) {
        self.depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_begin_commit_touches_the_driver_once_each_way() {
        let mut tx = TxDepth::new();
        assert_eq!(tx.depth(), 0);
        assert_eq!(tx.begin(), TxAction::Physical);
        assert_eq!(tx.depth(), 1);
        assert_eq!(tx.begin(), TxAction::Logical);
        assert_eq!(tx.depth(), 2);
        assert_eq!(tx.commit(), TxAction::Logical);
        assert_eq!(tx.depth(), 1);
        assert_eq!(tx.commit(), TxAction::Physical);
        assert_eq!(tx.depth(), 0);
    }

    #[test]
    fn rollback_resets_from_any_depth() {
        let mut tx = TxDepth::new();
        let _ = tx.begin();
        let _ = tx.begin();
        let _ = tx.begin();
        assert_eq!(tx.rollback(), TxAction::Physical);
        assert_eq!(tx.depth(), 0);
    }

    #[test]
    fn commit_and_rollback_refuse_outside_a_transaction() {
        let mut tx = TxDepth::new();
        assert_eq!(tx.commit(), TxAction::Refused);
        assert_eq!(tx.rollback(), TxAction::Refused);
        assert_eq!(tx.depth(), 0);
    }
}
