//! Mutation result types.

/// Summary of a deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Rows removed from the table.
    pub removed: u64,
    /// Bound updates applied to the remaining rows, counted per statement.
    pub renumbered: u64,
}

impl DeleteOutcome {
    pub fn new(removed: u64, renumbered: u64) -> Self {
        Self {
            removed,
            renumbered,
        }
    }

    /// Returns true if nothing was removed.
    pub fn is_empty(&self) -> bool {
        self.removed == 0
    }
}
