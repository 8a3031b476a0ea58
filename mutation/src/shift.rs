//! Gap opening and closing.
//!
//! A shift moves one bound column of every row above a threshold by a fixed
//! delta. Inserting opens a gap of two units after an anchor bound; deleting
//! closes the gap a removed interval leaves behind.

use nestset_core::{TreeId, Value};
use nestset_schema::Schema;
use nestset_store::{RowStore, StoreResult};

use crate::baseline::partition_clause;

/// Which bound column a shift touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bound {
    Left,
    Right,
}

/// `column = column + delta WHERE column > threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Shift {
    pub bound: Bound,
    pub threshold: i64,
    pub delta: i64,
}

/// Ordered list of shifts applied to one partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShiftPlan {
    shifts: Vec<Shift>,
}

impl ShiftPlan {
    /// Make room for `width` units right after bound value `after`.
    pub fn open_gap(after: i64, width: i64) -> Self {
        Self::uniform(after, width)
    }

    /// Pull every bound above `after` down by `width` units.
    pub fn close_gap(after: i64, width: i64) -> Self {
        Self::uniform(after, -width)
    }

    fn uniform(threshold: i64, delta: i64) -> Self {
        Self {
            shifts: vec![
                Shift {
                    bound: Bound::Right,
                    threshold,
                    delta,
                },
                Shift {
                    bound: Bound::Left,
                    threshold,
                    delta,
                },
            ],
        }
    }

    /// Where a single bound value ends up after the plan runs.
    #[cfg(test)]
    pub fn shifted(&self, bound: Bound, value: i64) -> i64 {
        self.shifts
            .iter()
            .filter(|shift| shift.bound == bound && value > shift.threshold)
            .fold(value, |v, shift| v + shift.delta)
    }

    /// Run the plan against `tree`'s rows. Returns the number of updated bounds.
    pub fn apply<S: RowStore + ?Sized>(
        &self,
        store: &mut S,
        schema: &Schema,
        tree: Option<TreeId>,
    ) -> StoreResult<u64> {
        let mut updated = 0;
        for shift in &self.shifts {
            let column = match shift.bound {
                Bound::Left => schema.q_left(),
                Bound::Right => schema.q_right(),
            };
            let mut params = vec![Value::Int(shift.delta), Value::Int(shift.threshold)];
            let filter = partition_clause(schema, tree, &mut params);
            let sql = format!(
                "UPDATE {table} SET {col} = {col} + ? WHERE {col} > ?{filter}",
                table = schema.q_table(),
                col = column,
                filter = filter
            );
            updated += store.execute(&sql, &params)?;
        }
        Ok(updated)
    }
}
