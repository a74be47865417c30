use std::collections::HashMap;

/// Sparse cell storage for the engine.
///
/// Cells live at signed indices with no bound in either direction. A cell
/// exists only once touched: reading an untouched index inserts it at 0, so
/// the set of materialized cells records exactly which indices a program
/// has visited. That materialization is observable through [`Tape::values`]
/// and [`Tape::len`] and is part of the contract, not an artifact.
#[derive(Debug, Default)]
pub struct Tape {
    cells: HashMap<i64, i64>,
}

impl Tape {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    /// Read the cell at `index`, materializing it at 0 if untouched.
    pub fn get(&mut self, index: i64) -> i64 {
        *self.cells.entry(index).or_insert(0)
    }

    /// Write the cell at `index`, creating the entry if absent.
    pub fn set(&mut self, index: i64, value: i64) {
        self.cells.insert(index, value);
    }

    /// Snapshot of all materialized cell values, in unspecified order.
    /// Diagnostics only; execution never depends on it.
    pub fn values(&self) -> Vec<i64> {
        self.cells.values().copied().collect()
    }

    /// Number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
