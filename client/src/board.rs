use sweeper_common::models::Cell;
use sweeper_common::protocol::BoardSnapshot;

/// Holds the board exactly as last pushed by the server.
///
/// The store never mutates individual cells; a new snapshot replaces the
/// whole matrix and the previous one is discarded. Snapshots are applied in
/// the order received, so delivery order fully determines the displayed
/// state. The snapshot's own shape is trusted over the configured
/// dimensions.
#[derive(Debug, Clone)]
pub struct BoardStore {
    cells: BoardSnapshot,
}

impl BoardStore {
    /// A blank grid: every cell hidden, unflagged and mine-free.
    pub fn blank(rows: usize, columns: usize) -> Self {
        Self {
            cells: blank_grid(rows, columns),
        }
    }

    /// Swap the entire held board for `snapshot`. No merging, no validation
    /// against the session's configured dimensions.
    pub fn replace(&mut self, snapshot: BoardSnapshot) {
        self.cells = snapshot;
    }

    /// Reset to a blank grid of the given dimensions.
    pub fn reset(&mut self, rows: usize, columns: usize) {
        self.cells = blank_grid(rows, columns);
    }

    pub fn cells(&self) -> &BoardSnapshot {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row)?.get(col)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }
}

fn blank_grid(rows: usize, columns: usize) -> BoardSnapshot {
    vec![vec![Cell::default(); columns]; rows]
}
