//! Read-only round view handed to the presentation layer for redraw.

use crate::core::board::CellState;
use crate::core::round::ShapeInstance;
use crate::types::RoundState;

/// Borrowed snapshot of a round: board occupancy + tags, score, state and
/// the unplaced hand. Valid for as long as the round is not mutated.
#[derive(Debug, Clone, Copy)]
pub struct RoundSnapshot<'a, T> {
    pub width: u8,
    pub height: u8,
    /// Flat row-major cells (`index = x + y * width`).
    pub cells: &'a [CellState<T>],
    pub score: u32,
    pub state: RoundState,
    pub unplaced: &'a [ShapeInstance],
}

impl<'a, T> RoundSnapshot<'a, T> {
    /// Occupancy at (x, y); out of bounds reads as unoccupied.
    pub fn occupied(&self, x: u8, y: u8) -> bool {
        self.cell(x, y).is_some_and(|c| c.occupied)
    }

    /// The tag stored at (x, y), if the cell is occupied and carries one.
    pub fn tag(&self, x: u8, y: u8) -> Option<&'a T> {
        self.cell(x, y).and_then(|c| c.tag.as_ref())
    }

    fn cell(&self, x: u8, y: u8) -> Option<&'a CellState<T>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(&self.cells[x as usize + y as usize * self.width as usize])
    }

    pub fn playable(&self) -> bool {
        self.state == RoundState::Playing
    }
}
