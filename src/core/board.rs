//! Board module - grid occupancy, placement legality, commits and line clears
//!
//! The board is a fixed `width` x `height` grid stored as a flat row-major
//! vector (`index = x + y * width`). Coordinates: (0, 0) is bottom-left,
//! x grows right, y grows up.
//!
//! Each occupied cell can carry an opaque caller-supplied `tag` (generic
//! `T`). The tag lets a presentation layer find "what visual object occupies
//! this cell" when lines clear; the engine stores and returns tags without
//! ever interpreting them.

use arrayvec::ArrayVec;

use crate::core::scoring::line_clear_score;
use crate::core::shape::Shape;
use crate::types::{GridPos, MAX_BOARD_DIM};

const MAX_DIM: usize = MAX_BOARD_DIM as usize;

/// One board cell: occupancy flag plus the optional opaque tag.
///
/// `tag` is only ever populated for occupied cells; clearing a line resets
/// both together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellState<T> {
    pub occupied: bool,
    pub tag: Option<T>,
}

impl<T> Default for CellState<T> {
    fn default() -> Self {
        Self {
            occupied: false,
            tag: None,
        }
    }
}

/// Errors from [`Board::commit`].
///
/// `commit` re-validates internally, so a caller that checks
/// [`Board::can_place`] first never sees `InvalidPlacement`; it exists so an
/// unvalidated commit is rejected loudly instead of corrupting the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitError {
    /// The placement is out of bounds or overlaps occupied cells.
    InvalidPlacement,
    /// The tag slice does not cover the shape's cell mask.
    TagCountMismatch { expected: usize, got: usize },
}

impl CommitError {
    pub fn code(self) -> &'static str {
        match self {
            CommitError::InvalidPlacement => "invalid_placement",
            CommitError::TagCountMismatch { .. } => "tag_count_mismatch",
        }
    }
}

impl std::fmt::Display for CommitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitError::InvalidPlacement => {
                write!(f, "commit without a legal placement")
            }
            CommitError::TagCountMismatch { expected, got } => {
                write!(f, "expected {expected} cell tags, got {got}")
            }
        }
    }
}

impl std::error::Error for CommitError {}

/// A cell emptied by [`Board::clear_full_lines`], with the tag it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearedCell<T> {
    pub x: u8,
    pub y: u8,
    pub tag: Option<T>,
}

/// Result of one clear pass: the combo score and every emptied cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearOutcome<T> {
    pub score_delta: u32,
    /// Row-major; a cell at a row/column intersection appears exactly once.
    pub cleared: Vec<ClearedCell<T>>,
}

impl<T> ClearOutcome<T> {
    fn empty() -> Self {
        Self {
            score_delta: 0,
            cleared: Vec::new(),
        }
    }
}

/// The game board for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<T> {
    width: u8,
    height: u8,
    /// Flat row-major cell storage (y * width + x).
    cells: Vec<CellState<T>>,
}

impl<T> Board<T> {
    /// Create a new empty board.
    ///
    /// Panics if either dimension is zero or exceeds [`MAX_BOARD_DIM`];
    /// board geometry is fixed configuration, not runtime input.
    pub fn new(width: u8, height: u8) -> Self {
        assert!(
            (1..=MAX_BOARD_DIM).contains(&width) && (1..=MAX_BOARD_DIM).contains(&height),
            "board dimensions must be within 1..={MAX_BOARD_DIM}"
        );
        let size = width as usize * height as usize;
        let mut cells = Vec::with_capacity(size);
        cells.resize_with(size, CellState::default);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Flat index for in-bounds coordinates.
    #[inline(always)]
    fn index(&self, x: u8, y: u8) -> usize {
        x as usize + y as usize * self.width as usize
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Cell at (x, y), or `None` when out of bounds.
    pub fn cell(&self, x: u8, y: u8) -> Option<&CellState<T>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(&self.cells[self.index(x, y)])
    }

    /// Whether (x, y) is within bounds and occupied.
    pub fn is_occupied(&self, x: u8, y: u8) -> bool {
        self.cell(x, y).is_some_and(|c| c.occupied)
    }

    /// Flat row-major view of all cells (for snapshots and redraw).
    pub fn cells(&self) -> &[CellState<T>] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.occupied).count()
    }

    /// The sole placement-legality predicate, pure and read-only.
    ///
    /// True iff the shape's bounding box lies fully inside the board (no
    /// partial placement, no wraparound) and every *filled* shape cell lands
    /// on an unoccupied board cell. Empty mask cells may overlap anything.
    pub fn can_place(&self, shape: &Shape, origin: GridPos) -> bool {
        let x_end = origin.x as usize + shape.width() as usize;
        let y_end = origin.y as usize + shape.height() as usize;
        if x_end > self.width as usize || y_end > self.height as usize {
            return false;
        }

        shape
            .filled_cells()
            .all(|(lx, ly)| !self.cells[self.index(origin.x + lx, origin.y + ly)].occupied)
    }

    /// Apply a placement: mark the shape's filled cells occupied and record
    /// the caller's per-cell tags.
    ///
    /// `tags` is indexed like the shape mask (`lx + ly * width`); entries
    /// for empty mask cells are ignored. A tag is written only if the board
    /// cell does not already carry one - first writer wins. All validation
    /// happens before any mutation, so a failed commit leaves the board
    /// untouched. Commits never remove occupancy.
    pub fn commit(
        &mut self,
        shape: &Shape,
        origin: GridPos,
        tags: Vec<Option<T>>,
    ) -> Result<(), CommitError> {
        if tags.len() != shape.cells().len() {
            return Err(CommitError::TagCountMismatch {
                expected: shape.cells().len(),
                got: tags.len(),
            });
        }
        if !self.can_place(shape, origin) {
            return Err(CommitError::InvalidPlacement);
        }

        let shape_width = shape.width() as usize;
        for (idx, tag) in tags.into_iter().enumerate() {
            if !shape.cells()[idx] {
                continue;
            }
            let lx = (idx % shape_width) as u8;
            let ly = (idx / shape_width) as u8;
            let cell_idx = self.index(origin.x + lx, origin.y + ly);
            let cell = &mut self.cells[cell_idx];
            cell.occupied = true;
            if cell.tag.is_none() {
                cell.tag = tag;
            }
        }

        Ok(())
    }

    /// Clear every full row and column, returning the combo score and the
    /// emptied cells with their tags.
    ///
    /// Fullness is evaluated against the board as it stands on entry: both
    /// scans complete before any cell is reset, so a row's fullness is never
    /// affected by a column cleared in the same invocation. With no full
    /// lines the board is left untouched.
    pub fn clear_full_lines(&mut self) -> ClearOutcome<T> {
        let mut full_rows: ArrayVec<u8, MAX_DIM> = ArrayVec::new();
        let mut full_cols: ArrayVec<u8, MAX_DIM> = ArrayVec::new();

        for y in 0..self.height {
            if (0..self.width).all(|x| self.cells[self.index(x, y)].occupied) {
                full_rows.push(y);
            }
        }
        for x in 0..self.width {
            if (0..self.height).all(|y| self.cells[self.index(x, y)].occupied) {
                full_cols.push(x);
            }
        }

        if full_rows.is_empty() && full_cols.is_empty() {
            return ClearOutcome::empty();
        }

        let score_delta =
            line_clear_score(self.width, self.height, full_rows.len(), full_cols.len());

        let mut row_full = [false; MAX_DIM];
        let mut col_full = [false; MAX_DIM];
        for &y in &full_rows {
            row_full[y as usize] = true;
        }
        for &x in &full_cols {
            col_full[x as usize] = true;
        }

        // Single row-major pass; an intersection cell is visited once.
        let mut cleared = Vec::with_capacity(
            full_rows.len() * self.width as usize + full_cols.len() * self.height as usize,
        );
        for y in 0..self.height {
            for x in 0..self.width {
                if !row_full[y as usize] && !col_full[x as usize] {
                    continue;
                }
                let idx = self.index(x, y);
                let cell = &mut self.cells[idx];
                cleared.push(ClearedCell {
                    x,
                    y,
                    tag: cell.tag.take(),
                });
                cell.occupied = false;
            }
        }

        ClearOutcome {
            score_delta,
            cleared,
        }
    }

    /// Exhaustive loss scan: does any candidate shape fit anywhere?
    ///
    /// Brute force over every shape and every in-bounds origin, first hit
    /// wins. Deliberately naive - at these board sizes it is cheap, and its
    /// simplicity makes it a ground-truth oracle.
    pub fn any_placement_exists<'a, I>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a Shape>,
    {
        for shape in candidates {
            if shape.width() > self.width || shape.height() > self.height {
                continue;
            }
            for x in 0..=(self.width - shape.width()) {
                for y in 0..=(self.height - shape.height()) {
                    if self.can_place(shape, GridPos::new(x, y)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Reset every cell to empty, dropping all tags.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.occupied = false;
            cell.tag = None;
        }
    }
}
