//! Scoring module - combo scoring for simultaneous line clears
//!
//! A completed row is worth `width * POINTS_PER_CELL` and a completed column
//! `height * POINTS_PER_CELL`. The summed base is then multiplied by the
//! combo count (rows + columns cleared by one commit), so simultaneous
//! multi-line clears scale super-linearly. The curve is intentional
//! game-balance design and is preserved exactly.

use crate::types::POINTS_PER_CELL;

/// Score awarded for clearing `full_rows` rows and `full_cols` columns in
/// one pass over a `width` x `height` board.
pub fn line_clear_score(width: u8, height: u8, full_rows: usize, full_cols: usize) -> u32 {
    let combo = (full_rows + full_cols) as u32;
    if combo == 0 {
        return 0;
    }

    let row_points = width as u32 * POINTS_PER_CELL * full_rows as u32;
    let col_points = height as u32 * POINTS_PER_CELL * full_cols as u32;

    (row_points + col_points) * combo
}
