//! Core types shared across the crate
//! This module contains pure data types with no external dependencies

/// Default board dimensions (the classic 8x8 game)
pub const DEFAULT_BOARD_WIDTH: u8 = 8;
pub const DEFAULT_BOARD_HEIGHT: u8 = 8;

/// Largest supported board edge. Keeps the line-clear scratch lists on the
/// stack (see `core::board`).
pub const MAX_BOARD_DIM: u8 = 64;

/// Number of shape instances dealt into the unplaced hand at round start and
/// on each refill.
pub const DEFAULT_HAND_SIZE: usize = 3;

/// Points awarded per cell of a completed line before the combo multiplier.
pub const POINTS_PER_CELL: u32 = 5;

/// Grid coordinate of a placement origin: the board cell that the shape's
/// local (0, 0) cell lands on. (0, 0) is the bottom-left of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: u8,
    pub y: u8,
}

impl GridPos {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Caller-visible identity of one in-play shape instance.
///
/// Ids are unique within a round and never reused, so a stale handle from a
/// previous hand is reported as unknown rather than silently matching a new
/// instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u32);

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Round lifecycle. `GameOver` is terminal until an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundState {
    Playing,
    GameOver,
}

impl RoundState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundState::Playing => "playing",
            RoundState::GameOver => "game_over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_pos_display() {
        assert_eq!(GridPos::new(3, 7).to_string(), "(3, 7)");
    }

    #[test]
    fn test_round_state_str() {
        assert_eq!(RoundState::Playing.as_str(), "playing");
        assert_eq!(RoundState::GameOver.as_str(), "game_over");
    }
}
