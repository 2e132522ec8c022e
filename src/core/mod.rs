//! Core module - pure game rules with no external collaborators
//!
//! This module contains the whole rules engine: shapes, the board, line
//! clears, scoring and the round supervisor. It performs no I/O and knows
//! nothing about rendering or input.

pub mod board;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod shape;
pub mod snapshot;

// Re-export commonly used types
pub use board::{Board, CellState, ClearOutcome, ClearedCell, CommitError};
pub use rng::SimpleRng;
pub use round::{PlaceOutcome, Round, RoundError, ShapeInstance};
pub use shape::{MalformedShapeData, Shape, ShapeCatalog, DEFAULT_SHAPE_DEFS};
pub use snapshot::RoundSnapshot;
