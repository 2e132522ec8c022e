//! blockgrid - rules engine for a block-placement puzzle
//!
//! A fixed-size square grid accepts polyomino pieces; placing a piece that
//! completes a row or column clears that line and awards combo score; the
//! round ends when no in-play piece fits anywhere. This crate is the engine
//! only: the presentation layer (rendering, drag input, animation) calls in
//! and observes the results.
//!
//! The engine is:
//!
//! - **Deterministic**: a seed fully decides which shapes are dealt
//! - **Pure**: no I/O, no globals; everything is injected at construction
//! - **Presentation-agnostic**: occupied cells carry an opaque caller tag
//!   that is stored on commit and returned on clear, so a host can map
//!   cleared cells back to its own visual objects
//!
//! # Module structure
//!
//! - [`core::shape`]: polyomino definitions and the shape catalog
//! - [`core::board`]: occupancy grid, placement legality, commits, line
//!   clears and the exhaustive loss scan
//! - [`core::scoring`]: the combo score curve
//! - [`core::round`]: the round supervisor state machine
//! - [`core::snapshot`]: read-only view for redraw
//! - [`types`]: shared plain types and constants
//!
//! # Example
//!
//! ```
//! use blockgrid::core::{Round, ShapeCatalog};
//! use blockgrid::types::GridPos;
//!
//! let catalog = ShapeCatalog::load("1111;").unwrap();
//! let mut round: Round<u32> = Round::new(8, 8, 1, catalog, 42);
//!
//! // Two 4-bars complete row 0: 8 cells * 5 points * combo 1.
//! let id = round.unplaced()[0].id();
//! round.request_place(id, GridPos::new(0, 0), vec![None; 4]).unwrap();
//! let id = round.unplaced()[0].id();
//! let outcome = round.request_place(id, GridPos::new(4, 0), vec![None; 4]).unwrap();
//!
//! assert_eq!(outcome.score_delta, 40);
//! assert_eq!(outcome.cleared.len(), 8);
//! ```

pub mod core;
pub mod types;
