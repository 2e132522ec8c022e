//! Shape module - polyomino definitions and the shape catalog
//!
//! Shapes are loaded once from a text format and never mutated afterwards:
//! one shape per line, rows separated by `;` (trailing `;` allowed), with
//! `'1'` marking a filled cell and `'0'` an empty one. The first row of a
//! definition is local y = 0 (the bottom of the shape's own frame).
//!
//! Example: `"11;10;"` is a 2x2 corner piece with the top-right cell empty.

use crate::core::rng::SimpleRng;
use crate::types::MAX_BOARD_DIM;

/// Built-in definition set: bars, squares, corners and L-pieces.
pub const DEFAULT_SHAPE_DEFS: &str = "\
1;
11;
111;
1111;
11111;
1;1;
1;1;1;
1;1;1;1;
11;11;
111;111;111;
11;10;
11;01;
10;11;
01;11;
100;100;111;
111;100;100;
";

/// Errors rejecting a shape-definition text at load time.
///
/// Loading is all-or-nothing: any malformed line fails the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedShapeData {
    /// The definition text contained no shapes at all.
    NoShapes,
    /// A row in the definition has a different length than the first row.
    RaggedRows { line: usize },
    /// A character other than the two occupancy markers.
    UnrecognizedMarker { line: usize, found: char },
    /// Every cell of the shape is empty.
    BlankShape { line: usize },
    /// Shape exceeds the supported board dimensions.
    TooLarge { line: usize },
}

impl MalformedShapeData {
    pub fn code(self) -> &'static str {
        match self {
            MalformedShapeData::NoShapes => "no_shapes",
            MalformedShapeData::RaggedRows { .. } => "ragged_rows",
            MalformedShapeData::UnrecognizedMarker { .. } => "unrecognized_marker",
            MalformedShapeData::BlankShape { .. } => "blank_shape",
            MalformedShapeData::TooLarge { .. } => "too_large",
        }
    }
}

impl std::fmt::Display for MalformedShapeData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedShapeData::NoShapes => {
                write!(f, "shape definitions contain no shapes")
            }
            MalformedShapeData::RaggedRows { line } => {
                write!(f, "line {line}: rows have unequal lengths")
            }
            MalformedShapeData::UnrecognizedMarker { line, found } => {
                write!(f, "line {line}: unrecognized marker {found:?} (expected '0' or '1')")
            }
            MalformedShapeData::BlankShape { line } => {
                write!(f, "line {line}: shape has no filled cells")
            }
            MalformedShapeData::TooLarge { line } => {
                write!(f, "line {line}: shape exceeds {MAX_BOARD_DIM}x{MAX_BOARD_DIM}")
            }
        }
    }
}

impl std::error::Error for MalformedShapeData {}

/// Immutable polyomino: a bounding box plus a row-major occupancy mask.
///
/// Invariant: `cells.len() == width * height` and at least one cell is true.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: Vec<bool>,
}

impl Shape {
    /// Build a shape directly from a mask.
    ///
    /// Panics if the mask length does not match the bounding box or no cell
    /// is filled. Definition text loaded through [`ShapeCatalog::load`] is
    /// validated up front and reports errors instead.
    pub fn new(width: u8, height: u8, cells: Vec<bool>) -> Self {
        assert_eq!(
            cells.len(),
            width as usize * height as usize,
            "mask length must match bounding box"
        );
        assert!(cells.iter().any(|&c| c), "shape must have a filled cell");
        Self {
            width,
            height,
            cells,
        }
    }

    /// Parse a single definition line (`line_no` is 1-based, for errors).
    fn parse(def: &str, line_no: usize) -> Result<Self, MalformedShapeData> {
        let def = def.trim();
        let mut rows: Vec<&str> = def.split(';').collect();
        // A well-formed line ends with ';', leaving one empty trailing
        // segment. Drop it; a missing trailing ';' is tolerated.
        if rows.last() == Some(&"") {
            rows.pop();
        }

        let width = rows.first().map_or(0, |r| r.chars().count());
        if width == 0 {
            return Err(MalformedShapeData::BlankShape { line: line_no });
        }
        if width > MAX_BOARD_DIM as usize || rows.len() > MAX_BOARD_DIM as usize {
            return Err(MalformedShapeData::TooLarge { line: line_no });
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for row in &rows {
            if row.chars().count() != width {
                return Err(MalformedShapeData::RaggedRows { line: line_no });
            }
            for ch in row.chars() {
                match ch {
                    '0' => cells.push(false),
                    '1' => cells.push(true),
                    found => {
                        return Err(MalformedShapeData::UnrecognizedMarker {
                            line: line_no,
                            found,
                        })
                    }
                }
            }
        }

        if !cells.iter().any(|&c| c) {
            return Err(MalformedShapeData::BlankShape { line: line_no });
        }

        Ok(Self {
            width: width as u8,
            height: rows.len() as u8,
            cells,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Row-major occupancy mask (`index = x + y * width`).
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Occupancy of the shape-local cell (lx, ly). Callers stay in bounds.
    #[inline]
    pub fn cell(&self, lx: u8, ly: u8) -> bool {
        self.cells[lx as usize + ly as usize * self.width as usize]
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Iterate the shape-local coordinates of every filled cell.
    pub fn filled_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &filled)| filled)
            .map(move |(idx, _)| ((idx % width) as u8, (idx / width) as u8))
    }
}

/// The fixed set of shapes a round draws new pieces from.
///
/// Loaded once, then read-only; rounds receive the catalog by injection
/// rather than through any global lookup.
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
}

impl ShapeCatalog {
    /// Parse a full definition text, one shape per non-empty line.
    pub fn load(defs: &str) -> Result<Self, MalformedShapeData> {
        let mut shapes = Vec::new();
        for (idx, line) in defs.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            shapes.push(Shape::parse(line, idx + 1)?);
        }

        if shapes.is_empty() {
            return Err(MalformedShapeData::NoShapes);
        }

        Ok(Self { shapes })
    }

    /// Catalog with the built-in shape set. Infallible: the default text is
    /// covered by tests.
    pub fn default_set() -> Self {
        match Self::load(DEFAULT_SHAPE_DEFS) {
            Ok(catalog) => catalog,
            Err(err) => unreachable!("built-in shape defs are valid: {err}"),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Draw a uniformly random shape. The catalog is never empty, so this
    /// cannot fail.
    pub fn sample(&self, rng: &mut SimpleRng) -> &Shape {
        let idx = rng.next_range(self.shapes.len() as u32) as usize;
        &self.shapes[idx]
    }
}
