//! Static tile grid and the world/grid coordinate mapping.
//!
//! The grid is stored row-major with row 0 at the most negative world Z and
//! column 0 at the most negative world X. World origin sits at the grid's
//! centre, so a 12×12 grid of 4 m tiles spans -24..24 on both axes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellKind {
    /// Walkable floor.
    #[default]
    Open,
    /// Solid wall, full tile footprint.
    Wall,
}

impl CellKind {
    /// Map the numeric tile codes used by map data (`0` open, `1` wall).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Open),
            1 => Some(Self::Wall),
            _ => None,
        }
    }

    /// Map the ASCII tile characters (`.` open, `#` wall).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' | ' ' => Some(Self::Open),
            '#' => Some(Self::Wall),
            _ => None,
        }
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Reasons a grid can be rejected at load time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("tile size must be finite and positive, got {0}")]
    InvalidTileSize(f32),

    #[error("unknown tile code {code} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, code: u32 },
}

/// A grid cell address. Signed so out-of-range lookups are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Immutable rectangular tile grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<CellKind>,
    width: usize,
    height: usize,
    tile_size: f32,
}

impl Grid {
    /// Build a grid from rows of cell kinds.
    pub fn new(rows: Vec<Vec<CellKind>>, tile_size: f32) -> Result<Self, GridError> {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(GridError::InvalidTileSize(tile_size));
        }

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, line) in rows.into_iter().enumerate() {
            if line.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
            cells.extend(line);
        }

        Ok(Self {
            cells,
            width,
            height,
            tile_size,
        })
    }

    /// Build a grid from numeric map data (`0` open, `1` wall).
    pub fn from_codes(rows: &[Vec<u8>], tile_size: f32) -> Result<Self, GridError> {
        let mut kinds = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let mut out = Vec::with_capacity(line.len());
            for (col, &code) in line.iter().enumerate() {
                let kind = CellKind::from_code(code).ok_or(GridError::UnknownTile {
                    row,
                    col,
                    code: u32::from(code),
                })?;
                out.push(kind);
            }
            kinds.push(out);
        }
        Self::new(kinds, tile_size)
    }

    /// Build a grid from ASCII rows (`#` wall, `.` open).
    pub fn from_ascii<S: AsRef<str>>(rows: &[S], tile_size: f32) -> Result<Self, GridError> {
        let mut kinds = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let mut out = Vec::new();
            for (col, c) in line.as_ref().chars().enumerate() {
                let kind = CellKind::from_char(c).ok_or(GridError::UnknownTile {
                    row,
                    col,
                    code: u32::from(c),
                })?;
                out.push(kind);
            }
            kinds.push(out);
        }
        Self::new(kinds, tile_size)
    }

    /// Number of columns (world X).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows (world Z).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Half the world-space extent along X.
    pub fn half_width(&self) -> f32 {
        self.width as f32 * self.tile_size / 2.0
    }

    /// Half the world-space extent along Z.
    pub fn half_depth(&self) -> f32 {
        self.height as f32 * self.tile_size / 2.0
    }

    /// Cell kind at a cell address, `None` when outside the grid.
    pub fn get(&self, cell: Cell) -> Option<CellKind> {
        if !self.contains(cell) {
            return None;
        }
        Some(self.cells[cell.row as usize * self.width + cell.col as usize])
    }

    /// Whether a cell address lies inside the grid.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.height
            && (cell.col as usize) < self.width
    }

    /// Out-of-range cells count as walls.
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.get(cell).map_or(true, CellKind::is_wall)
    }

    /// Map a world point to the cell containing it.
    pub fn to_grid(&self, x: f32, z: f32) -> Cell {
        let col = ((x + self.half_width()) / self.tile_size).floor();
        let row = ((z + self.half_depth()) / self.tile_size).floor();
        Cell::new(saturating_index(row), saturating_index(col))
    }

    /// World-space centre `(x, z)` of a cell.
    pub fn to_world(&self, cell: Cell) -> (f32, f32) {
        let x = cell.col as f32 * self.tile_size - self.half_width() + self.tile_size / 2.0;
        let z = cell.row as f32 * self.tile_size - self.half_depth() + self.tile_size / 2.0;
        (x, z)
    }

    /// Iterate every wall cell in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, kind)| {
            kind.is_wall()
                .then(|| Cell::new((i / self.width) as i32, (i % self.width) as i32))
        })
    }
}

/// NaN lands outside the grid, infinities clamp.
fn saturating_index(value: f32) -> i32 {
    if value.is_nan() {
        i32::MIN
    } else {
        value as i32
    }
}
