//! Tile grid - the authoritative collidable world state
//!
//! Rows grow downward from row 0. Reads outside the grid return
//! [`Cell::Empty`] and writes outside it are dropped, so callers can probe
//! neighbors near the edges without bounds checks of their own.

use serde::{Deserialize, Serialize};

use super::block::{BlockKind, BlockTable};

/// Occupancy of one grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Block { kind: BlockKind },
}

impl Cell {
    #[inline]
    pub fn block(kind: BlockKind) -> Self {
        Cell::Block { kind }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub fn kind(&self) -> Option<BlockKind> {
        match *self {
            Cell::Empty => None,
            Cell::Block { kind } => Some(kind),
        }
    }

    /// Display value, looked up from the block table
    pub fn value(&self, table: &BlockTable) -> Option<u32> {
        self.kind().map(|kind| table.value(kind))
    }
}

/// Fixed-size 2D array of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

/// Unchecked wire form of [`TileGrid`]
#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for TileGrid {
    type Error = String;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let expected = raw.rows.checked_mul(raw.cols);
        if expected != Some(raw.cells.len()) {
            return Err(format!(
                "grid is {}x{} but holds {} cells",
                raw.rows,
                raw.cols,
                raw.cells.len()
            ));
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            cells: raw.cells,
        })
    }
}

impl TileGrid {
    /// An all-empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether (row, col) is inside the grid. Takes signed indices so
    /// callers can pass probe coordinates that fell off the left/top edge.
    #[inline]
    pub fn in_bounds(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as u64) < self.rows as u64 && (col as u64) < self.cols as u64
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Cell at (row, col); Empty when out of range
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.index(row, col)
            .map(|i| self.cells[i])
            .unwrap_or(Cell::Empty)
    }

    /// Signed-index variant of [`TileGrid::get`]
    #[inline]
    pub fn get_signed(&self, row: i64, col: i64) -> Cell {
        if self.in_bounds(row, col) {
            self.cells[row as usize * self.cols + col as usize]
        } else {
            Cell::Empty
        }
    }

    /// Overwrite a cell; ignored when out of range
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = cell;
        }
    }

    /// Write only if the cell is currently empty. Returns true if written.
    pub fn set_if_empty(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(i) if self.cells[i].is_empty() => {
                self.cells[i] = cell;
                true
            }
            _ => false,
        }
    }

    /// Empty a cell, returning what was there
    pub fn remove(&mut self, row: usize, col: usize) -> Cell {
        match self.index(row, col) {
            Some(i) => std::mem::take(&mut self.cells[i]),
            None => Cell::Empty,
        }
    }

    #[inline]
    pub fn is_solid(&self, row: i64, col: i64) -> bool {
        !self.get_signed(row, col).is_empty()
    }

    /// Topmost occupied row in a column
    pub fn first_solid_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).find(|&row| !self.get(row, col).is_empty())
    }

    /// Occupied cells within rows[r0..r1) x cols[c0..c1), clamped to the grid,
    /// in row-major order
    pub fn cells_in(
        &self,
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
    ) -> impl Iterator<Item = (usize, usize, BlockKind)> + '_ {
        let rows = rows.start.min(self.rows)..rows.end.min(self.rows);
        let cols = cols.start.min(self.cols)..cols.end.min(self.cols);
        rows.flat_map(move |row| {
            let cols = cols.clone();
            cols.filter_map(move |col| self.get(row, col).kind().map(|kind| (row, col, kind)))
        })
    }

    /// Number of cells holding the given kind
    pub fn count(&self, kind: BlockKind) -> usize {
        self.cells
            .iter()
            .filter(|c| c.kind() == Some(kind))
            .count()
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        if row >= self.rows {
            return &[];
        }
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }
}
