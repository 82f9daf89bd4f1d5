//! Uniform cell grids laid over a platform or roof.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of one grid cell. Row 0 sits at the minimum-z edge, column 0 at the
/// minimum-x edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A `rows × cols` partition into square cells of side `cell_size`, centered
/// on the local origin.
///
/// # Examples
///
/// ```
/// use renewables_planner::placement::grid::{Cell, Grid};
///
/// let grid = Grid::square(20.0, 10);
/// assert_eq!(grid.cell_size(), 2.0);
/// assert_eq!(grid.cell_center(Cell::new(0, 0)), (-9.0, -9.0));
/// assert_eq!(grid.cell_center(Cell::new(9, 9)), (9.0, 9.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cell_size: f32,
}

impl Grid {
    /// Creates a rectangular grid.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero or `cell_size` is not positive.
    pub fn new(rows: usize, cols: usize, cell_size: f32) -> Self {
        assert!(rows > 0, "rows must be > 0");
        assert!(cols > 0, "cols must be > 0");
        assert!(cell_size > 0.0, "cell_size must be > 0");
        Self {
            rows,
            cols,
            cell_size,
        }
    }

    /// Splits a square platform of side `platform_size` into `grid_size ×
    /// grid_size` cells.
    ///
    /// # Panics
    ///
    /// Panics if `grid_size` is zero or `platform_size` is not positive.
    pub fn square(platform_size: f32, grid_size: usize) -> Self {
        assert!(grid_size > 0, "grid_size must be > 0");
        Self::new(grid_size, grid_size, platform_size / grid_size as f32)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of cells in the grid, `None` on overflow.
    pub fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Returns `true` when `cell` indexes into this grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// World-space `(x, z)` center of `cell`.
    ///
    /// `x = (col - cols/2) * cell_size + cell_size/2`, and likewise for `z`
    /// with rows. Cells outside the grid still map onto the same lattice.
    pub fn cell_center(&self, cell: Cell) -> (f32, f32) {
        let half = self.cell_size / 2.0;
        let x = (cell.col as f32 - self.cols as f32 / 2.0) * self.cell_size + half;
        let z = (cell.row as f32 - self.rows as f32 / 2.0) * self.cell_size + half;
        (x, z)
    }

    /// Cell containing world position `(x, z)`, or `None` outside the grid.
    pub fn cell_at(&self, x: f32, z: f32) -> Option<Cell> {
        let col = (x / self.cell_size + self.cols as f32 / 2.0).floor();
        let row = (z / self.cell_size + self.rows as f32 / 2.0).floor();
        if !col.is_finite() || !row.is_finite() || col < 0.0 || row < 0.0 {
            return None;
        }
        let cell = Cell::new(row as usize, col as usize);
        self.contains(cell).then_some(cell)
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }
}
