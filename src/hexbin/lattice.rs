//! Two interleaved sublattices whose union tiles the plane with hexagons.
//!
//! Sublattice A sits on integer grid coordinates `(col, row)` for
//! `col in 0..=nx`, `row in 0..=ny`; sublattice B sits on the half-integer
//! offsets `(col + 0.5, row + 0.5)` for `col in 0..nx`, `row in 0..ny`.
//! Cells are stored A first, then B, each column-major by `(col, row)`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which of the two interleaved lattices a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sublattice {
    /// Integer grid points.
    A,
    /// Grid points offset by half a cell in both directions.
    B,
}

/// Address of one hexagonal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellId {
    /// Owning sublattice.
    pub sublattice: Sublattice,
    /// Column within the sublattice.
    pub col: usize,
    /// Row within the sublattice.
    pub row: usize,
}

impl CellId {
    /// Create a cell address.
    #[must_use]
    pub const fn new(sublattice: Sublattice, col: usize, row: usize) -> Self {
        Self {
            sublattice,
            col,
            row,
        }
    }
}

/// Geometry of a hexagonal lattice of `nx` by `ny` grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexLattice {
    nx: usize,
    ny: usize,
}

impl HexLattice {
    /// Create a lattice; both dimensions must be non-zero.
    #[must_use]
    pub const fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny }
    }

    /// Grid cells along x.
    #[must_use]
    pub const fn nx(&self) -> usize {
        self.nx
    }

    /// Grid cells along y.
    #[must_use]
    pub const fn ny(&self) -> usize {
        self.ny
    }

    const fn len_a(&self) -> usize {
        (self.nx + 1) * (self.ny + 1)
    }

    /// Total number of cells on both sublattices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len_a() + self.nx * self.ny
    }

    /// Whether the lattice has no cells (never true for a valid lattice).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Assign a point given in grid units to its nearest cell.
    ///
    /// Distances weight the y offset by 3 so that cells are regular hexagons
    /// at the 1:√3 aspect used for placement. Sublattice A wins exact ties.
    /// Returns `None` for non-finite coordinates and for points whose nearest
    /// cell lies outside the lattice.
    #[must_use]
    pub fn assign(&self, x: f64, y: f64) -> Option<CellId> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let ix1 = x.round_ties_even();
        let iy1 = y.round_ties_even();
        let ix2 = x.floor();
        let iy2 = y.floor();

        let d1 = (x - ix1).powi(2) + 3.0 * (y - iy1).powi(2);
        let d2 = (x - ix2 - 0.5).powi(2) + 3.0 * (y - iy2 - 0.5).powi(2);

        if d1 <= d2 {
            Self::cell_in(Sublattice::A, ix1, iy1, self.nx + 1, self.ny + 1)
        } else {
            Self::cell_in(Sublattice::B, ix2, iy2, self.nx, self.ny)
        }
    }

    fn cell_in(sublattice: Sublattice, col: f64, row: f64, cols: usize, rows: usize) -> Option<CellId> {
        let in_range = |v: f64, n: usize| v >= 0.0 && v < n as f64;
        (in_range(col, cols) && in_range(row, rows))
            .then(|| CellId::new(sublattice, col as usize, row as usize))
    }

    /// Storage index of a cell.
    #[must_use]
    pub const fn index(&self, cell: CellId) -> usize {
        match cell.sublattice {
            Sublattice::A => cell.col * (self.ny + 1) + cell.row,
            Sublattice::B => self.len_a() + cell.col * self.ny + cell.row,
        }
    }

    /// Cell stored at `index`, if in range.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<CellId> {
        if index < self.len_a() {
            Some(CellId::new(Sublattice::A, index / (self.ny + 1), index % (self.ny + 1)))
        } else if index < self.len() {
            let i = index - self.len_a();
            Some(CellId::new(Sublattice::B, i / self.ny, i % self.ny))
        } else {
            None
        }
    }

    /// Iterate over all cells in storage order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.len()).filter_map(|i| self.cell(i))
    }

    /// Center of a cell in grid units.
    #[must_use]
    pub fn center(cell: CellId) -> (f64, f64) {
        let offset = match cell.sublattice {
            Sublattice::A => 0.0,
            Sublattice::B => 0.5,
        };
        (cell.col as f64 + offset, cell.row as f64 + offset)
    }
}

/// Vertex offsets of a hexagon around its center, in units of one grid cell.
///
/// Multiply x by the cell width and y by the cell height.
pub const HEXAGON_OFFSETS: [(f64, f64); 6] = [
    (0.5, -0.5 / 3.0),
    (0.5, 0.5 / 3.0),
    (0.0, 1.0 / 3.0),
    (-0.5, 0.5 / 3.0),
    (-0.5, -0.5 / 3.0),
    (0.0, -1.0 / 3.0),
];
