//! Wraparound index math for an M x N torus.
//!
//! Cells are stored in a flat row-major vector: the cell at column `c`,
//! row `r` lives at `r * width + c`. Neighbor lookups wrap in all four
//! directions, so east of the last column is column 0 and north of row 0 is
//! the last row.

use dilemma_types::{CellPos, Direction};

/// Dimensions of a torus and the index math over them.
///
/// Both dimensions are at least 1; [`WorldGrid`](crate::WorldGrid) rejects
/// empty grids before a `Torus` is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Torus {
    width: usize,
    height: usize,
}

impl Torus {
    pub(crate) const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub const fn len(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Always `false`: a torus has at least one cell.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of a position.
    pub const fn index(&self, pos: CellPos) -> usize {
        pos.row.saturating_mul(self.width).saturating_add(pos.column)
    }

    /// Position of a flat index.
    pub const fn pos(&self, index: usize) -> CellPos {
        match (index.checked_rem(self.width), index.checked_div(self.width)) {
            (Some(column), Some(row)) => CellPos { column, row },
            _ => CellPos { column: 0, row: 0 },
        }
    }

    /// The neighbor of `pos` in `direction`, wrapping around the edges.
    pub const fn neighbor(&self, pos: CellPos, direction: Direction) -> CellPos {
        match direction {
            Direction::North => CellPos {
                column: pos.column,
                row: step_back(pos.row, self.height),
            },
            Direction::East => CellPos {
                column: step_forward(pos.column, self.width),
                row: pos.row,
            },
            Direction::South => CellPos {
                column: pos.column,
                row: step_forward(pos.row, self.height),
            },
            Direction::West => CellPos {
                column: step_back(pos.column, self.width),
                row: pos.row,
            },
        }
    }

    /// Flat index of the neighbor of `index` in `direction`.
    pub const fn neighbor_index(&self, index: usize, direction: Direction) -> usize {
        self.index(self.neighbor(self.pos(index), direction))
    }

    /// Flat indices in replacement traversal order: columns outer, rows inner.
    pub fn column_major(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.width).flat_map(move |column| {
            (0..self.height).map(move |row| self.index(CellPos { column, row }))
        })
    }
}

const fn step_forward(i: usize, n: usize) -> usize {
    let next = i.saturating_add(1);
    if next >= n { 0 } else { next }
}

const fn step_back(i: usize, n: usize) -> usize {
    if i == 0 { n.saturating_sub(1) } else { i.saturating_sub(1) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        let torus = Torus::new(4, 3);
        assert_eq!(torus.len(), 12);
        assert_eq!(torus.index(CellPos::new(2, 1)), 6);
        assert_eq!(torus.pos(6), CellPos::new(2, 1));
        assert_eq!(torus.pos(11), CellPos::new(3, 2));
    }

    #[test]
    fn east_of_last_column_wraps() {
        let torus = Torus::new(5, 4);
        assert_eq!(torus.neighbor(CellPos::new(4, 2), Direction::East), CellPos::new(0, 2));
        assert_eq!(torus.neighbor(CellPos::new(0, 2), Direction::West), CellPos::new(4, 2));
    }

    #[test]
    fn north_of_first_row_wraps() {
        let torus = Torus::new(5, 4);
        assert_eq!(torus.neighbor(CellPos::new(1, 0), Direction::North), CellPos::new(1, 3));
        assert_eq!(torus.neighbor(CellPos::new(1, 3), Direction::South), CellPos::new(1, 0));
    }

    #[test]
    fn interior_neighbors() {
        let torus = Torus::new(5, 4);
        let here = CellPos::new(2, 2);
        assert_eq!(torus.neighbor(here, Direction::North), CellPos::new(2, 1));
        assert_eq!(torus.neighbor(here, Direction::East), CellPos::new(3, 2));
        assert_eq!(torus.neighbor(here, Direction::South), CellPos::new(2, 3));
        assert_eq!(torus.neighbor(here, Direction::West), CellPos::new(1, 2));
    }

    #[test]
    fn single_cell_is_its_own_neighbor() {
        let torus = Torus::new(1, 1);
        for direction in Direction::ALL {
            assert_eq!(torus.neighbor_index(0, direction), 0);
        }
    }

    #[test]
    fn opposite_steps_cancel() {
        let torus = Torus::new(3, 7);
        for index in 0..torus.len() {
            let north = torus.neighbor_index(index, Direction::North);
            assert_eq!(torus.neighbor_index(north, Direction::South), index);
            let east = torus.neighbor_index(index, Direction::East);
            assert_eq!(torus.neighbor_index(east, Direction::West), index);
        }
    }

    #[test]
    fn column_major_order() {
        let torus = Torus::new(2, 3);
        let order: Vec<_> = torus.column_major().collect();
        assert_eq!(order, vec![0, 2, 4, 1, 3, 5]);
    }
}
