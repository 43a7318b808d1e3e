use ndarray::Array2;

/// Single coordinate axis used for row/column counts and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row-major flat index of `coords` on a board `cols` wide.
pub const fn flat_index((row, col): Coord2, cols: Coord) -> CellCount {
    row as CellCount * cols as CellCount + col as CellCount
}

/// Inverse of [`flat_index`].
pub const fn from_flat_index(index: CellCount, cols: Coord) -> Coord2 {
    let cols = cols as CellCount;
    ((index / cols) as Coord, (index % cols) as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let bounds = (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, bounds)
    }
}

/// In-bounds 8-neighborhood of a cell, in row-major order.
///
/// Walks the 3x3 window around `center` clipped to the board and skips the center itself. Owns its bounds so
/// it never borrows the grid.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    first_col: Coord,
    last_row: Coord,
    last_col: Coord,
    next: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, (rows, cols): Coord2) -> Self {
        let (row, col) = center;
        let first_row = row.saturating_sub(1);
        let first_col = col.saturating_sub(1);
        let last_row = row.saturating_add(1).min(rows.saturating_sub(1));
        let last_col = col.saturating_add(1).min(cols.saturating_sub(1));

        let window_is_empty = rows == 0 || cols == 0 || first_row > last_row || first_col > last_col;
        Self {
            center,
            first_col,
            last_row,
            last_col,
            next: (!window_is_empty).then_some((first_row, first_col)),
        }
    }

    fn step((row, col): Coord2, first_col: Coord, last_row: Coord, last_col: Coord) -> Option<Coord2> {
        if col < last_col {
            Some((row, col + 1))
        } else if row < last_row {
            Some((row + 1, first_col))
        } else {
            None
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.next?;
            self.next = Self::step(current, self.first_col, self.last_row, self.last_col);
            if current != self.center {
                return Some(current);
            }
        }
    }
}

impl core::iter::FusedIterator for NeighborIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(1, 1)));
        assert!(neighbors.contains(&(0, 0)));
        assert!(neighbors.contains(&(2, 2)));
    }

    #[test]
    fn corner_and_edge_cells_are_clipped() {
        assert_eq!(NeighborIter::new((0, 0), (3, 3)).count(), 3);
        assert_eq!(NeighborIter::new((2, 2), (3, 3)).count(), 3);
        assert_eq!(NeighborIter::new((0, 1), (3, 3)).count(), 5);
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn single_row_board() {
        let neighbors: Vec<_> = NeighborIter::new((0, 2), (1, 5)).collect();
        assert_eq!(neighbors, vec![(0, 1), (0, 3)]);
    }

    #[test]
    fn yields_row_major_order() {
        let neighbors: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();
        assert_eq!(
            neighbors,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn center_outside_board_only_sees_adjacent_cells() {
        let neighbors: Vec<_> = NeighborIter::new((3, 1), (3, 3)).collect();
        assert_eq!(neighbors, vec![(2, 0), (2, 1), (2, 2)]);

        assert_eq!(NeighborIter::new((5, 5), (3, 3)).count(), 0);
        assert_eq!(NeighborIter::new((0, 0), (0, 0)).count(), 0);
    }

    #[test]
    fn flat_index_round_trips() {
        assert_eq!(flat_index((2, 3), 5), 13);
        assert_eq!(from_flat_index(13, 5), (2, 3));
    }
}
