use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine positions for one grid generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds {
                    row: coords.0,
                    col: coords.1,
                });
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    /// Layout of `size` with mines at the given row-major flat indices.
    pub fn from_flat_indices(size: Coord2, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        if let Some(cells) = mine_mask.as_slice_mut() {
            for index in indices {
                cells[index] = true;
            }
        }
        Self::from_mine_mask(mine_mask)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}
