use serde::{Deserialize, Serialize};

use crate::*;

/// One grid position. Mine identity and neighbor count are fixed when the grid is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: Coord,
    col: Coord,
    is_mine: bool,
    neighbor_mine_count: u8,
    revealed: bool,
    flagged: bool,
}

impl Cell {
    pub(crate) const fn new(coords: Coord2, is_mine: bool, neighbor_mine_count: u8) -> Self {
        Self {
            row: coords.0,
            col: coords.1,
            is_mine,
            neighbor_mine_count,
            revealed: false,
            flagged: false,
        }
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn neighbor_mine_count(&self) -> u8 {
        self.neighbor_mine_count
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// No mine here and none around it.
    pub const fn is_empty(&self) -> bool {
        self.neighbor_mine_count == 0 && !self.is_mine
    }

    /// Revealed safe cell showing a non-zero count.
    pub const fn is_numbered(&self) -> bool {
        self.revealed && !self.is_mine && self.neighbor_mine_count > 0
    }

    /// Opens the cell and drops any flag on it.
    pub(crate) fn open(&mut self) {
        self.revealed = true;
        self.flagged = false;
    }

    /// Opens the cell for the end-of-game display, keeping the flag so misplaced ones can be shown.
    pub(crate) fn expose(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }
}
