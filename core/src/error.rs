use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {rows}x{cols} board with {mines} mines")]
    InvalidConfiguration {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
    #[error("Coordinates ({row}, {col}) are out of bounds")]
    OutOfBounds { row: Coord, col: Coord },
}

pub type Result<T> = core::result::Result<T, GameError>;
