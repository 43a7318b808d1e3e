use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer may know about one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub row: Coord,
    pub col: Coord,
    pub revealed: bool,
    pub flagged: bool,
    /// Disclosed once the cell is revealed or the game is over.
    pub mine: Option<bool>,
    /// Disclosed once the cell is revealed.
    pub neighbor_mine_count: Option<u8>,
}

impl CellView {
    pub fn from_cell(cell: &Cell, game_over: bool) -> Self {
        let revealed = cell.is_revealed();
        Self {
            row: cell.row(),
            col: cell.col(),
            revealed,
            flagged: cell.is_flagged(),
            mine: (revealed || game_over).then_some(cell.is_mine()),
            neighbor_mine_count: revealed.then_some(cell.neighbor_mine_count()),
        }
    }

    /// Flag left on a safe cell at the end of the game.
    pub fn is_misplaced_flag(&self) -> bool {
        self.flagged && self.mine == Some(false)
    }
}

/// Serializable render view of a [`Board`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub status: BoardStatus,
    pub config: GameConfig,
    pub remaining_mine_count: i64,
    pub triggered_mine: Option<Coord2>,
    /// `None` while the board is `Ready`.
    pub cells: Option<Array2<CellView>>,
}

impl BoardSnapshot {
    pub fn from_board(board: &Board) -> Self {
        let game_over = board.is_finished();
        Self {
            status: board.status(),
            config: board.config(),
            remaining_mine_count: board.remaining_mine_count(),
            triggered_mine: board.triggered_mine(),
            cells: board
                .grid()
                .map(|grid| grid.map(|cell| CellView::from_cell(cell, game_over))),
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<&CellView> {
        self.cells.as_ref()?.get(coords.to_nd_index())
    }
}

impl Board {
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_board(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_layout(MineLayout::from_mine_coords(size, mines).unwrap()).unwrap()
    }

    #[test]
    fn ready_board_has_no_cells() {
        let snapshot = board((2, 2), &[(0, 0)]).snapshot();

        assert_eq!(snapshot.status, BoardStatus::Ready);
        assert!(snapshot.cells.is_none());
        assert_eq!(snapshot.remaining_mine_count, 1);
    }

    #[test]
    fn hides_unrevealed_cells_while_playing() {
        let mut board = board((2, 3), &[(0, 0)]);
        board.reveal((0, 1)).unwrap();

        let snapshot = board.snapshot();
        let revealed = snapshot.cell((0, 1)).unwrap();
        assert_eq!(revealed.mine, Some(false));
        assert_eq!(revealed.neighbor_mine_count, Some(1));

        let hidden = snapshot.cell((0, 0)).unwrap();
        assert_eq!(hidden.mine, None);
        assert_eq!(hidden.neighbor_mine_count, None);
        assert!(snapshot.cell((5, 5)).is_none());
    }

    #[test]
    fn shows_misplaced_flags_after_loss() {
        let mut board = board((2, 3), &[(0, 0)]);
        board.reveal((0, 1)).unwrap();
        board.flag((1, 0)).unwrap();
        board.reveal((0, 0)).unwrap();

        let snapshot = board.snapshot();
        assert_eq!(snapshot.status, BoardStatus::Lost);
        assert_eq!(snapshot.triggered_mine, Some((0, 0)));
        assert!(snapshot.cell((1, 0)).unwrap().is_misplaced_flag());
        assert!(
            snapshot
                .cells
                .as_ref()
                .unwrap()
                .iter()
                .all(|cell| cell.revealed && cell.mine.is_some())
        );
    }

    #[test]
    fn serializes_to_json() {
        let mut board = board((1, 2), &[(0, 1)]);
        board.reveal((0, 0)).unwrap();

        let json = serde_json::to_value(board.snapshot()).unwrap();
        assert_eq!(json["status"], "Won");
        assert_eq!(json["config"]["mines"], 1);
        assert_eq!(json["remaining_mine_count"], 1);
    }
}
