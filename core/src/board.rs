use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardStatus {
    /// No grid yet, mines are placed by the first reveal.
    #[default]
    Ready,
    Ongoing,
    Won,
    Lost,
}

impl BoardStatus {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_ongoing(self) -> bool {
        matches!(self, Self::Ongoing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// The whole game: configuration, lazily built grid, status and counters.
///
/// Operations validate coordinates and return [`GameError::OutOfBounds`] for positions outside the board;
/// every other move that does not apply is a silent no-op reported as `NoChange`.
#[derive(Debug)]
pub struct Board {
    config: GameConfig,
    generator: Box<dyn MineGenerator>,
    grid: Option<Array2<Cell>>,
    status: BoardStatus,
    remaining_mine_count: i64,
    revealed_count: CellCount,
    triggered_mine: Option<Coord2>,
    observers: Vec<Box<dyn BoardObserver>>,
}

impl Board {
    /// Board with uniformly random mines, seeded from entropy.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        GameConfig::new(rows, cols, mines).map(Self::with_config)
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::with_generator(config, RandomMineGenerator::from_entropy())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_generator(config, RandomMineGenerator::new(seed))
    }

    pub fn with_generator(config: GameConfig, generator: impl MineGenerator + 'static) -> Self {
        Self {
            config,
            generator: Box::new(generator),
            grid: None,
            status: BoardStatus::Ready,
            remaining_mine_count: config.mines().into(),
            revealed_count: 0,
            triggered_mine: None,
            observers: Vec::new(),
        }
    }

    /// Board that always uses `layout`, sized after it.
    pub fn from_layout(layout: MineLayout) -> Result<Self> {
        let generator = PresetMineGenerator::new(layout);
        let config = generator.config()?;
        Ok(Self::with_generator(config, generator))
    }

    pub fn subscribe(&mut self, observer: impl BoardObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn status(&self) -> BoardStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Flag budget: mine count minus flags placed. Goes negative when over-flagged.
    pub fn remaining_mine_count(&self) -> i64 {
        self.remaining_mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// `None` until the first reveal.
    pub fn grid(&self) -> Option<&Array2<Cell>> {
        self.grid.as_ref()
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        if !self.config.contains(coords) {
            return None;
        }
        self.grid.as_ref().map(|grid| &grid[coords.to_nd_index()])
    }

    /// Whether [`Board::chord`] at `coords` would open anything.
    pub fn can_chord(&self, coords: Coord2) -> bool {
        if !self.status.is_ongoing() {
            return false;
        }

        match self.cell(coords) {
            Some(cell) if cell.is_numbered() => {
                cell.neighbor_mine_count() == self.count_flagged_neighbors(coords)
            }
            _ => false,
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        Ok(match self.status {
            BoardStatus::Ready => {
                self.start(coords);
                self.reveal_single_cell(coords)
            }
            BoardStatus::Ongoing => self.reveal_single_cell(coords),
            BoardStatus::Won | BoardStatus::Lost => RevealOutcome::NoChange,
        })
    }

    pub fn flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if !self.status.is_ongoing() {
            return Ok(MarkOutcome::NoChange);
        }
        let Some(grid) = self.grid.as_mut() else {
            return Ok(MarkOutcome::NoChange);
        };

        let cell = &mut grid[coords.to_nd_index()];
        if cell.is_revealed() {
            return Ok(MarkOutcome::NoChange);
        }

        let outcome = if cell.is_flagged() {
            cell.set_flagged(false);
            self.remaining_mine_count += 1;
            MarkOutcome::Unflagged
        } else {
            cell.set_flagged(true);
            self.remaining_mine_count -= 1;
            MarkOutcome::Flagged
        };
        log::trace!(
            "{:?} at {:?}, remaining mines: {}",
            outcome,
            coords,
            self.remaining_mine_count
        );
        self.emit(BoardEvent::RemainingMinesChanged(self.remaining_mine_count));

        Ok(outcome)
    }

    /// Opens every unflagged neighbor of a revealed number whose flagged-neighbor count matches it.
    pub fn chord(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if !self.can_chord(coords) {
            log::trace!("Chord at {:?} not satisfied", coords);
            return Ok(RevealOutcome::NoChange);
        }

        let neighbors: Vec<_> = self
            .iter_neighbors(coords)
            .filter(|&pos| self.cell(pos).is_some_and(|cell| !cell.is_flagged()))
            .collect();
        log::trace!("Chord at {:?} opens {:?}", coords, neighbors);

        Ok(neighbors
            .into_iter()
            .map(|pos| self.reveal_single_cell(pos))
            .fold(RevealOutcome::NoChange, core::ops::BitOr::bitor))
    }

    /// Drops the grid so the next reveal places a fresh layout.
    pub fn restart(&mut self) {
        let previous = self.status;
        log::debug!("Restarting board from {:?}", previous);

        self.grid = None;
        self.status = BoardStatus::Ready;
        self.revealed_count = 0;
        self.triggered_mine = None;

        if previous != BoardStatus::Ready {
            self.emit(BoardEvent::StatusChanged {
                from: previous,
                to: BoardStatus::Ready,
                triggered_mine: None,
            });
        }

        let mines = i64::from(self.config.mines());
        if self.remaining_mine_count != mines {
            self.remaining_mine_count = mines;
            self.emit(BoardEvent::RemainingMinesChanged(mines));
        }
        self.emit(BoardEvent::Restarted);
    }

    /// Places the mines around the first click and moves to `Ongoing`.
    fn start(&mut self, first: Coord2) {
        let config = self.config;
        let mut layout = self.generator.generate(&config, first);

        if layout.size() != config.size()
            || layout.mine_count() != config.mines()
            || layout.contains_mine(first)
        {
            let seed = fallback_seed(&config, first);
            log::warn!(
                "Generator returned an unusable layout for {:?}, falling back to random placement with seed {}",
                config,
                seed
            );
            layout = RandomMineGenerator::new(seed).generate(&config, first);
        }

        let grid = Array2::from_shape_fn(config.size().to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell::new(
                coords,
                layout.contains_mine(coords),
                layout.adjacent_mine_count(coords),
            )
        });

        self.grid = Some(grid);
        self.revealed_count = 0;
        self.emit(BoardEvent::Started);
        self.set_status(BoardStatus::Ongoing);
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.status.is_ongoing() {
            return RevealOutcome::NoChange;
        }
        let Some(grid) = self.grid.as_mut() else {
            return RevealOutcome::NoChange;
        };

        let cell = &mut grid[coords.to_nd_index()];
        if cell.is_revealed() || cell.is_flagged() {
            return RevealOutcome::NoChange;
        }

        cell.open();
        self.revealed_count += 1;

        if cell.is_mine() {
            log::debug!("Mine hit at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        log::trace!(
            "Revealed {:?}, mine count: {}",
            coords,
            cell.neighbor_mine_count()
        );
        if cell.is_empty() {
            self.flood_fill(coords);
        }

        if self.revealed_count >= self.config.safe_cells() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Opens the connected empty region around an already revealed empty cell, plus its numbered border.
    fn flood_fill(&mut self, origin: Coord2) {
        let Some(grid) = self.grid.as_mut() else {
            return;
        };

        let mut to_visit: Vec<Coord2> = grid.iter_neighbors(origin).collect();
        let mut opened: CellCount = 0;

        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut grid[visit_coords.to_nd_index()];
            if cell.is_revealed() || cell.is_mine() {
                continue;
            }

            cell.open();
            opened += 1;

            if cell.is_empty() {
                to_visit.extend(
                    grid.iter_neighbors(visit_coords)
                        .filter(|&pos| !grid[pos.to_nd_index()].is_revealed()),
                );
            }
        }

        self.revealed_count += opened;
        log::trace!("Flood-fill from {:?} opened {} cells", origin, opened);
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.set_status(if won {
            BoardStatus::Won
        } else {
            BoardStatus::Lost
        });
        self.expose_all();
    }

    /// Terminal full reveal. Flags stay in place so misplaced ones remain visible.
    fn expose_all(&mut self) {
        let Some(grid) = self.grid.as_mut() else {
            return;
        };

        grid.iter_mut().for_each(Cell::expose);
        self.revealed_count = self.config.total_cells();
    }

    fn set_status(&mut self, status: BoardStatus) {
        let from = self.status;
        if from == status {
            return;
        }

        log::debug!("Board status {:?} -> {:?}", from, status);
        self.status = status;
        self.emit(BoardEvent::StatusChanged {
            from,
            to: status,
            triggered_mine: self.triggered_mine,
        });
    }

    fn emit(&mut self, event: BoardEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.cell(pos).is_some_and(Cell::is_flagged))
            .count() as u8
    }

    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.config.size())
    }
}

/// Seed for replacing a rejected layout, fixed by the board and the first click so replays stay deterministic.
fn fallback_seed(config: &GameConfig, first: Coord2) -> u64 {
    (u64::from(config.rows()) << 48)
        | (u64::from(config.cols()) << 32)
        | u64::from(config.mines() ^ flat_index(first, config.cols()).rotate_left(16))
}
