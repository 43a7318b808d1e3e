use super::*;

/// Replays a fixed layout, for tests and hand-made puzzles.
///
/// If the first click lands on a mine, that mine moves to the first free cell in row-major order. A preset
/// that does not fit the board is handed back untouched for the board to reject.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetMineGenerator {
    layout: MineLayout,
}

impl PresetMineGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        MineLayout::from_mine_coords(size, mine_coords).map(Self::new)
    }

    pub fn config(&self) -> Result<GameConfig> {
        let (rows, cols) = self.layout.size();
        GameConfig::new(rows, cols, self.layout.mine_count())
    }
}

impl MineGenerator for PresetMineGenerator {
    fn generate(&mut self, config: &GameConfig, start: Coord2) -> MineLayout {
        if self.layout.size() != config.size() || self.layout.mine_count() != config.mines() {
            log::warn!(
                "Preset layout {:?} with {} mines does not match board {:?} with {} mines",
                self.layout.size(),
                self.layout.mine_count(),
                config.size(),
                config.mines()
            );
            return self.layout.clone();
        }

        if !self.layout.contains_mine(start) {
            return self.layout.clone();
        }

        let cols = config.cols();
        let mut mines: Vec<_> = self
            .layout
            .mine_coords()
            .filter(|&coords| coords != start)
            .map(|coords| flat_index(coords, cols) as usize)
            .collect();
        let start_index = flat_index(start, cols) as usize;
        let free = (0..config.total_cells() as usize)
            .find(|&i| i != start_index && !mines.contains(&i));

        if let Some(free) = free {
            log::warn!(
                "Moving preset mine off start {:?} to {:?}",
                start,
                from_flat_index(free as CellCount, cols)
            );
            mines.push(free);
        }

        MineLayout::from_flat_indices(config.size(), mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_layout_when_start_is_safe() {
        let mut generator = PresetMineGenerator::from_mine_coords((3, 3), &[(2, 2)]).unwrap();
        let config = generator.config().unwrap();

        let layout = generator.generate(&config, (0, 0));

        assert_eq!(layout.mine_coords().collect::<Vec<_>>(), vec![(2, 2)]);
    }

    #[test]
    fn relocates_mine_under_start() {
        let mut generator = PresetMineGenerator::from_mine_coords((2, 2), &[(0, 0), (0, 1)]).unwrap();
        let config = generator.config().unwrap();

        let layout = generator.generate(&config, (0, 0));

        assert!(!layout.contains_mine((0, 0)));
        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains_mine((1, 0)));
    }

    #[test]
    fn mismatched_board_gets_preset_back_unchanged() {
        let mut generator = PresetMineGenerator::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let preset = generator.generate(&generator.config().unwrap(), (1, 1));

        let larger = GameConfig::new(4, 4, 1).unwrap();
        assert_eq!(generator.generate(&larger, (3, 3)), preset);

        let mut generator =
            PresetMineGenerator::from_mine_coords((4, 4), &[(0, 0), (3, 3)]).unwrap();
        let smaller = GameConfig::new(2, 2, 2).unwrap();
        assert_eq!(generator.generate(&smaller, (0, 0)).size(), (4, 4));
    }

    #[test]
    fn full_preset_is_not_a_valid_config() {
        let generator = PresetMineGenerator::from_mine_coords((1, 2), &[(0, 0), (0, 1)]).unwrap();
        assert!(generator.config().is_err());
    }
}
