use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Uniform placement that keeps the starting cell safe.
///
/// Mines are drawn without replacement from every flat index except the start one, so each call costs
/// `O(mines)` random draws regardless of how crowded the board is.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, config: &GameConfig, start: Coord2) -> MineLayout {
        let total = config.total_cells() as usize;
        let mines = config.mines() as usize;
        let start_index = flat_index(start, config.cols()) as usize;

        log::debug!(
            "Generating {:?} layout with {} mines, start {:?}, seed {}",
            config.size(),
            mines,
            start,
            self.seed
        );

        // sample from the pool with the start index removed, then shift indices past it back into place
        let picked = index::sample(&mut self.rng, total - 1, mines)
            .into_iter()
            .map(|i| if i >= start_index { i + 1 } else { i });

        MineLayout::from_flat_indices(config.size(), picked)
    }
}
