use core::fmt::Debug;

use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Produces the mine layout for a new grid once the first cell to open is known.
///
/// Implementations must return a layout of `config.size()` holding exactly `config.mines()` mines and
/// must keep `start` free of mines.
pub trait MineGenerator: Debug + Send {
    fn generate(&mut self, config: &GameConfig, start: Coord2) -> MineLayout;
}
