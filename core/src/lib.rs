//! Rules engine for the mine-clearing puzzle: deferred first-click-safe mine placement, flood-fill reveals,
//! flagging, chording and win/loss detection on a single [`Board`].

use core::ops::BitOr;

pub use board::*;
pub use cell::*;
pub use clock::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use observer::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod clock;
mod config;
mod error;
mod generator;
mod layout;
mod observer;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Merges outcomes of a multi-cell reveal.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mine_hit_dominates_merge() {
        use RevealOutcome::*;

        assert_eq!(Revealed | HitMine, HitMine);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(!NoChange.has_update());
    }
}
