use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count, validated so at least one safe cell exists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig", into = "RawGameConfig")]
pub struct GameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl GameConfig {
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 || mines >= mult(rows, cols) {
            return Err(GameError::InvalidConfiguration { rows, cols, mines });
        }
        Ok(Self { rows, cols, mines })
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub const fn contains(&self, (row, col): Coord2) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                row: coords.0,
                col: coords.1,
            })
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

#[derive(Serialize, Deserialize)]
struct RawGameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.rows, raw.cols, raw.mines)
    }
}

impl From<GameConfig> for RawGameConfig {
    fn from(config: GameConfig) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            mines: config.mines,
        }
    }
}

/// Built-in board presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        let (rows, cols, mines) = match self {
            Self::Easy => (8, 8, 8),
            Self::Medium => (16, 16, 20),
            Self::Hard => (30, 30, 50),
        };
        GameConfig { rows, cols, mines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_configurations() {
        assert!(GameConfig::new(0, 5, 0).is_err());
        assert!(GameConfig::new(5, 0, 0).is_err());
        assert_eq!(
            GameConfig::new(3, 3, 9),
            Err(GameError::InvalidConfiguration {
                rows: 3,
                cols: 3,
                mines: 9
            })
        );
    }

    #[test]
    fn accepts_one_safe_cell() {
        let config = GameConfig::new(3, 3, 8).unwrap();
        assert_eq!(config.safe_cells(), 1);

        let config = GameConfig::new(1, 1, 0).unwrap();
        assert_eq!(config.total_cells(), 1);
    }

    #[test]
    fn validate_coords_reports_position() {
        let config = GameConfig::new(2, 4, 1).unwrap();

        assert_eq!(config.validate_coords((1, 3)), Ok((1, 3)));
        assert_eq!(
            config.validate_coords((2, 0)),
            Err(GameError::OutOfBounds { row: 2, col: 0 })
        );
    }

    #[test]
    fn presets_are_valid() {
        for difficulty in Difficulty::ALL {
            let preset = difficulty.config();
            assert_eq!(
                GameConfig::new(preset.rows(), preset.cols(), preset.mines()),
                Ok(preset)
            );
        }
    }

    #[test]
    fn deserialization_validates() {
        let config: GameConfig =
            serde_json::from_str(r#"{"rows": 8, "cols": 8, "mines": 8}"#).unwrap();
        assert_eq!(config, Difficulty::Easy.config());

        let err = serde_json::from_str::<GameConfig>(r#"{"rows": 2, "cols": 2, "mines": 4}"#);
        assert!(err.is_err());

        let difficulty: Difficulty = serde_json::from_str(r#""hard""#).unwrap();
        assert_eq!(difficulty, Difficulty::Hard);
    }
}
