use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// Parameters for a single round.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
    /// Creation timestamp, `Utc::now()` at generation when absent.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

impl GameConfig {
    pub const fn new(size: Coord2, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            started_at: None,
        }
    }

    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Checks the board is at least 8x8 and leaves at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(GameError::InvalidDimensions { width, height });
        }

        let total = self.total_cells();
        if self.mines >= total {
            return Err(GameError::InvalidMineCount {
                mines: self.mines,
                total,
            });
        }

        Ok(())
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

/// Named presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Easy => GameConfig::new((8, 8), 7),
            Medium => GameConfig::new((12, 12), 18),
            Hard => GameConfig::new((16, 16), 35),
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}
