use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must be at least 8x8, got {width}x{height}")]
    InvalidDimensions { width: Coord, height: Coord },
    #[error("Too many mines, {mines} requested but at most {} fit", .total.saturating_sub(1))]
    InvalidMineCount { mines: CellCount, total: CellCount },
    #[error("Unknown difficulty")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
