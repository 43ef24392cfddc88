use serde::{Deserialize, Serialize};

/// Whether the player has opened a cell. Once revealed a cell never goes back.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

impl RevealState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// Canonical per-position state stored by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub reveal_state: RevealState,
    pub touch_count: u8,
}

impl Cell {
    pub const fn is_hidden(&self) -> bool {
        self.reveal_state.is_hidden()
    }

    /// Overwrites only the fields present in `update`.
    pub fn apply(self, update: CellUpdate) -> Self {
        Self {
            is_mine: update.is_mine.unwrap_or(self.is_mine),
            reveal_state: update.reveal_state.unwrap_or(self.reveal_state),
            touch_count: update.touch_count.unwrap_or(self.touch_count),
        }
    }
}

/// Partial cell update used by [`crate::Game::set_cell`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CellUpdate {
    pub is_mine: Option<bool>,
    pub reveal_state: Option<RevealState>,
    pub touch_count: Option<u8>,
}

impl CellUpdate {
    pub const fn new() -> Self {
        Self {
            is_mine: None,
            reveal_state: None,
            touch_count: None,
        }
    }

    pub const fn mine(mut self, is_mine: bool) -> Self {
        self.is_mine = Some(is_mine);
        self
    }

    pub const fn reveal_state(mut self, reveal_state: RevealState) -> Self {
        self.reveal_state = Some(reveal_state);
        self
    }

    pub const fn touch_count(mut self, touch_count: u8) -> Self {
        self.touch_count = Some(touch_count);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_touches_given_fields() {
        let cell = Cell {
            is_mine: false,
            reveal_state: RevealState::Hidden,
            touch_count: 2,
        };

        let updated = cell.apply(CellUpdate::new().reveal_state(RevealState::Revealed));

        assert_eq!(
            updated,
            Cell {
                is_mine: false,
                reveal_state: RevealState::Revealed,
                touch_count: 2,
            }
        );
        assert_eq!(cell.apply(CellUpdate::default()), cell);
    }
}
