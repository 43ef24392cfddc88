use chrono::{DateTime, Utc};

use crate::*;

impl Game {
    /// Reveals the cell at `coords`, stamping any game end with the current time.
    pub fn reveal(&self, coords: Coord2) -> Game {
        self.reveal_at(coords, Utc::now())
    }

    pub fn reveal_at(&self, coords: Coord2, now: DateTime<Utc>) -> Game {
        self.reveal_with_outcome(coords, now).0
    }

    /// Reveals exactly one cell, neighbouring zero cells are left alone.
    ///
    /// Finished games and out-of-bounds coordinates give back an unchanged copy. The game ends
    /// when the cell is a mine, or when after this reveal only mines remain hidden, so revealing
    /// the last safe cell wins in the same call.
    pub fn reveal_with_outcome(
        &self,
        coords: Coord2,
        now: DateTime<Utc>,
    ) -> (Game, RevealOutcome) {
        if self.is_finished() {
            log::trace!("Ignoring reveal at {:?}, game already ended", coords);
            return (self.clone(), RevealOutcome::NoChange);
        }

        let Some(cell) = self.get_cell(coords) else {
            log::trace!("Ignoring reveal at {:?}, out of bounds", coords);
            return (self.clone(), RevealOutcome::NoChange);
        };

        let reveal = CellUpdate::new().reveal_state(RevealState::Revealed);
        let mut next = self.set_cell(coords, reveal);
        let hit_mine = cell.is_mine;
        let only_mines_left = next.hidden_safe_count() == 0;

        let ended = hit_mine || only_mines_left;
        next.finish(!hit_mine, ended.then_some(now));

        let outcome = match (hit_mine, only_mines_left) {
            (true, _) => RevealOutcome::HitMine,
            (false, true) => RevealOutcome::Won,
            (false, false) if cell.is_hidden() => RevealOutcome::Revealed,
            (false, false) => RevealOutcome::NoChange,
        };
        log::debug!(
            "Reveal at {:?}, touch count: {}, outcome: {:?}",
            coords,
            cell.touch_count,
            outcome
        );
        if ended {
            log::debug!("ended at {}", now);
        }

        (next, outcome)
    }
}
