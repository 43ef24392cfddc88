use chrono::Utc;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniformly random mine placement driven by an injectable random source.
///
/// The same seed and config always give the same board.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator<R = SmallRng> {
    rng: R,
    placement: Placement,
}

impl RandomMinefieldGenerator<SmallRng> {
    pub fn new(seed: u64) -> Self {
        log::debug!("seed: {}", seed);
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomMinefieldGenerator<R> {
    pub fn from_rng(rng: R) -> Self {
        Self {
            rng,
            placement: Placement::default(),
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

impl<R: Rng> MinefieldGenerator for RandomMinefieldGenerator<R> {
    fn generate(mut self, config: GameConfig) -> Result<Game> {
        config.validate()?;

        let (width, height) = config.size;
        let started_at = config.started_at.unwrap_or_else(Utc::now);
        let mut game = Game::blank(config.size, started_at);

        match self.placement {
            Placement::Rejection => {
                let mut placed = 0;
                let mut retries: u64 = 0;
                while placed < config.mines {
                    let coords = (
                        self.rng.random_range(0..width),
                        self.rng.random_range(0..height),
                    );
                    if place_mine(&mut game, coords) {
                        placed += 1;
                    } else {
                        retries += 1;
                    }
                }
                log::trace!("Placed {} mines with {} retries", placed, retries);
            }
            Placement::Shuffle => {
                let row = width as usize;
                let picks = rand::seq::index::sample(
                    &mut self.rng,
                    config.total_cells() as usize,
                    config.mines as usize,
                );
                for index in picks {
                    let coords = ((index % row) as Coord, (index / row) as Coord);
                    place_mine(&mut game, coords);
                }
            }
        }

        game.set_mine_count(config.mines);
        log::debug!(
            "Generated {}x{} board with {} mines ({:?})",
            width,
            height,
            config.mines,
            self.placement
        );
        Ok(game)
    }
}

/// Marks `coords` as a mine and bumps the touch count around it, false when it already was one.
fn place_mine(game: &mut Game, coords: Coord2) -> bool {
    match game.cell_mut(coords) {
        Some(cell) if !cell.is_mine => cell.is_mine = true,
        _ => return false,
    }

    for neighbor in game.neighbors_of(coords) {
        if let Some(cell) = game.cell_mut(neighbor) {
            cell.touch_count += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn config(size: Coord2, mines: CellCount) -> GameConfig {
        GameConfig::new(size, mines).with_started_at(start())
    }

    fn assert_consistent(game: &Game, mines: CellCount) {
        let placed = game.cells().filter(|(_, cell)| cell.is_mine).count();
        assert_eq!(placed as CellCount, mines);
        assert_eq!(game.mine_count(), mines);

        for (coords, cell) in game.cells() {
            let expected = game
                .neighbors_of(coords)
                .filter(|&pos| game.get_cell(pos).is_some_and(|c| c.is_mine))
                .count();
            assert_eq!(cell.touch_count as usize, expected, "at {:?}", coords);
            assert_eq!(cell.reveal_state, RevealState::Hidden);
        }
    }

    #[test]
    fn generates_exact_mine_count_and_touch_counts() {
        for placement in [Placement::Rejection, Placement::Shuffle] {
            for seed in 0..16 {
                for difficulty in Difficulty::ALL {
                    let cfg = difficulty.config().with_started_at(start());
                    let game = RandomMinefieldGenerator::new(seed)
                        .with_placement(placement)
                        .generate(cfg)
                        .unwrap();
                    assert_consistent(&game, cfg.mines);
                }
            }
        }
    }

    #[test]
    fn fills_all_but_one_cell() {
        for placement in [Placement::Rejection, Placement::Shuffle] {
            let game = RandomMinefieldGenerator::new(7)
                .with_placement(placement)
                .generate(config((8, 8), 63))
                .unwrap();

            assert_consistent(&game, 63);
            assert_eq!(game.hidden_safe_count(), 1);
        }
    }

    #[test]
    fn same_seed_same_board() {
        let cfg = config((12, 9), 20);

        let a = RandomMinefieldGenerator::new(42).generate(cfg).unwrap();
        let b = RandomMinefieldGenerator::new(42).generate(cfg).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn new_game_is_alive_and_running() {
        let game = RandomMinefieldGenerator::new(1)
            .generate(config((10, 8), 0))
            .unwrap();

        assert!(game.is_alive());
        assert_eq!(game.ended_at(), None);
        assert_eq!(game.started_at(), start());
        assert_eq!(game.state(), GameState::InProgress);
        assert_eq!(game.size(), (10, 8));
        assert_consistent(&game, 0);
    }

    #[test]
    fn rejects_small_boards() {
        assert_eq!(
            RandomMinefieldGenerator::new(0).generate(config((7, 10), 5)),
            Err(GameError::InvalidDimensions {
                width: 7,
                height: 10
            })
        );
        assert_eq!(
            RandomMinefieldGenerator::new(0).generate(config((10, 7), 5)),
            Err(GameError::InvalidDimensions {
                width: 10,
                height: 7
            })
        );
    }

    #[test]
    fn rejects_boards_without_a_safe_cell() {
        assert_eq!(
            Game::create(config((8, 8), 64)),
            Err(GameError::InvalidMineCount {
                mines: 64,
                total: 64
            })
        );
        assert_eq!(
            Game::create(config((8, 8), 100)),
            Err(GameError::InvalidMineCount {
                mines: 100,
                total: 64
            })
        );
    }

    #[test]
    fn create_defaults_start_time_to_now() {
        let before = Utc::now();
        let game = Game::create(GameConfig::new((8, 8), 7)).unwrap();
        let after = Utc::now();

        assert!(game.started_at() >= before && game.started_at() <= after);
        assert_consistent(&game, 7);
    }

    #[test]
    fn accepts_any_rng() {
        let game = RandomMinefieldGenerator::from_rng(rand::rngs::StdRng::seed_from_u64(3))
            .generate(config((16, 16), 35))
            .unwrap();

        assert_consistent(&game, 35);
    }
}
