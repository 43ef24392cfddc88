use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Game>;
}

/// How mine positions are drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Draw a random cell, retry when it already holds a mine.
    #[default]
    Rejection,
    /// Draw distinct cell indices without replacement, linear regardless of density.
    Shuffle,
}

impl Game {
    /// Builds a new round with mines placed from a freshly seeded generator.
    pub fn create(config: GameConfig) -> Result<Game> {
        use rand::prelude::*;

        RandomMinefieldGenerator::new(rand::rng().random()).generate(config)
    }
}
