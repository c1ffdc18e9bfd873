use rand::RngCore;

use crate::{
    ai::{HeuristicConfig, HeuristicStrategy, RandomStrategy},
    board::BoardView,
    common::StrategyError,
    config::Difficulty,
    coord::Coordinate,
};

/// Move selection policy for the computer side.
pub trait Strategy {
    /// Choose an unattacked playable cell on `board`.
    ///
    /// Fails with [`StrategyError::NoCandidates`] once every playable cell
    /// has been attacked.
    fn select_move(
        &mut self,
        board: &dyn BoardView,
        rng: &mut dyn RngCore,
    ) -> Result<Coordinate, StrategyError>;

    /// Forget everything learned during the current match.
    fn reset(&mut self);
}

/// The opponent strategies a match can be set up with.
#[derive(Debug, Clone)]
pub enum Opponent {
    Random(RandomStrategy),
    Heuristic(HeuristicStrategy),
}

impl Opponent {
    /// Strategy matching `difficulty` for a board of `width` x `height`.
    pub fn for_difficulty(difficulty: Difficulty, width: usize, height: usize) -> Self {
        match difficulty {
            Difficulty::Easy => Opponent::Random(RandomStrategy::new(width, height)),
            Difficulty::Medium => Opponent::Heuristic(HeuristicStrategy::new(
                width,
                height,
                HeuristicConfig::default(),
            )),
            Difficulty::Hard => Opponent::Heuristic(HeuristicStrategy::new(
                width,
                height,
                HeuristicConfig {
                    react_to_treasure: true,
                    aggressive: true,
                },
            )),
        }
    }
}

impl Strategy for Opponent {
    fn select_move(
        &mut self,
        board: &dyn BoardView,
        rng: &mut dyn RngCore,
    ) -> Result<Coordinate, StrategyError> {
        match self {
            Opponent::Random(s) => s.select_move(board, rng),
            Opponent::Heuristic(s) => s.select_move(board, rng),
        }
    }

    fn reset(&mut self) {
        match self {
            Opponent::Random(s) => s.reset(),
            Opponent::Heuristic(s) => s.reset(),
        }
    }
}
