//! Commonly used types for ease of import.

pub use crate::{
    BoardView, Coordinate, Difficulty, MatchConfig, MatchController, MatchState, Opponent,
    Orientation, Outcome, Side, Strategy,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, ui::render_match};
