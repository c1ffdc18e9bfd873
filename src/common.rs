//! Common types: error enums and attack outcome codes.

use crate::coord::Coordinate;

/// Result code of a single attack or of a finished match, as shown on the
/// status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Outcome {
    /// Attack struck a vessel that is still afloat.
    Hit,
    /// Attack struck open water.
    Miss,
    /// Attack destroyed the last segment of a vessel, carrying its name.
    Sunk(&'static str),
    /// Attack uncovered a treasure.
    TreasureFound,
    PlayerWon,
    AiWon,
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate falls in the label gutter or off the grid.
    OutOfBounds(Coordinate),
    /// Cell already holds a vessel or a treasure.
    CellOccupied(Coordinate),
    /// Random placement gave up after the retry ceiling.
    PlacementExhausted { length: usize, attempts: usize },
    /// Random treasure seeding gave up before placing every treasure.
    TreasureExhausted { placed: usize, requested: usize },
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::OutOfBounds(c) => write!(f, "Coordinate {} is outside the playable grid", c),
            BoardError::CellOccupied(c) => write!(f, "Cell {} is already occupied", c),
            BoardError::PlacementExhausted { length, attempts } => write!(
                f,
                "Unable to place vessel of length {} after {} attempts",
                length, attempts
            ),
            BoardError::TreasureExhausted { placed, requested } => write!(
                f,
                "Only {} of {} treasures could be placed",
                placed, requested
            ),
        }
    }
}

/// Errors raised when a strategy cannot honour its contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    /// Asked for a move with no unattacked playable cell left.
    NoCandidates,
    /// Strategy returned a cell that had already been attacked.
    AlreadyAttacked(Coordinate),
}

impl core::fmt::Display for StrategyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StrategyError::NoCandidates => write!(f, "No unattacked cells left to select"),
            StrategyError::AlreadyAttacked(c) => {
                write!(f, "Strategy selected already attacked cell {}", c)
            }
        }
    }
}

/// Errors surfaced by the match controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    Board(BoardError),
    Strategy(StrategyError),
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::Board(err)
    }
}

impl From<StrategyError> for MatchError {
    fn from(err: StrategyError) -> Self {
        MatchError::Strategy(err)
    }
}

impl core::fmt::Display for MatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatchError::Board(e) => write!(f, "Board error: {}", e),
            MatchError::Strategy(e) => write!(f, "Strategy error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for StrategyError {}
#[cfg(feature = "std")]
impl std::error::Error for MatchError {}
