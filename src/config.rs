use crate::ship::VesselClass;

/// Columns per board, including the label column.
pub const GRID_WIDTH: usize = 11;
/// Rows per board, including the label row.
pub const GRID_HEIGHT: usize = 11;

pub const NUM_VESSELS: usize = 5;
/// Fleet placed by each side, in placement order.
pub const FLEET: [VesselClass; NUM_VESSELS] = [
    VesselClass::new("Carrier", 5),
    VesselClass::new("Battleship", 4),
    VesselClass::new("Cruiser", 3),
    VesselClass::new("Submarine", 3),
    VesselClass::new("Destroyer", 2),
];

/// Total number of vessel segments in the standard fleet.
pub const TOTAL_VESSEL_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Treasures hidden on the computer's board.
pub const TREASURE_COUNT: usize = 3;

/// Random draws allowed per vessel (or treasure) before giving up.
pub const PLACEMENT_RETRY_LIMIT: usize = 10_000;

/// Opponent difficulty, mapped to a strategy at match setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
pub enum Difficulty {
    /// Uniform random shots.
    Easy,
    /// Hunts around hits.
    #[default]
    Medium,
    /// Hunts along lines, reacts to treasure, scans on parity.
    Hard,
}

/// Runtime settings for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub difficulty: Difficulty,
    /// Fixed RNG seed for reproducible matches.
    pub seed: Option<u64>,
    pub computer_treasures: usize,
    pub player_treasures: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            seed: None,
            computer_treasures: TREASURE_COUNT,
            player_treasures: 0,
        }
    }
}

/// Look up a fleet class by name.
pub fn vessel_class(name: &str) -> Option<VesselClass> {
    FLEET.iter().copied().find(|c| c.name() == name)
}
