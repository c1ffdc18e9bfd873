use alloc::vec::Vec;
use log::{debug, info, warn};
use rand::{rngs::SmallRng, SeedableRng};

use crate::{
    board::{Board, BoardView},
    common::{MatchError, Outcome, StrategyError},
    config::{Difficulty, MatchConfig, FLEET, GRID_HEIGHT, GRID_WIDTH},
    coord::Coordinate,
    player::{Opponent, Strategy},
    ship::{Orientation, Vessel},
};

/// Phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchState {
    PlacingShips,
    FiringShots,
    GameOver,
}

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Computer,
}

/// A resolved attack, or the end of the match, as reported to the
/// presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct MatchEvent {
    /// Side that acted.
    pub side: Side,
    /// Attacked cell; `None` for match results.
    pub at: Option<Coordinate>,
    pub outcome: Outcome,
}

/// Turn and state machine for a human-vs-computer match.
///
/// Invalid input (wrong phase, gutter or repeated cells, colliding
/// placements) is ignored and reported as `false`.
pub struct MatchController {
    config: MatchConfig,
    rng: SmallRng,
    player: Board,
    computer: Board,
    opponent: Opponent,
    state: MatchState,
    placing_index: usize,
    placing: Option<Vessel>,
    player_extra_turn: bool,
    ai_extra_turn: bool,
    debug_reveal: bool,
    player_hits: usize,
    computer_hits: usize,
    player_shots: usize,
    computer_shots: usize,
    winner: Option<Side>,
    last_player_event: Option<MatchEvent>,
    last_computer_event: Option<MatchEvent>,
    events: Vec<MatchEvent>,
}

#[cfg(feature = "std")]
fn match_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

#[cfg(not(feature = "std"))]
fn match_rng(seed: Option<u64>) -> SmallRng {
    SmallRng::seed_from_u64(seed.unwrap_or(0))
}

impl MatchController {
    /// Set up boards, treasures and the opponent, then start placement.
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        let mut rng = match_rng(config.seed);
        let computer = Board::with_treasures(&mut rng, config.computer_treasures)?;
        let player = Board::with_treasures(&mut rng, config.player_treasures)?;
        let opponent = Opponent::for_difficulty(config.difficulty, GRID_WIDTH, GRID_HEIGHT);
        Self::with_parts(config, rng, player, computer, opponent)
    }

    /// Build a match from prepared boards and opponent. Both boards are
    /// reset, keeping their treasures, and the computer board is populated.
    pub fn with_parts(
        config: MatchConfig,
        rng: SmallRng,
        player: Board,
        computer: Board,
        opponent: Opponent,
    ) -> Result<Self, MatchError> {
        let mut game = Self {
            config,
            rng,
            player,
            computer,
            opponent,
            state: MatchState::PlacingShips,
            placing_index: 0,
            placing: None,
            player_extra_turn: false,
            ai_extra_turn: false,
            debug_reveal: false,
            player_hits: 0,
            computer_hits: 0,
            player_shots: 0,
            computer_shots: 0,
            winner: None,
            last_player_event: None,
            last_computer_event: None,
            events: Vec::new(),
        };
        game.restart()?;
        Ok(game)
    }

    /// Start over from ship placement, whatever the current state.
    ///
    /// On error the current match is left untouched.
    pub fn restart(&mut self) -> Result<(), MatchError> {
        // enemy fleet goes on a fresh copy; only fallible step
        let mut computer = self.computer.clone();
        computer.reset();
        computer.auto_populate(&mut self.rng, &FLEET)?;

        self.computer = computer;
        self.player.reset();
        self.player.set_reveal_ships(true);
        self.opponent.reset();

        self.state = MatchState::PlacingShips;
        self.placing_index = 0;
        self.placing = Some(Vessel::new(FLEET[0], Orientation::Horizontal, Coordinate::new(1, 1)));
        self.player_extra_turn = false;
        self.ai_extra_turn = false;
        self.debug_reveal = false;
        self.player_hits = 0;
        self.computer_hits = 0;
        self.player_shots = 0;
        self.computer_shots = 0;
        self.winner = None;
        self.last_player_event = None;
        self.last_computer_event = None;
        self.events.clear();
        info!("new match ({:?}), place your fleet", self.config.difficulty);
        Ok(())
    }

    /// Show or hide the computer's vessels and treasures. No effect on play.
    pub fn toggle_debug_reveal(&mut self) {
        self.debug_reveal = !self.debug_reveal;
        self.computer.set_reveal_ships(self.debug_reveal);
        debug!("debug reveal {}", if self.debug_reveal { "on" } else { "off" });
    }

    /// Rotate the vessel being positioned.
    pub fn toggle_current_vessel_orientation(&mut self) -> bool {
        if self.state != MatchState::PlacingShips {
            return false;
        }
        let Some(vessel) = self.placing.as_mut() else {
            return false;
        };
        vessel.toggle_orientation();
        let anchor = vessel.anchor();
        self.move_placing_vessel(anchor);
        true
    }

    /// Move the vessel being positioned to `at`, pulled back so it stays
    /// inside the grid.
    pub fn move_placing_vessel(&mut self, at: Coordinate) -> bool {
        if self.state != MatchState::PlacingShips {
            return false;
        }
        let Some(vessel) = self.placing.as_mut() else {
            return false;
        };
        let clamped = clamp_to_grid(at, vessel, self.player.width(), self.player.height());
        vessel.set_anchor(clamped);
        true
    }

    /// Whether the vessel being positioned could be committed where it is.
    pub fn placement_is_valid(&self) -> bool {
        self.placing.as_ref().is_some_and(|v| {
            self.player
                .can_place_vessel_at(v.anchor(), v.length(), v.orientation())
        })
    }

    /// Try to commit the vessel being positioned at `at`.
    pub fn attempt_placement(&mut self, at: Coordinate) -> bool {
        if !self.move_placing_vessel(at) || !self.placement_is_valid() {
            return false;
        }
        let Some(vessel) = self.placing.take() else {
            return false;
        };
        let origin = vessel.anchor();
        self.player.place_vessel(vessel, origin);
        self.placing_index += 1;

        if let Some(&class) = FLEET.get(self.placing_index) {
            self.placing = Some(Vessel::new(class, Orientation::Horizontal, origin));
            self.move_placing_vessel(origin);
        } else {
            self.state = MatchState::FiringShots;
            info!("fleet placed, attack the enemy");
        }
        true
    }

    /// Fire at `at` on the computer's board, then let the computer answer
    /// unless the shot won the match or uncovered a treasure.
    ///
    /// Returns `Ok(false)` when the input was ignored. An error means the
    /// opponent strategy broke its contract.
    pub fn attempt_attack(&mut self, at: Coordinate) -> Result<bool, MatchError> {
        if self.state != MatchState::FiringShots {
            return Ok(false);
        }
        if !self.computer.is_playable(at) || self.computer.is_attacked(at) {
            return Ok(false);
        }

        let outcome = self.player_turn(at);
        if self.computer.is_all_destroyed() {
            self.finish(Side::Player);
            return Ok(true);
        }
        if outcome == Outcome::TreasureFound {
            self.player_extra_turn = true;
        }
        let result = if self.player_extra_turn {
            debug!("extra turn, computer waits");
            Ok(())
        } else {
            self.computer_turn()
        };
        self.player_extra_turn = false;
        result.map(|()| true)
    }

    fn player_turn(&mut self, at: Coordinate) -> Outcome {
        let hit = self.computer.mark_attack(at, true);
        self.player_shots += 1;
        if hit {
            self.player_hits += 1;
        }
        let outcome = resolve_outcome(&self.computer, at, hit);
        self.record(Side::Player, Some(at), outcome);
        outcome
    }

    /// Computer fires; a treasure earns it another shot straight away.
    fn computer_turn(&mut self) -> Result<(), MatchError> {
        loop {
            let at = self.opponent.select_move(&self.player, &mut self.rng)?;
            if !self.player.is_playable(at) || self.player.is_attacked(at) {
                warn!("opponent picked unavailable cell {}", at);
                return Err(StrategyError::AlreadyAttacked(at).into());
            }
            let hit = self.player.mark_attack(at, false);
            self.computer_shots += 1;
            if hit {
                self.computer_hits += 1;
            }
            let outcome = resolve_outcome(&self.player, at, hit);
            self.record(Side::Computer, Some(at), outcome);

            if self.player.is_all_destroyed() {
                self.finish(Side::Computer);
                return Ok(());
            }
            self.ai_extra_turn = outcome == Outcome::TreasureFound;
            if !self.ai_extra_turn {
                return Ok(());
            }
            debug!("computer found treasure, fires again");
        }
    }

    fn finish(&mut self, winner: Side) {
        self.state = MatchState::GameOver;
        self.winner = Some(winner);
        let outcome = match winner {
            Side::Player => Outcome::PlayerWon,
            Side::Computer => Outcome::AiWon,
        };
        self.record(winner, None, outcome);
        info!("game over: {:?}", outcome);
    }

    fn record(&mut self, side: Side, at: Option<Coordinate>, outcome: Outcome) {
        let event = MatchEvent { side, at, outcome };
        if let Some(c) = at {
            debug!("{:?} fires at {}: {:?}", side, c, outcome);
        }
        match side {
            Side::Player => self.last_player_event = Some(event),
            Side::Computer => self.last_computer_event = Some(event),
        }
        self.events.push(event);
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The human's board, attacked by the computer.
    pub fn player_board(&self) -> &Board {
        &self.player
    }

    /// The computer's board, attacked by the human.
    pub fn computer_board(&self) -> &Board {
        &self.computer
    }

    pub fn opponent(&self) -> &Opponent {
        &self.opponent
    }

    /// Vessel being positioned, during placement only.
    pub fn placing_vessel(&self) -> Option<&Vessel> {
        self.placing.as_ref()
    }

    /// Cells the vessel being positioned would cover.
    pub fn placing_footprint(&self) -> Vec<Coordinate> {
        self.placing
            .as_ref()
            .map(|v| v.occupied_cells())
            .unwrap_or_default()
    }

    /// Index into the fleet of the next vessel to place.
    pub fn placing_index(&self) -> usize {
        self.placing_index
    }

    pub fn debug_reveal(&self) -> bool {
        self.debug_reveal
    }

    /// Pending extra turn for `side`.
    ///
    /// Both flags are consumed inside the `attempt_attack` call that set
    /// them: the player's skips one computer turn, the computer's chains its
    /// next shot. Between calls this always reads `false`.
    pub fn has_extra_turn(&self, side: Side) -> bool {
        match side {
            Side::Player => self.player_extra_turn,
            Side::Computer => self.ai_extra_turn,
        }
    }

    /// Attacks by `side` that struck a vessel or a treasure.
    pub fn hits(&self, side: Side) -> usize {
        match side {
            Side::Player => self.player_hits,
            Side::Computer => self.computer_hits,
        }
    }

    /// Attacks fired by `side`.
    pub fn shots(&self, side: Side) -> usize {
        match side {
            Side::Player => self.player_shots,
            Side::Computer => self.computer_shots,
        }
    }

    /// Latest event for `side`, for the status lines.
    pub fn last_event(&self, side: Side) -> Option<MatchEvent> {
        match side {
            Side::Player => self.last_player_event,
            Side::Computer => self.last_computer_event,
        }
    }

    /// Every event since the last restart or drain, oldest first.
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        core::mem::take(&mut self.events)
    }
}

fn resolve_outcome(board: &Board, at: Coordinate, hit: bool) -> Outcome {
    if !hit {
        return Outcome::Miss;
    }
    if board.is_treasure_at(at) {
        return Outcome::TreasureFound;
    }
    match board.vessel_at(at) {
        Some(v) if v.is_destroyed() => Outcome::Sunk(v.name()),
        _ => Outcome::Hit,
    }
}

fn clamp_to_grid(at: Coordinate, vessel: &Vessel, width: usize, height: usize) -> Coordinate {
    let len = vessel.length();
    let mut clamped = at;
    match vessel.orientation() {
        Orientation::Horizontal => clamped.x = clamped.x.min(width.saturating_sub(len)),
        Orientation::Vertical => clamped.y = clamped.y.min(height.saturating_sub(len)),
    }
    clamped
}
