// Opponent strategies: uniform random fire and hunt/search heuristics.
// Both only read the board through `BoardView`.

use alloc::vec::Vec;
use log::debug;
use rand::{seq::IndexedRandom, Rng, RngCore};

use crate::{
    board::{playable_cells, BoardView},
    common::StrategyError,
    coord::{Coordinate, DIRECTIONS},
    player::Strategy,
};

/// Fires at a uniformly random unattacked cell, never the same one twice.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    width: usize,
    height: usize,
    candidates: Vec<Coordinate>,
}

impl RandomStrategy {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            candidates: playable_cells(width, height),
        }
    }

    /// Cells not yet handed out.
    pub fn remaining(&self) -> usize {
        self.candidates.len()
    }
}

impl Strategy for RandomStrategy {
    fn select_move(
        &mut self,
        board: &dyn BoardView,
        rng: &mut dyn RngCore,
    ) -> Result<Coordinate, StrategyError> {
        while !self.candidates.is_empty() {
            let i = rng.random_range(0..self.candidates.len());
            let c = self.candidates.swap_remove(i);
            if board.is_playable(c) && !board.is_attacked(c) {
                debug!("random strategy fires at {}", c);
                return Ok(c);
            }
        }
        Err(StrategyError::NoCandidates)
    }

    fn reset(&mut self) {
        self.candidates = playable_cells(self.width, self.height);
    }
}

/// Switches for [`HeuristicStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeuristicConfig {
    /// Treat an uncovered treasure like a hit and probe around it.
    pub react_to_treasure: bool,
    /// Follow lines of adjacent hits first and search on a checkerboard.
    pub aggressive: bool,
}

/// Hunt/search opponent.
///
/// While some hit vessel is still afloat it fires at the orthogonal
/// neighbours of the most recent such hit ("hunt"); otherwise it fires at a
/// random cell from its pool ("search"). The outcome of each move is read
/// back from the board at the start of the next call.
#[derive(Debug, Clone)]
pub struct HeuristicStrategy {
    config: HeuristicConfig,
    width: usize,
    height: usize,
    pool: Vec<Coordinate>,
    unresolved: Vec<Coordinate>,
    last_move: Option<Coordinate>,
}

impl HeuristicStrategy {
    pub fn new(width: usize, height: usize, config: HeuristicConfig) -> Self {
        Self {
            config,
            width,
            height,
            pool: playable_cells(width, height),
            unresolved: Vec::new(),
            last_move: None,
        }
    }

    pub fn config(&self) -> HeuristicConfig {
        self.config
    }

    /// `true` while there are hits whose vessel is not yet destroyed.
    pub fn is_hunting(&self) -> bool {
        !self.unresolved.is_empty()
    }

    /// Hits (and, if configured, treasures) still being hunted around.
    pub fn unresolved_hits(&self) -> &[Coordinate] {
        &self.unresolved
    }

    fn absorb_last_move(&mut self, board: &dyn BoardView) {
        let Some(last) = self.last_move.take() else {
            return;
        };
        let Some(marker) = board.marker_at(last) else {
            return;
        };
        if !marker.is_hit() {
            return;
        }
        if marker.is_ship() || (self.config.react_to_treasure && marker.is_treasure()) {
            self.unresolved.push(last);
        }
    }

    /// Drop hits on destroyed vessels, and treasure entries with nothing
    /// left to probe.
    fn prune_resolved(&mut self, board: &dyn BoardView) {
        self.unresolved.retain(|&c| {
            match board.marker_at(c).and_then(|m| m.vessel()) {
                Some(id) => board.vessel(id).is_some_and(|v| !v.is_destroyed()),
                None => open_neighbours(board, c).next().is_some(),
            }
        });
    }

    fn hunt_target(&self, board: &dyn BoardView, rng: &mut dyn RngCore) -> Option<Coordinate> {
        if self.config.aggressive {
            let line = self.line_extensions(board);
            if let Some(&c) = line.choose(rng) {
                return Some(c);
            }
        }
        for &hit in self.unresolved.iter().rev() {
            let options: Vec<Coordinate> = open_neighbours(board, hit).collect();
            if let Some(&c) = options.choose(rng) {
                return Some(c);
            }
        }
        None
    }

    /// Open cells at either end of a run of two or more struck vessel cells.
    fn line_extensions(&self, board: &dyn BoardView) -> Vec<Coordinate> {
        let mut out = Vec::new();
        for &hit in &self.unresolved {
            if !struck_ship(board, hit) {
                continue;
            }
            for &(dx, dy) in &DIRECTIONS {
                let Some(next) = hit.offset(dx, dy) else {
                    continue;
                };
                if !struck_ship(board, next) {
                    continue;
                }
                let mut end = next;
                while let Some(step) = end.offset(dx, dy) {
                    if struck_ship(board, step) {
                        end = step;
                        continue;
                    }
                    if board.is_playable(step) && !board.is_attacked(step) && !out.contains(&step) {
                        out.push(step);
                    }
                    break;
                }
            }
        }
        out
    }

    fn search_target(
        &mut self,
        board: &dyn BoardView,
        rng: &mut dyn RngCore,
    ) -> Result<Coordinate, StrategyError> {
        self.pool
            .retain(|&c| board.is_playable(c) && !board.is_attacked(c));
        if self.config.aggressive {
            // every vessel is at least two long, so it covers one of these
            let parity: Vec<Coordinate> = self
                .pool
                .iter()
                .copied()
                .filter(|c| (c.x + c.y) % 2 == 0)
                .collect();
            if let Some(&c) = parity.choose(rng) {
                return Ok(c);
            }
        }
        self.pool
            .choose(rng)
            .copied()
            .ok_or(StrategyError::NoCandidates)
    }
}

impl Strategy for HeuristicStrategy {
    fn select_move(
        &mut self,
        board: &dyn BoardView,
        rng: &mut dyn RngCore,
    ) -> Result<Coordinate, StrategyError> {
        self.absorb_last_move(board);
        self.prune_resolved(board);

        let choice = match self.hunt_target(board, rng) {
            Some(c) => {
                debug!("heuristic strategy hunts at {}", c);
                c
            }
            None => {
                let c = self.search_target(board, rng)?;
                debug!("heuristic strategy searches at {}", c);
                c
            }
        };
        self.pool.retain(|&c| c != choice);
        self.last_move = Some(choice);
        Ok(choice)
    }

    fn reset(&mut self) {
        self.pool = playable_cells(self.width, self.height);
        self.unresolved.clear();
        self.last_move = None;
    }
}

fn struck_ship(board: &dyn BoardView, at: Coordinate) -> bool {
    board
        .marker_at(at)
        .is_some_and(|m| m.is_hit() && m.is_ship())
}

fn open_neighbours(board: &dyn BoardView, at: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
    at.orthogonal_neighbours()
        .filter(move |&n| board.is_playable(n) && !board.is_attacked(n))
}
