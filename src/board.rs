//! Board state: marker grid, owned vessels and hidden treasures.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use log::debug;
use rand::Rng;

use crate::common::BoardError;
use crate::config::{GRID_HEIGHT, GRID_WIDTH, PLACEMENT_RETRY_LIMIT};
use crate::coord::Coordinate;
use crate::marker::{Marker, VesselId};
use crate::ship::{footprint, Orientation, Vessel, VesselClass};

/// A treasure cell and whether it has been opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Treasure {
    pub at: Coordinate,
    pub opened: bool,
}

/// Query-only access to a board, handed to opponent strategies.
pub trait BoardView {
    /// Columns including the label column.
    fn width(&self) -> usize;

    /// Rows including the label row.
    fn height(&self) -> usize;

    fn marker_at(&self, at: Coordinate) -> Option<&Marker>;

    fn vessel(&self, id: VesselId) -> Option<&Vessel>;

    /// `true` for cells outside the gutter and inside the grid.
    fn is_playable(&self, at: Coordinate) -> bool {
        !at.in_gutter() && at.x < self.width() && at.y < self.height()
    }

    fn is_attacked(&self, at: Coordinate) -> bool {
        self.marker_at(at).is_some_and(|m| m.is_hit())
    }

    fn playable_cells(&self) -> Vec<Coordinate> {
        playable_cells(self.width(), self.height())
    }
}

/// Every playable cell of a `width` x `height` grid, in column-major order.
pub fn playable_cells(width: usize, height: usize) -> Vec<Coordinate> {
    let mut cells = Vec::with_capacity(width * height);
    for x in 1..width {
        for y in 1..height {
            cells.push(Coordinate::new(x, y));
        }
    }
    cells
}

/// One side's grid.
#[derive(Clone)]
pub struct Board {
    width: usize,
    height: usize,
    markers: Vec<Marker>,
    vessels: Vec<Vessel>,
    treasures: Vec<Treasure>,
    reveal_ships: bool,
    all_destroyed: bool,
}

impl Board {
    /// Standard 11x11 board (10x10 playable) with no vessels or treasures.
    pub fn new() -> Self {
        Self::with_dimensions(GRID_WIDTH, GRID_HEIGHT)
    }

    /// Board of `width` x `height` cells, label gutter included.
    pub fn with_dimensions(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            markers: vec![Marker::default(); width * height],
            vessels: Vec::new(),
            treasures: Vec::new(),
            reveal_ships: false,
            all_destroyed: false,
        }
    }

    /// Standard board with `count` treasures seeded on random cells.
    pub fn with_treasures<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Result<Self, BoardError> {
        let mut board = Self::new();
        board.seed_treasures(rng, count)?;
        Ok(board)
    }

    fn index(&self, at: Coordinate) -> Option<usize> {
        (at.x < self.width && at.y < self.height).then(|| at.y * self.width + at.x)
    }

    fn marker_mut(&mut self, at: Coordinate) -> Option<&mut Marker> {
        let i = self.index(at)?;
        self.markers.get_mut(i)
    }

    /// Hide `count` more treasures on random playable cells that are empty.
    pub fn seed_treasures<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
    ) -> Result<(), BoardError> {
        let mut placed = 0;
        let mut attempts = 0;
        while placed < count {
            if attempts >= PLACEMENT_RETRY_LIMIT {
                return Err(BoardError::TreasureExhausted {
                    placed,
                    requested: count,
                });
            }
            attempts += 1;
            let at = self.random_playable(rng);
            if self.place_treasure(at).is_ok() {
                placed += 1;
            }
        }
        Ok(())
    }

    /// Hide a treasure at a fixed cell.
    pub fn place_treasure(&mut self, at: Coordinate) -> Result<(), BoardError> {
        if !self.is_playable(at) {
            return Err(BoardError::OutOfBounds(at));
        }
        let marker = self.marker_mut(at).ok_or(BoardError::OutOfBounds(at))?;
        if marker.is_ship() || marker.is_treasure() {
            return Err(BoardError::CellOccupied(at));
        }
        marker.set_treasure();
        self.treasures.push(Treasure { at, opened: false });
        debug!("treasure hidden at {}", at);
        Ok(())
    }

    fn random_playable<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinate {
        Coordinate::new(
            rng.random_range(1..self.width.max(2)),
            rng.random_range(1..self.height.max(2)),
        )
    }

    /// Clear every marker, drop all vessels and close every treasure.
    /// Treasure positions survive.
    pub fn reset(&mut self) {
        for marker in self.markers.iter_mut() {
            marker.reset();
        }
        for treasure in self.treasures.iter_mut() {
            treasure.opened = false;
        }
        self.vessels.clear();
        self.reveal_ships = false;
        self.all_destroyed = false;
    }

    /// Whether a vessel of `length` fits at `origin` without leaving the grid
    /// or touching another vessel or a treasure.
    pub fn can_place_vessel_at(
        &self,
        origin: Coordinate,
        length: usize,
        orientation: Orientation,
    ) -> bool {
        if origin.in_gutter() || length == 0 {
            return false;
        }
        let end = match orientation {
            Orientation::Horizontal => origin
                .x
                .checked_add(length - 1)
                .map(|x| Coordinate::new(x, origin.y)),
            Orientation::Vertical => origin
                .y
                .checked_add(length - 1)
                .map(|y| Coordinate::new(origin.x, y)),
        };
        let Some(end) = end else {
            return false;
        };
        if end.x >= self.width || end.y >= self.height {
            return false;
        }
        footprint(origin, length, orientation).all(|c| {
            self.marker_at(c)
                .is_some_and(|m| !m.is_ship() && !m.is_treasure())
        })
    }

    /// Commit `vessel` at `origin`. The caller must have checked
    /// [`Board::can_place_vessel_at`] first.
    pub fn place_vessel(&mut self, mut vessel: Vessel, origin: Coordinate) -> VesselId {
        debug_assert!(
            self.can_place_vessel_at(origin, vessel.length(), vessel.orientation()),
            "{} placed at invalid origin {}",
            vessel.name(),
            origin
        );
        vessel.set_anchor(origin);
        let id = VesselId(self.vessels.len());
        for cell in footprint(origin, vessel.length(), vessel.orientation()) {
            if let Some(marker) = self.marker_mut(cell) {
                marker.set_vessel(id);
            }
        }
        debug!("{} placed at {} ({:?})", vessel.name(), origin, vessel.orientation());
        self.vessels.push(vessel);
        id
    }

    /// Randomly place one vessel of each class, in the given order.
    pub fn auto_populate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        classes: &[VesselClass],
    ) -> Result<(), BoardError> {
        for &class in classes {
            let (origin, orientation) = self.random_placement(rng, class.length())?;
            self.place_vessel(Vessel::new(class, orientation, origin), origin);
        }
        Ok(())
    }

    /// Rejection-sample an origin and orientation where a vessel of `length`
    /// fits, giving up after [`PLACEMENT_RETRY_LIMIT`] draws.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<(Coordinate, Orientation), BoardError> {
        for _ in 0..PLACEMENT_RETRY_LIMIT {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let origin = self.random_playable(rng);
            if self.can_place_vessel_at(origin, length, orientation) {
                return Ok((origin, orientation));
            }
        }
        Err(BoardError::PlacementExhausted {
            length,
            attempts: PLACEMENT_RETRY_LIMIT,
        })
    }

    /// Attack `target`. Returns `true` when the cell holds a vessel or a
    /// treasure. Gutter and off-grid targets are ignored.
    ///
    /// A vessel segment is only counted the first time its cell is hit.
    /// Treasures open only for the player.
    pub fn mark_attack(&mut self, target: Coordinate, attacker_is_player: bool) -> bool {
        if !self.is_playable(target) {
            return false;
        }
        let Some(i) = self.index(target) else {
            return false;
        };
        let marker = &mut self.markers[i];
        let first = marker.mark();
        let occupant = *marker;

        if let Some(id) = occupant.vessel() {
            if first {
                self.vessels[id.0].register_hit();
            }
        }
        if occupant.is_treasure() && attacker_is_player {
            self.open_treasure(target);
        }
        self.all_destroyed = self.vessels.iter().all(|v| v.is_destroyed());
        occupant.is_ship() || occupant.is_treasure()
    }

    /// Mark the treasure at `at` as opened. No-op if there is none.
    pub fn open_treasure(&mut self, at: Coordinate) {
        if let Some(t) = self.treasures.iter_mut().find(|t| t.at == at) {
            t.opened = true;
        }
    }

    /// Cached result of the last [`Board::mark_attack`].
    pub fn is_all_destroyed(&self) -> bool {
        self.all_destroyed
    }

    pub fn is_treasure_at(&self, at: Coordinate) -> bool {
        self.treasures.iter().any(|t| t.at == at)
    }

    pub fn treasures(&self) -> &[Treasure] {
        &self.treasures
    }

    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    /// Vessel covering `at`, if any.
    pub fn vessel_at(&self, at: Coordinate) -> Option<&Vessel> {
        let id = self.marker_at(at)?.vessel()?;
        self.vessels.get(id.0)
    }

    pub fn set_reveal_ships(&mut self, reveal: bool) {
        self.reveal_ships = reveal;
    }

    pub fn reveals_ships(&self) -> bool {
        self.reveal_ships
    }

    /// Number of attacked cells.
    pub fn attacked_count(&self) -> usize {
        self.markers.iter().filter(|m| m.is_hit()).count()
    }
}

impl BoardView for Board {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn marker_at(&self, at: Coordinate) -> Option<&Marker> {
        let i = self.index(at)?;
        self.markers.get(i)
    }

    fn vessel(&self, id: VesselId) -> Option<&Vessel> {
        self.vessels.get(id.0)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {}x{},\n  vessels: {:?},\n  treasures: {:?},\n  attacked: {},\n  all_destroyed: {}\n}}",
            self.width,
            self.height,
            self.vessels,
            self.treasures,
            self.attacked_count(),
            self.all_destroyed
        )
    }
}
