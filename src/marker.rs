//! Per-cell attack and occupancy state.

/// Index of a vessel inside the board that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VesselId(pub(crate) usize);

impl VesselId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// What sits on a cell. A cell holds at most one thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occupant {
    #[default]
    Empty,
    /// Covered by the vessel with this id. The board owns the vessel.
    Vessel(VesselId),
    Treasure,
}

/// One cell of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Marker {
    hit: bool,
    occupant: Occupant,
}

impl Marker {
    /// Has this cell been attacked.
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    pub fn occupant(&self) -> Occupant {
        self.occupant
    }

    /// Vessel covering this cell, if any.
    pub fn vessel(&self) -> Option<VesselId> {
        match self.occupant {
            Occupant::Vessel(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_ship(&self) -> bool {
        matches!(self.occupant, Occupant::Vessel(_))
    }

    pub fn is_treasure(&self) -> bool {
        matches!(self.occupant, Occupant::Treasure)
    }

    /// Records an attack. Returns `true` only the first time.
    pub(crate) fn mark(&mut self) -> bool {
        let first = !self.hit;
        self.hit = true;
        first
    }

    pub(crate) fn set_vessel(&mut self, id: VesselId) {
        self.occupant = Occupant::Vessel(id);
    }

    pub(crate) fn set_treasure(&mut self) {
        self.occupant = Occupant::Treasure;
    }

    /// Clears the hit flag and any vessel; treasure stays put.
    pub(crate) fn reset(&mut self) {
        self.hit = false;
        if self.is_ship() {
            self.occupant = Occupant::Empty;
        }
    }
}
