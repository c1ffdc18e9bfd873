//! Vessel definitions: class, orientation and damage tracking.

use alloc::vec::Vec;
use core::fmt;

use crate::coord::Coordinate;

/// Orientation of a vessel on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Step from one segment to the next.
    pub fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// Class of vessel: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VesselClass {
    name: &'static str,
    length: usize,
}

impl VesselClass {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// A vessel, either being positioned or committed to a board.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Vessel {
    class: VesselClass,
    orientation: Orientation,
    anchor: Coordinate,
    destroyed_segments: usize,
}

impl Vessel {
    /// New undamaged vessel anchored at `anchor`.
    pub fn new(class: VesselClass, orientation: Orientation, anchor: Coordinate) -> Self {
        Self {
            class,
            orientation,
            anchor,
            destroyed_segments: 0,
        }
    }

    pub fn class(&self) -> VesselClass {
        self.class
    }

    pub fn name(&self) -> &'static str {
        self.class.name()
    }

    pub fn length(&self) -> usize {
        self.class.length()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn anchor(&self) -> Coordinate {
        self.anchor
    }

    pub fn destroyed_segments(&self) -> usize {
        self.destroyed_segments
    }

    /// Flip between horizontal and vertical. Only meaningful before the
    /// vessel is committed to a board.
    pub fn toggle_orientation(&mut self) {
        self.orientation = self.orientation.toggled();
    }

    pub(crate) fn set_anchor(&mut self, anchor: Coordinate) {
        self.anchor = anchor;
    }

    /// Count one more destroyed segment.
    ///
    /// Not idempotent: callers must report each covered cell at most once.
    pub fn register_hit(&mut self) {
        debug_assert!(
            self.destroyed_segments < self.length(),
            "{} hit more times than it has segments",
            self.name()
        );
        self.destroyed_segments += 1;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed_segments >= self.length()
    }

    /// Cells covered by the vessel, starting at the anchor.
    pub fn occupied_cells(&self) -> Vec<Coordinate> {
        footprint(self.anchor, self.length(), self.orientation).collect()
    }

    pub fn covers(&self, at: Coordinate) -> bool {
        footprint(self.anchor, self.length(), self.orientation).any(|c| c == at)
    }
}

/// Cells covered by a run of `length` starting at `origin`.
pub fn footprint(
    origin: Coordinate,
    length: usize,
    orientation: Orientation,
) -> impl Iterator<Item = Coordinate> {
    let (dx, dy) = orientation.step();
    (0..length).map(move |i| Coordinate::new(origin.x + dx * i, origin.y + dy * i))
}

impl fmt::Debug for Vessel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vessel {{ name: \"{}\", anchor: {}, orientation: {:?}, destroyed: {}/{} }}",
            self.name(),
            self.anchor,
            self.orientation,
            self.destroyed_segments,
            self.length(),
        )
    }
}
