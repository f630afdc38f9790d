//! The four approach lanes and the fixed-size table keyed by them.
//!
//! Lanes are a closed set, so per-lane state lives in a [`LaneTable`] — a
//! four-slot array indexed by [`Lane`] — rather than a map with string keys.
//! `match` on `Lane` is exhaustive, which means adding a fifth approach (it
//! will never happen at a four-way intersection, but still) fails to compile
//! everywhere a lane is handled instead of silently missing a key.

use std::fmt;
use std::ops::{Index, IndexMut};

// ── Lane ─────────────────────────────────────────────────────────────────────

/// One of the four compass approaches to the intersection.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lane {
    North,
    South,
    East,
    West,
}

impl Lane {
    /// All lanes in default (compass) service order.
    pub const ALL: [Lane; 4] = [Lane::North, Lane::South, Lane::East, Lane::West];

    /// Position in [`Lane::ALL`]; doubles as the `LaneTable` slot index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The axis this lane belongs to (physical-lane counts are configured
    /// per axis, not per approach).
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Lane::North | Lane::South => Axis::NorthSouth,
            Lane::East | Lane::West => Axis::EastWest,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Lane::North => "North",
            Lane::South => "South",
            Lane::East => "East",
            Lane::West => "West",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Axis ─────────────────────────────────────────────────────────────────────

/// Grouping of opposing approaches sharing a roadway cross-section.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    NorthSouth,
    EastWest,
}

// ── ControllerKind ───────────────────────────────────────────────────────────

/// Which of the two controller variants a queue, plan, or log row belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControllerKind {
    /// Feedback-tuned allocations, emergency preemption, early phase cut.
    Adaptive,
    /// Static allocation table, compass order, memoryless.
    Fixed,
}

impl ControllerKind {
    pub fn label(self) -> &'static str {
        match self {
            ControllerKind::Adaptive => "adaptive",
            ControllerKind::Fixed => "fixed",
        }
    }
}

// ── LaneTable ────────────────────────────────────────────────────────────────

/// A value of type `T` for each of the four lanes, indexed by [`Lane`].
///
/// This is the array-of-structs replacement for a `HashMap<String, T>`:
/// O(1) access with no hashing, `Copy` when `T: Copy`, and iteration in a
/// fixed, deterministic order.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LaneTable<T>([T; 4]);

impl<T> LaneTable<T> {
    /// Build a table by evaluating `f` for each lane in compass order.
    pub fn from_fn(mut f: impl FnMut(Lane) -> T) -> Self {
        LaneTable(Lane::ALL.map(&mut f))
    }

    /// A table with the same value in every slot.
    pub fn splat(value: T) -> Self
    where
        T: Clone,
    {
        LaneTable::from_fn(|_| value.clone())
    }

    /// `(lane, &value)` pairs in compass order.
    pub fn iter(&self) -> impl Iterator<Item = (Lane, &T)> {
        Lane::ALL.iter().map(move |&lane| (lane, &self.0[lane.index()]))
    }

    /// Map each slot to a new table, preserving lane association.
    pub fn map<U>(&self, mut f: impl FnMut(Lane, &T) -> U) -> LaneTable<U> {
        LaneTable::from_fn(|lane| f(lane, &self[lane]))
    }

    /// Raw slot access in compass order (for reductions like `sum`).
    pub fn values(&self) -> &[T; 4] {
        &self.0
    }
}

impl LaneTable<f64> {
    /// Sum of all four slots.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl<T> Index<Lane> for LaneTable<T> {
    type Output = T;
    #[inline(always)]
    fn index(&self, lane: Lane) -> &T {
        &self.0[lane.index()]
    }
}

impl<T> IndexMut<Lane> for LaneTable<T> {
    #[inline(always)]
    fn index_mut(&mut self, lane: Lane) -> &mut T {
        &mut self.0[lane.index()]
    }
}
