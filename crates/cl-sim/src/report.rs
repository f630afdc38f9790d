//! Log rows and the end-of-run report.
//!
//! A run's output is two append-only sequences of [`CycleLogRow`] — one per
//! controller variant, ordered by (cycle, service position).  Rows are
//! immutable once emitted; the boundary layer formats them for display but
//! never rewrites them.

use cl_core::{ControllerKind, Cycle, Lane};
use cl_control::LossBreakdown;
use cl_lanes::EvClass;

// ── LaneEvent ────────────────────────────────────────────────────────────────

/// Annotation attached to a lane's row for one cycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaneEvent {
    /// Nothing out of the ordinary.
    Normal,
    /// An emergency vehicle was present in this lane's queue.
    Emergency {
        class: EvClass,
        /// 1-based queue position in this variant's queue.
        position: u32,
        /// Whether the vehicle made it through this cycle.  The fixed
        /// variant strands the vehicle whenever its static allocation is
        /// too short to reach the position.
        cleared: bool,
    },
    /// Adaptive only: the lane is inside its post-emergency recovery
    /// window and carries a green-time bonus.
    Recovery,
}

// ── CycleLogRow ──────────────────────────────────────────────────────────────

/// One lane's record for one cycle under one controller variant.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleLogRow {
    pub cycle: Cycle,
    pub lane: Lane,
    /// 1-based position in this cycle's service order.
    pub phase: u8,

    /// Green seconds allocated to the phase (after any extension).
    pub allocated_secs: f64,
    /// Green seconds actually consumed.
    pub used_secs: f64,
    /// Green seconds spent with nothing crossing.
    pub wasted_secs: f64,

    /// Vehicles that arrived this cycle.
    pub arrivals: u32,
    /// Queue length at phase start (arrivals included).
    pub queue_before: u32,
    /// Queue length after the phase.  Always equals `uncleared`.
    pub queue_after: u32,
    /// Vehicles left queued after the phase.
    pub uncleared: u32,

    /// Red-time exposure: realized cycle length minus this lane's used time.
    pub red_secs: f64,

    /// The decomposed penalty for this lane this cycle.
    pub loss: LossBreakdown,

    pub event: LaneEvent,
}

// ── RunReport ────────────────────────────────────────────────────────────────

/// Everything a run produced.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    /// Adaptive-variant rows, ordered by (cycle, service position).
    pub adaptive: Vec<CycleLogRow>,
    /// Fixed-variant rows, same ordering.
    pub fixed: Vec<CycleLogRow>,

    /// Cumulative loss across all lanes and cycles, per variant.
    pub adaptive_total_loss: f64,
    pub fixed_total_loss: f64,
}

impl RunReport {
    /// The row sequence for one controller variant.
    pub fn rows(&self, kind: ControllerKind) -> &[CycleLogRow] {
        match kind {
            ControllerKind::Adaptive => &self.adaptive,
            ControllerKind::Fixed => &self.fixed,
        }
    }

    /// Cumulative loss for one controller variant.
    pub fn total_loss(&self, kind: ControllerKind) -> f64 {
        match kind {
            ControllerKind::Adaptive => self.adaptive_total_loss,
            ControllerKind::Fixed => self.fixed_total_loss,
        }
    }
}
