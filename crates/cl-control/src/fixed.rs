//! The fixed-time baseline schedule.
//!
//! Memoryless by definition: the same green table every cycle, compass
//! service order, no reaction to queues or emergencies.  Its only job is to
//! be the control arm of the comparison.

use cl_core::{Lane, LaneTable};

/// Static per-lane green durations, re-applied every cycle unchanged.
#[derive(Clone, Debug)]
pub struct FixedSchedule {
    greens: LaneTable<f64>,
}

impl FixedSchedule {
    pub fn new(greens: LaneTable<f64>) -> Self {
        Self { greens }
    }

    /// The constant allocation table.
    #[inline]
    pub fn allocations(&self) -> &LaneTable<f64> {
        &self.greens
    }

    /// Service order — always plain compass order.
    #[inline]
    pub fn order(&self) -> [Lane; 4] {
        Lane::ALL
    }
}
