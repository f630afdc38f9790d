//! The adaptive variant's per-lane learned weight.
//!
//! One bounded scalar per lane multiplies the ideal service time
//! `(queue / lane_count) × cross_secs` to produce the green-time target.
//! The update rule is greedy, per-lane, and model-free:
//!
//! - holdovers are the strongest signal — the increase scales with how many
//!   vehicles persisted, so sustained starvation produces monotonically
//!   rising pressure until the allocation clears it;
//! - uncleared vehicles without holdovers nudge the weight up mildly;
//! - idle allocation with no failures nudges it down;
//! - unremarkable cycles decay the weight toward neutral.
//!
//! Every step is scaled by the learning rate and the result clamped to the
//! configured weight range, preventing runaway growth or collapse.  There is
//! no cross-lane coordination term; lanes interact only through the shared
//! cycle-length denominator in the red-time computation.

use cl_core::{FeedbackParams, Lane, LaneTable};

// ── LaneOutcome ──────────────────────────────────────────────────────────────

/// What one lane's phase looked like to the controller.
#[derive(Copy, Clone, Debug)]
pub struct LaneOutcome {
    /// Vehicles that had already waited a full cycle before this one.
    pub holdover: u32,
    /// Vehicles left queued after the phase.
    pub uncleared: u32,
    /// Green seconds allocated to the phase.
    pub allocated_secs: f64,
    /// Green seconds actually consumed.
    pub used_secs: f64,
}

// ── FeedbackController ───────────────────────────────────────────────────────

/// Per-lane weight state.  One instance per run; the weights are the only
/// controller state that survives across cycles besides the queues.
pub struct FeedbackController {
    weights: LaneTable<f64>,
    params: FeedbackParams,
}

impl FeedbackController {
    pub fn new(params: FeedbackParams) -> Self {
        Self {
            weights: LaneTable::splat(params.neutral_weight),
            params,
        }
    }

    /// The current learned weight for `lane`.
    #[inline]
    pub fn weight(&self, lane: Lane) -> f64 {
        self.weights[lane]
    }

    /// Green-time target for the next cycle.
    ///
    /// `(queue / lane_count) × cross × weight`, clamped to the configured
    /// bound.  An empty queue yields exactly the minimum — which is zero in
    /// the skip-empty-phases variant.
    pub fn target_green(&self, lane: Lane, queue: u32, lane_count: u32, cross_secs: f64) -> f64 {
        let p = &self.params;
        if queue == 0 {
            return p.min_green_secs;
        }
        let ideal = queue as f64 / lane_count.max(1) as f64 * cross_secs;
        (ideal * self.weights[lane]).clamp(p.min_green_secs, p.max_green_secs)
    }

    /// Fold one cycle's outcome for `lane` into its weight.
    pub fn observe(&mut self, lane: Lane, outcome: &LaneOutcome) {
        let p = &self.params;
        let w = &mut self.weights[lane];

        let idle = (outcome.allocated_secs - outcome.used_secs).max(0.0);
        if outcome.holdover > 0 {
            *w += p.learning_rate * (1.0 + p.holdover_gain * outcome.holdover as f64);
        } else if outcome.uncleared > 0 {
            *w += p.learning_rate * p.uncleared_gain;
        } else if idle > p.idle_tolerance_secs {
            *w -= p.learning_rate;
        } else {
            *w += (p.neutral_weight - *w) * p.decay;
        }

        *w = w.clamp(p.min_weight, p.max_weight);
    }
}
