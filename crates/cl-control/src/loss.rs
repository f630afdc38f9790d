//! The per-lane, per-cycle penalty decomposition.
//!
//! Four terms, all tunable via [`LossWeights`]:
//!
//! - **waiting** — fresh arrivals wait half the red interval on average
//!   (uniform-arrival assumption); holdovers already sat through a full
//!   cycle and are charged the whole red time.  Red time beyond the
//!   configured threshold accrues an extra escalation charge on both
//!   categories, punishing runaway cycle lengths.
//! - **uncleared** — `u × red × multiplier`, multiplier ≥ 1 so a failure to
//!   clear always outweighs ordinary waiting.
//! - **queue** — a small constant per queued vehicle, discouraging buildup
//!   even absent visible failures.
//! - **starvation** — `holdovers²` scaled by a constant; the convexity makes
//!   chronically shortchanging one lane disproportionately costly.

use cl_core::LossWeights;

// ── Inputs ───────────────────────────────────────────────────────────────────

/// One lane's observed cycle, as seen by the scorer.
#[derive(Copy, Clone, Debug)]
pub struct LossInputs {
    /// Queue length at phase start (arrivals already added).
    pub queue_before: u32,
    /// Vehicles that arrived this cycle.
    pub arrivals: u32,
    /// Vehicles still queued after the phase.
    pub uncleared: u32,
    /// Red-time exposure: realized cycle length minus this lane's used time.
    pub red_secs: f64,
}

/// Vehicles that were already waiting before this cycle's arrivals.
#[inline]
pub fn holdovers(queue_before: u32, arrivals: u32) -> u32 {
    queue_before.saturating_sub(arrivals)
}

// ── Breakdown ────────────────────────────────────────────────────────────────

/// The decomposed penalty for one lane in one cycle.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LossBreakdown {
    pub waiting: f64,
    pub uncleared: f64,
    pub queue: f64,
    pub starvation: f64,
    /// Sum of the four terms above.
    pub total: f64,
}

/// Score one lane's cycle.
pub fn score(inputs: &LossInputs, w: &LossWeights) -> LossBreakdown {
    let red = inputs.red_secs.max(0.0);
    let held = holdovers(inputs.queue_before, inputs.arrivals);
    let fresh = inputs.queue_before - held;

    let mut waiting = fresh as f64 * (red / 2.0) + held as f64 * red;
    let excess = red - w.red_threshold_secs;
    if excess > 0.0 {
        waiting += (fresh + held) as f64 * excess * w.escalation_rate;
    }

    let uncleared = inputs.uncleared as f64 * red * w.uncleared_mult;
    let queue = w.queue_cost * inputs.queue_before as f64;
    let starvation = w.starvation_cost * (held as f64).powi(2);

    LossBreakdown {
        waiting,
        uncleared,
        queue,
        starvation,
        total: waiting + uncleared + queue + starvation,
    }
}
