//! Green-time clearance: how many vehicles make it through a phase.
//!
//! # Regimes
//!
//! **Batched** (normal load): vehicles cross in batches of up to `n` — one
//! per physical lane — and each batch's crossing interval is drawn from a
//! tight band around the mean crossing time.  Batching stops when the next
//! interval would overrun the allocation or the queue empties.
//!
//! **Arterial flushing** (saturated load, `queue / n` above the density
//! threshold): the lane behaves as a mass-flow channel.  Clearable count is
//! `floor((g / (t × dilation)) × n)` with a dilation factor > 1 for the
//! slower saturated flow, and a remainder of at most `n` stragglers is
//! force-cleared with the used time extended past the allocation to cover
//! their crossing, instead of stranding them for a whole extra cycle.
//!
//! # Phase-end policy
//!
//! A controller that may cut the phase early ends it as soon as the queue
//! empties: used time is the service time plus a small clearance allowance,
//! and that allowance is the only waste recorded.  A fixed-time controller
//! holds the green for the full allocation regardless; the idle tail is
//! recorded as waste.

use cl_core::{DischargePolicy, SimRng};

// ── Inputs and outcome ───────────────────────────────────────────────────────

/// One lane's servicing inputs for a single cycle.
#[derive(Copy, Clone, Debug)]
pub struct LanePhase {
    /// Vehicles queued at phase start (arrivals already added).
    pub queue: u32,
    /// Allocated green time, seconds.  Zero skips the phase entirely.
    pub green_secs: f64,
    /// Mean per-vehicle crossing time, seconds (≥ 1 after config coercion).
    pub cross_secs: f64,
    /// Physical travel lanes (≥ 1 after config coercion).
    pub lane_count: u32,
    /// Whether the controller ends the phase once the queue empties.
    pub cut_early: bool,
}

/// What a phase accomplished.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Clearance {
    /// Vehicles still queued after the phase.  Always ≤ `queue`.
    pub uncleared: u32,
    /// Green time actually consumed, seconds.  May exceed the allocation
    /// when a straggler flush extends the phase.
    pub used_secs: f64,
    /// Green time spent with nothing crossing, seconds.
    pub wasted_secs: f64,
}

// ── Clearance ────────────────────────────────────────────────────────────────

/// Service one lane for one phase.
pub fn discharge(rng: &mut SimRng, phase: &LanePhase, policy: &DischargePolicy) -> Clearance {
    // Zero allocation: the phase is skipped, nothing moves, nothing wasted.
    if phase.green_secs <= 0.0 {
        return Clearance { uncleared: phase.queue, used_secs: 0.0, wasted_secs: 0.0 };
    }

    let n = phase.lane_count.max(1);
    let density = phase.queue as f64 / n as f64;
    if density > policy.flush_density {
        flush(phase, policy, n)
    } else {
        batch(rng, phase, policy, n)
    }
}

/// Normal regime: per-batch crossing with randomized intervals.
fn batch(rng: &mut SimRng, phase: &LanePhase, policy: &DischargePolicy, n: u32) -> Clearance {
    let lo = (phase.cross_secs - 1.0).max(1.0);
    let hi = phase.cross_secs + 1.0;

    let mut remaining = phase.queue;
    let mut spent = 0.0;
    while remaining > 0 {
        let interval = rng.gen_range(lo..=hi);
        if spent + interval > phase.green_secs {
            break;
        }
        spent += interval;
        remaining -= remaining.min(n);
    }

    finish(phase, policy, remaining, spent)
}

/// Saturated regime: mass-flow accounting with a straggler flush.
fn flush(phase: &LanePhase, policy: &DischargePolicy, n: u32) -> Clearance {
    let dilated = phase.cross_secs * policy.flush_dilation;
    let clearable = ((phase.green_secs / dilated) * n as f64).floor() as u32;

    let cleared = clearable.min(phase.queue);
    let remaining = phase.queue - cleared;

    if remaining > 0 && remaining <= n {
        // Straggler flush: force the tiny remainder through and extend the
        // recorded used time by one dilated crossing interval.
        return Clearance {
            uncleared:   0,
            used_secs:   phase.green_secs + dilated,
            wasted_secs: 0.0,
        };
    }

    let spent = (cleared.div_ceil(n) as f64 * dilated).min(phase.green_secs);
    finish(phase, policy, remaining, spent)
}

/// Apply the phase-end policy to a (remaining, service-time) pair.
fn finish(phase: &LanePhase, policy: &DischargePolicy, remaining: u32, spent: f64) -> Clearance {
    if remaining > 0 {
        // Green fully consumed by a queue that outlasted it: no idle waste.
        return Clearance { uncleared: remaining, used_secs: phase.green_secs, wasted_secs: 0.0 };
    }

    let left = phase.green_secs - spent;
    if phase.cut_early {
        // Phase ends as soon as the queue empties, plus a clearance allowance.
        let pad = left.min(policy.cut_allowance_secs);
        Clearance { uncleared: 0, used_secs: spent + pad, wasted_secs: pad }
    } else {
        // Fixed-time: the full allocation burns whether needed or not.
        Clearance { uncleared: 0, used_secs: phase.green_secs, wasted_secs: left }
    }
}
