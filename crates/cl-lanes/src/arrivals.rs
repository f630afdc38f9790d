//! Stochastic per-lane arrival generation.
//!
//! Demand is configured as a vehicles-per-minute band and scaled by the
//! elapsed-time basis of the cycle (the previous cycle's realized length in
//! minutes), so a controller that lets cycles grow long faces proportionally
//! more arrivals in the next round — an effect the loss model's escalation
//! term then punishes.

use cl_core::{ArrivalRange, SimRng};

/// Probability that a cycle's draw comes from the spike band instead of the
/// normal demand band.
const SPIKE_PROB: f64 = 0.10;

/// Spike band upper multiplier: spikes land in `[hi, hi × 1.5 + 1]`.
const SPIKE_FACTOR: f64 = 1.5;

/// Draw this cycle's arrival count for one lane.
///
/// `basis_mins` is the elapsed-time basis in minutes.  The per-minute band is
/// scaled to a per-cycle count band `[lo, hi]` (rounded); with probability
/// 0.10 the draw comes from the spike band `[hi, round(hi × 1.5) + 1]`
/// instead, modeling bursty demand.
///
/// Degenerate inputs never error: an empty band (`lo == hi == 0`) yields 0,
/// and rounding that inverts the band is repaired with the safe-max policy.
pub fn sample_arrivals(rng: &mut SimRng, range: ArrivalRange, basis_mins: f64) -> u32 {
    let basis = basis_mins.max(0.0);
    let lo = (range.min_per_min * basis).round().max(0.0) as u32;
    let hi = ((range.max_per_min * basis).round().max(0.0) as u32).max(lo);

    if rng.gen_bool(SPIKE_PROB) {
        let spike_hi = ((hi as f64 * SPIKE_FACTOR).round() as u32) + 1;
        rng.gen_range(hi..=spike_hi.max(hi))
    } else {
        rng.gen_range(lo..=hi)
    }
}
