//! Run configuration and tunable parameter groups.
//!
//! # Defensive coercion
//!
//! Configuration arrives from an untrusted boundary (a request body, a
//! hand-edited file).  Malformed or out-of-range values must never abort a
//! run or propagate invalid state into the simulation; [`SimConfig::sanitize`]
//! coerces every field to its documented safe value instead.  After
//! `sanitize`, all divisions and random-range samples in the engine are
//! well-defined: lane counts are ≥ 1, the crossing time is ≥ 1 s, ranges are
//! ordered, probabilities are in [0, 1].
//!
//! # Tunables, not physics
//!
//! The penalty coefficients, flush thresholds, and learning-rate constants
//! here changed substantially across releases of the system this models.
//! They are exposed as configuration with documented defaults rather than
//! baked in as constants.

use crate::lane::{Lane, LaneTable};

// ── ArrivalRange ─────────────────────────────────────────────────────────────

/// Per-lane demand band, in vehicles per minute.
///
/// The arrival generator scales this by the elapsed-time basis of the cycle
/// to get a per-cycle count range.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrivalRange {
    pub min_per_min: f64,
    pub max_per_min: f64,
}

impl ArrivalRange {
    pub const fn new(min_per_min: f64, max_per_min: f64) -> Self {
        Self { min_per_min, max_per_min }
    }

    /// Midpoint of the band — used for the adaptive warm start.
    pub fn expected_per_min(&self) -> f64 {
        (self.min_per_min + self.max_per_min) / 2.0
    }

    /// Negative rates floored to zero; inverted bands repaired with the
    /// safe-max policy (`max := max(min, max)`).
    fn sanitized(self) -> Self {
        let min = self.min_per_min.max(0.0);
        let max = self.max_per_min.max(min);
        Self { min_per_min: min, max_per_min: max }
    }
}

impl Default for ArrivalRange {
    fn default() -> Self {
        ArrivalRange::new(2.0, 12.0)
    }
}

// ── DischargePolicy ──────────────────────────────────────────────────────────

/// Tunables for the lane clearance model.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DischargePolicy {
    /// Queued vehicles per physical lane above which the clearance model
    /// switches to saturated mass-flow ("arterial flushing") accounting.
    pub flush_density: f64,

    /// Crossing-time multiplier (> 1.0) applied in the flush regime to model
    /// slower saturated flow.
    pub flush_dilation: f64,

    /// Clearance/overhead allowance appended to the service time when a
    /// phase is cut early, capped by the green time actually remaining.
    pub cut_allowance_secs: f64,
}

impl Default for DischargePolicy {
    fn default() -> Self {
        Self {
            flush_density:      12.0,
            flush_dilation:     1.25,
            cut_allowance_secs: 3.0,
        }
    }
}

impl DischargePolicy {
    fn sanitized(self) -> Self {
        Self {
            flush_density:      if self.flush_density > 0.0 { self.flush_density } else { 12.0 },
            flush_dilation:     self.flush_dilation.max(1.0),
            cut_allowance_secs: self.cut_allowance_secs.max(0.0),
        }
    }
}

// ── LossWeights ──────────────────────────────────────────────────────────────

/// Coefficients of the per-lane, per-cycle penalty decomposition.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LossWeights {
    /// Weight on `uncleared × red_time`.  Must be ≥ 1 so failing to clear
    /// always costs more than ordinary waiting.
    pub uncleared_mult: f64,

    /// Per-vehicle cost on raw queue size, discouraging sustained buildup.
    pub queue_cost: f64,

    /// Coefficient on `holdovers²` — the convex starvation term.
    pub starvation_cost: f64,

    /// Red-time threshold (seconds) beyond which the escalation term kicks in.
    pub red_threshold_secs: f64,

    /// Per-vehicle, per-excess-second escalation rate above the threshold.
    pub escalation_rate: f64,
}

impl Default for LossWeights {
    fn default() -> Self {
        Self {
            uncleared_mult:     1.5,
            queue_cost:         0.5,
            starvation_cost:    0.25,
            red_threshold_secs: 60.0,
            escalation_rate:    0.5,
        }
    }
}

impl LossWeights {
    fn sanitized(self) -> Self {
        Self {
            uncleared_mult:     self.uncleared_mult.max(1.0),
            queue_cost:         self.queue_cost.max(0.0),
            starvation_cost:    self.starvation_cost.max(0.0),
            red_threshold_secs: self.red_threshold_secs.max(0.0),
            escalation_rate:    self.escalation_rate.max(0.0),
        }
    }
}

// ── FeedbackParams ───────────────────────────────────────────────────────────

/// Tunables for the adaptive controller: allocation bounds, the learned
/// weight's range and update gains, and emergency-recovery behavior.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeedbackParams {
    /// Minimum green allocation (seconds).  The variant that skips empty
    /// phases entirely sets this to 0.
    pub min_green_secs: f64,

    /// Maximum green allocation (seconds) after a controller update.
    pub max_green_secs: f64,

    /// Neutral value the per-lane weight starts at and decays toward.
    pub neutral_weight: f64,

    /// Hard bounds on the learned weight.
    pub min_weight: f64,
    pub max_weight: f64,

    /// Base step size for all weight updates.
    pub learning_rate: f64,

    /// Extra increase per held-over vehicle (the starvation signal scales
    /// with how many vehicles persisted).
    pub holdover_gain: f64,

    /// Fraction of `learning_rate` applied when vehicles were left uncleared
    /// but none were holdovers.
    pub uncleared_gain: f64,

    /// Pull toward `neutral_weight` applied on unremarkable cycles.
    pub decay: f64,

    /// Idle green (allocated − used) tolerated before the wasted-allocation
    /// decrease fires, seconds.
    pub idle_tolerance_secs: f64,

    /// Cycles of elevated allocation after an emergency preemption.
    pub cooldown_cycles: u32,

    /// Green seconds added to a lane's allocation while its cooldown is
    /// positive.
    pub recovery_bonus_secs: f64,

    /// Slack seconds added on top of the expected-demand warm start.
    pub warm_start_slack_secs: f64,
}

impl Default for FeedbackParams {
    fn default() -> Self {
        Self {
            min_green_secs:        15.0,
            max_green_secs:        160.0,
            neutral_weight:        1.0,
            min_weight:            0.25,
            max_weight:            4.0,
            learning_rate:         0.05,
            holdover_gain:         0.25,
            uncleared_gain:        0.5,
            decay:                 0.10,
            idle_tolerance_secs:   5.0,
            cooldown_cycles:       3,
            recovery_bonus_secs:   10.0,
            warm_start_slack_secs: 5.0,
        }
    }
}

impl FeedbackParams {
    fn sanitized(self) -> Self {
        let min_green = self.min_green_secs.max(0.0);
        let min_weight = self.min_weight.max(0.01);
        Self {
            min_green_secs:        min_green,
            max_green_secs:        self.max_green_secs.max(min_green),
            neutral_weight:        self.neutral_weight.clamp(min_weight, self.max_weight.max(min_weight)),
            min_weight,
            max_weight:            self.max_weight.max(min_weight),
            learning_rate:         self.learning_rate.max(0.0),
            holdover_gain:         self.holdover_gain.max(0.0),
            uncleared_gain:        self.uncleared_gain.max(0.0),
            decay:                 self.decay.clamp(0.0, 1.0),
            idle_tolerance_secs:   self.idle_tolerance_secs.max(0.0),
            cooldown_cycles:       self.cooldown_cycles,
            recovery_bonus_secs:   self.recovery_bonus_secs.max(0.0),
            warm_start_slack_secs: self.warm_start_slack_secs.max(0.0),
        }
    }
}

// ── SimConfig ────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Every field has a documented default; a boundary layer deserializing a
/// partial record gets the defaults for missing fields, then
/// [`sanitize`][Self::sanitize] repairs whatever arrived malformed.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of control cycles to simulate.
    pub total_cycles: u32,

    /// Mean per-vehicle crossing time, seconds.
    pub cross_secs: f64,

    /// Per-lane demand bands, vehicles per minute.
    pub arrival_ranges: LaneTable<ArrivalRange>,

    /// Per-lane probability of an emergency vehicle appearing in a cycle.
    pub ev_probs: LaneTable<f64>,

    /// Physical travel lanes on the north–south axis.
    pub lanes_ns: u32,

    /// Physical travel lanes on the east–west axis.
    pub lanes_ew: u32,

    /// The fixed-time controller's static green table, seconds.
    /// Re-applied every cycle unchanged.
    pub fixed_greens: LaneTable<f64>,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    pub discharge: DischargePolicy,
    pub loss: LossWeights,
    pub feedback: FeedbackParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_cycles: 50,
            cross_secs:   5.0,
            arrival_ranges: LaneTable::from_fn(|lane| match lane.axis() {
                crate::lane::Axis::NorthSouth => ArrivalRange::new(2.0, 12.0),
                crate::lane::Axis::EastWest => ArrivalRange::new(5.0, 15.0),
            }),
            ev_probs: LaneTable::splat(0.05),
            lanes_ns: 2,
            lanes_ew: 3,
            fixed_greens: LaneTable::from_fn(|lane| match lane.axis() {
                crate::lane::Axis::NorthSouth => 45.0,
                crate::lane::Axis::EastWest => 60.0,
            }),
            seed:      42,
            discharge: DischargePolicy::default(),
            loss:      LossWeights::default(),
            feedback:  FeedbackParams::default(),
        }
    }
}

impl SimConfig {
    /// Coerce every field to a safe value.  Never fails: a degenerate config
    /// becomes a runnable one, per the boundary contract.
    pub fn sanitize(mut self) -> Self {
        if self.total_cycles == 0 {
            self.total_cycles = 50;
        }
        // Crossing time floor keeps every division and random band well-defined.
        if !(self.cross_secs >= 1.0) {
            self.cross_secs = if self.cross_secs.is_finite() && self.cross_secs > 0.0 {
                1.0
            } else {
                5.0
            };
        }
        self.arrival_ranges = self.arrival_ranges.map(|_, r| r.sanitized());
        self.ev_probs = self.ev_probs.map(|_, &p| if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 });
        self.lanes_ns = self.lanes_ns.max(1);
        self.lanes_ew = self.lanes_ew.max(1);
        self.fixed_greens = self.fixed_greens.map(|_, &g| if g.is_finite() { g.max(0.0) } else { 0.0 });
        self.discharge = self.discharge.sanitized();
        self.loss = self.loss.sanitized();
        self.feedback = self.feedback.sanitized();
        self
    }

    /// Physical-lane count for `lane`, resolved through its axis.
    #[inline]
    pub fn lane_count(&self, lane: Lane) -> u32 {
        match lane.axis() {
            crate::lane::Axis::NorthSouth => self.lanes_ns,
            crate::lane::Axis::EastWest => self.lanes_ew,
        }
    }

    /// Per-lane physical-lane counts as a table.
    pub fn lane_counts(&self) -> LaneTable<u32> {
        LaneTable::from_fn(|lane| self.lane_count(lane))
    }
}
