//! Emergency-vehicle sampling and priority ordering.
//!
//! At most one emergency vehicle appears per lane per cycle.  Its queue
//! position is sampled once per controller variant: the two variants' queues
//! diverge over a run, so the "same" vehicle sits at a different depth in
//! each.  Concurrent events are ranked by (class priority, adaptive queue
//! position) with a single stable sort — among equal-priority classes the
//! vehicle nearer the stop line goes first.

use cl_core::{Lane, LaneTable, SimRng};

// ── EvClass ──────────────────────────────────────────────────────────────────

/// Emergency vehicle class, in priority order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvClass {
    Ambulance,
    Fire,
    Police,
}

impl EvClass {
    pub const ALL: [EvClass; 3] = [EvClass::Ambulance, EvClass::Fire, EvClass::Police];

    /// Priority rank; lower preempts higher.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            EvClass::Ambulance => 1,
            EvClass::Fire => 2,
            EvClass::Police => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EvClass::Ambulance => "Ambulance",
            EvClass::Fire => "Fire",
            EvClass::Police => "Police",
        }
    }
}

// ── EvEvent ──────────────────────────────────────────────────────────────────

/// An emergency vehicle detected in one lane for the current cycle.
///
/// Ephemeral: exists only within the cycle that sampled it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct EvEvent {
    pub lane: Lane,
    pub class: EvClass,
    /// 1-based position in the adaptive variant's pre-clearance queue.
    pub pos_adaptive: u32,
    /// 1-based position in the fixed variant's pre-clearance queue.
    pub pos_fixed: u32,
}

/// Sample this cycle's emergency events, sorted by service priority.
///
/// Each lane independently produces an event with its configured
/// probability.  Positions are uniform in `[1, max(1, queue)]` — the floor
/// avoids a degenerate zero position on an empty queue.
pub fn sample_events(
    rng:             &mut SimRng,
    probs:           &LaneTable<f64>,
    adaptive_queues: &LaneTable<u32>,
    fixed_queues:    &LaneTable<u32>,
) -> Vec<EvEvent> {
    let mut events = Vec::new();
    for lane in Lane::ALL {
        if !rng.gen_bool(probs[lane]) {
            continue;
        }
        // choose() on a non-empty const slice cannot fail; fall back anyway.
        let class = rng.choose(&EvClass::ALL).copied().unwrap_or(EvClass::Ambulance);
        let pos_adaptive = rng.gen_range(1..=adaptive_queues[lane].max(1));
        let pos_fixed = rng.gen_range(1..=fixed_queues[lane].max(1));
        events.push(EvEvent { lane, class, pos_adaptive, pos_fixed });
    }
    events.sort_by_key(|ev| (ev.class.rank(), ev.pos_adaptive));
    events
}

/// Green seconds guaranteeing a vehicle at `position` clears.
///
/// `position` vehicles ahead of (and including) the emergency vehicle spread
/// across `lane_count` physical lanes, each batch taking at most one
/// worst-case crossing interval of `cross_secs + 1`.
pub fn required_green_secs(position: u32, lane_count: u32, cross_secs: f64) -> f64 {
    let batches = position.div_ceil(lane_count.max(1));
    batches as f64 * (cross_secs + 1.0)
}
