//! The `Sim` struct and its cycle loop.

use cl_core::{ControllerKind, Cycle, Lane, LaneTable, SimConfig, SimRng};
use cl_control::{
    holdovers, score, AdaptiveScheduler, FixedSchedule, LaneOutcome, LossInputs,
};
use cl_lanes::{discharge, required_green_secs, sample_arrivals, sample_events, Clearance, EvEvent, LanePhase};

use crate::observer::CycleObserver;
use crate::report::{CycleLogRow, LaneEvent, RunReport};
use crate::{SimError, SimResult};

// ── RNG stream offsets ───────────────────────────────────────────────────────
//
// Both variants must see the same arrival and emergency draws, while their
// clearance randomness stays independent — their queues diverge, so a shared
// service stream would entangle them.

const ARRIVALS_STREAM: u64 = 0;
const EVENTS_STREAM: u64 = 1;
const ADAPTIVE_CLEARANCE_STREAM: u64 = 2;
const FIXED_CLEARANCE_STREAM: u64 = 3;

// ── Sim ──────────────────────────────────────────────────────────────────────

/// The simulation runner: one intersection, two controllers, one arrival
/// stream.
///
/// Owns every piece of run state — queues, weights, cooldowns, RNG streams —
/// so independent `Sim`s can run concurrently without interference.  Create
/// with [`Sim::new`], drive with [`run`][Sim::run] or step cycle-by-cycle
/// with [`step`][Sim::step].
pub struct Sim {
    /// Sanitized run configuration.
    pub config: SimConfig,

    /// The adaptive variant's scheduler (weights, cooldowns, allocations).
    pub adaptive: AdaptiveScheduler,

    /// The fixed variant's static schedule.
    pub fixed: FixedSchedule,

    /// Unresolved queues per variant, mutated twice per cycle: arrivals in,
    /// uncleared remainder out.
    pub adaptive_queues: LaneTable<u32>,
    pub fixed_queues: LaneTable<u32>,

    cycle: Cycle,
    lane_counts: LaneTable<u32>,
    /// Elapsed-time basis for the next arrival draw: the previous cycle's
    /// realized length of the fixed variant, seconds.
    basis_secs: f64,

    arrivals_rng: SimRng,
    event_rng: SimRng,
    adaptive_rng: SimRng,
    fixed_rng: SimRng,

    report: RunReport,
}

impl Sim {
    /// Build a runner from a (possibly malformed) configuration.
    ///
    /// The config is sanitized first, so construction never fails; a
    /// degenerate config becomes a runnable one.
    pub fn new(config: SimConfig) -> Self {
        let config = config.sanitize();
        let mut root = SimRng::new(config.seed);
        let arrivals_rng = root.child(ARRIVALS_STREAM);
        let event_rng = root.child(EVENTS_STREAM);
        let adaptive_rng = root.child(ADAPTIVE_CLEARANCE_STREAM);
        let fixed_rng = root.child(FIXED_CLEARANCE_STREAM);

        // First-cycle basis: the static table's nominal length.
        let basis_secs = config.fixed_greens.total();
        let adaptive = AdaptiveScheduler::from_config(&config, basis_secs / 60.0);
        let fixed = FixedSchedule::new(config.fixed_greens);
        let lane_counts = config.lane_counts();

        Self {
            config,
            adaptive,
            fixed,
            adaptive_queues: LaneTable::splat(0),
            fixed_queues: LaneTable::splat(0),
            cycle: Cycle::FIRST,
            lane_counts,
            basis_secs,
            arrivals_rng,
            event_rng,
            adaptive_rng,
            fixed_rng,
            report: RunReport::default(),
        }
    }

    /// The cycle the next [`step`][Sim::step] will simulate.
    #[inline]
    pub fn cycle(&self) -> Cycle {
        self.cycle
    }

    /// Rows and totals accumulated so far.
    #[inline]
    pub fn report(&self) -> &RunReport {
        &self.report
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run `config.total_cycles` cycles and return the full report.
    ///
    /// Calls observer hooks at every cycle boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: CycleObserver>(mut self, observer: &mut O) -> SimResult<RunReport> {
        for _ in 0..self.config.total_cycles {
            self.step(observer)?;
        }
        observer.on_run_end(&self.report);
        Ok(self.report)
    }

    /// Simulate exactly one cycle for both variants.
    ///
    /// Useful for tests and incremental stepping; [`run`][Sim::run] is this
    /// in a loop.
    pub fn step<O: CycleObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let cycle = self.cycle;
        observer.on_cycle_start(cycle);
        tracing::debug!(cycle = cycle.0, basis_secs = self.basis_secs, "cycle start");

        // ── ① Arrivals: one shared draw, added to both variants ───────────
        let basis_mins = self.basis_secs / 60.0;
        let mut arrivals = LaneTable::splat(0u32);
        for lane in Lane::ALL {
            let n = sample_arrivals(&mut self.arrivals_rng, self.config.arrival_ranges[lane], basis_mins);
            arrivals[lane] = n;
            self.adaptive_queues[lane] += n;
            self.fixed_queues[lane] += n;
        }

        // ── ② Emergencies, priority-sorted ────────────────────────────────
        let events = sample_events(
            &mut self.event_rng,
            &self.config.ev_probs,
            &self.adaptive_queues,
            &self.fixed_queues,
        );

        // ── ③ + ④ Plan and service each variant ───────────────────────────
        let plan = self.adaptive.plan(&events, &self.lane_counts, self.config.cross_secs);
        let (a_before, a_out) = service_lanes(
            &mut self.adaptive_rng,
            &mut self.adaptive_queues,
            &plan.order,
            &plan.allocations,
            true,
            &self.config,
            &self.lane_counts,
        )?;

        let fixed_order = self.fixed.order();
        let fixed_allocs = *self.fixed.allocations();
        let (f_before, f_out) = service_lanes(
            &mut self.fixed_rng,
            &mut self.fixed_queues,
            &fixed_order,
            &fixed_allocs,
            false,
            &self.config,
            &self.lane_counts,
        )?;

        // ── ⑤ Score and log.  Realized length = Σ used, red = total − own ─
        let a_total: f64 = a_out.values().iter().map(|c| c.used_secs).sum();
        let f_total: f64 = f_out.values().iter().map(|c| c.used_secs).sum();

        let mut a_cycle_loss = 0.0;
        for (i, &lane) in plan.order.iter().enumerate() {
            let event = adaptive_event(&self.adaptive, &events, lane, a_before[lane], &a_out[lane]);
            let row = self.make_row(cycle, lane, i, plan.allocations[lane], &a_out[lane], arrivals[lane], a_before[lane], a_total, event);
            a_cycle_loss += row.loss.total;
            observer.on_lane_serviced(ControllerKind::Adaptive, &row);
            tracing::trace!(lane = %lane, kind = "adaptive", loss = row.loss.total, "lane serviced");
            self.report.adaptive.push(row);
        }

        let mut f_cycle_loss = 0.0;
        for (i, &lane) in fixed_order.iter().enumerate() {
            let event = fixed_event(&events, lane, fixed_allocs[lane], self.lane_counts[lane], self.config.cross_secs);
            let row = self.make_row(cycle, lane, i, fixed_allocs[lane], &f_out[lane], arrivals[lane], f_before[lane], f_total, event);
            f_cycle_loss += row.loss.total;
            observer.on_lane_serviced(ControllerKind::Fixed, &row);
            tracing::trace!(lane = %lane, kind = "fixed", loss = row.loss.total, "lane serviced");
            self.report.fixed.push(row);
        }

        self.report.adaptive_total_loss += a_cycle_loss;
        self.report.fixed_total_loss += f_cycle_loss;

        // ── ⑥ Learn: weights, retargeting, cooldowns ──────────────────────
        let outcomes = LaneTable::from_fn(|lane| LaneOutcome {
            holdover:       holdovers(a_before[lane], arrivals[lane]),
            uncleared:      a_out[lane].uncleared,
            allocated_secs: plan.allocations[lane],
            used_secs:      a_out[lane].used_secs,
        });
        self.adaptive.finish_cycle(&outcomes, &self.adaptive_queues, &self.lane_counts, self.config.cross_secs);

        // Next cycle's arrivals scale with how long this cycle actually ran.
        self.basis_secs = f_total;

        observer.on_cycle_end(cycle, a_cycle_loss, f_cycle_loss);
        tracing::debug!(
            cycle = cycle.0,
            adaptive_loss = a_cycle_loss,
            fixed_loss = f_cycle_loss,
            "cycle end"
        );
        self.cycle.advance();
        Ok(())
    }

    // ── Row assembly ──────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    fn make_row(
        &self,
        cycle:        Cycle,
        lane:         Lane,
        order_index:  usize,
        allocated:    f64,
        out:          &Clearance,
        arrivals:     u32,
        queue_before: u32,
        total_used:   f64,
        event:        LaneEvent,
    ) -> CycleLogRow {
        let red_secs = (total_used - out.used_secs).max(0.0);
        let loss = score(
            &LossInputs {
                queue_before,
                arrivals,
                uncleared: out.uncleared,
                red_secs,
            },
            &self.config.loss,
        );
        CycleLogRow {
            cycle,
            lane,
            phase: (order_index + 1) as u8,
            allocated_secs: allocated,
            used_secs: out.used_secs,
            wasted_secs: out.wasted_secs,
            arrivals,
            queue_before,
            queue_after: out.uncleared,
            uncleared: out.uncleared,
            red_secs,
            loss,
            event,
        }
    }
}

// ── Per-variant servicing ────────────────────────────────────────────────────

/// Discharge all four lanes in `order`, overwriting each queue with its
/// unresolved remainder.  Returns (queue-before, clearance) tables.
fn service_lanes(
    rng:         &mut SimRng,
    queues:      &mut LaneTable<u32>,
    order:       &[Lane; 4],
    allocations: &LaneTable<f64>,
    cut_early:   bool,
    config:      &SimConfig,
    lane_counts: &LaneTable<u32>,
) -> SimResult<(LaneTable<u32>, LaneTable<Clearance>)> {
    let mut before = LaneTable::splat(0u32);
    let mut outcomes = LaneTable::splat(Clearance { uncleared: 0, used_secs: 0.0, wasted_secs: 0.0 });

    for &lane in order {
        let queue = queues[lane];
        before[lane] = queue;
        let phase = LanePhase {
            queue,
            green_secs: allocations[lane],
            cross_secs: config.cross_secs,
            lane_count: lane_counts[lane],
            cut_early,
        };
        let out = discharge(rng, &phase, &config.discharge);
        if out.uncleared > queue {
            return Err(SimError::Internal {
                what:   "lane clearance",
                detail: format!("{lane}: uncleared {} exceeds queue {queue}", out.uncleared),
            });
        }
        outcomes[lane] = out;
        queues[lane] = out.uncleared;
    }
    Ok((before, outcomes))
}

// ── Event annotations ────────────────────────────────────────────────────────

/// Annotation for an adaptive-variant row.
///
/// The cleared flag reflects what actually happened: the preemption
/// extension makes clearing certain in the batched regime, but a saturated
/// flush can still fall short for a very deep position.
fn adaptive_event(
    scheduler:    &AdaptiveScheduler,
    events:       &[EvEvent],
    lane:         Lane,
    queue_before: u32,
    out:          &Clearance,
) -> LaneEvent {
    if let Some(ev) = events.iter().find(|ev| ev.lane == lane) {
        let cleared_count = queue_before - out.uncleared;
        return LaneEvent::Emergency {
            class:    ev.class,
            position: ev.pos_adaptive,
            cleared:  ev.pos_adaptive <= cleared_count,
        };
    }
    if scheduler.in_recovery(lane) {
        return LaneEvent::Recovery;
    }
    LaneEvent::Normal
}

/// Annotation for a fixed-variant row.
///
/// No reordering, no extension: the vehicle clears only if the static
/// allocation happens to reach its position at worst-case crossing pace.
fn fixed_event(
    events:     &[EvEvent],
    lane:       Lane,
    allocated:  f64,
    lane_count: u32,
    cross_secs: f64,
) -> LaneEvent {
    match events.iter().find(|ev| ev.lane == lane) {
        Some(ev) => LaneEvent::Emergency {
            class:    ev.class,
            position: ev.pos_fixed,
            cleared:  allocated >= required_green_secs(ev.pos_fixed, lane_count, cross_secs),
        },
        None => LaneEvent::Normal,
    }
}
