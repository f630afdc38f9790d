//! The adaptive scheduler: preemption ordering, green extensions, and the
//! cycle-over-cycle retargeting loop.
//!
//! Owns the [`FeedbackController`] and the per-lane emergency cooldowns.
//! One instance per run, passed by `&mut` into each cycle step — no shared
//! or global state.

use cl_core::{FeedbackParams, Lane, LaneTable, SimConfig};
use cl_lanes::{required_green_secs, EvEvent};

use crate::feedback::{FeedbackController, LaneOutcome};

// ── CyclePlan ────────────────────────────────────────────────────────────────

/// The adaptive variant's servicing decision for one cycle.
#[derive(Copy, Clone, Debug)]
pub struct CyclePlan {
    /// Service order: emergency lanes first (priority-sorted), then the
    /// remaining lanes in compass order.
    pub order: [Lane; 4],
    /// Green allocation per lane, after emergency extension and recovery
    /// bonus.  Extension may exceed the configured maximum — the clearance
    /// guarantee outranks the bound, which applies to the update step.
    pub allocations: LaneTable<f64>,
}

// ── AdaptiveScheduler ────────────────────────────────────────────────────────

/// Feedback-driven allocation with emergency preemption.
pub struct AdaptiveScheduler {
    controller: FeedbackController,
    /// Persisted per-lane green allocations (the controller's "action").
    greens: LaneTable<f64>,
    /// Post-emergency recovery window per lane, in cycles.
    cooldowns: LaneTable<u32>,
    params: FeedbackParams,
}

impl AdaptiveScheduler {
    /// Build the scheduler with warm-start allocations.
    ///
    /// Cycle 1 has no prior outcome to retarget from, so the initial
    /// allocation covers the expected demand midpoint over the initial
    /// basis, plus a slack margin, clamped to the green bound.
    pub fn from_config(cfg: &SimConfig, basis_mins: f64) -> Self {
        let params = cfg.feedback;
        let greens = LaneTable::from_fn(|lane| {
            let expected = cfg.arrival_ranges[lane].expected_per_min() * basis_mins;
            let service = expected / cfg.lane_count(lane) as f64 * cfg.cross_secs;
            (service + params.warm_start_slack_secs)
                .clamp(params.min_green_secs, params.max_green_secs)
        });
        Self {
            controller: FeedbackController::new(params),
            greens,
            cooldowns: LaneTable::splat(0),
            params,
        }
    }

    /// Plan this cycle's service order and allocations.
    ///
    /// `events` must be the priority-sorted output of
    /// [`cl_lanes::sample_events`].  Each event lane is pulled to the front
    /// of the order, its allocation raised (never lowered) to guarantee the
    /// vehicle's position clears, and its cooldown armed.  Lanes still in a
    /// recovery window without a fresh emergency keep a green bonus.
    pub fn plan(
        &mut self,
        events:      &[EvEvent],
        lane_counts: &LaneTable<u32>,
        cross_secs:  f64,
    ) -> CyclePlan {
        let mut order = [Lane::North; 4];
        let mut filled = 0;
        for ev in events {
            // At most one event per lane by construction; skip duplicates
            // rather than trusting the caller.
            if !order[..filled].contains(&ev.lane) {
                order[filled] = ev.lane;
                filled += 1;
            }
        }
        for lane in Lane::ALL {
            if !order[..filled].contains(&lane) {
                order[filled] = lane;
                filled += 1;
            }
        }
        debug_assert_eq!(filled, 4);

        let mut allocations = self.greens;
        for ev in events {
            let required = required_green_secs(ev.pos_adaptive, lane_counts[ev.lane], cross_secs);
            allocations[ev.lane] = allocations[ev.lane].max(required);
            self.cooldowns[ev.lane] = self.params.cooldown_cycles;
        }
        for lane in Lane::ALL {
            if self.cooldowns[lane] > 0 && !events.iter().any(|ev| ev.lane == lane) {
                allocations[lane] += self.params.recovery_bonus_secs;
            }
        }

        CyclePlan { order, allocations }
    }

    /// Fold the cycle's outcomes into the weights, retarget next cycle's
    /// allocations from the unresolved queues, and tick down cooldowns.
    pub fn finish_cycle(
        &mut self,
        outcomes:     &LaneTable<LaneOutcome>,
        queues_after: &LaneTable<u32>,
        lane_counts:  &LaneTable<u32>,
        cross_secs:   f64,
    ) {
        for lane in Lane::ALL {
            self.controller.observe(lane, &outcomes[lane]);
            self.greens[lane] = self.controller.target_green(
                lane,
                queues_after[lane],
                lane_counts[lane],
                cross_secs,
            );
            if self.cooldowns[lane] > 0 {
                self.cooldowns[lane] -= 1;
            }
        }
    }

    /// Whether `lane` is inside its post-emergency recovery window.
    #[inline]
    pub fn in_recovery(&self, lane: Lane) -> bool {
        self.cooldowns[lane] > 0
    }

    /// The persisted allocation table (before plan-time extensions).
    #[inline]
    pub fn allocations(&self) -> &LaneTable<f64> {
        &self.greens
    }

    /// Read-only view of the learned weights.
    #[inline]
    pub fn controller(&self) -> &FeedbackController {
        &self.controller
    }
}
