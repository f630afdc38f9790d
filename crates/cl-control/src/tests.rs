//! Unit tests for scoring and allocation.

#[cfg(test)]
mod loss {
    use cl_core::LossWeights;

    use crate::{holdovers, score, LossInputs};

    fn inputs(queue_before: u32, arrivals: u32, uncleared: u32, red: f64) -> LossInputs {
        LossInputs { queue_before, arrivals, uncleared, red_secs: red }
    }

    #[test]
    fn holdover_is_pre_arrival_remainder() {
        assert_eq!(holdovers(10, 4), 6);
        assert_eq!(holdovers(4, 4), 0);
        // Arrivals exceeding the queue they joined saturates to zero.
        assert_eq!(holdovers(3, 9), 0);
    }

    #[test]
    fn no_holdovers_means_no_starvation() {
        let w = LossWeights::default();
        let b = score(&inputs(8, 8, 2, 40.0), &w);
        assert_eq!(b.starvation, 0.0);
    }

    #[test]
    fn starvation_is_convex_in_holdovers() {
        let w = LossWeights::default();
        let one = score(&inputs(9, 8, 0, 40.0), &w).starvation;
        let three = score(&inputs(11, 8, 0, 40.0), &w).starvation;
        assert_eq!(one, w.starvation_cost);
        assert_eq!(three, w.starvation_cost * 9.0);
        assert!(three > 3.0 * one);
    }

    #[test]
    fn waiting_charges_fresh_half_and_held_full() {
        let w = LossWeights { escalation_rate: 0.0, ..LossWeights::default() };
        // 4 fresh at red/2 + 2 held at red, red = 50 (below threshold).
        let b = score(&inputs(6, 4, 0, 50.0), &w);
        assert_eq!(b.waiting, 4.0 * 25.0 + 2.0 * 50.0);
    }

    #[test]
    fn escalation_applies_above_threshold_only() {
        let w = LossWeights::default();
        let below = score(&inputs(4, 4, 0, 60.0), &w);
        assert_eq!(below.waiting, 4.0 * 30.0);
        let above = score(&inputs(4, 4, 0, 80.0), &w);
        assert_eq!(above.waiting, 4.0 * 40.0 + 4.0 * 20.0 * w.escalation_rate);
    }

    #[test]
    fn uncleared_outweighs_waiting() {
        let w = LossWeights::default();
        let b = score(&inputs(5, 5, 5, 30.0), &w);
        // 5 uncleared at full red × multiplier vs 5 fresh at half red.
        assert!(b.uncleared > b.waiting);
        assert_eq!(b.uncleared, 5.0 * 30.0 * w.uncleared_mult);
    }

    #[test]
    fn total_is_sum_of_terms() {
        let w = LossWeights::default();
        let b = score(&inputs(12, 7, 3, 75.0), &w);
        let sum = b.waiting + b.uncleared + b.queue + b.starvation;
        assert!((b.total - sum).abs() < 1e-9);
    }

    #[test]
    fn negative_red_is_floored() {
        let w = LossWeights::default();
        let b = score(&inputs(5, 5, 2, -10.0), &w);
        assert_eq!(b.waiting, 0.0);
        assert_eq!(b.uncleared, 0.0);
        assert_eq!(b.total, b.queue);
    }
}

#[cfg(test)]
mod feedback {
    use cl_core::{FeedbackParams, Lane};

    use crate::{FeedbackController, LaneOutcome};

    fn outcome(holdover: u32, uncleared: u32, allocated: f64, used: f64) -> LaneOutcome {
        LaneOutcome { holdover, uncleared, allocated_secs: allocated, used_secs: used }
    }

    #[test]
    fn target_scales_with_queue_and_weight() {
        let c = FeedbackController::new(FeedbackParams::default());
        // 12 vehicles on 2 lanes at 5 s each, neutral weight: 30 s.
        assert_eq!(c.target_green(Lane::North, 12, 2, 5.0), 30.0);
    }

    #[test]
    fn target_clamped_to_bounds() {
        let p = FeedbackParams::default();
        let c = FeedbackController::new(p);
        assert_eq!(c.target_green(Lane::North, 1, 3, 5.0), p.min_green_secs);
        assert_eq!(c.target_green(Lane::North, 500, 1, 5.0), p.max_green_secs);
    }

    #[test]
    fn empty_queue_yields_minimum() {
        let p = FeedbackParams::default();
        let c = FeedbackController::new(p);
        assert_eq!(c.target_green(Lane::East, 0, 2, 5.0), p.min_green_secs);
        // Skip-empty-phases variant: min of zero means the phase is skipped.
        let skip = FeedbackParams { min_green_secs: 0.0, ..p };
        let c = FeedbackController::new(skip);
        assert_eq!(c.target_green(Lane::East, 0, 2, 5.0), 0.0);
    }

    #[test]
    fn holdovers_raise_weight_monotonically() {
        let mut c = FeedbackController::new(FeedbackParams::default());
        let mut prev = c.weight(Lane::South);
        for _ in 0..30 {
            c.observe(Lane::South, &outcome(5, 8, 60.0, 60.0));
            let w = c.weight(Lane::South);
            assert!(w >= prev, "weight fell from {prev} to {w} under starvation");
            prev = w;
        }
        assert!(prev > 1.0);
    }

    #[test]
    fn holdover_step_scales_with_count() {
        let p = FeedbackParams::default();
        let mut a = FeedbackController::new(p);
        let mut b = FeedbackController::new(p);
        a.observe(Lane::North, &outcome(1, 1, 60.0, 60.0));
        b.observe(Lane::North, &outcome(10, 10, 60.0, 60.0));
        assert!(b.weight(Lane::North) > a.weight(Lane::North));
    }

    #[test]
    fn idle_allocation_lowers_weight() {
        let p = FeedbackParams::default();
        let mut c = FeedbackController::new(p);
        c.observe(Lane::West, &outcome(0, 0, 60.0, 20.0));
        assert!(c.weight(Lane::West) < p.neutral_weight);
    }

    #[test]
    fn small_idle_decays_toward_neutral_instead() {
        let p = FeedbackParams::default();
        let mut c = FeedbackController::new(p);
        // Drive the weight up first.
        for _ in 0..10 {
            c.observe(Lane::East, &outcome(3, 3, 60.0, 60.0));
        }
        let high = c.weight(Lane::East);
        // Unremarkable cycle: used nearly all of the allocation, no failures.
        c.observe(Lane::East, &outcome(0, 0, 60.0, 58.0));
        let after = c.weight(Lane::East);
        assert!(after < high && after > p.neutral_weight);
    }

    #[test]
    fn weight_stays_bounded() {
        let p = FeedbackParams::default();
        let mut c = FeedbackController::new(p);
        for _ in 0..10_000 {
            c.observe(Lane::North, &outcome(50, 80, 160.0, 160.0));
        }
        assert_eq!(c.weight(Lane::North), p.max_weight);
        for _ in 0..10_000 {
            c.observe(Lane::North, &outcome(0, 0, 160.0, 10.0));
        }
        assert_eq!(c.weight(Lane::North), p.min_weight);
    }
}

#[cfg(test)]
mod fixed {
    use cl_core::{Lane, LaneTable, SimConfig};

    use crate::FixedSchedule;

    #[test]
    fn allocations_never_change() {
        let cfg = SimConfig::default();
        let sched = FixedSchedule::new(cfg.fixed_greens);
        let first = *sched.allocations();
        // Nothing on the schedule mutates; the table is the table.
        assert_eq!(*sched.allocations(), first);
        assert_eq!(first[Lane::North], 45.0);
        assert_eq!(first[Lane::West], 60.0);
    }

    #[test]
    fn order_is_compass() {
        let sched = FixedSchedule::new(LaneTable::splat(30.0));
        assert_eq!(sched.order(), Lane::ALL);
    }
}

#[cfg(test)]
mod adaptive {
    use cl_core::{Lane, LaneTable, SimConfig};
    use cl_lanes::{required_green_secs, EvClass, EvEvent};

    use crate::{AdaptiveScheduler, LaneOutcome};

    fn scheduler(cfg: &SimConfig) -> AdaptiveScheduler {
        AdaptiveScheduler::from_config(cfg, cfg.fixed_greens.total() / 60.0)
    }

    fn ev(lane: Lane, class: EvClass, pos: u32) -> EvEvent {
        EvEvent { lane, class, pos_adaptive: pos, pos_fixed: pos }
    }

    fn quiet_outcomes() -> LaneTable<LaneOutcome> {
        LaneTable::splat(LaneOutcome {
            holdover:       0,
            uncleared:      0,
            allocated_secs: 30.0,
            used_secs:      28.0,
        })
    }

    #[test]
    fn warm_start_within_bounds() {
        let cfg = SimConfig::default();
        let sched = scheduler(&cfg);
        for lane in Lane::ALL {
            let g = sched.allocations()[lane];
            assert!(g >= cfg.feedback.min_green_secs && g <= cfg.feedback.max_green_secs);
        }
    }

    #[test]
    fn no_events_keeps_compass_order() {
        let cfg = SimConfig::default();
        let mut sched = scheduler(&cfg);
        let plan = sched.plan(&[], &cfg.lane_counts(), cfg.cross_secs);
        assert_eq!(plan.order, Lane::ALL);
    }

    #[test]
    fn emergency_lanes_jump_the_queue() {
        let cfg = SimConfig::default();
        let mut sched = scheduler(&cfg);
        let events = [ev(Lane::West, EvClass::Ambulance, 4), ev(Lane::South, EvClass::Police, 2)];
        let plan = sched.plan(&events, &cfg.lane_counts(), cfg.cross_secs);
        assert_eq!(plan.order, [Lane::West, Lane::South, Lane::North, Lane::East]);
    }

    #[test]
    fn extension_guarantees_clearing_time_and_never_lowers() {
        let cfg = SimConfig::default();
        let mut sched = scheduler(&cfg);
        let base = sched.allocations()[Lane::East];

        // Deep position: requires more than the base allocation.
        let deep = ev(Lane::East, EvClass::Fire, 90);
        let plan = sched.plan(&[deep], &cfg.lane_counts(), cfg.cross_secs);
        let required = required_green_secs(90, cfg.lane_count(Lane::East), cfg.cross_secs);
        assert!(plan.allocations[Lane::East] >= required);
        assert!(plan.allocations[Lane::East] >= base);

        // Shallow position: requirement below base leaves the base intact.
        let shallow = ev(Lane::East, EvClass::Fire, 1);
        let plan = sched.plan(&[shallow], &cfg.lane_counts(), cfg.cross_secs);
        assert_eq!(plan.allocations[Lane::East], base.max(required_green_secs(1, 3, 5.0)));
    }

    #[test]
    fn cooldown_arms_and_pays_a_recovery_bonus() {
        let cfg = SimConfig::default();
        let mut sched = scheduler(&cfg);
        sched.plan(&[ev(Lane::North, EvClass::Ambulance, 2)], &cfg.lane_counts(), cfg.cross_secs);
        assert!(sched.in_recovery(Lane::North));

        sched.finish_cycle(&quiet_outcomes(), &LaneTable::splat(6), &cfg.lane_counts(), cfg.cross_secs);
        assert!(sched.in_recovery(Lane::North));

        // Next cycle without an emergency: the recovering lane gets a bonus.
        let base = sched.allocations()[Lane::North];
        let plan = sched.plan(&[], &cfg.lane_counts(), cfg.cross_secs);
        assert_eq!(plan.allocations[Lane::North], base + cfg.feedback.recovery_bonus_secs);
    }

    #[test]
    fn cooldown_expires_after_configured_cycles() {
        let cfg = SimConfig::default();
        let mut sched = scheduler(&cfg);
        sched.plan(&[ev(Lane::South, EvClass::Police, 1)], &cfg.lane_counts(), cfg.cross_secs);
        for _ in 0..cfg.feedback.cooldown_cycles {
            assert!(sched.in_recovery(Lane::South));
            sched.finish_cycle(&quiet_outcomes(), &LaneTable::splat(3), &cfg.lane_counts(), cfg.cross_secs);
        }
        assert!(!sched.in_recovery(Lane::South));
    }

    #[test]
    fn retarget_respects_bounds_after_update() {
        let cfg = SimConfig::default();
        let mut sched = scheduler(&cfg);
        let starving = LaneTable::splat(LaneOutcome {
            holdover:       40,
            uncleared:      60,
            allocated_secs: 160.0,
            used_secs:      160.0,
        });
        for _ in 0..50 {
            sched.finish_cycle(&starving, &LaneTable::splat(400), &cfg.lane_counts(), cfg.cross_secs);
            for lane in Lane::ALL {
                let g = sched.allocations()[lane];
                assert!(
                    g >= cfg.feedback.min_green_secs && g <= cfg.feedback.max_green_secs,
                    "allocation {g} out of bounds"
                );
            }
        }
    }
}
