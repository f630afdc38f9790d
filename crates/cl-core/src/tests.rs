//! Unit tests for cl-core primitives.

#[cfg(test)]
mod lane {
    use crate::{Axis, Lane, LaneTable};

    #[test]
    fn all_covers_every_variant_once() {
        assert_eq!(Lane::ALL.len(), 4);
        for (i, lane) in Lane::ALL.iter().enumerate() {
            assert_eq!(lane.index(), i);
        }
    }

    #[test]
    fn axis_grouping() {
        assert_eq!(Lane::North.axis(), Axis::NorthSouth);
        assert_eq!(Lane::South.axis(), Axis::NorthSouth);
        assert_eq!(Lane::East.axis(), Axis::EastWest);
        assert_eq!(Lane::West.axis(), Axis::EastWest);
    }

    #[test]
    fn display() {
        assert_eq!(Lane::North.to_string(), "North");
        assert_eq!(Lane::West.to_string(), "West");
    }

    #[test]
    fn table_index_matches_from_fn() {
        let table = LaneTable::from_fn(|lane| lane.index() * 10);
        assert_eq!(table[Lane::North], 0);
        assert_eq!(table[Lane::South], 10);
        assert_eq!(table[Lane::East], 20);
        assert_eq!(table[Lane::West], 30);
    }

    #[test]
    fn table_iter_compass_order() {
        let table = LaneTable::from_fn(|lane| lane);
        let order: Vec<Lane> = table.iter().map(|(lane, _)| lane).collect();
        assert_eq!(order, Lane::ALL);
    }

    #[test]
    fn table_mutation_is_per_slot() {
        let mut table = LaneTable::splat(0u32);
        table[Lane::East] += 7;
        assert_eq!(table[Lane::East], 7);
        assert_eq!(table[Lane::North], 0);
    }

    #[test]
    fn f64_total() {
        let table = LaneTable::from_fn(|lane| lane.index() as f64);
        assert_eq!(table.total(), 6.0);
    }
}

#[cfg(test)]
mod cycle {
    use crate::Cycle;

    #[test]
    fn arithmetic() {
        let mut c = Cycle::FIRST;
        assert_eq!(c.offset(3), Cycle(4));
        c.advance();
        assert_eq!(c, Cycle(2));
    }

    #[test]
    fn display() {
        assert_eq!(Cycle(7).to_string(), "C7");
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.gen_range(0.0..1.0);
            let b: f64 = r2.gen_range(0.0..1.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn child_streams_diverge() {
        let mut root = SimRng::new(1);
        let mut a = root.child(0);
        let mut b = root.child(1);
        let va: u64 = a.gen_range(0..u64::MAX);
        let vb: u64 = b.gen_range(0..u64::MAX);
        assert_ne!(va, vb, "sibling streams should not track each other");
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        // Out-of-range probabilities are clamped, not panicked on.
        assert!(rng.gen_bool(7.5));
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(0);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}

#[cfg(test)]
mod config {
    use crate::{ArrivalRange, Lane, SimConfig};

    #[test]
    fn defaults_match_documented_table() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.total_cycles, 50);
        assert_eq!(cfg.cross_secs, 5.0);
        assert_eq!(cfg.fixed_greens[Lane::North], 45.0);
        assert_eq!(cfg.fixed_greens[Lane::East], 60.0);
        assert_eq!(cfg.arrival_ranges[Lane::South], ArrivalRange::new(2.0, 12.0));
        assert_eq!(cfg.arrival_ranges[Lane::West], ArrivalRange::new(5.0, 15.0));
    }

    #[test]
    fn sanitize_floors_lane_counts() {
        let cfg = SimConfig { lanes_ns: 0, lanes_ew: 0, ..SimConfig::default() }.sanitize();
        assert_eq!(cfg.lanes_ns, 1);
        assert_eq!(cfg.lanes_ew, 1);
        assert_eq!(cfg.lane_count(Lane::North), 1);
        assert_eq!(cfg.lane_count(Lane::East), 1);
    }

    #[test]
    fn sanitize_repairs_inverted_arrival_band() {
        let mut cfg = SimConfig::default();
        cfg.arrival_ranges[Lane::North] = ArrivalRange::new(10.0, 3.0);
        let cfg = cfg.sanitize();
        let r = cfg.arrival_ranges[Lane::North];
        assert_eq!(r.min_per_min, 10.0);
        assert_eq!(r.max_per_min, 10.0);
    }

    #[test]
    fn sanitize_clamps_probabilities() {
        let mut cfg = SimConfig::default();
        cfg.ev_probs[Lane::East] = 3.0;
        cfg.ev_probs[Lane::West] = -1.0;
        let cfg = cfg.sanitize();
        assert_eq!(cfg.ev_probs[Lane::East], 1.0);
        assert_eq!(cfg.ev_probs[Lane::West], 0.0);
    }

    #[test]
    fn sanitize_floors_crossing_time() {
        let cfg = SimConfig { cross_secs: 0.2, ..SimConfig::default() }.sanitize();
        assert_eq!(cfg.cross_secs, 1.0);
        let cfg = SimConfig { cross_secs: f64::NAN, ..SimConfig::default() }.sanitize();
        assert_eq!(cfg.cross_secs, 5.0);
    }

    #[test]
    fn sanitize_zero_cycles_defaults() {
        let cfg = SimConfig { total_cycles: 0, ..SimConfig::default() }.sanitize();
        assert_eq!(cfg.total_cycles, 50);
    }

    #[test]
    fn sanitize_orders_green_bounds() {
        let mut cfg = SimConfig::default();
        cfg.feedback.min_green_secs = 100.0;
        cfg.feedback.max_green_secs = 20.0;
        let cfg = cfg.sanitize();
        assert!(cfg.feedback.max_green_secs >= cfg.feedback.min_green_secs);
    }
}
