//! Unit tests for sf-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, RegisterId, ShelfId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(ShelfId(0) < ShelfId(1));
        assert!(RegisterId(3) > RegisterId(2));
    }

    #[test]
    fn register_number_is_one_based() {
        assert_eq!(RegisterId(0).number(), 1);
        assert_eq!(RegisterId(4).number(), 5);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(ShelfId(2).to_string(), "ShelfId(2)");
    }
}

#[cfg(test)]
mod cell {
    use crate::Cell;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Cell::new(1, 2);
        let b = Cell::new(4, -2);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn neighbour_order_is_east_west_north_south() {
        let got: Vec<Cell> = Cell::new(5, 5).neighbours().collect();
        assert_eq!(
            got,
            vec![Cell::new(6, 5), Cell::new(4, 5), Cell::new(5, 6), Cell::new(5, 4)]
        );
    }

    #[test]
    fn bounds() {
        assert!(Cell::new(0, 0).within(20, 20));
        assert!(Cell::new(19, 19).within(20, 20));
        assert!(!Cell::new(20, 0).within(20, 20));
        assert!(!Cell::new(-1, 3).within(20, 20));
    }

    #[test]
    fn display() {
        assert_eq!(Cell::new(3, -1).to_string(), "(3, -1)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimTime, StoreHours};

    #[test]
    fn arithmetic() {
        let t = SimTime::from_secs(10);
        assert_eq!(t + 600, SimTime(10_600));
        assert_eq!(t.offset(400), SimTime(10_400));
        assert_eq!(SimTime(10_600).since(t), 600);
        assert_eq!(t.since(SimTime(10_600)), 0);
    }

    #[test]
    fn parse_clock() {
        assert_eq!(SimTime::parse_clock("08:00").unwrap(), SimTime::from_hms(8, 0, 0));
        assert_eq!(SimTime::parse_clock("13:45:30").unwrap(), SimTime::from_hms(13, 45, 30));
        assert!(SimTime::parse_clock("8").is_err());
        assert!(SimTime::parse_clock("12:75").is_err());
        assert!(SimTime::parse_clock("ab:cd").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(SimTime::from_hms(8, 5, 3).to_string(), "08:05:03");
        assert_eq!(SimTime(28_800_600).to_string(), "08:00:00.600");
    }

    #[test]
    fn fractional_seconds_round_to_millis() {
        assert_eq!(SimTime::from_secs_f64(28_800.6), SimTime(28_800_600));
        assert_eq!(SimTime::from_secs_f64(-5.0), SimTime::MIDNIGHT);
        assert_eq!(SimTime::from_secs_f64(f64::NAN), SimTime::MIDNIGHT);
    }

    #[test]
    fn serde_accepts_seconds_and_clock_strings() {
        #[derive(serde::Deserialize)]
        struct Doc {
            a: SimTime,
            b: SimTime,
        }
        let doc: Doc = toml::from_str("a = 28800.5\nb = \"12:30\"").unwrap();
        assert_eq!(doc.a, SimTime(28_800_500));
        assert_eq!(doc.b, SimTime::from_hms(12, 30, 0));
    }

    #[test]
    fn closed_only_strictly_after_close() {
        let hours = StoreHours::default();
        assert!(!hours.is_closed_at(hours.close));
        assert!(hours.is_closed_at(hours.close + 1));
        assert_eq!(hours.span_ms(), 12 * 3_600 * 1_000);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            assert_eq!(r1.unit(), r2.unit());
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        assert_ne!(r0.unit(), r1.unit(), "streams for adjacent agents should diverge");
    }

    #[test]
    fn draw_below_extremes() {
        let mut rng = AgentRng::new(0, AgentId(0));
        for _ in 0..100 {
            assert!(!rng.draw_below(0.0));
            assert!(rng.draw_below(1.0));
        }
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = AgentRng::new(0, AgentId(0));
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9]), Some(&9));
    }

    #[test]
    fn uniform_in_bounds() {
        let mut rng = SimRng::new(3);
        for _ in 0..1000 {
            let v = rng.uniform(10.0, 20.0);
            assert!((10.0..20.0).contains(&v));
        }
        assert_eq!(rng.uniform(5.0, 5.0), 5.0);
    }

    #[test]
    fn shuffle_is_seeded() {
        let mut a: Vec<u32> = (0..50).collect();
        let mut b = a.clone();
        SimRng::new(9).shuffle(&mut a);
        SimRng::new(9).shuffle(&mut b);
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod config {
    use std::io::Write;

    use crate::{Cell, CoreError, SimConfig, SimTime};

    #[test]
    fn defaults_are_valid() {
        let cfg = SimConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.grid.width, 20);
        assert_eq!(cfg.grid.cell_duration_ms, 600);
        assert_eq!(cfg.checkout.max_queue_length, 5);
        assert_eq!(cfg.checkout.service_time_ms, 10_000);
        assert_eq!(cfg.purchase.min_chance_to_approach, 0.3);
        assert_eq!(cfg.movement.max_reroutes, 8);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = SimConfig::from_toml_str(
            r#"
            seed = 7
            num_threads = 1

            [hours]
            open  = "09:00"
            close = "21:00"

            [grid]
            width = 30
            entrance = { x = 2, z = 0 }
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.num_threads, Some(1));
        assert_eq!(cfg.hours.open, SimTime::from_hms(9, 0, 0));
        assert_eq!(cfg.grid.width, 30);
        assert_eq!(cfg.grid.height, 20);
        assert_eq!(cfg.grid.entrance, Cell::new(2, 0));
        assert_eq!(cfg.checkout.max_queue_length, 5);
        cfg.validate().unwrap();
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[checkout]\nmax_queue_length = 2").unwrap();
        let cfg = SimConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.checkout.max_queue_length, 2);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = SimConfig::from_toml_str("seed = \"many\"").unwrap_err();
        assert!(matches!(err, CoreError::Toml(_)));
    }

    #[test]
    fn rejects_zero_grid() {
        let mut cfg = SimConfig::default();
        cfg.grid.width = 0;
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_entrance_outside_grid() {
        let mut cfg = SimConfig::default();
        cfg.grid.entrance = Cell::new(20, 0);
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_close_before_open() {
        let mut cfg = SimConfig::default();
        cfg.hours.close = cfg.hours.open;
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_bad_probabilities() {
        let mut cfg = SimConfig::default();
        cfg.checkout.breakdown_probability = 1.5;
        assert!(cfg.validate().is_err());

        let mut cfg = SimConfig::default();
        cfg.arrivals.peak_fraction = -0.1;
        assert!(cfg.validate().is_err());

        let mut cfg = SimConfig::default();
        cfg.purchase.base_chance = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_durations_and_threads() {
        let mut cfg = SimConfig::default();
        cfg.grid.cell_duration_ms = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = SimConfig::default();
        cfg.num_threads = Some(0);
        assert!(cfg.validate().is_err());

        let mut cfg = SimConfig::default();
        cfg.checkout.max_queue_length = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_peak_outside_hours() {
        let mut cfg = SimConfig::default();
        cfg.arrivals.peak_end = SimTime::from_hms(22, 0, 0);
        assert!(cfg.validate().is_err());
    }
}
