//! Unit tests for wh-core primitives.

#[cfg(test)]
mod ids {
    use crate::{BoxId, JunctionId, NodeId, RobotId};

    #[test]
    fn index_roundtrip() {
        let id = RobotId(3);
        assert_eq!(id.index(), 3);
        assert_eq!(RobotId::try_from(3usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(RobotId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(JunctionId::INVALID.0, u16::MAX);
        assert_eq!(BoxId::default(), BoxId::INVALID);
    }

    #[test]
    fn junction_id_rejects_out_of_range() {
        assert!(JunctionId::try_from(70_000usize).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(BoxId(5).to_string(), "BoxId(5)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Position;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn within_is_strict() {
        let a = Position::new(0.0, 0.0);
        assert!(a.within(Position::new(0.05, 0.0), 0.1));
        assert!(!a.within(Position::new(0.1, 0.0), 0.1));
    }

    #[test]
    fn step_towards_moves_partially() {
        let p = Position::new(0.0, 0.0).step_towards(Position::new(10.0, 0.0), 2.5);
        assert_eq!(p, Position::new(2.5, 0.0));
    }

    #[test]
    fn step_towards_snaps_without_overshoot() {
        let target = Position::new(1.0, 1.0);
        let p = Position::new(0.9, 1.0).step_towards(target, 5.0);
        assert_eq!(p, target);
    }
}

#[cfg(test)]
mod kind {
    use crate::NodeKind;

    #[test]
    fn parses_short_and_area_labels() {
        assert_eq!("pickup".parse::<NodeKind>().unwrap(), NodeKind::Pickup);
        assert_eq!("StorageArea".parse::<NodeKind>().unwrap(), NodeKind::Storage);
        assert_eq!(" Share ".parse::<NodeKind>().unwrap(), NodeKind::Share);
        assert!("dock".parse::<NodeKind>().is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(NodeKind::Share.to_string(), "share");
        assert_eq!(NodeKind::Pickup.area_label(), "PickupArea");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).since(Tick(7)), 0);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(20);
        for _ in 0..50 {
            clock.advance();
        }
        assert_eq!(clock.elapsed_ms(), 1000);
        assert_eq!(clock.to_string(), "T50 (1.000 s)");
    }

    #[test]
    fn ticks_for_ms_rounds_up() {
        let clock = SimClock::new(20);
        assert_eq!(clock.ticks_for_ms(500), 25);
        assert_eq!(clock.ticks_for_ms(21), 2);
    }

    #[test]
    fn default_config_step_distance() {
        let cfg = SimConfig::default();
        assert!((cfg.step_distance() - 0.08).abs() < 1e-6);
        assert!(cfg.step_distance() < cfg.arrival_tolerance * 2.0);
        assert_eq!(cfg.end_tick(), Tick(cfg.total_ticks));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let mut a: Vec<u32> = (0..16).collect();
        let mut b = a.clone();
        SimRng::new(7).shuffle(&mut a);
        SimRng::new(7).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SimRng::new(1);
        for _ in 0..100 {
            let v: u32 = rng.gen_range(0..4);
            assert!(v < 4);
        }
    }
}
