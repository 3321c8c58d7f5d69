//! Unit tests for wh-mobility.

use wh_core::{JunctionId, NodeKind, Position, RobotId, SimConfig};
use wh_layout::{Layout, LayoutBuilder};

use crate::MobilityEngine;

// ── Helpers ───────────────────────────────────────────────────────────────────

const A: RobotId = RobotId(0);
const B: RobotId = RobotId(1);
const J: JunctionId = JunctionId(0);

/// Two rails whose lanes cross at (5, 0); the junction zone has radius 1.
///
/// Rail 0 runs along y = 0, rail 1 along x = 5.
fn crossing_layout() -> Layout {
    let mut b = LayoutBuilder::new();
    let p0 = b.add_node(NodeKind::Pickup, Position::new(0.0, 1.0));
    let p1 = b.add_node(NodeKind::Pickup, Position::new(6.0, -5.0));
    let share = b.add_node(NodeKind::Share, Position::new(9.0, 9.0));

    let r0 = b.add_rail(Position::new(-1.0, 0.0));
    b.add_dock(r0, p0, Position::new(0.0, 0.0));
    b.add_dock(r0, share, Position::new(9.0, 0.0));

    let r1 = b.add_rail(Position::new(5.0, -6.0));
    b.add_dock(r1, p1, Position::new(5.0, -5.0));
    b.add_dock(r1, share, Position::new(5.0, 9.0));

    b.add_junction(Position::new(5.0, 0.0), 1.0);
    b.build().expect("crossing layout is valid")
}

/// One distance unit per tick.
fn unit_step_config() -> SimConfig {
    SimConfig { robot_speed: 50.0, tick_duration_ms: 20, ..SimConfig::default() }
}

fn engine() -> MobilityEngine {
    MobilityEngine::new(2, 1, &unit_step_config())
}

fn in_zone(engine: &MobilityEngine, robot: RobotId) -> bool {
    engine.position(robot).within(Position::new(5.0, 0.0), 1.0)
}

// ── MovementState ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement_state {
    use wh_core::Position;
    use crate::{MotionPhase, MovementState};

    #[test]
    fn stationary_is_idle() {
        let s = MovementState::stationary(Position::new(1.0, 2.0));
        assert!(s.is_idle());
        assert!(!s.is_blocked());
        assert_eq!(s.remaining(), 0.0);
        assert_eq!(s.zone, None);
    }

    #[test]
    fn phase_labels() {
        assert_eq!(MotionPhase::Idle.as_str(), "idle");
        assert_eq!(MotionPhase::Blocked(wh_core::JunctionId(0)).as_str(), "blocked");
    }
}

// ── JunctionTable ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod junction_table {
    use super::{A, B, J};
    use crate::{Claim, JunctionTable, MobilityError};

    #[test]
    fn claim_free_then_own() {
        let mut t = JunctionTable::new(1);
        assert_eq!(t.try_claim(J, A).unwrap(), Claim::Granted);
        assert_eq!(t.try_claim(J, A).unwrap(), Claim::Granted);
        assert_eq!(t.occupant(J), Some(A));
    }

    #[test]
    fn claim_held_by_other() {
        let mut t = JunctionTable::new(1);
        t.try_claim(J, A).unwrap();
        assert_eq!(t.try_claim(J, B).unwrap(), Claim::Held(A));
        assert_eq!(t.occupant(J), Some(A));
    }

    #[test]
    fn stale_release_is_noop() {
        let mut t = JunctionTable::new(1);
        t.try_claim(J, A).unwrap();
        assert!(!t.release(J, B));
        assert_eq!(t.occupant(J), Some(A));
        assert!(t.release(J, A));
        assert_eq!(t.occupant(J), None);
        assert!(!t.release(J, A));
        assert_eq!(t.held_count(), 0);
    }

    #[test]
    fn unknown_junction() {
        let mut t = JunctionTable::new(1);
        assert!(matches!(
            t.try_claim(wh_core::JunctionId(3), A),
            Err(MobilityError::JunctionNotFound(_))
        ));
        assert!(!t.release(wh_core::JunctionId(3), A));
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use wh_core::{Position, RobotId, Tick};
    use super::{A, B, J, crossing_layout, engine, in_zone};
    use crate::{JunctionEvent, MobilityError, MotionPhase};

    #[test]
    fn goto_then_arrive() {
        let layout = crossing_layout();
        let mut eng = engine();
        eng.place(A, Position::new(0.0, 0.0), &layout).unwrap();
        eng.goto(A, Position::new(3.0, 0.0), Tick(0)).unwrap();
        assert!(!eng.is_idle(A));

        assert!(eng.step(&[A, B], &layout).unwrap().arrivals.is_empty());
        assert!(eng.step(&[A, B], &layout).unwrap().arrivals.is_empty());
        let report = eng.step(&[A, B], &layout).unwrap();
        assert_eq!(report.arrivals, vec![A]);
        assert!(eng.is_idle(A));
        assert!(eng.position(A).within(Position::new(3.0, 0.0), 0.1));
        assert!((eng.state(A).unwrap().odometer - 3.0).abs() < 1e-4);
    }

    #[test]
    fn idle_robots_do_not_move() {
        let layout = crossing_layout();
        let mut eng = engine();
        eng.place(B, Position::new(5.0, -5.0), &layout).unwrap();
        let report = eng.step(&[A, B], &layout).unwrap();
        assert!(report.arrivals.is_empty());
        assert_eq!(eng.position(B), Position::new(5.0, -5.0));
    }

    #[test]
    fn goto_current_position_arrives_next_step() {
        let layout = crossing_layout();
        let mut eng = engine();
        eng.place(A, Position::new(2.0, 0.0), &layout).unwrap();
        eng.goto(A, Position::new(2.0, 0.0), Tick(0)).unwrap();
        assert_eq!(eng.step(&[A], &layout).unwrap().arrivals, vec![A]);
    }

    #[test]
    fn crossing_claims_and_releases() {
        let layout = crossing_layout();
        let mut eng = engine();
        eng.place(A, Position::new(3.5, 0.0), &layout).unwrap();
        eng.goto(A, Position::new(9.0, 0.0), Tick(0)).unwrap();

        let r1 = eng.step(&[A], &layout).unwrap();
        assert_eq!(r1.junctions, vec![JunctionEvent::Entered { robot: A, junction: J }]);
        assert_eq!(eng.junctions.occupant(J), Some(A));

        let r2 = eng.step(&[A], &layout).unwrap();
        assert!(r2.junctions.is_empty());

        let r3 = eng.step(&[A], &layout).unwrap();
        assert_eq!(r3.junctions, vec![JunctionEvent::Exited { robot: A, junction: J }]);
        assert_eq!(eng.junctions.occupant(J), None);
        assert_eq!(eng.state(A).unwrap().zone, None);
    }

    #[test]
    fn same_tick_contention_serializes() {
        let layout = crossing_layout();
        let mut eng = engine();
        eng.place(A, Position::new(3.5, 0.0), &layout).unwrap();
        eng.place(B, Position::new(5.0, -1.5), &layout).unwrap();
        eng.goto(A, Position::new(9.0, 0.0), Tick(0)).unwrap();
        eng.goto(B, Position::new(5.0, 9.0), Tick(0)).unwrap();

        let r1 = eng.step(&[A, B], &layout).unwrap();
        assert_eq!(eng.junctions.occupant(J), Some(A));
        assert_eq!(eng.state(B).unwrap().phase, MotionPhase::Blocked(J));
        assert!(r1.junctions.contains(&JunctionEvent::Blocked { robot: B, junction: J, holder: A }));
        assert_eq!(eng.position(B), Position::new(5.0, -1.5), "blocked robot must not move");

        let r2 = eng.step(&[A, B], &layout).unwrap();
        assert!(r2.junctions.is_empty(), "no repeated block event while waiting");
        assert_eq!(eng.position(B), Position::new(5.0, -1.5));

        let r3 = eng.step(&[A, B], &layout).unwrap();
        assert_eq!(
            r3.junctions,
            vec![
                JunctionEvent::Exited { robot: A, junction: J },
                JunctionEvent::Resumed { robot: B, junction: J },
                JunctionEvent::Entered { robot: B, junction: J },
            ]
        );
        assert_eq!(eng.junctions.occupant(J), Some(B));
        assert_eq!(eng.state(B).unwrap().phase, MotionPhase::Moving);
    }

    #[test]
    fn step_order_decides_winner() {
        let layout = crossing_layout();
        let mut eng = engine();
        eng.place(A, Position::new(3.5, 0.0), &layout).unwrap();
        eng.place(B, Position::new(5.0, -1.5), &layout).unwrap();
        eng.goto(A, Position::new(9.0, 0.0), Tick(0)).unwrap();
        eng.goto(B, Position::new(5.0, 9.0), Tick(0)).unwrap();

        eng.step(&[B, A], &layout).unwrap();
        assert_eq!(eng.junctions.occupant(J), Some(B));
        assert_eq!(eng.state(A).unwrap().phase, MotionPhase::Blocked(J));
    }

    #[test]
    fn never_two_robots_inside_zone() {
        let layout = crossing_layout();
        let mut eng = engine();
        eng.place(A, Position::new(0.0, 0.0), &layout).unwrap();
        eng.place(B, Position::new(5.0, -5.0), &layout).unwrap();
        eng.goto(A, Position::new(9.0, 0.0), Tick(0)).unwrap();
        eng.goto(B, Position::new(5.0, 9.0), Tick(0)).unwrap();

        for _ in 0..40 {
            eng.step(&[A, B], &layout).unwrap();
            assert!(!(in_zone(&eng, A) && in_zone(&eng, B)));
            assert!(eng.junctions.held_count() <= 1);
        }
        assert!(eng.is_idle(A));
        assert!(eng.is_idle(B));
        assert_eq!(eng.junctions.occupant(J), None);
    }

    #[test]
    fn placed_inside_zone_holds_junction() {
        let layout = crossing_layout();
        let mut eng = engine();
        eng.place(A, Position::new(4.5, 0.0), &layout).unwrap();
        assert_eq!(eng.junctions.occupant(J), Some(A));
        assert_eq!(eng.state(A).unwrap().zone, Some(J));

        assert!(matches!(
            eng.place(B, Position::new(5.0, -0.5), &layout),
            Err(MobilityError::JunctionOccupied { robot: B, junction: J, holder: A })
        ));

        eng.place(B, Position::new(5.0, -1.5), &layout).unwrap();
        eng.goto(B, Position::new(5.0, 9.0), Tick(0)).unwrap();
        eng.step(&[B], &layout).unwrap();
        assert_eq!(eng.state(B).unwrap().phase, MotionPhase::Blocked(J));
        assert_eq!(eng.position(B), Position::new(5.0, -1.5));

        eng.goto(A, Position::new(0.0, 0.0), Tick(1)).unwrap();
        let report = eng.step(&[A, B], &layout).unwrap();
        assert!(report.junctions.contains(&JunctionEvent::Exited { robot: A, junction: J }));
        assert!(report.junctions.contains(&JunctionEvent::Resumed { robot: B, junction: J }));
        assert_eq!(eng.junctions.occupant(J), Some(B));
    }

    #[test]
    fn re_placing_outside_zone_releases_it() {
        let layout = crossing_layout();
        let mut eng = engine();
        eng.place(A, Position::new(4.5, 0.0), &layout).unwrap();
        eng.place(A, Position::new(0.0, 0.0), &layout).unwrap();
        assert_eq!(eng.junctions.occupant(J), None);
        assert_eq!(eng.state(A).unwrap().zone, None);
    }

    #[test]
    fn unknown_robot() {
        let mut eng = engine();
        assert!(matches!(
            eng.goto(RobotId(9), Position::ORIGIN, Tick(0)),
            Err(MobilityError::RobotNotFound(RobotId(9)))
        ));
        assert!(!eng.is_idle(RobotId(9)));
    }
}
