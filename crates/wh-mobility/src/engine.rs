//! The mobility engine: goto requests, per-tick stepping, and junction
//! claims.

use wh_core::{JunctionId, Position, RobotId, SimConfig, Tick};
use wh_layout::Layout;

use crate::{Claim, JunctionTable, MobilityError, MobilityResult, MobilityStore, MotionPhase, MovementState};

// ── StepReport ────────────────────────────────────────────────────────────────

/// A junction state change during one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunctionEvent {
    Entered { robot: RobotId, junction: JunctionId },
    Exited { robot: RobotId, junction: JunctionId },
    /// `robot` stopped because `holder` occupies `junction`.
    Blocked { robot: RobotId, junction: JunctionId, holder: RobotId },
    /// A previously blocked robot got the junction and moves again.
    Resumed { robot: RobotId, junction: JunctionId },
}

/// What happened during one [`MobilityEngine::step`].
#[derive(Debug, Default, Clone)]
pub struct StepReport {
    /// Robots that reached their target this step, in step order.
    pub arrivals:  Vec<RobotId>,
    pub junctions: Vec<JunctionEvent>,
}

// ── MobilityEngine ────────────────────────────────────────────────────────────

/// Owns every robot's [`MovementState`] and the [`JunctionTable`].
pub struct MobilityEngine {
    pub store:     MobilityStore,
    pub junctions: JunctionTable,

    /// Distance a robot covers in one tick.
    step_distance:     f32,
    arrival_tolerance: f32,
}

impl MobilityEngine {
    pub fn new(robot_count: usize, junction_count: usize, config: &SimConfig) -> Self {
        Self {
            store:             MobilityStore::new(robot_count),
            junctions:         JunctionTable::new(junction_count),
            step_distance:     config.step_distance(),
            arrival_tolerance: config.arrival_tolerance,
        }
    }

    /// Teleport `robot` to `position` without moving (initial placement).
    ///
    /// A robot placed inside a junction zone holds that junction.  Placing
    /// it in a zone another robot holds fails.
    pub fn place(&mut self, robot: RobotId, position: Position, layout: &Layout) -> MobilityResult<()> {
        let previous = self.store.get(robot)?.zone;
        let zone = layout.junction_at(position);
        if let Some(junction) = zone {
            if let Claim::Held(holder) = self.junctions.try_claim(junction, robot)? {
                return Err(MobilityError::JunctionOccupied { robot, junction, holder });
            }
        }
        if let Some(previous) = previous.filter(|&p| Some(p) != zone) {
            self.junctions.release(previous, robot);
        }
        self.store.place(robot, position)?;
        self.store.get_mut(robot)?.zone = zone;
        Ok(())
    }

    /// Send `robot` towards `target`.  Replaces any previous target.
    pub fn goto(&mut self, robot: RobotId, target: Position, now: Tick) -> MobilityResult<()> {
        let state = self.store.get_mut(robot)?;
        state.target = target;
        state.departure_tick = now;
        state.phase = MotionPhase::Moving;
        Ok(())
    }

    #[inline]
    pub fn position(&self, robot: RobotId) -> Position {
        self.store.position(robot)
    }

    pub fn state(&self, robot: RobotId) -> MobilityResult<&MovementState> {
        self.store.get(robot)
    }

    /// `true` if `robot` is stopped with no pending target.
    pub fn is_idle(&self, robot: RobotId) -> bool {
        self.store.get(robot).is_ok_and(MovementState::is_idle)
    }

    /// Advance every robot in `order` by one tick.
    ///
    /// `order` decides who wins when several robots reach for the same free
    /// junction in one step: the earliest in `order` claims it, the others
    /// block.
    pub fn step(&mut self, order: &[RobotId], layout: &Layout) -> MobilityResult<StepReport> {
        let mut report = StepReport::default();
        for &robot in order {
            let state = self.store.get_mut(robot)?;
            step_one(
                robot,
                state,
                &mut self.junctions,
                layout,
                self.step_distance,
                self.arrival_tolerance,
                &mut report,
            )?;
        }
        Ok(report)
    }
}

fn step_one(
    robot:     RobotId,
    state:     &mut MovementState,
    junctions: &mut JunctionTable,
    layout:    &Layout,
    step:      f32,
    tolerance: f32,
    report:    &mut StepReport,
) -> MobilityResult<()> {
    let was_blocked = match state.phase {
        MotionPhase::Idle       => return Ok(()),
        MotionPhase::Moving     => false,
        MotionPhase::Blocked(_) => true,
    };

    let next = state.position.step_towards(state.target, step);
    let next_zone = layout.junction_at(next);

    if next_zone != state.zone {
        if let Some(junction) = next_zone {
            match junctions.try_claim(junction, robot)? {
                Claim::Held(holder) => {
                    if state.phase != MotionPhase::Blocked(junction) {
                        tracing::debug!(%robot, %junction, %holder, "junction busy, waiting");
                        state.phase = MotionPhase::Blocked(junction);
                        report.junctions.push(JunctionEvent::Blocked { robot, junction, holder });
                    }
                    return Ok(());
                }
                Claim::Granted => {
                    if was_blocked {
                        tracing::debug!(%robot, %junction, "junction free, resuming");
                        report.junctions.push(JunctionEvent::Resumed { robot, junction });
                    }
                    report.junctions.push(JunctionEvent::Entered { robot, junction });
                }
            }
        }
        if let Some(junction) = state.zone {
            junctions.release(junction, robot);
            report.junctions.push(JunctionEvent::Exited { robot, junction });
        }
        state.zone = next_zone;
    }

    state.phase = MotionPhase::Moving;
    state.odometer += state.position.distance(next);
    state.position = next;

    if state.position.within(state.target, tolerance) {
        state.phase = MotionPhase::Idle;
        report.arrivals.push(robot);
    }
    Ok(())
}
