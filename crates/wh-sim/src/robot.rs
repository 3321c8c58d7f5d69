//! Per-robot control loop.
//!
//! Each robot is a small state machine polled once per tick, before the
//! mobility step:
//!
//! ```text
//! Idle ──job──▶ ToPickup ──arrived──▶ AwaitBox ──box──▶ ToStore ──arrived──▶ Idle
//!   └──go_home──▶ Homing ──arrived──▶ Idle
//! ```
//!
//! Every wait (travel, box not there yet) is a state that reports "not yet"
//! and is polled again next tick.

use tracing::debug;

use wh_behavior::{AgentRef, Belief, Desire, Reasoner};
use wh_core::{BoxId, NodeId, Position, RailId, RobotId, Tick};
use wh_layout::{BridgeRouter, Rail};
use wh_mobility::MobilityEngine;

use crate::{SimResult, WarehouseManager};

/// What a robot is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotTask {
    Idle,
    /// Driving to the dock of `node` to collect a box.
    ToPickup { node: NodeId },
    /// Parked at `node`'s dock until a box names this robot.
    AwaitBox { node: NodeId },
    /// Carrying `box_id` to `node`.
    ToStore { node: NodeId, box_id: BoxId },
    Homing,
}

impl RobotTask {
    pub fn as_str(self) -> &'static str {
        match self {
            RobotTask::Idle            => "idle",
            RobotTask::ToPickup { .. } => "to_pickup",
            RobotTask::AwaitBox { .. } => "await_box",
            RobotTask::ToStore { .. }  => "to_store",
            RobotTask::Homing          => "homing",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RobotAgent {
    pub id:   RobotId,
    pub rail: RailId,
    pub home: Position,
    pub task: RobotTask,
    /// The reasoner currently holds `is_busy` for this robot.
    pub busy: bool,
    /// A back-home request is outstanding.  Holds until the home barrier
    /// fires, so a robot pulled into a hand-off after reaching home heads
    /// back again once idle.
    pub go_home: bool,
}

impl RobotAgent {
    pub fn new(rail: &Rail) -> Self {
        Self {
            id:      rail.robot,
            rail:    rail.id,
            home:    rail.home,
            task:    RobotTask::Idle,
            busy:    false,
            go_home: false,
        }
    }

    /// The box on board, if any.
    pub fn carrying(&self) -> Option<BoxId> {
        match self.task {
            RobotTask::ToStore { box_id, .. } => Some(box_id),
            _ => None,
        }
    }

    /// Advance the control loop by one tick.
    pub fn poll<B: BridgeRouter, R: Reasoner>(
        &mut self,
        manager:  &mut WarehouseManager<B>,
        mobility: &mut MobilityEngine,
        reasoner: &mut R,
        now:      Tick,
    ) -> SimResult<()> {
        let agent = AgentRef::Robot(self.id);
        match self.task {
            RobotTask::Idle => {
                if !manager.is_done(self.id) {
                    let job = manager.get_next_job(self.id, reasoner)?;
                    reasoner.add_belief(agent, Belief::IsBusy);
                    self.busy = true;
                    mobility.goto(self.id, job.dock, now)?;
                    self.task = RobotTask::ToPickup { node: job.node };
                    return Ok(());
                }
                if self.busy {
                    reasoner.del_belief(agent, Belief::IsBusy);
                    self.busy = false;
                }
                if self.go_home && mobility.position(self.id) != self.home {
                    debug!(robot = %self.id, "heading home");
                    mobility.goto(self.id, self.home, now)?;
                    self.task = RobotTask::Homing;
                }
            }
            RobotTask::ToPickup { node } => {
                if mobility.is_idle(self.id) {
                    self.task = RobotTask::AwaitBox { node };
                    self.collect(node, manager, mobility, reasoner, now)?;
                }
            }
            RobotTask::AwaitBox { node } => {
                self.collect(node, manager, mobility, reasoner, now)?;
            }
            RobotTask::ToStore { node, box_id } => {
                if mobility.is_idle(self.id) {
                    self.task = RobotTask::Idle;
                    manager.store_box(self.id, box_id, node)?;
                }
            }
            RobotTask::Homing => {
                if mobility.is_idle(self.id) {
                    self.task = RobotTask::Idle;
                }
            }
        }
        Ok(())
    }

    /// Pick up the box waiting for this robot at `node` and set off with it.
    fn collect<B: BridgeRouter, R: Reasoner>(
        &mut self,
        node:     NodeId,
        manager:  &mut WarehouseManager<B>,
        mobility: &mut MobilityEngine,
        reasoner: &mut R,
        now:      Tick,
    ) -> SimResult<()> {
        let Some(box_id) = manager.pick_up(self.id, node) else {
            return Ok(());
        };
        let agent = AgentRef::Robot(self.id);
        reasoner.del_desire(agent, Desire::PickUp);
        reasoner.del_belief(agent, Belief::box_at(manager.layout.node(node).kind));

        let dock = manager.delivery_target(self.id, box_id).and_then(|target| {
            let dock = manager.layout.dock_position(self.rail, target)?;
            Ok((target, dock))
        });
        let (target, dock) = match dock {
            Ok(found) => found,
            Err(e) => {
                manager.put_back(self.id, box_id, node)?;
                self.task = RobotTask::Idle;
                return Err(e);
            }
        };
        mobility.goto(self.id, dock, now)?;
        self.task = RobotTask::ToStore { node: target, box_id };
        Ok(())
    }

    /// Drop back to `Idle` after a failed poll.  A carried box stays on
    /// board and is still delivered.
    pub fn abort(&mut self) {
        if !matches!(self.task, RobotTask::ToStore { .. }) {
            self.task = RobotTask::Idle;
        }
    }
}
