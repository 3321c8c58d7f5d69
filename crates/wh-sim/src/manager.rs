//! The warehouse manager: box lifecycle, robot assignment, cross-rail
//! routing, per-robot job queues, and the all-robots-home barrier.
//!
//! The manager is the single authority over box routing state.  Robots call
//! into it from their control loops ([`crate::RobotAgent::poll`]); commands
//! reach it through [`stage`](WarehouseManager::stage) and
//! [`serve_pending`](WarehouseManager::serve_pending).

use std::mem;

use tracing::{debug, info, warn};

use wh_behavior::{AgentRef, Belief, Desire, Reasoner, WarehouseEvent};
use wh_core::{BoxId, NodeId, NodeKind, RailId, RobotId, SimConfig, Tick};
use wh_layout::{BridgeRouter, Layout};
use wh_mobility::MobilityStore;
use wh_schedule::{Command, Job, JobBook, ScheduleError};

use crate::{BoxLocation, BoxRegistry, SimError, SimResult};

// ── Served / HomeBarrier ──────────────────────────────────────────────────────

/// Outcome of [`WarehouseManager::serve_pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Served {
    /// Nothing was pending, or the command needs no action.
    Nothing,
    /// A lifecycle op ran; `jobs` collection jobs were queued for `node`.
    Dispatched { node: NodeId, jobs: usize },
    /// The home barrier was armed.
    BackHome,
}

/// An armed all-robots-home barrier, one per back-home directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeBarrier {
    pub armed_at:   Tick,
    /// Positions are not checked before this tick.
    pub check_from: Tick,
}

/// The manager desire matching a command, if it raises one.
fn desire_for(cmd: &Command) -> Option<Desire> {
    match cmd {
        Command::CreateBox { .. }   => Some(Desire::CreateBox),
        Command::DeliverBox { .. }  => Some(Desire::DeliverBox),
        Command::RetrieveBox { .. } => Some(Desire::RetrieveBox),
        Command::MoveBox { .. }     => Some(Desire::MoveBox),
        Command::JobCompleted       => Some(Desire::BackHome),
        Command::Timeout            => None,
    }
}

// ── WarehouseManager ──────────────────────────────────────────────────────────

pub struct WarehouseManager<B: BridgeRouter> {
    /// Node box-sets live here, so the layout is owned and mutated by the
    /// manager.
    pub layout: Layout,
    pub boxes:  BoxRegistry,
    pub jobs:   JobBook,

    router:  B,
    pending: Option<Command>,
    audit:   Vec<String>,
    barriers: Vec<HomeBarrier>,
    outbox:  Vec<WarehouseEvent>,

    home_tolerance:    f32,
    home_settle_ticks: u64,
}

impl<B: BridgeRouter> WarehouseManager<B> {
    pub fn new(layout: Layout, router: B, config: &SimConfig) -> Self {
        let jobs = JobBook::new(layout.robot_count());
        Self {
            layout,
            boxes: BoxRegistry::new(),
            jobs,
            router,
            pending: None,
            audit: Vec::new(),
            barriers: Vec::new(),
            outbox: Vec::new(),
            home_tolerance:    config.home_tolerance,
            home_settle_ticks: config.home_settle_ticks,
        }
    }

    // ── Command intake ────────────────────────────────────────────────────

    /// Make `cmd` the pending request and raise the matching desire on the
    /// manager.  `Timeout` is accepted and dropped.
    pub fn stage<R: Reasoner>(&mut self, cmd: Command, reasoner: &mut R) {
        let Some(desire) = desire_for(&cmd) else {
            debug!(%cmd, "ignored");
            return;
        };
        if let Some(previous) = self.pending.replace(cmd) {
            warn!(%previous, %cmd, "pending request replaced before it was served");
        }
        reasoner.add_desire(AgentRef::Manager, desire);
    }

    /// Run the pending request, if any, and dispatch the node it touched.
    ///
    /// The request is cleared before it runs, so a failing request is not
    /// retried.
    pub fn serve_pending<R: Reasoner>(&mut self, now: Tick, reasoner: &mut R) -> SimResult<Served> {
        let Some(cmd) = self.pending.take() else {
            return Ok(Served::Nothing);
        };
        if let Some(desire) = desire_for(&cmd) {
            reasoner.del_desire(AgentRef::Manager, desire);
        }

        let node = match cmd {
            Command::CreateBox { pickup }       => self.create_box(pickup)?,
            Command::DeliverBox { from, to }    => self.deliver_box(from, to)?,
            Command::RetrieveBox { box_id, to } => self.retrieve_box(box_id, to)?,
            Command::MoveBox { box_id, to }     => self.move_box(box_id, to)?,
            Command::JobCompleted => {
                self.begin_back_home(now, reasoner);
                return Ok(Served::BackHome);
            }
            Command::Timeout => return Ok(Served::Nothing),
        };

        let jobs = self.dispatch_node(node)?;
        Ok(Served::Dispatched { node, jobs })
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    // ── Box lifecycle ─────────────────────────────────────────────────────

    /// A new box resting at pickup `pickup_index`, already at its
    /// destination.
    pub fn create_box(&mut self, pickup_index: u32) -> SimResult<NodeId> {
        let node = self.layout.require_node(NodeKind::Pickup, pickup_index)?;
        let box_id = self.boxes.create(node, node);
        self.layout.node_mut(node).insert_box(box_id);

        self.audit(format!("Box {} created at PickupArea {pickup_index}", box_id.0));
        self.outbox.push(WarehouseEvent::BoxCreated { box_id, pickup: pickup_index });
        Ok(node)
    }

    /// A new box at pickup `from_index` bound for storage `to_index`.
    pub fn deliver_box(&mut self, from_index: u32, to_index: u32) -> SimResult<NodeId> {
        let origin = self.layout.require_node(NodeKind::Pickup, from_index)?;
        let destination = self.layout.require_node(NodeKind::Storage, to_index)?;
        let box_id = self.boxes.create(origin, destination);
        self.layout.node_mut(origin).insert_box(box_id);

        self.audit_route(box_id, origin, destination);
        Ok(origin)
    }

    /// Send `box_id` to pickup `to_index`.
    pub fn retrieve_box(&mut self, box_id: BoxId, to_index: u32) -> SimResult<NodeId> {
        let destination = self.layout.require_node(NodeKind::Pickup, to_index)?;
        self.retarget(box_id, destination)
    }

    /// Send `box_id` to storage `to_index`.
    pub fn move_box(&mut self, box_id: BoxId, to_index: u32) -> SimResult<NodeId> {
        let destination = self.layout.require_node(NodeKind::Storage, to_index)?;
        self.retarget(box_id, destination)
    }

    /// Origin becomes the previous destination.  Returns the node the box
    /// rests at, or the previous destination while it is carried.
    fn retarget(&mut self, box_id: BoxId, destination: NodeId) -> SimResult<NodeId> {
        let b = self
            .boxes
            .get_mut(box_id)
            .map_err(|e| SimError::ProtocolInvariant(e.to_string()))?;
        let previous = b.destination;
        b.origin = previous;
        b.destination = destination;
        let at = b.node().unwrap_or(previous);

        self.audit_route(box_id, previous, destination);
        Ok(at)
    }

    fn audit_route(&mut self, box_id: BoxId, from: NodeId, to: NodeId) {
        let line = format!(
            "Box {} from {} to {}",
            box_id.0,
            self.layout.node(from).label(),
            self.layout.node(to).label(),
        );
        self.audit(line);
    }

    fn audit(&mut self, line: String) {
        info!(target: "wh_sim::audit", "{line}");
        self.audit.push(line);
    }

    /// Audit lines since the last [`reset_audit`](Self::reset_audit).
    pub fn audit_log(&self) -> &[String] {
        &self.audit
    }

    /// Cleared at the start of every command batch.
    pub fn reset_audit(&mut self) {
        self.audit.clear();
    }

    // ── Assignment and routing ────────────────────────────────────────────

    /// The robot that should collect `box_id` from `node`.
    ///
    /// Sets the box's `next_robot` except at Share nodes, where the hand-off
    /// already named it.
    pub fn get_appropriate_robot(&mut self, node: NodeId, box_id: BoxId) -> SimResult<RobotId> {
        let b = self.boxes.get(box_id)?;
        let layout = &self.layout;

        let robot = match layout.node(node).kind {
            NodeKind::Pickup => {
                let origin_index = layout.node(b.origin).index;
                layout
                    .rails()
                    .iter()
                    .find(|rail| {
                        rail.docks().iter().any(|d| {
                            let n = layout.node(d.node);
                            n.kind == NodeKind::Pickup && n.index == origin_index
                        })
                    })
                    .map(|rail| rail.robot)
            }
            NodeKind::Share => return b.next_robot.ok_or_else(|| {
                SimError::ProtocolInvariant(format!(
                    "box {} at {} has no next robot",
                    box_id.0,
                    layout.node(node).label(),
                ))
            }),
            NodeKind::Storage => {
                let serving: Vec<_> = layout.rails_serving(node).collect();
                serving
                    .iter()
                    .find(|&&rail| layout.serves_node(rail, b.destination))
                    .or(serving.last())
                    .map(|&rail| layout.rail(rail).robot)
            }
        };

        let Some(robot) = robot else {
            return Err(SimError::ProtocolInvariant(format!(
                "no robot can collect box {} from {}",
                box_id.0,
                layout.node(node).label(),
            )));
        };
        self.boxes.get_mut(box_id)?.next_robot = Some(robot);
        Ok(robot)
    }

    /// Share node on `robot`'s rail through which `box_id` leaves it.
    /// Records the hand-off on the box and names the collecting robot.
    pub fn find_share_area(&mut self, robot: RobotId, box_id: BoxId) -> SimResult<NodeId> {
        let rail = self.rail_id_of(robot)?;
        let destination = self.boxes.get(box_id)?.destination;
        let bridge = self
            .router
            .find_bridge(&self.layout, rail, destination)
            .map_err(|e| SimError::ProtocolInvariant(e.to_string()))?;

        debug!(
            %robot,
            box_id = box_id.0,
            share = %self.layout.node(bridge.share_node).label(),
            next = %bridge.next_robot,
            direct = bridge.direct,
            "hand-off chosen",
        );
        let b = self.boxes.get_mut(box_id)?;
        b.next_robot = Some(bridge.next_robot);
        b.share_node = Some(bridge.share_node);
        Ok(bridge.share_node)
    }

    /// Where `robot` should carry `box_id`: the destination when its rail
    /// serves it, otherwise a Share node.
    pub fn delivery_target(&mut self, robot: RobotId, box_id: BoxId) -> SimResult<NodeId> {
        let rail = self.rail_id_of(robot)?;
        let destination = self.boxes.get(box_id)?.destination;
        if self.layout.serves_node(rail, destination) {
            Ok(destination)
        } else {
            self.find_share_area(robot, box_id)
        }
    }

    fn rail_id_of(&self, robot: RobotId) -> SimResult<RailId> {
        self.layout
            .rail_of(robot)
            .map(|r| r.id)
            .ok_or_else(|| SimError::ProtocolInvariant(format!("{robot} has no rail")))
    }

    // ── Job queues ────────────────────────────────────────────────────────

    /// Queue a collection job at `node` for `robot`.
    pub fn enqueue_job(&mut self, node: NodeId, robot: RobotId) -> SimResult<()> {
        let rail = self.rail_id_of(robot)?;
        let dock = self.layout.dock_position(rail, node)?;
        self.jobs.enqueue(robot, Job { node, dock })?;
        Ok(())
    }

    #[inline]
    pub fn is_done(&self, robot: RobotId) -> bool {
        self.jobs.is_done(robot)
    }

    /// Pop `robot`'s next job and tell the reasoner it wants to pick up.
    pub fn get_next_job<R: Reasoner>(&mut self, robot: RobotId, reasoner: &mut R) -> SimResult<Job> {
        let job = match self.jobs.pop_next(robot) {
            Ok(job) => job,
            Err(ScheduleError::EmptyQueue(r)) => {
                return Err(SimError::ProtocolInvariant(format!("{r} asked for a job with none queued")));
            }
            Err(e) => return Err(e.into()),
        };
        let kind = self.layout.node(job.node).kind;
        reasoner.add_desire(AgentRef::Robot(robot), Desire::PickUp);
        reasoner.add_belief(AgentRef::Robot(robot), Belief::box_at(kind));
        Ok(job)
    }

    /// Queue a job for every box at `node` that is not yet at its
    /// destination and has nobody coming for it.  Returns the jobs queued.
    pub fn dispatch_node(&mut self, node: NodeId) -> SimResult<usize> {
        let waiting: Vec<BoxId> = self
            .layout
            .node(node)
            .boxes()
            .filter(|&id| {
                self.boxes
                    .get(id)
                    .is_ok_and(|b| b.destination != node && !b.job_outstanding)
            })
            .collect();

        for &box_id in &waiting {
            let robot = self.get_appropriate_robot(node, box_id)?;
            self.enqueue_job(node, robot)?;
            self.boxes.get_mut(box_id)?.job_outstanding = true;
            debug!(box_id = box_id.0, %robot, node = %self.layout.node(node).label(), "job queued");
        }
        Ok(waiting.len())
    }

    // ── Box hand-over ─────────────────────────────────────────────────────

    /// Take the box at `node` that is waiting for `robot`, if one is there.
    pub fn pick_up(&mut self, robot: RobotId, node: NodeId) -> Option<BoxId> {
        let box_id = self
            .layout
            .node(node)
            .boxes()
            .find(|&id| self.boxes.get(id).is_ok_and(|b| b.next_robot == Some(robot)))?;

        self.layout.node_mut(node).remove_box(box_id);
        if let Ok(b) = self.boxes.get_mut(box_id) {
            b.location = BoxLocation::Carried(robot);
            b.next_robot = None;
            b.share_node = None;
            b.job_outstanding = false;
        }
        debug!(%robot, box_id = box_id.0, node = %self.layout.node(node).label(), "picked up");
        Some(box_id)
    }

    /// Set a carried box down at `node`, report it, and dispatch the node if
    /// the box has further to go.  Returns the jobs queued.
    pub fn store_box(&mut self, robot: RobotId, box_id: BoxId, node: NodeId) -> SimResult<usize> {
        let b = self.boxes.get_mut(box_id)?;
        b.location = BoxLocation::AtNode(node);
        let destination = b.destination;
        self.layout.node_mut(node).insert_box(box_id);
        debug!(%robot, box_id = box_id.0, node = %self.layout.node(node).label(), "stored");

        if let Some(event) = self.stored_box(box_id, node)? {
            self.outbox.push(event);
        }
        if node == destination {
            Ok(0)
        } else {
            self.dispatch_node(node)
        }
    }

    /// Return a box a robot could not route to the node it came from.
    /// Nothing is queued for it again.
    pub fn put_back(&mut self, robot: RobotId, box_id: BoxId, node: NodeId) -> SimResult<()> {
        let b = self.boxes.get_mut(box_id)?;
        b.location = BoxLocation::AtNode(node);
        b.next_robot = None;
        b.share_node = None;
        b.job_outstanding = false;
        self.layout.node_mut(node).insert_box(box_id);
        warn!(%robot, box_id = box_id.0, node = %self.layout.node(node).label(), "box put back");
        Ok(())
    }

    /// The event a box landing at `node` produces.  Share nodes produce
    /// none.
    fn stored_box(&self, box_id: BoxId, node: NodeId) -> SimResult<Option<WarehouseEvent>> {
        let b = self.boxes.get(box_id)?;
        let origin = self.layout.node(b.origin);
        let from = origin.index;
        let to = self.layout.node(b.destination).index;

        Ok(match self.layout.node(node).kind {
            NodeKind::Storage if origin.kind == NodeKind::Storage => {
                Some(WarehouseEvent::BoxMoved { box_id, from, to })
            }
            NodeKind::Storage => Some(WarehouseEvent::BoxStored { box_id, from, to }),
            NodeKind::Pickup  => Some(WarehouseEvent::BoxRetrieved { box_id, from, to }),
            NodeKind::Share   => None,
        })
    }

    // ── Home barrier ──────────────────────────────────────────────────────

    /// Send every robot home and arm a barrier for this directive.  Earlier
    /// barriers stay armed; each one fires on its own.
    pub fn begin_back_home<R: Reasoner>(&mut self, now: Tick, reasoner: &mut R) {
        for rail in self.layout.rails() {
            let agent = AgentRef::Robot(rail.robot);
            reasoner.del_belief(agent, Belief::IsBusy);
            reasoner.add_desire(agent, Desire::GoHome);
        }
        self.barriers.push(HomeBarrier {
            armed_at:   now,
            check_from: now + self.home_settle_ticks,
        });
        info!(tick = now.0, armed = self.barriers.len(), "all robots sent home");
    }

    /// Check the armed barriers.  Once every robot is within
    /// `home_tolerance` of home, each barrier past its settle delay fires
    /// `AllArrived` and disarms.  Returns how many fired.
    pub fn poll_home_barrier(&mut self, now: Tick, mobility: &MobilityStore) -> usize {
        if !self.barriers.iter().any(|b| now >= b.check_from) {
            return 0;
        }
        let all_home = self.layout.rails().iter().all(|rail| {
            mobility
                .get(rail.robot)
                .is_ok_and(|s| s.position.distance(rail.home) <= self.home_tolerance)
        });
        if !all_home {
            return 0;
        }

        let before = self.barriers.len();
        self.barriers.retain(|barrier| {
            if now < barrier.check_from {
                return true;
            }
            info!(tick = now.0, waited = now.since(barrier.armed_at), "all robots back home");
            self.outbox.push(WarehouseEvent::AllArrived);
            false
        });
        before - self.barriers.len()
    }

    /// Armed barriers, oldest first.
    pub fn barriers(&self) -> &[HomeBarrier] {
        &self.barriers
    }

    // ── Events ────────────────────────────────────────────────────────────

    /// Take every event raised since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<WarehouseEvent> {
        mem::take(&mut self.outbox)
    }
}
