//! The `Sim` struct and its tick loop.

use tracing::{debug, error, warn};

use wh_behavior::{AgentRef, Desire, EventSink, Reasoner};
use wh_core::{RobotId, SimClock, SimConfig, SimRng, Tick};
use wh_layout::{BridgeRouter, FirstBridgeRouter};
use wh_mobility::{MobilityEngine, MotionPhase};
use wh_schedule::{Command, DueQueue, parse_batch};

use crate::{RobotAgent, RobotTask, Served, SimObserver, SimResult, TickStats, WarehouseManager};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<R, E, B>` holds all warehouse state and drives the five-phase tick
/// loop:
///
/// 1. **Commands**: release commands due this tick; stage and serve each.
/// 2. **Robots**: poll every robot's control loop, in an order reshuffled
///    from the seeded RNG each tick.
/// 3. **Mobility**: step every robot in the same order.  Earlier robots win
///    contested junctions.
/// 4. **Barrier**: check the armed all-robots-home barriers.
/// 5. **Events**: forward the manager's events to the sink and observer.
///
/// Errors inside phases 1 and 2 are logged and the offending command or
/// robot step is abandoned; the run continues.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Reasoner, E: EventSink, B: BridgeRouter = FirstBridgeRouter> {
    pub config: SimConfig,

    pub clock: SimClock,

    /// Boxes, job queues, the layout, and the home barriers.
    pub manager: WarehouseManager<B>,

    /// One control loop per robot, indexed by `RobotId`.
    pub robots: Vec<RobotAgent>,

    pub mobility: MobilityEngine,

    /// Receives belief/desire notifications.
    pub reasoner: R,

    /// Receives outbound warehouse events.
    pub sink: E,

    pub(crate) commands: DueQueue<Command>,
    pub(crate) rng:      SimRng,
    pub(crate) order:    Vec<RobotId>,
}

impl<R: Reasoner, E: EventSink, B: BridgeRouter> Sim<R, E, B> {
    // ── Command intake ────────────────────────────────────────────────────

    /// Parse a command batch and queue it, one command every
    /// `command_spacing_ticks`, after anything already queued.
    ///
    /// The audit log is cleared first.  A syntax error rejects the whole
    /// batch; nothing is queued.  Returns the number of commands queued.
    pub fn submit_batch(&mut self, text: &str) -> SimResult<usize> {
        self.manager.reset_audit();
        let commands = parse_batch(text).inspect_err(|e| {
            warn!(error = %e, "command batch rejected");
        })?;
        Ok(self.submit_commands(commands))
    }

    /// Queue already-parsed commands with the same pacing as
    /// [`submit_batch`](Self::submit_batch).
    pub fn submit_commands(&mut self, commands: impl IntoIterator<Item = Command>) -> usize {
        let spacing = self.config.command_spacing_ticks;
        let now = self.clock.current_tick;
        let mut due = match self.commands.last_tick() {
            Some(last) => (last + spacing).max(now),
            None       => now,
        };
        let mut queued = 0;
        for cmd in commands {
            self.commands.push(due, cmd);
            due = due + spacing;
            queued += 1;
        }
        queued
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Run until nothing is left to do, or `max_ticks` have passed.
    ///
    /// Returns `true` if the warehouse went quiet.
    pub fn run_until_quiescent<O: SimObserver>(
        &mut self,
        max_ticks: u64,
        observer:  &mut O,
    ) -> SimResult<bool> {
        for _ in 0..max_ticks {
            if self.is_quiescent() {
                return Ok(true);
            }
            self.step(observer)?;
        }
        Ok(self.is_quiescent())
    }

    /// No commands queued or pending, no jobs, no armed barriers, and every
    /// robot idle, stopped, and no longer marked busy.
    pub fn is_quiescent(&self) -> bool {
        self.commands.is_empty()
            && !self.manager.has_pending()
            && self.manager.barriers().is_empty()
            && self.manager.jobs.total() == 0
            && self.robots.iter().all(|r| {
                r.task == RobotTask::Idle && !r.busy && !r.go_home && self.mobility.is_idle(r.id)
            })
    }

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let stats = self.process_tick(now, observer)?;
        observer.on_tick_end(now, &stats);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.robots, &self.mobility.store);
        }
        self.clock.advance();
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<TickStats> {
        let mut stats = TickStats::default();

        // ── Phase 1: commands ─────────────────────────────────────────────
        for cmd in self.commands.drain_due(now) {
            stats.commands += 1;
            self.manager.stage(cmd, &mut self.reasoner);
            match self.manager.serve_pending(now, &mut self.reasoner) {
                Ok(Served::BackHome) => {
                    for robot in &mut self.robots {
                        robot.go_home = true;
                    }
                }
                Ok(Served::Dispatched { node, jobs }) => {
                    debug!(%cmd, %node, jobs, "command served");
                }
                Ok(Served::Nothing) => {}
                Err(e) => error!(tick = now.0, %cmd, error = %e, "command failed"),
            }
        }

        // ── Phase 2: robot control loops ──────────────────────────────────
        //
        // Reshuffled each tick so no robot is always first to a free
        // junction.
        self.rng.shuffle(&mut self.order);
        for &id in &self.order {
            let robot = &mut self.robots[id.index()];
            if let Err(e) = robot.poll(&mut self.manager, &mut self.mobility, &mut self.reasoner, now) {
                error!(tick = now.0, robot = %id, task = robot.task.as_str(), error = %e, "robot step failed");
                robot.abort();
            }
        }

        // ── Phase 3: mobility ─────────────────────────────────────────────
        let report = self.mobility.step(&self.order, &self.manager.layout)?;
        stats.arrivals = report.arrivals.len();
        for event in &report.junctions {
            observer.on_junction(now, event);
        }

        // ── Phase 4: home barrier ─────────────────────────────────────────
        //
        // Robots keep heading home until the last armed barrier has fired.
        let fired = self.manager.poll_home_barrier(now, &self.mobility.store);
        if fired > 0 && self.manager.barriers().is_empty() {
            for robot in &mut self.robots {
                robot.go_home = false;
                self.reasoner.del_desire(AgentRef::Robot(robot.id), Desire::GoHome);
            }
        }

        // ── Phase 5: events ───────────────────────────────────────────────
        for event in self.manager.drain_events() {
            self.sink.emit(now, &event);
            observer.on_event(now, &event);
            stats.events += 1;
        }

        for state in &self.mobility.store.states {
            match state.phase {
                MotionPhase::Moving     => stats.moving += 1,
                MotionPhase::Blocked(_) => stats.blocked += 1,
                MotionPhase::Idle       => {}
            }
        }
        stats.jobs_pending = self.manager.jobs.total();
        Ok(stats)
    }
}
