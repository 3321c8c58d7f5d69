//! Fluent builder for constructing a [`Sim`].

use wh_behavior::{EventSink, Reasoner};
use wh_core::{Position, SimConfig, SimRng};
use wh_layout::{BridgeRouter, FirstBridgeRouter, Layout};
use wh_mobility::MobilityEngine;
use wh_schedule::DueQueue;

use crate::{RobotAgent, Sim, SimError, SimResult, WarehouseManager};

/// Fluent builder for [`Sim<R, E, B>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, seed, speeds, tolerances, …
/// - [`Layout`] — from [`LayoutBuilder`][wh_layout::LayoutBuilder] or a TOML file
/// - `R: Reasoner` — receives belief/desire notifications
/// - `E: EventSink` — receives warehouse events
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                  |
/// |--------------------------|--------------------------|
/// | `.router(b)`             | [`FirstBridgeRouter`]    |
/// | `.initial_positions(v)`  | Every robot at its home  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, layout, BeliefBase::new(), RecordingSink::new())
///     .initial_positions(positions)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<R: Reasoner, E: EventSink, B: BridgeRouter = FirstBridgeRouter> {
    config:    SimConfig,
    layout:    Layout,
    reasoner:  R,
    sink:      E,
    router:    B,
    positions: Option<Vec<Position>>,
}

impl<R: Reasoner, E: EventSink> SimBuilder<R, E, FirstBridgeRouter> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, layout: Layout, reasoner: R, sink: E) -> Self {
        Self {
            config,
            layout,
            reasoner,
            sink,
            router:    FirstBridgeRouter,
            positions: None,
        }
    }
}

impl<R: Reasoner, E: EventSink, B: BridgeRouter> SimBuilder<R, E, B> {
    /// Replace the hand-off search.
    pub fn router<B2: BridgeRouter>(self, router: B2) -> SimBuilder<R, E, B2> {
        SimBuilder {
            config:    self.config,
            layout:    self.layout,
            reasoner:  self.reasoner,
            sink:      self.sink,
            router,
            positions: self.positions,
        }
    }

    /// Supply the starting position of each robot (length `robot_count`).
    pub fn initial_positions(mut self, positions: Vec<Position>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Validate inputs, place the robots, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<R, E, B>> {
        let cfg = &self.config;
        if cfg.tick_duration_ms == 0 {
            return Err(SimError::Config("tick_duration_ms must be positive".into()));
        }
        if !(cfg.robot_speed.is_finite() && cfg.robot_speed > 0.0) {
            return Err(SimError::Config(format!("robot_speed must be positive, got {}", cfg.robot_speed)));
        }
        if !(cfg.arrival_tolerance > 0.0) {
            return Err(SimError::Config("arrival_tolerance must be positive".into()));
        }
        if !(cfg.home_tolerance >= 0.0) {
            return Err(SimError::Config("home_tolerance must not be negative".into()));
        }

        let robot_count = self.layout.robot_count();
        let robots: Vec<RobotAgent> = self.layout.rails().iter().map(RobotAgent::new).collect();

        // ── Resolve starting positions ────────────────────────────────────
        let positions = match self.positions {
            Some(p) => {
                if p.len() != robot_count {
                    return Err(SimError::RobotCountMismatch {
                        expected: robot_count,
                        got:      p.len(),
                        what:     "initial positions",
                    });
                }
                p
            }
            None => robots.iter().map(|r| r.home).collect(),
        };

        // ── Build mobility engine and place robots ────────────────────────
        let mut mobility = MobilityEngine::new(robot_count, self.layout.junctions().len(), &self.config);
        for (robot, &pos) in robots.iter().zip(&positions) {
            mobility.place(robot.id, pos, &self.layout)?;
        }

        let order = robots.iter().map(|r| r.id).collect();
        let manager = WarehouseManager::new(self.layout, self.router, &self.config);

        Ok(Sim {
            clock:    self.config.make_clock(),
            rng:      SimRng::new(self.config.seed),
            config:   self.config,
            manager,
            robots,
            mobility,
            reasoner: self.reasoner,
            sink:     self.sink,
            commands: DueQueue::new(),
            order,
        })
    }
}
