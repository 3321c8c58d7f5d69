//! `wh-sim` — warehouse manager, robot control loops, and tick loop.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Commands  — release commands due this tick; stage each as the
//!                 manager's pending request and serve it (create/deliver/
//!                 retrieve/move, or arm the home barrier), then dispatch
//!                 the box's node to a robot.
//!   ② Robots    — poll every robot's control loop in seeded-shuffled order:
//!                 pull jobs, pick up, route, store, go home.
//!   ③ Mobility  — step every moving robot (same order); junction claims,
//!                 blocks, releases, arrivals.
//!   ④ Barrier   — once all robots are home, fire AllArrived for every
//!                 armed barrier past its settle delay.
//!   ⑤ Events    — drain the manager's outbox to the EventSink and observer.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_behavior::{BeliefBase, RecordingSink};
//! use wh_layout::load_layout_toml;
//! use wh_sim::{NoopObserver, SimBuilder};
//!
//! let loaded = load_layout_toml(path)?;
//! let mut sim = SimBuilder::new(loaded.sim, loaded.layout, BeliefBase::new(), RecordingSink::new())
//!     .build()?;
//! sim.submit_batch("Deliver_Box 0,3\nJob_Completed")?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod boxes;
pub mod builder;
pub mod error;
pub mod manager;
pub mod observer;
pub mod robot;
pub mod sim;


pub use boxes::{BoxLocation, BoxRegistry, BoxState};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use manager::{HomeBarrier, Served, WarehouseManager};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use robot::{RobotAgent, RobotTask};
pub use sim::Sim;
