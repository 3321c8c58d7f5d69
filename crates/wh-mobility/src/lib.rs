//! `wh-mobility` — robot movement, arrival detection, and junction exclusion.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`state`]    | `MovementState`, `MotionPhase` — per-robot travel state          |
//! | [`store`]    | `MobilityStore` — `Vec<MovementState>` indexed by `RobotId`      |
//! | [`junction`] | `JunctionTable`, `Claim` — one optional occupant per junction    |
//! | [`engine`]   | `MobilityEngine` — `goto`, per-tick `step`, `StepReport`         |
//! | [`error`]    | `MobilityError`, `MobilityResult<T>`                             |
//!
//! # Movement model (straight-line stepping)
//!
//! Robots move in a straight line towards their target at a fixed distance
//! per tick (`SimConfig::step_distance`):
//!
//! 1. `MobilityEngine::goto` sets the target and marks the robot `Moving`.
//! 2. Every tick, `MobilityEngine::step` advances each moving robot.  Before
//!    a step that would cross into a junction zone the robot must claim it;
//!    if another robot holds it the robot becomes `Blocked` and stays put.
//! 3. Blocked robots re-try the claim on every later step and resume as soon
//!    as the junction is free.  Leaving a zone releases it.
//! 4. A robot within `arrival_tolerance` of its target becomes `Idle` and is
//!    reported in `StepReport::arrivals`.
//!
//! There is no queueing at junctions: whichever blocked robot is stepped
//! first after a release wins the claim.

pub mod engine;
pub mod error;
pub mod junction;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use engine::{JunctionEvent, MobilityEngine, StepReport};
pub use error::{MobilityError, MobilityResult};
pub use junction::{Claim, JunctionTable};
pub use state::{MotionPhase, MovementState};
pub use store::MobilityStore;
