//! `wh-core` — foundational types for the rail warehouse coordinator.
//!
//! This crate is a dependency of every other `wh-*` crate.  It has no `wh-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`ids`]     | `RobotId`, `RailId`, `NodeId`, `BoxId`, `JunctionId`     |
//! | [`geo`]     | `Position` (floor-plan coordinates, metres)              |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                          |
//! | [`rng`]     | `SimRng` (seeded, for contention ordering)               |
//! | [`kind`]    | `NodeKind` enum (`Pickup`, `Storage`, `Share`)           |
//! | [`error`]   | `WhError`, `WhResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{WhError, WhResult};
pub use geo::Position;
pub use ids::{BoxId, JunctionId, NodeId, RailId, RobotId};
pub use kind::NodeKind;
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
