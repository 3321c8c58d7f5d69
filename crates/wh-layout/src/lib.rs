//! `wh-layout` — warehouse topology: nodes, rails, junctions, and routing.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`node`]   | `Node` — an area with a kind and its live box set            |
//! | [`rail`]   | `Rail`, `Dock` — a robot lane and its node → dock coverage   |
//! | [`layout`] | `Layout` (rail map + junction R-tree), `LayoutBuilder`       |
//! | [`bridge`] | `BridgeRouter` trait, `Bridge`, `FirstBridgeRouter`          |
//! | [`loader`] | `load_layout_toml`, `load_layout_str`                        |
//! | [`error`]  | `LayoutError`, `LayoutResult<T>`                             |
//!
//! Everything here is static after [`LayoutBuilder::build`] except the
//! per-node box sets, which robots mutate when they pick up and store.

pub mod bridge;
pub mod error;
pub mod layout;
pub mod loader;
pub mod node;
pub mod rail;

#[cfg(test)]
mod tests;

pub use bridge::{Bridge, BridgeRouter, FirstBridgeRouter};
pub use error::{LayoutError, LayoutResult};
pub use layout::{JunctionSpec, Layout, LayoutBuilder};
pub use loader::{LoadedLayout, load_layout_str, load_layout_toml};
pub use node::Node;
pub use rail::{Dock, Rail};
