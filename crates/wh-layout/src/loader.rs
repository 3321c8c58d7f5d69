//! TOML layout loading.
//!
//! # File format
//!
//! ```toml
//! [sim]                       # optional; any SimConfig field, rest default
//! robot_speed = 4.0
//!
//! [[nodes]]                   # per-kind index = order among nodes of that kind
//! kind     = "pickup"
//! position = [0.0, 0.0]
//!
//! [[rails]]                   # rail i carries robot i
//! home  = [0.0, -1.0]
//! docks = [
//!     { kind = "pickup",  index = 0, at = [0.0, -0.5] },
//!     { kind = "storage", index = 0, at = [4.0, -0.5] },
//! ]
//!
//! [[junctions]]
//! position = [2.0, 0.0]
//! radius   = 0.5
//! ```
//!
//! Dock order within a rail is its coverage order.  Kinds accept either the
//! short form (`"share"`) or the area label (`"ShareArea"`).

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use wh_core::{NodeKind, Position, SimConfig};

use crate::{Layout, LayoutBuilder, LayoutError, LayoutResult};

/// A parsed layout together with the `[sim]` table (defaults if absent).
pub struct LoadedLayout {
    pub layout: Layout,
    pub sim:    SimConfig,
}

#[derive(Deserialize)]
struct LayoutFile {
    #[serde(default)]
    sim:       SimConfig,
    #[serde(default)]
    nodes:     Vec<NodeRow>,
    #[serde(default)]
    rails:     Vec<RailRow>,
    #[serde(default)]
    junctions: Vec<JunctionRow>,
}

#[derive(Deserialize)]
struct NodeRow {
    kind:     String,
    position: [f32; 2],
}

#[derive(Deserialize)]
struct RailRow {
    home:  [f32; 2],
    #[serde(default)]
    docks: Vec<DockRow>,
}

#[derive(Deserialize)]
struct DockRow {
    kind:  String,
    index: u32,
    at:    [f32; 2],
}

#[derive(Deserialize)]
struct JunctionRow {
    position: [f32; 2],
    radius:   f32,
}

/// Read and parse a layout file.
pub fn load_layout_toml(path: &Path) -> LayoutResult<LoadedLayout> {
    let text = std::fs::read_to_string(path)?;
    load_layout_str(&text)
}

/// Parse layout TOML from a string and validate it.
pub fn load_layout_str(text: &str) -> LayoutResult<LoadedLayout> {
    let file: LayoutFile =
        toml::from_str(text).map_err(|e| LayoutError::Parse(e.to_string()))?;

    let mut builder = LayoutBuilder::new();
    let mut ids = HashMap::new();
    let mut per_kind: HashMap<NodeKind, u32> = HashMap::new();

    for row in &file.nodes {
        let kind = parse_kind(&row.kind)?;
        let id = builder.add_node(kind, Position::from(row.position));
        let index = per_kind.entry(kind).or_insert(0);
        ids.insert((kind, *index), id);
        *index += 1;
    }

    for row in &file.rails {
        let rail = builder.add_rail(Position::from(row.home));
        for dock in &row.docks {
            let kind = parse_kind(&dock.kind)?;
            let node = *ids
                .get(&(kind, dock.index))
                .ok_or(LayoutError::UnknownNode { kind, index: dock.index })?;
            builder.add_dock(rail, node, Position::from(dock.at));
        }
    }

    for row in &file.junctions {
        builder.add_junction(Position::from(row.position), row.radius);
    }

    let layout = builder.build()?;
    Ok(LoadedLayout { layout, sim: file.sim })
}

fn parse_kind(s: &str) -> LayoutResult<NodeKind> {
    s.parse().map_err(|e: wh_core::WhError| LayoutError::Parse(e.to_string()))
}
