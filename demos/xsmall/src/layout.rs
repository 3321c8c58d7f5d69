//! The xsmall warehouse floor.
//!
//! Three parallel rails chained by two share nodes, one pickup and one
//! storage area per rail, and a junction where the lanes of rails 0 and 1
//! pass close to each other.
//!
//! ```text
//!   rail 0 (y=0): home  P0  S0  H0
//!   rail 1 (y=2): home  P1  H0  S1  H1
//!   rail 2 (y=4): home  P2  H1  S2
//! ```

use wh_layout::{LoadedLayout, LayoutResult, load_layout_str};

pub const LAYOUT_TOML: &str = r#"
[sim]
tick_duration_ms      = 20
total_ticks           = 6000
seed                  = 42
output_interval_ticks = 25
robot_speed           = 4.0
command_spacing_ticks = 25
home_settle_ticks     = 100

[[nodes]]
kind = "pickup"
position = [0.0, -0.5]

[[nodes]]
kind = "pickup"
position = [0.0, 2.5]

[[nodes]]
kind = "pickup"
position = [0.0, 4.5]

[[nodes]]
kind = "storage"
position = [3.0, -0.5]

[[nodes]]
kind = "storage"
position = [7.0, 2.5]

[[nodes]]
kind = "storage"
position = [11.0, 4.5]

[[nodes]]
kind = "share"
position = [5.0, 1.0]

[[nodes]]
kind = "share"
position = [9.0, 3.0]

[[rails]]
home = [-1.0, 0.0]
docks = [
    { kind = "pickup",  index = 0, at = [0.0, 0.0] },
    { kind = "storage", index = 0, at = [3.0, 0.0] },
    { kind = "share",   index = 0, at = [5.0, 0.0] },
]

[[rails]]
home = [-1.0, 2.0]
docks = [
    { kind = "pickup",  index = 1, at = [0.0, 2.0] },
    { kind = "share",   index = 0, at = [5.0, 2.0] },
    { kind = "storage", index = 1, at = [7.0, 2.0] },
    { kind = "share",   index = 1, at = [9.0, 2.0] },
]

[[rails]]
home = [-1.0, 4.0]
docks = [
    { kind = "pickup",  index = 2, at = [0.0, 4.0] },
    { kind = "share",   index = 1, at = [9.0, 4.0] },
    { kind = "storage", index = 2, at = [11.0, 4.0] },
]

[[junctions]]
position = [1.5, 1.0]
radius   = 1.2
"#;

/// Parse the embedded floor plan.
pub fn load() -> LayoutResult<LoadedLayout> {
    load_layout_str(LAYOUT_TOML)
}
