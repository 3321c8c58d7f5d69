//! Share-node bridge search and the default first-match implementation.
//!
//! # Pluggability
//!
//! `wh-sim` asks for hand-off points through the [`BridgeRouter`] trait, so a
//! layout-aware strategy (shortest hop count, load balancing) can replace
//! [`FirstBridgeRouter`] without touching the scheduler.

use wh_core::{NodeId, NodeKind, RailId, RobotId};

use crate::{Layout, LayoutError, LayoutResult};

// ── Bridge ────────────────────────────────────────────────────────────────────

/// A hand-off point between the carrying rail and the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bridge {
    /// Share node on the carrying rail where the box will be dropped.
    pub share_node: NodeId,
    /// Rail whose robot collects the box from `share_node`.
    pub next_rail:  RailId,
    /// Robot on `next_rail`.
    pub next_robot: RobotId,
    /// `true` if `next_rail` serves the box's destination directly.
    pub direct:     bool,
}

// ── BridgeRouter trait ────────────────────────────────────────────────────────

/// Pluggable hand-off search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can be shared by
/// several simulations.
pub trait BridgeRouter: Send + Sync {
    /// Pick a Share node on `from` through which a box bound for
    /// `destination` should leave the rail.
    ///
    /// The returned `share_node` is always served by `from`.
    fn find_bridge(
        &self,
        layout: &Layout,
        from: RailId,
        destination: NodeId,
    ) -> LayoutResult<Bridge>;
}

// ── FirstBridgeRouter ─────────────────────────────────────────────────────────

/// Two-phase first-match search.
///
/// 1. **Direct**: walk the Share nodes of `from` in coverage order; for each,
///    the first rail (declaration order, excluding `from`) that covers both
///    the Share node and `destination` wins.
/// 2. **Indirect**: otherwise, the first rail (declaration order) sharing any
///    Share node with `from`, taking the first such node in `from`'s
///    coverage order.  The box then needs a further hand-off from there.
///
/// In a layout that builds successfully phase 2 always finds something,
/// because the rails are connected through Share nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstBridgeRouter;

impl BridgeRouter for FirstBridgeRouter {
    fn find_bridge(
        &self,
        layout: &Layout,
        from: RailId,
        destination: NodeId,
    ) -> LayoutResult<Bridge> {
        let candidates: Vec<RailId> = layout
            .rails_serving(destination)
            .filter(|&r| r != from)
            .collect();

        for dock in layout.rail(from).docks() {
            if layout.node(dock.node).kind != NodeKind::Share {
                continue;
            }
            if let Some(&next) = candidates.iter().find(|&&r| layout.serves_node(r, dock.node)) {
                return Ok(Bridge {
                    share_node: dock.node,
                    next_rail:  next,
                    next_robot: layout.rail(next).robot,
                    direct:     true,
                });
            }
        }

        layout
            .rails()
            .iter()
            .filter(|r| r.id != from)
            .find_map(|r| {
                layout.shared_dock(from, r.id).map(|dock| Bridge {
                    share_node: dock.node,
                    next_rail:  r.id,
                    next_robot: r.robot,
                    direct:     false,
                })
            })
            .ok_or(LayoutError::NoBridge { rail: from, destination })
    }
}
