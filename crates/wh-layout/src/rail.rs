//! Rails and their coverage.

use wh_core::{NodeId, Position, RailId, RobotId};

/// Where a robot must stop to service one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dock {
    pub node:     NodeId,
    pub position: Position,
}

/// A robot's fixed lane.
///
/// Coverage is kept in declaration order: every "first match" rule in
/// robot assignment and share-node search walks docks in this order.
#[derive(Debug, Clone)]
pub struct Rail {
    pub id:    RailId,
    /// The one robot bound to this rail.
    pub robot: RobotId,
    /// Where the robot parks between jobs.
    pub home:  Position,
    docks:     Vec<Dock>,
}

impl Rail {
    pub(crate) fn new(id: RailId, robot: RobotId, home: Position) -> Self {
        Self { id, robot, home, docks: Vec::new() }
    }

    pub(crate) fn push_dock(&mut self, dock: Dock) {
        self.docks.push(dock);
    }

    /// Covered nodes with their dock positions, in declaration order.
    pub fn docks(&self) -> &[Dock] {
        &self.docks
    }

    /// `true` if the robot on this rail can dock at `node`.
    #[inline]
    pub fn serves(&self, node: NodeId) -> bool {
        self.docks.iter().any(|d| d.node == node)
    }

    /// Dock position for `node`, or `None` if this rail does not serve it.
    pub fn dock_for(&self, node: NodeId) -> Option<Position> {
        self.docks.iter().find(|d| d.node == node).map(|d| d.position)
    }
}
