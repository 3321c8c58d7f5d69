//! Box records.

use wh_core::{BoxId, NodeId, RobotId, WhError, WhResult};

/// Where a box physically is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxLocation {
    /// Resting at a node, listed in that node's box set.
    AtNode(NodeId),
    /// On a robot.
    Carried(RobotId),
}

/// One box and its routing state.
///
/// `origin` and `destination` are re-targeted by retrieve/move commands;
/// boxes are never destroyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxState {
    pub id:          BoxId,
    pub origin:      NodeId,
    pub destination: NodeId,
    pub location:    BoxLocation,
    /// The one robot expected to collect the box next.  Cleared when that
    /// robot picks it up.
    pub next_robot:  Option<RobotId>,
    /// Share node the box is being handed off through, while in hand-off.
    pub share_node:  Option<NodeId>,
    /// A collection job for this box is queued or underway.
    pub job_outstanding: bool,
}

impl BoxState {
    pub fn holder(&self) -> Option<RobotId> {
        match self.location {
            BoxLocation::Carried(r) => Some(r),
            BoxLocation::AtNode(_)  => None,
        }
    }

    /// The node the box rests at, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self.location {
            BoxLocation::AtNode(n)  => Some(n),
            BoxLocation::Carried(_) => None,
        }
    }

    /// `true` while the box sits at a node.
    #[inline]
    pub fn is_stored(&self) -> bool {
        matches!(self.location, BoxLocation::AtNode(_))
    }

    /// `true` once the box rests at its destination.
    pub fn is_delivered(&self) -> bool {
        self.location == BoxLocation::AtNode(self.destination)
    }
}

/// All boxes, indexed by `BoxId` in creation order.
#[derive(Debug, Default)]
pub struct BoxRegistry {
    boxes: Vec<BoxState>,
}

impl BoxRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new box resting at `origin`.
    pub fn create(&mut self, origin: NodeId, destination: NodeId) -> BoxId {
        let id = BoxId(self.boxes.len() as u32);
        self.boxes.push(BoxState {
            id,
            origin,
            destination,
            location:        BoxLocation::AtNode(origin),
            next_robot:      None,
            share_node:      None,
            job_outstanding: false,
        });
        id
    }

    pub fn get(&self, id: BoxId) -> WhResult<&BoxState> {
        self.boxes.get(id.index()).ok_or(WhError::BoxNotFound(id))
    }

    pub fn get_mut(&mut self, id: BoxId) -> WhResult<&mut BoxState> {
        self.boxes.get_mut(id.index()).ok_or(WhError::BoxNotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoxState> {
        self.boxes.iter()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
