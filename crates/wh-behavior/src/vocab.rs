//! Belief and desire vocabulary.

use std::fmt;

use wh_core::{NodeKind, RobotId};

/// Whose mind a belief or desire belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum AgentRef {
    /// The warehouse manager (command intake).
    Manager,
    Robot(RobotId),
}

impl fmt::Display for AgentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentRef::Manager   => f.write_str("manager"),
            AgentRef::Robot(id) => write!(f, "{id}"),
        }
    }
}

/// Facts the coordinator asserts about an agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Belief {
    /// The robot is working through its job queue.
    IsBusy,
    BoxAtPickupArea,
    BoxAtShareArea,
    BoxAtStorageArea,
}

impl Belief {
    /// The "box waiting at a … area" belief for a node of `kind`.
    pub fn box_at(kind: NodeKind) -> Belief {
        match kind {
            NodeKind::Pickup  => Belief::BoxAtPickupArea,
            NodeKind::Share   => Belief::BoxAtShareArea,
            NodeKind::Storage => Belief::BoxAtStorageArea,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Belief::IsBusy           => "is_busy",
            Belief::BoxAtPickupArea  => "box_at_pickup_area",
            Belief::BoxAtShareArea   => "box_at_share_area",
            Belief::BoxAtStorageArea => "box_at_storage_area",
        }
    }
}

impl fmt::Display for Belief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Goals the coordinator raises on an agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Desire {
    PickUp,
    GoHome,
    CreateBox,
    DeliverBox,
    RetrieveBox,
    MoveBox,
    BackHome,
}

impl Desire {
    pub fn as_str(self) -> &'static str {
        match self {
            Desire::PickUp      => "pick_up",
            Desire::GoHome      => "go_home",
            Desire::CreateBox   => "create_box",
            Desire::DeliverBox  => "deliver_box",
            Desire::RetrieveBox => "retrieve_box",
            Desire::MoveBox     => "move_box",
            Desire::BackHome    => "back_home",
        }
    }
}

impl fmt::Display for Desire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
