//! Layout error type.
//!
//! Every variant except `NotServed` and `NoBridge` is a configuration error
//! raised while building or loading a layout; a layout that builds is
//! guaranteed to be connected through Share nodes.

use thiserror::Error;

use wh_core::{NodeId, NodeKind, RailId};

/// Errors produced by `wh-layout`.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("rail {rail} does not serve node {node}")]
    NotServed { rail: RailId, node: NodeId },

    #[error("node {0} not found in layout")]
    NodeNotFound(NodeId),

    #[error("no {kind} node with index {index}")]
    UnknownNode { kind: NodeKind, index: u32 },

    #[error("layout has no rails")]
    NoRails,

    #[error("rail {0} does not have a pickup node")]
    NoPickup(RailId),

    #[error("rail {0} serves more than one pickup node")]
    MultiplePickups(RailId),

    #[error("rail {rail} declares node {node} twice")]
    DuplicateDock { rail: RailId, node: NodeId },

    #[error("node {0} is not served by any rail")]
    UnservedNode(NodeId),

    #[error("share node {0} is served by fewer than two rails")]
    ShareNotShared(NodeId),

    #[error("rail {rail} is not connected to rail {other} through share nodes")]
    Disconnected { rail: RailId, other: RailId },

    #[error("no share node links rail {rail} towards node {destination}")]
    NoBridge { rail: RailId, destination: NodeId },

    #[error("layout parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
