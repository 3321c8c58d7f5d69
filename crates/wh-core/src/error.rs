//! Shared error type.
//!
//! Sub-crates define their own error enums and either convert into `WhError`
//! or wrap it as one variant (`wh-sim` does the latter).

use thiserror::Error;

use crate::{BoxId, NodeId, RobotId};

/// The base error type for `wh-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum WhError {
    #[error("robot {0} not found")]
    RobotNotFound(RobotId),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("box {0} not found")]
    BoxNotFound(BoxId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `wh-*` crates.
pub type WhResult<T> = Result<T, WhError>;
