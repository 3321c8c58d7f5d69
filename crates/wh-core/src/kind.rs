//! Node kinds.

use std::str::FromStr;

use crate::WhError;

/// What a node (area) is used for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeKind {
    /// Where boxes enter and leave the warehouse.  At most one per rail.
    Pickup,
    /// Long-term box storage.
    Storage,
    /// Hand-off point reachable from two or more rails.
    Share,
}

impl NodeKind {
    /// Short lowercase label, used in layout files and CSV output.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Pickup  => "pickup",
            NodeKind::Storage => "storage",
            NodeKind::Share   => "share",
        }
    }

    /// Label used in the human-readable audit log.
    pub fn area_label(self) -> &'static str {
        match self {
            NodeKind::Pickup  => "PickupArea",
            NodeKind::Storage => "StorageArea",
            NodeKind::Share   => "ShareArea",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = WhError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pickup" | "pickuparea"   => Ok(NodeKind::Pickup),
            "storage" | "storagearea" => Ok(NodeKind::Storage),
            "share" | "sharearea"     => Ok(NodeKind::Share),
            other => Err(WhError::Config(format!(
                "unknown node kind {other:?}: expected \"pickup\", \"storage\", or \"share\""
            ))),
        }
    }
}
