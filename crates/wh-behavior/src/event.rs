//! Outbound warehouse events.
//!
//! Each event carries the compact tag the content-delivery side keys on
//! (`Box3StoredAt5`, `AllBackHome`).  Node numbers in events are per-kind
//! indices, the same numbers external commands use.

use wh_core::{BoxId, Tick};

/// Something the outside world should hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum WarehouseEvent {
    /// A box appeared at pickup node `pickup`.
    BoxCreated { box_id: BoxId, pickup: u32 },
    /// A box arriving from a pickup or share node was stored at storage `to`.
    BoxStored { box_id: BoxId, from: u32, to: u32 },
    /// A box reached pickup node `to`.
    BoxRetrieved { box_id: BoxId, from: u32, to: u32 },
    /// A box went from one storage node to storage `to`.
    BoxMoved { box_id: BoxId, from: u32, to: u32 },
    /// Every robot is parked at home.
    AllArrived,
}

impl WarehouseEvent {
    /// Compact identifier, e.g. `Box3StoredAt5`.
    pub fn tag(&self) -> String {
        match self {
            WarehouseEvent::BoxCreated { box_id, .. }      => format!("Box{}Created", box_id.0),
            WarehouseEvent::BoxStored { box_id, to, .. }    => format!("Box{}StoredAt{}", box_id.0, to),
            WarehouseEvent::BoxRetrieved { box_id, to, .. } => format!("Box{}RetrievedAt{}", box_id.0, to),
            WarehouseEvent::BoxMoved { box_id, to, .. }     => format!("Box{}MovedTo{}", box_id.0, to),
            WarehouseEvent::AllArrived                      => "AllBackHome".to_string(),
        }
    }

    /// Variant name, used as the `kind` column in event output.
    pub fn kind(&self) -> &'static str {
        match self {
            WarehouseEvent::BoxCreated { .. }   => "box_created",
            WarehouseEvent::BoxStored { .. }    => "box_stored",
            WarehouseEvent::BoxRetrieved { .. } => "box_retrieved",
            WarehouseEvent::BoxMoved { .. }     => "box_moved",
            WarehouseEvent::AllArrived          => "all_arrived",
        }
    }

    /// The box involved, if any.
    pub fn box_id(&self) -> Option<BoxId> {
        match *self {
            WarehouseEvent::BoxCreated { box_id, .. }
            | WarehouseEvent::BoxStored { box_id, .. }
            | WarehouseEvent::BoxRetrieved { box_id, .. }
            | WarehouseEvent::BoxMoved { box_id, .. } => Some(box_id),
            WarehouseEvent::AllArrived => None,
        }
    }
}

// ── EventSink ─────────────────────────────────────────────────────────────────

/// Receiver for outbound events.
pub trait EventSink: Send {
    fn emit(&mut self, tick: Tick, event: &WarehouseEvent);
}

/// An [`EventSink`] that keeps every event in emission order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<(Tick, WarehouseEvent)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags of all recorded events, oldest first.
    pub fn tags(&self) -> Vec<String> {
        self.events.iter().map(|(_, e)| e.tag()).collect()
    }

    pub fn count(&self, pred: impl Fn(&WarehouseEvent) -> bool) -> usize {
        self.events.iter().filter(|(_, e)| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, tick: Tick, event: &WarehouseEvent) {
        self.events.push((tick, event.clone()));
    }
}
