//! Plain data row types written by output backends.

/// One robot's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotSnapshotRow {
    pub robot_id: u32,
    pub tick:     u64,
    pub x:        f32,
    pub y:        f32,
    /// Drive phase: `idle`, `moving`, or `blocked`.
    pub phase:    &'static str,
    /// Control-loop state, e.g. `to_pickup`.
    pub task:     &'static str,
    /// Box on board; `u32::MAX` when empty-handed.
    pub carrying: u32,
    pub odometer: f32,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:         u64,
    pub elapsed_ms:   u64,
    pub commands:     u64,
    pub moving:       u64,
    pub blocked:      u64,
    pub arrivals:     u64,
    pub events:       u64,
    pub jobs_pending: u64,
}

/// One outbound warehouse event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub tick:   u64,
    pub kind:   &'static str,
    /// Compact tag, e.g. `Box3StoredAt5`.
    pub tag:    String,
    /// `u32::MAX` for events not about a box.
    pub box_id: u32,
}
