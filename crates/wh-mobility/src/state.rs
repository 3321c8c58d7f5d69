//! Per-robot movement state.

use wh_core::{JunctionId, Position, Tick};

/// What a robot's drive is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    /// Stopped; no target.
    Idle,
    /// Travelling towards `target`.
    Moving,
    /// Waiting at the edge of a junction held by another robot.
    Blocked(JunctionId),
}

impl MotionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            MotionPhase::Idle       => "idle",
            MotionPhase::Moving     => "moving",
            MotionPhase::Blocked(_) => "blocked",
        }
    }
}

/// The movement state for a single robot.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementState {
    pub position: Position,

    /// Where the robot is heading.  Equals `position` after arrival.
    pub target: Position,

    pub phase: MotionPhase,

    /// Junction zone the robot currently holds, if any.
    pub zone: Option<JunctionId>,

    /// Tick at which the current leg began.
    pub departure_tick: Tick,

    /// Total distance driven since placement.
    pub odometer: f32,
}

impl MovementState {
    /// An idle robot parked at `position`.
    #[inline]
    pub fn stationary(position: Position) -> Self {
        Self {
            position,
            target:         position,
            phase:          MotionPhase::Idle,
            zone:           None,
            departure_tick: Tick::ZERO,
            odometer:       0.0,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.phase == MotionPhase::Idle
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        matches!(self.phase, MotionPhase::Blocked(_))
    }

    /// Straight-line distance still to go.
    pub fn remaining(&self) -> f32 {
        self.position.distance(self.target)
    }
}
