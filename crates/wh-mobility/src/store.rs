//! The `MobilityStore` — movement state for every robot.

use wh_core::{Position, RobotId};

use crate::{MobilityError, MobilityResult, MovementState};

/// Holds one [`MovementState`] per robot, indexed by `RobotId`.
///
/// Robots start parked at the origin until [`place`](Self::place)d.
pub struct MobilityStore {
    pub states: Vec<MovementState>,
}

impl MobilityStore {
    pub fn new(robot_count: usize) -> Self {
        Self { states: vec![MovementState::stationary(Position::ORIGIN); robot_count] }
    }

    /// Teleport `robot` to `position` and stop it (initial placement).
    pub fn place(&mut self, robot: RobotId, position: Position) -> MobilityResult<()> {
        *self.get_mut(robot)? = MovementState::stationary(position);
        Ok(())
    }

    pub fn get(&self, robot: RobotId) -> MobilityResult<&MovementState> {
        self.states.get(robot.index()).ok_or(MobilityError::RobotNotFound(robot))
    }

    pub fn get_mut(&mut self, robot: RobotId) -> MobilityResult<&mut MovementState> {
        self.states.get_mut(robot.index()).ok_or(MobilityError::RobotNotFound(robot))
    }

    /// Current position of `robot`.
    ///
    /// # Panics
    /// Panics if `robot` is out of range.
    #[inline]
    pub fn position(&self, robot: RobotId) -> Position {
        self.states[robot.index()].position
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
