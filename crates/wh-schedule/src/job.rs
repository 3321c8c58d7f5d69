//! Jobs and the per-robot job book.

use std::collections::VecDeque;

use wh_core::{NodeId, Position, RobotId};

use crate::{ScheduleError, ScheduleResult};

/// "Go to `dock` and collect the box waiting at `node`."
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Job {
    pub node: NodeId,
    /// Where the robot stops, resolved from its own rail.
    pub dock: Position,
}

/// One FIFO queue per robot, indexed by `RobotId`.
#[derive(Debug, Default)]
pub struct JobBook {
    queues: Vec<VecDeque<Job>>,
}

impl JobBook {
    pub fn new(robot_count: usize) -> Self {
        Self { queues: vec![VecDeque::new(); robot_count] }
    }

    /// Append `job` to the back of `robot`'s queue.
    pub fn enqueue(&mut self, robot: RobotId, job: Job) -> ScheduleResult<()> {
        self.queues
            .get_mut(robot.index())
            .ok_or(ScheduleError::RobotNotFound(robot))?
            .push_back(job);
        Ok(())
    }

    /// `true` if `robot` has nothing queued.  Unknown robots count as done.
    pub fn is_done(&self, robot: RobotId) -> bool {
        self.queues.get(robot.index()).is_none_or(VecDeque::is_empty)
    }

    /// Remove and return the head of `robot`'s queue.
    ///
    /// Callers are expected to check [`is_done`](Self::is_done) first; an
    /// empty queue is reported as [`ScheduleError::EmptyQueue`].
    pub fn pop_next(&mut self, robot: RobotId) -> ScheduleResult<Job> {
        self.queues
            .get_mut(robot.index())
            .ok_or(ScheduleError::RobotNotFound(robot))?
            .pop_front()
            .ok_or(ScheduleError::EmptyQueue(robot))
    }

    pub fn peek(&self, robot: RobotId) -> Option<&Job> {
        self.queues.get(robot.index())?.front()
    }

    /// Jobs queued for `robot`.
    pub fn len(&self, robot: RobotId) -> usize {
        self.queues.get(robot.index()).map_or(0, VecDeque::len)
    }

    /// Jobs queued across all robots.
    pub fn total(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    pub fn robot_count(&self) -> usize {
        self.queues.len()
    }
}
