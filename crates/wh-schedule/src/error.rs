use thiserror::Error;

use wh_core::RobotId;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("job queue of {0} is empty")]
    EmptyQueue(RobotId),

    #[error("{0} has no job queue")]
    RobotNotFound(RobotId),

    #[error("command syntax error on line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
