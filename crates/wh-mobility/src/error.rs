use thiserror::Error;

use wh_core::{JunctionId, RobotId};

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("{0} is not tracked by the mobility engine")]
    RobotNotFound(RobotId),

    #[error("{0} is not a known junction")]
    JunctionNotFound(JunctionId),

    #[error("{robot} cannot start inside {junction}, held by {holder}")]
    JunctionOccupied {
        robot:    RobotId,
        junction: JunctionId,
        holder:   RobotId,
    },
}

pub type MobilityResult<T> = Result<T, MobilityError>;
