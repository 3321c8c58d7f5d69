use thiserror::Error;

use wh_core::WhError;
use wh_layout::LayoutError;
use wh_mobility::MobilityError;
use wh_schedule::ScheduleError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match robot count {expected}")]
    RobotCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    /// A coordination rule was broken: a job pulled from an empty queue, no
    /// robot or share node for a box, and the like.  The operation that hit
    /// it is abandoned; the run goes on.
    #[error("protocol invariant violated: {0}")]
    ProtocolInvariant(String),

    #[error(transparent)]
    Core(#[from] WhError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),
}

pub type SimResult<T> = Result<T, SimError>;
