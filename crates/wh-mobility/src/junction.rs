//! Junction occupancy.

use wh_core::{JunctionId, RobotId};

use crate::{MobilityError, MobilityResult};

/// Outcome of a claim attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// The junction was free or already held by the claimant.
    Granted,
    /// Another robot holds the junction.
    Held(RobotId),
}

/// One optional occupant per junction, indexed by `JunctionId`.
///
/// The table is the only lock in the system.  It enforces that at most one
/// robot holds a junction at any time; it does not order waiters.
#[derive(Debug, Clone, Default)]
pub struct JunctionTable {
    occupants: Vec<Option<RobotId>>,
}

impl JunctionTable {
    pub fn new(junction_count: usize) -> Self {
        Self { occupants: vec![None; junction_count] }
    }

    /// Claim `junction` for `robot` if it is free or already `robot`'s.
    pub fn try_claim(&mut self, junction: JunctionId, robot: RobotId) -> MobilityResult<Claim> {
        let slot = self
            .occupants
            .get_mut(junction.index())
            .ok_or(MobilityError::JunctionNotFound(junction))?;
        match *slot {
            Some(holder) if holder != robot => Ok(Claim::Held(holder)),
            _ => {
                *slot = Some(robot);
                Ok(Claim::Granted)
            }
        }
    }

    /// Release `junction` if `robot` holds it.  Returns `true` if it did.
    ///
    /// A release by a robot that is not the holder leaves the table as is.
    pub fn release(&mut self, junction: JunctionId, robot: RobotId) -> bool {
        match self.occupants.get_mut(junction.index()) {
            Some(slot) if *slot == Some(robot) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    pub fn occupant(&self, junction: JunctionId) -> Option<RobotId> {
        self.occupants.get(junction.index()).copied().flatten()
    }

    /// Number of junctions currently held.
    pub fn held_count(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}
