//! In-memory reasoner.

use std::collections::HashSet;

use crate::{AgentRef, Belief, Desire, Reasoner};

/// A [`Reasoner`] that simply remembers what is currently asserted.
///
/// Adding an existing entry or deleting a missing one is a no-op.  Used by
/// the demo and by tests that check which conditions the coordinator raised.
#[derive(Debug, Default, Clone)]
pub struct BeliefBase {
    beliefs: HashSet<(AgentRef, Belief)>,
    desires: HashSet<(AgentRef, Desire)>,
}

impl BeliefBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_belief(&self, agent: AgentRef, belief: Belief) -> bool {
        self.beliefs.contains(&(agent, belief))
    }

    pub fn has_desire(&self, agent: AgentRef, desire: Desire) -> bool {
        self.desires.contains(&(agent, desire))
    }

    /// Number of asserted (agent, belief) pairs.
    pub fn belief_count(&self) -> usize {
        self.beliefs.len()
    }

    pub fn desire_count(&self) -> usize {
        self.desires.len()
    }

    /// Every agent currently holding `desire`.
    pub fn agents_desiring(&self, desire: Desire) -> impl Iterator<Item = AgentRef> + '_ {
        self.desires
            .iter()
            .filter(move |(_, d)| *d == desire)
            .map(|(a, _)| *a)
    }
}

impl Reasoner for BeliefBase {
    fn add_belief(&mut self, agent: AgentRef, belief: Belief) {
        tracing::trace!(%agent, %belief, "+belief");
        self.beliefs.insert((agent, belief));
    }

    fn del_belief(&mut self, agent: AgentRef, belief: Belief) {
        tracing::trace!(%agent, %belief, "-belief");
        self.beliefs.remove(&(agent, belief));
    }

    fn add_desire(&mut self, agent: AgentRef, desire: Desire) {
        tracing::trace!(%agent, %desire, "+desire");
        self.desires.insert((agent, desire));
    }

    fn del_desire(&mut self, agent: AgentRef, desire: Desire) {
        tracing::trace!(%agent, %desire, "-desire");
        self.desires.remove(&(agent, desire));
    }
}
