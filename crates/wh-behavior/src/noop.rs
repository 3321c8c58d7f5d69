//! Do-nothing collaborators.

use wh_core::Tick;

use crate::{AgentRef, Belief, Desire, EventSink, Reasoner, WarehouseEvent};

/// A [`Reasoner`] that discards every call.
///
/// Useful when only movement and events matter, e.g. in benchmarks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReasoner;

impl Reasoner for NoopReasoner {
    fn add_belief(&mut self, _agent: AgentRef, _belief: Belief) {}
    fn del_belief(&mut self, _agent: AgentRef, _belief: Belief) {}
    fn add_desire(&mut self, _agent: AgentRef, _desire: Desire) {}
    fn del_desire(&mut self, _agent: AgentRef, _desire: Desire) {}
}

/// An [`EventSink`] that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&mut self, _tick: Tick, _event: &WarehouseEvent) {}
}
