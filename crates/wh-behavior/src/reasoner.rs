//! The `Reasoner` trait — the coordinator's view of the reasoning engine.

use crate::{AgentRef, Belief, Desire};

/// External belief/desire store.
///
/// The coordinator calls these as notifications and never branches on what
/// the reasoner holds, so implementations are free to queue, forward, or
/// drop them.
///
/// # Example
///
/// ```rust,ignore
/// struct Forward(Sender<String>);
///
/// impl Reasoner for Forward {
///     fn add_belief(&mut self, agent: AgentRef, belief: Belief) {
///         let _ = self.0.send(format!("+{agent}:{belief}"));
///     }
///     // …
/// }
/// ```
pub trait Reasoner: Send {
    fn add_belief(&mut self, agent: AgentRef, belief: Belief);

    fn del_belief(&mut self, agent: AgentRef, belief: Belief);

    fn add_desire(&mut self, agent: AgentRef, desire: Desire);

    fn del_desire(&mut self, agent: AgentRef, desire: Desire);
}
