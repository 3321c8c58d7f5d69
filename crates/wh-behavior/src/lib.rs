//! `wh-behavior` — the surface the coordinator shares with its reasoning
//! collaborator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                     |
//! |-----------------|--------------------------------------------------------------|
//! | [`vocab`]       | `AgentRef`, `Belief`, `Desire` — what gets asserted/retracted |
//! | [`reasoner`]    | `Reasoner` trait (`add_belief`, `del_belief`, …)             |
//! | [`belief_base`] | `BeliefBase` — in-memory reasoner with queries               |
//! | [`event`]       | `WarehouseEvent`, `EventSink` trait, `RecordingSink`         |
//! | [`noop`]        | `NoopReasoner`, `NoopSink`                                   |
//!
//! # Design notes
//!
//! The coordinator never reads anything back from the reasoner: calls are
//! fire-and-forget notifications, so a remote agent platform and an
//! in-process [`BeliefBase`] are interchangeable.  Events go out through a
//! separate [`EventSink`] because the collaborator usually forwards them to
//! a different channel (a content-delivery queue) than its belief updates.

pub mod belief_base;
pub mod event;
pub mod noop;
pub mod reasoner;
pub mod vocab;


pub use belief_base::BeliefBase;
pub use event::{EventSink, RecordingSink, WarehouseEvent};
pub use noop::{NoopReasoner, NoopSink};
pub use reasoner::Reasoner;
pub use vocab::{AgentRef, Belief, Desire};
