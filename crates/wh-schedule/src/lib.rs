//! `wh-schedule` — per-robot job queues and the command surface.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`job`]       | `Job`, `JobBook` (one FIFO `VecDeque<Job>` per robot)       |
//! | [`command`]   | `Command`, `parse_line`, `parse_batch`                      |
//! | [`due_queue`] | `DueQueue<T>` (`BTreeMap<Tick, Vec<T>>`) for paced release  |
//! | [`loader`]    | `load_commands_file`, `load_commands_reader`                |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                        |
//!
//! # Job model (summary)
//!
//! A job is "go to `dock` and collect the box waiting at `node`".  Jobs are
//! pulled by robots when they go idle; there is no priority and no
//! preemption, so per-robot service order equals enqueue order.

pub mod command;
pub mod due_queue;
pub mod error;
pub mod job;
pub mod loader;

#[cfg(test)]
mod tests;

pub use command::{Command, parse_batch, parse_line};
pub use due_queue::DueQueue;
pub use error::{ScheduleError, ScheduleResult};
pub use job::{Job, JobBook};
pub use loader::{load_commands_file, load_commands_reader};
