//! Command-line surface.
//!
//! # Syntax
//!
//! One command per line; tokens are separated by any mix of spaces, commas,
//! and tabs.
//!
//! | Keyword         | Arguments     | Meaning                                  |
//! |-----------------|---------------|------------------------------------------|
//! | `Create_Box`    | `pickup`      | new box resting at pickup `pickup`       |
//! | `Deliver_Box`   | `from, to`    | new box at pickup `from` for storage `to` |
//! | `Retrieve_Box`  | `box, to`     | send `box` to pickup `to`                |
//! | `Move_Box`      | `box, to`     | send `box` to storage `to`               |
//! | `Job_Completed` | —             | all robots home                          |
//! | `Timeout`       | —             | accepted and ignored                     |
//!
//! Blank lines are skipped.  Lines starting with an unknown keyword are
//! skipped with a warning.  A known keyword with the wrong number of
//! arguments, or an argument that is not a non-negative integer, is a
//! syntax error and rejects the whole batch.

use std::fmt;

use wh_core::BoxId;

use crate::{ScheduleError, ScheduleResult};

/// One parsed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    CreateBox { pickup: u32 },
    DeliverBox { from: u32, to: u32 },
    RetrieveBox { box_id: BoxId, to: u32 },
    MoveBox { box_id: BoxId, to: u32 },
    JobCompleted,
    Timeout,
}

impl Command {
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::CreateBox { .. }   => "Create_Box",
            Command::DeliverBox { .. }  => "Deliver_Box",
            Command::RetrieveBox { .. } => "Retrieve_Box",
            Command::MoveBox { .. }     => "Move_Box",
            Command::JobCompleted       => "Job_Completed",
            Command::Timeout            => "Timeout",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Command::CreateBox { pickup }       => write!(f, "Create_Box {pickup}"),
            Command::DeliverBox { from, to }    => write!(f, "Deliver_Box {from},{to}"),
            Command::RetrieveBox { box_id, to } => write!(f, "Retrieve_Box {},{to}", box_id.0),
            Command::MoveBox { box_id, to }     => write!(f, "Move_Box {},{to}", box_id.0),
            Command::JobCompleted | Command::Timeout => f.write_str(self.keyword()),
        }
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse one line.  `line_no` is 1-based and only used in error messages.
///
/// Returns `Ok(None)` for blank lines and unknown keywords.
pub fn parse_line(line_no: usize, line: &str) -> ScheduleResult<Option<Command>> {
    let tokens: Vec<&str> = line
        .split([' ', ',', '\t'])
        .filter(|t| !t.is_empty())
        .collect();

    let Some((&keyword, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let cmd = match keyword {
        "Create_Box" => {
            let [pickup] = arity::<1>(line_no, keyword, args)?;
            Command::CreateBox { pickup }
        }
        "Deliver_Box" => {
            let [from, to] = arity::<2>(line_no, keyword, args)?;
            Command::DeliverBox { from, to }
        }
        "Retrieve_Box" => {
            let [b, to] = arity::<2>(line_no, keyword, args)?;
            Command::RetrieveBox { box_id: BoxId(b), to }
        }
        "Move_Box" => {
            let [b, to] = arity::<2>(line_no, keyword, args)?;
            Command::MoveBox { box_id: BoxId(b), to }
        }
        "Job_Completed" => {
            arity::<0>(line_no, keyword, args)?;
            Command::JobCompleted
        }
        "Timeout" => Command::Timeout,
        other => {
            tracing::warn!(line = line_no, keyword = other, "ignoring unknown command");
            return Ok(None);
        }
    };
    Ok(Some(cmd))
}

/// Parse a whole batch.  Any syntax error rejects the batch.
pub fn parse_batch(text: &str) -> ScheduleResult<Vec<Command>> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(cmd) = parse_line(i + 1, line)? {
            out.push(cmd);
        }
    }
    Ok(out)
}

/// Require exactly `N` integer arguments.
fn arity<const N: usize>(line: usize, keyword: &str, args: &[&str]) -> ScheduleResult<[u32; N]> {
    if args.len() != N {
        return Err(ScheduleError::Syntax {
            line,
            reason: format!("{keyword} takes {N} argument(s), got {}", args.len()),
        });
    }
    let mut out = [0u32; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.parse().map_err(|_| ScheduleError::Syntax {
            line,
            reason: format!("{keyword}: {arg:?} is not a non-negative integer"),
        })?;
    }
    Ok(out)
}
