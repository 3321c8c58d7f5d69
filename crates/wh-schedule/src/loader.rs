//! Command file loading.
//!
//! A command file is a plain batch (see [`crate::command`]); the whole file
//! is one batch and is rejected as a unit on any syntax error.

use std::io::Read;
use std::path::Path;

use crate::{Command, ScheduleResult, parse_batch};

/// Load a command batch from a file.
pub fn load_commands_file(path: &Path) -> ScheduleResult<Vec<Command>> {
    let file = std::fs::File::open(path)?;
    load_commands_reader(file)
}

/// Like [`load_commands_file`] but accepts any `Read` source.
pub fn load_commands_reader<R: Read>(mut reader: R) -> ScheduleResult<Vec<Command>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_batch(&text)
}
