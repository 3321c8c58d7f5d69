//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `robot_snapshots.csv`
//! - `tick_summaries.csv`
//! - `events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{EventRow, OutputResult, RobotSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    events:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("robot_snapshots.csv"))?;
        snapshots.write_record(["robot_id", "tick", "x", "y", "phase", "task", "carrying", "odometer"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "elapsed_ms", "commands", "moving", "blocked", "arrivals", "events", "jobs_pending",
        ])?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["tick", "kind", "tag", "box_id"])?;

        Ok(Self {
            snapshots,
            summaries,
            events,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.robot_id.to_string(),
                row.tick.to_string(),
                format!("{:.3}", row.x),
                format!("{:.3}", row.y),
                row.phase.to_string(),
                row.task.to_string(),
                row.carrying.to_string(),
                format!("{:.3}", row.odometer),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_ms.to_string(),
            row.commands.to_string(),
            row.moving.to_string(),
            row.blocked.to_string(),
            row.arrivals.to_string(),
            row.events.to_string(),
            row.jobs_pending.to_string(),
        ])?;
        Ok(())
    }

    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.kind.to_string(),
            row.tag.clone(),
            row.box_id.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
