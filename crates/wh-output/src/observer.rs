//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use wh_behavior::WarehouseEvent;
use wh_core::{BoxId, SimConfig, Tick};
use wh_mobility::MobilityStore;
use wh_sim::{RobotAgent, SimObserver, TickStats};

use crate::row::{EventRow, RobotSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes robot snapshots, tick summaries, and
/// warehouse events to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:           W,
    tick_duration_ms: u32,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for elapsed-time
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_duration_ms: config.tick_duration_ms,
            last_error:       None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Flush the writer.  Runs of bounded length that never reach
    /// `on_sim_end` (`run_ticks`, `run_until_quiescent`) call this instead.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        let row = TickSummaryRow {
            tick:         tick.0,
            elapsed_ms:   tick.0 * self.tick_duration_ms as u64,
            commands:     stats.commands as u64,
            moving:       stats.moving as u64,
            blocked:      stats.blocked as u64,
            arrivals:     stats.arrivals as u64,
            events:       stats.events as u64,
            jobs_pending: stats.jobs_pending as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_event(&mut self, tick: Tick, event: &WarehouseEvent) {
        let row = EventRow {
            tick:   tick.0,
            kind:   event.kind(),
            tag:    event.tag(),
            box_id: event.box_id().unwrap_or(BoxId::INVALID).0,
        };
        let result = self.writer.write_event(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, robots: &[RobotAgent], mobility: &MobilityStore) {
        let rows: Vec<RobotSnapshotRow> = robots
            .iter()
            .zip(&mobility.states)
            .map(|(robot, state)| RobotSnapshotRow {
                robot_id: robot.id.0,
                tick:     tick.0,
                x:        state.position.x,
                y:        state.position.y,
                phase:    state.phase.as_str(),
                task:     robot.task.as_str(),
                carrying: robot.carrying().unwrap_or(BoxId::INVALID).0,
                odometer: state.odometer,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        self.finish();
    }
}
