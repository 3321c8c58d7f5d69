//! Simulation observer trait for progress reporting and data collection.

use wh_behavior::WarehouseEvent;
use wh_core::Tick;
use wh_mobility::{JunctionEvent, MobilityStore};

use crate::RobotAgent;

/// Per-tick counters handed to [`SimObserver::on_tick_end`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickStats {
    /// Commands released this tick.
    pub commands:     usize,
    /// Robots driving at the end of the tick.
    pub moving:       usize,
    /// Robots waiting at a junction at the end of the tick.
    pub blocked:      usize,
    pub arrivals:     usize,
    /// Warehouse events emitted this tick.
    pub events:       usize,
    /// Jobs queued across all robots at the end of the tick.
    pub jobs_pending: usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {} moving, {} jobs", stats.moving, stats.jobs_pending);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called for every warehouse event, after it went to the event sink.
    fn on_event(&mut self, _tick: Tick, _event: &WarehouseEvent) {}

    /// Called for every junction enter/exit/block/resume.
    fn on_junction(&mut self, _tick: Tick, _event: &JunctionEvent) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    fn on_snapshot(
        &mut self,
        _tick:     Tick,
        _robots:   &[RobotAgent],
        _mobility: &MobilityStore,
    ) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
