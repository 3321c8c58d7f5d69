//! xsmall — smallest example for the rail warehouse coordinator.
//!
//! Three robots on three rails move boxes between pickup and storage areas,
//! handing them over at share nodes, then all return home.
//!
//! ```text
//! cargo run -p xsmall                  # built-in command batches
//! cargo run -p xsmall -- commands.txt  # one batch read from a file
//! RUST_LOG=wh_sim=debug cargo run -p xsmall
//! ```

mod layout;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wh_behavior::{BeliefBase, RecordingSink, WarehouseEvent};
use wh_core::Tick;
use wh_mobility::{JunctionEvent, MobilityStore};
use wh_output::{CsvWriter, OutputWriter, SimOutputObserver};
use wh_schedule::load_commands_file;
use wh_sim::{RobotAgent, SimBuilder, SimObserver, TickStats};

// ── Command batches ───────────────────────────────────────────────────────────

const FIRST_BATCH: &str = "\
Deliver_Box 0,2
Deliver_Box 1,0
Deliver_Box 2,1
Create_Box 1
";

const SECOND_BATCH: &str = "\
Retrieve_Box 0,1
Move_Box 1,2
Timeout
Job_Completed
";

const MAX_TICKS_PER_BATCH: u64 = 3_000;

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    blocks:        usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, blocks: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.summary_rows += 1;
        self.inner.on_tick_end(tick, stats);
    }

    fn on_event(&mut self, tick: Tick, event: &WarehouseEvent) {
        info!(tick = tick.0, tag = %event.tag(), "event");
        self.inner.on_event(tick, event);
    }

    fn on_junction(&mut self, _tick: Tick, event: &JunctionEvent) {
        if matches!(event, JunctionEvent::Blocked { .. }) {
            self.blocks += 1;
        }
    }

    fn on_snapshot(&mut self, tick: Tick, robots: &[RobotAgent], mobility: &MobilityStore) {
        self.snapshot_rows += robots.len();
        self.inner.on_snapshot(tick, robots, mobility);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== xsmall — rail warehouse coordinator ===");

    // 1. Floor plan and sim config.
    let loaded = layout::load().context("embedded layout")?;
    let config = loaded.sim;
    println!(
        "Layout: {} nodes, {} rails, {} junctions  |  seed {}",
        loaded.layout.node_count(),
        loaded.layout.rail_count(),
        loaded.layout.junctions().len(),
        config.seed,
    );

    // 2. Command batches: a file if one is given, otherwise the built-ins.
    let batches: Vec<String> = match std::env::args().nth(1) {
        Some(path) => {
            let commands = load_commands_file(Path::new(&path))
                .with_context(|| format!("reading commands from {path}"))?;
            vec![commands.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")]
        }
        None => vec![FIRST_BATCH.to_string(), SECOND_BATCH.to_string()],
    };

    // 3. Build sim.
    let mut sim = SimBuilder::new(config.clone(), loaded.layout, BeliefBase::new(), RecordingSink::new())
        .build()?;

    // 4. Set up output.
    std::fs::create_dir_all("output/xsmall")?;
    let writer = CsvWriter::new(Path::new("output/xsmall"))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer, &config));

    // 5. Run each batch until the warehouse goes quiet.
    let t0 = Instant::now();
    for (i, batch) in batches.iter().enumerate() {
        let queued = sim.submit_batch(batch)?;
        let settled = sim.run_until_quiescent(MAX_TICKS_PER_BATCH, &mut obs)?;
        println!("batch {i}: {queued} commands, settled = {settled}, now at {}", sim.clock);
        for line in sim.manager.audit_log() {
            println!("  {line}");
        }
    }
    obs.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  robot_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!("  events.csv          : {} rows", sim.sink.events.len());
    println!("  junction waits      : {}", obs.blocks);
    println!();

    // 7. Events as JSON lines.
    for (tick, event) in &sim.sink.events {
        println!("{{\"tick\":{},\"tag\":\"{}\",\"event\":{}}}", tick.0, event.tag(), serde_json::to_string(event)?);
    }
    println!();

    // 8. Final robot table.
    println!("{:<10} {:<10} {:<16} {:>10}", "Robot", "Task", "Position", "Odometer");
    println!("{}", "-".repeat(50));
    for robot in &sim.robots {
        let state = sim.mobility.state(robot.id)?;
        println!(
            "{:<10} {:<10} {:<16} {:>10.2}",
            robot.id.0,
            robot.task.as_str(),
            state.position.to_string(),
            state.odometer,
        );
    }

    Ok(())
}
