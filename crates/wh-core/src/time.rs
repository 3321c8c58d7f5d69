//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one fixed
//! physics step of the floor simulation (20 ms by default), and every robot
//! control loop, junction poll, and barrier check runs once per tick.  The
//! mapping to wall-clock time lives in `SimClock`:
//!
//!   elapsed_ms = tick * tick_duration_ms
//!
//! Integer ticks keep all pacing arithmetic exact; only movement uses floats.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and elapsed simulated time.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many milliseconds one tick represents.
    pub tick_duration_ms: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self { tick_duration_ms, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms as u64
    }

    /// Length of one tick in seconds, for velocity integration.
    #[inline]
    pub fn tick_secs(&self) -> f32 {
        self.tick_duration_ms as f32 / 1000.0
    }

    /// How many ticks span `ms` milliseconds? (rounds up)
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_duration_ms.max(1) as u64)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed_ms();
        write!(f, "{} ({}.{:03} s)", self.current_tick, ms / 1000, ms % 1000)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Usually embedded as the `[sim]` table of a layout file and loaded by
/// `wh-layout`; every field has a default so partial tables are accepted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Milliseconds per tick.  Default: 20 (a 50 Hz fixed step).
    pub tick_duration_ms: u32,

    /// Upper bound on simulated ticks.  There are no built-in timeouts, so
    /// this is the only thing that ends a run whose robots never settle.
    pub total_ticks: u64,

    /// Seed for the contention-ordering RNG.  Same seed, same run.
    pub seed: u64,

    /// Emit an observer snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    /// Robot travel speed in metres per second.
    pub robot_speed: f32,

    /// A robot has arrived once it is closer than this to its target.
    pub arrival_tolerance: f32,

    /// The home barrier treats a robot as home within this distance.
    pub home_tolerance: f32,

    /// Ticks between consecutive command lines of one batch, giving the
    /// reasoning engine time to react to each request.
    pub command_spacing_ticks: u64,

    /// Ticks the home barrier waits for robots to start moving before it
    /// begins checking positions.
    pub home_settle_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms:      20,
            total_ticks:           30_000,
            seed:                  0,
            output_interval_ticks: 50,
            robot_speed:           4.0,
            arrival_tolerance:     0.1,
            home_tolerance:        0.2,
            command_spacing_ticks: 25,
            home_settle_ticks:     100,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }

    /// Distance a robot covers in one tick.
    #[inline]
    pub fn step_distance(&self) -> f32 {
        self.robot_speed * self.tick_duration_ms as f32 / 1000.0
    }
}
