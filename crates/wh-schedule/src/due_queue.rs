//! `DueQueue` — items released at a scheduled tick.
//!
//! The simulation uses it to pace command batches: each command of a batch
//! becomes due `command_spacing_ticks` after the previous one, and the tick
//! loop drains whatever is due at the current tick.
//!
//! `BTreeMap` keeps due ticks ordered; within one tick, items come out in
//! insertion order.

use std::collections::BTreeMap;

use wh_core::Tick;

/// Tick-ordered release queue.
#[derive(Debug)]
pub struct DueQueue<T> {
    inner: BTreeMap<Tick, Vec<T>>,
    /// Cached item count for O(1) `len()`.
    total: usize,
}

impl<T> Default for DueQueue<T> {
    fn default() -> Self {
        Self { inner: BTreeMap::new(), total: 0 }
    }
}

impl<T> DueQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `item` for release at `tick`.
    pub fn push(&mut self, tick: Tick, item: T) {
        self.inner.entry(tick).or_default().push(item);
        self.total += 1;
    }

    /// Remove and return every item due at or before `now`, oldest tick
    /// first.
    ///
    /// Returns an empty `Vec` without allocating when nothing is due.
    pub fn drain_due(&mut self, now: Tick) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(entry) = self.inner.first_entry() {
            if *entry.key() > now {
                break;
            }
            out.extend(entry.remove());
        }
        self.total -= out.len();
        out
    }

    /// The latest tick with something queued.
    pub fn last_tick(&self) -> Option<Tick> {
        self.inner.keys().next_back().copied()
    }

    /// The earliest tick with something queued.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
