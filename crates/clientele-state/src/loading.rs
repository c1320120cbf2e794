//! # Loading Tracker
//!
//! In-flight counter behind `is_loading()`.
//!
//! ```text
//! delete("c-1")            ──guard──┐ count = 1
//!   └── fetch(last query)  ──guard──┤ count = 2
//!                          ◄─drop───┤ count = 1   still loading
//!                          ◄─drop───┘ count = 0   idle
//! ```
//!
//! Nested work keeps the count above zero until the outermost operation
//! settles. The guard is released on every exit path, including `?`
//! returns and a dropped future.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts operations currently in flight.
#[derive(Debug, Default)]
pub struct LoadingTracker {
    in_flight: AtomicUsize,
}

impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks one operation as started until the returned guard drops.
    pub fn begin(&self) -> LoadingGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        LoadingGuard { tracker: self }
    }

    /// True while at least one guard is alive.
    pub fn is_loading(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Decrements the tracker on drop.
#[derive(Debug)]
#[must_use = "loading ends as soon as the guard is dropped"]
pub struct LoadingGuard<'a> {
    tracker: &'a LoadingTracker,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.tracker.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
