//! Per-channel command cooldowns.
//!
//! A cooldown admits one call per window per channel. Calls inside the
//! window are rejected with the time left; they are never queued and do
//! not extend the window.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Time source for cooldown windows.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-advanced clock for tests and simulations.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Starts the clock at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// A rejected call and how long until the channel is admitted again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownRejection {
    /// Time left in the current window.
    pub retry_after: Duration,
}

/// Per-channel cooldown store.
pub struct Cooldown<C: Clock = SystemClock> {
    window: Duration,
    clock: C,
    started: DashMap<u64, Instant>,
}

impl Cooldown<SystemClock> {
    /// Creates a cooldown on the wall clock.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self::with_clock(window, SystemClock)
    }
}

impl<C: Clock> Cooldown<C> {
    /// Creates a cooldown on a custom clock.
    #[must_use]
    pub fn with_clock(window: Duration, clock: C) -> Self {
        Self {
            window,
            clock,
            started: DashMap::new(),
        }
    }

    /// Window length.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Admits the call and opens a new window, or rejects it.
    ///
    /// # Errors
    ///
    /// Returns `CooldownRejection` if the channel's window is still open.
    pub fn try_acquire(&self, channel_id: u64) -> Result<(), CooldownRejection> {
        let now = self.clock.now();
        match self.started.entry(channel_id) {
            Entry::Occupied(mut entry) => {
                let elapsed = now.saturating_duration_since(*entry.get());
                if elapsed < self.window {
                    return Err(CooldownRejection {
                        retry_after: self.window - elapsed,
                    });
                }
                entry.insert(now);
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
            }
        }
        Ok(())
    }

    /// Drops windows that have already closed.
    pub fn prune(&self) {
        let now = self.clock.now();
        self.started
            .retain(|_, started| now.saturating_duration_since(*started) < self.window);
    }

    /// Number of channels with a tracked window.
    #[must_use]
    pub fn tracked_channels(&self) -> usize {
        self.started.len()
    }
}
