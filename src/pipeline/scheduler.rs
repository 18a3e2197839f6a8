//! Reflow Scheduler - coalesces reflow requests into one pass per period.
//!
//! A request arms a deadline `1000 / max_updates_per_second` ms ahead only if
//! none is pending. The host polls [`ReflowScheduler::take_due`] (through
//! `FlexContainer::tick`) and runs exactly one pass when it returns true.
//!
//! ```text
//! Idle --request--> Pending --deadline reached / take_due--> Idle
//!                   Pending --cancel--> Idle
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const DEFAULT_MAX_UPDATES_PER_SECOND: f32 = 10.0;

// =============================================================================
// Clocks
// =============================================================================

/// Monotonic time source.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

// =============================================================================
// Scheduler
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflowState {
    Idle,
    Pending { deadline: Duration },
}

pub struct ReflowScheduler {
    clock: Rc<dyn Clock>,
    period: Duration,
    state: ReflowState,
    passes: u64,
}

impl ReflowScheduler {
    pub fn new(clock: Rc<dyn Clock>, max_updates_per_second: f32) -> Self {
        Self {
            clock,
            period: period_for(max_updates_per_second),
            state: ReflowState::Idle,
            passes: 0,
        }
    }

    /// Minimum spacing between passes.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Change the rate. A pending deadline keeps its original time.
    pub fn set_max_updates_per_second(&mut self, max_updates_per_second: f32) {
        self.period = period_for(max_updates_per_second);
    }

    pub fn state(&self) -> ReflowState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, ReflowState::Pending { .. })
    }

    /// Arm the deadline unless one is already pending.
    ///
    /// Returns true if this call armed it.
    pub fn request(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        let deadline = self.clock.now() + self.period;
        self.state = ReflowState::Pending { deadline };
        log::trace!("reflow armed for {deadline:?}");
        true
    }

    /// Consume the pending request if its deadline has passed.
    pub fn take_due(&mut self) -> bool {
        match self.state {
            ReflowState::Pending { deadline } if self.clock.now() >= deadline => {
                self.state = ReflowState::Idle;
                self.passes += 1;
                true
            }
            _ => false,
        }
    }

    /// Consume the pending request regardless of its deadline.
    pub fn take_pending(&mut self) -> bool {
        if self.is_pending() {
            self.state = ReflowState::Idle;
            self.passes += 1;
            true
        } else {
            false
        }
    }

    /// Drop a pending request without running it.
    pub fn cancel(&mut self) {
        if self.is_pending() {
            log::trace!("pending reflow cancelled");
        }
        self.state = ReflowState::Idle;
    }

    /// Time left before the pending deadline, if any.
    pub fn time_until_due(&self) -> Option<Duration> {
        match self.state {
            ReflowState::Pending { deadline } => Some(deadline.saturating_sub(self.clock.now())),
            ReflowState::Idle => None,
        }
    }

    /// Passes handed out so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }
}

impl fmt::Debug for ReflowScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReflowScheduler")
            .field("period", &self.period)
            .field("state", &self.state)
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}

fn period_for(max_updates_per_second: f32) -> Duration {
    let ups = if max_updates_per_second.is_finite() && max_updates_per_second > 0.0 {
        max_updates_per_second
    } else {
        log::warn!(
            "invalid max updates per second {max_updates_per_second}, using {DEFAULT_MAX_UPDATES_PER_SECOND}"
        );
        DEFAULT_MAX_UPDATES_PER_SECOND
    };
    Duration::from_nanos((1e9 / f64::from(ups)).round() as u64)
}
