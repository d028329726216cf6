use chrono::{DateTime, Duration, Utc};

/// A simple clock abstraction for deterministic time in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

//
// ─── SESSION TIMER ─────────────────────────────────────────────────────────────
//

/// Explicit timer state machine for test and practice sessions.
///
/// The timer never reads ambient time: every operation takes the caller's
/// [`Clock`], so pausing while a dialog is open, resuming afterwards, and
/// asserting elapsed time are all deterministic under `Clock::Fixed`.
///
/// Banked time survives stop/start cycles; `reset` is the only way to
/// discard it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionTimer {
    running_since: Option<DateTime<Utc>>,
    banked: Duration,
}

impl SessionTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or resumes) the timer. Starting a running timer is a no-op.
    pub fn start(&mut self, clock: &Clock) {
        if self.running_since.is_none() {
            self.running_since = Some(clock.now());
        }
    }

    /// Stops the timer, banking the elapsed segment. Stopping a stopped
    /// timer is a no-op.
    pub fn stop(&mut self, clock: &Clock) {
        if let Some(since) = self.running_since.take() {
            self.banked += segment(since, clock.now());
        }
    }

    /// Discards all banked time and stops the timer.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Elapsed time including the in-flight segment of a running timer.
    #[must_use]
    pub fn elapsed(&self, clock: &Clock) -> Duration {
        match self.running_since {
            Some(since) => self.banked + segment(since, clock.now()),
            None => self.banked,
        }
    }

    /// Elapsed whole seconds, as displayed and persisted.
    #[must_use]
    pub fn elapsed_seconds(&self, clock: &Clock) -> u32 {
        u32::try_from(self.elapsed(clock).num_seconds()).unwrap_or(0)
    }
}

/// A wall clock stepping backwards must not produce a negative segment.
fn segment(since: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - since).max(Duration::zero())
}

//
// ─── TEST HELPERS ──────────────────────────────────────────────────────────────
//

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
