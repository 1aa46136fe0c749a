#![forbid(unsafe_code)]

//! Scroll-settle debounce.
//!
//! While the page scrolls a target into view it emits a burst of scroll
//! events. The tour only advances once the burst is over: every event re-arms
//! a deadline, and [`poll`](ScrollSettle::poll) reports the deadline passing
//! exactly once.
//!
//! Time is injected by the caller, which keeps the debounce deterministic in
//! tests.
//!
//! ```
//! use dotcal_tutorial::scroll_settle::ScrollSettle;
//! use web_time::{Duration, Instant};
//!
//! let mut settle = ScrollSettle::new(Duration::from_millis(100));
//! let t0 = Instant::now();
//! settle.on_scroll(t0);
//! settle.on_scroll(t0 + Duration::from_millis(40));
//! assert!(!settle.poll(t0 + Duration::from_millis(120)));
//! assert!(settle.poll(t0 + Duration::from_millis(140)));
//! assert!(!settle.poll(t0 + Duration::from_millis(500)));
//! ```

use web_time::{Duration, Instant};

use crate::config::DEFAULT_SETTLE_DELAY_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettleState {
    Idle,
    Pending { last_scroll: Instant },
}

/// Debounces scroll events into a single settle notification.
#[derive(Debug, Clone)]
pub struct ScrollSettle {
    delay: Duration,
    state: SettleState,
}

impl Default for ScrollSettle {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SETTLE_DELAY_MS))
    }
}

impl ScrollSettle {
    /// Create a debounce with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: SettleState::Idle,
        }
    }

    /// Record a scroll event, restarting the quiet period.
    pub fn on_scroll(&mut self, now: Instant) {
        self.state = SettleState::Pending { last_scroll: now };
    }

    /// Check whether the quiet period has elapsed.
    ///
    /// Returns `true` once per burst, then disarms.
    pub fn poll(&mut self, now: Instant) -> bool {
        if let SettleState::Pending { last_scroll } = self.state
            && now.saturating_duration_since(last_scroll) >= self.delay
        {
            self.state = SettleState::Idle;
            return true;
        }
        false
    }

    /// Discard any pending notification.
    pub fn cancel(&mut self) {
        self.state = SettleState::Idle;
    }

    /// Whether a scroll burst is waiting to settle.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, SettleState::Pending { .. })
    }

    /// Time left until the pending burst settles, if any.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            SettleState::Idle => None,
            SettleState::Pending { last_scroll } => Some(
                self.delay
                    .saturating_sub(now.saturating_duration_since(last_scroll)),
            ),
        }
    }

    /// The configured quiet period.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
