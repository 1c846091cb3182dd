use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior};

/// Identifies one countdown. Every `Timer::start` mints a new token, so
/// ticks addressed to an earlier countdown are recognisably stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Result of feeding one tick to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale token, or no countdown running.
    Ignored,
    Running { remaining_secs: u32 },
    /// Reached zero on this tick; the timer has stopped itself.
    Expired,
}

/// Single countdown clock. At most one countdown is live at a time.
#[derive(Debug, Default)]
pub struct Timer {
    generation: u64,
    remaining_secs: u32,
    running: bool,
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh countdown, implicitly cancelling the previous one.
    pub fn start(&mut self, duration_secs: u32) -> TimerToken {
        self.generation += 1;
        self.remaining_secs = duration_secs;
        self.running = duration_secs > 0;
        TimerToken(self.generation)
    }

    /// Stop ticking. Later ticks for the current token are ignored.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Token of the live countdown, if any.
    #[must_use]
    pub fn token(&self) -> Option<TimerToken> {
        self.running.then_some(TimerToken(self.generation))
    }

    pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
        if !self.running || token.0 != self.generation {
            return TickOutcome::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            return TickOutcome::Expired;
        }
        TickOutcome::Running {
            remaining_secs: self.remaining_secs,
        }
    }
}

/// Real-time tick source for an event loop.
///
/// Armed with the token of the live countdown; yields that token once per
/// period and stays pending while disarmed.
#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
    armed: Option<TimerToken>,
}

impl Ticker {
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval,
            armed: None,
        }
    }

    #[must_use]
    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Follow the controller's live token; re-arming restarts the period.
    pub fn sync(&mut self, token: Option<TimerToken>) {
        if token == self.armed {
            return;
        }
        self.armed = token;
        if token.is_some() {
            self.interval.reset();
        }
    }

    #[must_use]
    pub fn armed(&self) -> Option<TimerToken> {
        self.armed
    }

    pub async fn tick(&mut self) -> TimerToken {
        match self.armed {
            Some(token) => {
                self.interval.tick().await;
                token
            }
            None => std::future::pending().await,
        }
    }
}
