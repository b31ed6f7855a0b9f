//! Session countdown and score keeping.

use std::time::Duration;

use island_survival_core::{EndReason, SessionSnapshot};

#[derive(Clone, Debug)]
pub(crate) struct SessionClock {
    time_remaining: Duration,
    elapsed: Duration,
    ambient: Duration,
    score: u32,
    ended: Option<EndReason>,
}

impl SessionClock {
    pub(crate) fn new(length: Duration) -> Self {
        Self {
            time_remaining: length,
            elapsed: Duration::ZERO,
            ambient: Duration::ZERO,
            score: 0,
            ended: None,
        }
    }

    /// Advances the countdown, returning `true` when this tick exhausted it.
    pub(crate) fn tick(&mut self, dt: Duration) -> bool {
        self.ambient = self.ambient.saturating_add(dt);
        if self.ended.is_some() {
            return false;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        self.time_remaining = self.time_remaining.saturating_sub(dt);
        self.time_remaining.is_zero()
    }

    /// Moves the session into its terminal state. Later calls keep the first reason.
    pub(crate) fn end(&mut self, reason: EndReason) -> bool {
        if self.ended.is_some() {
            return false;
        }
        self.ended = Some(reason);
        true
    }

    pub(crate) fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub(crate) const fn is_ended(&self) -> bool {
        self.ended.is_some()
    }

    pub(crate) const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub(crate) const fn ambient(&self) -> Duration {
        self.ambient
    }

    pub(crate) const fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            time_remaining: self.time_remaining,
            elapsed: self.elapsed,
            score: self.score,
            ended: self.ended,
        }
    }
}
