//! # Rate Limiting
//!
//! A per-key sliding-window counter used as advisory backpressure on mutating
//! store calls. Keys are logical operation names such as `add:example.com`.
//!
//! For each key the limiter remembers the timestamps of accepted operations in
//! the trailing [`WINDOW_MS`]. A check refuses, without recording anything, when
//! the window is already full. Keys whose windows have emptied are dropped
//! every [`SWEEP_INTERVAL`] checks, so memory stays bounded by recent activity.
//!
//! State is in-memory and process-local. Each [`NoteStore`](crate::store::note_store::NoteStore)
//! owns its own limiter, so separate execution contexts do not throttle each
//! other, and a restart resets every budget.

use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Length of the sliding window.
pub const WINDOW_MS: i64 = 60_000;

/// Budget used when nothing else is configured.
pub const DEFAULT_MAX_PER_MINUTE: usize = 30;

/// Every this many checks, idle keys are dropped.
pub const SWEEP_INTERVAL: usize = 128;

#[derive(Debug, Default)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, VecDeque<i64>>>,
    checks: AtomicUsize,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an operation for `key` if the budget allows it.
    ///
    /// Returns `false` when `max_per_minute` operations were already accepted
    /// in the last minute.
    pub fn can_perform(&self, key: &str, max_per_minute: usize) -> bool {
        self.can_perform_at(key, max_per_minute, Utc::now().timestamp_millis())
    }

    pub(crate) fn can_perform_at(&self, key: &str, max_per_minute: usize, now: i64) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let window = windows.entry(key.to_string()).or_default();

        while let Some(&oldest) = window.front() {
            if now - oldest >= WINDOW_MS {
                window.pop_front();
            } else {
                break;
            }
        }

        let allowed = window.len() < max_per_minute;
        if allowed {
            window.push_back(now);
        }

        if (self.checks.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_INTERVAL == 0 {
            let removed = prune_idle(&mut windows, now);
            tracing::trace!(removed, "swept idle rate-limit keys");
        }
        allowed
    }

    /// Drop keys with no operations left in the window.
    ///
    /// Checks prune the key being checked and, every [`SWEEP_INTERVAL`]
    /// checks, every other key as well. Call this to reclaim memory sooner.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now().timestamp_millis())
    }

    pub(crate) fn sweep_at(&self, now: i64) -> usize {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        prune_idle(&mut windows, now)
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.windows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

fn prune_idle(windows: &mut HashMap<String, VecDeque<i64>>, now: i64) -> usize {
    let before = windows.len();
    windows.retain(|_, window| {
        window.retain(|&t| now - t < WINDOW_MS);
        !window.is_empty()
    });
    before - windows.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourth_call_in_a_second_is_refused() {
        let limiter = RateLimiter::new();
        let results: Vec<bool> = (0..4)
            .map(|i| limiter.can_perform_at("add:example.com", 3, 1_000 + i * 100))
            .collect();
        assert_eq!(results, vec![true, true, true, false]);
    }

    #[test]
    fn real_clock_budget() {
        let limiter = RateLimiter::new();
        assert!(limiter.can_perform("k", 3));
        assert!(limiter.can_perform("k", 3));
        assert!(limiter.can_perform("k", 3));
        assert!(!limiter.can_perform("k", 3));
    }

    #[test]
    fn refused_attempts_are_not_recorded() {
        let limiter = RateLimiter::new();
        assert!(limiter.can_perform_at("k", 1, 0));
        assert!(!limiter.can_perform_at("k", 1, 30_000));
        // Only the first call counts, so the slot frees up a minute after it.
        assert!(limiter.can_perform_at("k", 1, 60_000));
    }

    #[test]
    fn window_slides() {
        let limiter = RateLimiter::new();
        assert!(limiter.can_perform_at("k", 2, 0));
        assert!(limiter.can_perform_at("k", 2, 10_000));
        assert!(!limiter.can_perform_at("k", 2, 59_999));
        assert!(limiter.can_perform_at("k", 2, 60_000));
        assert!(!limiter.can_perform_at("k", 2, 65_000));
        assert!(limiter.can_perform_at("k", 2, 70_000));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = RateLimiter::new();
        assert!(limiter.can_perform_at("add:a.com", 1, 0));
        assert!(!limiter.can_perform_at("add:a.com", 1, 1));
        assert!(limiter.can_perform_at("add:b.com", 1, 1));
    }

    #[test]
    fn zero_budget_always_refuses() {
        let limiter = RateLimiter::new();
        assert!(!limiter.can_perform_at("k", 0, 0));
    }

    #[test]
    fn sweep_drops_idle_keys() {
        let limiter = RateLimiter::new();
        limiter.can_perform_at("old", 5, 0);
        limiter.can_perform_at("fresh", 5, 50_000);
        assert_eq!(limiter.tracked_keys(), 2);

        let removed = limiter.sweep_at(70_000);
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_keys(), 1);
    }

    #[test]
    fn checks_sweep_idle_keys_periodically() {
        let limiter = RateLimiter::new();
        for i in 0..SWEEP_INTERVAL {
            assert!(limiter.can_perform_at(&format!("add:host{i}.com"), 5, 0));
        }
        // The sweep on the last check ran at t=0, when nothing was idle yet.
        assert_eq!(limiter.tracked_keys(), SWEEP_INTERVAL);

        for _ in 0..SWEEP_INTERVAL {
            limiter.can_perform_at("add:busy.com", usize::MAX, 70_000);
        }
        assert_eq!(limiter.tracked_keys(), 1);
    }
}
