//! Countdown towards a target timestamp.
//!
//! [`Countdown`] is a lazy sequence of [`CountdownState`] values: every poll
//! recomputes the remaining time from the clock. Once the remaining time hits
//! zero it yields that zero value once and is exhausted for good.

use std::time::Duration;

/// Countdown re-render interval.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

const SECOND_MS: i64 = 1000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Remaining time split into display units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountdownState {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownState {
    /// Remaining time from `now_ms` until `target_ms`; zero when already past.
    pub fn between(target_ms: i64, now_ms: i64) -> Self {
        let remaining = target_ms.saturating_sub(now_ms).max(0);
        Self {
            days: remaining / DAY_MS,
            hours: (remaining % DAY_MS) / HOUR_MS,
            minutes: (remaining % HOUR_MS) / MINUTE_MS,
            seconds: (remaining % MINUTE_MS) / SECOND_MS,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.days + self.hours + self.minutes + self.seconds <= 0
    }

    /// Days cell turns red in the final three days.
    pub fn days_danger(&self) -> bool {
        self.days <= 3
    }

    /// Hours/minutes/seconds cells turn red in the final day and a half.
    pub fn time_alert(&self) -> bool {
        self.days <= 1 && self.hours <= 12 && self.minutes <= 60
    }
}

/// Time source for a countdown.
pub trait Clock {
    /// Current unix time in milliseconds.
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl<F: Fn() -> i64> Clock for F {
    fn now_ms(&self) -> i64 {
        self()
    }
}

/// Non-restartable countdown sequence.
#[derive(Debug)]
pub struct Countdown<C = SystemClock> {
    target_ms: i64,
    clock: C,
    expired: bool,
}

impl Countdown<SystemClock> {
    pub fn new(target_ms: i64) -> Self {
        Self::with_clock(target_ms, SystemClock)
    }
}

impl<C: Clock> Countdown<C> {
    pub fn with_clock(target_ms: i64, clock: C) -> Self {
        Self {
            target_ms,
            clock,
            expired: false,
        }
    }

    /// True once the zero value has been emitted.
    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

impl<C: Clock> Iterator for Countdown<C> {
    type Item = CountdownState;

    fn next(&mut self) -> Option<CountdownState> {
        if self.expired {
            return None;
        }
        let state = CountdownState::between(self.target_ms, self.clock.now_ms());
        if state.is_zero() {
            self.expired = true;
        }
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_split_into_units() {
        let target = 2 * DAY_MS + 3 * HOUR_MS + 4 * MINUTE_MS + 5 * SECOND_MS + 999;
        let state = CountdownState::between(target, 0);
        assert_eq!(
            state,
            CountdownState { days: 2, hours: 3, minutes: 4, seconds: 5 }
        );
    }

    #[test]
    fn test_past_target_only_emits_zero() {
        for target in [0, 999_000, 1_000_000] {
            let mut countdown = Countdown::with_clock(target, || 1_000_000_i64);
            let emitted: Vec<_> = countdown.by_ref().collect();
            assert_eq!(emitted, vec![CountdownState::default()]);
            assert!(countdown.is_expired());
            assert_eq!(countdown.next(), None);
        }
    }

    #[test]
    fn test_ticks_down_then_stops() {
        let now = Rc::new(Cell::new(0_i64));
        let clock = {
            let now = now.clone();
            move || now.get()
        };
        let mut countdown = Countdown::with_clock(3 * SECOND_MS, clock);

        let mut seconds = Vec::new();
        while let Some(state) = countdown.next() {
            seconds.push(state.seconds);
            now.set(now.get() + SECOND_MS);
        }
        assert_eq!(seconds, vec![3, 2, 1, 0]);
        assert!(countdown.is_expired());

        // moving the clock back does not restart it
        now.set(0);
        assert_eq!(countdown.next(), None);
    }

    #[test]
    fn test_sub_second_remainder_counts_as_zero() {
        let mut countdown = Countdown::with_clock(500, || 0_i64);
        assert!(countdown.next().unwrap().is_zero());
        assert_eq!(countdown.next(), None);
    }

    #[test]
    fn test_alert_thresholds() {
        let far = CountdownState { days: 5, hours: 0, minutes: 0, seconds: 0 };
        assert!(!far.days_danger());
        assert!(!far.time_alert());

        let close = CountdownState { days: 1, hours: 12, minutes: 30, seconds: 0 };
        assert!(close.days_danger());
        assert!(close.time_alert());

        let mid = CountdownState { days: 1, hours: 13, minutes: 0, seconds: 0 };
        assert!(!mid.time_alert());
    }
}
