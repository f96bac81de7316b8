//! Tick-driven timers.
//!
//! Screens own their timers and advance them from the front end's frame loop.
//! A cancelled timer never fires again, so state torn down on a screen exit
//! cannot be touched by a late callback.

use std::time::Duration;

/// Fires every `period` while running
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    period: Duration,
    carry: Duration,
    running: bool,
}

impl IntervalTimer {
    /// Start a running timer. A zero period never fires.
    pub fn new(period: Duration) -> Self {
        IntervalTimer {
            period,
            carry: Duration::ZERO,
            running: true,
        }
    }

    /// Advance by `dt`, returning how many periods elapsed
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.running || self.period.is_zero() {
            return 0;
        }

        self.carry += dt;
        let mut fired = 0;
        while self.carry >= self.period {
            self.carry -= self.period;
            fired += 1;
        }
        fired
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.carry = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// Fires once after a fixed delay
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delay {
    remaining: Option<Duration>,
}

impl Delay {
    /// A delay that is not counting down
    pub fn idle() -> Self {
        Delay { remaining: None }
    }

    pub fn start(duration: Duration) -> Self {
        Delay {
            remaining: Some(duration),
        }
    }

    /// Advance by `dt`; true exactly once, when the delay runs out
    pub fn advance(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(remaining) if remaining <= dt => {
                self.remaining = None;
                true
            }
            Some(remaining) => {
                self.remaining = Some(remaining - dt);
                false
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_interval_accumulates() {
        let mut timer = IntervalTimer::new(ms(30));
        assert_eq!(timer.advance(ms(20)), 0);
        assert_eq!(timer.advance(ms(20)), 1);
        assert_eq!(timer.advance(ms(100)), 3);
    }

    #[test]
    fn test_cancelled_interval_never_fires() {
        let mut timer = IntervalTimer::new(ms(10));
        timer.advance(ms(5));
        timer.cancel();
        assert_eq!(timer.advance(ms(1000)), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_zero_period_never_fires() {
        let mut timer = IntervalTimer::new(Duration::ZERO);
        assert_eq!(timer.advance(ms(100)), 0);
    }

    #[test]
    fn test_delay_fires_once() {
        let mut delay = Delay::start(ms(200));
        assert!(!delay.advance(ms(150)));
        assert!(delay.advance(ms(50)));
        assert!(!delay.advance(ms(500)));
        assert!(!delay.is_armed());
    }

    #[test]
    fn test_cancelled_delay_never_fires() {
        let mut delay = Delay::start(ms(10));
        delay.cancel();
        assert!(!delay.advance(ms(100)));
    }
}
