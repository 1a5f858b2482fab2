//! Time source abstraction
//!
//! The driver reads time only through [`Clock`], so throttling and ETA
//! behavior can be tested without sleeping.

use std::time::Instant;

/// Monotonic time source
pub trait Clock {
    /// Current instant
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn test_clock_by_reference() {
        fn elapsed_between<C: Clock>(clock: C) -> bool {
            let a = clock.now();
            clock.now() >= a
        }
        assert!(elapsed_between(&SystemClock));
    }
}
