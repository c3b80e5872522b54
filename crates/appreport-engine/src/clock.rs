use chrono::{DateTime, TimeZone, Utc};

/// Source of the current wall-clock time.
///
/// Resolution reads the clock at most once per call, so a single resolved
/// window never straddles two different readings.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }

    /// Clock pinned to whole epoch seconds; out-of-range values pin to the epoch itself
    pub fn at_epoch(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_is_stable() {
        let clock = FixedClock::at_epoch(1_496_682_540);
        assert_eq!(clock.now().timestamp(), 1_496_682_540);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_clock_through_reference() {
        fn read(clock: impl Clock) -> i64 {
            clock.now().timestamp()
        }

        let clock = FixedClock::at_epoch(42);
        assert_eq!(read(&clock), 42);
    }
}
