//! Time sources for the emitter.
//!
//! The emitter never reads the wall clock directly; it asks a [`Clock`], so a
//! pinned build time (or a test) produces byte-identical output.

use chrono::{Local, NaiveDateTime};

pub trait Clock {
    /// Current local time, without timezone information.
    fn now(&self) -> NaiveDateTime;
}

/// System wall clock in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fixed_clock_returns_same_instant() {
        let instant = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 22, 1)
            .unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_local_clock_is_close_to_now() {
        let before = Local::now().naive_local();
        let now = LocalClock.now();
        let after = Local::now().naive_local();
        assert!(before <= now && now <= after);
    }
}
