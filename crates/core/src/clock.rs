use chrono::{Local, NaiveDate};

/// Source of "today" for cooldown math.
///
/// Every computation reads the current date through this trait so callers can
/// pin the calendar in tests instead of depending on the wall clock.
pub trait Clock {
    /// Current local calendar date (midnight-normalized by construction).
    fn today(&self) -> NaiveDate;
}

/// Reads the host's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Build from year/month/day; `None` when the date does not exist.
    pub fn ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_pinned_date() {
        let clock = FixedClock::ymd(2025, 1, 20).unwrap();
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
        assert_eq!(clock.today(), clock.today());
    }

    #[test]
    fn fixed_clock_rejects_impossible_dates() {
        assert!(FixedClock::ymd(2025, 2, 30).is_none());
    }

    #[test]
    fn reference_forwards_to_inner_clock() {
        fn today_of<C: Clock>(clock: C) -> NaiveDate {
            clock.today()
        }

        let clock = FixedClock::ymd(2024, 2, 29).unwrap();
        let dyn_clock: &dyn Clock = &clock;
        assert_eq!(today_of(&clock), clock.0);
        assert_eq!(today_of(dyn_clock), clock.0);

        let boxed: Box<dyn Clock> = Box::new(clock);
        assert_eq!(today_of(boxed), clock.0);
    }
}
