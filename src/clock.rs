//! Source of "today" for the progression engine
//!
//! Calendar-day boundaries follow the host's local timezone, not UTC.

use std::cell::Cell;

use chrono::{DateTime, Days, Local, NaiveDate};

/// Provides the current local calendar date
pub trait Clock {
    fn today(&self) -> NaiveDate;

    /// Current instant on `today()`, keeping the wall clock's time of day
    fn now(&self) -> DateTime<Local> {
        let wall = Local::now();
        self.today()
            .and_time(wall.time())
            .and_local_timezone(Local)
            .earliest()
            .unwrap_or(wall)
    }
}

/// Wall clock in the host's local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to a date the caller controls
///
/// Interior mutability lets a caller holding only `&engine.clock()` move the
/// date forward (the engine is single-threaded).
#[derive(Debug, Clone)]
pub struct ManualClock {
    today: Cell<NaiveDate>,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Cell::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        self.today.set(today);
    }

    /// Move the clock forward by `days` calendar days
    pub fn advance_days(&self, days: u64) {
        let current = self.today.get();
        self.today
            .set(current.checked_add_days(Days::new(days)).unwrap_or(current));
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}
