// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Working-day calendar for release timing.
//!
//! ## Rules
//!
//! - Saturdays, Sundays and bank holidays are non-working days
//! - A release date falling on a non-working day is brought forward to the
//!   previous working day
//! - The hard-stop date is two working days before the effective release date
//! - The hard-stop warning date is two working days before the hard-stop date
//! - "Today" is fixed when the calendar is built, never read from a clock

use std::collections::BTreeSet;
use time::{Date, Duration, Weekday};

/// Number of working days between the hard-stop date and release.
pub const HARD_STOP_WORKING_DAYS: u32 = 2;

/// Number of working days of warning before the hard-stop date.
pub const HARD_STOP_WARNING_WORKING_DAYS: u32 = 2;

/// Release-timing questions asked by caseload pipelines.
pub trait ReleaseDateCalendar {
    /// The date all relative checks are made against.
    fn today(&self) -> Date;

    /// Returns true if `date` is a working day.
    fn is_working_day(&self, date: Date) -> bool;

    /// The date after which the prison takes over licence creation.
    fn hard_stop_date(&self, release_date: Date) -> Date;

    /// The date from which the COM is warned about the approaching hard stop.
    fn hard_stop_warning_date(&self, release_date: Date) -> Date;

    /// Returns true if today falls between the hard-stop date and release.
    fn is_in_hard_stop_period(&self, release_date: Date) -> bool {
        let today = self.today();
        today >= self.hard_stop_date(release_date) && today <= release_date
    }

    /// Returns true if release is today or within the next two working days.
    fn is_due_within_two_working_days(&self, release_date: Date) -> bool;

    /// Returns true if the release date is brought forward because it falls
    /// on a non-working day.
    fn is_due_for_early_release(&self, release_date: Date) -> bool {
        !self.is_working_day(release_date)
    }
}

/// Calendar backed by a fixed set of bank holidays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDayCalendar {
    today: Date,
    bank_holidays: BTreeSet<Date>,
}

impl WorkingDayCalendar {
    /// Creates a calendar for `today` with the given bank holidays.
    #[must_use]
    pub fn new(today: Date, bank_holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            today,
            bank_holidays: bank_holidays.into_iter().collect(),
        }
    }

    /// Creates a calendar where only weekends are non-working days.
    #[must_use]
    pub const fn without_bank_holidays(today: Date) -> Self {
        Self {
            today,
            bank_holidays: BTreeSet::new(),
        }
    }

    /// Adds working days to a date, skipping non-working days.
    #[must_use]
    pub fn add_working_days(&self, start: Date, working_days: u32) -> Date {
        self.step_working_days(start, working_days, Duration::days(1))
    }

    /// Subtracts working days from a date, skipping non-working days.
    #[must_use]
    pub fn subtract_working_days(&self, start: Date, working_days: u32) -> Date {
        self.step_working_days(start, working_days, Duration::days(-1))
    }

    /// Brings a non-working release date forward to the previous working day.
    #[must_use]
    pub fn effective_release_date(&self, release_date: Date) -> Date {
        let mut current = release_date;
        while !self.is_working_day(current) {
            match current.previous_day() {
                Some(previous) => current = previous,
                None => break,
            }
        }
        current
    }

    fn step_working_days(&self, start: Date, working_days: u32, step: Duration) -> Date {
        let mut current = start;
        let mut remaining = working_days;

        while remaining > 0 {
            match current.checked_add(step) {
                Some(next) => current = next,
                None => break,
            }

            if self.is_working_day(current) {
                remaining -= 1;
            }
        }

        current
    }
}

impl ReleaseDateCalendar for WorkingDayCalendar {
    fn today(&self) -> Date {
        self.today
    }

    fn is_working_day(&self, date: Date) -> bool {
        !matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
            && !self.bank_holidays.contains(&date)
    }

    fn hard_stop_date(&self, release_date: Date) -> Date {
        self.subtract_working_days(
            self.effective_release_date(release_date),
            HARD_STOP_WORKING_DAYS,
        )
    }

    fn hard_stop_warning_date(&self, release_date: Date) -> Date {
        self.subtract_working_days(
            self.hard_stop_date(release_date),
            HARD_STOP_WARNING_WORKING_DAYS,
        )
    }

    fn is_due_within_two_working_days(&self, release_date: Date) -> bool {
        let effective = self.effective_release_date(release_date);
        effective >= self.today && effective <= self.add_working_days(self.today, 2)
    }
}
