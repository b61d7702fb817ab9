// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The current calendar date in a named time zone.
//!
//! Pipelines never read a clock. Callers resolve "today" once at the edge and
//! pass it in.

use crate::error::DomainError;
use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use time::{Date, Month};

/// Time zone all release dates are expressed in.
pub const DEFAULT_TIMEZONE: &str = "Europe/London";

/// Today's date in `timezone`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` if the zone name is unknown.
pub fn today_in(timezone: &str) -> Result<Date, DomainError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;

    naive_to_date(Utc::now().with_timezone(&tz).date_naive())
}

/// Converts a `chrono::NaiveDate` to a `time::Date`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the date is outside the
/// range `time` supports.
pub fn naive_to_date(date: NaiveDate) -> Result<Date, DomainError> {
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("converting {date}"),
    };

    let month = u8::try_from(date.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(overflow)?;
    let day = u8::try_from(date.day()).map_err(|_| overflow())?;

    Date::from_calendar_date(date.year(), month, day).map_err(|_| overflow())
}
