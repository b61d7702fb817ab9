// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! ISO 8601 calendar-date handling shared by every record type.
//!
//! External systems exchange dates as `YYYY-MM-DD` strings. Records hold
//! `time::Date` values and use the `iso_date` serde module for the wire form.

use crate::error::DomainError;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// The `YYYY-MM-DD` format used by every upstream system.
pub const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` string.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, ISO_DATE).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Parses an optional `YYYY-MM-DD` string, treating blank input as absent.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if a non-blank value is not a valid date.
pub fn parse_optional_iso_date(value: Option<&str>) -> Result<Option<Date>, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_iso_date(v).map(Some),
    }
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2024-03-14"), Ok(date!(2024 - 03 - 14)));
    }

    #[test]
    fn test_parse_iso_date_rejects_garbage() {
        let result = parse_iso_date("14/03/2024");
        assert!(matches!(result, Err(DomainError::DateParseError { .. })));
    }

    #[test]
    fn test_parse_optional_blank_is_none() {
        assert_eq!(parse_optional_iso_date(Some("  ")), Ok(None));
        assert_eq!(parse_optional_iso_date(None), Ok(None));
    }

    #[test]
    fn test_format_iso_date_pads() {
        assert_eq!(format_iso_date(date!(2022 - 01 - 01)), "2022-01-01");
    }
}
