// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur while interpreting caseload domain data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A licence status code was not recognised.
    #[error("Invalid licence status: {0}")]
    InvalidLicenceStatus(String),
    /// A licence kind code was not recognised.
    #[error("Invalid licence kind: {0}")]
    InvalidLicenceKind(String),
    /// A caseload tab code was not recognised.
    #[error("Invalid caseload tab: {0}")]
    InvalidTab(String),
    /// Failed to parse a date from a string.
    #[error("Failed to parse date '{date_string}': {error}")]
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    #[error("Date arithmetic overflow while {operation}")]
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A time zone name could not be resolved.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}
