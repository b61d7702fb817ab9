// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use caseload_domain::{DomainError, LicenceKind, LicenceStatus};
use thiserror::Error;

/// The upstream systems a caseload draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalSystem {
    /// The licence database.
    LicenceStore,
    /// Prisoner search.
    PrisonerSearch,
    /// The probation case management system.
    Probation,
    /// HDC approval status from the prison API.
    Hdc,
}

impl ExternalSystem {
    /// Returns the string representation of the system.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LicenceStore => "licence store",
            Self::PrisonerSearch => "prisoner search",
            Self::Probation => "probation",
            Self::Hdc => "HDC status",
        }
    }
}

impl std::fmt::Display for ExternalSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A failed call to an upstream system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{system} request failed: {message}")]
pub struct SourceError {
    /// The system that failed.
    pub system: ExternalSystem,
    /// What went wrong.
    pub message: String,
}

impl SourceError {
    /// Creates a source error.
    #[must_use]
    pub fn new(system: ExternalSystem, message: impl Into<String>) -> Self {
        Self {
            system,
            message: message.into(),
        }
    }
}

/// Errors surfaced by caseload operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The requested licence does not exist.
    #[error("Licence {licence_id} not found")]
    LicenceNotFound {
        /// The missing licence id.
        licence_id: i64,
    },
    /// The request conflicts with a licence the offender already holds.
    #[error(
        "Cannot create a {requested} licence for {noms_id}: licence {existing_licence_id} is {existing_status}"
    )]
    InvalidCombination {
        /// Prison (NOMIS) offender number.
        noms_id: String,
        /// Kind of licence requested.
        requested: LicenceKind,
        /// The conflicting licence.
        existing_licence_id: i64,
        /// Status of the conflicting licence.
        existing_status: LicenceStatus,
    },
    /// An upstream system failed; the whole request fails with it.
    #[error(transparent)]
    ExternalSystem(#[from] SourceError),
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
}
