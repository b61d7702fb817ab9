// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Licence lifecycle status and licence kind.
//!
//! Status codes and kind codes are exchanged with the licence store in
//! `SCREAMING_SNAKE_CASE`, matching the stored representation.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of a licence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenceStatus {
    /// Placeholder for an offender with no licence record yet.
    NotStarted,
    /// Licence is being drafted.
    InProgress,
    /// Licence has been submitted for approval.
    Submitted,
    /// Licence has been approved and awaits release.
    Approved,
    /// Licence has been rejected by the approver.
    Rejected,
    /// Offender has been released on this licence.
    Active,
    /// A variation of an active licence is being drafted.
    VariationInProgress,
    /// A variation has been submitted for approval.
    VariationSubmitted,
    /// A variation has been approved.
    VariationApproved,
    /// A variation has been rejected.
    VariationRejected,
    /// The offender has been recalled to custody.
    Recalled,
    /// Hard-stop period began before the licence was approved.
    TimedOut,
    /// Licence is no longer in force.
    Inactive,
}

impl LicenceStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 13] = [
        Self::NotStarted,
        Self::InProgress,
        Self::Submitted,
        Self::Approved,
        Self::Rejected,
        Self::Active,
        Self::VariationInProgress,
        Self::VariationSubmitted,
        Self::VariationApproved,
        Self::VariationRejected,
        Self::Recalled,
        Self::TimedOut,
        Self::Inactive,
    ];

    /// Returns the stored string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Submitted => "SUBMITTED",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Active => "ACTIVE",
            Self::VariationInProgress => "VARIATION_IN_PROGRESS",
            Self::VariationSubmitted => "VARIATION_SUBMITTED",
            Self::VariationApproved => "VARIATION_APPROVED",
            Self::VariationRejected => "VARIATION_REJECTED",
            Self::Recalled => "RECALLED",
            Self::TimedOut => "TIMED_OUT",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Returns true for statuses that precede release: the licence is still
    /// being prepared or is waiting for the release date.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::NotStarted | Self::InProgress | Self::Submitted | Self::Approved
        )
    }

    /// Returns true for the variation statuses.
    #[must_use]
    pub const fn is_variation(&self) -> bool {
        matches!(
            self,
            Self::VariationInProgress
                | Self::VariationSubmitted
                | Self::VariationApproved
                | Self::VariationRejected
        )
    }

    /// Returns true once the licence has left the pre-release workflow.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Active | Self::Inactive | Self::Recalled) || self.is_variation()
    }
}

impl FromStr for LicenceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidLicenceStatus(s.to_string()))
    }
}

impl std::fmt::Display for LicenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The route by which a licence is produced.
///
/// Kind drives which release date applies and who creates the licence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenceKind {
    /// Standard conditional release licence.
    Crd,
    /// Licence created by the prison after the hard stop.
    HardStop,
    /// Licence for an offender released on time served.
    TimeServed,
    /// Licence for release at the post-recall release date.
    Prrd,
    /// Variation of an active licence.
    Variation,
    /// Home detention curfew licence.
    Hdc,
    /// Variation of an active HDC licence.
    HdcVariation,
}

impl LicenceKind {
    /// Every kind.
    pub const ALL: [Self; 7] = [
        Self::Crd,
        Self::HardStop,
        Self::TimeServed,
        Self::Prrd,
        Self::Variation,
        Self::Hdc,
        Self::HdcVariation,
    ];

    /// Returns the stored string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Crd => "CRD",
            Self::HardStop => "HARD_STOP",
            Self::TimeServed => "TIME_SERVED",
            Self::Prrd => "PRRD",
            Self::Variation => "VARIATION",
            Self::Hdc => "HDC",
            Self::HdcVariation => "HDC_VARIATION",
        }
    }

    /// Returns true for kinds produced by the HDC approval flow.
    #[must_use]
    pub const fn is_hdc(&self) -> bool {
        matches!(self, Self::Hdc | Self::HdcVariation)
    }
}

impl FromStr for LicenceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::InvalidLicenceKind(s.to_string()))
    }
}

impl std::fmt::Display for LicenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
