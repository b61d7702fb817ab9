// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tab classification for the case administrator prison view.

use crate::calendar::ReleaseDateCalendar;
use crate::case::SelectedCase;
use crate::error::DomainError;
use crate::status::LicenceStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tabs of the case administrator prison view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaViewCasesTab {
    /// The case needs manual attention.
    AttentionNeeded,
    /// Release is today or within the next two working days.
    ReleasesInNextTwoWorkingDays,
    /// Every other case.
    FutureReleases,
}

impl CaViewCasesTab {
    /// Returns the string representation of the tab.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AttentionNeeded => "ATTENTION_NEEDED",
            Self::ReleasesInNextTwoWorkingDays => "RELEASES_IN_NEXT_TWO_WORKING_DAYS",
            Self::FutureReleases => "FUTURE_RELEASES",
        }
    }
}

impl FromStr for CaViewCasesTab {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ATTENTION_NEEDED" => Ok(Self::AttentionNeeded),
            "RELEASES_IN_NEXT_TWO_WORKING_DAYS" => Ok(Self::ReleasesInNextTwoWorkingDays),
            "FUTURE_RELEASES" => Ok(Self::FutureReleases),
            _ => Err(DomainError::InvalidTab(s.to_string())),
        }
    }
}

impl std::fmt::Display for CaViewCasesTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a case for the prison view.
///
/// A not-started case has no licence flags of its own and uses the values
/// computed from the prisoner record instead.
#[must_use]
pub fn determine_ca_tab(case: &SelectedCase, calendar: &dyn ReleaseDateCalendar) -> CaViewCasesTab {
    let licence = case.licence();
    let release_date = case.release_date();

    if licence.is_placeholder() {
        return match release_date {
            None => CaViewCasesTab::AttentionNeeded,
            Some(_) if case.case.cvl.is_due_within_two_working_days => {
                CaViewCasesTab::ReleasesInNextTwoWorkingDays
            }
            Some(_) => CaViewCasesTab::FutureReleases,
        };
    }

    let Some(release_date) = release_date else {
        return if licence.status.is_in_flight() {
            CaViewCasesTab::AttentionNeeded
        } else {
            CaViewCasesTab::FutureReleases
        };
    };

    if licence.status == LicenceStatus::Approved && release_date < calendar.today() {
        CaViewCasesTab::AttentionNeeded
    } else if calendar.is_due_within_two_working_days(release_date) {
        CaViewCasesTab::ReleasesInNextTwoWorkingDays
    } else {
        CaViewCasesTab::FutureReleases
    }
}
