// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-offender case assembled from the three upstream systems.

use crate::cvl::CvlRecord;
use crate::licence::LicenceSummary;
use crate::practitioner::ProbationPractitioner;
use crate::records::{CommunityManager, PrisonerRecord};
use crate::selection::SelectedLicence;
use time::Date;

/// One offender's licences, prisoner record and probation record.
///
/// Every case has exactly one prisoner record; offenders without one never
/// become cases. A case always has at least one licence entry, which is a
/// not-started placeholder when no licence record exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedCase {
    /// Prison (NOMIS) offender number.
    pub noms_id: String,
    /// Probation case reference number, when known.
    pub crn: Option<String>,
    /// The prisoner record.
    pub prisoner: PrisonerRecord,
    /// Eligibility and timing computed from the prisoner record.
    pub cvl: CvlRecord,
    /// Licences held by the offender.
    pub licences: Vec<LicenceSummary>,
    /// The community manager record, when the probation system has one.
    pub manager: Option<CommunityManager>,
    /// Practitioner resolution state.
    pub practitioner: ProbationPractitioner,
}

impl JoinedCase {
    /// Returns true if the offender has no licence record yet.
    #[must_use]
    pub fn is_not_started(&self) -> bool {
        self.licences.iter().all(LicenceSummary::is_placeholder)
    }

    /// Licence start date from the first licence that has one, falling back to
    /// the computed CVL date.
    #[must_use]
    pub fn licence_start_date(&self) -> Option<Date> {
        self.licences
            .iter()
            .filter(|l| !l.is_placeholder())
            .find_map(|l| l.licence_start_date)
            .or(self.cvl.licence_start_date)
    }

    /// The date the rule chain schedules against: the conditional release
    /// date, else the licence start date.
    #[must_use]
    pub fn release_date_for_rules(&self) -> Option<Date> {
        self.prisoner
            .conditional_release_date
            .or_else(|| self.licence_start_date())
    }

    /// Display name: the licence name when recorded, else the prisoner name.
    #[must_use]
    pub fn name(&self) -> String {
        self.licences
            .iter()
            .filter(|l| !l.is_placeholder())
            .map(LicenceSummary::full_name)
            .find(|n| !n.is_empty())
            .unwrap_or_else(|| self.prisoner.full_name())
    }
}

/// A case reduced to the single licence it displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedCase {
    /// The joined case.
    pub case: JoinedCase,
    /// The licence chosen by the selection policy.
    pub selected: SelectedLicence,
}

impl SelectedCase {
    /// The displayed licence.
    #[must_use]
    pub const fn licence(&self) -> &LicenceSummary {
        &self.selected.licence
    }

    /// Release date of the displayed licence: its own start date for a
    /// licence record, the computed CVL date for a placeholder.
    #[must_use]
    pub fn release_date(&self) -> Option<Date> {
        if self.licence().is_placeholder() {
            self.case.cvl.licence_start_date
        } else {
            self.licence().licence_start_date
        }
    }
}
