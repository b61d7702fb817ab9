// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-specific case views.
//!
//! Each view is a flat, serializable record built from a `SelectedCase`.
//! Views carry no behaviour beyond construction and the search fields.

use crate::calendar::ReleaseDateCalendar;
use crate::case::SelectedCase;
use crate::dates::iso_date;
use crate::practitioner::ProbationPractitioner;
use crate::release_label::ReleaseDateLabel;
use crate::search::SearchableCase;
use crate::selection::LicenceCreationType;
use crate::status::{LicenceKind, LicenceStatus};
use crate::tabs::CaViewCasesTab;
use serde::Serialize;
use time::Date;

/// A row on the case administrator prison or probation view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaCase {
    /// Licence id; absent for a not-started case.
    pub licence_id: Option<i64>,
    /// Predecessor licence id when this is a new version.
    pub licence_version_of: Option<i64>,
    /// Offender name.
    pub name: String,
    /// Prison (NOMIS) offender number.
    pub prisoner_number: String,
    /// Displayed licence status.
    pub licence_status: LicenceStatus,
    /// Licence kind.
    pub kind: LicenceKind,
    /// How the displayed licence came to be.
    pub licence_creation_type: LicenceCreationType,
    /// Release date.
    #[serde(with = "iso_date::option")]
    pub release_date: Option<Date>,
    /// Which sentence date the release date came from.
    pub release_date_label: ReleaseDateLabel,
    /// Tab the case is shown on.
    pub tab: CaViewCasesTab,
    /// Legal status from the prisoner record.
    pub nomis_legal_status: Option<String>,
    /// Responsible practitioner.
    pub probation_practitioner: ProbationPractitioner,
    /// Last person to edit the licence.
    pub last_worked_on_by: Option<String>,
    /// Release falls on a non-working day and is brought forward.
    pub is_due_for_early_release: bool,
    /// Today falls inside the hard-stop period.
    pub is_in_hard_stop_period: bool,
    /// Prison code.
    pub prison_code: Option<String>,
    /// Prison name.
    pub prison_description: Option<String>,
}

impl CaCase {
    /// Builds the row for a selected case.
    #[must_use]
    pub fn build(
        case: &SelectedCase,
        tab: CaViewCasesTab,
        calendar: &dyn ReleaseDateCalendar,
    ) -> Self {
        let licence = case.licence();
        let prisoner = &case.case.prisoner;
        let release_date = case.release_date();

        Self {
            licence_id: licence.licence_id,
            licence_version_of: licence.version_of,
            name: case.case.name(),
            prisoner_number: case.case.noms_id.clone(),
            licence_status: licence.status,
            kind: licence.kind,
            licence_creation_type: case.selected.creation_type,
            release_date,
            release_date_label: ReleaseDateLabel::for_case(case),
            tab,
            nomis_legal_status: prisoner.legal_status.clone(),
            probation_practitioner: case.case.practitioner.clone(),
            last_worked_on_by: licence.updated_by_full_name.clone(),
            is_due_for_early_release: release_date
                .is_some_and(|d| calendar.is_due_for_early_release(d)),
            is_in_hard_stop_period: in_hard_stop_period(case, calendar),
            prison_code: licence
                .prison_code
                .clone()
                .or_else(|| prisoner.prison_id.clone()),
            prison_description: licence
                .prison_description
                .clone()
                .or_else(|| prisoner.prison_name.clone()),
        }
    }
}

/// A row on a COM create or vary caseload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComCase {
    /// Licence id; absent for a not-started case.
    pub licence_id: Option<i64>,
    /// Displayed licence status.
    pub licence_status: LicenceStatus,
    /// Licence kind.
    pub licence_type: LicenceKind,
    /// How the displayed licence came to be.
    pub licence_creation_type: LicenceCreationType,
    /// Probation case reference number.
    pub crn: Option<String>,
    /// Prison (NOMIS) offender number.
    pub prisoner_number: String,
    /// Offender name.
    pub name: String,
    /// Release date.
    #[serde(with = "iso_date::option")]
    pub release_date: Option<Date>,
    /// Which sentence date the release date came from.
    pub release_date_label: ReleaseDateLabel,
    /// Hard-stop date.
    #[serde(with = "iso_date::option")]
    pub hard_stop_date: Option<Date>,
    /// Hard-stop warning date.
    #[serde(with = "iso_date::option")]
    pub hard_stop_warning_date: Option<Date>,
    /// Today falls inside the hard-stop period.
    pub is_in_hard_stop_period: bool,
    /// Release falls on a non-working day and is brought forward.
    pub is_due_for_early_release: bool,
    /// The licence needs a review after release.
    pub is_review_needed: bool,
    /// Responsible practitioner.
    pub probation_practitioner: ProbationPractitioner,
}

impl ComCase {
    /// Builds the row for a selected case.
    #[must_use]
    pub fn build(case: &SelectedCase, calendar: &dyn ReleaseDateCalendar) -> Self {
        let licence = case.licence();
        let release_date = case.release_date();

        Self {
            licence_id: licence.licence_id,
            licence_status: licence.status,
            licence_type: licence.kind,
            licence_creation_type: case.selected.creation_type,
            crn: case.case.crn.clone(),
            prisoner_number: case.case.noms_id.clone(),
            name: case.case.name(),
            release_date,
            release_date_label: ReleaseDateLabel::for_case(case),
            hard_stop_date: release_date.map(|d| calendar.hard_stop_date(d)),
            hard_stop_warning_date: release_date.map(|d| calendar.hard_stop_warning_date(d)),
            is_in_hard_stop_period: in_hard_stop_period(case, calendar),
            is_due_for_early_release: release_date
                .is_some_and(|d| calendar.is_due_for_early_release(d)),
            is_review_needed: licence.is_review_needed,
            probation_practitioner: case.case.practitioner.clone(),
        }
    }
}

/// A row on the approver caseloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalCase {
    /// Licence id.
    pub licence_id: Option<i64>,
    /// Offender name.
    pub name: String,
    /// Prison (NOMIS) offender number.
    pub prisoner_number: String,
    /// Probation case reference number.
    pub crn: Option<String>,
    /// Licence kind.
    pub kind: LicenceKind,
    /// Licence status.
    pub licence_status: LicenceStatus,
    /// Who submitted the licence.
    pub submitted_by_full_name: Option<String>,
    /// Release date.
    #[serde(with = "iso_date::option")]
    pub release_date: Option<Date>,
    /// Which sentence date the release date came from.
    pub release_date_label: ReleaseDateLabel,
    /// Release is imminent or in the hard-stop period.
    pub urgent_approval: bool,
    /// Who approved the licence.
    pub approved_by: Option<String>,
    /// When the licence was approved.
    #[serde(with = "iso_date::option")]
    pub approved_on: Option<Date>,
    /// Release falls on a non-working day and is brought forward.
    pub is_due_for_early_release: bool,
    /// Responsible practitioner.
    pub probation_practitioner: ProbationPractitioner,
    /// Prison code.
    pub prison_code: Option<String>,
    /// Prison name.
    pub prison_description: Option<String>,
}

impl ApprovalCase {
    /// Builds the row for a selected case.
    #[must_use]
    pub fn build(case: &SelectedCase, calendar: &dyn ReleaseDateCalendar) -> Self {
        let licence = case.licence();
        let release_date = case.release_date();

        Self {
            licence_id: licence.licence_id,
            name: case.case.name(),
            prisoner_number: case.case.noms_id.clone(),
            crn: case.case.crn.clone(),
            kind: licence.kind,
            licence_status: licence.status,
            submitted_by_full_name: licence.submitted_by_full_name.clone(),
            release_date,
            release_date_label: ReleaseDateLabel::for_case(case),
            urgent_approval: release_date.is_some_and(|d| {
                calendar.is_due_within_two_working_days(d) || calendar.is_in_hard_stop_period(d)
            }),
            approved_by: licence.approved_by_name.clone(),
            approved_on: licence.approved_date,
            is_due_for_early_release: release_date
                .is_some_and(|d| calendar.is_due_for_early_release(d)),
            probation_practitioner: case.case.practitioner.clone(),
            prison_code: licence.prison_code.clone(),
            prison_description: licence.prison_description.clone(),
        }
    }
}

/// A row on the variation approver caseloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaryApproverCase {
    /// Licence id.
    pub licence_id: Option<i64>,
    /// Offender name.
    pub name: String,
    /// Prison (NOMIS) offender number.
    pub prisoner_number: String,
    /// Probation case reference number.
    pub crn: Option<String>,
    /// Licence kind.
    pub licence_type: LicenceKind,
    /// When the variation was requested.
    #[serde(with = "iso_date::option")]
    pub variation_request_date: Option<Date>,
    /// Release date.
    #[serde(with = "iso_date::option")]
    pub release_date: Option<Date>,
    /// Responsible practitioner.
    pub probation_practitioner: ProbationPractitioner,
}

impl VaryApproverCase {
    /// Builds the row for a selected case.
    #[must_use]
    pub fn build(case: &SelectedCase) -> Self {
        let licence = case.licence();

        Self {
            licence_id: licence.licence_id,
            name: case.case.name(),
            prisoner_number: case.case.noms_id.clone(),
            crn: case.case.crn.clone(),
            licence_type: licence.kind,
            variation_request_date: licence.variation_request_date,
            release_date: case.release_date(),
            probation_practitioner: case.case.practitioner.clone(),
        }
    }
}

/// A row on the last-minute handover report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMinuteHandoverCase {
    /// Release date.
    #[serde(with = "iso_date::option")]
    pub release_date: Option<Date>,
    /// Prison (NOMIS) offender number.
    pub prisoner_number: String,
    /// Prisoner name.
    pub prisoner_name: String,
    /// Probation case reference number.
    pub crn: Option<String>,
    /// Probation region description.
    pub probation_region: Option<String>,
    /// Responsible practitioner.
    pub probation_practitioner: ProbationPractitioner,
    /// Prison code.
    pub prison_code: Option<String>,
    /// Prison name.
    pub prison_name: Option<String>,
    /// Status of the licence.
    pub status: LicenceStatus,
}

impl LastMinuteHandoverCase {
    /// Builds the row for a selected case.
    #[must_use]
    pub fn build(case: &SelectedCase) -> Self {
        let prisoner = &case.case.prisoner;

        Self {
            release_date: case.release_date(),
            prisoner_number: case.case.noms_id.clone(),
            prisoner_name: prisoner.full_name(),
            crn: case.case.crn.clone(),
            probation_region: case
                .case
                .manager
                .as_ref()
                .and_then(|m| m.provider_description.clone()),
            probation_practitioner: case.case.practitioner.clone(),
            prison_code: prisoner.prison_id.clone(),
            prison_name: prisoner.prison_name.clone(),
            status: case.licence().status,
        }
    }
}

fn in_hard_stop_period(case: &SelectedCase, calendar: &dyn ReleaseDateCalendar) -> bool {
    if case.licence().is_placeholder() {
        case.case.cvl.is_in_hard_stop_period
    } else {
        case.release_date()
            .is_some_and(|d| calendar.is_in_hard_stop_period(d))
    }
}

macro_rules! searchable {
    ($view:ty) => {
        impl SearchableCase for $view {
            fn name(&self) -> &str {
                &self.name
            }

            fn offender_number(&self) -> &str {
                &self.prisoner_number
            }

            fn practitioner_name(&self) -> Option<&str> {
                self.probation_practitioner.name()
            }
        }
    };
}

searchable!(CaCase);
searchable!(ComCase);
searchable!(ApprovalCase);
searchable!(VaryApproverCase);
