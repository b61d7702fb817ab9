// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Community offender manager caseloads.
//!
//! Both caseloads start from the offenders the probation system says a COM
//! (or a team) manages.
//!
//! The create caseload shows licences still to be prepared, including
//! not-started cases. Offenders already holding an `ACTIVE` licence are
//! dropped entirely. Rules, in order: `DEAD`, holds an `ACTIVE` licence,
//! not eligible for a licence, no release date, then approved for HDC and
//! HDC licence not yet visible to COMs.
//!
//! The vary caseload shows active licences and variations in progress. Rules,
//! in order: `DEAD`, then HDC licence not yet visible to COMs.

use crate::error::CoreError;
use crate::fetch;
use crate::join::{Placeholders, join_cases};
use crate::ports::LicenceQuery;
use crate::service::CaseloadService;
use caseload_domain::{
    CommunityManager, ComCase, EligibilityContext, ExclusionRule, LicenceStatus, compare_com,
    select_licence, select_vary_licence,
};
use tracing::{debug, info};

/// Statuses fetched for the create caseload.
pub const CREATE_STATUSES: [LicenceStatus; 5] = [
    LicenceStatus::InProgress,
    LicenceStatus::Submitted,
    LicenceStatus::Approved,
    LicenceStatus::TimedOut,
    LicenceStatus::Active,
];

/// Statuses fetched for the vary caseload.
pub const VARY_STATUSES: [LicenceStatus; 5] = [
    LicenceStatus::Active,
    LicenceStatus::VariationInProgress,
    LicenceStatus::VariationSubmitted,
    LicenceStatus::VariationApproved,
    LicenceStatus::VariationRejected,
];

impl CaseloadService<'_> {
    /// Builds the create caseload for one COM.
    ///
    /// # Errors
    ///
    /// Returns an error if any upstream system fails.
    pub fn staff_create_caseload(&self, staff_id: i64) -> Result<Vec<ComCase>, CoreError> {
        info!(staff_id, "Building COM create caseload");
        let managers = self.sources.probation.managed_by_staff(staff_id)?;
        self.create_caseload(managers)
    }

    /// Builds the create caseload for a COM's teams.
    ///
    /// `selected_teams` narrows the view to some of `team_codes`; when empty,
    /// every team is shown.
    ///
    /// # Errors
    ///
    /// Returns an error if any upstream system fails.
    pub fn team_create_caseload(
        &self,
        team_codes: &[String],
        selected_teams: &[String],
    ) -> Result<Vec<ComCase>, CoreError> {
        let teams = teams_in_view(team_codes, selected_teams);
        info!(teams = ?teams, "Building team create caseload");
        if teams.is_empty() {
            return Ok(Vec::new());
        }

        let managers = self.sources.probation.managed_by_teams(&teams)?;
        self.create_caseload(managers)
    }

    /// Builds the vary caseload for one COM.
    ///
    /// # Errors
    ///
    /// Returns an error if any upstream system fails.
    pub fn staff_vary_caseload(&self, staff_id: i64) -> Result<Vec<ComCase>, CoreError> {
        info!(staff_id, "Building COM vary caseload");
        let managers = self.sources.probation.managed_by_staff(staff_id)?;
        self.vary_caseload(managers)
    }

    /// Builds the vary caseload for a COM's teams.
    ///
    /// # Errors
    ///
    /// Returns an error if any upstream system fails.
    pub fn team_vary_caseload(
        &self,
        team_codes: &[String],
        selected_teams: &[String],
    ) -> Result<Vec<ComCase>, CoreError> {
        let teams = teams_in_view(team_codes, selected_teams);
        info!(teams = ?teams, "Building team vary caseload");
        if teams.is_empty() {
            return Ok(Vec::new());
        }

        let managers = self.sources.probation.managed_by_teams(&teams)?;
        self.vary_caseload(managers)
    }

    fn create_caseload(&self, managers: Vec<CommunityManager>) -> Result<Vec<ComCase>, CoreError> {
        let noms_ids = managed_offenders(&managers);
        if noms_ids.is_empty() {
            return Ok(Vec::new());
        }

        let prisoners = fetch::prisoners_by_numbers(self.sources.prisoners, &noms_ids)?;
        let licences = self
            .sources
            .licences
            .query(&LicenceQuery::with_statuses(&CREATE_STATUSES).noms_ids(&noms_ids))?;

        debug!(
            managed = noms_ids.len(),
            prisoners = prisoners.len(),
            licences = licences.len(),
            "Fetched COM create records"
        );

        let cases = join_cases(
            licences,
            prisoners,
            managers,
            self.calendar,
            Placeholders::Create,
        );
        let context = EligibilityContext::default();
        let cases = Self::exclude(
            "com_create",
            cases,
            &[
                ExclusionRule::DeadLegalStatus,
                ExclusionRule::HoldsActiveLicence,
                ExclusionRule::IneligibleForCvl,
                ExclusionRule::NoReleaseDate,
            ],
            &context,
        );

        let context = self.hdc_context(&cases, context)?;
        let cases = Self::exclude(
            "com_create",
            cases,
            &[ExclusionRule::ApprovedForHdc, ExclusionRule::HiddenFromCom],
            &context,
        );

        let selected = self.finish_cases(cases, select_licence)?;
        let mut views: Vec<ComCase> = selected
            .iter()
            .map(|case| ComCase::build(case, self.calendar))
            .collect();
        views.sort_by(compare_com);

        info!(cases = views.len(), "Built COM create caseload");
        Ok(views)
    }

    fn vary_caseload(&self, managers: Vec<CommunityManager>) -> Result<Vec<ComCase>, CoreError> {
        let noms_ids = managed_offenders(&managers);
        if noms_ids.is_empty() {
            return Ok(Vec::new());
        }

        let licences = self
            .sources
            .licences
            .query(&LicenceQuery::with_statuses(&VARY_STATUSES).noms_ids(&noms_ids))?;
        let with_licence: Vec<String> = licences.iter().map(|l| l.noms_id.clone()).collect();
        let prisoners = fetch::prisoners_by_numbers(self.sources.prisoners, &with_licence)?;

        let cases = join_cases(
            licences,
            prisoners,
            managers,
            self.calendar,
            Placeholders::Drop,
        );
        let context = EligibilityContext::default();
        let cases = Self::exclude(
            "com_vary",
            cases,
            &[ExclusionRule::DeadLegalStatus],
            &context,
        );

        let context = self.hdc_context(&cases, context)?;
        let cases = Self::exclude(
            "com_vary",
            cases,
            &[ExclusionRule::HiddenFromCom],
            &context,
        );

        let selected = self.finish_cases(cases, select_vary_licence)?;
        let mut views: Vec<ComCase> = selected
            .iter()
            .map(|case| ComCase::build(case, self.calendar))
            .collect();
        views.sort_by(compare_com);

        info!(cases = views.len(), "Built COM vary caseload");
        Ok(views)
    }
}

/// Teams shown: the selected teams the user belongs to, or all of them when
/// none is selected.
fn teams_in_view(team_codes: &[String], selected_teams: &[String]) -> Vec<String> {
    if selected_teams.is_empty() {
        return team_codes.to_vec();
    }

    selected_teams
        .iter()
        .filter(|team| team_codes.contains(team))
        .cloned()
        .collect()
}

fn managed_offenders(managers: &[CommunityManager]) -> Vec<String> {
    managers.iter().filter_map(|m| m.noms_id.clone()).collect()
}
