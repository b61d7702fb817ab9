// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Approver caseloads: licences awaiting approval, and licences approved in
//! the recent past.
//!
//! Practitioners come from the probation system by CRN, in batches, falling
//! back to the username stored on the licence. Only the `DEAD` rule applies.

use crate::error::CoreError;
use crate::fetch;
use crate::join::{Placeholders, join_cases};
use crate::ports::LicenceQuery;
use crate::service::CaseloadService;
use caseload_domain::{
    ApprovalCase, EligibilityContext, ExclusionRule, JoinedCase, LicenceStatus, LicenceSummary,
    compare_approval_needed, compare_recently_approved, select_licence,
    select_most_recently_approved,
};
use tracing::info;

/// Statuses fetched for the recently approved caseload.
pub const RECENTLY_APPROVED_STATUSES: [LicenceStatus; 2] =
    [LicenceStatus::Approved, LicenceStatus::Active];

impl CaseloadService<'_> {
    /// Licences submitted for approval in the given prisons.
    ///
    /// # Errors
    ///
    /// Returns an error if any upstream system fails.
    pub fn approval_needed(&self, prison_codes: &[String]) -> Result<Vec<ApprovalCase>, CoreError> {
        info!(prisons = ?prison_codes, "Building approval needed caseload");
        if prison_codes.is_empty() {
            return Ok(Vec::new());
        }

        let licences = self.sources.licences.query(
            &LicenceQuery::with_statuses(&[LicenceStatus::Submitted]).prison_codes(prison_codes),
        )?;
        let cases = self.approval_cases(licences)?;

        let selected = self.finish_cases(cases, select_licence)?;
        let mut views: Vec<ApprovalCase> = selected
            .iter()
            .map(|case| ApprovalCase::build(case, self.calendar))
            .collect();
        views.sort_by(compare_approval_needed);

        info!(cases = views.len(), "Built approval needed caseload");
        Ok(views)
    }

    /// Licences in the given prisons approved within the recent window.
    ///
    /// # Errors
    ///
    /// Returns an error if any upstream system fails.
    pub fn recently_approved(
        &self,
        prison_codes: &[String],
    ) -> Result<Vec<ApprovalCase>, CoreError> {
        info!(prisons = ?prison_codes, "Building recently approved caseload");
        if prison_codes.is_empty() {
            return Ok(Vec::new());
        }

        let since = self.days_from_today(-self.settings.recently_approved_days)?;
        let licences: Vec<LicenceSummary> = self
            .sources
            .licences
            .query(
                &LicenceQuery::with_statuses(&RECENTLY_APPROVED_STATUSES)
                    .prison_codes(prison_codes),
            )?
            .into_iter()
            .filter(|l| l.approved_date.is_some_and(|d| d >= since))
            .collect();
        let cases = self.approval_cases(licences)?;

        let selected = self.finish_cases(cases, select_most_recently_approved)?;
        let mut views: Vec<ApprovalCase> = selected
            .iter()
            .map(|case| ApprovalCase::build(case, self.calendar))
            .collect();
        views.sort_by(compare_recently_approved);

        info!(cases = views.len(), "Built recently approved caseload");
        Ok(views)
    }

    fn approval_cases(&self, licences: Vec<LicenceSummary>) -> Result<Vec<JoinedCase>, CoreError> {
        if licences.is_empty() {
            return Ok(Vec::new());
        }

        let noms_ids: Vec<String> = licences.iter().map(|l| l.noms_id.clone()).collect();
        let crns: Vec<String> = licences.iter().filter_map(|l| l.crn.clone()).collect();

        let prisoners = fetch::prisoners_by_numbers(self.sources.prisoners, &noms_ids)?;
        let managers = fetch::managers_for_crns(
            self.sources.probation,
            &crns,
            self.settings.probation_batch_size,
        )?;

        let cases = join_cases(
            licences,
            prisoners,
            managers,
            self.calendar,
            Placeholders::Drop,
        );

        Ok(Self::exclude(
            "approver",
            cases,
            &[ExclusionRule::DeadLegalStatus],
            &EligibilityContext::default(),
        ))
    }
}
