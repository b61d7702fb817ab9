// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Variation approver caseloads, by probation delivery unit or by region.

use crate::error::CoreError;
use crate::fetch;
use crate::join::{Placeholders, join_cases};
use crate::ports::LicenceQuery;
use crate::service::CaseloadService;
use caseload_domain::{
    EligibilityContext, ExclusionRule, LicenceStatus, VaryApproverCase, compare_vary_approver,
    filter_by_search, select_vary_licence,
};
use tracing::info;

impl CaseloadService<'_> {
    /// Variations awaiting approval in the given delivery units.
    ///
    /// # Errors
    ///
    /// Returns an error if any upstream system fails.
    pub fn vary_approver_caseload(
        &self,
        pdu_codes: &[String],
        search: Option<&str>,
    ) -> Result<Vec<VaryApproverCase>, CoreError> {
        info!(pdus = ?pdu_codes, "Building vary approver caseload");
        if pdu_codes.is_empty() {
            return Ok(Vec::new());
        }

        let query =
            LicenceQuery::with_statuses(&[LicenceStatus::VariationSubmitted]).pdu_codes(pdu_codes);
        self.vary_approvals(&query, search)
    }

    /// Variations awaiting approval across a probation region.
    ///
    /// # Errors
    ///
    /// Returns an error if any upstream system fails.
    pub fn regional_vary_approver_caseload(
        &self,
        area_code: &str,
        search: Option<&str>,
    ) -> Result<Vec<VaryApproverCase>, CoreError> {
        info!(area = area_code, "Building regional vary approver caseload");

        let query = LicenceQuery::with_statuses(&[LicenceStatus::VariationSubmitted])
            .area_codes(&[area_code.to_string()]);
        self.vary_approvals(&query, search)
    }

    fn vary_approvals(
        &self,
        query: &LicenceQuery,
        search: Option<&str>,
    ) -> Result<Vec<VaryApproverCase>, CoreError> {
        let licences = self.sources.licences.query(query)?;
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
        let cases = Self::exclude(
            "vary_approver",
            cases,
            &[ExclusionRule::DeadLegalStatus],
            &EligibilityContext::default(),
        );

        let selected = self.finish_cases(cases, select_vary_licence)?;
        let views = selected.iter().map(VaryApproverCase::build).collect();

        let mut views = filter_by_search(views, search);
        views.sort_by(compare_vary_approver);

        info!(cases = views.len(), "Built vary approver caseload");
        Ok(views)
    }
}
