// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case administrator caseloads.
//!
//! ## Prison view
//!
//! Licences being prepared in the CA's prisons, plus not-started cases for
//! prisoners releasing within the rolling window. Rules, in order:
//!
//! 1. Legal status `DEAD`
//! 2. No release date
//! 3. Not-started case releasing outside the window
//! 4. Not-started case for an offender who already holds an `ACTIVE` licence
//! 5. Approved for HDC (needs the HDC lookup)
//! 6. HDC licence not yet visible to CAs
//!
//! ## Probation view
//!
//! Licences for offenders already released from the CA's prisons. Only the
//! `DEAD` rule applies.

use crate::error::CoreError;
use crate::fetch;
use crate::join::{Placeholders, join_cases};
use crate::ports::LicenceQuery;
use crate::service::CaseloadService;
use caseload_domain::{
    CaCase, CaViewCasesTab, EligibilityContext, ExclusionRule, JoinedCase, LicenceStatus,
    compare_ca_prison, compare_ca_probation, determine_ca_tab, filter_by_search, select_licence,
    select_vary_licence,
};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Statuses shown on the prison view.
pub const PRISON_VIEW_STATUSES: [LicenceStatus; 4] = [
    LicenceStatus::InProgress,
    LicenceStatus::Submitted,
    LicenceStatus::Approved,
    LicenceStatus::TimedOut,
];

/// Statuses shown on the probation view.
pub const PROBATION_VIEW_STATUSES: [LicenceStatus; 5] = [
    LicenceStatus::Active,
    LicenceStatus::VariationInProgress,
    LicenceStatus::VariationSubmitted,
    LicenceStatus::VariationApproved,
    LicenceStatus::VariationRejected,
];

impl CaseloadService<'_> {
    /// Builds the CA prison view for the given prisons.
    ///
    /// # Errors
    ///
    /// Returns an error if any upstream system fails.
    pub fn prison_omu_caseload(
        &self,
        prison_codes: &[String],
        search: Option<&str>,
    ) -> Result<Vec<CaCase>, CoreError> {
        info!(prisons = ?prison_codes, "Building CA prison caseload");
        if prison_codes.is_empty() {
            return Ok(Vec::new());
        }

        let from = self.today();
        let to = self.days_from_today(self.settings.ca_release_window_weeks * 7)?;

        let licences = self
            .sources
            .licences
            .query(&LicenceQuery::with_statuses(&PRISON_VIEW_STATUSES).prison_codes(prison_codes))?;

        let mut prisoners = fetch::prisoners_releasing_between(
            self.sources.prisoners,
            from,
            to,
            prison_codes,
            self.settings.prisoner_page_size,
        )?;
        let releasing: BTreeSet<String> = prisoners
            .iter()
            .map(|p| p.prisoner_number.clone())
            .collect();
        let missing: Vec<String> = licences
            .iter()
            .map(|l| l.noms_id.clone())
            .filter(|noms_id| !releasing.contains(noms_id))
            .collect();
        prisoners.extend(fetch::prisoners_by_numbers(self.sources.prisoners, &missing)?);

        let noms_ids: Vec<String> = prisoners
            .iter()
            .map(|p| p.prisoner_number.clone())
            .collect();
        let managers = fetch::managers_for_noms(
            self.sources.probation,
            &noms_ids,
            self.settings.probation_batch_size,
        )?;

        debug!(
            licences = licences.len(),
            prisoners = prisoners.len(),
            managers = managers.len(),
            "Fetched CA prison records"
        );

        let cases = join_cases(
            licences,
            prisoners,
            managers,
            self.calendar,
            Placeholders::Create,
        );

        let context = EligibilityContext {
            active_licence_noms: self.offenders_with_active_licences(&cases)?,
            ..EligibilityContext::default()
        };
        let cases = Self::exclude(
            "ca_prison",
            cases,
            &[
                ExclusionRule::DeadLegalStatus,
                ExclusionRule::NoReleaseDate,
                ExclusionRule::NotStartedOutsideReleaseWindow { from, to },
                ExclusionRule::ActiveLicencePrecedence,
            ],
            &context,
        );

        let context = self.hdc_context(&cases, context)?;
        let cases = Self::exclude(
            "ca_prison",
            cases,
            &[ExclusionRule::ApprovedForHdc, ExclusionRule::HiddenFromCa],
            &context,
        );

        let selected = self.finish_cases(cases, select_licence)?;
        let views = selected
            .iter()
            .map(|case| {
                CaCase::build(
                    case,
                    determine_ca_tab(case, self.calendar),
                    self.calendar,
                )
            })
            .collect();

        let mut views = filter_by_search(views, search);
        views.sort_by(compare_ca_prison);

        info!(cases = views.len(), "Built CA prison caseload");
        Ok(views)
    }

    /// Builds the CA probation view for the given prisons.
    ///
    /// # Errors
    ///
    /// Returns an error if any upstream system fails.
    pub fn probation_omu_caseload(
        &self,
        prison_codes: &[String],
        search: Option<&str>,
    ) -> Result<Vec<CaCase>, CoreError> {
        info!(prisons = ?prison_codes, "Building CA probation caseload");
        if prison_codes.is_empty() {
            return Ok(Vec::new());
        }

        let licences = self.sources.licences.query(
            &LicenceQuery::with_statuses(&PROBATION_VIEW_STATUSES).prison_codes(prison_codes),
        )?;
        let noms_ids: Vec<String> = licences.iter().map(|l| l.noms_id.clone()).collect();
        let prisoners = fetch::prisoners_by_numbers(self.sources.prisoners, &noms_ids)?;
        let managers = fetch::managers_for_noms(
            self.sources.probation,
            &noms_ids,
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
            "ca_probation",
            cases,
            &[ExclusionRule::DeadLegalStatus],
            &EligibilityContext::default(),
        );

        let selected = self.finish_cases(cases, select_vary_licence)?;
        let views = selected
            .iter()
            .map(|case| CaCase::build(case, CaViewCasesTab::FutureReleases, self.calendar))
            .collect();

        let mut views = filter_by_search(views, search);
        views.sort_by(compare_ca_probation);

        info!(cases = views.len(), "Built CA probation caseload");
        Ok(views)
    }

    /// Offenders among the not-started cases who already hold an `ACTIVE`
    /// licence.
    fn offenders_with_active_licences(
        &self,
        cases: &[JoinedCase],
    ) -> Result<BTreeSet<String>, CoreError> {
        let not_started: Vec<String> = cases
            .iter()
            .filter(|c| c.is_not_started())
            .map(|c| c.noms_id.clone())
            .collect();

        if not_started.is_empty() {
            return Ok(BTreeSet::new());
        }

        let active = self.sources.licences.query(
            &LicenceQuery::with_statuses(&[LicenceStatus::Active]).noms_ids(&not_started),
        )?;

        Ok(active.into_iter().map(|l| l.noms_id).collect())
    }
}
