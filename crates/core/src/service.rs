// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The caseload service and the stages every role pipeline shares.
//!
//! Each role's caseload lives in its own module as an `impl` block on
//! `CaseloadService`. They all follow the same shape: fetch, join, apply the
//! role's exclusion rules, resolve practitioners, select one licence per
//! offender, then build, search and sort the role's view.

use crate::error::CoreError;
use crate::ports::{HdcStatusSource, LicenceStore, PrisonerDirectory, ProbationDirectory};
use crate::resolve::resolve_pending_usernames;
use crate::settings::CaseloadSettings;
use caseload_domain::{
    DomainError, EligibilityContext, ExclusionRule, JoinedCase, LicenceSummary,
    ReleaseDateCalendar, SelectedCase, SelectedLicence, apply_rules, dedupe_by_offender,
};
use time::{Date, Duration};
use tracing::debug;

/// The upstream systems a caseload is assembled from.
#[derive(Clone, Copy)]
pub struct Sources<'a> {
    /// The licence database.
    pub licences: &'a dyn LicenceStore,
    /// Prisoner search.
    pub prisoners: &'a dyn PrisonerDirectory,
    /// The probation system.
    pub probation: &'a dyn ProbationDirectory,
    /// HDC approval status.
    pub hdc: &'a dyn HdcStatusSource,
}

/// Builds role-specific caseloads.
///
/// Holds no state between calls; building the same caseload twice against
/// unchanged sources gives identical results.
#[derive(Clone, Copy)]
pub struct CaseloadService<'a> {
    pub(crate) sources: Sources<'a>,
    pub(crate) calendar: &'a dyn ReleaseDateCalendar,
    pub(crate) settings: CaseloadSettings,
}

impl<'a> CaseloadService<'a> {
    /// Creates a service over the given sources.
    ///
    /// The calendar fixes "today" for every caseload built by this service.
    #[must_use]
    pub const fn new(
        sources: Sources<'a>,
        calendar: &'a dyn ReleaseDateCalendar,
        settings: CaseloadSettings,
    ) -> Self {
        Self {
            sources,
            calendar,
            settings,
        }
    }

    /// The date caseloads are built for.
    #[must_use]
    pub fn today(&self) -> Date {
        self.calendar.today()
    }

    /// The settings in use.
    #[must_use]
    pub const fn settings(&self) -> &CaseloadSettings {
        &self.settings
    }

    /// `today` plus `days`, failing on overflow.
    pub(crate) fn days_from_today(&self, days: i64) -> Result<Date, CoreError> {
        let today = self.today();
        today.checked_add(Duration::days(days)).ok_or_else(|| {
            CoreError::DomainViolation(DomainError::DateArithmeticOverflow {
                operation: format!("adding {days} days to {today}"),
            })
        })
    }

    /// Applies a rule chain and logs what it excluded.
    pub(crate) fn exclude(
        role: &str,
        cases: Vec<JoinedCase>,
        rules: &[ExclusionRule],
        context: &EligibilityContext,
    ) -> Vec<JoinedCase> {
        let before = cases.len();
        let outcome = apply_rules(cases, rules, context);

        debug!(
            role,
            before,
            kept = outcome.kept.len(),
            excluded = outcome.excluded_count(),
            by_rule = ?outcome.excluded,
            "Applied exclusion rules"
        );

        outcome.kept
    }

    /// HDC status for the surviving cases, fetched only when there are any.
    pub(crate) fn hdc_context(
        &self,
        cases: &[JoinedCase],
        context: EligibilityContext,
    ) -> Result<EligibilityContext, CoreError> {
        if cases.is_empty() {
            return Ok(context);
        }

        let prisoners: Vec<_> = cases.iter().map(|c| c.prisoner.clone()).collect();
        let hdc = self.sources.hdc.status_for(&prisoners)?;

        Ok(EligibilityContext { hdc, ..context })
    }

    /// De-duplicates, resolves pending practitioners and selects one licence
    /// per offender.
    pub(crate) fn finish_cases(
        &self,
        cases: Vec<JoinedCase>,
        select: fn(&[LicenceSummary]) -> Option<SelectedLicence>,
    ) -> Result<Vec<SelectedCase>, CoreError> {
        let cases = dedupe_by_offender(cases);
        let cases = resolve_pending_usernames(
            cases,
            self.sources.probation,
            self.settings.probation_batch_size,
        )?;

        Ok(cases
            .into_iter()
            .filter_map(|case| {
                select(&case.licences).map(|selected| SelectedCase { case, selected })
            })
            .collect())
    }
}
