// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Last-minute handover report.
//!
//! Lists offenders releasing within the next week whose licence will not be
//! approved before the hard stop, so the prison must take over.
//!
//! The report is a staged pipeline. Each stage consumes the previous stage's
//! state and returns the next, so stages can only run in order:
//!
//! 1. `Releasing`: prisoners releasing in `[today, today + window]`
//! 2. `Eligible`: eligible for a licence, not `DEAD`, not approved for HDC
//! 3. `WithLicences`: joined with their licences, one licence selected each
//! 4. `InHardStop`: in the hard-stop period with a licence not yet approved
//! 5. `WithPractitioners`: probation records attached

use crate::error::CoreError;
use crate::fetch;
use crate::join::{Placeholders, join_cases};
use crate::ports::LicenceQuery;
use crate::service::CaseloadService;
use caseload_domain::{
    EligibilityContext, ExclusionRule, JoinedCase, LastMinuteHandoverCase, LicenceStatus,
    PrisonerRecord, ProbationPractitioner, SelectedCase, compare_handover, select_licence,
};
use time::Date;
use tracing::{debug, info};

/// Licence statuses that have not reached approval.
pub const NOT_YET_APPROVED: [LicenceStatus; 3] = [
    LicenceStatus::NotStarted,
    LicenceStatus::InProgress,
    LicenceStatus::Submitted,
];

/// Statuses fetched for the report.
const HANDOVER_STATUSES: [LicenceStatus; 4] = [
    LicenceStatus::InProgress,
    LicenceStatus::Submitted,
    LicenceStatus::Approved,
    LicenceStatus::TimedOut,
];

/// Prisoners releasing within the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Releasing {
    from: Date,
    to: Date,
    prisoners: Vec<PrisonerRecord>,
}

/// Prisoners who may have a licence and are not on the HDC route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Eligible {
    prisoners: Vec<PrisonerRecord>,
    context: EligibilityContext,
}

/// Eligible prisoners with their selected licence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WithLicences {
    cases: Vec<SelectedCase>,
}

/// Cases in the hard-stop period without an approved licence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InHardStop {
    cases: Vec<SelectedCase>,
}

/// Report cases with probation records attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WithPractitioners {
    cases: Vec<SelectedCase>,
}

impl WithPractitioners {
    /// Builds the report rows in release-date order.
    #[must_use]
    pub(crate) fn into_rows(self) -> Vec<LastMinuteHandoverCase> {
        let mut rows: Vec<LastMinuteHandoverCase> =
            self.cases.iter().map(LastMinuteHandoverCase::build).collect();
        rows.sort_by(compare_handover);
        rows
    }
}

impl CaseloadService<'_> {
    /// Builds the last-minute handover report for the given prisons.
    ///
    /// # Errors
    ///
    /// Returns an error if any upstream system fails.
    pub fn last_minute_handover(
        &self,
        prison_codes: &[String],
    ) -> Result<Vec<LastMinuteHandoverCase>, CoreError> {
        info!(prisons = ?prison_codes, "Building last-minute handover report");
        if prison_codes.is_empty() {
            return Ok(Vec::new());
        }

        let releasing = self.releasing(prison_codes)?;
        let eligible = self.eligible(releasing)?;
        let with_licences = self.with_licences(eligible)?;
        let in_hard_stop = self.in_hard_stop(with_licences);
        let with_practitioners = self.with_practitioners(in_hard_stop)?;

        let rows = with_practitioners.into_rows();
        info!(cases = rows.len(), "Built last-minute handover report");
        Ok(rows)
    }

    /// Stage 1.
    ///
    /// # Errors
    ///
    /// Returns an error if prisoner search fails.
    pub(crate) fn releasing(&self, prison_codes: &[String]) -> Result<Releasing, CoreError> {
        let from = self.today();
        let to = self.days_from_today(self.settings.last_minute_window_days)?;
        let prisoners = fetch::prisoners_releasing_between(
            self.sources.prisoners,
            from,
            to,
            prison_codes,
            self.settings.prisoner_page_size,
        )?;

        Ok(Releasing {
            from,
            to,
            prisoners,
        })
    }

    /// Stage 2.
    ///
    /// # Errors
    ///
    /// Returns an error if the HDC lookup fails.
    pub(crate) fn eligible(&self, releasing: Releasing) -> Result<Eligible, CoreError> {
        let cases = self.prisoner_cases(releasing.prisoners);
        let context = EligibilityContext::default();
        let cases = Self::exclude(
            "handover",
            cases,
            &[
                ExclusionRule::DeadLegalStatus,
                ExclusionRule::IneligibleForCvl,
                ExclusionRule::OutsideReleaseWindow {
                    from: releasing.from,
                    to: releasing.to,
                },
            ],
            &context,
        );

        let context = self.hdc_context(&cases, context)?;
        let cases = Self::exclude(
            "handover",
            cases,
            &[ExclusionRule::ApprovedForHdc],
            &context,
        );

        Ok(Eligible {
            prisoners: cases.into_iter().map(|c| c.prisoner).collect(),
            context,
        })
    }

    /// Stage 3.
    ///
    /// # Errors
    ///
    /// Returns an error if the licence store fails.
    pub(crate) fn with_licences(&self, eligible: Eligible) -> Result<WithLicences, CoreError> {
        if eligible.prisoners.is_empty() {
            return Ok(WithLicences { cases: Vec::new() });
        }

        let noms_ids: Vec<String> = eligible
            .prisoners
            .iter()
            .map(|p| p.prisoner_number.clone())
            .collect();
        let licences = self
            .sources
            .licences
            .query(&LicenceQuery::with_statuses(&HANDOVER_STATUSES).noms_ids(&noms_ids))?;

        let cases = join_cases(
            licences,
            eligible.prisoners,
            Vec::new(),
            self.calendar,
            Placeholders::Create,
        );
        let cases = Self::exclude(
            "handover",
            cases,
            &[ExclusionRule::HiddenFromCa],
            &eligible.context,
        );

        let cases = cases
            .into_iter()
            .filter_map(|case| {
                select_licence(&case.licences)
                    .map(|selected| SelectedCase { case, selected })
            })
            .collect();

        Ok(WithLicences { cases })
    }

    /// Stage 4.
    pub(crate) fn in_hard_stop(&self, with_licences: WithLicences) -> InHardStop {
        let before = with_licences.cases.len();
        let cases: Vec<SelectedCase> = with_licences
            .cases
            .into_iter()
            .filter(|case| {
                NOT_YET_APPROVED.contains(&case.licence().status)
                    && case
                        .release_date()
                        .is_some_and(|d| self.calendar.is_in_hard_stop_period(d))
            })
            .collect();

        debug!(before, kept = cases.len(), "Kept cases in hard-stop period");
        InHardStop { cases }
    }

    /// Stage 5.
    ///
    /// # Errors
    ///
    /// Returns an error if the probation system fails.
    pub(crate) fn with_practitioners(
        &self,
        in_hard_stop: InHardStop,
    ) -> Result<WithPractitioners, CoreError> {
        let noms_ids: Vec<String> = in_hard_stop
            .cases
            .iter()
            .map(|c| c.case.noms_id.clone())
            .collect();
        let managers = fetch::managers_for_noms(
            self.sources.probation,
            &noms_ids,
            self.settings.probation_batch_size,
        )?;

        let cases = in_hard_stop
            .cases
            .into_iter()
            .map(|mut selected| {
                let manager = managers
                    .iter()
                    .find(|m| m.noms_id.as_deref() == Some(selected.case.noms_id.as_str()))
                    .cloned();
                selected.case.practitioner =
                    ProbationPractitioner::from_sources(manager.as_ref(), None);
                if selected.case.crn.is_none() {
                    selected.case.crn = manager.as_ref().map(|m| m.crn.clone());
                }
                selected.case.manager = manager;
                selected
            })
            .collect();

        Ok(WithPractitioners { cases })
    }

    fn prisoner_cases(&self, prisoners: Vec<PrisonerRecord>) -> Vec<JoinedCase> {
        join_cases(
            Vec::new(),
            prisoners,
            Vec::new(),
            self.calendar,
            Placeholders::Create,
        )
    }
}
