// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Eligibility and de-duplication rules.
//!
//! Each rule is a pure predicate over a `JoinedCase`: a case matching any rule
//! in a chain is excluded. Rules run in the order the chain lists them, and a
//! case is dropped by the first rule it matches. Pipelines order their chains
//! so that rules needing extra upstream data (HDC status) run last, over the
//! cases that survived the cheap rules.
//!
//! Each caseload keeps its own chain. The chains differ per role and are not
//! unified.

use crate::case::JoinedCase;
use crate::records::HdcStatuses;
use crate::status::LicenceStatus;
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// Upstream facts some rules need beyond the case itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibilityContext {
    /// HDC approval state for the cases under evaluation.
    pub hdc: HdcStatuses,
    /// Offenders known to hold an `ACTIVE` licence.
    pub active_licence_noms: BTreeSet<String>,
}

/// A single exclusion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExclusionRule {
    /// Legal status is `DEAD`.
    DeadLegalStatus,
    /// Neither a conditional release date nor a licence start date exists.
    NoReleaseDate,
    /// A not-started offender fails CVL eligibility.
    IneligibleForCvl,
    /// A not-started placeholder for an offender who already holds an
    /// `ACTIVE` licence.
    ActiveLicencePrecedence,
    /// The offender already holds an `ACTIVE` licence.
    HoldsActiveLicence,
    /// Release date falls outside `[from, to]`.
    OutsideReleaseWindow {
        /// Window start (inclusive).
        from: Date,
        /// Window end (inclusive).
        to: Date,
    },
    /// A not-started offender's release date falls outside `[from, to]`.
    NotStartedOutsideReleaseWindow {
        /// Window start (inclusive).
        from: Date,
        /// Window end (inclusive).
        to: Date,
    },
    /// Eligible for and approved for HDC; the HDC flow handles the licence.
    ApprovedForHdc,
    /// An HDC licence waiting for HDC approval, hidden from CAs.
    HiddenFromCa,
    /// An HDC licence waiting for HDC approval, hidden from COMs.
    HiddenFromCom,
}

impl ExclusionRule {
    /// Short name for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DeadLegalStatus => "dead_legal_status",
            Self::NoReleaseDate => "no_release_date",
            Self::IneligibleForCvl => "ineligible_for_cvl",
            Self::ActiveLicencePrecedence => "active_licence_precedence",
            Self::HoldsActiveLicence => "holds_active_licence",
            Self::OutsideReleaseWindow { .. } => "outside_release_window",
            Self::NotStartedOutsideReleaseWindow { .. } => "not_started_outside_release_window",
            Self::ApprovedForHdc => "approved_for_hdc",
            Self::HiddenFromCa => "hidden_from_ca",
            Self::HiddenFromCom => "hidden_from_com",
        }
    }

    /// Returns true if this rule excludes the case.
    #[must_use]
    pub fn excludes(&self, case: &JoinedCase, context: &EligibilityContext) -> bool {
        match *self {
            Self::DeadLegalStatus => case.prisoner.is_dead(),
            Self::NoReleaseDate => case.release_date_for_rules().is_none(),
            Self::IneligibleForCvl => case.is_not_started() && !case.cvl.is_eligible(),
            Self::ActiveLicencePrecedence => {
                case.is_not_started() && context.active_licence_noms.contains(&case.noms_id)
            }
            Self::HoldsActiveLicence => case
                .licences
                .iter()
                .any(|l| l.status == LicenceStatus::Active),
            Self::OutsideReleaseWindow { from, to } => !within(case.licence_start_date(), from, to),
            Self::NotStartedOutsideReleaseWindow { from, to } => {
                case.is_not_started() && !within(case.cvl.licence_start_date, from, to)
            }
            Self::ApprovedForHdc => {
                case.prisoner.home_detention_curfew_eligibility_date.is_some()
                    && context.hdc.is_approved_for_hdc(case.prisoner.booking_id)
                    && !case.licences.iter().any(|l| l.kind.is_hdc())
            }
            Self::HiddenFromCa => case
                .licences
                .iter()
                .any(|l| !context.hdc.can_be_seen_by_ca(l.kind, case.prisoner.booking_id)),
            Self::HiddenFromCom => case
                .licences
                .iter()
                .any(|l| !context.hdc.can_be_seen_by_com(l.kind, case.prisoner.booking_id)),
        }
    }
}

fn within(date: Option<Date>, from: Date, to: Date) -> bool {
    date.is_some_and(|d| d >= from && d <= to)
}

/// Outcome of applying a rule chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Cases that passed every rule.
    pub kept: Vec<JoinedCase>,
    /// Number of cases dropped by each rule.
    pub excluded: BTreeMap<&'static str, usize>,
}

impl RuleOutcome {
    /// Total number of excluded cases.
    #[must_use]
    pub fn excluded_count(&self) -> usize {
        self.excluded.values().sum()
    }
}

/// Applies a rule chain in order.
#[must_use]
pub fn apply_rules(
    cases: Vec<JoinedCase>,
    rules: &[ExclusionRule],
    context: &EligibilityContext,
) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for case in cases {
        match rules.iter().find(|rule| rule.excludes(&case, context)) {
            Some(rule) => *outcome.excluded.entry(rule.as_str()).or_insert(0) += 1,
            None => outcome.kept.push(case),
        }
    }

    outcome
}

/// Keeps the first case per offender number, preserving input order.
#[must_use]
pub fn dedupe_by_offender(cases: Vec<JoinedCase>) -> Vec<JoinedCase> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    cases
        .into_iter()
        .filter(|case| seen.insert(case.noms_id.clone()))
        .collect()
}
