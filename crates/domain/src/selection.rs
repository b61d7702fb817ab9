// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Licence selection policy.
//!
//! An offender may hold several licences at once: a superseded approved
//! version, a hard-stop licence created by the prison, a timed-out edit, an
//! in-progress variation. Exactly one is displayed.
//!
//! ## Precedence (highest first)
//!
//! 1. A single licence is used as-is
//! 2. A `HARD_STOP` licence
//! 3. A `TIMED_OUT` licence; when it is a new version of an `APPROVED`
//!    licence, the approved predecessor is shown relabelled `TIMED_OUT`
//! 4. The first licence that is not `APPROVED`, else the first licence
//!
//! ## Invariants
//!
//! - Input order never affects the result: candidates are ordered by licence
//!   id (placeholders first) before any rule is applied
//! - Every rule lives here; pipelines never re-implement precedence

use crate::licence::LicenceSummary;
use crate::status::{LicenceKind, LicenceStatus};
use serde::{Deserialize, Serialize};

/// How the displayed licence came to be, from the viewer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenceCreationType {
    /// No licence record exists yet.
    LicenceNotStarted,
    /// A licence is being prepared by the COM.
    LicenceInProgress,
    /// The prison must create this licence.
    PrisonWillCreateThisLicence,
    /// The prison has created this licence.
    LicenceCreatedByPrison,
    /// A new version was not approved before the hard stop.
    LicenceChangesNotApprovedInTime,
}

/// The licence chosen for display and how it was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedLicence {
    /// The licence to display; its status may be relabelled.
    pub licence: LicenceSummary,
    /// Creation type shown alongside the licence.
    pub creation_type: LicenceCreationType,
}

/// Selects the single licence to display for one offender.
///
/// Returns `None` only for an empty input.
#[must_use]
pub fn select_licence(licences: &[LicenceSummary]) -> Option<SelectedLicence> {
    let candidates = ordered_candidates(licences);

    match candidates.as_slice() {
        [] => None,
        [only] => Some(SelectedLicence {
            licence: (*only).clone(),
            creation_type: creation_type_for(only),
        }),
        _ => Some(select_from_many(&candidates)),
    }
}

fn select_from_many(candidates: &[&LicenceSummary]) -> SelectedLicence {
    if let Some(hard_stop) = candidates.iter().find(|l| l.kind == LicenceKind::HardStop) {
        return SelectedLicence {
            licence: (*hard_stop).clone(),
            creation_type: hard_stop_creation_type(hard_stop),
        };
    }

    if let Some(timed_out) = candidates
        .iter()
        .find(|l| l.status == LicenceStatus::TimedOut)
    {
        let approved_predecessor = timed_out.version_of.and_then(|previous_id| {
            candidates
                .iter()
                .find(|l| l.licence_id == Some(previous_id) && l.status == LicenceStatus::Approved)
        });

        return match approved_predecessor {
            Some(previous) => SelectedLicence {
                licence: LicenceSummary {
                    status: LicenceStatus::TimedOut,
                    ..(*previous).clone()
                },
                creation_type: LicenceCreationType::LicenceChangesNotApprovedInTime,
            },
            None => SelectedLicence {
                licence: (*timed_out).clone(),
                creation_type: LicenceCreationType::PrisonWillCreateThisLicence,
            },
        };
    }

    // Candidates has at least two entries here.
    let chosen = candidates
        .iter()
        .find(|l| l.status != LicenceStatus::Approved)
        .unwrap_or(&candidates[0]);

    SelectedLicence {
        licence: (*chosen).clone(),
        creation_type: creation_type_for(chosen),
    }
}

/// Creation type for a licence shown on its own.
#[must_use]
pub fn creation_type_for(licence: &LicenceSummary) -> LicenceCreationType {
    match (licence.kind, licence.status) {
        (LicenceKind::HardStop, _) => hard_stop_creation_type(licence),
        (_, LicenceStatus::TimedOut) => LicenceCreationType::PrisonWillCreateThisLicence,
        _ if licence.licence_id.is_none() => LicenceCreationType::LicenceNotStarted,
        _ => LicenceCreationType::LicenceInProgress,
    }
}

fn hard_stop_creation_type(licence: &LicenceSummary) -> LicenceCreationType {
    if licence.licence_id.is_none() || licence.status == LicenceStatus::InProgress {
        LicenceCreationType::PrisonWillCreateThisLicence
    } else {
        LicenceCreationType::LicenceCreatedByPrison
    }
}

/// Selects the licence a COM varies: a variation in flight wins over the
/// active licence it varies.
#[must_use]
pub fn select_vary_licence(licences: &[LicenceSummary]) -> Option<SelectedLicence> {
    let candidates = ordered_candidates(licences);

    candidates
        .iter()
        .find(|l| l.status.is_variation())
        .or_else(|| candidates.first())
        .map(|l| SelectedLicence {
            licence: (*l).clone(),
            creation_type: creation_type_for(l),
        })
}

/// Selects the most recently approved licence, breaking ties by licence id.
#[must_use]
pub fn select_most_recently_approved(licences: &[LicenceSummary]) -> Option<SelectedLicence> {
    licences
        .iter()
        .max_by(|a, b| {
            a.approved_date
                .cmp(&b.approved_date)
                .then_with(|| a.licence_id.cmp(&b.licence_id))
        })
        .map(|l| SelectedLicence {
            licence: l.clone(),
            creation_type: creation_type_for(l),
        })
}

fn ordered_candidates(licences: &[LicenceSummary]) -> Vec<&LicenceSummary> {
    let mut candidates: Vec<&LicenceSummary> = licences.iter().collect();
    candidates.sort_by_key(|l| l.licence_id);
    candidates
}
