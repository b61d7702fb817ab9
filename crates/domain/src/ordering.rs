// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Total orderings for each caseload view.
//!
//! Upstream systems return records in no particular order, so every
//! comparator ends in a tiebreak that makes the ordering total: the
//! case-insensitive name, then the offender number, then the licence id.
//! Absent dates sort before present ones in ascending order.

use crate::views::{ApprovalCase, CaCase, ComCase, LastMinuteHandoverCase, VaryApproverCase};
use std::cmp::Ordering;

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Prison view: release date ascending.
#[must_use]
pub fn compare_ca_prison(a: &CaCase, b: &CaCase) -> Ordering {
    a.release_date
        .cmp(&b.release_date)
        .then_with(|| compare_names(&a.name, &b.name))
        .then_with(|| a.prisoner_number.cmp(&b.prisoner_number))
        .then_with(|| a.licence_id.cmp(&b.licence_id))
}

/// Probation view: release date descending.
#[must_use]
pub fn compare_ca_probation(a: &CaCase, b: &CaCase) -> Ordering {
    b.release_date
        .cmp(&a.release_date)
        .then_with(|| compare_names(&a.name, &b.name))
        .then_with(|| a.prisoner_number.cmp(&b.prisoner_number))
        .then_with(|| a.licence_id.cmp(&b.licence_id))
}

/// COM create and vary caseloads: release date ascending.
#[must_use]
pub fn compare_com(a: &ComCase, b: &ComCase) -> Ordering {
    a.release_date
        .cmp(&b.release_date)
        .then_with(|| compare_names(&a.name, &b.name))
        .then_with(|| a.prisoner_number.cmp(&b.prisoner_number))
        .then_with(|| a.licence_id.cmp(&b.licence_id))
}

/// Approvals needed: release date ascending.
#[must_use]
pub fn compare_approval_needed(a: &ApprovalCase, b: &ApprovalCase) -> Ordering {
    a.release_date
        .cmp(&b.release_date)
        .then_with(|| compare_names(&a.name, &b.name))
        .then_with(|| a.licence_id.cmp(&b.licence_id))
}

/// Recently approved: approval date descending.
#[must_use]
pub fn compare_recently_approved(a: &ApprovalCase, b: &ApprovalCase) -> Ordering {
    b.approved_on
        .cmp(&a.approved_on)
        .then_with(|| compare_names(&a.name, &b.name))
        .then_with(|| a.licence_id.cmp(&b.licence_id))
}

/// Variation approvals: release date ascending.
#[must_use]
pub fn compare_vary_approver(a: &VaryApproverCase, b: &VaryApproverCase) -> Ordering {
    a.release_date
        .cmp(&b.release_date)
        .then_with(|| compare_names(&a.name, &b.name))
        .then_with(|| a.licence_id.cmp(&b.licence_id))
}

/// Last-minute handover: release date ascending, then prisoner name.
#[must_use]
pub fn compare_handover(a: &LastMinuteHandoverCase, b: &LastMinuteHandoverCase) -> Ordering {
    a.release_date
        .cmp(&b.release_date)
        .then_with(|| compare_names(&a.prisoner_name, &b.prisoner_name))
        .then_with(|| a.prisoner_number.cmp(&b.prisoner_number))
}
