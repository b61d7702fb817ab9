// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Second-pass practitioner resolution.
//!
//! After the join, some cases only know the practitioner's username. Those
//! usernames are collected and resolved in one batched probation lookup, and
//! every match replaces the pending state with the staff code and name.

use crate::error::SourceError;
use crate::fetch;
use crate::ports::ProbationDirectory;
use caseload_domain::{JoinedCase, index_staff_by_username};
use tracing::debug;

/// Resolves pending practitioner usernames against the probation system.
///
/// No call is made when no case is pending.
///
/// # Errors
///
/// Returns an error if the probation lookup fails.
pub fn resolve_pending_usernames(
    cases: Vec<JoinedCase>,
    probation: &dyn ProbationDirectory,
    batch_size: usize,
) -> Result<Vec<JoinedCase>, SourceError> {
    let usernames: Vec<String> = cases
        .iter()
        .filter_map(|case| case.practitioner.pending_username())
        .map(str::to_string)
        .collect();

    if usernames.is_empty() {
        return Ok(cases);
    }

    let staff = fetch::staff_by_username(probation, &usernames, batch_size)?;
    debug!(
        pending = usernames.len(),
        resolved = staff.len(),
        "Resolved practitioner usernames"
    );

    let index = index_staff_by_username(staff);

    Ok(cases
        .into_iter()
        .map(|mut case| {
            case.practitioner = case.practitioner.resolve_username(&index);
            case
        })
        .collect())
}
