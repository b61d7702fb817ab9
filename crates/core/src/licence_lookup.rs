// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Single-licence lookups and the creation guard.

use crate::error::CoreError;
use crate::ports::{LicenceQuery, LicenceStore};
use caseload_domain::{LicenceKind, LicenceStatus, LicenceSummary};
use tracing::debug;

/// Statuses that block creating another licence for the same offender.
pub const BLOCKING_STATUSES: [LicenceStatus; 2] =
    [LicenceStatus::InProgress, LicenceStatus::Submitted];

/// Returns a licence by id.
///
/// # Errors
///
/// Returns `CoreError::LicenceNotFound` if no such licence exists, or the
/// store's error if the lookup fails.
pub fn find_licence(store: &dyn LicenceStore, licence_id: i64) -> Result<LicenceSummary, CoreError> {
    store
        .find_by_id(licence_id)?
        .ok_or(CoreError::LicenceNotFound { licence_id })
}

/// Checks that a new licence of `kind` may be created for an offender.
///
/// # Errors
///
/// Returns `CoreError::InvalidCombination` if the offender already has a
/// licence in progress or awaiting approval, or the store's error if the
/// lookup fails.
pub fn ensure_can_create_licence(
    store: &dyn LicenceStore,
    noms_id: &str,
    kind: LicenceKind,
) -> Result<(), CoreError> {
    let existing = store.query(
        &LicenceQuery::with_statuses(&BLOCKING_STATUSES).noms_ids(&[noms_id.to_string()]),
    )?;

    match existing
        .iter()
        .filter_map(|l| l.licence_id.map(|id| (id, l.status)))
        .min_by_key(|(id, _)| *id)
    {
        Some((existing_licence_id, existing_status)) => {
            debug!(
                noms_id,
                existing_licence_id,
                requested = kind.as_str(),
                "Rejected licence creation"
            );
            Err(CoreError::InvalidCombination {
                noms_id: noms_id.to_string(),
                requested: kind,
                existing_licence_id,
                existing_status,
            })
        }
        None => Ok(()),
    }
}
