// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batching and paging over the collaborator interfaces.
//!
//! The probation system limits request sizes, so large CRN, offender-number
//! and username lists are split into batches. Prisoner search pages its
//! release-window results. Calls run one after another; the first failure
//! aborts the fetch.

use crate::error::SourceError;
use crate::ports::{PrisonerDirectory, ProbationDirectory};
use caseload_domain::{CommunityManager, PrisonerRecord, StaffNameRecord};
use std::collections::BTreeSet;
use time::Date;
use tracing::debug;

/// Fetches managers for CRNs in batches.
///
/// # Errors
///
/// Returns the first batch failure.
pub fn managers_for_crns(
    probation: &dyn ProbationDirectory,
    crns: &[String],
    batch_size: usize,
) -> Result<Vec<CommunityManager>, SourceError> {
    batched(&unique(crns), batch_size, |batch| {
        probation.managers_for_crns(batch)
    })
}

/// Fetches managers for offender numbers in batches.
///
/// # Errors
///
/// Returns the first batch failure.
pub fn managers_for_noms(
    probation: &dyn ProbationDirectory,
    noms_ids: &[String],
    batch_size: usize,
) -> Result<Vec<CommunityManager>, SourceError> {
    batched(&unique(noms_ids), batch_size, |batch| {
        probation.managers_for_noms(batch)
    })
}

/// Looks up staff by username in batches.
///
/// # Errors
///
/// Returns the first batch failure.
pub fn staff_by_username(
    probation: &dyn ProbationDirectory,
    usernames: &[String],
    batch_size: usize,
) -> Result<Vec<StaffNameRecord>, SourceError> {
    batched(&unique(usernames), batch_size, |batch| {
        probation.staff_by_username(batch)
    })
}

/// Fetches prisoner records for offender numbers, skipping the call when
/// there is nothing to look up.
///
/// # Errors
///
/// Returns an error if prisoner search fails.
pub fn prisoners_by_numbers(
    prisoners: &dyn PrisonerDirectory,
    numbers: &[String],
) -> Result<Vec<PrisonerRecord>, SourceError> {
    let numbers = unique(numbers);
    if numbers.is_empty() {
        return Ok(Vec::new());
    }
    prisoners.by_numbers(&numbers)
}

/// Fetches every page of prisoners releasing in `[from, to]`.
///
/// # Errors
///
/// Returns the first page failure.
pub fn prisoners_releasing_between(
    prisoners: &dyn PrisonerDirectory,
    from: Date,
    to: Date,
    prison_codes: &[String],
    page_size: usize,
) -> Result<Vec<PrisonerRecord>, SourceError> {
    let mut records = Vec::new();
    let mut page_number = 0;

    loop {
        let page =
            prisoners.by_release_date_window(from, to, prison_codes, page_number, page_size)?;
        let is_last = page.is_last() || page.content.is_empty();
        records.extend(page.content);

        if is_last {
            break;
        }
        page_number += 1;
    }

    debug!(
        from = %from,
        to = %to,
        pages = page_number + 1,
        prisoners = records.len(),
        "Fetched prisoners in release window"
    );

    Ok(records)
}

fn batched<T>(
    keys: &[String],
    batch_size: usize,
    mut fetch: impl FnMut(&[String]) -> Result<Vec<T>, SourceError>,
) -> Result<Vec<T>, SourceError> {
    let mut results = Vec::new();

    for batch in keys.chunks(batch_size.max(1)) {
        results.extend(fetch(batch)?);
    }

    Ok(results)
}

/// De-duplicated, non-blank keys in sorted order.
fn unique(keys: &[String]) -> Vec<String> {
    keys.iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
