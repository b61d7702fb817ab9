// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Licence queries.

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use tracing::debug;

use crate::data_models::LicenceRow;
use crate::diesel_schema::licences;
use crate::error::PersistenceError;
use caseload::LicenceQuery;
use caseload_domain::{LicenceStatus, LicenceSummary};

/// Loads every licence matching `criteria`, in licence id order.
///
/// A query that can match nothing returns without touching the database.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be read back.
pub fn query_licences(
    conn: &mut SqliteConnection,
    criteria: &LicenceQuery,
) -> Result<Vec<LicenceSummary>, PersistenceError> {
    if criteria.selects_nothing() {
        debug!("Licence query selects nothing; skipping");
        return Ok(Vec::new());
    }

    let statuses: Vec<&str> = criteria
        .statuses
        .iter()
        .map(LicenceStatus::as_str)
        .collect();

    let mut query = licences::table
        .select(LicenceRow::as_select())
        .filter(licences::status.eq_any(statuses))
        .into_boxed::<Sqlite>();

    if let Some(codes) = &criteria.prison_codes {
        query = query.filter(licences::prison_code.eq_any(codes.clone()));
    }
    if let Some(ids) = &criteria.staff_ids {
        query = query.filter(licences::responsible_com_staff_id.eq_any(ids.clone()));
    }
    if let Some(crns) = &criteria.crns {
        query = query.filter(licences::crn.eq_any(crns.clone()));
    }
    if let Some(noms_ids) = &criteria.noms_ids {
        query = query.filter(licences::noms_id.eq_any(noms_ids.clone()));
    }
    if let Some(codes) = &criteria.pdu_codes {
        query = query.filter(licences::probation_pdu_code.eq_any(codes.clone()));
    }
    if let Some(codes) = &criteria.area_codes {
        query = query.filter(licences::probation_area_code.eq_any(codes.clone()));
    }
    if let Some(codes) = &criteria.team_codes {
        query = query.filter(licences::probation_team_code.eq_any(codes.clone()));
    }

    let rows: Vec<LicenceRow> = query.order(licences::licence_id.asc()).load(conn)?;
    debug!(rows = rows.len(), "Loaded licences");

    rows.into_iter().map(LicenceRow::into_summary).collect()
}

/// Loads one licence by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be read back.
pub fn find_licence_by_id(
    conn: &mut SqliteConnection,
    licence_id: i64,
) -> Result<Option<LicenceSummary>, PersistenceError> {
    licences::table
        .find(licence_id)
        .select(LicenceRow::as_select())
        .first(conn)
        .optional()?
        .map(LicenceRow::into_summary)
        .transpose()
}

/// Counts stored licences.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_licences(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(licences::table.count().get_result(conn)?)
}
