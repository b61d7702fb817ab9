// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Licence inserts.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::collections::HashMap;
use tracing::debug;

use crate::data_models::NewLicenceRow;
use crate::diesel_schema::licences;
use crate::error::PersistenceError;
use caseload_domain::LicenceSummary;

/// Inserts one licence and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails, including a `version_of` that names
/// no stored licence.
pub fn insert_licence(
    conn: &mut SqliteConnection,
    licence: &LicenceSummary,
) -> Result<i64, PersistenceError> {
    let row = NewLicenceRow::from(licence);
    let licence_id: i64 = diesel::insert_into(licences::table)
        .values(&row)
        .returning(licences::licence_id)
        .get_result(conn)?;

    debug!(licence_id, noms_id = %licence.noms_id, "Inserted licence");
    Ok(licence_id)
}

/// Inserts licences in one transaction and returns their ids in input order.
///
/// A licence is written after the licence it is a version of when both are in
/// the batch. Nothing is written if any insert fails.
///
/// # Errors
///
/// Returns the first insert failure.
pub fn insert_licences(
    conn: &mut SqliteConnection,
    licences: &[LicenceSummary],
) -> Result<Vec<i64>, PersistenceError> {
    conn.transaction(|conn| {
        let mut ids = vec![0; licences.len()];
        for index in insertion_order(licences) {
            ids[index] = insert_licence(conn, &licences[index])?;
        }
        Ok(ids)
    })
}

/// Batch positions ordered so each predecessor precedes its new versions.
fn insertion_order(licences: &[LicenceSummary]) -> Vec<usize> {
    let positions: HashMap<i64, usize> = licences
        .iter()
        .enumerate()
        .filter_map(|(index, licence)| licence.licence_id.map(|id| (id, index)))
        .collect();

    let mut placed = vec![false; licences.len()];
    let mut order = Vec::with_capacity(licences.len());
    for index in 0..licences.len() {
        place(index, licences, &positions, &mut placed, &mut order);
    }
    order
}

fn place(
    index: usize,
    licences: &[LicenceSummary],
    positions: &HashMap<i64, usize>,
    placed: &mut [bool],
    order: &mut Vec<usize>,
) {
    // Marked before recursing so a version_of cycle terminates.
    if placed[index] {
        return;
    }
    placed[index] = true;

    if let Some(&predecessor) = licences[index]
        .version_of
        .and_then(|id| positions.get(&id))
    {
        place(predecessor, licences, positions, placed, order);
    }
    order.push(index);
}
