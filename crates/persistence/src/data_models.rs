// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types for the `licences` table.
//!
//! Dates are stored as `YYYY-MM-DD` text and statuses and kinds as their
//! `SCREAMING_SNAKE_CASE` names, so the table stays readable from the
//! `sqlite3` shell.

use diesel::prelude::*;

use crate::diesel_schema::licences;
use crate::error::PersistenceError;
use caseload_domain::{
    DomainError, LicenceKind, LicenceStatus, LicenceSummary, format_iso_date,
    parse_optional_iso_date,
};
use std::str::FromStr;
use time::Date;

/// A stored licence.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = licences)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LicenceRow {
    licence_id: i64,
    kind: String,
    status: String,
    noms_id: String,
    crn: Option<String>,
    booking_id: Option<i64>,
    forename: Option<String>,
    surname: Option<String>,
    date_of_birth: Option<String>,
    prison_code: Option<String>,
    prison_description: Option<String>,
    responsible_com_username: Option<String>,
    responsible_com_staff_id: Option<i64>,
    probation_pdu_code: Option<String>,
    probation_area_code: Option<String>,
    probation_team_code: Option<String>,
    licence_start_date: Option<String>,
    conditional_release_date: Option<String>,
    actual_release_date: Option<String>,
    post_recall_release_date: Option<String>,
    home_detention_curfew_actual_date: Option<String>,
    licence_expiry_date: Option<String>,
    topup_supervision_expiry_date: Option<String>,
    version_of: Option<i64>,
    is_review_needed: i32,
    approved_date: Option<String>,
    approved_by_name: Option<String>,
    submitted_date: Option<String>,
    submitted_by_full_name: Option<String>,
    variation_request_date: Option<String>,
    updated_by_full_name: Option<String>,
}

impl LicenceRow {
    /// Converts the row into a licence summary.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidRecord` if a status, kind or date
    /// column holds a value the domain does not recognise.
    pub fn into_summary(self) -> Result<LicenceSummary, PersistenceError> {
        let licence_id = self.licence_id;
        self.try_into_summary()
            .map_err(|source| PersistenceError::InvalidRecord { licence_id, source })
    }

    fn try_into_summary(self) -> Result<LicenceSummary, DomainError> {
        let date = |value: Option<String>| parse_optional_iso_date(value.as_deref());

        Ok(LicenceSummary {
            licence_id: Some(self.licence_id),
            kind: LicenceKind::from_str(&self.kind)?,
            status: LicenceStatus::from_str(&self.status)?,
            noms_id: self.noms_id,
            crn: self.crn,
            booking_id: self.booking_id,
            forename: self.forename,
            surname: self.surname,
            date_of_birth: date(self.date_of_birth)?,
            prison_code: self.prison_code,
            prison_description: self.prison_description,
            responsible_com_username: self.responsible_com_username,
            responsible_com_staff_id: self.responsible_com_staff_id,
            probation_pdu_code: self.probation_pdu_code,
            probation_area_code: self.probation_area_code,
            probation_team_code: self.probation_team_code,
            licence_start_date: date(self.licence_start_date)?,
            conditional_release_date: date(self.conditional_release_date)?,
            actual_release_date: date(self.actual_release_date)?,
            post_recall_release_date: date(self.post_recall_release_date)?,
            home_detention_curfew_actual_date: date(self.home_detention_curfew_actual_date)?,
            licence_expiry_date: date(self.licence_expiry_date)?,
            topup_supervision_expiry_date: date(self.topup_supervision_expiry_date)?,
            version_of: self.version_of,
            is_review_needed: self.is_review_needed != 0,
            approved_date: date(self.approved_date)?,
            approved_by_name: self.approved_by_name,
            submitted_date: date(self.submitted_date)?,
            submitted_by_full_name: self.submitted_by_full_name,
            variation_request_date: date(self.variation_request_date)?,
            updated_by_full_name: self.updated_by_full_name,
        })
    }
}

/// A licence to insert. A missing `licence_id` lets the database assign one.
#[derive(Debug, Insertable)]
#[diesel(table_name = licences)]
pub struct NewLicenceRow {
    licence_id: Option<i64>,
    kind: String,
    status: String,
    noms_id: String,
    crn: Option<String>,
    booking_id: Option<i64>,
    forename: Option<String>,
    surname: Option<String>,
    date_of_birth: Option<String>,
    prison_code: Option<String>,
    prison_description: Option<String>,
    responsible_com_username: Option<String>,
    responsible_com_staff_id: Option<i64>,
    probation_pdu_code: Option<String>,
    probation_area_code: Option<String>,
    probation_team_code: Option<String>,
    licence_start_date: Option<String>,
    conditional_release_date: Option<String>,
    actual_release_date: Option<String>,
    post_recall_release_date: Option<String>,
    home_detention_curfew_actual_date: Option<String>,
    licence_expiry_date: Option<String>,
    topup_supervision_expiry_date: Option<String>,
    version_of: Option<i64>,
    is_review_needed: i32,
    approved_date: Option<String>,
    approved_by_name: Option<String>,
    submitted_date: Option<String>,
    submitted_by_full_name: Option<String>,
    variation_request_date: Option<String>,
    updated_by_full_name: Option<String>,
}

fn text(date: Option<Date>) -> Option<String> {
    date.map(format_iso_date)
}

impl From<&LicenceSummary> for NewLicenceRow {
    fn from(licence: &LicenceSummary) -> Self {
        Self {
            licence_id: licence.licence_id,
            kind: licence.kind.as_str().to_string(),
            status: licence.status.as_str().to_string(),
            noms_id: licence.noms_id.clone(),
            crn: licence.crn.clone(),
            booking_id: licence.booking_id,
            forename: licence.forename.clone(),
            surname: licence.surname.clone(),
            date_of_birth: text(licence.date_of_birth),
            prison_code: licence.prison_code.clone(),
            prison_description: licence.prison_description.clone(),
            responsible_com_username: licence.responsible_com_username.clone(),
            responsible_com_staff_id: licence.responsible_com_staff_id,
            probation_pdu_code: licence.probation_pdu_code.clone(),
            probation_area_code: licence.probation_area_code.clone(),
            probation_team_code: licence.probation_team_code.clone(),
            licence_start_date: text(licence.licence_start_date),
            conditional_release_date: text(licence.conditional_release_date),
            actual_release_date: text(licence.actual_release_date),
            post_recall_release_date: text(licence.post_recall_release_date),
            home_detention_curfew_actual_date: text(licence.home_detention_curfew_actual_date),
            licence_expiry_date: text(licence.licence_expiry_date),
            topup_supervision_expiry_date: text(licence.topup_supervision_expiry_date),
            version_of: licence.version_of,
            is_review_needed: i32::from(licence.is_review_needed),
            approved_date: text(licence.approved_date),
            approved_by_name: licence.approved_by_name.clone(),
            submitted_date: text(licence.submitted_date),
            submitted_by_full_name: licence.submitted_by_full_name.clone(),
            variation_request_date: text(licence.variation_request_date),
            updated_by_full_name: licence.updated_by_full_name.clone(),
        }
    }
}
