// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod query_tests;
mod store_tests;

use caseload_domain::{LicenceKind, LicenceStatus, LicenceSummary};
use time::macros::date;

pub fn create_test_licence(
    id: Option<i64>,
    status: LicenceStatus,
    noms_id: &str,
) -> LicenceSummary {
    let mut licence = LicenceSummary::new(id, LicenceKind::Crd, status, noms_id);
    licence.crn = Some(format!("X{noms_id}"));
    licence.booking_id = Some(1000);
    licence.forename = Some(String::from("BOB"));
    licence.surname = Some(String::from("SMITH"));
    licence.prison_code = Some(String::from("MDI"));
    licence.prison_description = Some(String::from("Moorland (HMP)"));
    licence.probation_pdu_code = Some(String::from("PDU1"));
    licence.probation_area_code = Some(String::from("N01"));
    licence.probation_team_code = Some(String::from("TEAM1"));
    licence.responsible_com_staff_id = Some(3000);
    licence.licence_start_date = Some(date!(2024 - 03 - 14));
    licence.conditional_release_date = Some(date!(2024 - 03 - 14));
    licence
}
