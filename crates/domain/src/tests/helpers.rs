// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CvlRecord, JoinedCase, LicenceKind, LicenceStatus, LicenceSummary, PrisonerRecord,
    ProbationPractitioner, SelectedCase, WorkingDayCalendar, select_licence,
};
use time::Date;
use time::macros::date;

/// Thursday 7 March 2024.
pub const TODAY: Date = date!(2024 - 03 - 07);

pub fn create_test_calendar() -> WorkingDayCalendar {
    WorkingDayCalendar::without_bank_holidays(TODAY)
}

pub fn create_test_licence(
    id: i64,
    kind: LicenceKind,
    status: LicenceStatus,
    noms_id: &str,
) -> LicenceSummary {
    let mut licence = LicenceSummary::new(Some(id), kind, status, noms_id);
    licence.forename = Some(String::from("BOB"));
    licence.surname = Some(String::from("SMITH"));
    licence.licence_start_date = Some(date!(2024 - 03 - 14));
    licence.conditional_release_date = Some(date!(2024 - 03 - 14));
    licence
}

pub fn create_test_prisoner(noms_id: &str, release_date: Option<Date>) -> PrisonerRecord {
    let mut prisoner = PrisonerRecord::new(noms_id);
    prisoner.booking_id = Some(1000);
    prisoner.first_name = Some(String::from("BOB"));
    prisoner.last_name = Some(String::from("SMITH"));
    prisoner.legal_status = Some(String::from("SENTENCED"));
    prisoner.prison_id = Some(String::from("MDI"));
    prisoner.prison_name = Some(String::from("Moorland (HMP)"));
    prisoner.status = Some(String::from("ACTIVE IN"));
    prisoner.conditional_release_date = release_date;
    prisoner
}

/// Builds a case the way the joiner does: a placeholder stands in when the
/// offender has no licence.
pub fn create_test_case(prisoner: PrisonerRecord, licences: Vec<LicenceSummary>) -> JoinedCase {
    let cvl = CvlRecord::compute(&prisoner, &create_test_calendar());
    let licences = if licences.is_empty() {
        vec![LicenceSummary::not_started(
            cvl.licence_kind,
            prisoner.prisoner_number.clone(),
        )]
    } else {
        licences
    };

    JoinedCase {
        noms_id: prisoner.prisoner_number.clone(),
        crn: Some(String::from("X12345")),
        prisoner,
        cvl,
        licences,
        manager: None,
        practitioner: ProbationPractitioner::Unallocated,
    }
}

pub fn create_test_selected_case(case: JoinedCase) -> SelectedCase {
    let selected = select_licence(&case.licences).unwrap();
    SelectedCase { case, selected }
}
