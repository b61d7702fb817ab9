// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CaseloadService, CaseloadSettings, InMemoryHdcStatusSource, InMemoryLicenceStore,
    InMemoryPrisonerDirectory, InMemoryProbationDirectory, Sources,
};
use caseload_domain::{
    CommunityManager, LicenceKind, LicenceStatus, LicenceSummary, PrisonerRecord,
    StaffNameRecord, WorkingDayCalendar,
};
use time::Date;
use time::macros::date;

/// Thursday 7 March 2024.
pub const TODAY: Date = date!(2024 - 03 - 07);

/// A week from today, inside the CA release window.
pub const NEXT_WEEK: Date = date!(2024 - 03 - 14);

pub const PRISON: &str = "MDI";

pub fn prisons() -> Vec<String> {
    vec![String::from(PRISON)]
}

pub fn create_test_prisoner(
    noms_id: &str,
    booking_id: i64,
    release_date: Option<Date>,
) -> PrisonerRecord {
    let mut prisoner = PrisonerRecord::new(noms_id);
    prisoner.booking_id = Some(booking_id);
    prisoner.first_name = Some(String::from("BOB"));
    prisoner.last_name = Some(String::from("SMITH"));
    prisoner.legal_status = Some(String::from("SENTENCED"));
    prisoner.prison_id = Some(String::from(PRISON));
    prisoner.prison_name = Some(String::from("Moorland (HMP)"));
    prisoner.status = Some(String::from("ACTIVE IN"));
    prisoner.conditional_release_date = release_date;
    prisoner
}

pub fn create_named_prisoner(
    noms_id: &str,
    booking_id: i64,
    release_date: Option<Date>,
    first_name: &str,
    last_name: &str,
) -> PrisonerRecord {
    let mut prisoner = create_test_prisoner(noms_id, booking_id, release_date);
    prisoner.first_name = Some(first_name.to_string());
    prisoner.last_name = Some(last_name.to_string());
    prisoner
}

pub fn create_test_licence(
    id: i64,
    status: LicenceStatus,
    noms_id: &str,
    release_date: Date,
) -> LicenceSummary {
    let mut licence = LicenceSummary::new(Some(id), LicenceKind::Crd, status, noms_id);
    licence.crn = Some(format!("X{noms_id}"));
    licence.prison_code = Some(String::from(PRISON));
    licence.prison_description = Some(String::from("Moorland (HMP)"));
    licence.licence_start_date = Some(release_date);
    licence.conditional_release_date = Some(release_date);
    licence
}

pub fn create_test_manager(noms_id: &str, staff_id: i64, name: &str) -> CommunityManager {
    let mut manager = CommunityManager::allocated(
        format!("X{noms_id}"),
        Some(noms_id),
        format!("STAFF{staff_id}"),
        name,
    );
    manager.staff_id = Some(staff_id);
    manager.team_code = Some(String::from("TEAM1"));
    manager.pdu_code = Some(String::from("PDU1"));
    manager.provider_code = Some(String::from("N01"));
    manager.provider_description = Some(String::from("North West"));
    manager
}

pub fn create_test_staff(username: &str, code: &str, name: &str) -> StaffNameRecord {
    StaffNameRecord {
        username: username.to_string(),
        code: code.to_string(),
        name: name.to_string(),
    }
}

/// The four upstream systems and a calendar fixed on `TODAY`.
pub struct TestWorld {
    pub licences: InMemoryLicenceStore,
    pub prisoners: InMemoryPrisonerDirectory,
    pub probation: InMemoryProbationDirectory,
    pub hdc: InMemoryHdcStatusSource,
    pub calendar: WorkingDayCalendar,
    pub settings: CaseloadSettings,
}

impl TestWorld {
    pub fn new(
        licences: Vec<LicenceSummary>,
        prisoners: Vec<PrisonerRecord>,
        managers: Vec<CommunityManager>,
    ) -> Self {
        Self {
            licences: InMemoryLicenceStore::new(licences),
            prisoners: InMemoryPrisonerDirectory::new(prisoners),
            probation: InMemoryProbationDirectory::new(managers, Vec::new()),
            hdc: InMemoryHdcStatusSource::default(),
            calendar: WorkingDayCalendar::without_bank_holidays(TODAY),
            settings: CaseloadSettings::default(),
        }
    }

    pub fn service(&self) -> CaseloadService<'_> {
        CaseloadService::new(
            Sources {
                licences: &self.licences,
                prisoners: &self.prisoners,
                probation: &self.probation,
                hdc: &self.hdc,
            },
            &self.calendar,
            self.settings,
        )
    }
}
