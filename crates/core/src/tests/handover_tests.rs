// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    TestWorld, create_named_prisoner, create_test_licence, create_test_manager, prisons,
};
use crate::InMemoryHdcStatusSource;
use caseload_domain::{LicenceStatus, ProbationPractitioner};
use time::macros::date;

/// Friday: hard stop was Wednesday, so today is inside the period.
const FRIDAY: time::Date = date!(2024 - 03 - 08);
/// Monday: hard stop is today.
const MONDAY: time::Date = date!(2024 - 03 - 11);
/// Tuesday: hard stop is tomorrow.
const TUESDAY: time::Date = date!(2024 - 03 - 12);

fn create_handover_world() -> TestWorld {
    TestWorld::new(
        vec![
            create_test_licence(1, LicenceStatus::InProgress, "A1111AA", FRIDAY),
            create_test_licence(2, LicenceStatus::InProgress, "B2222BB", TUESDAY),
            create_test_licence(3, LicenceStatus::Approved, "C3333CC", FRIDAY),
        ],
        vec![
            create_named_prisoner("A1111AA", 1, Some(FRIDAY), "ALICE", "ABLE"),
            create_named_prisoner("B2222BB", 2, Some(TUESDAY), "BEN", "BAKER"),
            create_named_prisoner("C3333CC", 3, Some(FRIDAY), "CARL", "COOPER"),
            create_named_prisoner("D4444DD", 4, Some(MONDAY), "DAN", "DAVIES"),
        ],
        vec![create_test_manager("A1111AA", 3000, "Jane Comfort")],
    )
}

#[test]
fn test_handover_lists_unapproved_cases_in_hard_stop_period() {
    let world = create_handover_world();

    let rows = world.service().last_minute_handover(&prisons()).unwrap();

    let noms: Vec<&str> = rows.iter().map(|r| r.prisoner_number.as_str()).collect();
    assert_eq!(noms, vec!["A1111AA", "D4444DD"]);

    assert_eq!(rows[0].status, LicenceStatus::InProgress);
    assert_eq!(rows[0].release_date, Some(FRIDAY));
    assert_eq!(rows[0].prisoner_name, "Alice Able");
    assert_eq!(rows[0].probation_region.as_deref(), Some("North West"));
    assert_eq!(rows[0].crn.as_deref(), Some("XA1111AA"));
    assert_eq!(
        rows[0].probation_practitioner,
        ProbationPractitioner::Allocated {
            staff_code: String::from("STAFF3000"),
            name: String::from("Jane Comfort"),
        }
    );

    assert_eq!(rows[1].status, LicenceStatus::NotStarted);
    assert_eq!(rows[1].release_date, Some(MONDAY));
    assert_eq!(rows[1].probation_region, None);
    assert!(rows[1].probation_practitioner.is_unallocated());
}

#[test]
fn test_handover_excludes_prisoner_approved_for_hdc() {
    let mut world = create_handover_world();
    let mut prisoners = vec![create_named_prisoner(
        "A1111AA",
        1,
        Some(FRIDAY),
        "ALICE",
        "ABLE",
    )];
    prisoners[0].home_detention_curfew_eligibility_date = Some(date!(2024 - 01 - 01));
    world.prisoners = crate::InMemoryPrisonerDirectory::new(prisoners);
    world.hdc = InMemoryHdcStatusSource::new([1]);

    let rows = world.service().last_minute_handover(&prisons()).unwrap();

    assert!(rows.is_empty());
}

#[test]
fn test_handover_without_prisons_is_empty() {
    let world = create_handover_world();

    let rows = world.service().last_minute_handover(&[]).unwrap();

    assert!(rows.is_empty());
}

#[test]
fn test_handover_stages_run_in_order() {
    let world = create_handover_world();
    let service = world.service();

    let releasing = service.releasing(&prisons()).unwrap();
    let eligible = service.eligible(releasing).unwrap();
    let with_licences = service.with_licences(eligible).unwrap();
    let in_hard_stop = service.in_hard_stop(with_licences);
    let rows = service
        .with_practitioners(in_hard_stop)
        .unwrap()
        .into_rows();

    assert_eq!(rows, service.last_minute_handover(&prisons()).unwrap());
}
