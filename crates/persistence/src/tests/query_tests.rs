// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_licence;
use crate::SqliteLicenceStore;
use caseload::{LicenceQuery, LicenceStore};
use caseload_domain::LicenceStatus;

fn create_populated_store() -> SqliteLicenceStore {
    let store = SqliteLicenceStore::new_in_memory().unwrap();

    let mut other_prison = create_test_licence(Some(4), LicenceStatus::InProgress, "D4444DD");
    other_prison.prison_code = Some(String::from("LEI"));
    other_prison.probation_pdu_code = Some(String::from("PDU2"));
    other_prison.probation_team_code = Some(String::from("TEAM2"));
    other_prison.responsible_com_staff_id = Some(4000);

    store
        .insert_licences(&[
            create_test_licence(Some(3), LicenceStatus::Submitted, "C3333CC"),
            create_test_licence(Some(1), LicenceStatus::InProgress, "A1111AA"),
            create_test_licence(Some(2), LicenceStatus::Active, "B2222BB"),
            other_prison,
        ])
        .unwrap();

    store
}

fn ids(store: &SqliteLicenceStore, query: &LicenceQuery) -> Vec<Option<i64>> {
    store
        .query(query)
        .unwrap()
        .into_iter()
        .map(|l| l.licence_id)
        .collect()
}

const IN_FLIGHT: [LicenceStatus; 2] = [LicenceStatus::InProgress, LicenceStatus::Submitted];

#[test]
fn test_query_filters_by_status_in_id_order() {
    let store = create_populated_store();

    assert_eq!(
        ids(&store, &LicenceQuery::with_statuses(&IN_FLIGHT)),
        vec![Some(1), Some(3), Some(4)]
    );
}

#[test]
fn test_query_filters_by_prison() {
    let store = create_populated_store();

    let query = LicenceQuery::with_statuses(&IN_FLIGHT).prison_codes(&[String::from("LEI")]);

    assert_eq!(ids(&store, &query), vec![Some(4)]);
}

#[test]
fn test_query_filters_by_offender_and_crn() {
    let store = create_populated_store();

    let by_noms =
        LicenceQuery::with_statuses(&IN_FLIGHT).noms_ids(&[String::from("C3333CC")]);
    let by_crn = LicenceQuery::with_statuses(&IN_FLIGHT).crns(&[String::from("XA1111AA")]);

    assert_eq!(ids(&store, &by_noms), vec![Some(3)]);
    assert_eq!(ids(&store, &by_crn), vec![Some(1)]);
}

#[test]
fn test_query_filters_by_probation_scope() {
    let store = create_populated_store();

    let by_staff = LicenceQuery::with_statuses(&IN_FLIGHT).staff_ids(&[4000]);
    let by_pdu = LicenceQuery::with_statuses(&IN_FLIGHT).pdu_codes(&[String::from("PDU1")]);
    let by_team = LicenceQuery::with_statuses(&IN_FLIGHT).team_codes(&[String::from("TEAM2")]);
    let by_area = LicenceQuery::with_statuses(&[LicenceStatus::Active])
        .area_codes(&[String::from("N01")]);

    assert_eq!(ids(&store, &by_staff), vec![Some(4)]);
    assert_eq!(ids(&store, &by_pdu), vec![Some(1), Some(3)]);
    assert_eq!(ids(&store, &by_team), vec![Some(4)]);
    assert_eq!(ids(&store, &by_area), vec![Some(2)]);
}

#[test]
fn test_filters_combine() {
    let store = create_populated_store();

    let query = LicenceQuery::with_statuses(&IN_FLIGHT)
        .prison_codes(&[String::from("MDI")])
        .noms_ids(&[String::from("A1111AA"), String::from("D4444DD")]);

    assert_eq!(ids(&store, &query), vec![Some(1)]);
}

#[test]
fn test_empty_filter_list_matches_nothing() {
    let store = create_populated_store();

    assert!(
        ids(
            &store,
            &LicenceQuery::with_statuses(&IN_FLIGHT).prison_codes(&[])
        )
        .is_empty()
    );
    assert!(ids(&store, &LicenceQuery::with_statuses(&[])).is_empty());
}
