// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_licence;
use crate::{PersistenceError, SqliteLicenceStore};
use caseload::{ExternalSystem, LicenceQuery, LicenceStore};
use caseload_domain::{LicenceKind, LicenceStatus};
use diesel::RunQueryDsl;
use time::macros::date;

#[test]
fn test_new_database_is_empty() {
    let store = SqliteLicenceStore::new_in_memory().unwrap();

    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let first = SqliteLicenceStore::new_in_memory().unwrap();
    let second = SqliteLicenceStore::new_in_memory().unwrap();

    first
        .insert_licence(&create_test_licence(None, LicenceStatus::InProgress, "A1111AA"))
        .unwrap();

    assert_eq!(first.count().unwrap(), 1);
    assert_eq!(second.count().unwrap(), 0);
}

#[test]
fn test_stored_licence_reads_back_unchanged() {
    let store = SqliteLicenceStore::new_in_memory().unwrap();
    let mut licence = create_test_licence(Some(42), LicenceStatus::Approved, "A1111AA");
    licence.kind = LicenceKind::Hdc;
    licence.home_detention_curfew_actual_date = Some(date!(2024 - 03 - 01));
    licence.approved_date = Some(date!(2024 - 02 - 20));
    licence.approved_by_name = Some(String::from("Pat Governor"));
    licence.responsible_com_username = Some(String::from("JCOMFORT"));
    licence.is_review_needed = true;

    let licence_id = store.insert_licence(&licence).unwrap();
    let stored = store.find_by_id(licence_id).unwrap();

    assert_eq!(licence_id, 42);
    assert_eq!(stored, Some(licence));
}

#[test]
fn test_licence_without_id_is_assigned_one() {
    let store = SqliteLicenceStore::new_in_memory().unwrap();

    let ids = store
        .insert_licences(&[
            create_test_licence(None, LicenceStatus::InProgress, "A1111AA"),
            create_test_licence(None, LicenceStatus::Submitted, "B2222BB"),
        ])
        .unwrap();

    assert_eq!(ids.len(), 2);
    assert!(ids[0] < ids[1]);
    assert_eq!(
        store.find_by_id(ids[1]).unwrap().map(|l| l.noms_id),
        Some(String::from("B2222BB"))
    );
}

#[test]
fn test_missing_licence_is_none() {
    let store = SqliteLicenceStore::new_in_memory().unwrap();

    assert_eq!(store.find_by_id(7).unwrap(), None);
}

#[test]
fn test_version_of_must_reference_stored_licence() {
    let store = SqliteLicenceStore::new_in_memory().unwrap();
    let mut licence = create_test_licence(Some(2), LicenceStatus::InProgress, "A1111AA");
    licence.version_of = Some(1);

    let result = store.insert_licence(&licence);

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
}

#[test]
fn test_failed_batch_writes_nothing() {
    let store = SqliteLicenceStore::new_in_memory().unwrap();
    let mut orphan_version = create_test_licence(Some(3), LicenceStatus::InProgress, "B2222BB");
    orphan_version.version_of = Some(99);

    let result = store.insert_licences(&[
        create_test_licence(Some(1), LicenceStatus::Approved, "A1111AA"),
        orphan_version,
    ]);

    assert!(result.is_err());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_unreadable_row_is_reported_as_licence_store_failure() {
    let store = SqliteLicenceStore::new_in_memory().unwrap();
    diesel::sql_query(
        "INSERT INTO licences (licence_id, kind, status, noms_id) VALUES (5, 'CRD', 'PENDING', 'A1111AA')",
    )
    .execute(&mut *store.conn.borrow_mut())
    .unwrap();

    let in_progress = store
        .query(&LicenceQuery::with_statuses(&[LicenceStatus::InProgress]).noms_ids(&[
            String::from("A1111AA"),
        ]))
        .unwrap();
    assert!(in_progress.is_empty());

    let err = store.find_by_id(5).unwrap_err();
    assert_eq!(err.system, ExternalSystem::LicenceStore);
    assert!(err.message.contains("Licence 5"));
}

#[test]
fn test_new_version_may_precede_its_predecessor_in_a_batch() {
    let store = SqliteLicenceStore::new_in_memory().unwrap();
    let mut timed_out = create_test_licence(Some(2), LicenceStatus::TimedOut, "A1111AA");
    timed_out.version_of = Some(1);

    let ids = store
        .insert_licences(&[
            timed_out,
            create_test_licence(Some(1), LicenceStatus::Approved, "A1111AA"),
        ])
        .unwrap();

    assert_eq!(ids, vec![2, 1]);
    assert_eq!(store.count().unwrap(), 2);
    assert_eq!(
        store.find_by_id(2).unwrap().and_then(|l| l.version_of),
        Some(1)
    );
}

#[test]
fn test_file_database_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("licences.db");

    {
        let store = SqliteLicenceStore::new_with_file(&path).unwrap();
        store
            .insert_licence(&create_test_licence(Some(7), LicenceStatus::Submitted, "A1111AA"))
            .unwrap();
    }

    let reopened = SqliteLicenceStore::new_with_file(&path).unwrap();
    assert_eq!(reopened.count().unwrap(), 1);
    assert_eq!(
        reopened.find_by_id(7).unwrap().map(|l| l.status),
        Some(LicenceStatus::Submitted)
    );
}
