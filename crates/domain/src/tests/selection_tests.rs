// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_licence;
use crate::{
    LicenceCreationType, LicenceKind, LicenceStatus, LicenceSummary, select_licence,
    select_vary_licence,
};

const NOMS: &str = "A1234AA";

fn approved_and_timed_out() -> (LicenceSummary, LicenceSummary) {
    let approved = create_test_licence(1, LicenceKind::Crd, LicenceStatus::Approved, NOMS);
    let mut timed_out = create_test_licence(2, LicenceKind::Crd, LicenceStatus::TimedOut, NOMS);
    timed_out.version_of = Some(1);
    (approved, timed_out)
}

/// Every ordering of three items.
fn permutations<T: Clone>(items: &[T; 3]) -> Vec<Vec<T>> {
    [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ]
    .iter()
    .map(|order| order.iter().map(|&i| items[i].clone()).collect())
    .collect()
}

#[test]
fn test_timed_out_new_version_shows_approved_predecessor() {
    let (approved, timed_out) = approved_and_timed_out();

    let selected = select_licence(&[approved, timed_out]).unwrap();

    assert_eq!(selected.licence.licence_id, Some(1));
    assert_eq!(selected.licence.status, LicenceStatus::TimedOut);
    assert_eq!(
        selected.creation_type,
        LicenceCreationType::LicenceChangesNotApprovedInTime
    );
}

#[test]
fn test_selection_ignores_input_order() {
    let (approved, timed_out) = approved_and_timed_out();

    let forward = select_licence(&[approved.clone(), timed_out.clone()]).unwrap();
    let backward = select_licence(&[timed_out, approved]).unwrap();

    assert_eq!(forward, backward);
}

#[test]
fn test_selection_is_deterministic_across_all_orderings() {
    let (approved, timed_out) = approved_and_timed_out();
    let in_progress = create_test_licence(3, LicenceKind::Crd, LicenceStatus::InProgress, NOMS);

    let results: Vec<_> = permutations(&[approved, timed_out, in_progress])
        .iter()
        .map(|licences| select_licence(licences).unwrap())
        .collect();

    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(results[0].licence.licence_id, Some(1));
    assert_eq!(results[0].licence.status, LicenceStatus::TimedOut);
}

#[test]
fn test_timed_out_without_approved_predecessor_is_shown_itself() {
    let submitted = create_test_licence(1, LicenceKind::Crd, LicenceStatus::Submitted, NOMS);
    let mut timed_out = create_test_licence(2, LicenceKind::Crd, LicenceStatus::TimedOut, NOMS);
    timed_out.version_of = Some(1);

    let selected = select_licence(&[submitted, timed_out]).unwrap();

    assert_eq!(selected.licence.licence_id, Some(2));
    assert_eq!(selected.licence.status, LicenceStatus::TimedOut);
    assert_eq!(
        selected.creation_type,
        LicenceCreationType::PrisonWillCreateThisLicence
    );
}

#[test]
fn test_timed_out_pointing_at_missing_licence_is_shown_itself() {
    let approved = create_test_licence(1, LicenceKind::Crd, LicenceStatus::Approved, NOMS);
    let mut timed_out = create_test_licence(2, LicenceKind::Crd, LicenceStatus::TimedOut, NOMS);
    timed_out.version_of = Some(99);

    let selected = select_licence(&[approved, timed_out]).unwrap();

    assert_eq!(selected.licence.licence_id, Some(2));
    assert_eq!(
        selected.creation_type,
        LicenceCreationType::PrisonWillCreateThisLicence
    );
}

#[test]
fn test_hard_stop_in_progress_wins_over_timed_out() {
    let (approved, timed_out) = approved_and_timed_out();
    let hard_stop = create_test_licence(3, LicenceKind::HardStop, LicenceStatus::InProgress, NOMS);

    for licences in permutations(&[approved, timed_out, hard_stop]) {
        let selected = select_licence(&licences).unwrap();
        assert_eq!(selected.licence.licence_id, Some(3));
        assert_eq!(selected.licence.status, LicenceStatus::InProgress);
        assert_eq!(
            selected.creation_type,
            LicenceCreationType::PrisonWillCreateThisLicence
        );
    }
}

#[test]
fn test_submitted_hard_stop_was_created_by_prison() {
    let timed_out = create_test_licence(1, LicenceKind::Crd, LicenceStatus::TimedOut, NOMS);
    let hard_stop = create_test_licence(2, LicenceKind::HardStop, LicenceStatus::Submitted, NOMS);

    let selected = select_licence(&[timed_out, hard_stop]).unwrap();

    assert_eq!(selected.licence.kind, LicenceKind::HardStop);
    assert_eq!(
        selected.creation_type,
        LicenceCreationType::LicenceCreatedByPrison
    );
}

#[test]
fn test_hard_stop_without_id_is_prison_will_create() {
    let timed_out = create_test_licence(1, LicenceKind::Crd, LicenceStatus::TimedOut, NOMS);
    let placeholder = LicenceSummary::not_started(LicenceKind::HardStop, NOMS);

    let selected = select_licence(&[timed_out, placeholder]).unwrap();

    assert_eq!(selected.licence.licence_id, None);
    assert_eq!(
        selected.creation_type,
        LicenceCreationType::PrisonWillCreateThisLicence
    );
}

#[test]
fn test_in_progress_edit_supersedes_approved() {
    let approved = create_test_licence(1, LicenceKind::Crd, LicenceStatus::Approved, NOMS);
    let mut edit = create_test_licence(2, LicenceKind::Crd, LicenceStatus::InProgress, NOMS);
    edit.version_of = Some(1);

    let selected = select_licence(&[approved, edit]).unwrap();

    assert_eq!(selected.licence.licence_id, Some(2));
    assert_eq!(
        selected.creation_type,
        LicenceCreationType::LicenceInProgress
    );
}

#[test]
fn test_all_approved_takes_first_by_id() {
    let second = create_test_licence(7, LicenceKind::Crd, LicenceStatus::Approved, NOMS);
    let first = create_test_licence(3, LicenceKind::Crd, LicenceStatus::Approved, NOMS);

    let selected = select_licence(&[second, first]).unwrap();

    assert_eq!(selected.licence.licence_id, Some(3));
}

#[test]
fn test_single_timed_out_licence_is_prison_will_create() {
    let timed_out = create_test_licence(1, LicenceKind::Crd, LicenceStatus::TimedOut, NOMS);

    let selected = select_licence(&[timed_out]).unwrap();

    assert_eq!(
        selected.creation_type,
        LicenceCreationType::PrisonWillCreateThisLicence
    );
}

#[test]
fn test_single_approved_hard_stop_was_created_by_prison() {
    let hard_stop = create_test_licence(1, LicenceKind::HardStop, LicenceStatus::Approved, NOMS);

    let selected = select_licence(&[hard_stop]).unwrap();

    assert_eq!(
        selected.creation_type,
        LicenceCreationType::LicenceCreatedByPrison
    );
}

#[test]
fn test_vary_selection_prefers_variation() {
    let active = create_test_licence(1, LicenceKind::Crd, LicenceStatus::Active, NOMS);
    let variation = create_test_licence(
        2,
        LicenceKind::Variation,
        LicenceStatus::VariationInProgress,
        NOMS,
    );

    let selected = select_vary_licence(&[active.clone(), variation]).unwrap();
    assert_eq!(selected.licence.licence_id, Some(2));

    let selected = select_vary_licence(&[active]).unwrap();
    assert_eq!(selected.licence.licence_id, Some(1));
}
