// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Record joiner.
//!
//! Licences, prisoner records and probation records are joined on the
//! offender number, falling back to the CRN for probation records that carry
//! no offender number. The result has one case per offender.
//!
//! ## Rules
//!
//! - An offender without a prisoner record never becomes a case; licences
//!   left without a prisoner are logged and dropped
//! - A prisoner without licences becomes a not-started case only when the
//!   caller asks for placeholders
//! - The practitioner comes from the probation record when it names an
//!   allocated staff code, else from the username stored on the licence

use caseload_domain::{
    CommunityManager, CvlRecord, JoinedCase, LicenceSummary, PrisonerRecord,
    ProbationPractitioner, ReleaseDateCalendar,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Whether prisoners without a licence become not-started cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholders {
    /// Add a not-started placeholder for each prisoner without a licence.
    Create,
    /// Drop prisoners without a licence.
    Drop,
}

/// Joins the three record sets into one case per offender.
///
/// Cases are returned in offender-number order.
#[must_use]
pub fn join_cases(
    licences: Vec<LicenceSummary>,
    prisoners: Vec<PrisonerRecord>,
    managers: Vec<CommunityManager>,
    calendar: &dyn ReleaseDateCalendar,
    placeholders: Placeholders,
) -> Vec<JoinedCase> {
    let mut licences_by_noms: BTreeMap<String, Vec<LicenceSummary>> = BTreeMap::new();
    for licence in licences {
        licences_by_noms
            .entry(licence.noms_id.clone())
            .or_default()
            .push(licence);
    }

    let mut prisoners_by_noms: BTreeMap<String, PrisonerRecord> = BTreeMap::new();
    for prisoner in prisoners {
        prisoners_by_noms
            .entry(prisoner.prisoner_number.clone())
            .or_insert(prisoner);
    }

    let managers = ManagerIndex::new(managers);
    let mut cases = Vec::with_capacity(prisoners_by_noms.len());
    let mut orphaned = 0usize;

    for (noms_id, prisoner) in prisoners_by_noms {
        let licences = licences_by_noms.remove(&noms_id).unwrap_or_default();
        if licences.is_empty() && placeholders == Placeholders::Drop {
            continue;
        }

        cases.push(build_case(noms_id, prisoner, licences, &managers, calendar));
    }

    for (noms_id, licences) in licences_by_noms {
        orphaned += 1;
        warn!(
            noms_id = %noms_id,
            licences = licences.len(),
            "Licence has no matching prisoner record; excluding"
        );
    }

    debug!(cases = cases.len(), orphaned, "Joined records");

    cases
}

fn build_case(
    noms_id: String,
    prisoner: PrisonerRecord,
    licences: Vec<LicenceSummary>,
    managers: &ManagerIndex,
    calendar: &dyn ReleaseDateCalendar,
) -> JoinedCase {
    let cvl = CvlRecord::compute(&prisoner, calendar);

    let licence_crn = licences.iter().find_map(|l| l.crn.clone());
    let manager = managers.find(&noms_id, licence_crn.as_deref()).cloned();
    let crn = licence_crn.or_else(|| manager.as_ref().map(|m| m.crn.clone()));

    let username = licences
        .iter()
        .find_map(|l| l.responsible_com_username.as_deref());
    let practitioner = ProbationPractitioner::from_sources(manager.as_ref(), username);

    let licences = if licences.is_empty() {
        vec![LicenceSummary::not_started(cvl.licence_kind, noms_id.clone())]
    } else {
        licences
    };

    JoinedCase {
        noms_id,
        crn,
        prisoner,
        cvl,
        licences,
        manager,
        practitioner,
    }
}

struct ManagerIndex {
    by_noms: BTreeMap<String, CommunityManager>,
    by_crn: BTreeMap<String, CommunityManager>,
}

impl ManagerIndex {
    fn new(managers: Vec<CommunityManager>) -> Self {
        let mut by_noms = BTreeMap::new();
        let mut by_crn = BTreeMap::new();

        for manager in managers {
            if let Some(noms_id) = manager.noms_id.clone() {
                by_noms.entry(noms_id).or_insert_with(|| manager.clone());
            }
            by_crn.entry(manager.crn.clone()).or_insert(manager);
        }

        Self { by_noms, by_crn }
    }

    fn find(&self, noms_id: &str, crn: Option<&str>) -> Option<&CommunityManager> {
        self.by_noms
            .get(noms_id)
            .or_else(|| crn.and_then(|crn| self.by_crn.get(crn)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseload_domain::{LicenceKind, LicenceStatus, WorkingDayCalendar};
    use time::macros::date;

    fn calendar() -> WorkingDayCalendar {
        WorkingDayCalendar::without_bank_holidays(date!(2024 - 03 - 07))
    }

    fn prisoner(noms_id: &str) -> PrisonerRecord {
        let mut prisoner = PrisonerRecord::new(noms_id);
        prisoner.conditional_release_date = Some(date!(2024 - 03 - 14));
        prisoner
    }

    fn licence(id: i64, noms_id: &str) -> LicenceSummary {
        let mut licence =
            LicenceSummary::new(Some(id), LicenceKind::Crd, LicenceStatus::InProgress, noms_id);
        licence.crn = Some(format!("X{id}"));
        licence
    }

    #[test]
    fn test_groups_licences_per_offender() {
        let cases = join_cases(
            vec![licence(1, "A1234AA"), licence(2, "A1234AA")],
            vec![prisoner("A1234AA")],
            vec![],
            &calendar(),
            Placeholders::Drop,
        );

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].licences.len(), 2);
        assert_eq!(cases[0].crn.as_deref(), Some("X1"));
        assert!(cases[0].practitioner.is_unallocated());
    }

    #[test]
    fn test_licence_without_prisoner_is_dropped() {
        let cases = join_cases(
            vec![licence(1, "A1234AA")],
            vec![],
            vec![],
            &calendar(),
            Placeholders::Create,
        );

        assert!(cases.is_empty());
    }

    #[test]
    fn test_placeholder_policy() {
        let created = join_cases(
            vec![],
            vec![prisoner("A1234AA")],
            vec![],
            &calendar(),
            Placeholders::Create,
        );
        assert_eq!(created.len(), 1);
        assert!(created[0].is_not_started());
        assert_eq!(created[0].licences[0].kind, LicenceKind::Crd);

        let dropped = join_cases(
            vec![],
            vec![prisoner("A1234AA")],
            vec![],
            &calendar(),
            Placeholders::Drop,
        );
        assert!(dropped.is_empty());
    }

    #[test]
    fn test_manager_matched_by_crn_when_noms_missing() {
        let manager = CommunityManager::allocated("X1", None, "STAFF1", "Joe Bloggs");

        let cases = join_cases(
            vec![licence(1, "A1234AA")],
            vec![prisoner("A1234AA")],
            vec![manager],
            &calendar(),
            Placeholders::Drop,
        );

        assert_eq!(cases[0].practitioner.staff_code(), Some("STAFF1"));
    }

    #[test]
    fn test_licence_username_is_pending_without_manager() {
        let mut licence = licence(1, "A1234AA");
        licence.responsible_com_username = Some(String::from("jbloggs"));

        let cases = join_cases(
            vec![licence],
            vec![prisoner("A1234AA")],
            vec![],
            &calendar(),
            Placeholders::Drop,
        );

        assert_eq!(cases[0].practitioner.pending_username(), Some("jbloggs"));
    }

    #[test]
    fn test_placeholder_takes_crn_from_manager() {
        let manager = CommunityManager::allocated("X9", Some("A1234AA"), "STAFF1", "Joe Bloggs");

        let cases = join_cases(
            vec![],
            vec![prisoner("A1234AA")],
            vec![manager],
            &calendar(),
            Placeholders::Create,
        );

        assert_eq!(cases[0].crn.as_deref(), Some("X9"));
        assert_eq!(cases[0].practitioner.name(), Some("Joe Bloggs"));
    }
}
