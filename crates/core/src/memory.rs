// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory collaborators.
//!
//! Back the pipelines with fixed record sets: snapshots loaded by the CLI and
//! fixtures in tests. Each source can be marked unavailable to exercise error
//! propagation, and records the batch sizes it was asked for.

use crate::error::{ExternalSystem, SourceError};
use crate::ports::{
    HdcStatusSource, LicenceQuery, LicenceStore, Page, PrisonerDirectory, ProbationDirectory,
};
use caseload_domain::{
    CommunityManager, HdcStatuses, LicenceSummary, PrisonerRecord, StaffNameRecord,
    determine_licence_kind, licence_start_date,
};
use std::cell::RefCell;
use std::collections::BTreeSet;
use time::Date;

fn unavailable(system: ExternalSystem) -> SourceError {
    SourceError::new(system, "service unavailable")
}

/// Licences held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLicenceStore {
    licences: Vec<LicenceSummary>,
    unavailable: bool,
}

impl InMemoryLicenceStore {
    /// Creates a store holding `licences`.
    #[must_use]
    pub const fn new(licences: Vec<LicenceSummary>) -> Self {
        Self {
            licences,
            unavailable: false,
        }
    }

    /// Creates a store whose every call fails.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            licences: Vec::new(),
            unavailable: true,
        }
    }
}

impl LicenceStore for InMemoryLicenceStore {
    fn query(&self, criteria: &LicenceQuery) -> Result<Vec<LicenceSummary>, SourceError> {
        if self.unavailable {
            return Err(unavailable(ExternalSystem::LicenceStore));
        }
        if criteria.selects_nothing() {
            return Ok(Vec::new());
        }

        Ok(self
            .licences
            .iter()
            .filter(|l| criteria.matches(l))
            .cloned()
            .collect())
    }

    fn find_by_id(&self, licence_id: i64) -> Result<Option<LicenceSummary>, SourceError> {
        if self.unavailable {
            return Err(unavailable(ExternalSystem::LicenceStore));
        }

        Ok(self
            .licences
            .iter()
            .find(|l| l.licence_id == Some(licence_id))
            .cloned())
    }
}

/// Prisoner records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPrisonerDirectory {
    prisoners: Vec<PrisonerRecord>,
    unavailable: bool,
}

impl InMemoryPrisonerDirectory {
    /// Creates a directory holding `prisoners`.
    #[must_use]
    pub const fn new(prisoners: Vec<PrisonerRecord>) -> Self {
        Self {
            prisoners,
            unavailable: false,
        }
    }

    /// Creates a directory whose every call fails.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            prisoners: Vec::new(),
            unavailable: true,
        }
    }
}

impl PrisonerDirectory for InMemoryPrisonerDirectory {
    fn by_numbers(&self, numbers: &[String]) -> Result<Vec<PrisonerRecord>, SourceError> {
        if self.unavailable {
            return Err(unavailable(ExternalSystem::PrisonerSearch));
        }

        Ok(self
            .prisoners
            .iter()
            .filter(|p| numbers.contains(&p.prisoner_number))
            .cloned()
            .collect())
    }

    fn by_release_date_window(
        &self,
        from: Date,
        to: Date,
        prison_codes: &[String],
        page: usize,
        page_size: usize,
    ) -> Result<Page<PrisonerRecord>, SourceError> {
        if self.unavailable {
            return Err(unavailable(ExternalSystem::PrisonerSearch));
        }

        let mut matching: Vec<&PrisonerRecord> = self
            .prisoners
            .iter()
            .filter(|p| {
                p.prison_id
                    .as_ref()
                    .is_some_and(|code| prison_codes.contains(code))
            })
            .filter(|p| {
                licence_start_date(p, determine_licence_kind(p))
                    .is_some_and(|d| d >= from && d <= to)
            })
            .collect();
        matching.sort_by(|a, b| a.prisoner_number.cmp(&b.prisoner_number));

        let page_size = page_size.max(1);
        let total_pages = matching.len().div_ceil(page_size);
        let content = matching
            .into_iter()
            .skip(page * page_size)
            .take(page_size)
            .cloned()
            .collect();

        Ok(Page {
            content,
            page,
            total_pages,
        })
    }
}

/// Probation records held in memory.
#[derive(Debug, Default)]
pub struct InMemoryProbationDirectory {
    managers: Vec<CommunityManager>,
    staff: Vec<StaffNameRecord>,
    unavailable: bool,
    crn_batches: RefCell<Vec<usize>>,
    username_batches: RefCell<Vec<usize>>,
}

impl InMemoryProbationDirectory {
    /// Creates a directory holding managers and staff.
    #[must_use]
    pub const fn new(managers: Vec<CommunityManager>, staff: Vec<StaffNameRecord>) -> Self {
        Self {
            managers,
            staff,
            unavailable: false,
            crn_batches: RefCell::new(Vec::new()),
            username_batches: RefCell::new(Vec::new()),
        }
    }

    /// Creates a directory whose every call fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Sizes of each CRN lookup made so far.
    #[must_use]
    pub fn crn_batches(&self) -> Vec<usize> {
        self.crn_batches.borrow().clone()
    }

    /// Sizes of each username lookup made so far.
    #[must_use]
    pub fn username_batches(&self) -> Vec<usize> {
        self.username_batches.borrow().clone()
    }

    fn check(&self) -> Result<(), SourceError> {
        if self.unavailable {
            Err(unavailable(ExternalSystem::Probation))
        } else {
            Ok(())
        }
    }

    fn managers_where(&self, keep: impl Fn(&CommunityManager) -> bool) -> Vec<CommunityManager> {
        self.managers.iter().filter(|m| keep(m)).cloned().collect()
    }
}

impl ProbationDirectory for InMemoryProbationDirectory {
    fn managers_for_crns(&self, crns: &[String]) -> Result<Vec<CommunityManager>, SourceError> {
        self.check()?;
        self.crn_batches.borrow_mut().push(crns.len());
        Ok(self.managers_where(|m| crns.contains(&m.crn)))
    }

    fn managers_for_noms(
        &self,
        noms_ids: &[String],
    ) -> Result<Vec<CommunityManager>, SourceError> {
        self.check()?;
        Ok(self.managers_where(|m| m.noms_id.as_ref().is_some_and(|n| noms_ids.contains(n))))
    }

    fn managed_by_staff(&self, staff_id: i64) -> Result<Vec<CommunityManager>, SourceError> {
        self.check()?;
        Ok(self.managers_where(|m| m.staff_id == Some(staff_id)))
    }

    fn managed_by_teams(
        &self,
        team_codes: &[String],
    ) -> Result<Vec<CommunityManager>, SourceError> {
        self.check()?;
        Ok(self.managers_where(|m| {
            m.team_code
                .as_ref()
                .is_some_and(|code| team_codes.contains(code))
        }))
    }

    fn staff_by_username(&self, usernames: &[String]) -> Result<Vec<StaffNameRecord>, SourceError> {
        self.check()?;
        self.username_batches.borrow_mut().push(usernames.len());

        let wanted: BTreeSet<String> = usernames.iter().map(|u| u.to_lowercase()).collect();
        Ok(self
            .staff
            .iter()
            .filter(|s| wanted.contains(&s.username.to_lowercase()))
            .cloned()
            .collect())
    }
}

/// HDC approvals held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHdcStatusSource {
    approved_booking_ids: BTreeSet<i64>,
    unavailable: bool,
}

impl InMemoryHdcStatusSource {
    /// Creates a source where the given bookings are approved for HDC.
    #[must_use]
    pub fn new(approved_booking_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            approved_booking_ids: approved_booking_ids.into_iter().collect(),
            unavailable: false,
        }
    }

    /// Creates a source whose every call fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

impl HdcStatusSource for InMemoryHdcStatusSource {
    fn status_for(&self, prisoners: &[PrisonerRecord]) -> Result<HdcStatuses, SourceError> {
        if self.unavailable {
            return Err(unavailable(ExternalSystem::Hdc));
        }

        Ok(HdcStatuses::new(
            prisoners
                .iter()
                .filter_map(|p| p.booking_id)
                .filter(|id| self.approved_booking_ids.contains(id)),
        ))
    }
}
