// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Interfaces to the systems a caseload is assembled from.
//!
//! Every call is synchronous and read-only. Failures are returned as
//! `SourceError` and propagate to the caller unchanged: there are no retries
//! and no partial results.

use crate::error::SourceError;
use caseload_domain::{
    CommunityManager, HdcStatuses, LicenceStatus, LicenceSummary, PrisonerRecord,
    StaffNameRecord,
};
use time::Date;

/// Criteria for a licence query.
///
/// `statuses` is required. Each optional filter narrows the result when set;
/// a filter set to an empty list matches nothing, so an accidental empty
/// input never turns into a full-table scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenceQuery {
    /// Statuses to include.
    pub statuses: Vec<LicenceStatus>,
    /// Prison codes to include.
    pub prison_codes: Option<Vec<String>>,
    /// Responsible COM staff ids to include.
    pub staff_ids: Option<Vec<i64>>,
    /// CRNs to include.
    pub crns: Option<Vec<String>>,
    /// Prison (NOMIS) offender numbers to include.
    pub noms_ids: Option<Vec<String>>,
    /// Probation delivery unit codes to include.
    pub pdu_codes: Option<Vec<String>>,
    /// Probation area (region) codes to include.
    pub area_codes: Option<Vec<String>>,
    /// Probation team codes to include.
    pub team_codes: Option<Vec<String>>,
}

impl LicenceQuery {
    /// Creates a query for the given statuses.
    #[must_use]
    pub fn with_statuses(statuses: &[LicenceStatus]) -> Self {
        Self {
            statuses: statuses.to_vec(),
            ..Self::default()
        }
    }

    /// Restricts the query to prisons.
    #[must_use]
    pub fn prison_codes(mut self, codes: &[String]) -> Self {
        self.prison_codes = Some(codes.to_vec());
        self
    }

    /// Restricts the query to responsible COM staff ids.
    #[must_use]
    pub fn staff_ids(mut self, ids: &[i64]) -> Self {
        self.staff_ids = Some(ids.to_vec());
        self
    }

    /// Restricts the query to CRNs.
    #[must_use]
    pub fn crns(mut self, crns: &[String]) -> Self {
        self.crns = Some(crns.to_vec());
        self
    }

    /// Restricts the query to offender numbers.
    #[must_use]
    pub fn noms_ids(mut self, noms_ids: &[String]) -> Self {
        self.noms_ids = Some(noms_ids.to_vec());
        self
    }

    /// Restricts the query to probation delivery units.
    #[must_use]
    pub fn pdu_codes(mut self, codes: &[String]) -> Self {
        self.pdu_codes = Some(codes.to_vec());
        self
    }

    /// Restricts the query to probation areas.
    #[must_use]
    pub fn area_codes(mut self, codes: &[String]) -> Self {
        self.area_codes = Some(codes.to_vec());
        self
    }

    /// Restricts the query to probation teams.
    #[must_use]
    pub fn team_codes(mut self, codes: &[String]) -> Self {
        self.team_codes = Some(codes.to_vec());
        self
    }

    /// Returns true if the query can match nothing: no statuses, or a filter
    /// set to an empty list.
    #[must_use]
    pub fn selects_nothing(&self) -> bool {
        self.statuses.is_empty()
            || self.prison_codes.as_ref().is_some_and(Vec::is_empty)
            || self.staff_ids.as_ref().is_some_and(Vec::is_empty)
            || self.crns.as_ref().is_some_and(Vec::is_empty)
            || self.noms_ids.as_ref().is_some_and(Vec::is_empty)
            || self.pdu_codes.as_ref().is_some_and(Vec::is_empty)
            || self.area_codes.as_ref().is_some_and(Vec::is_empty)
            || self.team_codes.as_ref().is_some_and(Vec::is_empty)
    }

    /// Returns true if `licence` satisfies every filter.
    #[must_use]
    pub fn matches(&self, licence: &LicenceSummary) -> bool {
        self.statuses.contains(&licence.status)
            && within(self.prison_codes.as_deref(), licence.prison_code.as_ref())
            && within(
                self.staff_ids.as_deref(),
                licence.responsible_com_staff_id.as_ref(),
            )
            && within(self.crns.as_deref(), licence.crn.as_ref())
            && within(self.noms_ids.as_deref(), Some(&licence.noms_id))
            && within(self.pdu_codes.as_deref(), licence.probation_pdu_code.as_ref())
            && within(
                self.area_codes.as_deref(),
                licence.probation_area_code.as_ref(),
            )
            && within(
                self.team_codes.as_deref(),
                licence.probation_team_code.as_ref(),
            )
    }
}

fn within<T: PartialEq>(filter: Option<&[T]>, value: Option<&T>) -> bool {
    match filter {
        None => true,
        Some(allowed) => value.is_some_and(|v| allowed.contains(v)),
    }
}

/// The licence database.
pub trait LicenceStore {
    /// Returns every licence matching the criteria.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn query(&self, criteria: &LicenceQuery) -> Result<Vec<LicenceSummary>, SourceError>;

    /// Returns a licence by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_by_id(&self, licence_id: i64) -> Result<Option<LicenceSummary>, SourceError>;
}

/// One page of a paged result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records on this page.
    pub content: Vec<T>,
    /// Zero-based page number.
    pub page: usize,
    /// Total number of pages.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Returns true if no page follows this one.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.page + 1 >= self.total_pages
    }
}

/// Prisoner search.
pub trait PrisonerDirectory {
    /// Returns the records for the given offender numbers. Unknown numbers are
    /// omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if prisoner search fails.
    fn by_numbers(&self, numbers: &[String]) -> Result<Vec<PrisonerRecord>, SourceError>;

    /// Returns one page of prisoners in the given prisons whose release date
    /// falls in `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns an error if prisoner search fails.
    fn by_release_date_window(
        &self,
        from: Date,
        to: Date,
        prison_codes: &[String],
        page: usize,
        page_size: usize,
    ) -> Result<Page<PrisonerRecord>, SourceError>;
}

/// The probation case management system.
pub trait ProbationDirectory {
    /// Managers for the given CRNs. Callers batch large inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the probation system fails.
    fn managers_for_crns(&self, crns: &[String]) -> Result<Vec<CommunityManager>, SourceError>;

    /// Managers for the given offender numbers. Callers batch large inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the probation system fails.
    fn managers_for_noms(&self, noms_ids: &[String])
    -> Result<Vec<CommunityManager>, SourceError>;

    /// Offenders managed by a member of staff.
    ///
    /// # Errors
    ///
    /// Returns an error if the probation system fails.
    fn managed_by_staff(&self, staff_id: i64) -> Result<Vec<CommunityManager>, SourceError>;

    /// Offenders managed by any of the given teams.
    ///
    /// # Errors
    ///
    /// Returns an error if the probation system fails.
    fn managed_by_teams(&self, team_codes: &[String])
    -> Result<Vec<CommunityManager>, SourceError>;

    /// Staff code and name for each known username.
    ///
    /// # Errors
    ///
    /// Returns an error if the probation system fails.
    fn staff_by_username(&self, usernames: &[String]) -> Result<Vec<StaffNameRecord>, SourceError>;
}

/// HDC approval status from the prison API.
pub trait HdcStatusSource {
    /// HDC approval state for the prisoners' bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the prison API fails.
    fn status_for(&self, prisoners: &[PrisonerRecord]) -> Result<HdcStatuses, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseload_domain::LicenceKind;

    fn licence() -> LicenceSummary {
        let mut licence =
            LicenceSummary::new(Some(1), LicenceKind::Crd, LicenceStatus::Submitted, "A1234AA");
        licence.prison_code = Some(String::from("MDI"));
        licence
    }

    #[test]
    fn test_empty_filter_selects_nothing() {
        let query = LicenceQuery::with_statuses(&[LicenceStatus::Submitted]).prison_codes(&[]);
        assert!(query.selects_nothing());
        assert!(!query.matches(&licence()));
    }

    #[test]
    fn test_no_statuses_selects_nothing() {
        assert!(LicenceQuery::default().selects_nothing());
    }

    #[test]
    fn test_filters_combine() {
        let query = LicenceQuery::with_statuses(&[LicenceStatus::Submitted])
            .prison_codes(&[String::from("MDI")]);
        assert!(!query.selects_nothing());
        assert!(query.matches(&licence()));

        let query = query.staff_ids(&[2000]);
        assert!(!query.matches(&licence()));
    }

    #[test]
    fn test_last_page() {
        let page: Page<i32> = Page {
            content: vec![],
            page: 1,
            total_pages: 2,
        };
        assert!(page.is_last());
        assert!(Page::<i32> {
            content: vec![],
            page: 0,
            total_pages: 0,
        }
        .is_last());
    }
}
