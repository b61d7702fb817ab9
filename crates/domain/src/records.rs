// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Records owned by external systems.
//!
//! These are read-only snapshots fetched fresh for each caseload request:
//! prisoner records from prisoner search, community managers and staff from
//! the probation system, and HDC approval state from the prison API.

use crate::dates::iso_date;
use crate::status::LicenceKind;
use crate::text::full_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::Date;

/// Legal status recorded for deceased offenders.
pub const LEGAL_STATUS_DEAD: &str = "DEAD";

/// Prisoner status for an offender who has left custody.
pub const STATUS_INACTIVE_OUT: &str = "INACTIVE OUT";

/// A prisoner record from prisoner search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrisonerRecord {
    /// Prison (NOMIS) offender number.
    pub prisoner_number: String,
    /// Current booking identifier.
    #[serde(default)]
    pub booking_id: Option<i64>,
    /// Legal status, e.g. `"SENTENCED"` or `"DEAD"`.
    #[serde(default)]
    pub legal_status: Option<String>,
    /// Forename.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Surname.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Date of birth.
    #[serde(default, with = "iso_date::option")]
    pub date_of_birth: Option<Date>,
    /// Code of the prison holding the prisoner.
    #[serde(default)]
    pub prison_id: Option<String>,
    /// Display name of the prison.
    #[serde(default)]
    pub prison_name: Option<String>,
    /// Custody status, e.g. `"ACTIVE IN"` or `"INACTIVE OUT"`.
    #[serde(default)]
    pub status: Option<String>,
    /// Set for indeterminate (life / IPP) sentences.
    #[serde(default)]
    pub indeterminate_sentence: bool,
    /// Conditional release date.
    #[serde(default, with = "iso_date::option")]
    pub conditional_release_date: Option<Date>,
    /// Confirmed release date.
    #[serde(default, with = "iso_date::option")]
    pub confirmed_release_date: Option<Date>,
    /// HDC eligibility date.
    #[serde(default, with = "iso_date::option")]
    pub home_detention_curfew_eligibility_date: Option<Date>,
    /// HDC actual date.
    #[serde(default, with = "iso_date::option")]
    pub home_detention_curfew_actual_date: Option<Date>,
    /// Parole eligibility date.
    #[serde(default, with = "iso_date::option")]
    pub parole_eligibility_date: Option<Date>,
    /// Post-recall release date.
    #[serde(default, with = "iso_date::option")]
    pub post_recall_release_date: Option<Date>,
    /// Licence expiry date.
    #[serde(default, with = "iso_date::option")]
    pub licence_expiry_date: Option<Date>,
    /// Top-up supervision expiry date.
    #[serde(default, with = "iso_date::option")]
    pub topup_supervision_expiry_date: Option<Date>,
}

impl PrisonerRecord {
    /// Creates a record with only the prisoner number set.
    #[must_use]
    pub fn new(prisoner_number: impl Into<String>) -> Self {
        Self {
            prisoner_number: prisoner_number.into(),
            booking_id: None,
            legal_status: None,
            first_name: None,
            last_name: None,
            date_of_birth: None,
            prison_id: None,
            prison_name: None,
            status: None,
            indeterminate_sentence: false,
            conditional_release_date: None,
            confirmed_release_date: None,
            home_detention_curfew_eligibility_date: None,
            home_detention_curfew_actual_date: None,
            parole_eligibility_date: None,
            post_recall_release_date: None,
            licence_expiry_date: None,
            topup_supervision_expiry_date: None,
        }
    }

    /// Title-cased "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }

    /// Returns true if the legal status marks the prisoner as deceased.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.legal_status.as_deref() == Some(LEGAL_STATUS_DEAD)
    }

    /// Returns true if the prisoner has left custody.
    #[must_use]
    pub fn is_out_of_custody(&self) -> bool {
        self.status.as_deref() == Some(STATUS_INACTIVE_OUT)
    }
}

/// The probation system's view of who manages an offender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityManager {
    /// Probation case reference number.
    pub crn: String,
    /// Prison (NOMIS) offender number, when linked.
    #[serde(default)]
    pub noms_id: Option<String>,
    /// Staff identifier of the manager.
    #[serde(default)]
    pub staff_id: Option<i64>,
    /// Staff code of the manager.
    #[serde(default)]
    pub staff_code: Option<String>,
    /// Display name of the manager.
    #[serde(default)]
    pub staff_name: Option<String>,
    /// Username of the manager.
    #[serde(default)]
    pub staff_username: Option<String>,
    /// Set when no practitioner is currently allocated.
    #[serde(default)]
    pub unallocated: bool,
    /// Team code.
    #[serde(default)]
    pub team_code: Option<String>,
    /// Probation delivery unit code.
    #[serde(default)]
    pub pdu_code: Option<String>,
    /// Probation provider (region) code.
    #[serde(default)]
    pub provider_code: Option<String>,
    /// Probation provider (region) description.
    #[serde(default)]
    pub provider_description: Option<String>,
}

impl CommunityManager {
    /// Creates an unallocated manager record for a CRN.
    #[must_use]
    pub fn unallocated(crn: impl Into<String>) -> Self {
        Self {
            crn: crn.into(),
            noms_id: None,
            staff_id: None,
            staff_code: None,
            staff_name: None,
            staff_username: None,
            unallocated: true,
            team_code: None,
            pdu_code: None,
            provider_code: None,
            provider_description: None,
        }
    }

    /// Creates an allocated manager record.
    #[must_use]
    pub fn allocated(
        crn: impl Into<String>,
        noms_id: Option<&str>,
        staff_code: impl Into<String>,
        staff_name: impl Into<String>,
    ) -> Self {
        Self {
            noms_id: noms_id.map(str::to_string),
            staff_code: Some(staff_code.into()),
            staff_name: Some(staff_name.into()),
            unallocated: false,
            ..Self::unallocated(crn)
        }
    }
}

/// Staff identity resolved from a username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffNameRecord {
    /// Login username.
    pub username: String,
    /// Staff code.
    pub code: String,
    /// Display name.
    pub name: String,
}

/// HDC approval state for a set of bookings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HdcStatuses {
    approved_booking_ids: BTreeSet<i64>,
}

impl HdcStatuses {
    /// Creates the status set from the bookings approved for HDC.
    #[must_use]
    pub fn new(approved_booking_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            approved_booking_ids: approved_booking_ids.into_iter().collect(),
        }
    }

    /// Returns true if the booking has been approved for HDC release.
    #[must_use]
    pub fn is_approved_for_hdc(&self, booking_id: Option<i64>) -> bool {
        booking_id.is_some_and(|id| self.approved_booking_ids.contains(&id))
    }

    /// Returns true if an HDC licence is still waiting for HDC approval.
    #[must_use]
    pub fn is_waiting_for_activation(&self, kind: LicenceKind, booking_id: Option<i64>) -> bool {
        kind == LicenceKind::Hdc && !self.is_approved_for_hdc(booking_id)
    }

    /// Returns true if a licence of this kind may appear on a COM caseload.
    ///
    /// Currently the same rule as [`Self::can_be_seen_by_ca`].
    #[must_use]
    pub fn can_be_seen_by_com(&self, kind: LicenceKind, booking_id: Option<i64>) -> bool {
        !self.is_waiting_for_activation(kind, booking_id)
    }

    /// Returns true if a licence of this kind may appear on a CA caseload.
    ///
    /// Currently the same rule as [`Self::can_be_seen_by_com`].
    #[must_use]
    pub fn can_be_seen_by_ca(&self, kind: LicenceKind, booking_id: Option<i64>) -> bool {
        !self.is_waiting_for_activation(kind, booking_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_legal_status() {
        let mut prisoner = PrisonerRecord::new("A1234AA");
        assert!(!prisoner.is_dead());
        prisoner.legal_status = Some(String::from("DEAD"));
        assert!(prisoner.is_dead());
    }

    #[test]
    fn test_hdc_approval_requires_booking() {
        let statuses = HdcStatuses::new([10, 20]);
        assert!(statuses.is_approved_for_hdc(Some(10)));
        assert!(!statuses.is_approved_for_hdc(Some(30)));
        assert!(!statuses.is_approved_for_hdc(None));
    }

    #[test]
    fn test_unapproved_hdc_licence_is_hidden() {
        let statuses = HdcStatuses::new([10]);
        assert!(!statuses.can_be_seen_by_com(LicenceKind::Hdc, Some(30)));
        assert!(statuses.can_be_seen_by_com(LicenceKind::Hdc, Some(10)));
        assert!(statuses.can_be_seen_by_ca(LicenceKind::Crd, Some(30)));
        assert!(!statuses.can_be_seen_by_ca(LicenceKind::Hdc, Some(30)));
    }

    #[test]
    fn test_allocated_manager_builder() {
        let manager = CommunityManager::allocated("X123", Some("A1234AA"), "STAFF1", "Joe Bloggs");
        assert!(!manager.unallocated);
        assert_eq!(manager.staff_code.as_deref(), Some("STAFF1"));
        assert_eq!(manager.noms_id.as_deref(), Some("A1234AA"));
    }
}
