// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lightweight licence projection returned by the licence store.

use crate::dates::iso_date;
use crate::status::{LicenceKind, LicenceStatus};
use crate::text::full_name;
use serde::{Deserialize, Serialize};
use time::Date;

/// A read-only summary of a licence record.
///
/// Summaries live for a single caseload request. A summary with no
/// `licence_id` is a "not started" placeholder for an offender who has no
/// licence record yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenceSummary {
    /// Licence identifier; `None` for a not-started placeholder.
    #[serde(default)]
    pub licence_id: Option<i64>,
    /// Route by which the licence is produced.
    pub kind: LicenceKind,
    /// Lifecycle status.
    pub status: LicenceStatus,
    /// Prison (NOMIS) offender number.
    pub noms_id: String,
    /// Probation case reference number.
    #[serde(default)]
    pub crn: Option<String>,
    /// Prison booking identifier.
    #[serde(default)]
    pub booking_id: Option<i64>,
    /// Offender forename.
    #[serde(default)]
    pub forename: Option<String>,
    /// Offender surname.
    #[serde(default)]
    pub surname: Option<String>,
    /// Offender date of birth.
    #[serde(default, with = "iso_date::option")]
    pub date_of_birth: Option<Date>,
    /// Code of the prison holding the offender.
    #[serde(default)]
    pub prison_code: Option<String>,
    /// Display name of the prison.
    #[serde(default)]
    pub prison_description: Option<String>,
    /// Username of the responsible probation practitioner stored on the licence.
    #[serde(default)]
    pub responsible_com_username: Option<String>,
    /// Staff identifier of the responsible probation practitioner.
    #[serde(default)]
    pub responsible_com_staff_id: Option<i64>,
    /// Probation delivery unit responsible for the offender.
    #[serde(default)]
    pub probation_pdu_code: Option<String>,
    /// Probation region responsible for the offender.
    #[serde(default)]
    pub probation_area_code: Option<String>,
    /// Probation team responsible for the offender.
    #[serde(default)]
    pub probation_team_code: Option<String>,
    /// The release date used for licence purposes.
    #[serde(default, with = "iso_date::option")]
    pub licence_start_date: Option<Date>,
    /// Conditional release date.
    #[serde(default, with = "iso_date::option")]
    pub conditional_release_date: Option<Date>,
    /// Confirmed (actual) release date.
    #[serde(default, with = "iso_date::option")]
    pub actual_release_date: Option<Date>,
    /// Post-recall release date.
    #[serde(default, with = "iso_date::option")]
    pub post_recall_release_date: Option<Date>,
    /// Home detention curfew actual date.
    #[serde(default, with = "iso_date::option")]
    pub home_detention_curfew_actual_date: Option<Date>,
    /// Licence expiry date.
    #[serde(default, with = "iso_date::option")]
    pub licence_expiry_date: Option<Date>,
    /// Top-up supervision expiry date.
    #[serde(default, with = "iso_date::option")]
    pub topup_supervision_expiry_date: Option<Date>,
    /// Predecessor licence when this licence is a new version.
    #[serde(default)]
    pub version_of: Option<i64>,
    /// Set when the licence must be reviewed after a hard-stop creation.
    #[serde(default)]
    pub is_review_needed: bool,
    /// Date the licence (or variation) was approved.
    #[serde(default, with = "iso_date::option")]
    pub approved_date: Option<Date>,
    /// Name of the approver.
    #[serde(default)]
    pub approved_by_name: Option<String>,
    /// Date the licence was submitted for approval.
    #[serde(default, with = "iso_date::option")]
    pub submitted_date: Option<Date>,
    /// Name of the practitioner who submitted the licence.
    #[serde(default)]
    pub submitted_by_full_name: Option<String>,
    /// Date a variation was requested.
    #[serde(default, with = "iso_date::option")]
    pub variation_request_date: Option<Date>,
    /// Name of the last person to update the licence.
    #[serde(default)]
    pub updated_by_full_name: Option<String>,
}

impl LicenceSummary {
    /// Creates a summary with every optional field unset.
    #[must_use]
    pub fn new(
        licence_id: Option<i64>,
        kind: LicenceKind,
        status: LicenceStatus,
        noms_id: impl Into<String>,
    ) -> Self {
        Self {
            licence_id,
            kind,
            status,
            noms_id: noms_id.into(),
            crn: None,
            booking_id: None,
            forename: None,
            surname: None,
            date_of_birth: None,
            prison_code: None,
            prison_description: None,
            responsible_com_username: None,
            responsible_com_staff_id: None,
            probation_pdu_code: None,
            probation_area_code: None,
            probation_team_code: None,
            licence_start_date: None,
            conditional_release_date: None,
            actual_release_date: None,
            post_recall_release_date: None,
            home_detention_curfew_actual_date: None,
            licence_expiry_date: None,
            topup_supervision_expiry_date: None,
            version_of: None,
            is_review_needed: false,
            approved_date: None,
            approved_by_name: None,
            submitted_date: None,
            submitted_by_full_name: None,
            variation_request_date: None,
            updated_by_full_name: None,
        }
    }

    /// Creates a not-started placeholder for an offender with no licence.
    #[must_use]
    pub fn not_started(kind: LicenceKind, noms_id: impl Into<String>) -> Self {
        Self::new(None, kind, LicenceStatus::NotStarted, noms_id)
    }

    /// Returns true if this summary has no backing licence record.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.licence_id.is_none()
    }

    /// Title-cased "Forename Surname".
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(self.forename.as_deref(), self.surname.as_deref())
    }
}
