// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Licence eligibility and release timing derived from a prisoner record.
//!
//! A `CvlRecord` is **computed**, not stored. It is a pure function of the
//! prisoner record and the working-day calendar, and supplies the release
//! timing for offenders who do not have a licence yet.

use crate::calendar::ReleaseDateCalendar;
use crate::dates::iso_date;
use crate::records::PrisonerRecord;
use crate::status::LicenceKind;
use serde::{Deserialize, Serialize};
use time::Date;

/// Eligibility and release timing for one prisoner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvlRecord {
    /// Prison (NOMIS) offender number.
    pub noms_id: String,
    /// Kind of licence the prisoner would be released on.
    pub licence_kind: LicenceKind,
    /// Computed release date for licence purposes.
    #[serde(with = "iso_date::option")]
    pub licence_start_date: Option<Date>,
    /// Hard-stop date for the computed release date.
    #[serde(with = "iso_date::option")]
    pub hard_stop_date: Option<Date>,
    /// Hard-stop warning date for the computed release date.
    #[serde(with = "iso_date::option")]
    pub hard_stop_warning_date: Option<Date>,
    /// Today falls inside the hard-stop period.
    pub is_in_hard_stop_period: bool,
    /// Release is due within the next two working days.
    pub is_due_within_two_working_days: bool,
    /// Reasons the prisoner cannot have a licence created; empty when eligible.
    pub ineligibility_reasons: Vec<String>,
}

impl CvlRecord {
    /// Computes eligibility and timing for a prisoner.
    #[must_use]
    pub fn compute(prisoner: &PrisonerRecord, calendar: &dyn ReleaseDateCalendar) -> Self {
        let licence_kind = determine_licence_kind(prisoner);
        let licence_start_date = licence_start_date(prisoner, licence_kind);

        Self {
            noms_id: prisoner.prisoner_number.clone(),
            licence_kind,
            licence_start_date,
            hard_stop_date: licence_start_date.map(|d| calendar.hard_stop_date(d)),
            hard_stop_warning_date: licence_start_date.map(|d| calendar.hard_stop_warning_date(d)),
            is_in_hard_stop_period: licence_start_date
                .is_some_and(|d| calendar.is_in_hard_stop_period(d)),
            is_due_within_two_working_days: licence_start_date
                .is_some_and(|d| calendar.is_due_within_two_working_days(d)),
            ineligibility_reasons: ineligibility_reasons(prisoner, calendar.today()),
        }
    }

    /// Returns true when no ineligibility reason applies.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.ineligibility_reasons.is_empty()
    }
}

/// Chooses between the post-recall and conditional release routes.
///
/// A post-recall release date only applies when it falls after the
/// conditional release date (or there is no conditional release date).
#[must_use]
pub fn determine_licence_kind(prisoner: &PrisonerRecord) -> LicenceKind {
    match (
        prisoner.post_recall_release_date,
        prisoner.conditional_release_date,
    ) {
        (Some(prrd), Some(crd)) if prrd > crd => LicenceKind::Prrd,
        (Some(_), None) => LicenceKind::Prrd,
        _ => LicenceKind::Crd,
    }
}

/// The release date a licence for this prisoner would start on.
///
/// A confirmed release date always takes precedence over the sentence date
/// for the chosen route.
#[must_use]
pub fn licence_start_date(prisoner: &PrisonerRecord, kind: LicenceKind) -> Option<Date> {
    let sentence_date = match kind {
        LicenceKind::Prrd => prisoner.post_recall_release_date,
        _ => prisoner.conditional_release_date,
    };

    prisoner.confirmed_release_date.or(sentence_date)
}

/// Lists every reason the prisoner is not eligible for a licence.
#[must_use]
pub fn ineligibility_reasons(prisoner: &PrisonerRecord, today: Date) -> Vec<String> {
    let mut reasons = Vec::new();

    if prisoner.is_dead() {
        reasons.push(String::from("is dead"));
    }

    if prisoner.indeterminate_sentence {
        reasons.push(String::from("indeterminate sentence"));
    }

    if prisoner.conditional_release_date.is_none() && prisoner.post_recall_release_date.is_none()
    {
        reasons.push(String::from("has no conditional release date"));
    }

    if prisoner.parole_eligibility_date.is_some_and(|ped| ped > today) {
        reasons.push(String::from("is eligible for parole"));
    }

    if prisoner.is_out_of_custody() {
        reasons.push(String::from("is not in custody"));
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WorkingDayCalendar;
    use time::macros::date;

    fn prisoner() -> PrisonerRecord {
        let mut prisoner = PrisonerRecord::new("A1234AA");
        prisoner.conditional_release_date = Some(date!(2024 - 03 - 14));
        prisoner
    }

    #[test]
    fn test_crd_route_uses_conditional_release_date() {
        let cal = WorkingDayCalendar::without_bank_holidays(date!(2024 - 03 - 01));
        let record = CvlRecord::compute(&prisoner(), &cal);
        assert_eq!(record.licence_kind, LicenceKind::Crd);
        assert_eq!(record.licence_start_date, Some(date!(2024 - 03 - 14)));
        assert_eq!(record.hard_stop_date, Some(date!(2024 - 03 - 12)));
        assert!(record.is_eligible());
        assert!(!record.is_in_hard_stop_period);
    }

    #[test]
    fn test_confirmed_release_date_takes_precedence() {
        let mut p = prisoner();
        p.confirmed_release_date = Some(date!(2024 - 03 - 13));
        assert_eq!(
            licence_start_date(&p, LicenceKind::Crd),
            Some(date!(2024 - 03 - 13))
        );
    }

    #[test]
    fn test_later_prrd_selects_prrd_route() {
        let mut p = prisoner();
        p.post_recall_release_date = Some(date!(2024 - 06 - 01));
        assert_eq!(determine_licence_kind(&p), LicenceKind::Prrd);
        assert_eq!(
            licence_start_date(&p, LicenceKind::Prrd),
            Some(date!(2024 - 06 - 01))
        );
    }

    #[test]
    fn test_earlier_prrd_keeps_crd_route() {
        let mut p = prisoner();
        p.post_recall_release_date = Some(date!(2024 - 01 - 01));
        assert_eq!(determine_licence_kind(&p), LicenceKind::Crd);
    }

    #[test]
    fn test_ineligibility_reasons_accumulate() {
        let mut p = PrisonerRecord::new("A1234AA");
        p.legal_status = Some(String::from("DEAD"));
        p.indeterminate_sentence = true;
        let reasons = ineligibility_reasons(&p, date!(2024 - 03 - 01));
        assert_eq!(reasons.len(), 3);
        assert!(reasons.iter().any(|r| r.contains("dead")));
    }

    #[test]
    fn test_future_parole_eligibility_is_ineligible() {
        let mut p = prisoner();
        p.parole_eligibility_date = Some(date!(2025 - 01 - 01));
        let reasons = ineligibility_reasons(&p, date!(2024 - 03 - 01));
        assert_eq!(reasons, vec![String::from("is eligible for parole")]);
    }
}
