// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod case;
mod clock;
mod cvl;
mod dates;
mod eligibility;
mod error;
mod licence;
mod ordering;
mod practitioner;
mod records;
mod release_label;
mod search;
mod selection;
mod status;
mod tabs;
mod text;
mod views;

#[cfg(test)]
mod tests;

pub use calendar::{
    HARD_STOP_WARNING_WORKING_DAYS, HARD_STOP_WORKING_DAYS, ReleaseDateCalendar,
    WorkingDayCalendar,
};
pub use case::{JoinedCase, SelectedCase};
pub use clock::{DEFAULT_TIMEZONE, naive_to_date, today_in};
pub use cvl::{CvlRecord, determine_licence_kind, ineligibility_reasons, licence_start_date};
pub use dates::{ISO_DATE, format_iso_date, iso_date, parse_iso_date, parse_optional_iso_date};
pub use eligibility::{
    EligibilityContext, ExclusionRule, RuleOutcome, apply_rules, dedupe_by_offender,
};
pub use error::DomainError;
pub use licence::LicenceSummary;
pub use ordering::{
    compare_approval_needed, compare_ca_prison, compare_ca_probation, compare_com,
    compare_handover, compare_recently_approved, compare_vary_approver,
};
pub use practitioner::{ProbationPractitioner, index_staff_by_username};
pub use records::{
    CommunityManager, HdcStatuses, LEGAL_STATUS_DEAD, PrisonerRecord, STATUS_INACTIVE_OUT,
    StaffNameRecord,
};
pub use release_label::{ReleaseDateLabel, ReleaseDateSources};
pub use search::{SearchableCase, filter_by_search, matches_search};
pub use selection::{
    LicenceCreationType, SelectedLicence, creation_type_for, select_licence,
    select_most_recently_approved, select_vary_licence,
};
pub use status::{LicenceKind, LicenceStatus};
pub use tabs::{CaViewCasesTab, determine_ca_tab};
pub use text::{full_name, to_title_case};
pub use views::{ApprovalCase, CaCase, ComCase, LastMinuteHandoverCase, VaryApproverCase};
