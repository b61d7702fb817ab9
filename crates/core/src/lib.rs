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

//! Caseload pipelines.
//!
//! Assembles role-specific caseloads from the licence store, prisoner search,
//! the probation system and HDC status. Every pipeline is a read-only pass
//! over its sources: fetch, join, exclude, resolve, select, build.

mod approver_caseload;
mod ca_caseload;
mod com_caseload;
mod error;
mod fetch;
mod join;
mod last_minute_handover;
mod licence_lookup;
mod memory;
mod ports;
mod resolve;
mod service;
mod settings;
mod vary_approver_caseload;

#[cfg(test)]
mod tests;

pub use approver_caseload::RECENTLY_APPROVED_STATUSES;
pub use ca_caseload::{PRISON_VIEW_STATUSES, PROBATION_VIEW_STATUSES};
pub use com_caseload::{CREATE_STATUSES, VARY_STATUSES};
pub use error::{CoreError, ExternalSystem, SourceError};
pub use join::{Placeholders, join_cases};
pub use last_minute_handover::NOT_YET_APPROVED;
pub use licence_lookup::{BLOCKING_STATUSES, ensure_can_create_licence, find_licence};
pub use memory::{
    InMemoryHdcStatusSource, InMemoryLicenceStore, InMemoryPrisonerDirectory,
    InMemoryProbationDirectory,
};
pub use ports::{
    HdcStatusSource, LicenceQuery, LicenceStore, Page, PrisonerDirectory, ProbationDirectory,
};
pub use resolve::resolve_pending_usernames;
pub use service::{CaseloadService, Sources};
pub use settings::CaseloadSettings;
