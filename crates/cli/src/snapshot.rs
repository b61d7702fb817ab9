// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON snapshot of the external systems a caseload is built from.

use caseload::{
    InMemoryHdcStatusSource, InMemoryLicenceStore, InMemoryPrisonerDirectory,
    InMemoryProbationDirectory,
};
use caseload_domain::{
    CommunityManager, LicenceSummary, PrisonerRecord, StaffNameRecord, WorkingDayCalendar,
    parse_iso_date,
};
use color_eyre::{Result, eyre::Context};
use serde::Deserialize;
use std::path::Path;
use time::Date;

/// Everything the pipelines read, captured in one document.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub licences: Vec<LicenceSummary>,
    pub prisoners: Vec<PrisonerRecord>,
    pub probation: Vec<CommunityManager>,
    pub staff: Vec<StaffNameRecord>,
    pub hdc_approved_bookings: Vec<i64>,
    pub bank_holidays: Vec<String>,
}

impl Snapshot {
    /// Reads and parses a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing snapshot {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(text)?;
        tracing::debug!(
            licences = snapshot.licences.len(),
            prisoners = snapshot.prisoners.len(),
            managers = snapshot.probation.len(),
            staff = snapshot.staff.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Working-day calendar for `today` with the snapshot's bank holidays.
    pub fn calendar(&self, today: Date) -> Result<WorkingDayCalendar> {
        let holidays = self
            .bank_holidays
            .iter()
            .map(|d| parse_iso_date(d))
            .collect::<Result<Vec<_>, _>>()
            .context("reading bank holidays")?;
        Ok(WorkingDayCalendar::new(today, holidays))
    }

    /// Splits the snapshot into in-memory collaborators.
    pub fn into_sources(self) -> Collaborators {
        Collaborators {
            licences: InMemoryLicenceStore::new(self.licences),
            prisoners: InMemoryPrisonerDirectory::new(self.prisoners),
            probation: InMemoryProbationDirectory::new(self.probation, self.staff),
            hdc: InMemoryHdcStatusSource::new(self.hdc_approved_bookings),
        }
    }
}

/// Owned collaborators built from a snapshot.
pub struct Collaborators {
    pub licences: InMemoryLicenceStore,
    pub prisoners: InMemoryPrisonerDirectory,
    pub probation: InMemoryProbationDirectory,
    pub hdc: InMemoryHdcStatusSource,
}
