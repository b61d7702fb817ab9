// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Tunables shared by every caseload pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseloadSettings {
    /// Width of the prison view's rolling release window.
    pub ca_release_window_weeks: i64,
    /// Width of the last-minute handover release window.
    pub last_minute_window_days: i64,
    /// How far back the recently approved caseload looks.
    pub recently_approved_days: i64,
    /// Maximum CRNs or usernames per probation request.
    pub probation_batch_size: usize,
    /// Page size for prisoner search release-window queries.
    pub prisoner_page_size: usize,
}

impl Default for CaseloadSettings {
    fn default() -> Self {
        Self {
            ca_release_window_weeks: 4,
            last_minute_window_days: 7,
            recently_approved_days: 14,
            probation_batch_size: 500,
            prisoner_page_size: 2000,
        }
    }
}
