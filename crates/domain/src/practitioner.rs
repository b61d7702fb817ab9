// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Probation practitioner resolution state.
//!
//! A practitioner is resolved in up to two passes:
//!
//! 1. From the community manager record: an allocated manager with a staff
//!    code wins; an unallocated manager is `Unallocated`.
//! 2. Otherwise from the username stored on the licence, which must be looked
//!    up in the probation system to obtain a staff code and name.
//!
//! The probation system is the source of truth whenever a staff code can be
//! resolved, so a username lookup that succeeds replaces the pending state.

use crate::records::{CommunityManager, StaffNameRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Who is responsible for an offender in the community.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ProbationPractitioner {
    /// A practitioner with a resolved staff code.
    #[serde(rename_all = "camelCase")]
    Allocated {
        /// Staff code.
        staff_code: String,
        /// Display name.
        name: String,
    },
    /// Only the practitioner's username is known; a username lookup is due.
    #[serde(rename_all = "camelCase")]
    PendingUsernameResolution {
        /// Username stored on the licence.
        staff_username: String,
    },
    /// No practitioner is allocated.
    Unallocated,
}

impl ProbationPractitioner {
    /// Resolves the first-pass state from a manager record and a fallback username.
    ///
    /// Resolution order: allocated staff code, then the username stored on the
    /// licence, then unallocated.
    #[must_use]
    pub fn from_sources(manager: Option<&CommunityManager>, username: Option<&str>) -> Self {
        if let Some(manager) = manager
            && !manager.unallocated
            && let Some(staff_code) = manager.staff_code.as_deref()
        {
            return Self::Allocated {
                staff_code: staff_code.to_string(),
                name: manager.staff_name.clone().unwrap_or_default(),
            };
        }

        match username.map(str::trim) {
            Some(u) if !u.is_empty() => Self::PendingUsernameResolution {
                staff_username: u.to_string(),
            },
            _ => Self::Unallocated,
        }
    }

    /// Applies the second-pass username lookup.
    ///
    /// `staff_by_username` is keyed by lower-cased username. Unmatched
    /// usernames keep their pending state so the stored username can still be
    /// shown.
    #[must_use]
    pub fn resolve_username(self, staff_by_username: &HashMap<String, StaffNameRecord>) -> Self {
        match self {
            Self::PendingUsernameResolution { staff_username } => {
                match staff_by_username.get(&staff_username.to_lowercase()) {
                    Some(staff) => Self::Allocated {
                        staff_code: staff.code.clone(),
                        name: staff.name.clone(),
                    },
                    None => Self::PendingUsernameResolution { staff_username },
                }
            }
            resolved => resolved,
        }
    }

    /// Username awaiting lookup, if any.
    #[must_use]
    pub fn pending_username(&self) -> Option<&str> {
        match self {
            Self::PendingUsernameResolution { staff_username } => Some(staff_username),
            _ => None,
        }
    }

    /// Name to display and search against; only allocated practitioners have one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Allocated { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Staff code, for allocated practitioners.
    #[must_use]
    pub fn staff_code(&self) -> Option<&str> {
        match self {
            Self::Allocated { staff_code, .. } => Some(staff_code),
            _ => None,
        }
    }

    /// Returns true if no practitioner is allocated.
    #[must_use]
    pub const fn is_unallocated(&self) -> bool {
        matches!(self, Self::Unallocated)
    }
}

/// Indexes staff lookups by lower-cased username.
#[must_use]
pub fn index_staff_by_username(
    staff: impl IntoIterator<Item = StaffNameRecord>,
) -> HashMap<String, StaffNameRecord> {
    staff
        .into_iter()
        .map(|record| (record.username.to_lowercase(), record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(username: &str, code: &str, name: &str) -> StaffNameRecord {
        StaffNameRecord {
            username: username.to_string(),
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_allocated_manager_wins_over_username() {
        let manager = CommunityManager::allocated("X1", None, "C01", "Com Person");
        let practitioner = ProbationPractitioner::from_sources(Some(&manager), Some("user1"));
        assert_eq!(
            practitioner,
            ProbationPractitioner::Allocated {
                staff_code: String::from("C01"),
                name: String::from("Com Person"),
            }
        );
    }

    #[test]
    fn test_unallocated_manager_falls_back_to_username() {
        let manager = CommunityManager::unallocated("X1");
        let practitioner = ProbationPractitioner::from_sources(Some(&manager), Some("user1"));
        assert_eq!(practitioner.pending_username(), Some("user1"));
    }

    #[test]
    fn test_no_sources_is_unallocated() {
        let manager = CommunityManager::unallocated("X1");
        assert!(ProbationPractitioner::from_sources(Some(&manager), None).is_unallocated());
        assert!(ProbationPractitioner::from_sources(None, Some("  ")).is_unallocated());
    }

    #[test]
    fn test_username_lookup_is_case_insensitive() {
        let index = index_staff_by_username([staff("USER1", "C99", "Pat Smith")]);
        let practitioner = ProbationPractitioner::PendingUsernameResolution {
            staff_username: String::from("user1"),
        }
        .resolve_username(&index);
        assert_eq!(practitioner.staff_code(), Some("C99"));
        assert_eq!(practitioner.name(), Some("Pat Smith"));
    }

    #[test]
    fn test_unmatched_username_stays_pending() {
        let index = index_staff_by_username([staff("other", "C99", "Pat Smith")]);
        let practitioner = ProbationPractitioner::PendingUsernameResolution {
            staff_username: String::from("user1"),
        }
        .resolve_username(&index);
        assert_eq!(practitioner.pending_username(), Some("user1"));
        assert_eq!(practitioner.name(), None);
    }

    #[test]
    fn test_resolution_leaves_allocated_untouched() {
        let index = index_staff_by_username([staff("user1", "C99", "Pat Smith")]);
        let allocated = ProbationPractitioner::Allocated {
            staff_code: String::from("C01"),
            name: String::from("Com Person"),
        };
        assert_eq!(allocated.clone().resolve_username(&index), allocated);
    }
}
