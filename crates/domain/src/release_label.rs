// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Labels explaining which sentence date a displayed release date came from.

use crate::case::SelectedCase;
use serde::{Serialize, Serializer};
use time::Date;

/// The closed set of release-date labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseDateLabel {
    /// Conditional release date.
    Crd,
    /// Confirmed (actual) release date.
    ConfirmedReleaseDate,
    /// Home detention curfew actual date.
    Hdcad,
    /// Post-recall release date.
    Prrd,
}

impl ReleaseDateLabel {
    /// Display text for the label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Crd => "CRD",
            Self::ConfirmedReleaseDate => "Confirmed release date",
            Self::Hdcad => "HDCAD",
            Self::Prrd => "Post-recall release date (PRRD)",
        }
    }

    /// Resolves the label for `release_date`.
    ///
    /// Checked in order: HDCAD, confirmed release date, post-recall release
    /// date. Anything else, including an absent date, is labelled CRD.
    #[must_use]
    pub fn resolve(release_date: Option<Date>, sources: &ReleaseDateSources) -> Self {
        let Some(date) = release_date else {
            return Self::Crd;
        };

        if sources.home_detention_curfew_actual_date == Some(date) {
            Self::Hdcad
        } else if sources.confirmed_release_date == Some(date) {
            Self::ConfirmedReleaseDate
        } else if sources.post_recall_release_date == Some(date) {
            Self::Prrd
        } else {
            Self::Crd
        }
    }

    /// Resolves the label for a selected case's release date.
    ///
    /// Licence records carry their own sentence dates. A not-started case
    /// falls back to the prisoner record.
    #[must_use]
    pub fn for_case(case: &SelectedCase) -> Self {
        let licence = case.licence();
        let sources = if licence.is_placeholder() {
            ReleaseDateSources {
                home_detention_curfew_actual_date: case
                    .case
                    .prisoner
                    .home_detention_curfew_actual_date,
                confirmed_release_date: case.case.prisoner.confirmed_release_date,
                post_recall_release_date: case.case.prisoner.post_recall_release_date,
            }
        } else {
            ReleaseDateSources {
                home_detention_curfew_actual_date: licence.home_detention_curfew_actual_date,
                confirmed_release_date: licence.actual_release_date,
                post_recall_release_date: licence.post_recall_release_date,
            }
        };

        Self::resolve(case.release_date(), &sources)
    }
}

impl std::fmt::Display for ReleaseDateLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ReleaseDateLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Sentence dates a release date may have been taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseDateSources {
    /// Home detention curfew actual date.
    pub home_detention_curfew_actual_date: Option<Date>,
    /// Confirmed or actual release date.
    pub confirmed_release_date: Option<Date>,
    /// Post-recall release date.
    pub post_recall_release_date: Option<Date>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_hdcad_wins_over_confirmed_date() {
        let day = date!(2024 - 03 - 14);
        let sources = ReleaseDateSources {
            home_detention_curfew_actual_date: Some(day),
            confirmed_release_date: Some(day),
            post_recall_release_date: None,
        };
        assert_eq!(
            ReleaseDateLabel::resolve(Some(day), &sources),
            ReleaseDateLabel::Hdcad
        );
    }

    #[test]
    fn test_confirmed_date_label() {
        let day = date!(2024 - 03 - 14);
        let sources = ReleaseDateSources {
            confirmed_release_date: Some(day),
            post_recall_release_date: Some(day),
            ..ReleaseDateSources::default()
        };
        assert_eq!(
            ReleaseDateLabel::resolve(Some(day), &sources).as_str(),
            "Confirmed release date"
        );
    }

    #[test]
    fn test_prrd_label() {
        let day = date!(2024 - 03 - 14);
        let sources = ReleaseDateSources {
            post_recall_release_date: Some(day),
            ..ReleaseDateSources::default()
        };
        assert_eq!(
            ReleaseDateLabel::resolve(Some(day), &sources).as_str(),
            "Post-recall release date (PRRD)"
        );
    }

    #[test]
    fn test_default_is_crd() {
        let sources = ReleaseDateSources {
            confirmed_release_date: Some(date!(2024 - 03 - 13)),
            ..ReleaseDateSources::default()
        };
        assert_eq!(
            ReleaseDateLabel::resolve(Some(date!(2024 - 03 - 14)), &sources),
            ReleaseDateLabel::Crd
        );
        assert_eq!(
            ReleaseDateLabel::resolve(None, &sources),
            ReleaseDateLabel::Crd
        );
    }
}
