// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Free-text search over case views.

/// A view that free-text search can match against.
pub trait SearchableCase {
    /// Display name of the offender.
    fn name(&self) -> &str;

    /// Prison (NOMIS) offender number.
    fn offender_number(&self) -> &str;

    /// Name of the allocated probation practitioner, when known.
    fn practitioner_name(&self) -> Option<&str>;
}

/// Returns true if `case` matches `term` case-insensitively on name,
/// offender number or practitioner name.
#[must_use]
pub fn matches_search<T: SearchableCase + ?Sized>(case: &T, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [
        Some(case.name()),
        Some(case.offender_number()),
        case.practitioner_name(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Keeps the cases matching `term`. An absent or blank term keeps everything.
#[must_use]
pub fn filter_by_search<T: SearchableCase>(cases: Vec<T>, term: Option<&str>) -> Vec<T> {
    match term.map(str::trim) {
        None | Some("") => cases,
        Some(term) => cases
            .into_iter()
            .filter(|case| matches_search(case, term))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        noms: &'static str,
        com: Option<&'static str>,
    }

    impl SearchableCase for Row {
        fn name(&self) -> &str {
            self.name
        }

        fn offender_number(&self) -> &str {
            self.noms
        }

        fn practitioner_name(&self) -> Option<&str> {
            self.com
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "Bob Smith",
                noms: "A1234AA",
                com: Some("Joe Bloggs"),
            },
            Row {
                name: "Alice Jones",
                noms: "B2345BB",
                com: None,
            },
        ]
    }

    #[test]
    fn test_no_term_keeps_everything() {
        assert_eq!(filter_by_search(rows(), None).len(), 2);
        assert_eq!(filter_by_search(rows(), Some("   ")).len(), 2);
    }

    #[test]
    fn test_matches_offender_number_case_insensitively() {
        let found = filter_by_search(rows(), Some("b2345"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Alice Jones");
    }

    #[test]
    fn test_absent_practitioner_never_matches() {
        assert_eq!(filter_by_search(rows(), Some("bloggs")).len(), 1);
        assert!(filter_by_search(rows(), Some("nobody")).is_empty());
    }
}
