// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Display-name helpers.
//!
//! Upstream systems store names in upper case; caseloads show them title-cased.

/// Converts `"JOHN o'BRIEN-SMITH"` into `"John O'brien-Smith"`.
///
/// Each whitespace- or hyphen-separated word is capitalised; everything else is
/// lower-cased.
#[must_use]
pub fn to_title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut start_of_word = true;

    for c in value.trim().chars() {
        if c.is_whitespace() || c == '-' {
            result.push(c);
            start_of_word = true;
        } else if start_of_word {
            result.extend(c.to_uppercase());
            start_of_word = false;
        } else {
            result.extend(c.to_lowercase());
        }
    }

    result
}

/// Joins a forename and surname into a title-cased display name.
///
/// Missing parts are skipped; two missing parts yield an empty string.
#[must_use]
pub fn full_name(forename: Option<&str>, surname: Option<&str>) -> String {
    let parts: Vec<&str> = [forename, surname]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    to_title_case(&parts.join(" "))
}
