// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Email shape validation.

use std::sync::LazyLock;

use regex::Regex;

// Intentionally loose: one @, no whitespace, a dot somewhere in the domain.
// Deliverability is the store backend's problem.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Whether `candidate` has the shape `local@domain.tld`.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("exemplo@gmail.com"));
        assert!(is_valid_email("a.b+c@sub.domain.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("exemplo"));
        assert!(!is_valid_email("exemplo@gmail"));
        assert!(!is_valid_email("ex emplo@gmail.com"));
        assert!(!is_valid_email("@gmail.com"));
        assert!(!is_valid_email("exemplo@"));
        assert!(!is_valid_email("meu email é exemplo@gmail.com"));
        assert!(!is_valid_email(""));
    }
}
