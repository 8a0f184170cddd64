// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input checks shared by the dialogue and the reservation form.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Simple `local@domain.tld` shape check. Not an RFC 5322 parser.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
