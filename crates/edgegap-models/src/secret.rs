//! Opaque credential wrapper.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder printed in place of a secret value.
pub(crate) const REDACTED: &str = "***";

/// Secrets shorter than this are only masked where they stand alone.
const MIN_SUBSTRING_REDACT_LEN: usize = 4;

/// An API token, registry password, or other credential.
///
/// `Debug` and `Display` both print `***`, so a `Secret` can sit inside
/// structs that get logged without leaking. The clear value is only
/// reachable through [`expose`](Self::expose), which makes every use site
/// easy to grep for.
///
/// Serializes as a plain string (`#[serde(transparent)]`) so it can be
/// persisted and sent in request bodies.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the clear-text value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replaces every occurrence of this secret in `text` with `***`.
    ///
    /// Empty secrets are ignored. A secret shorter than four characters is
    /// only replaced where it is not part of a longer alphanumeric run, so
    /// `"x"` masks `"token x"` but leaves `"max"` alone.
    pub fn redact(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_string();
        }
        if self.0.chars().count() >= MIN_SUBSTRING_REDACT_LEN {
            return text.replace(&self.0, REDACTED);
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for (start, found) in text.match_indices(self.0.as_str()) {
            let end = start + found.len();
            let joined_before = text[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_alphanumeric);
            let joined_after = text[end..]
                .chars()
                .next()
                .is_some_and(char::is_alphanumeric);
            if joined_before || joined_after {
                continue;
            }
            out.push_str(&text[last..start]);
            out.push_str(REDACTED);
            last = end;
        }
        out.push_str(&text[last..]);
        out
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
