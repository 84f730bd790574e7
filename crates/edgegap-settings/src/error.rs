//! Error types for the settings layer.

use std::path::PathBuf;

use edgegap_models::Secret;

/// Keys whose values never appear in error text.
const CREDENTIAL_KEYS: [&str; 3] =
    ["authorization_key", "api_token", "private_registry_token"];

/// Errors that can occur while loading or persisting settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read or written.
    #[error("settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted text is not a valid settings document.
    ///
    /// Carries the parser's message and the 1-based line it points at.
    /// The offending source text is not kept, and credential values are
    /// masked in `message`.
    #[error("invalid settings document{}: {message}", line_suffix(.line))]
    Decode { line: Option<usize>, message: String },

    /// The record could not be rendered as TOML.
    #[error("settings could not be encoded: {0}")]
    Encode(#[from] toml::ser::Error),
}

impl SettingsError {
    /// Builds a [`SettingsError::Decode`] from a parse failure of `document`.
    pub(crate) fn decode(document: &str, err: &toml::de::Error) -> Self {
        let line = err.span().map(|span| {
            let start = span.start.min(document.len());
            document.as_bytes()[..start]
                .iter()
                .filter(|&&b| b == b'\n')
                .count()
                + 1
        });
        let message = credential_values(document)
            .iter()
            .fold(err.message().to_string(), |text, secret| secret.redact(&text));
        Self::Decode { line, message }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|line| format!(" at line {line}")).unwrap_or_default()
}

/// Scans `document` line by line for credential assignments.
///
/// The document failed to parse, so this is lexical: for each
/// `<credential> = <value>` line both the quoted (or first bare) token and
/// the whole right-hand side are collected.
fn credential_values(document: &str) -> Vec<Secret> {
    let mut found = Vec::new();
    for line in document.lines() {
        let line = line.trim_start();
        let Some(rest) = CREDENTIAL_KEYS
            .iter()
            .find_map(|key| line.strip_prefix(key))
        else {
            continue;
        };
        let Some(value) = rest.trim_start().strip_prefix('=') else {
            continue;
        };
        let value = value.trim();
        let token = match value.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let inner = &value[1..];
                inner.split(quote).next().unwrap_or(inner)
            }
            _ => value
                .split(|c: char| c.is_whitespace() || c == '#')
                .next()
                .unwrap_or(value),
        };
        found.push(Secret::new(token));
        found.push(Secret::new(value));
    }
    // Longest first so a token never splits a longer match.
    found.sort_by_key(|secret| std::cmp::Reverse(secret.expose().len()));
    found
}
