//! The settings store: one record, loaded once, persisted on every edit.

use edgegap_models::Secret;

use crate::{ConfigBackend, SettingsError, SettingsRecord};

/// Owns the settings record and the backend it persists to.
///
/// ```text
/// load(backend) ──→ record()      pure read
///                └→ edit(|r| ..)  mutate + persist
/// ```
///
/// There is no other way to change the record, so the persisted document
/// always matches what [`record`](Self::record) returns after a
/// successful edit.
#[derive(Debug)]
pub struct SettingsStore<B: ConfigBackend> {
    backend: B,
    record: SettingsRecord,
}

impl<B: ConfigBackend> SettingsStore<B> {
    /// Loads the record from `backend`.
    ///
    /// A backend with no document yields the default record. Fields
    /// missing from the document take their defaults.
    ///
    /// # Errors
    /// [`SettingsError::Io`] if the document cannot be read,
    /// [`SettingsError::Decode`] if it is not a valid settings document.
    pub fn load(backend: B) -> Result<Self, SettingsError> {
        let record = match backend.read()? {
            Some(document) => toml::from_str(&document)
                .map_err(|err| SettingsError::decode(&document, &err))?,
            None => {
                tracing::debug!("no stored settings, using defaults");
                SettingsRecord::default()
            }
        };
        tracing::info!(
            application = %record.application_name,
            version = %record.version_name,
            "settings loaded"
        );
        Ok(Self { backend, record })
    }

    /// The current record.
    pub fn record(&self) -> &SettingsRecord {
        &self.record
    }

    /// The matchmaker authorization key.
    pub fn authorization_key(&self) -> &Secret {
        &self.record.authorization_key
    }

    /// Applies `change` and persists the result.
    ///
    /// If persisting fails the in-memory record is left untouched.
    ///
    /// # Errors
    /// [`SettingsError::Encode`] or [`SettingsError::Io`] from saving.
    pub fn edit<F>(&mut self, change: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut SettingsRecord),
    {
        let mut next = self.record.clone();
        change(&mut next);
        let document = toml::to_string(&next)?;
        self.backend.write(&document)?;
        self.record = next;
        tracing::info!("settings saved");
        Ok(())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the store, keeping only the record.
    pub fn into_record(self) -> SettingsRecord {
        self.record
    }
}

/// Value of the environment variable `key`, or an empty string if it is
/// unset or not valid unicode.
pub fn environment_variable(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}
