//! Persisted project settings for the Edgegap toolkit.
//!
//! A [`SettingsStore`] owns one [`SettingsRecord`]: credentials, container
//! image coordinates, resource requirements, ports and environment
//! variables. It loads once from a [`ConfigBackend`], reads are free, and
//! every [`edit`](SettingsStore::edit) is written back at once.
//!
//! The record also knows how to turn itself into the request bodies the
//! deployment endpoints need ([`SettingsRecord::deploy_request`],
//! [`SettingsRecord::app_version_request`]).
//!
//! ```rust
//! use edgegap_settings::{MemoryBackend, SettingsStore};
//!
//! let mut store = SettingsStore::load(MemoryBackend::new())?;
//! store.edit(|r| r.application_name = "my-game".into())?;
//! assert_eq!(store.record().application_name, "my-game");
//! # Ok::<(), edgegap_settings::SettingsError>(())
//! ```

mod backend;
mod error;
mod record;
mod store;

pub use backend::{ConfigBackend, FileBackend, MemoryBackend};
pub use error::SettingsError;
pub use record::{
    BuildConfiguration, EnvironmentVariable, PortConfig, SettingsRecord,
    DEFAULT_DOCKER_PATH, DEFAULT_REGISTRY,
};
pub use store::{environment_variable, SettingsStore};
