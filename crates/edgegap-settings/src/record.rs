//! The persisted settings record and the payloads derived from it.

use std::fmt;

use edgegap_models::{
    AppVersionRequest, DeployRequest, EnvVarSpec, PortProtocol, PortSpec,
    Secret,
};
use serde::{Deserialize, Serialize};

/// Registry used when no custom container registry is configured.
pub const DEFAULT_REGISTRY: &str = "registry.edgegap.com";

/// Where Docker Desktop installs its CLI on Windows.
pub const DEFAULT_DOCKER_PATH: &str =
    r"C:\Program Files\Docker\Docker\resources\bin\docker.exe";

// ---------------------------------------------------------------------------
// BuildConfiguration
// ---------------------------------------------------------------------------

/// Packaging configuration of the dedicated server build.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum BuildConfiguration {
    Debug,
    DebugGame,
    #[default]
    Development,
    Test,
    Shipping,
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "Debug"),
            Self::DebugGame => write!(f, "DebugGame"),
            Self::Development => write!(f, "Development"),
            Self::Test => write!(f, "Test"),
            Self::Shipping => write!(f, "Shipping"),
        }
    }
}

// ---------------------------------------------------------------------------
// PortConfig / EnvironmentVariable
// ---------------------------------------------------------------------------

/// A port exposed by every deployment of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortConfig {
    pub port: i32,
    pub protocol: PortProtocol,
    /// Whether Edgegap health-checks this port.
    pub checked: bool,
    pub tls_upgrade: bool,
    pub name: String,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            port: 7777,
            protocol: PortProtocol::TcpUdp,
            checked: false,
            tls_upgrade: false,
            name: "gameport".to_string(),
        }
    }
}

impl From<&PortConfig> for PortSpec {
    fn from(config: &PortConfig) -> Self {
        Self {
            port: config.port,
            protocol: config.protocol,
            to_check: config.checked,
            tls_upgrade: config.tls_upgrade,
            name: config.name.clone(),
        }
    }
}

/// An environment variable injected into every deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentVariable {
    pub key: String,
    pub value: String,
    /// Sensitive values are hidden in the Edgegap dashboard.
    pub hidden: bool,
}

impl From<&EnvironmentVariable> for EnvVarSpec {
    fn from(var: &EnvironmentVariable) -> Self {
        Self {
            key: var.key.clone(),
            value: var.value.clone(),
            is_hidden: var.hidden,
        }
    }
}

// ---------------------------------------------------------------------------
// SettingsRecord
// ---------------------------------------------------------------------------

/// Project-wide Edgegap settings.
///
/// Every field has a default, so a partial (or empty) document loads.
/// The three credentials are [`Secret`]s: they print as `***` in `Debug`
/// and are stored in clear only in the persisted document.
///
/// The list fields come last so the TOML rendering keeps plain keys ahead
/// of the `[[ports]]` / `[[environment_variables]]` tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsRecord {
    /// Matchmaker authorization token.
    pub authorization_key: Secret,
    /// Deployer key for the Edgegap API.
    pub api_token: Secret,
    pub docker_path: String,
    pub build_configuration: BuildConfiguration,
    /// Server target to package. Empty means `<Project>Server`.
    pub overridable_target_name: String,
    pub application_name: String,
    pub image_path: String,

    /// vCPU units, 1024 = 1 vCPU.
    pub required_cpu: i32,
    /// Memory in MB.
    pub required_memory: i32,
    /// GPU units, 1024 = 1 GPU.
    pub required_gpu: i32,
    /// Minutes. 0 means no limit.
    pub max_duration: i32,
    /// Seconds before a deployment that is not ready counts as failed.
    pub estimated_deploy_time: i32,
    /// Replaces the container entrypoint when non-empty.
    pub entrypoint_override: String,
    pub command_arguments: String,

    pub use_custom_container_registry: bool,
    pub registry: String,
    pub image_repository: String,
    pub private_registry_username: String,
    pub private_registry_token: Secret,
    pub tag: String,
    pub version_name: String,

    /// Stored as-is; nothing in the toolkit verifies it.
    pub is_token_verified: bool,

    pub ports: Vec<PortConfig>,
    pub environment_variables: Vec<EnvironmentVariable>,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            authorization_key: Secret::default(),
            api_token: Secret::default(),
            docker_path: DEFAULT_DOCKER_PATH.to_string(),
            build_configuration: BuildConfiguration::Development,
            overridable_target_name: String::new(),
            application_name: String::new(),
            image_path: String::new(),
            required_cpu: 1024,
            required_memory: 1024,
            required_gpu: 0,
            max_duration: 0,
            estimated_deploy_time: 120,
            entrypoint_override: String::new(),
            command_arguments: String::new(),
            use_custom_container_registry: false,
            registry: String::new(),
            image_repository: String::new(),
            private_registry_username: String::new(),
            private_registry_token: Secret::default(),
            tag: String::new(),
            version_name: String::new(),
            is_token_verified: true,
            ports: vec![PortConfig::default()],
            environment_variables: Vec::new(),
        }
    }
}

impl SettingsRecord {
    /// The server target to package for `project_name`.
    pub fn server_target_name(&self, project_name: &str) -> String {
        if self.overridable_target_name.is_empty() {
            format!("{project_name}Server")
        } else {
            self.overridable_target_name.clone()
        }
    }

    /// The registry images are pushed to and pulled from.
    pub fn effective_registry(&self) -> &str {
        if self.use_custom_container_registry && !self.registry.is_empty() {
            &self.registry
        } else {
            DEFAULT_REGISTRY
        }
    }

    /// `registry/repository:tag`, with the tag omitted when empty.
    pub fn image_reference(&self) -> String {
        let base = format!("{}/{}", self.effective_registry(), self.image_repository);
        if self.tag.is_empty() {
            base
        } else {
            format!("{base}:{}", self.tag)
        }
    }

    pub fn deployment_ports(&self) -> Vec<PortSpec> {
        self.ports.iter().map(PortSpec::from).collect()
    }

    /// Environment variables with an empty key are skipped.
    pub fn deployment_env_vars(&self) -> Vec<EnvVarSpec> {
        self.environment_variables
            .iter()
            .filter(|var| !var.key.is_empty())
            .map(EnvVarSpec::from)
            .collect()
    }

    /// Body of `POST /v1/deploy` for the configured application version.
    pub fn deploy_request(&self, ip_list: Vec<String>) -> DeployRequest {
        DeployRequest {
            app_name: self.application_name.clone(),
            version_name: self.version_name.clone(),
            ip_list,
            env_vars: self.deployment_env_vars(),
            tags: Vec::new(),
        }
    }

    /// Body of `POST /v1/app/{app}/version` describing the configured
    /// image. Registry credentials are only sent for a custom registry.
    pub fn app_version_request(&self) -> AppVersionRequest {
        let custom = self.use_custom_container_registry;
        AppVersionRequest {
            name: self.version_name.clone(),
            is_active: true,
            docker_repository: self.effective_registry().to_string(),
            docker_image: self.image_repository.clone(),
            docker_tag: self.tag.clone(),
            private_username: if custom {
                self.private_registry_username.clone()
            } else {
                String::new()
            },
            private_token: if custom {
                self.private_registry_token.clone()
            } else {
                Secret::default()
            },
            req_cpu: self.required_cpu,
            req_memory: self.required_memory,
            req_video: self.required_gpu,
            max_duration: self.max_duration,
            time_to_deploy: self.estimated_deploy_time,
            command: self.entrypoint_override.clone(),
            arguments: self.command_arguments.clone(),
            ports: self.deployment_ports(),
            envs: self.deployment_env_vars(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let record = SettingsRecord::default();
        assert_eq!(record.build_configuration, BuildConfiguration::Development);
        assert_eq!(record.required_cpu, 1024);
        assert_eq!(record.required_memory, 1024);
        assert_eq!(record.required_gpu, 0);
        assert_eq!(record.max_duration, 0);
        assert_eq!(record.estimated_deploy_time, 120);
        assert!(record.is_token_verified);
        assert!(!record.use_custom_container_registry);
        assert_eq!(record.ports, vec![PortConfig::default()]);
        assert_eq!(record.ports[0].port, 7777);
        assert_eq!(record.ports[0].protocol, PortProtocol::TcpUdp);
        assert_eq!(record.ports[0].name, "gameport");
        assert!(record.environment_variables.is_empty());
    }

    #[test]
    fn test_debug_masks_credentials() {
        let record = SettingsRecord {
            authorization_key: Secret::new("mm-key"),
            api_token: Secret::new("api-key"),
            private_registry_token: Secret::new("reg-pass"),
            ..Default::default()
        };
        let debug = format!("{record:?}");
        assert!(!debug.contains("mm-key"));
        assert!(!debug.contains("api-key"));
        assert!(!debug.contains("reg-pass"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_server_target_name() {
        let mut record = SettingsRecord::default();
        assert_eq!(record.server_target_name("Lyra"), "LyraServer");
        record.overridable_target_name = "LyraDedicated".into();
        assert_eq!(record.server_target_name("Lyra"), "LyraDedicated");
    }

    #[test]
    fn test_image_reference() {
        let mut record = SettingsRecord {
            image_repository: "studio/game".into(),
            ..Default::default()
        };
        assert_eq!(record.image_reference(), "registry.edgegap.com/studio/game");

        record.tag = "1.2.0".into();
        record.use_custom_container_registry = true;
        record.registry = "ghcr.io".into();
        assert_eq!(record.image_reference(), "ghcr.io/studio/game:1.2.0");
    }

    #[test]
    fn test_payload_pieces() {
        let record = SettingsRecord {
            environment_variables: vec![
                EnvironmentVariable {
                    key: "MODE".into(),
                    value: "ranked".into(),
                    hidden: false,
                },
                EnvironmentVariable::default(),
            ],
            ..Default::default()
        };

        let ports = record.deployment_ports();
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].port, 7777);
        assert!(!ports[0].to_check);

        let envs = record.deployment_env_vars();
        assert_eq!(envs.len(), 1);
        assert_eq!(envs[0].key, "MODE");
    }

    #[test]
    fn test_deploy_request_uses_app_and_version() {
        let record = SettingsRecord {
            application_name: "game".into(),
            version_name: "v3".into(),
            ..Default::default()
        };
        let request = record.deploy_request(vec!["1.2.3.4".into()]);
        assert_eq!(request.app_name, "game");
        assert_eq!(request.version_name, "v3");
        assert_eq!(request.ip_list, vec!["1.2.3.4".to_string()]);
    }

    #[test]
    fn test_app_version_request_only_sends_custom_registry_credentials() {
        let mut record = SettingsRecord {
            version_name: "v3".into(),
            image_repository: "studio/game".into(),
            tag: "v3".into(),
            private_registry_username: "bot".into(),
            private_registry_token: Secret::new("reg-pass"),
            entrypoint_override: "/app/start.sh".into(),
            ..Default::default()
        };

        let request = record.app_version_request();
        assert_eq!(request.docker_repository, DEFAULT_REGISTRY);
        assert_eq!(request.private_username, "");
        assert!(request.private_token.is_empty());
        assert_eq!(request.req_cpu, 1024);
        assert_eq!(request.time_to_deploy, 120);
        assert_eq!(request.command, "/app/start.sh");

        record.use_custom_container_registry = true;
        record.registry = "ghcr.io".into();
        let request = record.app_version_request();
        assert_eq!(request.docker_repository, "ghcr.io");
        assert_eq!(request.private_username, "bot");
        assert_eq!(request.private_token.expose(), "reg-pass");
    }
}
