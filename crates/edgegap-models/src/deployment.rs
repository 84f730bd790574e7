//! Deployment and application-version models.
//!
//! Deployments run on the Edgegap REST API (`/v1/...`), unlike tickets and
//! backfills which run on a per-game matchmaker.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::ResponseModel;
use crate::lenient;
use crate::matchmaking::{GamePort, Location};
use crate::Secret;

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

/// Reply to `POST /v1/deploy`: the request was accepted and a deployment
/// is on its way. Poll [`Deployment`] with `request_id` to follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentReceipt {
    #[serde(deserialize_with = "lenient::string")]
    pub request_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub request_dns: String,
    #[serde(deserialize_with = "lenient::string")]
    pub request_app: String,
    #[serde(deserialize_with = "lenient::string")]
    pub request_version: String,
    #[serde(deserialize_with = "lenient::int")]
    pub request_user_count: i32,
    #[serde(deserialize_with = "lenient::string")]
    pub city: String,
    #[serde(deserialize_with = "lenient::string")]
    pub country: String,
    #[serde(deserialize_with = "lenient::string")]
    pub continent: String,
    #[serde(deserialize_with = "lenient::string")]
    pub administrative_division: String,
}

impl ResponseModel for DeploymentReceipt {}

/// Reply to `GET /v1/status/{request_id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deployment {
    #[serde(deserialize_with = "lenient::string")]
    pub request_id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub fqdn: String,

    #[serde(deserialize_with = "lenient::string")]
    pub public_ip: String,

    /// e.g. `Status.DEPLOYING`, `Status.READY`, `Status.TERMINATED`.
    #[serde(deserialize_with = "lenient::string")]
    pub current_status: String,

    #[serde(deserialize_with = "lenient::boolean")]
    pub running: bool,

    #[serde(deserialize_with = "lenient::boolean")]
    pub error: bool,

    #[serde(deserialize_with = "lenient::string")]
    pub error_detail: String,

    #[serde(deserialize_with = "lenient::object_map")]
    pub ports: BTreeMap<String, GamePort>,

    #[serde(deserialize_with = "lenient::object")]
    pub location: Location,
}

impl ResponseModel for Deployment {}

impl Deployment {
    /// Returns `true` once the deployment is up and reachable.
    pub fn is_ready(&self) -> bool {
        self.running && self.current_status.ends_with("READY")
    }
}

/// Reply to `POST /v1/app/{app}/version`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppVersion {
    #[serde(deserialize_with = "lenient::boolean")]
    pub success: bool,

    #[serde(deserialize_with = "lenient::object")]
    pub version: AppVersionInfo,
}

impl ResponseModel for AppVersion {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppVersionInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_active: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub docker_repository: String,
    #[serde(deserialize_with = "lenient::string")]
    pub docker_image: String,
    #[serde(deserialize_with = "lenient::string")]
    pub docker_tag: String,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Transport protocol of an exposed port.
///
/// Serialized as the exact strings the API expects: `"TCP"`, `"UDP"`,
/// `"TCP/UDP"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
pub enum PortProtocol {
    #[serde(rename = "TCP")]
    Tcp,
    #[serde(rename = "UDP")]
    Udp,
    #[default]
    #[serde(rename = "TCP/UDP")]
    TcpUdp,
}

impl fmt::Display for PortProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => write!(f, "TCP"),
            Self::Udp => write!(f, "UDP"),
            Self::TcpUdp => write!(f, "TCP/UDP"),
        }
    }
}

/// One port of an application version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortSpec {
    pub port: i32,
    pub protocol: PortProtocol,
    pub to_check: bool,
    pub tls_upgrade: bool,
    pub name: String,
}

/// One environment variable injected into a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvVarSpec {
    pub key: String,
    pub value: String,
    pub is_hidden: bool,
}

/// Body of `POST /v1/deploy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeployRequest {
    pub app_name: String,
    pub version_name: String,
    /// Player IPs used to pick the best location.
    pub ip_list: Vec<String>,
    pub env_vars: Vec<EnvVarSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Body of `POST /v1/app/{app}/version`: how to run a container image.
///
/// Built from the persisted settings record. Contains the private registry
/// token, so its `Debug` output masks it (see [`Secret`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppVersionRequest {
    pub name: String,
    pub is_active: bool,
    pub docker_repository: String,
    pub docker_image: String,
    pub docker_tag: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub private_username: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub private_token: Secret,
    /// vCPU units, 1024 = 1 vCPU.
    pub req_cpu: i32,
    /// Memory in MB.
    pub req_memory: i32,
    /// GPU units, 1024 = 1 GPU.
    pub req_video: i32,
    /// Minutes; 0 means no limit.
    pub max_duration: i32,
    /// Seconds to wait before considering a deploy failed.
    pub time_to_deploy: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub command: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub arguments: String,
    pub ports: Vec<PortSpec>,
    pub envs: Vec<EnvVarSpec>,
}
