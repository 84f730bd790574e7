//! Deployment lifecycle and application-version endpoints.

use edgegap_models::{
    Acknowledgement, AppVersion, AppVersionRequest, DeployRequest, Deployment,
    DeploymentReceipt,
};
use edgegap_transport::{HttpRequest, Method};

use crate::endpoint::{path_segment, require, to_json};
use crate::{ApiTarget, Endpoint, EndpointError};

/// `POST /v1/deploy`: start a server for an application version.
#[derive(Debug, Clone)]
pub struct CreateDeployment {
    pub target: ApiTarget,
    pub request: DeployRequest,
}

impl CreateDeployment {
    pub fn new(target: ApiTarget, request: DeployRequest) -> Self {
        Self { target, request }
    }
}

impl Endpoint for CreateDeployment {
    type Response = DeploymentReceipt;
    const NAME: &'static str = "create_deployment";

    fn into_request(self) -> Result<HttpRequest, EndpointError> {
        require(&self.request.app_name, "app_name")?;
        require(&self.request.version_name, "version_name")?;
        let body = to_json(&self.request)?;
        Ok(self.target.request(Method::Post, "/v1/deploy")?.json(body))
    }
}

/// `GET /v1/status/{request_id}`: follow a deployment.
#[derive(Debug, Clone)]
pub struct GetDeploymentStatus {
    pub target: ApiTarget,
    pub request_id: String,
}

impl GetDeploymentStatus {
    pub fn new(target: ApiTarget, request_id: impl Into<String>) -> Self {
        Self {
            target,
            request_id: request_id.into(),
        }
    }
}

impl Endpoint for GetDeploymentStatus {
    type Response = Deployment;
    const NAME: &'static str = "get_deployment_status";

    fn into_request(self) -> Result<HttpRequest, EndpointError> {
        let id = path_segment(&self.request_id, "request_id")?;
        self.target.request(Method::Get, &format!("/v1/status/{id}"))
    }
}

/// `DELETE /v1/stop/{request_id}`: tear a deployment down.
#[derive(Debug, Clone)]
pub struct StopDeployment {
    pub target: ApiTarget,
    pub request_id: String,
}

impl StopDeployment {
    pub fn new(target: ApiTarget, request_id: impl Into<String>) -> Self {
        Self {
            target,
            request_id: request_id.into(),
        }
    }
}

impl Endpoint for StopDeployment {
    type Response = Acknowledgement;
    const NAME: &'static str = "stop_deployment";

    fn into_request(self) -> Result<HttpRequest, EndpointError> {
        let id = path_segment(&self.request_id, "request_id")?;
        self.target.request(Method::Delete, &format!("/v1/stop/{id}"))
    }
}

/// `POST /v1/app/{app}/version`: register a container image as a new
/// application version.
#[derive(Debug, Clone)]
pub struct CreateAppVersion {
    pub target: ApiTarget,
    pub app_name: String,
    pub request: AppVersionRequest,
}

impl CreateAppVersion {
    pub fn new(
        target: ApiTarget,
        app_name: impl Into<String>,
        request: AppVersionRequest,
    ) -> Self {
        Self {
            target,
            app_name: app_name.into(),
            request,
        }
    }
}

impl Endpoint for CreateAppVersion {
    type Response = AppVersion;
    const NAME: &'static str = "create_app_version";

    fn into_request(self) -> Result<HttpRequest, EndpointError> {
        let app = path_segment(&self.app_name, "app_name")?;
        require(&self.request.name, "version_name")?;
        let body = to_json(&self.request)?;
        let token = self.request.private_token.clone();
        Ok(self
            .target
            .request(Method::Post, &format!("/v1/app/{app}/version"))?
            .json(body)
            .sensitive(token))
    }
}
