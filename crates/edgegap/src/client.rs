//! `EdgegapClient` builder and per-endpoint action factories.
//!
//! The client holds the two targets (matchmaker and deployment API), the
//! shared transport, and optionally a snapshot of the settings record.
//! Each factory method returns a fresh [`RequestAction`]; nothing is sent
//! until the caller activates or runs it.

use std::sync::Arc;

use edgegap_action::endpoints::{
    CreateAppVersion, CreateBackfill, CreateDeployment,
    CreateMatchmakingTicket, DeleteBackfill, DeleteMatchmakingTicket,
    GetBackfillTicketInformation, GetDeploymentStatus, GetMatchmakingTicket,
    StopDeployment,
};
use edgegap_action::{
    ApiTarget, Endpoint, MatchmakerTarget, RequestAction, DEFAULT_API_URL,
};
use edgegap_models::{
    AppVersionRequest, CreateBackfillRequest, CreateTicketRequest,
    DeployRequest, Secret,
};
use edgegap_settings::SettingsRecord;
use edgegap_transport::{HttpTransport, ReqwestTransport};

use crate::EdgegapError;

/// Builder for configuring an [`EdgegapClient`].
///
/// # Example
///
/// ```rust,no_run
/// use edgegap::prelude::*;
///
/// # fn demo() -> Result<(), EdgegapError> {
/// let client = EdgegapClient::builder()
///     .matchmaker("https://my-mm.edgegap.net", "mm-token")
///     .api_token("deployer-key")
///     .build()?;
/// let action = client.get_matchmaking_ticket("ticket-id");
/// # let _ = action;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EdgegapClientBuilder {
    matchmaker_url: String,
    matchmaker_token: Option<Secret>,
    api_url: String,
    api_token: Option<Secret>,
    settings: Option<SettingsRecord>,
}

impl EdgegapClientBuilder {
    /// Creates a new builder targeting the public API and no matchmaker.
    pub fn new() -> Self {
        Self {
            matchmaker_url: String::new(),
            matchmaker_token: None,
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            settings: None,
        }
    }

    /// Sets the matchmaker base URL and its authorization token.
    pub fn matchmaker(
        mut self,
        url: impl Into<String>,
        token: impl Into<Secret>,
    ) -> Self {
        self.matchmaker_url = url.into();
        self.matchmaker_token = Some(token.into());
        self
    }

    /// Sets only the matchmaker base URL. The token then comes from the
    /// attached settings.
    pub fn matchmaker_url(mut self, url: impl Into<String>) -> Self {
        self.matchmaker_url = url.into();
        self
    }

    /// Overrides the deployment API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Sets the deployer key for the deployment API.
    pub fn api_token(mut self, token: impl Into<Secret>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Attaches a settings snapshot.
    ///
    /// Tokens not set explicitly are taken from it, and the
    /// `*_from_settings` factories build their payloads from it.
    pub fn settings(mut self, record: SettingsRecord) -> Self {
        self.settings = Some(record);
        self
    }

    /// Builds the client over a new [`ReqwestTransport`].
    ///
    /// # Errors
    /// [`EdgegapError::Transport`] if the HTTP client cannot be created.
    pub fn build(self) -> Result<EdgegapClient<ReqwestTransport>, EdgegapError> {
        let transport = ReqwestTransport::new()?;
        Ok(self.build_with(Arc::new(transport)))
    }

    /// Builds the client over a caller-supplied transport.
    pub fn build_with<T: HttpTransport>(self, transport: Arc<T>) -> EdgegapClient<T> {
        let settings = self.settings.as_ref();
        let matchmaker_token = self
            .matchmaker_token
            .or_else(|| settings.map(|r| r.authorization_key.clone()))
            .unwrap_or_default();
        let api_token = self
            .api_token
            .or_else(|| settings.map(|r| r.api_token.clone()))
            .unwrap_or_default();

        tracing::debug!(
            matchmaker_url = %self.matchmaker_url,
            api_url = %self.api_url,
            has_settings = self.settings.is_some(),
            "edgegap client built"
        );

        EdgegapClient {
            matchmaker: MatchmakerTarget::new(self.matchmaker_url, matchmaker_token),
            api: ApiTarget::new(api_token).with_url(self.api_url),
            settings: self.settings.map(Arc::new),
            transport,
        }
    }
}

impl Default for EdgegapClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point for issuing Edgegap requests.
///
/// Cloning is cheap: the transport and the settings snapshot are shared.
pub struct EdgegapClient<T: HttpTransport = ReqwestTransport> {
    matchmaker: MatchmakerTarget,
    api: ApiTarget,
    settings: Option<Arc<SettingsRecord>>,
    transport: Arc<T>,
}

impl<T: HttpTransport> Clone for EdgegapClient<T> {
    fn clone(&self) -> Self {
        Self {
            matchmaker: self.matchmaker.clone(),
            api: self.api.clone(),
            settings: self.settings.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl EdgegapClient {
    /// Creates a new builder.
    pub fn builder() -> EdgegapClientBuilder {
        EdgegapClientBuilder::new()
    }
}

impl<T: HttpTransport> EdgegapClient<T> {
    pub fn matchmaker_target(&self) -> &MatchmakerTarget {
        &self.matchmaker
    }

    pub fn api_target(&self) -> &ApiTarget {
        &self.api
    }

    pub fn settings(&self) -> Option<&SettingsRecord> {
        self.settings.as_deref()
    }

    /// Wraps any endpoint descriptor, including ones defined outside the
    /// toolkit, in an action over this client's transport.
    pub fn action<E: Endpoint>(&self, endpoint: E) -> RequestAction<E, T> {
        RequestAction::new(endpoint, Arc::clone(&self.transport))
    }

    // -- matchmaking ------------------------------------------------------

    pub fn create_matchmaking_ticket(
        &self,
        request: CreateTicketRequest,
    ) -> RequestAction<CreateMatchmakingTicket, T> {
        self.action(CreateMatchmakingTicket {
            target: self.matchmaker.clone(),
            request,
        })
    }

    pub fn get_matchmaking_ticket(
        &self,
        ticket_id: impl Into<String>,
    ) -> RequestAction<GetMatchmakingTicket, T> {
        self.action(GetMatchmakingTicket::new(self.matchmaker.clone(), ticket_id))
    }

    pub fn delete_matchmaking_ticket(
        &self,
        ticket_id: impl Into<String>,
    ) -> RequestAction<DeleteMatchmakingTicket, T> {
        self.action(DeleteMatchmakingTicket::new(
            self.matchmaker.clone(),
            ticket_id,
        ))
    }

    // -- backfill ---------------------------------------------------------

    pub fn create_backfill(
        &self,
        request: CreateBackfillRequest,
    ) -> RequestAction<CreateBackfill, T> {
        self.action(CreateBackfill {
            target: self.matchmaker.clone(),
            request,
        })
    }

    pub fn get_backfill_ticket_information(
        &self,
        backfill_id: impl Into<String>,
    ) -> RequestAction<GetBackfillTicketInformation, T> {
        self.action(GetBackfillTicketInformation::new(
            self.matchmaker.clone(),
            backfill_id,
        ))
    }

    pub fn delete_backfill(
        &self,
        backfill_id: impl Into<String>,
    ) -> RequestAction<DeleteBackfill, T> {
        self.action(DeleteBackfill::new(self.matchmaker.clone(), backfill_id))
    }

    // -- deployments ------------------------------------------------------

    pub fn create_deployment(
        &self,
        request: DeployRequest,
    ) -> RequestAction<CreateDeployment, T> {
        self.action(CreateDeployment::new(self.api.clone(), request))
    }

    /// Deploys the application version named in the attached settings.
    ///
    /// # Errors
    /// [`EdgegapError::NoSettings`] if the client has no settings.
    pub fn deploy_from_settings(
        &self,
        ip_list: Vec<String>,
    ) -> Result<RequestAction<CreateDeployment, T>, EdgegapError> {
        let record = self.settings.as_ref().ok_or(EdgegapError::NoSettings)?;
        Ok(self.create_deployment(record.deploy_request(ip_list)))
    }

    pub fn get_deployment_status(
        &self,
        request_id: impl Into<String>,
    ) -> RequestAction<GetDeploymentStatus, T> {
        self.action(GetDeploymentStatus::new(self.api.clone(), request_id))
    }

    pub fn stop_deployment(
        &self,
        request_id: impl Into<String>,
    ) -> RequestAction<StopDeployment, T> {
        self.action(StopDeployment::new(self.api.clone(), request_id))
    }

    pub fn create_app_version(
        &self,
        app_name: impl Into<String>,
        request: AppVersionRequest,
    ) -> RequestAction<CreateAppVersion, T> {
        self.action(CreateAppVersion::new(self.api.clone(), app_name, request))
    }

    /// Registers the image described by the attached settings as a new
    /// version of the configured application.
    ///
    /// # Errors
    /// [`EdgegapError::NoSettings`] if the client has no settings.
    pub fn create_app_version_from_settings(
        &self,
    ) -> Result<RequestAction<CreateAppVersion, T>, EdgegapError> {
        let record = self.settings.as_ref().ok_or(EdgegapError::NoSettings)?;
        Ok(self.create_app_version(
            record.application_name.clone(),
            record.app_version_request(),
        ))
    }
}
