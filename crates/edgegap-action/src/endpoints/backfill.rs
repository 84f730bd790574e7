//! Backfill endpoints.

use edgegap_models::{Acknowledgement, BackfillTicketInfo, CreateBackfillRequest};
use edgegap_transport::{HttpRequest, Method};
use serde_json::Value;

use crate::endpoint::{path_segment, require, to_json};
use crate::{Endpoint, EndpointError, MatchmakerTarget};

/// `POST /backfills`: ask the matchmaker for more players.
#[derive(Debug, Clone)]
pub struct CreateBackfill {
    pub target: MatchmakerTarget,
    pub request: CreateBackfillRequest,
}

impl CreateBackfill {
    pub fn new(target: MatchmakerTarget, profile: impl Into<String>) -> Self {
        Self {
            target,
            request: CreateBackfillRequest {
                profile: profile.into(),
                ..Default::default()
            },
        }
    }

    pub fn attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.request.attributes.insert(key.into(), value);
        self
    }

    /// Adds a ticket already playing on this server.
    pub fn ticket(mut self, ticket_id: impl Into<String>, ticket: Value) -> Self {
        self.request.tickets.insert(ticket_id.into(), ticket);
        self
    }
}

impl Endpoint for CreateBackfill {
    type Response = BackfillTicketInfo;
    const NAME: &'static str = "create_backfill";

    fn into_request(self) -> Result<HttpRequest, EndpointError> {
        require(&self.request.profile, "profile")?;
        let body = to_json(&self.request)?;
        Ok(self.target.request(Method::Post, "/backfills")?.json(body))
    }
}

/// `GET /backfills/{id}`: read a backfill and its assigned tickets.
#[derive(Debug, Clone)]
pub struct GetBackfillTicketInformation {
    pub target: MatchmakerTarget,
    pub backfill_id: String,
}

impl GetBackfillTicketInformation {
    pub fn new(
        target: MatchmakerTarget,
        backfill_id: impl Into<String>,
    ) -> Self {
        Self {
            target,
            backfill_id: backfill_id.into(),
        }
    }
}

impl Endpoint for GetBackfillTicketInformation {
    type Response = BackfillTicketInfo;
    const NAME: &'static str = "get_backfill_ticket_information";

    fn into_request(self) -> Result<HttpRequest, EndpointError> {
        let id = path_segment(&self.backfill_id, "backfill_id")?;
        self.target.request(Method::Get, &format!("/backfills/{id}"))
    }
}

/// `DELETE /backfills/{id}`: stop looking for players.
#[derive(Debug, Clone)]
pub struct DeleteBackfill {
    pub target: MatchmakerTarget,
    pub backfill_id: String,
}

impl DeleteBackfill {
    pub fn new(
        target: MatchmakerTarget,
        backfill_id: impl Into<String>,
    ) -> Self {
        Self {
            target,
            backfill_id: backfill_id.into(),
        }
    }
}

impl Endpoint for DeleteBackfill {
    type Response = Acknowledgement;
    const NAME: &'static str = "delete_backfill";

    fn into_request(self) -> Result<HttpRequest, EndpointError> {
        let id = path_segment(&self.backfill_id, "backfill_id")?;
        self.target.request(Method::Delete, &format!("/backfills/{id}"))
    }
}
