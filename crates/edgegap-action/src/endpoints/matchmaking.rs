//! Matchmaker ticket endpoints.

use edgegap_models::{Acknowledgement, CreateTicketRequest, MatchmakingTicket};
use edgegap_transport::{HttpRequest, Method};
use serde_json::Value;

use crate::endpoint::{path_segment, require, to_json};
use crate::{Endpoint, EndpointError, MatchmakerTarget};

/// `POST /tickets`: queue a player for matchmaking.
#[derive(Debug, Clone)]
pub struct CreateMatchmakingTicket {
    pub target: MatchmakerTarget,
    pub request: CreateTicketRequest,
}

impl CreateMatchmakingTicket {
    pub fn new(target: MatchmakerTarget, profile: impl Into<String>) -> Self {
        Self {
            target,
            request: CreateTicketRequest {
                profile: profile.into(),
                ..Default::default()
            },
        }
    }

    /// Adds one profile attribute (latencies, skill, selected modes, ...).
    pub fn attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.request.attributes.insert(key.into(), value);
        self
    }

    /// Overrides the player IP the matchmaker sees.
    pub fn player_ip(mut self, ip: impl Into<String>) -> Self {
        self.request.player_ip = Some(ip.into());
        self
    }
}

impl Endpoint for CreateMatchmakingTicket {
    type Response = MatchmakingTicket;
    const NAME: &'static str = "create_matchmaking_ticket";

    fn into_request(self) -> Result<HttpRequest, EndpointError> {
        require(&self.request.profile, "profile")?;
        let body = to_json(&self.request)?;
        Ok(self.target.request(Method::Post, "/tickets")?.json(body))
    }
}

/// `GET /tickets/{id}`: poll a ticket for its assignment.
#[derive(Debug, Clone)]
pub struct GetMatchmakingTicket {
    pub target: MatchmakerTarget,
    pub ticket_id: String,
}

impl GetMatchmakingTicket {
    pub fn new(target: MatchmakerTarget, ticket_id: impl Into<String>) -> Self {
        Self {
            target,
            ticket_id: ticket_id.into(),
        }
    }
}

impl Endpoint for GetMatchmakingTicket {
    type Response = MatchmakingTicket;
    const NAME: &'static str = "get_matchmaking_ticket";

    fn into_request(self) -> Result<HttpRequest, EndpointError> {
        let id = path_segment(&self.ticket_id, "ticket_id")?;
        self.target.request(Method::Get, &format!("/tickets/{id}"))
    }
}

/// `DELETE /tickets/{id}`: leave the queue.
#[derive(Debug, Clone)]
pub struct DeleteMatchmakingTicket {
    pub target: MatchmakerTarget,
    pub ticket_id: String,
}

impl DeleteMatchmakingTicket {
    pub fn new(target: MatchmakerTarget, ticket_id: impl Into<String>) -> Self {
        Self {
            target,
            ticket_id: ticket_id.into(),
        }
    }
}

impl Endpoint for DeleteMatchmakingTicket {
    type Response = Acknowledgement;
    const NAME: &'static str = "delete_matchmaking_ticket";

    fn into_request(self) -> Result<HttpRequest, EndpointError> {
        let id = path_segment(&self.ticket_id, "ticket_id")?;
        self.target.request(Method::Delete, &format!("/tickets/{id}"))
    }
}
