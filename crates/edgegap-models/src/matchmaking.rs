//! Matchmaker ticket models.
//!
//! A ticket is one player's (or group's) request to be matched. Once the
//! matchmaker finds a match and a server is deployed, the ticket gains an
//! [`Assignment`] describing where to connect.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::ResponseModel;
use crate::lenient;

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

/// A matchmaking ticket as returned by `POST /tickets` and
/// `GET /tickets/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakingTicket {
    #[serde(rename = "id", deserialize_with = "lenient::string")]
    pub ticket_id: String,

    #[serde(rename = "profile", deserialize_with = "lenient::string")]
    pub game_profile: String,

    #[serde(deserialize_with = "lenient::string")]
    pub group_id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub team_id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub player_ip: String,

    /// `SEARCHING`, `MATCH_FOUND`, `HOST_ASSIGNED`, `TEAM_FOUND`, ...
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,

    /// RFC 3339 timestamp, kept as the server sent it.
    #[serde(deserialize_with = "lenient::string")]
    pub created_at: String,

    /// Empty (all defaults) until the ticket is assigned a server.
    #[serde(deserialize_with = "lenient::object")]
    pub assignment: Assignment,
}

impl ResponseModel for MatchmakingTicket {}

impl MatchmakingTicket {
    /// Returns `true` once the matchmaker has handed out a server.
    pub fn is_assigned(&self) -> bool {
        !self.assignment.fqdn.is_empty() || !self.assignment.public_ip.is_empty()
    }
}

/// Where a matched ticket should connect.
///
/// On the wire, ports arrive as a map keyed by port name. We surface the
/// one named `gameport` (or, failing that, the first one by name) as
/// [`game_port`](Self::game_port), since that is the port clients need.
/// Serializing writes it back under `ports.gameport`, so a ticket survives
/// a round trip through JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAssignment", into = "RawAssignment")]
pub struct Assignment {
    pub fqdn: String,
    pub public_ip: String,
    pub game_port: GamePort,
    pub location: Location,
}

/// Wire shape of [`Assignment`], before picking the game port.
#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct RawAssignment {
    #[serde(deserialize_with = "lenient::string")]
    fqdn: String,
    #[serde(deserialize_with = "lenient::string")]
    public_ip: String,
    #[serde(deserialize_with = "lenient::object_map")]
    ports: BTreeMap<String, GamePort>,
    #[serde(deserialize_with = "lenient::object")]
    location: Location,
}

impl From<RawAssignment> for Assignment {
    fn from(mut raw: RawAssignment) -> Self {
        let game_port = match raw.ports.remove("gameport") {
            Some(port) => port,
            None => raw.ports.into_values().next().unwrap_or_default(),
        };
        Self {
            fqdn: raw.fqdn,
            public_ip: raw.public_ip,
            game_port,
            location: raw.location,
        }
    }
}

impl From<Assignment> for RawAssignment {
    fn from(assignment: Assignment) -> Self {
        let mut ports = BTreeMap::new();
        if assignment.game_port != GamePort::default() {
            ports.insert("gameport".to_string(), assignment.game_port);
        }
        Self {
            fqdn: assignment.fqdn,
            public_ip: assignment.public_ip,
            ports,
            location: assignment.location,
        }
    }
}

/// One exposed port of a deployed server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamePort {
    #[serde(rename = "internal", deserialize_with = "lenient::int")]
    pub internal_port: i32,

    #[serde(rename = "external", deserialize_with = "lenient::int")]
    pub external_port: i32,

    #[serde(deserialize_with = "lenient::string")]
    pub protocol: String,

    /// `host:port` ready to hand to a client.
    #[serde(deserialize_with = "lenient::string")]
    pub link: String,
}

/// Geographic location of a deployed server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "lenient::string")]
    pub city: String,
    #[serde(deserialize_with = "lenient::string")]
    pub country: String,
    #[serde(deserialize_with = "lenient::string")]
    pub continent: String,
    #[serde(deserialize_with = "lenient::string")]
    pub administrative_division: String,
    #[serde(deserialize_with = "lenient::string")]
    pub timezone: String,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Body of `POST /tickets`.
///
/// `attributes` is profile-specific (latency beacons, skill rating,
/// selected maps, ...), so it stays an untyped JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateTicketRequest {
    pub profile: String,
    pub attributes: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_ip: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ResponseModel;

    const ASSIGNED: &str = r#"{
        "id": "tkt-1",
        "profile": "casual",
        "group_id": "grp-9",
        "team_id": "team-2",
        "player_ip": "1.2.3.4",
        "status": "HOST_ASSIGNED",
        "created_at": "2024-05-01T10:00:00Z",
        "assignment": {
            "fqdn": "abc.edgegap.net",
            "public_ip": "5.6.7.8",
            "ports": {
                "web": { "internal": 80, "external": 30080, "protocol": "TCP" },
                "gameport": {
                    "internal": 7777,
                    "external": 31504,
                    "protocol": "UDP",
                    "link": "abc.edgegap.net:31504"
                }
            },
            "location": {
                "city": "Montreal",
                "country": "Canada",
                "continent": "North America",
                "administrative_division": "Quebec",
                "timezone": "America/Toronto"
            }
        }
    }"#;

    #[test]
    fn test_assigned_ticket_decodes_every_field() {
        let ticket = MatchmakingTicket::from_body(ASSIGNED.as_bytes()).unwrap();
        assert_eq!(ticket.ticket_id, "tkt-1");
        assert_eq!(ticket.game_profile, "casual");
        assert_eq!(ticket.group_id, "grp-9");
        assert_eq!(ticket.team_id, "team-2");
        assert_eq!(ticket.status, "HOST_ASSIGNED");
        assert!(ticket.is_assigned());

        let a = &ticket.assignment;
        assert_eq!(a.fqdn, "abc.edgegap.net");
        assert_eq!(a.game_port.internal_port, 7777);
        assert_eq!(a.game_port.external_port, 31504);
        assert_eq!(a.game_port.protocol, "UDP");
        assert_eq!(a.location.city, "Montreal");
        assert_eq!(a.location.timezone, "America/Toronto");
    }

    #[test]
    fn test_ticket_survives_json_round_trip() {
        let ticket = MatchmakingTicket::from_body(ASSIGNED.as_bytes()).unwrap();
        let json = serde_json::to_string(&ticket).unwrap();
        let back = MatchmakingTicket::from_body(json.as_bytes()).unwrap();
        assert_eq!(back.assignment.game_port.external_port, 31504);
        assert_eq!(back.assignment.game_port.link, "abc.edgegap.net:31504");
        assert_eq!(back, ticket);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "tkt-1");
        assert_eq!(value["assignment"]["ports"]["gameport"]["external"], 31504);
    }

    #[test]
    fn test_unassigned_ticket_serializes_without_ports() {
        let ticket = MatchmakingTicket {
            ticket_id: "tkt-3".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["assignment"]["ports"], serde_json::json!({}));
        let back: MatchmakingTicket = serde_json::from_value(value).unwrap();
        assert_eq!(back, ticket);
    }

    #[test]
    fn test_searching_ticket_has_empty_assignment() {
        let body = br#"{"id":"tkt-2","status":"SEARCHING","assignment":null}"#;
        let ticket = MatchmakingTicket::from_body(body).unwrap();
        assert_eq!(ticket.ticket_id, "tkt-2");
        assert_eq!(ticket.assignment, Assignment::default());
        assert!(!ticket.is_assigned());
    }

    #[test]
    fn test_game_port_falls_back_to_first_port() {
        let body = br#"{"assignment":{"ports":{"b":{"internal":2},"a":{"internal":1}}}}"#;
        let ticket = MatchmakingTicket::from_body(body).unwrap();
        assert_eq!(ticket.assignment.game_port.internal_port, 1);
    }

    #[test]
    fn test_create_ticket_request_omits_missing_ip() {
        let req = CreateTicketRequest {
            profile: "casual".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"profile":"casual","attributes":{}}));
    }
}
