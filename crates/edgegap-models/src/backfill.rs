//! Backfill models.
//!
//! A backfill asks the matchmaker to top up a running server with extra
//! players. The server creates one, the matchmaker assigns tickets to it,
//! and the server polls it to learn who is coming.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::ResponseModel;
use crate::lenient;

/// A backfill as returned by `POST /backfills` and `GET /backfills/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackfillTicketInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub profile: String,

    /// Ticket id → ticket record. Records that arrive as JSON objects are
    /// kept as their JSON text.
    #[serde(deserialize_with = "lenient::string_map")]
    pub tickets: BTreeMap<String, String>,

    #[serde(deserialize_with = "lenient::string")]
    pub status: String,

    #[serde(deserialize_with = "lenient::string")]
    pub assigned_ticket: String,

    #[serde(deserialize_with = "lenient::string")]
    pub group_id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub created_at: String,
}

impl ResponseModel for BackfillTicketInfo {}

/// Body of `POST /backfills`.
///
/// `tickets` carries the tickets already on the server, keyed by ticket
/// id, so the matchmaker can match newcomers against them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateBackfillRequest {
    pub profile: String,
    pub attributes: Map<String, Value>,
    pub tickets: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_backfill() {
        let body = br#"{
            "id": "bf-1",
            "profile": "ranked",
            "tickets": { "t1": "HOST_ASSIGNED", "t2": { "id": "t2" } },
            "status": "SEARCHING",
            "assigned_ticket": "t1",
            "group_id": "g1",
            "created_at": "2024-05-01T10:00:00Z",
            "unknown_key": [1, 2, 3]
        }"#;
        let info = BackfillTicketInfo::from_body(body).unwrap();
        assert_eq!(info.id, "bf-1");
        assert_eq!(info.profile, "ranked");
        assert_eq!(info.tickets.len(), 2);
        assert_eq!(info.tickets["t1"], "HOST_ASSIGNED");
        assert_eq!(info.tickets["t2"], r#"{"id":"t2"}"#);
        assert_eq!(info.status, "SEARCHING");
        assert_eq!(info.assigned_ticket, "t1");
        assert_eq!(info.group_id, "g1");
        assert_eq!(info.created_at, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let info = BackfillTicketInfo::from_body(br#"{"id":"bf-2"}"#).unwrap();
        assert_eq!(
            info,
            BackfillTicketInfo {
                id: "bf-2".into(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_empty_body_is_an_error() {
        assert!(BackfillTicketInfo::from_body(b"").is_err());
    }
}
