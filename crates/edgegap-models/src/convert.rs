//! Pure formatting and conversion helpers.
//!
//! None of these can fail: malformed input yields an empty result, never
//! an error.

use serde_json::Value;

use crate::lenient::value_to_text;
use crate::{Assignment, ErrorDescriptor, MatchmakingTicket};

/// Renders an error as `"Error Code: {code}, Error Message: {message}"`.
///
/// Same text as the descriptor's `Display`; provided as a free function
/// for callers that format through function pointers.
pub fn error_to_string(error: &ErrorDescriptor) -> String {
    error.to_string()
}

/// Renders the game port and location of an assignment on one line.
pub fn assignment_to_string(assignment: &Assignment) -> String {
    let port = &assignment.game_port;
    let loc = &assignment.location;
    format!(
        "Internal Port: {}, External Port: {}, Protocol: {}, City: {}, \
         Country: {}, Continent: {}, Administrative Division: {}, Timezone: {}",
        port.internal_port,
        port.external_port,
        port.protocol,
        loc.city,
        loc.country,
        loc.continent,
        loc.administrative_division,
        loc.timezone,
    )
}

pub fn matchmaking_ticket_to_string(ticket: &MatchmakingTicket) -> String {
    format!(
        "Ticket ID: {}, Game Profile: {}, Created At: {}, Assignment: {}",
        ticket.ticket_id,
        ticket.game_profile,
        ticket.created_at,
        assignment_to_string(&ticket.assignment),
    )
}

/// Parses `text` as a JSON array and returns its elements as strings.
///
/// Strings are kept verbatim; numbers and booleans become their JSON text;
/// `null`, arrays, and objects become `""`. Order and length match the
/// array. Anything that is not a JSON array (including malformed JSON)
/// yields an empty vector.
///
/// ```rust
/// use edgegap_models::json_array_to_strings;
///
/// assert_eq!(json_array_to_strings(r#"["a", 1, true]"#), ["a", "1", "true"]);
/// assert!(json_array_to_strings("{oops").is_empty());
/// ```
pub fn json_array_to_strings(text: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items.iter().map(value_to_text).collect(),
        _ => Vec::new(),
    }
}
