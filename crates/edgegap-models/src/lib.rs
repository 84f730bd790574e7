//! Data shapes for the Edgegap API.
//!
//! This crate defines everything that travels between the toolkit and the
//! Edgegap services:
//!
//! - **Error descriptor** ([`ErrorDescriptor`]): the uniform
//!   `{code, message}` pair every failed remote call produces.
//! - **Response models** ([`MatchmakingTicket`], [`BackfillTicketInfo`],
//!   [`Deployment`], ...): typed records decoded from JSON bodies.
//! - **Request payloads** ([`CreateTicketRequest`], [`DeployRequest`],
//!   [`AppVersionRequest`], ...): the JSON bodies we send.
//! - **Conversions** ([`json_array_to_strings`], [`assignment_to_string`],
//!   ...): pure formatting helpers.
//!
//! # Architecture
//!
//! The models layer sits between the transport (raw bytes) and the request
//! actions (typed outcomes). It knows nothing about HTTP; it only knows how
//! to turn a body into a model and a model into text.
//!
//! ```text
//! Transport (status + bytes) → Models (ResponseModel) → Action (Outcome)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod backfill;
mod codec;
mod convert;
mod deployment;
mod descriptor;
mod error;
mod lenient;
mod matchmaking;
mod secret;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use backfill::{BackfillTicketInfo, CreateBackfillRequest};
pub use codec::{decode, Acknowledgement, ResponseModel};
pub use convert::{
    assignment_to_string, error_to_string, json_array_to_strings,
    matchmaking_ticket_to_string,
};
pub use deployment::{
    AppVersion, AppVersionInfo, AppVersionRequest, DeployRequest, Deployment,
    DeploymentReceipt, EnvVarSpec, PortProtocol, PortSpec,
};
pub use descriptor::{
    ErrorDescriptor, PARSE_ERROR_CODE, PARSE_ERROR_MESSAGE,
    TRANSPORT_ERROR_CODE,
};
pub use error::ModelError;
pub use matchmaking::{
    Assignment, CreateTicketRequest, GamePort, Location, MatchmakingTicket,
};
pub use secret::Secret;
