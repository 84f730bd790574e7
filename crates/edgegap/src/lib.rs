//! # Edgegap
//!
//! Typed, one-shot asynchronous client for the Edgegap deployment and
//! matchmaking APIs.
//!
//! Every call is a [`RequestAction`]: build it, activate it, and receive
//! exactly one [`Outcome`], either the decoded model or an
//! [`ErrorDescriptor`]. Project settings (tokens, image coordinates,
//! ports) live in a [`SettingsStore`] persisted as TOML.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgegap::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EdgegapError> {
//!     edgegap::logging::init();
//!
//!     let client = EdgegapClient::builder()
//!         .matchmaker("https://my-mm.edgegap.net", "mm-token")
//!         .build()?;
//!
//!     let request = CreateTicketRequest {
//!         profile: "casual".into(),
//!         ..Default::default()
//!     };
//!     match client.create_matchmaking_ticket(request).run().await {
//!         Ok(ticket) => println!("{}", matchmaking_ticket_to_string(&ticket)),
//!         Err(err) => eprintln!("{err}"),
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
pub mod logging;

pub use client::{EdgegapClient, EdgegapClientBuilder};
pub use error::EdgegapError;

pub use edgegap_action as action;
pub use edgegap_models as models;
pub use edgegap_settings as settings;
pub use edgegap_transport as transport;

pub use edgegap_action::{Outcome, RequestAction};
pub use edgegap_models::ErrorDescriptor;
pub use edgegap_settings::SettingsStore;

/// Convenience re-exports for common usage.
///
/// ```rust
/// use edgegap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{EdgegapClient, EdgegapClientBuilder, EdgegapError};

    pub use edgegap_action::endpoints::*;
    pub use edgegap_action::{
        ApiTarget, Endpoint, EndpointError, MatchmakerTarget, Outcome,
        RequestAction, DEFAULT_API_URL,
    };
    pub use edgegap_models::{
        assignment_to_string, decode, error_to_string, json_array_to_strings,
        matchmaking_ticket_to_string, Acknowledgement, AppVersion,
        AppVersionRequest, Assignment, BackfillTicketInfo,
        CreateBackfillRequest, CreateTicketRequest, DeployRequest, Deployment,
        DeploymentReceipt, EnvVarSpec, ErrorDescriptor, GamePort, Location,
        MatchmakingTicket, ModelError, PortProtocol, PortSpec, ResponseModel,
        Secret,
        PARSE_ERROR_CODE, PARSE_ERROR_MESSAGE, TRANSPORT_ERROR_CODE,
    };
    pub use edgegap_settings::{
        environment_variable, BuildConfiguration, ConfigBackend,
        EnvironmentVariable, FileBackend, MemoryBackend, PortConfig,
        SettingsError, SettingsRecord, SettingsStore,
    };
    pub use edgegap_transport::{
        HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport,
        TransportError,
    };
}
