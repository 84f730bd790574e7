//! One-shot asynchronous request actions for the Edgegap API.
//!
//! Every network-backed operation in the toolkit is a [`RequestAction`]:
//! one generic component parameterised by an [`Endpoint`] descriptor.
//! The descriptor says *what* to send and *what* comes back; the action
//! owns *how*: send, classify, decode, deliver exactly one
//! [`Outcome`].
//!
//! # Key types
//!
//! - [`RequestAction`]: build, activate, get one outcome
//! - [`Endpoint`]: the per-call strategy (request builder + model type)
//! - [`MatchmakerTarget`] / [`ApiTarget`]: where and with which token
//! - [`endpoints`]: the catalogue of supported calls
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use edgegap_action::endpoints::GetBackfillTicketInformation;
//! use edgegap_action::{MatchmakerTarget, RequestAction};
//! use edgegap_transport::ReqwestTransport;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(ReqwestTransport::new()?);
//! let target = MatchmakerTarget::new("https://my-mm.edgegap.net", "token");
//!
//! let action = RequestAction::new(
//!     GetBackfillTicketInformation::new(target, "bf-123"),
//!     transport,
//! );
//! match action.run().await {
//!     Ok(info) => println!("backfill status: {}", info.status),
//!     Err(err) => eprintln!("{err}"),
//! }
//! # Ok(())
//! # }
//! ```

mod action;
mod endpoint;
pub mod endpoints;
mod error;

pub use action::{resolve, Outcome, RequestAction};
pub use endpoint::{ApiTarget, Endpoint, MatchmakerTarget, DEFAULT_API_URL};
pub use error::EndpointError;
