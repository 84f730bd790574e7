//! Unified error type for the Edgegap toolkit.

use edgegap_action::EndpointError;
use edgegap_models::ModelError;
use edgegap_settings::SettingsError;
use edgegap_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// Remote failures never show up here: a request that reaches the network
/// reports through its [`Outcome`](edgegap_action::Outcome). This type
/// covers local failures such as building the HTTP client, reading the
/// settings file, decoding a body the caller fetched or stored itself, or
/// a client missing the settings a call needs.
#[derive(Debug, thiserror::Error)]
pub enum EdgegapError {
    /// The HTTP client could not be created.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A request could not be built from its parameters.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    /// Loading or saving the settings record failed.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A body passed to [`decode`](edgegap_models::decode) or
    /// [`ResponseModel::from_body`](edgegap_models::ResponseModel::from_body)
    /// did not decode into its model.
    ///
    /// Actions never produce this; they fold decode failures into the
    /// outcome's descriptor. It is for callers holding a raw body, such as
    /// a cached ticket or a payload relayed by a game server.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The call draws its payload from settings, but none were attached.
    #[error("no settings record attached to this client")]
    NoSettings,
}
