//! Endpoint descriptors, one per API call.

mod backfill;
mod deployment;
mod matchmaking;

pub use backfill::{CreateBackfill, DeleteBackfill, GetBackfillTicketInformation};
pub use deployment::{
    CreateAppVersion, CreateDeployment, GetDeploymentStatus, StopDeployment,
};
pub use matchmaking::{
    CreateMatchmakingTicket, DeleteMatchmakingTicket, GetMatchmakingTicket,
};
