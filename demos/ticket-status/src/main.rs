//! Looks up a matchmaking ticket or backfill and prints where it stands.
//!
//! ```text
//! ticket-status <ticket-id> [--backfill] [--wait]
//! ```
//!
//! The matchmaker comes from `EDGEGAP_MATCHMAKER_URL`. The token comes from
//! `EDGEGAP_MATCHMAKER_TOKEN`, or else from the authorization key in
//! `Config/Edgegap.toml` under the current directory.

use std::time::Duration;

use edgegap::prelude::*;

const POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_POLLS: u32 = 30;

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

struct Args {
    id: String,
    backfill: bool,
    wait: bool,
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut id = None;
        let mut backfill = false;
        let mut wait = false;
        for arg in args {
            match arg.as_str() {
                "--backfill" => backfill = true,
                "--wait" => wait = true,
                flag if flag.starts_with("--") => {
                    return Err(format!("unknown flag {flag}"));
                }
                other if id.is_some() => {
                    return Err(format!("unexpected argument {other}"));
                }
                other => id = Some(other.to_string()),
            }
        }
        let id = id.ok_or("usage: ticket-status <ticket-id> [--backfill] [--wait]")?;
        Ok(Self { id, backfill, wait })
    }
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

async fn show_backfill(client: &EdgegapClient, id: &str) {
    match client.get_backfill_ticket_information(id).run().await {
        Ok(info) => {
            println!("backfill {} ({}) status: {}", info.id, info.profile, info.status);
            for (ticket_id, ticket) in &info.tickets {
                println!("  ticket {ticket_id}: {ticket}");
            }
        }
        Err(err) => eprintln!("{}", error_to_string(&err)),
    }
}

async fn show_ticket(client: &EdgegapClient, id: &str, wait: bool) {
    for attempt in 1..=MAX_POLLS {
        match client.get_matchmaking_ticket(id).run().await {
            Ok(ticket) if ticket.is_assigned() || !wait => {
                println!("{}", matchmaking_ticket_to_string(&ticket));
                return;
            }
            Ok(ticket) => {
                tracing::info!(attempt, status = %ticket.status, "not assigned yet");
                tokio::time::sleep(POLL_INTERVAL).await;
            }
            Err(err) => {
                eprintln!("{}", error_to_string(&err));
                return;
            }
        }
    }
    eprintln!("ticket {id} was not assigned after {MAX_POLLS} polls");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    edgegap::logging::init();

    let args = Args::parse(std::env::args().skip(1))?;

    let mut builder = EdgegapClient::builder()
        .matchmaker_url(environment_variable("EDGEGAP_MATCHMAKER_URL"));
    let token = environment_variable("EDGEGAP_MATCHMAKER_TOKEN");
    if token.is_empty() {
        let store = SettingsStore::load(FileBackend::for_project("."))?;
        builder = builder.settings(store.into_record());
    } else {
        builder = builder
            .matchmaker(environment_variable("EDGEGAP_MATCHMAKER_URL"), token);
    }
    let client = builder.build()?;

    if args.backfill {
        show_backfill(&client, &args.id).await;
    } else {
        show_ticket(&client, &args.id, args.wait).await;
    }
    Ok(())
}
