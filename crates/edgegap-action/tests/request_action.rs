//! Integration tests for the request action using a scripted transport.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use edgegap_action::endpoints::{
    CreateMatchmakingTicket, DeleteMatchmakingTicket,
    GetBackfillTicketInformation, GetMatchmakingTicket,
};
use edgegap_action::{MatchmakerTarget, Outcome, RequestAction};
use edgegap_models::{
    BackfillTicketInfo, ErrorDescriptor, PARSE_ERROR_CODE,
    TRANSPORT_ERROR_CODE,
};
use edgegap_transport::{
    HttpRequest, HttpResponse, HttpTransport, TransportError,
};
use tokio::sync::mpsc;

// =========================================================================
// Scripted transport
// =========================================================================

type Responder =
    Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync>;

/// Answers every request with `responder`, after an optional delay.
/// Records each request it sees.
struct ScriptedTransport {
    responder: Responder,
    delay: Option<Duration>,
    calls: AtomicUsize,
    seen: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn new(
        responder: impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError>
            + Send
            + Sync
            + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            delay: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn replying(status: u16, body: &'static str) -> Arc<Self> {
        Self::new(move |_| Ok(HttpResponse::new(status, body)))
    }

    fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(|_| Ok(HttpResponse::new(200, "{}"))),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let reply = (self.responder)(&request);
        self.seen.lock().unwrap().push(request);
        reply
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn target() -> MatchmakerTarget {
    MatchmakerTarget::new("https://mm.test", "mm-secret")
}

fn backfill_action(
    transport: &Arc<ScriptedTransport>,
) -> RequestAction<GetBackfillTicketInformation, ScriptedTransport> {
    RequestAction::new(
        GetBackfillTicketInformation::new(target(), "bf-1"),
        Arc::clone(transport),
    )
}

/// Activates `action` and collects every outcome its callback delivers.
/// The channel closes when the callback (and its sender) is dropped.
async fn collect_outcomes(
    action: RequestAction<GetBackfillTicketInformation, ScriptedTransport>,
) -> Vec<Outcome<BackfillTicketInfo>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = action.activate(move |outcome| {
        let _ = tx.send(outcome);
    });
    handle.await.expect("task should complete");

    let mut outcomes = Vec::new();
    while let Some(outcome) = rx.recv().await {
        outcomes.push(outcome);
    }
    outcomes
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_construction_does_no_io() {
    let transport = ScriptedTransport::replying(200, "{}");
    let _action = backfill_action(&transport);
    tokio::task::yield_now().await;
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_success_is_signalled_once_with_parsed_model() {
    let transport = ScriptedTransport::replying(
        200,
        r#"{"id":"bf-1","profile":"ranked","tickets":{"t1":"x"},"status":"SEARCHING","assigned_ticket":"t1","group_id":"g","created_at":"now"}"#,
    );

    let outcomes = collect_outcomes(backfill_action(&transport)).await;

    assert_eq!(outcomes.len(), 1);
    let info = outcomes[0].as_ref().expect("should succeed");
    assert_eq!(info.id, "bf-1");
    assert_eq!(info.profile, "ranked");
    assert_eq!(info.tickets["t1"], "x");
    assert_eq!(info.assigned_ticket, "t1");
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_not_found_is_signalled_once_as_failure() {
    let transport = ScriptedTransport::replying(404, "backfill not found");

    let outcomes = collect_outcomes(backfill_action(&transport)).await;

    assert_eq!(outcomes.len(), 1);
    let err = outcomes[0].as_ref().expect_err("should fail");
    assert_eq!(err.code(), 404);
    assert_eq!(
        err.to_string(),
        "Error Code: 404, Error Message: backfill not found"
    );
}

#[tokio::test]
async fn test_unparseable_success_body_fails_with_parse_code() {
    let transport = ScriptedTransport::replying(200, "definitely not json");

    let outcomes = collect_outcomes(backfill_action(&transport)).await;

    assert_eq!(outcomes.len(), 1);
    let err = outcomes[0].as_ref().expect_err("should fail");
    assert_eq!(err.code(), PARSE_ERROR_CODE);
}

#[tokio::test]
async fn test_transport_failure_uses_sentinel_and_hides_token() {
    let transport = ScriptedTransport::new(|_| {
        Err(TransportError::RequestFailed(
            "proxy rejected credentials mm-secret".into(),
        ))
    });

    let err = backfill_action(&transport)
        .run()
        .await
        .expect_err("should fail");

    assert_eq!(err.code(), TRANSPORT_ERROR_CODE);
    assert!(!err.message().contains("mm-secret"));
    assert!(err.message().contains("***"));
}

#[tokio::test]
async fn test_activate_with_runs_exactly_one_branch() {
    for (status, body, expect_success) in [
        (200, r#"{"id":"bf-1"}"#, true),
        (500, "boom", false),
        (200, "[]", false),
    ] {
        let transport = ScriptedTransport::replying(status, body);
        let successes = Arc::new(AtomicUsize::new(0));
        let failures = Arc::new(AtomicUsize::new(0));

        let s = Arc::clone(&successes);
        let f = Arc::clone(&failures);
        backfill_action(&transport)
            .activate_with(
                move |_| {
                    s.fetch_add(1, Ordering::SeqCst);
                },
                move |_: ErrorDescriptor| {
                    f.fetch_add(1, Ordering::SeqCst);
                },
            )
            .await
            .expect("task should complete");

        let (s, f) = (successes.load(Ordering::SeqCst), failures.load(Ordering::SeqCst));
        assert_eq!(s + f, 1, "status {status}: exactly one branch");
        assert_eq!(s == 1, expect_success, "status {status}");
    }
}

#[tokio::test]
async fn test_activate_returns_before_completion() {
    let transport = ScriptedTransport::slow(Duration::from_millis(200));
    let (tx, mut rx) = mpsc::unbounded_channel();

    let handle = backfill_action(&transport).activate(move |outcome| {
        let _ = tx.send(outcome.is_ok());
    });

    // Control is back with us while the request is still in flight.
    assert!(rx.try_recv().is_err());

    handle.await.expect("task should complete");
    assert_eq!(rx.recv().await, Some(true));
}

#[tokio::test]
async fn test_aborted_action_never_calls_back() {
    let transport = ScriptedTransport::slow(Duration::from_secs(60));
    let called = Arc::new(AtomicBool::new(false));

    let flag = Arc::clone(&called);
    let handle = backfill_action(&transport).activate(move |_| {
        flag.store(true, Ordering::SeqCst);
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    handle.abort();
    let err = handle.await.expect_err("task was aborted");
    assert!(err.is_cancelled());
    assert!(!called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_concurrent_actions_are_independent() {
    let transport = ScriptedTransport::new(|req| {
        if req.url.ends_with("/tickets/missing") {
            Ok(HttpResponse::new(404, "no such ticket"))
        } else {
            let id = req.url.rsplit('/').next().unwrap_or_default().to_string();
            Ok(HttpResponse::new(
                200,
                format!(r#"{{"id":"{id}","status":"SEARCHING"}}"#),
            ))
        }
    });

    let ids = ["a", "b", "missing", "c"];
    let mut handles = Vec::new();
    for id in ids {
        let action = RequestAction::new(
            GetMatchmakingTicket::new(target(), id),
            Arc::clone(&transport),
        );
        handles.push(tokio::spawn(action.run()));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.expect("task should complete"));
    }

    assert_eq!(results[0].as_ref().unwrap().ticket_id, "a");
    assert_eq!(results[1].as_ref().unwrap().ticket_id, "b");
    assert_eq!(results[2].as_ref().unwrap_err().code(), 404);
    assert_eq!(results[3].as_ref().unwrap().ticket_id, "c");
    assert_eq!(transport.calls(), 4);
}

#[tokio::test]
async fn test_invalid_endpoint_fails_without_sending() {
    let transport = ScriptedTransport::replying(200, "{}");
    let action = RequestAction::new(
        GetMatchmakingTicket::new(target(), ""),
        Arc::clone(&transport),
    );

    let err = action.run().await.expect_err("should fail");

    assert_eq!(err.code(), TRANSPORT_ERROR_CODE);
    assert!(err.message().contains("ticket_id"));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_id_that_would_change_route_is_never_sent() {
    let transport = ScriptedTransport::replying(204, "");
    let action = RequestAction::new(
        DeleteMatchmakingTicket::new(target(), "tkt-1/../../backfills/bf-9"),
        Arc::clone(&transport),
    );

    let err = action.run().await.expect_err("should fail");

    assert_eq!(err.code(), TRANSPORT_ERROR_CODE);
    assert_eq!(
        err.message(),
        "parameter ticket_id is not a valid path segment"
    );
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_request_reaches_transport_as_built() {
    let transport = ScriptedTransport::replying(
        200,
        r#"{"id":"tkt-9","profile":"casual","status":"SEARCHING"}"#,
    );
    let action = RequestAction::new(
        CreateMatchmakingTicket::new(target(), "casual")
            .attribute("skill", serde_json::json!(1200)),
        Arc::clone(&transport),
    );

    let ticket = action.run().await.expect("should succeed");
    assert_eq!(ticket.ticket_id, "tkt-9");

    let seen = transport.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].url, "https://mm.test/tickets");
    assert_eq!(
        seen[0].authorization.as_ref().unwrap().header_value(),
        "mm-secret"
    );
    assert_eq!(seen[0].body.as_ref().unwrap()["attributes"]["skill"], 1200);
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let transport = ScriptedTransport::replying(204, "");
    let action = RequestAction::new(
        DeleteMatchmakingTicket::new(target(), "tkt-1"),
        Arc::clone(&transport),
    );

    let ack = action.run().await.expect("204 is a success");
    assert_eq!(ack.message, "");
}
