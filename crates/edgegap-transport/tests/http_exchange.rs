//! Integration tests for the reqwest transport.
//!
//! These tests spin up a tiny HTTP responder on a raw `TcpListener` and
//! point a real `ReqwestTransport` at it, so requests actually cross a
//! socket.

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use edgegap_transport::{
        Authorization, HttpRequest, HttpTransport, ReqwestTransport,
        TransportError,
    };
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves exactly one request with the given status line and body.
    /// Returns the base URL and a receiver for the raw request head.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = listener.local_addr().expect("should have addr");
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            // Read until the end of the headers; bodies in these tests are
            // small enough to arrive with them.
            loop {
                let n = stream.read(&mut chunk).await.expect("read");
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream
                .write_all(response.as_bytes())
                .await
                .expect("write");
            let _ = stream.shutdown().await;
        });

        (format!("http://{addr}"), rx)
    }

    #[tokio::test]
    async fn test_success_response_is_returned_verbatim() {
        let (base, head) = serve_once("200 OK", r#"{"id":"bf-1"}"#).await;
        let transport = ReqwestTransport::new().expect("client");

        let request = HttpRequest::get(format!("{base}/backfills/bf-1"))
            .authorization(Authorization::bare("mm-token"));
        let response = transport.send(request).await.expect("should respond");

        assert_eq!(response.status, 200);
        assert_eq!(response.text(), r#"{"id":"bf-1"}"#);

        let head = head.await.expect("request head");
        assert!(head.starts_with("GET /backfills/bf-1 HTTP/1.1"));
        assert!(head.to_ascii_lowercase().contains("authorization: mm-token"));
    }

    #[tokio::test]
    async fn test_error_status_is_still_ok() {
        let (base, _head) = serve_once("404 Not Found", "ticket not found").await;
        let transport = ReqwestTransport::new().expect("client");

        let response = transport
            .send(HttpRequest::delete(format!("{base}/tickets/x")))
            .await
            .expect("a 404 is a response, not a transport error");

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
        assert_eq!(response.text(), "ticket not found");
    }

    #[tokio::test]
    async fn test_json_body_and_scheme_are_sent() {
        let (base, head) = serve_once("200 OK", "{}").await;
        let transport = ReqwestTransport::new().expect("client");

        let request = HttpRequest::post(format!("{base}/v1/deploy"))
            .authorization(Authorization::with_scheme("token", "api-key"))
            .json(serde_json::json!({ "app_name": "game" }));
        transport.send(request).await.expect("should respond");

        let head = head.await.expect("request head").to_ascii_lowercase();
        assert!(head.starts_with("post /v1/deploy"));
        assert!(head.contains("authorization: token api-key"));
        assert!(head.contains("content-type: application/json"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind to learn a free port, then close it so nothing listens.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let transport = ReqwestTransport::new().expect("client");
        let err = transport
            .send(HttpRequest::get(format!("http://{addr}/tickets/1")))
            .await
            .expect_err("nothing is listening");

        assert!(matches!(err, TransportError::RequestFailed(_)));
    }
}
