//! Tests for the reqwest-backed transport against a local lead sink

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::{Router, routing::post};
use bluecycle::prelude::*;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Captured {
    path: String,
    content_type: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct SinkState {
    captured: Arc<Mutex<Vec<Captured>>>,
    status: StatusCode,
    delay: Duration,
}

async fn sink(
    State(state): State<SinkState>,
    Path(path): Path<String>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    state.captured.lock().unwrap().push(Captured {
        path,
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    tokio::time::sleep(state.delay).await;
    state.status
}

/// Start a sink answering every POST with `status` after `delay`
async fn spawn_sink(status: StatusCode, delay: Duration) -> (String, Arc<Mutex<Vec<Captured>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = SinkState {
        captured: captured.clone(),
        status,
        delay,
    };
    let app = Router::new()
        .route("/{path}", post(sink))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), captured)
}

fn endpoints(base: &str) -> EndpointsConfig {
    EndpointsConfig {
        buyer: format!("{}/buyer", base),
        seller: format!("{}/seller", base),
    }
}

fn buyer_payload() -> SubmissionPayload {
    let raw = RawFormValues::new()
        .with(Field::Name, "A")
        .with(Field::Phone, "9876543210")
        .with(Field::Quantity, "500")
        .with(Field::Location, "Addr")
        .with(Field::PinCode, "560001")
        .with(Field::DeliveryDate, "2024-01-01");
    let values = FormValues::parse(&raw, Role::Buyer).unwrap();
    SubmissionPayload::from(&values)
}

#[tokio::test]
async fn test_posts_json_to_role_endpoint() {
    let (base, captured) = spawn_sink(StatusCode::OK, Duration::ZERO).await;
    let client = SubmissionClient::new(endpoints(&base), HttpTransport::new());

    let outcome = client.submit(&buyer_payload(), Role::Buyer).await;
    assert_eq!(outcome, Outcome::Sent);

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].path, "buyer");
    assert!(
        captured[0]
            .content_type
            .as_deref()
            .unwrap_or_default()
            .starts_with("application/json")
    );
    assert_eq!(
        captured[0].body,
        json!({
            "type": "buyer",
            "name": "A",
            "phone": "9876543210",
            "email": "",
            "societyname": "",
            "quantity": "500",
            "address": "Addr",
            "pincode": "560001",
            "deliveryDate": "2024-01-01"
        })
    );
}

#[tokio::test]
async fn test_server_error_still_counts_as_sent() {
    let (base, captured) = spawn_sink(StatusCode::INTERNAL_SERVER_ERROR, Duration::ZERO).await;
    let client = SubmissionClient::new(endpoints(&base), HttpTransport::new());

    let outcome = client.submit(&buyer_payload(), Role::Seller).await;

    assert_eq!(outcome, Outcome::Sent);
    assert_eq!(captured.lock().unwrap()[0].path, "seller");
}

#[tokio::test]
async fn test_unreachable_host_is_transport_failure() {
    // Grab a free port, then release it so nothing is listening there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base = format!("http://127.0.0.1:{}", port);

    let transport = HttpTransport::new();
    let err = transport
        .dispatch(&format!("{}/buyer", base), &buyer_payload())
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Unreachable { .. }));

    let client = SubmissionClient::new(endpoints(&base), transport);
    assert_eq!(
        client.submit(&buyer_payload(), Role::Buyer).await,
        Outcome::TransportFailed
    );
}

#[tokio::test]
async fn test_timeout_is_transport_failure() {
    let (base, _captured) = spawn_sink(StatusCode::OK, Duration::from_secs(5)).await;
    let transport = HttpTransport::with_timeout(Duration::from_millis(100));

    let err = transport
        .dispatch(&format!("{}/buyer", base), &buyer_payload())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::TimedOut { .. }));
}

#[tokio::test]
async fn test_invalid_url_is_transport_failure() {
    let err = HttpTransport::new()
        .dispatch("not a url", &buyer_payload())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::InvalidRequest(_)));
}
