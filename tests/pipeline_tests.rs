//! End-to-end interceptor pipeline tests against a live mock server
//!
//! The full production wiring (`build_client`) talks to wiremock: token
//! attachment, pre-flight expiry, and every error-classification branch with
//! its side effects.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{RecordingNavigator, RecordingNotifier, token_expiring_at};
use homeserve_client::cache::Params;
use homeserve_client::navigate::Destination;
use homeserve_client::session::{MemorySession, Session};
use homeserve_client::{ApiClient, ClientConfig, Error, ReadOptions, build_client};

struct Rig {
    client: Arc<ApiClient>,
    session: Arc<MemorySession>,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
}

fn rig_for(base_url: String) -> Rig {
    let config = ClientConfig {
        base_url,
        timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    };
    let session = Arc::new(MemorySession::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::default());

    let client = build_client(
        &config,
        session.clone(),
        notifier.clone(),
        navigator.clone(),
    )
    .expect("client wiring");

    Rig {
        client,
        session,
        notifier,
        navigator,
    }
}

async fn rig(server: &MockServer) -> Rig {
    rig_for(format!("{}/api", server.uri()))
}

#[tokio::test]
async fn valid_token_is_attached_to_the_request() {
    let server = MockServer::start().await;
    let token = token_expiring_at(Utc::now().timestamp() + 3600);

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let rig = rig(&server).await;
    rig.session.establish(token);

    rig.client
        .read("services", &Params::new(), ReadOptions::default())
        .await
        .expect("authenticated read");
}

#[tokio::test]
async fn expired_token_never_reaches_the_wire() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let rig = rig(&server).await;
    rig.session
        .establish(token_expiring_at(Utc::now().timestamp() - 60));

    let result = rig
        .client
        .read("services", &Params::new(), ReadOptions::default())
        .await;

    assert!(matches!(result, Err(Error::SessionExpired)));
    assert!(!rig.session.is_logged_in());
    assert_eq!(rig.navigator.taken(), vec![Destination::Login]);
    // Pre-flight abandonment shows no toast; the redirect is the signal
    assert!(rig.notifier.taken().is_empty());
}

#[tokio::test]
async fn unauthorized_response_runs_each_side_effect_exactly_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "failure",
            "status_code": 401,
            "detail": "Token has been revoked",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rig = rig(&server).await;
    rig.session
        .establish(token_expiring_at(Utc::now().timestamp() + 3600));

    let result = rig
        .client
        .read("profile", &Params::new(), ReadOptions::default())
        .await;

    assert!(matches!(result, Err(Error::Unauthorized { .. })));
    assert!(!rig.session.is_logged_in());
    assert_eq!(rig.navigator.taken(), vec![Destination::Login]);

    let notifications = rig.notifier.taken();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Session Expired");
}

#[tokio::test]
async fn validation_failure_surfaces_the_first_field_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register/customer"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "status": "failure",
            "status_code": 422,
            "detail": "Validation failed",
            "errors": {
                "phone": ["Phone number must be 10 digits and not start with 0"],
            },
        })))
        .mount(&server)
        .await;

    let rig = rig(&server).await;

    let result = rig
        .client
        .post("register/customer", json!({"phone": "042"}))
        .await;

    assert!(matches!(result, Err(Error::Validation { .. })));
    let notifications = rig.notifier.taken();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Validation Error");
    assert_eq!(
        notifications[0].message,
        "Phone number must be 10 digits and not start with 0"
    );
}

#[tokio::test]
async fn not_found_redirects_without_a_toast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/services/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "failure",
            "status_code": 404,
            "detail": "Service not found",
        })))
        .mount(&server)
        .await;

    let rig = rig(&server).await;

    let result = rig
        .client
        .read("services/999", &Params::new(), ReadOptions::default())
        .await;

    assert!(matches!(result, Err(Error::NotFound { .. })));
    assert_eq!(rig.navigator.taken(), vec![Destination::NotFound]);
    assert!(rig.notifier.taken().is_empty());
}

#[tokio::test]
async fn server_error_notifies_and_rethrows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "failure",
            "status_code": 500,
            "detail": "An unexpected error occurred",
        })))
        .mount(&server)
        .await;

    let rig = rig(&server).await;

    let result = rig
        .client
        .read("services", &Params::new(), ReadOptions::default())
        .await;

    assert!(matches!(result, Err(Error::Server { status: 500, .. })));
    let notifications = rig.notifier.taken();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Server Error");
    // A server error is not an auth failure
    assert!(rig.navigator.taken().is_empty());
}

#[tokio::test]
async fn connection_failure_takes_the_network_branch() {
    // Nothing listens here
    let rig = rig_for("http://127.0.0.1:1/api".to_string());

    let result = rig
        .client
        .read("services", &Params::new(), ReadOptions::default())
        .await;

    assert!(matches!(result, Err(Error::Network(_))));
    let notifications = rig.notifier.taken();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Network Error");
    assert_eq!(notifications[0].message, "Please check your internet connection");
}

#[tokio::test]
async fn failed_reads_are_not_cached_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "failure",
            "status_code": 500,
            "detail": "transient",
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let rig = rig(&server).await;

    let failed = rig
        .client
        .read("services", &Params::new(), ReadOptions::default())
        .await;
    assert!(failed.is_err());
    assert!(!rig.client.is_cached("services", &Params::new()));

    let recovered = rig
        .client
        .read("services", &Params::new(), ReadOptions::default())
        .await
        .expect("retry hits the wire");
    assert_eq!(recovered, json!({"data": []}));
}

#[tokio::test]
async fn download_returns_raw_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/exports/download/report.csv"))
        .respond_with(
            ResponseTemplate::new(200).set_body_bytes(b"id,service\n42,Deep Clean\n".to_vec()),
        )
        .mount(&server)
        .await;

    let rig = rig(&server).await;

    let bytes = rig
        .client
        .download("exports/download/report.csv")
        .await
        .expect("download");
    assert_eq!(&bytes[..], b"id,service\n42,Deep Clean\n");
}
