//! Typed resource clients against a live mock server

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{RecordingNavigator, RecordingNotifier, token_expiring_at};
use homeserve_client::api::auth::Credentials;
use homeserve_client::api::exports::PollOptions;
use homeserve_client::api::{AuthApi, ExportsApi, PageQuery, ServicesApi};
use homeserve_client::session::{MemorySession, Session};
use homeserve_client::{ApiClient, ClientConfig, ReadOptions, build_client};

struct Rig {
    client: Arc<ApiClient>,
    session: Arc<MemorySession>,
}

async fn rig(server: &MockServer) -> Rig {
    let config = ClientConfig {
        base_url: format!("{}/api", server.uri()),
        timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    };
    let session = Arc::new(MemorySession::new());
    let client = build_client(
        &config,
        session.clone(),
        Arc::new(RecordingNotifier::default()),
        Arc::new(RecordingNavigator::default()),
    )
    .expect("client wiring");

    Rig { client, session }
}

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({
        "status": "success",
        "status_code": 200,
        "data": data,
    })
}

#[tokio::test]
async fn login_establishes_token_then_fetches_profile_with_it() {
    let server = MockServer::start().await;
    let token = token_expiring_at(Utc::now().timestamp() + 3600);

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({"token": token}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(wiremock::matchers::header(
            "authorization",
            format!("Bearer {token}").as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 7,
            "username": "asha",
            "email": "asha@example.com",
            "full_name": "Asha Rao",
            "role": "customer",
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let rig = rig(&server).await;
    let auth = AuthApi::new(rig.client.clone(), rig.session.clone());

    let profile = auth
        .login(&Credentials {
            username: "asha".to_string(),
            password: "Str0ng!pass".to_string(),
        })
        .await
        .expect("login");

    assert_eq!(profile.full_name, "Asha Rao");
    assert!(rig.session.is_logged_in());
    assert_eq!(rig.session.user_role().as_deref(), Some("customer"));
}

#[tokio::test]
async fn services_listing_parses_and_caches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "status_code": 200,
            "data": [{
                "id": 1,
                "name": "Deep Clean",
                "description": "Full home clean",
                "base_price": 99.0,
                "estimated_time": 120,
                "is_active": true,
            }],
            "pagination": {
                "total": 1, "pages": 1, "current_page": 1,
                "per_page": 10, "has_next": false, "has_prev": false,
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rig = rig(&server).await;
    let services = ServicesApi::new(rig.client.clone());

    let first = services
        .all(&PageQuery::first(), None, ReadOptions::default())
        .await
        .expect("first listing");
    assert_eq!(first.data.len(), 1);
    assert_eq!(first.data[0].name, "Deep Clean");
    assert!(!first.pagination.expect("pagination").has_next);

    // Second call is a cache hit; the mock's expect(1) verifies no refetch
    let second = services
        .all(&PageQuery::first(), None, ReadOptions::default())
        .await
        .expect("cached listing");
    assert_eq!(second.data[0].id, 1);
}

#[tokio::test]
async fn logout_drops_cached_responses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(2)
        .mount(&server)
        .await;

    let rig = rig(&server).await;
    let auth = AuthApi::new(rig.client.clone(), rig.session.clone());
    let services = ServicesApi::new(rig.client.clone());

    services
        .all(&PageQuery::default(), None, ReadOptions::default())
        .await
        .expect("seed cache");

    auth.logout();

    // The cache did not survive the logout, so this hits the wire again
    services
        .all(&PageQuery::default(), None, ReadOptions::default())
        .await
        .expect("read after logout");
}

#[tokio::test]
async fn export_poll_runs_until_completion() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/exports/status/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "task_id": "abc123",
            "completed": false,
        }))))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/exports/status/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "task_id": "abc123",
            "completed": true,
            "filename": "service_requests_2024.csv",
        }))))
        .mount(&server)
        .await;

    let rig = rig(&server).await;
    let exports = ExportsApi::new(rig.client.clone());

    let status = exports
        .wait_for_completion(
            "abc123",
            PollOptions {
                interval: Duration::from_millis(10),
                timeout: Duration::from_secs(5),
            },
        )
        .await
        .expect("poll to completion");

    assert!(status.completed);
    assert_eq!(status.filename.as_deref(), Some("service_requests_2024.csv"));
}

#[tokio::test]
async fn change_password_clears_the_session() {
    let server = MockServer::start().await;
    let token = token_expiring_at(Utc::now().timestamp() + 3600);

    Mock::given(method("POST"))
        .and(path("/api/change-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .mount(&server)
        .await;

    let rig = rig(&server).await;
    rig.session.establish(token);
    let auth = AuthApi::new(rig.client.clone(), rig.session.clone());

    auth.change_password("old-Secret1!", "new-Secret1!")
        .await
        .expect("password change");

    assert!(!rig.session.is_logged_in());
}
