//! Shared test support: recording collaborators, a scriptable transport,
//! and token helpers.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use homeserve_client::error::{Error, Result};
use homeserve_client::navigate::{Destination, Navigator};
use homeserve_client::notify::{Notification, Notifier};
use homeserve_client::token::Claims;
use homeserve_client::transport::{ApiRequest, ApiResponse, ResponseBody, Transport};

/// Notifier that records everything it is asked to show
#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn taken(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}

/// Navigator that records requested destinations
#[derive(Default)]
pub struct RecordingNavigator {
    destinations: Mutex<Vec<Destination>>,
}

impl RecordingNavigator {
    pub fn taken(&self) -> Vec<Destination> {
        self.destinations.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, destination: Destination) {
        self.destinations.lock().push(destination);
    }
}

/// Transport fake: counts calls and pops scripted outcomes
///
/// With an empty script every call succeeds with `{"call": <n>}`, so
/// distinct fetches are distinguishable by payload.
#[derive(Default)]
pub struct ScriptedTransport {
    calls: AtomicUsize,
    script: Mutex<VecDeque<Result<Value>>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn push_ok(&self, payload: Value) {
        self.script.lock().push_back(Ok(payload));
    }

    pub fn push_err(&self, error: Error) {
        self.script.lock().push_back(Err(error));
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, _request: ApiRequest) -> Result<ApiResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let payload = match self.script.lock().pop_front() {
            Some(outcome) => outcome?,
            None => serde_json::json!({ "call": call }),
        };
        Ok(ApiResponse {
            status: 200,
            body: ResponseBody::Json(payload),
        })
    }
}

/// Forge an HS256 token with the given expiry
pub fn token_expiring_at(exp: i64) -> String {
    let claims = Claims {
        exp: Some(exp),
        sub: Some("7".to_string()),
        role: Some("customer".to_string()),
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
    )
    .expect("encode test token")
}
