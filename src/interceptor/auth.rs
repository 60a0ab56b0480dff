//! Auth interceptor
//!
//! Attaches the bearer token to outgoing requests and fail-fasts requests
//! whose token has already expired: the session is cleared, the user is sent
//! to the login view, and the request is abandoned instead of presenting
//! known-stale credentials to the server.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use tracing::{debug, warn};

use super::RequestInterceptor;
use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::navigate::{Destination, Navigator};
use crate::session::Session;
use crate::token;
use crate::transport::ApiRequest;

/// Pre-request bearer-token handling
pub struct AuthInterceptor {
    session: Arc<dyn Session>,
    navigator: Arc<dyn Navigator>,
    clock: Arc<dyn Clock>,
}

impl AuthInterceptor {
    /// Create the interceptor
    #[must_use]
    pub fn new(
        session: Arc<dyn Session>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            session,
            navigator,
            clock,
        }
    }
}

#[async_trait]
impl RequestInterceptor for AuthInterceptor {
    async fn before_send(&self, mut request: ApiRequest) -> Result<ApiRequest> {
        // No token: the request proceeds unauthenticated
        let Some(token) = self.session.token() else {
            return Ok(request);
        };

        match token::decode_claims(&token) {
            Ok(claims) => {
                if claims.is_expired(self.clock.now()) {
                    debug!(path = %request.path, "token expired, abandoning request");
                    self.session.clear();
                    self.navigator.redirect(Destination::Login);
                    return Err(Error::SessionExpired);
                }

                match HeaderValue::try_from(format!("Bearer {token}")) {
                    Ok(value) => {
                        request.headers.insert(AUTHORIZATION, value);
                    }
                    Err(e) => {
                        // Same policy as a malformed token: observed, absorbed
                        warn!(error = %e, "token not header-safe, sending unauthenticated");
                    }
                }
            }
            Err(e) => {
                // Malformed token is non-fatal; the server decides what an
                // unauthenticated request may do
                warn!(error = %e, "token decode failed, sending unauthenticated");
            }
        }

        Ok(request)
    }
}
