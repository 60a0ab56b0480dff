//! Error interceptor
//!
//! A side-effect tap over transport failures: classify once, run the
//! matching side effect (notification, session clearing, redirect), then
//! rethrow the original error unchanged. It never swallows and never
//! retries; recovery belongs to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::ResponseInterceptor;
use crate::error::{Error, Result};
use crate::navigate::{Destination, Navigator};
use crate::notify::{Notification, Notifier};
use crate::session::Session;
use crate::transport::ApiResponse;

/// Post-response failure handling
pub struct ErrorInterceptor {
    session: Arc<dyn Session>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl ErrorInterceptor {
    /// Create the interceptor
    #[must_use]
    pub fn new(
        session: Arc<dyn Session>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            notifier,
            navigator,
        }
    }

    fn dispatch_side_effects(&self, error: &Error) {
        match error {
            Error::Network(_) | Error::Timeout(_) => {
                self.notifier.notify(Notification::error(
                    "Network Error",
                    "Please check your internet connection",
                ));
            }
            Error::Unauthorized { .. } => {
                self.session.clear();
                self.navigator.redirect(Destination::Login);
                self.notifier
                    .notify(Notification::error("Session Expired", "Please login again"));
            }
            Error::Forbidden { detail } => {
                self.notifier
                    .notify(Notification::error("Access Denied", detail.clone()));
            }
            Error::NotFound { path } => {
                debug!(path = %path, "resource not found");
                self.navigator.redirect(Destination::NotFound);
            }
            Error::Validation { detail, .. } => {
                let message = error
                    .first_field_error()
                    .map_or_else(|| detail.clone(), ToString::to_string);
                self.notifier
                    .notify(Notification::error("Validation Error", message));
            }
            Error::Server { detail, .. } => {
                self.notifier
                    .notify(Notification::error("Server Error", detail.clone()));
            }
            // Other failures (plain 4xx, decode problems) carry no global
            // side effect; the caller decides what to show
            _ => {}
        }
    }
}

#[async_trait]
impl ResponseInterceptor for ErrorInterceptor {
    async fn after_response(&self, outcome: Result<ApiResponse>) -> Result<ApiResponse> {
        match outcome {
            Ok(response) => Ok(response),
            Err(error) => {
                self.dispatch_side_effects(&error);
                Err(error)
            }
        }
    }
}
