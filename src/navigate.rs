//! Navigation capability
//!
//! Interceptors redirect the user as a side effect (expired session to the
//! login view, 404 to the not-found view). Routing itself belongs to the
//! embedding application, so the client only names the destination.

use tracing::info;

/// Named navigation destinations the client can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Login view
    Login,
    /// Not-found view
    NotFound,
}

/// Redirects the user to a named destination
pub trait Navigator: Send + Sync {
    /// Navigate to `destination`
    fn redirect(&self, destination: Destination);
}

/// Navigator that only logs the requested destination
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, destination: Destination) {
        info!(?destination, "navigation requested");
    }
}
