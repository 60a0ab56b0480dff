//! Request/response interceptor pipeline
//!
//! Interceptors are explicit middleware: an ordered list of request
//! transforms and an ordered list of response taps, composed by the
//! transport. Nothing is bound declaratively; what runs is exactly what was
//! registered, in registration order.

pub mod auth;
pub mod error;

pub use auth::AuthInterceptor;
pub use error::ErrorInterceptor;

use async_trait::async_trait;

use crate::error::Result;
use crate::transport::{ApiRequest, ApiResponse};

/// Hook that runs before a request reaches the wire
///
/// Returning an error abandons the request; it is never sent and response
/// interceptors are not invoked for it.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Transform (or reject) an outgoing request
    async fn before_send(&self, request: ApiRequest) -> Result<ApiRequest>;
}

/// Hook that runs over the outcome of every dispatched request
///
/// Implementations may replace the outcome but the ones in this crate only
/// observe it: side effects happen here, the value passes through unchanged.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    /// Observe or transform a transport outcome
    async fn after_response(&self, outcome: Result<ApiResponse>) -> Result<ApiResponse>;
}
