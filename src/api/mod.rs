//! Typed resource clients
//!
//! Thin wrappers over [`crate::client::ApiClient`] that pin down paths,
//! cache categories, and payload types per resource family. One consistent
//! calling convention throughout: `(id, params, options)`.

pub mod auth;
pub mod customers;
pub mod exports;
pub mod model;
pub mod professionals;
pub mod requests;
pub mod services;
pub mod stats;

pub use auth::AuthApi;
pub use customers::CustomersApi;
pub use exports::ExportsApi;
pub use professionals::ProfessionalsApi;
pub use requests::RequestsApi;
pub use services::ServicesApi;
pub use stats::StatsApi;

use serde_json::Value;

use crate::cache::Params;

/// Listing query shared by the paginated endpoints
#[derive(Debug, Clone, Default)]
pub struct PageQuery {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub per_page: Option<u32>,
}

impl PageQuery {
    /// First page with the default size
    #[must_use]
    pub fn first() -> Self {
        Self {
            page: Some(1),
            per_page: None,
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        insert_opt(&mut params, "page", self.page.map(Value::from));
        insert_opt(&mut params, "per_page", self.per_page.map(Value::from));
        params
    }
}

/// Insert a parameter only when it has a value
pub(crate) fn insert_opt(params: &mut Params, name: &str, value: Option<Value>) {
    if let Some(value) = value {
        if !value.is_null() {
            params.insert(name.to_string(), value);
        }
    }
}
