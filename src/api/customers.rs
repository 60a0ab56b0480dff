//! Customers resource (admin moderation)

use std::sync::Arc;

use serde_json::{Value, json};

use super::model::{Customer, Envelope};
use super::{PageQuery, insert_opt};
use crate::client::{ApiClient, ReadOptions};
use crate::error::Result;

/// Client for the `customers` resource family
pub struct CustomersApi {
    client: Arc<ApiClient>,
}

impl CustomersApi {
    /// Create the resource client
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List customer accounts (admin)
    pub async fn all(
        &self,
        query: &PageQuery,
        search: Option<&str>,
        options: ReadOptions,
    ) -> Result<Envelope<Vec<Customer>>> {
        let mut params = query.to_params();
        insert_opt(&mut params, "search", search.map(Value::from));

        let value = self.client.read("customers", &params, options).await?;
        Envelope::from_value(value)
    }

    /// Fetch one customer account
    pub async fn by_id(&self, id: i64) -> Result<Envelope<Customer>> {
        let value = self.client.read_detail(&format!("customers/{id}")).await?;
        Envelope::from_value(value)
    }

    /// Block a customer (admin)
    pub async fn block(&self, id: i64, reason: Option<&str>) -> Result<Envelope<Customer>> {
        let mut body = serde_json::Map::new();
        insert_opt(&mut body, "reason", reason.map(Value::from));

        let value = self
            .client
            .post(&format!("customers/{id}/block"), Value::Object(body))
            .await?;
        Envelope::from_value(value)
    }

    /// Unblock a customer (admin)
    pub async fn unblock(&self, id: i64) -> Result<Envelope<Customer>> {
        let value = self
            .client
            .post(&format!("customers/{id}/unblock"), json!({}))
            .await?;
        Envelope::from_value(value)
    }
}
