//! Services resource

use std::sync::Arc;

use serde_json::{Value, json};

use super::model::{Envelope, Service};
use super::{PageQuery, insert_opt};
use crate::client::{ApiClient, ReadOptions};
use crate::error::Result;

/// Fields for creating or updating a service
#[derive(Debug, Clone, Default)]
pub struct ServiceInput {
    /// Display name
    pub name: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Base price
    pub base_price: Option<f64>,
    /// Estimated duration in minutes
    pub estimated_time: Option<i64>,
}

impl ServiceInput {
    fn to_body(&self) -> Value {
        let mut body = serde_json::Map::new();
        insert_opt(&mut body, "name", self.name.clone().map(Value::from));
        insert_opt(&mut body, "description", self.description.clone().map(Value::from));
        insert_opt(&mut body, "base_price", self.base_price.map(Value::from));
        insert_opt(&mut body, "estimated_time", self.estimated_time.map(Value::from));
        Value::Object(body)
    }
}

/// Client for the `services` resource family
pub struct ServicesApi {
    client: Arc<ApiClient>,
}

impl ServicesApi {
    /// Create the resource client
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List services, optionally filtered by active flag (admin only)
    pub async fn all(
        &self,
        query: &PageQuery,
        is_active: Option<bool>,
        options: ReadOptions,
    ) -> Result<Envelope<Vec<Service>>> {
        let mut params = query.to_params();
        insert_opt(&mut params, "is_active", is_active.map(Value::from));

        let value = self.client.read("services", &params, options).await?;
        Envelope::from_value(value)
    }

    /// Fetch one service
    pub async fn by_id(&self, id: i64) -> Result<Envelope<Service>> {
        let value = self.client.read_detail(&format!("services/{id}")).await?;
        Envelope::from_value(value)
    }

    /// Create a service (admin)
    pub async fn create(&self, input: &ServiceInput) -> Result<Envelope<Service>> {
        let value = self.client.post("services", input.to_body()).await?;
        Envelope::from_value(value)
    }

    /// Update a service (admin)
    pub async fn update(&self, id: i64, input: &ServiceInput) -> Result<Envelope<Service>> {
        let value = self
            .client
            .put(&format!("services/{id}"), input.to_body())
            .await?;
        Envelope::from_value(value)
    }

    /// Toggle a service's active flag (admin)
    pub async fn toggle(&self, id: i64) -> Result<Envelope<Service>> {
        let value = self
            .client
            .post(&format!("services/{id}/toggle"), json!({}))
            .await?;
        Envelope::from_value(value)
    }

    /// Delete a service (admin)
    pub async fn delete(&self, id: i64) -> Result<Envelope<Value>> {
        let value = self.client.delete(&format!("services/{id}"), None).await?;
        Envelope::from_value(value)
    }
}
