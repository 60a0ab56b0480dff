//! Professionals resource (admin moderation + schedules)

use std::sync::Arc;

use serde_json::{Value, json};

use super::model::{Envelope, Professional};
use super::{PageQuery, insert_opt};
use crate::client::{ApiClient, ReadOptions};
use crate::error::Result;

/// Client for the `professionals` resource family
pub struct ProfessionalsApi {
    client: Arc<ApiClient>,
}

impl ProfessionalsApi {
    /// Create the resource client
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List professionals, optionally only unverified ones (admin)
    pub async fn all(
        &self,
        query: &PageQuery,
        pending_only: Option<bool>,
        options: ReadOptions,
    ) -> Result<Envelope<Vec<Professional>>> {
        let mut params = query.to_params();
        insert_opt(&mut params, "pending_only", pending_only.map(Value::from));

        let value = self.client.read("professionals", &params, options).await?;
        Envelope::from_value(value)
    }

    /// Fetch one professional profile
    pub async fn by_id(&self, id: i64) -> Result<Envelope<Professional>> {
        let value = self
            .client
            .read_detail(&format!("professionals/{id}"))
            .await?;
        Envelope::from_value(value)
    }

    /// Verify a professional's documents (admin)
    pub async fn verify(&self, id: i64) -> Result<Envelope<Professional>> {
        let value = self
            .client
            .post(&format!("professionals/{id}/verify"), json!({}))
            .await?;
        Envelope::from_value(value)
    }

    /// Block a professional (admin)
    pub async fn block(&self, id: i64, reason: Option<&str>) -> Result<Envelope<Professional>> {
        let mut body = serde_json::Map::new();
        insert_opt(&mut body, "reason", reason.map(Value::from));

        let value = self
            .client
            .post(&format!("professionals/{id}/block"), Value::Object(body))
            .await?;
        Envelope::from_value(value)
    }

    /// A professional's schedule of upcoming work
    pub async fn schedule(&self, id: i64, options: ReadOptions) -> Result<Envelope<Value>> {
        let value = self
            .client
            .read(
                &format!("professionals/{id}/schedule"),
                &crate::cache::Params::new(),
                options,
            )
            .await?;
        Envelope::from_value(value)
    }
}
