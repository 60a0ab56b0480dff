//! Service-request resource
//!
//! Requests move through created → assigned → completed; the status
//! transitions are POST sub-resources rather than PATCHes, mirroring the
//! platform API.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::{Value, json};

use super::model::{Envelope, ServiceRequest};
use super::{PageQuery, insert_opt};
use crate::client::{ApiClient, ReadOptions};
use crate::error::Result;

/// Client for the `requests` resource family
pub struct RequestsApi {
    client: Arc<ApiClient>,
}

impl RequestsApi {
    /// Create the resource client
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Create a service request (customer)
    pub async fn create(
        &self,
        service_id: i64,
        preferred_time: NaiveDateTime,
        description: Option<&str>,
    ) -> Result<Envelope<ServiceRequest>> {
        let mut body = serde_json::Map::new();
        body.insert("service_id".to_string(), Value::from(service_id));
        body.insert(
            "preferred_time".to_string(),
            Value::from(preferred_time.format("%Y-%m-%dT%H:%M:%S").to_string()),
        );
        insert_opt(&mut body, "description", description.map(Value::from));

        let value = self.client.post("requests", Value::Object(body)).await?;
        Envelope::from_value(value)
    }

    /// The signed-in customer's requests
    pub async fn customer_requests(
        &self,
        query: &PageQuery,
        options: ReadOptions,
    ) -> Result<Envelope<Vec<ServiceRequest>>> {
        let value = self
            .client
            .read("customers/requests", &query.to_params(), options)
            .await?;
        Envelope::from_value(value)
    }

    /// A specific customer's requests (admin)
    pub async fn customer_requests_by_id(
        &self,
        customer_id: i64,
        query: &PageQuery,
        options: ReadOptions,
    ) -> Result<Envelope<Vec<ServiceRequest>>> {
        let value = self
            .client
            .read(
                &format!("customers/{customer_id}/requests"),
                &query.to_params(),
                options,
            )
            .await?;
        Envelope::from_value(value)
    }

    /// The signed-in professional's requests
    pub async fn professional_requests(
        &self,
        query: &PageQuery,
        options: ReadOptions,
    ) -> Result<Envelope<Vec<ServiceRequest>>> {
        let value = self
            .client
            .read("professionals/requests", &query.to_params(), options)
            .await?;
        Envelope::from_value(value)
    }

    /// A specific professional's requests (admin)
    pub async fn professional_requests_by_id(
        &self,
        professional_id: i64,
        query: &PageQuery,
        options: ReadOptions,
    ) -> Result<Envelope<Vec<ServiceRequest>>> {
        let value = self
            .client
            .read(
                &format!("professionals/{professional_id}/requests"),
                &query.to_params(),
                options,
            )
            .await?;
        Envelope::from_value(value)
    }

    /// Update an open request (customer)
    pub async fn update(&self, id: i64, body: Value) -> Result<Envelope<ServiceRequest>> {
        let value = self.client.put(&format!("requests/{id}"), body).await?;
        Envelope::from_value(value)
    }

    /// Accept a request (professional)
    pub async fn accept(&self, id: i64) -> Result<Envelope<ServiceRequest>> {
        self.transition(id, "accept", json!({})).await
    }

    /// Mark a request completed
    pub async fn complete(&self, id: i64, remarks: Option<&str>) -> Result<Envelope<ServiceRequest>> {
        let mut body = serde_json::Map::new();
        insert_opt(&mut body, "remarks", remarks.map(Value::from));
        self.transition(id, "complete", Value::Object(body)).await
    }

    /// Cancel a request (customer)
    pub async fn cancel(&self, id: i64) -> Result<Envelope<ServiceRequest>> {
        self.transition(id, "cancel", json!({})).await
    }

    /// Review a completed request (customer)
    pub async fn submit_review(
        &self,
        id: i64,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Envelope<Value>> {
        let mut body = serde_json::Map::new();
        body.insert("rating".to_string(), Value::from(rating));
        insert_opt(&mut body, "comment", comment.map(Value::from));

        let value = self
            .client
            .post(&format!("requests/{id}/review"), Value::Object(body))
            .await?;
        Envelope::from_value(value)
    }

    /// Report a review (professional)
    pub async fn report_review(&self, review_id: i64, reason: &str) -> Result<Envelope<Value>> {
        let value = self
            .client
            .post(
                &format!("reviews/{review_id}/report"),
                json!({"reason": reason}),
            )
            .await?;
        Envelope::from_value(value)
    }

    async fn transition(&self, id: i64, action: &str, body: Value) -> Result<Envelope<ServiceRequest>> {
        let value = self
            .client
            .post(&format!("requests/{id}/{action}"), body)
            .await?;
        Envelope::from_value(value)
    }
}
