//! Service-report exports
//!
//! Exports run as background tasks server-side: trigger, poll the task
//! status, then download the generated file. Status polling bypasses the
//! cache — a cached "not done yet" would defeat the poll.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde_json::Value;
use tracing::debug;

use super::insert_opt;
use super::model::{Envelope, ExportStatus};
use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::transport::ApiRequest;

/// How a status poll waits and gives up
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Delay between polls
    pub interval: Duration,
    /// Total time before the poll gives up
    pub timeout: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(5 * 60),
        }
    }
}

/// Client for the `exports` resource family
pub struct ExportsApi {
    client: Arc<ApiClient>,
}

impl ExportsApi {
    /// Create the resource client
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Trigger a service-request report export (admin)
    pub async fn generate_service_report(
        &self,
        professional_id: Option<i64>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Envelope<ExportStatus>> {
        let mut body = serde_json::Map::new();
        insert_opt(&mut body, "professional_id", professional_id.map(Value::from));
        insert_opt(&mut body, "start_date", start_date.map(Value::from));
        insert_opt(&mut body, "end_date", end_date.map(Value::from));

        let value = self
            .client
            .post("exports/service-requests", Value::Object(body))
            .await?;
        Envelope::from_value(value)
    }

    /// Current status of an export task; always hits the wire
    pub async fn status(&self, task_id: &str) -> Result<Envelope<ExportStatus>> {
        let request = ApiRequest::get(format!("exports/status/{task_id}"));
        let value = self.client.transport().send(request).await?.into_json()?;
        Envelope::from_value(value)
    }

    /// Poll an export task until it completes or the poll times out
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] when the task does not complete within
    /// `options.timeout`; transport errors end the poll immediately.
    pub async fn wait_for_completion(
        &self,
        task_id: &str,
        options: PollOptions,
    ) -> Result<ExportStatus> {
        let started = tokio::time::Instant::now();

        loop {
            let status = self.status(task_id).await?.data;
            if status.completed {
                debug!(task_id, filename = ?status.filename, "export completed");
                return Ok(status);
            }

            if started.elapsed() >= options.timeout {
                return Err(Error::Timeout(format!(
                    "export task {task_id} did not complete within {:?}",
                    options.timeout
                )));
            }

            tokio::time::sleep(options.interval).await;
        }
    }

    /// Download a generated export file
    pub async fn download(&self, filename: &str) -> Result<Bytes> {
        self.client
            .download(&format!("exports/download/{filename}"))
            .await
    }
}
