//! Dashboard statistics
//!
//! Stats payloads differ per role (admin, customer, professional), so the
//! data stays a raw JSON value; callers pick out what their dashboard shows.

use std::sync::Arc;

use serde_json::Value;

use super::model::Envelope;
use super::{PageQuery, insert_opt};
use crate::cache::{CacheCategory, Params};
use crate::client::{ApiClient, ReadOptions};
use crate::error::Result;

/// Client for dashboard and detailed statistics
pub struct StatsApi {
    client: Arc<ApiClient>,
}

impl StatsApi {
    /// Create the resource client
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Role-specific dashboard stats
    pub async fn dashboard(&self, force_refresh: bool) -> Result<Envelope<Value>> {
        let mut options = ReadOptions::category(CacheCategory::Dashboard);
        options.force_refresh = force_refresh;

        let value = self
            .client
            .read("dashboard-stats", &Params::new(), options)
            .await?;
        Envelope::from_value(value)
    }

    /// A drill-down listing behind one dashboard tile
    pub async fn detailed(
        &self,
        stat_type: &str,
        query: &PageQuery,
        options: ReadOptions,
    ) -> Result<Envelope<Value>> {
        let mut params = query.to_params();
        params.insert("stat_type".to_string(), Value::from(stat_type));

        let value = self.client.read("detailed-stats", &params, options).await?;
        Envelope::from_value(value)
    }

    /// Activity log entries, optionally filtered by action and date range
    pub async fn activity_logs(
        &self,
        query: &PageQuery,
        action: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        options: ReadOptions,
    ) -> Result<Envelope<Value>> {
        let mut params = query.to_params();
        insert_opt(&mut params, "action", action.map(Value::from));
        insert_opt(&mut params, "start_date", start_date.map(Value::from));
        insert_opt(&mut params, "end_date", end_date.map(Value::from));

        let value = self.client.read("activity-logs", &params, options).await?;
        Envelope::from_value(value)
    }
}
