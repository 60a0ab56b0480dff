//! Response models for the platform API
//!
//! The backend wraps every payload in a `{status, status_code, data, detail,
//! pagination}` envelope; resources deserialize out of `data`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Standard response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// `success` or `failure`
    pub status: String,
    /// Echoed HTTP status code
    pub status_code: u16,
    /// The actual payload
    pub data: T,
    /// Optional human-readable message
    #[serde(default)]
    pub detail: Option<String>,
    /// Pagination metadata for listing endpoints
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T: serde::de::DeserializeOwned> Envelope<T> {
    /// Deserialize an envelope from a raw response payload
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Total matching items
    pub total: u64,
    /// Total pages
    pub pages: u32,
    /// Current page (1-based)
    pub current_page: u32,
    /// Page size
    pub per_page: u32,
    /// Whether a next page exists
    pub has_next: bool,
    /// Whether a previous page exists
    pub has_prev: bool,
}

/// A service offered on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Base price
    pub base_price: f64,
    /// Estimated duration in minutes
    pub estimated_time: i64,
    /// Whether customers can currently book it
    pub is_active: bool,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Lifecycle of a service request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Waiting for a professional
    Created,
    /// A professional accepted it
    Assigned,
    /// Work finished
    Completed,
}

/// Compact professional info nested inside requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompactProfessional {
    /// Identifier
    pub id: i64,
    /// Display name
    pub full_name: String,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Average review rating
    #[serde(default)]
    pub average_rating: Option<f64>,
}

/// A review attached to a completed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Identifier
    pub id: i64,
    /// Rating, 1 to 5
    pub rating: i32,
    /// Free-text comment
    #[serde(default)]
    pub comment: Option<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Whether the review has been reported
    #[serde(default)]
    pub is_reported: bool,
    /// Reason it was reported
    #[serde(default)]
    pub report_reason: Option<String>,
}

/// A customer's service request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    /// Identifier
    pub id: i64,
    /// Requested service
    pub service_id: i64,
    /// Lifecycle status
    pub status: RequestStatus,
    /// When the customer wants the work done
    #[serde(default)]
    pub preferred_time: Option<NaiveDateTime>,
    /// What the customer asked for
    #[serde(default)]
    pub description: Option<String>,
    /// Assigned professional, once any
    #[serde(default)]
    pub professional: Option<CompactProfessional>,
    /// Review, once completed and reviewed
    #[serde(default)]
    pub review: Option<Review>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// A professional's profile as listed for moderation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professional {
    /// Identifier
    pub id: i64,
    /// Display name
    pub full_name: String,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Offered service type
    #[serde(default)]
    pub service_type_id: Option<i64>,
    /// Years of experience
    #[serde(default)]
    pub experience: Option<i32>,
    /// Whether an admin verified the profile
    #[serde(default)]
    pub is_verified: bool,
    /// Whether the account is blocked
    #[serde(default)]
    pub is_blocked: bool,
    /// Average review rating
    #[serde(default)]
    pub average_rating: Option<f64>,
}

/// A customer account as listed for moderation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Identifier
    pub id: i64,
    /// Display name
    pub full_name: String,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Delivery address
    #[serde(default)]
    pub address: Option<String>,
    /// PIN code
    #[serde(default)]
    pub pin_code: Option<String>,
    /// Whether the account is blocked
    #[serde(default)]
    pub is_blocked: bool,
}

/// The signed-in user's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identifier
    pub id: i64,
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Platform role
    pub role: String,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Address
    #[serde(default)]
    pub address: Option<String>,
    /// PIN code
    #[serde(default)]
    pub pin_code: Option<String>,
    /// Professional self-description
    #[serde(default)]
    pub description: Option<String>,
}

/// Login response payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    /// Issued bearer token
    pub token: String,
}

/// Status of a background export task
#[derive(Debug, Clone, Deserialize)]
pub struct ExportStatus {
    /// Task identifier
    #[serde(default)]
    pub task_id: Option<String>,
    /// Whether the export finished
    #[serde(default)]
    pub completed: bool,
    /// Generated file name, once completed
    #[serde(default)]
    pub filename: Option<String>,
    /// Failure detail, if the task failed
    #[serde(default)]
    pub error: Option<String>,
}
