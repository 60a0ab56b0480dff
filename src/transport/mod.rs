//! HTTP transport
//!
//! Requests and responses are plain data so interceptors can transform them
//! as ordinary functions. [`Transport`] is the seam the caching client talks
//! through; [`HttpTransport`] is the reqwest-backed implementation.

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::error::Result;

/// An outgoing API request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the configured base URL
    pub path: String,
    /// Query parameters, already serialized to strings
    pub query: Vec<(String, String)>,
    /// Request body, if any
    pub body: Option<RequestBody>,
    /// Extra headers; merged over the transport defaults
    pub headers: HeaderMap,
    /// Expected response body format
    pub response_format: ResponseFormat,
}

/// Request body variants
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// JSON payload
    Json(Value),
    /// Multipart form (uploads)
    Multipart(MultipartForm),
}

/// A multipart form: text fields plus at most one file
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    /// Plain text fields
    pub fields: Vec<(String, String)>,
    /// Attached file, if any
    pub file: Option<FilePart>,
}

impl MultipartForm {
    /// Empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Attach the file
    #[must_use]
    pub fn file(mut self, part: FilePart) -> Self {
        self.file = Some(part);
        self
    }
}

/// A file destined for a multipart upload
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field name
    pub field_name: String,
    /// Reported file name
    pub file_name: String,
    /// MIME type of the content
    pub mime_type: String,
    /// File content
    pub bytes: Bytes,
}

/// Expected shape of the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Parse the body as JSON
    #[default]
    Json,
    /// Return the raw bytes (file downloads)
    Bytes,
}

impl ApiRequest {
    /// Build a request with the given method and path
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: HeaderMap::new(),
            response_format: ResponseFormat::Json,
        }
    }

    /// Build a GET request
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Attach query parameters
    #[must_use]
    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    /// Attach a JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Attach a multipart form body
    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    /// Expect a raw byte response instead of JSON
    #[must_use]
    pub fn bytes_response(mut self) -> Self {
        self.response_format = ResponseFormat::Bytes;
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Response body variants
#[derive(Debug, Clone)]
pub enum ResponseBody {
    /// Parsed JSON payload
    Json(Value),
    /// Raw bytes
    Bytes(Bytes),
}

/// A successful API response
///
/// Failures never reach this type; they are classified into [`crate::Error`]
/// at the transport boundary.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status (always a success status)
    pub status: u16,
    /// Response body
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Consume the response as JSON
    pub fn into_json(self) -> Result<Value> {
        match self.body {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Bytes(_) => Err(crate::Error::UnexpectedBody(
                "expected JSON, received raw bytes".to_string(),
            )),
        }
    }

    /// Consume the response as raw bytes
    pub fn into_bytes(self) -> Result<Bytes> {
        match self.body {
            ResponseBody::Bytes(bytes) => Ok(bytes),
            ResponseBody::Json(_) => Err(crate::Error::UnexpectedBody(
                "expected raw bytes, received JSON".to_string(),
            )),
        }
    }
}

/// Seam between the caching client and the wire
///
/// Implemented by [`HttpTransport`] for production and by in-memory fakes in
/// tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the classified outcome
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}
