//! reqwest-backed transport
//!
//! Owns the HTTP client (base URL, fixed timeout, JSON default headers) and
//! the interceptor pipeline: request interceptors run in order before the
//! wire, response interceptors run in order over the classified outcome.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use tracing::debug;

use super::{ApiRequest, ApiResponse, RequestBody, ResponseBody, ResponseFormat, Transport};
use crate::config::ClientConfig;
use crate::error::{Error, ErrorBody, Result};
use crate::interceptor::{RequestInterceptor, ResponseInterceptor};

/// HTTP transport over reqwest
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl HttpTransport {
    /// Build a transport from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        // A trailing slash makes Url::join treat the last segment as a
        // directory, so "api" + "services" resolves to "api/services".
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url =
            Url::parse(&base).map_err(|e| Error::Config(format!("Invalid base URL: {e}")))?;

        Ok(Self {
            client,
            base_url,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        })
    }

    /// Append a request interceptor; runs after those already registered
    #[must_use]
    pub fn with_request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    /// Append a response interceptor; runs after those already registered
    #[must_use]
    pub fn with_response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Config(format!("Invalid request path '{path}': {e}")))
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(&request.path)?;
        debug!(method = %request.method, url = %url, "dispatching request");

        let mut builder = self.client.request(request.method, url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = builder.headers(request.headers);

        match request.body {
            Some(RequestBody::Json(value)) => {
                builder = builder.json(&value);
            }
            Some(RequestBody::Multipart(form)) => {
                let mut multipart = Form::new();
                for (name, value) in form.fields {
                    multipart = multipart.text(name, value);
                }
                if let Some(part) = form.file {
                    let file = Part::bytes(part.bytes.to_vec())
                        .file_name(part.file_name)
                        .mime_str(&part.mime_type)
                        .map_err(|e| Error::Config(format!("Invalid MIME type: {e}")))?;
                    multipart = multipart.part(part.field_name, file);
                }
                builder = builder.multipart(multipart);
            }
            None => {}
        }

        let response = builder.send().await.map_err(|e| Error::from_reqwest(&e))?;
        let status = response.status();

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(Error::from_status(
                status.as_u16(),
                &request.path,
                ErrorBody::parse(&raw),
            ));
        }

        let body = match request.response_format {
            ResponseFormat::Json => ResponseBody::Json(
                response
                    .json()
                    .await
                    .map_err(|e| Error::UnexpectedBody(e.to_string()))?,
            ),
            ResponseFormat::Bytes => ResponseBody::Bytes(
                response.bytes().await.map_err(|e| Error::from_reqwest(&e))?,
            ),
        };

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut request = request;
        for interceptor in &self.request_interceptors {
            // A pre-flight rejection abandons the request before the wire;
            // response interceptors only ever see transport outcomes.
            request = interceptor.before_send(request).await?;
        }

        let mut outcome = self.dispatch(request).await;
        for interceptor in &self.response_interceptors {
            outcome = interceptor.after_response(outcome).await;
        }
        outcome
    }
}
