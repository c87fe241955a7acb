//! In-process request dispatch.
//!
//! [`MockApi`] owns a fully layered axum router and drives it directly with
//! `tower::ServiceExt::oneshot`; no socket is ever opened. Requests are plain
//! [`ApiRequest`] values and every outcome, including malformed requests, comes
//! back as an [`ApiResponse`].

use std::time::Duration;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request, Response, StatusCode, header},
    middleware::from_fn,
    response::IntoResponse,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tower::ServiceExt;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;
use url::{Position, Url};

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::middleware::{REQUEST_ID_HEADER, request_id_middleware, require_bearer};
use crate::routes;
use crate::state::AppState;
use crate::storage::StorageError;

/// Base that relative request URLs are resolved against.
const LOCAL_ORIGIN: &str = "http://localhost";

// =============================================================================
// Request
// =============================================================================

/// An HTTP-shaped request for the mock API.
///
/// `url` may be relative (`/api/posts?search=x`) or absolute; only its path
/// and query are used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    /// Create a request with no headers and no body.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    #[must_use]
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Builder method to add a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Builder method to add `Authorization: Bearer {token}`.
    #[must_use]
    pub fn bearer(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.header(header::AUTHORIZATION.as_str(), value)
    }

    /// Builder method to set a JSON body.
    #[must_use]
    pub fn json(mut self, body: &Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    /// Builder method to set a raw body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Convert into an `http::Request`.
    ///
    /// A request with a body and no explicit `Content-Type` is sent as JSON.
    fn into_http(self) -> Result<Request<Body>, AppError> {
        let target = path_and_query(&self.url)?;

        let mut builder = Request::builder().method(self.method).uri(target);

        let mut has_content_type = false;
        for (name, value) in &self.headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| AppError::BadRequest(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| AppError::BadRequest(format!("invalid header value for {name}: {e}")))?;
            has_content_type |= name == header::CONTENT_TYPE;
            builder = builder.header(name, value);
        }

        let body = match self.body {
            Some(body) => {
                if !has_content_type {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                }
                Body::from(body)
            }
            None => Body::empty(),
        };

        builder
            .body(body)
            .map_err(|e| AppError::BadRequest(format!("invalid request: {e}")))
    }
}

/// Resolve `url` against the local origin and keep only path and query.
fn path_and_query(url: &str) -> Result<String, AppError> {
    let resolved = Url::parse(LOCAL_ORIGIN)
        .and_then(|base| base.join(url))
        .map_err(|e| AppError::BadRequest(format!("invalid url {url:?}: {e}")))?;

    Ok(resolved[Position::BeforePath..Position::AfterQuery].to_string())
}

// =============================================================================
// Response
// =============================================================================

/// A response from the mock API.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A header value, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The request id echoed by the router.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header(REQUEST_ID_HEADER)
    }

    /// Raw body bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The body as an untyped JSON value; `Null` when empty or not JSON.
    #[must_use]
    pub fn body(&self) -> Value {
        self.json().unwrap_or(Value::Null)
    }

    /// The `error` message of a failed response.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        if self.ok() {
            return None;
        }
        self.body()
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    /// The `{ok, status, body}` envelope of this response.
    #[must_use]
    pub fn envelope(&self) -> Value {
        json!({
            "ok": self.ok(),
            "status": self.status.as_u16(),
            "body": self.body(),
        })
    }

    async fn from_http(response: Response<Body>) -> Self {
        let (parts, body) = response.into_parts();
        let body = match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "Failed to collect response body");
                Bytes::new()
            }
        };

        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

// =============================================================================
// Router
// =============================================================================

/// The mock backend as a constructible object.
///
/// Cheap to clone; clones share state. Separately constructed instances share
/// nothing unless built over the same storage.
#[derive(Clone, Debug)]
pub struct MockApi {
    router: Router,
    state: AppState,
}

impl MockApi {
    /// Build the layered router over `state`.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        let router = routes::routes()
            .layer(from_fn(require_bearer))
            .layer(from_fn(request_id_middleware))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "api_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = tracing::field::Empty,
                            status = tracing::field::Empty,
                            latency_ms = tracing::field::Empty,
                        )
                    })
                    .on_response(
                        |response: &Response<Body>, latency: Duration, span: &Span| {
                            span.record("status", response.status().as_u16());
                            span.record(
                                "latency_ms",
                                u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                            );
                            DefaultOnResponse::default().on_response(response, latency, span);
                        },
                    ),
            )
            .with_state(state.clone());

        Self { router, state }
    }

    /// Build from configuration, opening the file store if one is named.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data file exists but cannot be read.
    pub fn from_config(config: ApiConfig) -> Result<Self, StorageError> {
        Ok(Self::new(AppState::from_config(config)?))
    }

    /// A fresh in-memory instance with no simulated latency.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(AppState::new(
            ApiConfig::instant(),
            std::sync::Arc::new(crate::storage::MemoryStore::new()),
        ))
    }

    /// The shared state behind this router.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// The layered router, for callers that want to serve or compose it.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Dispatch one request and collect the response.
    pub async fn fetch(&self, request: ApiRequest) -> ApiResponse {
        let method = request.method.clone();
        let url = request.url.clone();

        let response = match request.into_http() {
            Ok(http) => self
                .router
                .clone()
                .oneshot(http)
                .await
                .unwrap_or_else(|never| match never {}),
            Err(e) => e.into_response(),
        };

        let response = ApiResponse::from_http(response).await;
        tracing::info!(
            %method,
            url = %url,
            status = response.status().as_u16(),
            "Mock API request"
        );
        response
    }
}
