//! Authenticated request gateway
//!
//! Every call except `authenticate` reads the stored credential at call time
//! and attaches it as a bearer header. Calls are made at most once.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client as HttpClient, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::models::{AuthRequest, AuthResponse};
use crate::error::{ApiError, Result};
use crate::session::TokenStore;

/// Query string pairs
pub type Query<'a> = &'a [(&'static str, String)];

/// Body fields checked, in order, for a server-supplied failure message.
const MESSAGE_FIELDS: [&str; 3] = ["message", "error", "detail"];

/// HTTP gateway to the care service API
pub struct Gateway {
    http: HttpClient,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl Gateway {
    /// Create a gateway for the given base URL. A trailing `/` is added if missing.
    pub fn new(base_url: &str, store: Arc<dyn TokenStore>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("carectl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Ok(Self {
            http,
            base_url,
            store,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn bearer(&self) -> Result<String> {
        match self.store.get() {
            Some(token) => Ok(format!("Bearer {}", token)),
            None => Err(ApiError::Unauthenticated.into()),
        }
    }

    fn authorized(&self, method: Method, path: &str, query: Query<'_>) -> Result<RequestBuilder> {
        let bearer = self.bearer()?;
        let mut builder = self
            .http
            .request(method, self.url(path))
            .header("Authorization", bearer);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        Ok(builder)
    }

    /// Issue one authenticated request and return the decoded body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<Value>,
    ) -> Result<Value> {
        log::debug!("{} {}", method, path);

        let mut builder = self.authorized(method, path, query)?;
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = send(builder).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        Ok(parse_body(&text))
    }

    /// Fetch a raw body, e.g. a server-generated export file.
    pub async fn get_bytes(&self, path: &str, query: Query<'_>) -> Result<Vec<u8>> {
        log::debug!("GET {} (raw)", path);

        let response = send(self.authorized(Method::GET, path, query)?).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;
        Ok(bytes.to_vec())
    }

    /// Exchange email and password for a credential. Needs no stored credential.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AuthResponse> {
        log::debug!("POST auth/authenticate");

        let builder = self.http.post(self.url("auth/authenticate")).json(&AuthRequest {
            email: email.to_string(),
            password: password.to_string(),
        });

        let response = send(builder).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse login response: {}", e)).into()
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: Query<'_>) -> Result<T> {
        let value = self.request(Method::GET, path, query, None).await?;
        decode(value)
    }

    pub async fn post<B: Serialize>(
        &self,
        path: &str,
        query: Query<'_>,
        body: Option<&B>,
    ) -> Result<Value> {
        let body = body.map(serde_json::to_value).transpose()?;
        self.request(Method::POST, path, query, body).await
    }

    pub async fn put<B: Serialize>(
        &self,
        path: &str,
        query: Query<'_>,
        body: Option<&B>,
    ) -> Result<Value> {
        let body = body.map(serde_json::to_value).transpose()?;
        self.request(Method::PUT, path, query, body).await
    }

    pub async fn delete(&self, path: &str, query: Query<'_>) -> Result<Value> {
        self.request(Method::DELETE, path, query, None).await
    }
}

/// Send a request and turn any non-2xx answer into `RequestFailed`.
async fn send(builder: RequestBuilder) -> Result<reqwest::Response> {
    let response = builder.send().await.map_err(ApiError::from)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = failure_message(status, &body);
    log::debug!("Request failed with {}: {}", status, message);

    Err(ApiError::RequestFailed {
        status: status.as_u16(),
        message,
    }
    .into())
}

/// Best available explanation for a failed request.
fn failure_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        let found = MESSAGE_FIELDS
            .iter()
            .filter_map(|field| map.get(*field).and_then(Value::as_str))
            .find(|msg| !msg.trim().is_empty());
        if let Some(msg) = found {
            return msg.to_string();
        }
    }

    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

/// Empty body is `Null`; non-JSON text is kept as a string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse(e.to_string()).into())
}
