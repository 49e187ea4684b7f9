//! HTTP transport — the single point of entry for all backend calls.
//!
//! Every resource client goes through `Transport`: it builds the request,
//! attaches the bearer token when one is stored, and normalizes error
//! responses into a single human-readable message. Successful responses are
//! parsed as JSON and trusted as-is; the server owns the shapes.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::TokenStore;
use crate::errors::ApiError;

const UNKNOWN_ERROR: &str = "An unknown error occurred";

#[derive(Clone)]
pub struct Transport {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl Transport {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let req = self.http.get(self.url(path)).query(query);
        self.send_json(req, "GET", path).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.http.post(self.url(path)).json(body);
        self.send_json(req, "POST", path).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.http.patch(self.url(path)).json(body);
        self.send_json(req, "PATCH", path).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.http.put(self.url(path)).json(body);
        self.send_json(req, "PUT", path).await
    }

    /// DELETE expecting no body. 204 is the normal success response.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let req = self.http.delete(self.url(path));
        debug!(path, "DELETE");
        let response = self.authorized(req).send().await?;
        check_status(response).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        // No stored token means the request goes out unauthenticated; auth
        // enforcement is the server's job.
        match self.tokens.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        method: &str,
        path: &str,
    ) -> Result<T, ApiError> {
        debug!(method, path, "issuing request");
        let response = self.authorized(req).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Pass successful responses through; turn everything else into
/// `ApiError::Http` with a normalized message.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.text().await.unwrap_or_default();
    let message = normalize_error(status, retry_after.as_deref(), &body);
    warn!(status, %message, "request failed");
    Err(ApiError::Http { status, message })
}

/// Error body shape used by the backend: FastAPI-style `detail` (a plain
/// string or a list of validation entries), with `message` as a fallback.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Detail>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Items(Vec<DetailItem>),
}

#[derive(Debug, Deserialize)]
struct DetailItem {
    #[serde(rename = "type")]
    kind: String,
    msg: String,
}

/// Extract a message from an error response.
///
/// 429 is special-cased before the generic path so the user is told when to
/// retry. Otherwise precedence is: `detail` string verbatim, then a non-empty
/// `detail` list joined as `"type: msg"` pairs, then `message`, then a
/// synthesized fallback naming the status code. A body that is not JSON at
/// all is treated as `{"message": "An unknown error occurred"}`.
fn normalize_error(status: u16, retry_after: Option<&str>, body: &str) -> String {
    if status == 429 {
        let when = match retry_after {
            Some(secs) => format!("{secs} seconds"),
            None => "some time".to_string(),
        };
        return format!("Too many requests. Please try again after {when}.");
    }

    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or(ErrorBody {
        detail: None,
        message: Some(UNKNOWN_ERROR.to_string()),
    });

    match parsed.detail {
        Some(Detail::Text(text)) => text,
        Some(Detail::Items(items)) if !items.is_empty() => items
            .iter()
            .map(|item| format!("{}: {}", item.kind, item.msg))
            .collect::<Vec<_>>()
            .join(", "),
        _ => parsed
            .message
            .unwrap_or_else(|| format!("HTTP error! Status: {status}")),
    }
}
