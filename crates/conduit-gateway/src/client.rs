use std::sync::Arc;

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::response::ServiceResponse;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

/// Header identifying the acting user on mutating calls.
pub const USER_ID_HEADER: &str = "X-User-ID";

const CONTENT_TYPE: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Calls one remote service and normalizes every outcome into a
/// [`ServiceResponse`].
#[derive(Clone)]
pub struct ServiceClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl ServiceClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request against `base_url + path`.
    ///
    /// `Content-Type: application/json` is sent unless `headers` overrides
    /// it. Never fails: transport errors, non-2xx statuses and undecodable
    /// bodies all come back as a failed envelope.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: &[(&str, &str)],
    ) -> ServiceResponse {
        let request = HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: merge_headers(headers),
            body: body.map(|value| value.to_string().into_bytes()),
        };
        debug!(method = %method, url = %request.url, "calling service");

        match self.transport.send(request).await {
            Ok(response) if response.is_success() => decode_body(&response),
            Ok(response) => {
                let message = status_message(response.status);
                warn!(method = %method, path, status = response.status, "service call rejected");
                ServiceResponse::failure(message)
            }
            Err(e) => {
                warn!(method = %method, path, error = %e, "service call failed");
                ServiceResponse::failure(e.to_string())
            }
        }
    }

    pub async fn get(&self, path: &str, headers: &[(&str, &str)]) -> ServiceResponse {
        self.request(Method::Get, path, None, headers).await
    }

    pub async fn post<B>(
        &self,
        path: &str,
        body: Option<&B>,
        headers: &[(&str, &str)],
    ) -> ServiceResponse
    where
        B: Serialize + ?Sized,
    {
        self.send_with_body(Method::Post, path, body, headers).await
    }

    pub async fn put<B>(
        &self,
        path: &str,
        body: Option<&B>,
        headers: &[(&str, &str)],
    ) -> ServiceResponse
    where
        B: Serialize + ?Sized,
    {
        self.send_with_body(Method::Put, path, body, headers).await
    }

    pub async fn delete(&self, path: &str, headers: &[(&str, &str)]) -> ServiceResponse {
        self.request(Method::Delete, path, None, headers).await
    }

    async fn send_with_body<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: &[(&str, &str)],
    ) -> ServiceResponse
    where
        B: Serialize + ?Sized,
    {
        let body = match body.map(serde_json::to_value).transpose() {
            Ok(body) => body,
            Err(e) => {
                return ServiceResponse::failure(format!("failed to encode request body: {e}"));
            }
        };
        self.request(method, path, body.as_ref(), headers).await
    }
}

fn merge_headers(extra: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut headers = vec![(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string())];
    for (name, value) in extra {
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        headers.push(((*name).to_string(), (*value).to_string()));
    }
    headers
}

fn status_message(status: u16) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or_default();
    format!("Service error: {status} {reason}").trim_end().to_string()
}

fn decode_body(response: &HttpResponse) -> ServiceResponse {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return ServiceResponse::ok(None);
    }
    match serde_json::from_slice::<Value>(&response.body) {
        Ok(payload) => ServiceResponse::ok(Some(unwrap_data(payload))),
        Err(e) => ServiceResponse::failure(format!("invalid JSON response: {e}")),
    }
}

/// Services answer either with the record itself or with `{ "data": record }`.
fn unwrap_data(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) if map.get("data").is_some_and(|data| !data.is_null()) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
