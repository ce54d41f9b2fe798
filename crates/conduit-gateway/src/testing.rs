//! In-memory [`Transport`] for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

struct Route {
    method: Method,
    path: String,
    reply: Result<HttpResponse, TransportError>,
}

/// Transport answering from a fixed route table and recording every request.
///
/// Routes match on method and URL suffix; the first matching route wins.
/// Unmatched requests get an empty 404.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Vec<Route>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn respond(mut self, method: Method, path: &str, response: HttpResponse) -> Self {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            reply: Ok(response),
        });
        self
    }

    #[must_use]
    pub fn fail(mut self, method: Method, path: &str, error: TransportError) -> Self {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            reply: Err(error),
        });
        self
    }

    /// Requests received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Requests that targeted this method and URL suffix.
    #[must_use]
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.url.ends_with(path))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let reply = self
            .routes
            .iter()
            .find(|route| route.method == request.method && request.url.ends_with(&route.path))
            .map_or_else(|| Ok(HttpResponse::new(404, "")), |route| route.reply.clone());

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        reply
    }
}
