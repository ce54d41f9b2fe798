use std::sync::Arc;

use conduit_core::{LoginRequest, RegisterRequest};

use crate::client::ServiceClient;
use crate::response::ServiceResponse;
use crate::transport::Transport;

/// Client for the auth service.
#[derive(Clone)]
pub struct AuthClient {
    client: ServiceClient,
}

impl AuthClient {
    #[must_use]
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            client: ServiceClient::new(base_url, transport),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub async fn register(&self, request: &RegisterRequest) -> ServiceResponse {
        self.client
            .post("/api/auth/register", Some(request), &[])
            .await
    }

    pub async fn login(&self, credentials: &LoginRequest) -> ServiceResponse {
        self.client
            .post("/api/auth/login", Some(credentials), &[])
            .await
    }

    pub async fn current_user(&self, token: &str) -> ServiceResponse {
        let authorization = format!("Bearer {token}");
        self.client
            .get("/api/auth/me", &[("Authorization", authorization.as_str())])
            .await
    }
}
