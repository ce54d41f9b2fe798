use std::sync::Arc;

use conduit_core::ProfileUpdate;

use crate::client::{ServiceClient, USER_ID_HEADER};
use crate::response::ServiceResponse;
use crate::transport::Transport;

/// Client for the user profile service.
#[derive(Clone)]
pub struct UserClient {
    client: ServiceClient,
}

impl UserClient {
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

    pub async fn get_user(&self, user_id: &str) -> ServiceResponse {
        self.client.get(&format!("/api/users/{user_id}"), &[]).await
    }

    /// Write profile fields for `user_id`, acting as that user.
    pub async fn update_profile(&self, user_id: &str, profile: &ProfileUpdate) -> ServiceResponse {
        self.client
            .put(
                &format!("/api/users/{user_id}"),
                Some(profile),
                &[(USER_ID_HEADER, user_id)],
            )
            .await
    }

    pub async fn get_user_stats(&self, user_id: &str) -> ServiceResponse {
        self.client
            .get(&format!("/api/users/{user_id}/stats"), &[])
            .await
    }
}
