mod article;
mod auth;
mod user;

use std::sync::Arc;

pub use article::ArticleClient;
pub use auth::AuthClient;
pub use user::UserClient;

use crate::config::GatewayConfig;
use crate::transport::{ReqwestTransport, Transport, TransportError};

/// The three service clients, sharing one transport.
#[derive(Clone)]
pub struct Gateway {
    pub articles: Arc<ArticleClient>,
    pub users: Arc<UserClient>,
    pub auth: Arc<AuthClient>,
}

impl Gateway {
    /// Build clients for the configured addresses over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn connect(config: &GatewayConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    #[must_use]
    pub fn with_transport(config: &GatewayConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            articles: Arc::new(ArticleClient::new(
                &config.article_url,
                Arc::clone(&transport),
            )),
            users: Arc::new(UserClient::new(&config.user_url, Arc::clone(&transport))),
            auth: Arc::new(AuthClient::new(&config.auth_url, transport)),
        }
    }
}
