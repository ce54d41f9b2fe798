use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::error::SideEffectError;

const WELCOME_EMAIL_DELAY: Duration = Duration::from_millis(500);
const AUTHOR_STATS_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeEmailReceipt {
    pub email_sent: bool,
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorStatsUpdate {
    pub stats_updated: bool,
}

/// Sends the welcome email to a newly registered user.
#[async_trait]
pub trait WelcomeMailer: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the email could not be handed off.
    async fn send_welcome(&self, recipient: &str) -> Result<WelcomeEmailReceipt, SideEffectError>;
}

/// Records a publication in the author's statistics.
#[async_trait]
pub trait AuthorStats: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the statistics could not be updated.
    async fn record_publication(&self, author_id: &str) -> Result<AuthorStatsUpdate, SideEffectError>;
}

/// Mailer that only waits, then reports the email as sent.
#[derive(Debug, Clone)]
pub struct SimulatedMailer {
    delay: Duration,
}

impl SimulatedMailer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedMailer {
    fn default() -> Self {
        Self::new(WELCOME_EMAIL_DELAY)
    }
}

#[async_trait]
impl WelcomeMailer for SimulatedMailer {
    async fn send_welcome(&self, recipient: &str) -> Result<WelcomeEmailReceipt, SideEffectError> {
        debug!(recipient, "sending welcome email");
        tokio::time::sleep(self.delay).await;
        Ok(WelcomeEmailReceipt {
            email_sent: true,
            recipient: recipient.to_string(),
        })
    }
}

/// Statistics updater that only waits, then reports success.
#[derive(Debug, Clone)]
pub struct SimulatedAuthorStats {
    delay: Duration,
}

impl SimulatedAuthorStats {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedAuthorStats {
    fn default() -> Self {
        Self::new(AUTHOR_STATS_DELAY)
    }
}

#[async_trait]
impl AuthorStats for SimulatedAuthorStats {
    async fn record_publication(&self, author_id: &str) -> Result<AuthorStatsUpdate, SideEffectError> {
        debug!(author = author_id, "updating author statistics");
        tokio::time::sleep(self.delay).await;
        Ok(AuthorStatsUpdate {
            stats_updated: true,
        })
    }
}
