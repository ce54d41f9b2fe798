mod publish;
mod register;

use std::path::Path;

use clap::Subcommand;
use conduit_gateway::{Gateway, GatewayConfig};
use tracing::debug;

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Register a user across the auth and user services
    Register(register::RegisterArgs),
    /// Publish an article and update the author's statistics
    Publish(publish::PublishArgs),
}

impl Commands {
    pub(crate) async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let config = GatewayConfig::load(config_path)?;
        debug!(
            article_url = %config.article_url,
            user_url = %config.user_url,
            auth_url = %config.auth_url,
            "gateway configured"
        );
        let gateway = Gateway::connect(&config)?;

        match self {
            Self::Register(args) => register::run(&gateway, args).await,
            Self::Publish(args) => publish::run(&gateway, args).await,
        }
    }
}
