//! Article publication: create the article, then update the author's stats.

use std::sync::Arc;

use async_trait::async_trait;
use conduit_core::{Article, NewArticle};
use conduit_gateway::Gateway;
use conduit_saga::{Compensation, Saga, SagaContext, SagaStep, StepResults};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::effects::{AuthorStats, AuthorStatsUpdate, SimulatedAuthorStats};
use crate::error::PublicationError;
use crate::services::ArticleService;

pub const CREATE_ARTICLE: &str = "create_article";
pub const UPDATE_AUTHOR_STATS: &str = "update_author_stats";

/// Collaborators of the publication saga.
#[derive(Clone)]
pub struct PublicationServices {
    pub articles: Arc<dyn ArticleService>,
    pub stats: Arc<dyn AuthorStats>,
}

impl PublicationServices {
    /// Gateway article client plus the simulated statistics updater.
    #[must_use]
    pub fn from_gateway(gateway: &Gateway) -> Self {
        Self {
            articles: gateway.articles.clone(),
            stats: Arc::new(SimulatedAuthorStats::default()),
        }
    }
}

/// Result of a publication step, one variant per step.
///
/// The created article is kept as the service returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PublicationValue {
    Article(Value),
    AuthorStats(AuthorStatsUpdate),
}

impl PublicationValue {
    /// Known fields of an article result, `None` for other results.
    #[must_use]
    pub fn article(&self) -> Option<Article> {
        match self {
            Self::Article(payload) => Some(Article::from_payload(payload)),
            Self::AuthorStats(_) => None,
        }
    }
}

struct CreateArticle {
    articles: Arc<dyn ArticleService>,
    article: NewArticle,
    user_id: String,
}

#[async_trait]
impl SagaStep for CreateArticle {
    type Value = PublicationValue;
    type Error = PublicationError;

    fn name(&self) -> &str {
        CREATE_ARTICLE
    }

    async fn execute(
        &self,
        _ctx: &SagaContext<PublicationValue>,
    ) -> Result<PublicationValue, PublicationError> {
        info!(author = %self.user_id, title = %self.article.title, "creating article");
        let payload = self
            .articles
            .create_article(&self.article, &self.user_id)
            .await
            .into_result()
            .map_err(PublicationError::ArticleCreation)?
            .unwrap_or(Value::Null);
        Ok(PublicationValue::Article(payload))
    }

    async fn compensate(
        &self,
        _ctx: &SagaContext<PublicationValue>,
        output: &PublicationValue,
    ) -> Result<Compensation, PublicationError> {
        let Some(id) = output.article().and_then(|article| article.id) else {
            warn!("created article has no id, nothing to delete");
            return Ok(Compensation::Irreversible);
        };

        info!(article_id = %id, "rolling back article creation");
        self.articles
            .delete_article(&id, &self.user_id)
            .await
            .into_result()
            .map_err(PublicationError::ArticleRollback)?;
        info!(article_id = %id, "article creation rolled back");
        Ok(Compensation::Undone)
    }

    fn compensation_description(&self) -> String {
        "delete the created article".to_string()
    }
}

struct UpdateAuthorStats {
    stats: Arc<dyn AuthorStats>,
    user_id: String,
}

#[async_trait]
impl SagaStep for UpdateAuthorStats {
    type Value = PublicationValue;
    type Error = PublicationError;

    fn name(&self) -> &str {
        UPDATE_AUTHOR_STATS
    }

    async fn execute(
        &self,
        _ctx: &SagaContext<PublicationValue>,
    ) -> Result<PublicationValue, PublicationError> {
        let update = self
            .stats
            .record_publication(&self.user_id)
            .await
            .map_err(PublicationError::AuthorStats)?;
        Ok(PublicationValue::AuthorStats(update))
    }

    // TODO: decrement the author's article count once the user service exposes a stats endpoint for writes.
    async fn compensate(
        &self,
        _ctx: &SagaContext<PublicationValue>,
        _output: &PublicationValue,
    ) -> Result<Compensation, PublicationError> {
        info!(author = %self.user_id, "author statistics rollback logged for audit");
        Ok(Compensation::Irreversible)
    }

    fn compensation_description(&self) -> String {
        "log author statistics rollback for audit".to_string()
    }
}

/// Build the publication saga for one article.
#[must_use]
pub fn article_publication_saga(
    services: &PublicationServices,
    article: NewArticle,
    user_id: &str,
) -> Saga<PublicationValue, PublicationError> {
    let mut saga = Saga::new();
    saga.add_step(CreateArticle {
        articles: Arc::clone(&services.articles),
        article,
        user_id: user_id.to_string(),
    });
    saga.add_step(UpdateAuthorStats {
        stats: Arc::clone(&services.stats),
        user_id: user_id.to_string(),
    });
    saga
}

/// Publish an article on behalf of `user_id`.
///
/// # Errors
///
/// Returns the first failing step's error after rolling back earlier steps.
pub async fn execute_publication(
    services: &PublicationServices,
    article: NewArticle,
    user_id: &str,
) -> Result<StepResults<PublicationValue>, PublicationError> {
    article_publication_saga(services, article, user_id)
        .execute()
        .await
}
