use std::sync::Arc;

use conduit_core::{ArticleUpdate, NewArticle};
use serde::Serialize;

use crate::client::{ServiceClient, USER_ID_HEADER};
use crate::response::ServiceResponse;
use crate::transport::Transport;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateArticleBody<'a> {
    #[serde(flatten)]
    article: &'a NewArticle,
    user_id: &'a str,
}

/// Client for the article service.
#[derive(Clone)]
pub struct ArticleClient {
    client: ServiceClient,
}

impl ArticleClient {
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

    /// Create an article owned by `user_id`.
    pub async fn create_article(&self, article: &NewArticle, user_id: &str) -> ServiceResponse {
        let body = CreateArticleBody { article, user_id };
        self.client
            .post("/api/articles", Some(&body), &[(USER_ID_HEADER, user_id)])
            .await
    }

    pub async fn get_article(&self, article_id: &str) -> ServiceResponse {
        self.client
            .get(&format!("/api/articles/{article_id}"), &[])
            .await
    }

    pub async fn update_article(
        &self,
        article_id: &str,
        update: &ArticleUpdate,
        user_id: &str,
    ) -> ServiceResponse {
        self.client
            .put(
                &format!("/api/articles/{article_id}"),
                Some(update),
                &[(USER_ID_HEADER, user_id)],
            )
            .await
    }

    pub async fn delete_article(&self, article_id: &str, user_id: &str) -> ServiceResponse {
        self.client
            .delete(
                &format!("/api/articles/{article_id}"),
                &[(USER_ID_HEADER, user_id)],
            )
            .await
    }
}
