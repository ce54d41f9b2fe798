use async_trait::async_trait;
use conduit_core::{NewArticle, ProfileUpdate, RegisterRequest};
use conduit_gateway::{ArticleClient, AuthClient, ServiceResponse, UserClient};

/// Auth service operations used by the sagas.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> ServiceResponse;
}

/// User service operations used by the sagas.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn update_profile(&self, user_id: &str, profile: &ProfileUpdate) -> ServiceResponse;
}

/// Article service operations used by the sagas.
#[async_trait]
pub trait ArticleService: Send + Sync {
    async fn create_article(&self, article: &NewArticle, user_id: &str) -> ServiceResponse;

    async fn delete_article(&self, article_id: &str, user_id: &str) -> ServiceResponse;
}

#[async_trait]
impl AuthService for AuthClient {
    async fn register(&self, request: &RegisterRequest) -> ServiceResponse {
        AuthClient::register(self, request).await
    }
}

#[async_trait]
impl UserService for UserClient {
    async fn update_profile(&self, user_id: &str, profile: &ProfileUpdate) -> ServiceResponse {
        UserClient::update_profile(self, user_id, profile).await
    }
}

#[async_trait]
impl ArticleService for ArticleClient {
    async fn create_article(&self, article: &NewArticle, user_id: &str) -> ServiceResponse {
        ArticleClient::create_article(self, article, user_id).await
    }

    async fn delete_article(&self, article_id: &str, user_id: &str) -> ServiceResponse {
        ArticleClient::delete_article(self, article_id, user_id).await
    }
}
