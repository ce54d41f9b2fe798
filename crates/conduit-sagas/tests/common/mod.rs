#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use conduit_core::{NewArticle, ProfileUpdate, RegisterRequest};
use conduit_gateway::ServiceResponse;
use conduit_sagas::{
    ArticleService, AuthService, AuthorStats, AuthorStatsUpdate, SideEffectError, UserService,
    WelcomeEmailReceipt, WelcomeMailer,
};

fn push<T>(calls: &Mutex<Vec<T>>, call: T) {
    if let Ok(mut calls) = calls.lock() {
        calls.push(call);
    }
}

fn snapshot<T: Clone>(calls: &Mutex<Vec<T>>) -> Vec<T> {
    calls.lock().map(|calls| calls.clone()).unwrap_or_default()
}

pub fn register_request() -> RegisterRequest {
    RegisterRequest {
        username: "jake".to_string(),
        email: "jake@jake.jake".to_string(),
        password: "Secret123".to_string(),
        confirm_password: "Secret123".to_string(),
        agree_to_terms: true,
        marketing_opt_in: None,
        invite_code: None,
    }
}

pub fn new_article() -> NewArticle {
    NewArticle {
        title: "How to train your dragon".to_string(),
        description: "Ever wonder how?".to_string(),
        body: "You have to believe".to_string(),
        tag_list: Vec::new(),
    }
}

pub struct MockAuth {
    response: ServiceResponse,
    calls: Mutex<Vec<RegisterRequest>>,
}

impl MockAuth {
    pub fn new(response: ServiceResponse) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RegisterRequest> {
        snapshot(&self.calls)
    }
}

#[async_trait]
impl AuthService for MockAuth {
    async fn register(&self, request: &RegisterRequest) -> ServiceResponse {
        push(&self.calls, request.clone());
        self.response.clone()
    }
}

pub struct MockUsers {
    response: ServiceResponse,
    calls: Mutex<Vec<(String, ProfileUpdate)>>,
}

impl MockUsers {
    pub fn new(response: ServiceResponse) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, ProfileUpdate)> {
        snapshot(&self.calls)
    }
}

#[async_trait]
impl UserService for MockUsers {
    async fn update_profile(&self, user_id: &str, profile: &ProfileUpdate) -> ServiceResponse {
        push(&self.calls, (user_id.to_string(), profile.clone()));
        self.response.clone()
    }
}

pub struct MockArticles {
    create_response: ServiceResponse,
    delete_response: ServiceResponse,
    creates: Mutex<Vec<(NewArticle, String)>>,
    deletes: Mutex<Vec<(String, String)>>,
}

impl MockArticles {
    pub fn new(create_response: ServiceResponse) -> Self {
        Self {
            create_response,
            delete_response: ServiceResponse::ok(None),
            creates: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delete_response(mut self, response: ServiceResponse) -> Self {
        self.delete_response = response;
        self
    }

    pub fn creates(&self) -> Vec<(NewArticle, String)> {
        snapshot(&self.creates)
    }

    pub fn deletes(&self) -> Vec<(String, String)> {
        snapshot(&self.deletes)
    }
}

#[async_trait]
impl ArticleService for MockArticles {
    async fn create_article(&self, article: &NewArticle, user_id: &str) -> ServiceResponse {
        push(&self.creates, (article.clone(), user_id.to_string()));
        self.create_response.clone()
    }

    async fn delete_article(&self, article_id: &str, user_id: &str) -> ServiceResponse {
        push(&self.deletes, (article_id.to_string(), user_id.to_string()));
        self.delete_response.clone()
    }
}

pub struct FailingMailer;

#[async_trait]
impl WelcomeMailer for FailingMailer {
    async fn send_welcome(&self, _recipient: &str) -> Result<WelcomeEmailReceipt, SideEffectError> {
        Err(SideEffectError("smtp unavailable".to_string()))
    }
}

pub struct FailingStats;

#[async_trait]
impl AuthorStats for FailingStats {
    async fn record_publication(&self, _author_id: &str) -> Result<AuthorStatsUpdate, SideEffectError> {
        Err(SideEffectError("stats store down".to_string()))
    }
}
