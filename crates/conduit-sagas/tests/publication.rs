//! Article publication saga behavior.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FailingStats, MockArticles, new_article};
use conduit_core::Article;
use conduit_gateway::testing::ScriptedTransport;
use conduit_gateway::{Gateway, GatewayConfig, HttpResponse, Method, ServiceResponse};
use conduit_saga::StepStatus;
use conduit_sagas::publication::{CREATE_ARTICLE, UPDATE_AUTHOR_STATS};
use conduit_sagas::{
    AuthorStats, AuthorStatsUpdate, PublicationError, PublicationServices, PublicationValue,
    SimulatedAuthorStats, article_publication_saga, execute_publication,
};
use serde_json::json;

fn services(articles: &Arc<MockArticles>, stats: Arc<dyn AuthorStats>) -> PublicationServices {
    PublicationServices {
        articles: Arc::clone(articles) as _,
        stats,
    }
}

fn created_article() -> ServiceResponse {
    ServiceResponse::ok(Some(json!({
        "id": "art_1",
        "slug": "how-to-train-your-dragon",
        "title": "How to train your dragon",
        "authorId": "usr_1"
    })))
}

#[tokio::test(start_paused = true)]
async fn successful_publication_keeps_the_article() -> anyhow::Result<()> {
    let articles = Arc::new(MockArticles::new(created_article()));
    let services = services(&articles, Arc::new(SimulatedAuthorStats::default()));

    let results = execute_publication(&services, new_article(), "usr_1").await?;

    let article = results[CREATE_ARTICLE]
        .article()
        .ok_or_else(|| anyhow::anyhow!("expected an article result"))?;
    assert_eq!(article.id.as_deref(), Some("art_1"));
    assert_eq!(article.author_id.as_deref(), Some("usr_1"));
    assert_eq!(
        results[UPDATE_AUTHOR_STATS],
        PublicationValue::AuthorStats(AuthorStatsUpdate {
            stats_updated: true
        })
    );
    assert_eq!(articles.creates().len(), 1);
    assert_eq!(articles.creates()[0].1, "usr_1");
    assert!(articles.deletes().is_empty());
    Ok(())
}

#[tokio::test]
async fn stats_failure_deletes_the_created_article() {
    let articles = Arc::new(MockArticles::new(created_article()));
    let services = services(&articles, Arc::new(FailingStats));

    let (result, audit_log) = article_publication_saga(&services, new_article(), "usr_1")
        .execute_with_audit()
        .await;

    assert!(matches!(
        result.expect_err("stats fail"),
        PublicationError::AuthorStats(_)
    ));
    assert_eq!(
        articles.deletes(),
        vec![("art_1".to_string(), "usr_1".to_string())]
    );
    let statuses: Vec<StepStatus> = audit_log.records().iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec![StepStatus::Compensated, StepStatus::Failed]);
}

#[tokio::test]
async fn malformed_article_reply_is_still_deleted_on_rollback() {
    let articles = Arc::new(MockArticles::new(ServiceResponse::ok(Some(
        json!({"id": "art_1", "authorId": 42}),
    ))));
    let services = services(&articles, Arc::new(FailingStats));

    let (result, audit_log) = article_publication_saga(&services, new_article(), "usr_1")
        .execute_with_audit()
        .await;

    assert!(matches!(
        result.expect_err("stats fail"),
        PublicationError::AuthorStats(_)
    ));
    assert_eq!(articles.creates().len(), 1);
    assert_eq!(
        articles.deletes(),
        vec![("art_1".to_string(), "usr_1".to_string())]
    );
    assert_eq!(audit_log.records()[0].status, StepStatus::Compensated);
}

#[tokio::test]
async fn numeric_article_id_is_deleted_as_text() {
    let articles = Arc::new(MockArticles::new(ServiceResponse::ok(Some(
        json!({"id": 7}),
    ))));
    let services = services(&articles, Arc::new(FailingStats));

    let result = execute_publication(&services, new_article(), "usr_1").await;

    assert!(result.is_err());
    assert_eq!(
        articles.deletes(),
        vec![("7".to_string(), "usr_1".to_string())]
    );
}

#[tokio::test]
async fn rejected_article_is_never_deleted() {
    let articles = Arc::new(MockArticles::new(ServiceResponse::failure(
        "Service error: 422 Unprocessable Entity",
    )));
    let services = services(&articles, Arc::new(FailingStats));

    let err = execute_publication(&services, new_article(), "usr_1")
        .await
        .expect_err("create fails");

    assert_eq!(
        err.to_string(),
        "Article creation failed: Service error: 422 Unprocessable Entity"
    );
    assert!(articles.deletes().is_empty());
}

#[tokio::test]
async fn article_without_id_cannot_be_deleted() {
    let articles = Arc::new(MockArticles::new(ServiceResponse::ok(None)));
    let services = services(&articles, Arc::new(FailingStats));

    let (result, audit_log) = article_publication_saga(&services, new_article(), "usr_1")
        .execute_with_audit()
        .await;

    assert!(result.is_err());
    assert!(articles.deletes().is_empty());
    assert_eq!(audit_log.records()[0].status, StepStatus::Irreversible);
}

#[tokio::test]
async fn failed_delete_is_audited_without_masking_the_stats_error() {
    let articles = Arc::new(
        MockArticles::new(created_article())
            .with_delete_response(ServiceResponse::failure(
                "Service error: 503 Service Unavailable",
            )),
    );
    let services = services(&articles, Arc::new(FailingStats));

    let (result, audit_log) = article_publication_saga(&services, new_article(), "usr_1")
        .execute_with_audit()
        .await;

    assert_eq!(
        result.expect_err("stats fail").to_string(),
        "Author stats update failed"
    );
    let failures = audit_log.compensation_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].step, CREATE_ARTICLE);
    assert_eq!(failures[0].description, "delete the created article");
    assert!(failures[0].message.contains("503"));
    assert_eq!(audit_log.records()[0].status, StepStatus::CompensationFailed);
}

#[tokio::test]
async fn publication_over_http_gateway_deletes_with_author_header() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .respond(
                Method::Post,
                "/api/articles",
                HttpResponse::json(201, &json!({"success": true, "data": {"id": "art_7"}})),
            )
            .respond(
                Method::Delete,
                "/api/articles/art_7",
                HttpResponse::new(204, ""),
            ),
    );
    let gateway = Gateway::with_transport(&GatewayConfig::default(), Arc::clone(&transport) as _);
    let services = PublicationServices {
        stats: Arc::new(FailingStats),
        ..PublicationServices::from_gateway(&gateway)
    };

    let (result, audit_log) = article_publication_saga(&services, new_article(), "usr_1")
        .execute_with_audit()
        .await;

    assert!(result.is_err());
    let posts = transport.requests_to(Method::Post, "/api/articles");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].header("x-user-id"), Some("usr_1"));
    let deletes = transport.requests_to(Method::Delete, "/api/articles/art_7");
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].url, "http://localhost:3001/api/articles/art_7");
    assert_eq!(deletes[0].header("X-User-ID"), Some("usr_1"));
    assert_eq!(audit_log.records()[0].status, StepStatus::Compensated);
}

#[tokio::test(start_paused = true)]
async fn simulated_stats_delay_is_observed_by_the_saga() -> anyhow::Result<()> {
    let articles = Arc::new(MockArticles::new(ServiceResponse::ok(Some(
        serde_json::to_value(Article {
            id: Some("art_2".to_string()),
            ..Article::default()
        })?,
    ))));
    let services = services(
        &articles,
        Arc::new(SimulatedAuthorStats::new(Duration::from_secs(2))),
    );
    let started = tokio::time::Instant::now();

    execute_publication(&services, new_article(), "usr_1").await?;

    assert!(started.elapsed() >= Duration::from_secs(2));
    Ok(())
}
