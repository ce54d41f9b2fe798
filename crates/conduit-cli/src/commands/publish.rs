use clap::Args;
use conduit_core::{Article, NewArticle};
use conduit_gateway::Gateway;
use conduit_sagas::publication::{CREATE_ARTICLE, UPDATE_AUTHOR_STATS};
use conduit_sagas::{PublicationServices, PublicationValue, execute_publication};
use serde::Serialize;

use crate::error::{Result, operation_failed};
use crate::output;

#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Id of the authoring user
    #[arg(long)]
    user_id: String,

    #[arg(long)]
    title: String,

    #[arg(long)]
    description: String,

    #[arg(long)]
    body: String,

    /// Tag to attach; may be repeated
    #[arg(long = "tag")]
    tags: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishedArticle {
    article: Article,
    stats_updated: bool,
}

pub(crate) async fn run(gateway: &Gateway, args: PublishArgs) -> Result<()> {
    let PublishArgs {
        user_id,
        title,
        description,
        body,
        tags,
    } = args;
    let article = NewArticle {
        title,
        description,
        body,
        tag_list: tags,
    };
    let services = PublicationServices::from_gateway(gateway);

    let results = execute_publication(&services, article, &user_id)
        .await
        .map_err(|err| operation_failed("publish", &err))?;

    let article = results
        .get(CREATE_ARTICLE)
        .and_then(PublicationValue::article)
        .unwrap_or_default();
    let stats_updated = matches!(
        results.get(UPDATE_AUTHOR_STATS),
        Some(PublicationValue::AuthorStats(update)) if update.stats_updated
    );

    output::print_json(&PublishedArticle {
        article,
        stats_updated,
    })
}
