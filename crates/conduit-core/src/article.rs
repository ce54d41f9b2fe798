use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload::text_field;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    pub description: String,
    pub body: String,
    #[serde(default)]
    pub tag_list: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Article as returned by the article service.
///
/// `id` is optional: a create call may succeed without echoing one back, in
/// which case there is nothing to delete on rollback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
}

impl Article {
    /// Read the known fields out of a reply, ignoring anything malformed.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            id: text_field(payload, "id"),
            slug: text_field(payload, "slug"),
            title: text_field(payload, "title"),
            author_id: text_field(payload, "authorId"),
        }
    }
}
