pub mod article;
pub mod auth;
pub mod payload;
pub mod user;

pub use article::{Article, ArticleUpdate, NewArticle};
pub use auth::{AuthIdentity, LoginRequest, RegisterRequest};
pub use payload::text_field;
pub use user::ProfileUpdate;
