use conduit_saga::ContextError;
use thiserror::Error;

/// Failure of a side effect that is not a gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SideEffectError(pub String);

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    #[error("Auth creation failed: {0}")]
    AuthCreation(String),

    #[error("Profile creation failed: {0}")]
    ProfileCreation(String),

    #[error("Welcome email failed")]
    WelcomeEmail(#[source] SideEffectError),

    #[error(transparent)]
    Context(#[from] ContextError),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PublicationError {
    #[error("Article creation failed: {0}")]
    ArticleCreation(String),

    #[error("Author stats update failed")]
    AuthorStats(#[source] SideEffectError),

    #[error("Article rollback failed: {0}")]
    ArticleRollback(String),

    #[error(transparent)]
    Context(#[from] ContextError),
}
