//! Business sagas coordinating the auth, user and article services.
//!
//! Each saga is assembled by a plain builder function returning a configured
//! [`conduit_saga::Saga`], and has one entry point that builds and executes it.

mod effects;
mod error;
pub mod publication;
pub mod registration;
mod services;

pub use effects::{
    AuthorStats, AuthorStatsUpdate, SimulatedAuthorStats, SimulatedMailer, WelcomeEmailReceipt,
    WelcomeMailer,
};
pub use error::{PublicationError, RegistrationError, SideEffectError};
pub use publication::{
    PublicationServices, PublicationValue, article_publication_saga, execute_publication,
};
pub use registration::{
    Registration, RegistrationOutcome, RegistrationServices, RegistrationValue,
    execute_registration, user_registration_saga,
};
pub use services::{ArticleService, AuthService, UserService};
