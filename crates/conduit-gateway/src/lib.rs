//! Gateway clients for the remote conduit services.
//!
//! Every call goes through [`ServiceClient::request`], which turns transport
//! failures, non-success statuses and undecodable bodies into a failed
//! [`ServiceResponse`] instead of an error. Callers decide which failures are
//! fatal.

mod client;
mod config;
mod response;
mod services;
mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{ServiceClient, USER_ID_HEADER};
pub use config::{
    ConfigError, DEFAULT_ARTICLE_URL, DEFAULT_AUTH_URL, DEFAULT_TIMEOUT, DEFAULT_USER_URL,
    GatewayConfig,
};
pub use response::ServiceResponse;
pub use services::{ArticleClient, AuthClient, Gateway, UserClient};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, TransportError};
