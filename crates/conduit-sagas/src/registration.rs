//! User registration: auth identity, then profile, then welcome email.

use std::sync::Arc;

use async_trait::async_trait;
use conduit_core::{AuthIdentity, ProfileUpdate, RegisterRequest};
use conduit_gateway::Gateway;
use conduit_saga::{Compensation, ContextError, Saga, SagaContext, SagaStep, StepResults};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::effects::{SimulatedMailer, WelcomeEmailReceipt, WelcomeMailer};
use crate::error::RegistrationError;
use crate::services::{AuthService, UserService};

pub const CREATE_AUTH_USER: &str = "create_auth_user";
pub const CREATE_USER_PROFILE: &str = "create_user_profile";
pub const SEND_WELCOME_EMAIL: &str = "send_welcome_email";

/// Input of one registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub request: RegisterRequest,
    pub bio: Option<String>,
    pub image: Option<String>,
}

/// Collaborators of the registration saga.
#[derive(Clone)]
pub struct RegistrationServices {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UserService>,
    pub mailer: Arc<dyn WelcomeMailer>,
}

impl RegistrationServices {
    /// Gateway clients plus the simulated welcome mailer.
    #[must_use]
    pub fn from_gateway(gateway: &Gateway) -> Self {
        Self {
            auth: gateway.auth.clone(),
            users: gateway.users.clone(),
            mailer: Arc::new(SimulatedMailer::default()),
        }
    }
}

/// Result of a registration step, one variant per step.
///
/// Service replies are kept as returned; their shape is checked where a
/// later step or the caller reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RegistrationValue {
    AuthUser(Value),
    Profile(Value),
    WelcomeEmail(WelcomeEmailReceipt),
}

impl RegistrationValue {
    /// Identity carried by an auth step result.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::UnexpectedResult`] if the result is not an
    /// auth reply with a usable `userId`.
    pub fn auth_identity(&self) -> Result<AuthIdentity, ContextError> {
        let identity = match self {
            Self::AuthUser(payload) => AuthIdentity::from_payload(payload),
            Self::Profile(_) | Self::WelcomeEmail(_) => None,
        };
        identity.ok_or_else(|| unexpected(CREATE_AUTH_USER, "an auth identity with a user id"))
    }
}

/// What the caller of a successful registration needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOutcome {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub welcome_email_sent: bool,
}

impl RegistrationOutcome {
    /// Pick the caller-facing fields out of the step results.
    ///
    /// # Errors
    ///
    /// Returns an error if the auth step result is missing or of the wrong kind.
    pub fn from_results(
        registration: &Registration,
        results: &StepResults<RegistrationValue>,
    ) -> Result<Self, ContextError> {
        let user_id = results
            .get(CREATE_AUTH_USER)
            .ok_or_else(|| ContextError::MissingResult {
                step: CREATE_AUTH_USER.to_string(),
            })?
            .auth_identity()?
            .user_id;
        let welcome_email_sent = matches!(
            results.get(SEND_WELCOME_EMAIL),
            Some(RegistrationValue::WelcomeEmail(receipt)) if receipt.email_sent
        );
        Ok(Self {
            user_id,
            username: registration.request.username.clone(),
            email: registration.request.email.clone(),
            welcome_email_sent,
        })
    }
}

fn unexpected(step: &str, expected: &'static str) -> ContextError {
    ContextError::UnexpectedResult {
        step: step.to_string(),
        expected,
    }
}

struct CreateAuthUser {
    auth: Arc<dyn AuthService>,
    request: RegisterRequest,
}

#[async_trait]
impl SagaStep for CreateAuthUser {
    type Value = RegistrationValue;
    type Error = RegistrationError;

    fn name(&self) -> &str {
        CREATE_AUTH_USER
    }

    async fn execute(
        &self,
        _ctx: &SagaContext<RegistrationValue>,
    ) -> Result<RegistrationValue, RegistrationError> {
        info!(email = %self.request.email, "creating user in auth service");
        let payload = self
            .auth
            .register(&self.request)
            .await
            .into_result()
            .map_err(RegistrationError::AuthCreation)?
            .unwrap_or(Value::Null);
        Ok(RegistrationValue::AuthUser(payload))
    }

    async fn compensate(
        &self,
        _ctx: &SagaContext<RegistrationValue>,
        output: &RegistrationValue,
    ) -> Result<Compensation, RegistrationError> {
        let user_id = output.auth_identity().map(|identity| identity.user_id).ok();
        info!(user_id = ?user_id, "auth user creation rolled back (no undo endpoint, logged for audit)");
        Ok(Compensation::Irreversible)
    }

    fn compensation_description(&self) -> String {
        "log auth user rollback for audit".to_string()
    }
}

struct CreateUserProfile {
    users: Arc<dyn UserService>,
    profile: ProfileUpdate,
}

#[async_trait]
impl SagaStep for CreateUserProfile {
    type Value = RegistrationValue;
    type Error = RegistrationError;

    fn name(&self) -> &str {
        CREATE_USER_PROFILE
    }

    async fn execute(
        &self,
        ctx: &SagaContext<RegistrationValue>,
    ) -> Result<RegistrationValue, RegistrationError> {
        let identity = ctx.require(CREATE_AUTH_USER)?.auth_identity()?;

        info!(user_id = %identity.user_id, "creating user profile");
        let profile = self
            .users
            .update_profile(&identity.user_id, &self.profile)
            .await
            .into_result()
            .map_err(RegistrationError::ProfileCreation)?
            .unwrap_or(Value::Null);
        Ok(RegistrationValue::Profile(profile))
    }

    async fn compensate(
        &self,
        _ctx: &SagaContext<RegistrationValue>,
        _output: &RegistrationValue,
    ) -> Result<Compensation, RegistrationError> {
        info!(username = %self.profile.username, "user profile creation rolled back (logged for audit)");
        Ok(Compensation::Irreversible)
    }

    fn compensation_description(&self) -> String {
        "log user profile rollback for audit".to_string()
    }
}

struct SendWelcomeEmail {
    mailer: Arc<dyn WelcomeMailer>,
    recipient: String,
}

#[async_trait]
impl SagaStep for SendWelcomeEmail {
    type Value = RegistrationValue;
    type Error = RegistrationError;

    fn name(&self) -> &str {
        SEND_WELCOME_EMAIL
    }

    async fn execute(
        &self,
        _ctx: &SagaContext<RegistrationValue>,
    ) -> Result<RegistrationValue, RegistrationError> {
        let receipt = self
            .mailer
            .send_welcome(&self.recipient)
            .await
            .map_err(RegistrationError::WelcomeEmail)?;
        Ok(RegistrationValue::WelcomeEmail(receipt))
    }

    async fn compensate(
        &self,
        _ctx: &SagaContext<RegistrationValue>,
        _output: &RegistrationValue,
    ) -> Result<Compensation, RegistrationError> {
        info!(recipient = %self.recipient, "welcome email cannot be unsent (logged for audit)");
        Ok(Compensation::Irreversible)
    }

    fn compensation_description(&self) -> String {
        "log welcome email for audit".to_string()
    }
}

/// Build the registration saga for one request.
#[must_use]
pub fn user_registration_saga(
    services: &RegistrationServices,
    registration: Registration,
) -> Saga<RegistrationValue, RegistrationError> {
    let Registration {
        request,
        bio,
        image,
    } = registration;

    let profile = ProfileUpdate {
        username: request.username.clone(),
        bio: bio.unwrap_or_default(),
        image,
    };
    let recipient = request.email.clone();

    let mut saga = Saga::new();
    saga.add_step(CreateAuthUser {
        auth: Arc::clone(&services.auth),
        request,
    });
    saga.add_step(CreateUserProfile {
        users: Arc::clone(&services.users),
        profile,
    });
    saga.add_step(SendWelcomeEmail {
        mailer: Arc::clone(&services.mailer),
        recipient,
    });
    saga
}

/// Register a user across the auth and user services.
///
/// # Errors
///
/// Returns the first failing step's error after rolling back earlier steps.
pub async fn execute_registration(
    services: &RegistrationServices,
    registration: Registration,
) -> Result<StepResults<RegistrationValue>, RegistrationError> {
    user_registration_saga(services, registration)
        .execute()
        .await
}
