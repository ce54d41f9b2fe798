use clap::Args;
use conduit_core::RegisterRequest;
use conduit_gateway::Gateway;
use conduit_sagas::{
    Registration, RegistrationOutcome, RegistrationServices, execute_registration,
};

use crate::error::{Result, operation_failed};
use crate::output;

#[derive(Args)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    username: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    password: String,

    /// Password confirmation (default: same as --password)
    #[arg(long)]
    confirm_password: Option<String>,

    #[arg(long)]
    agree_to_terms: bool,

    #[arg(long)]
    marketing_opt_in: bool,

    #[arg(long)]
    invite_code: Option<String>,

    #[arg(long)]
    bio: Option<String>,

    /// Profile image URL
    #[arg(long)]
    image: Option<String>,
}

impl RegisterArgs {
    fn into_registration(self) -> Registration {
        let confirm_password = self
            .confirm_password
            .unwrap_or_else(|| self.password.clone());
        Registration {
            request: RegisterRequest {
                username: self.username,
                email: self.email,
                password: self.password,
                confirm_password,
                agree_to_terms: self.agree_to_terms,
                marketing_opt_in: self.marketing_opt_in.then_some(true),
                invite_code: self.invite_code,
            },
            bio: self.bio,
            image: self.image,
        }
    }
}

pub(crate) async fn run(gateway: &Gateway, args: RegisterArgs) -> Result<()> {
    let registration = args.into_registration();
    let services = RegistrationServices::from_gateway(gateway);

    let results = execute_registration(&services, registration.clone())
        .await
        .map_err(|err| operation_failed("register", &err))?;
    let outcome = RegistrationOutcome::from_results(&registration, &results)
        .map_err(|err| operation_failed("register", &err))?;

    output::print_json(&outcome)
}
