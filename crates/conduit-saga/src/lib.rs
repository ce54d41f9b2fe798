//! Saga orchestration for multi-step writes across services.
//!
//! A [`Saga`] runs its steps strictly in registration order. Each step sees the
//! results of the steps before it through a [`SagaContext`]. When a step fails,
//! the steps that already completed are compensated in reverse order and the
//! original step error is returned unchanged to the caller.

mod audit;
mod builder;
mod context;
mod error;
mod saga;
mod step;

pub use audit::{SagaAuditLog, StepRecord, StepStatus};
pub use builder::SagaBuilder;
pub use context::{SagaContext, StepResults};
pub use error::{CompensationFailure, ContextError};
pub use saga::Saga;
pub use step::{Compensation, SagaStep};
