use async_trait::async_trait;

use crate::context::SagaContext;

/// Outcome of a step's compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compensation {
    /// The step's effect was undone.
    Undone,
    /// The step has no undo; rollback moves on to the previous step.
    Irreversible,
}

/// A step in a saga that can be executed and compensated.
///
/// Every step of one saga produces the same `Value` type, usually an enum with
/// one variant per step, so results can be collected under the step names and
/// read back by later steps through the [`SagaContext`].
///
/// Step dependencies (service clients, request data) live on the implementing
/// type itself.
#[async_trait]
pub trait SagaStep: Send + Sync {
    /// Result produced by every step of the saga.
    type Value: Send + Sync + 'static;

    /// Error type for step failures.
    type Error: Send + 'static;

    /// Name used as the result key and in log output. Expected to be unique
    /// within one saga; this is not checked.
    fn name(&self) -> &str;

    /// Execute the step.
    ///
    /// `ctx` holds the results of all steps that completed before this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails. The saga stops, rolls back, and
    /// hands this error to its caller.
    async fn execute(&self, ctx: &SagaContext<Self::Value>) -> Result<Self::Value, Self::Error>;

    /// Compensate (undo) the step's effects.
    ///
    /// Called during rollback with the value this step produced. `ctx` holds
    /// the results of the steps that ran before it.
    ///
    /// The default implementation does nothing and reports the step as
    /// irreversible.
    ///
    /// # Errors
    ///
    /// Returns an error if compensation fails. The failure is logged and
    /// rollback continues with the previous step.
    async fn compensate(
        &self,
        ctx: &SagaContext<Self::Value>,
        output: &Self::Value,
    ) -> Result<Compensation, Self::Error> {
        let _ = (ctx, output);
        Ok(Compensation::Irreversible)
    }

    /// Human-readable description of what compensation will do.
    fn compensation_description(&self) -> String {
        format!("undo {}", self.name())
    }
}
