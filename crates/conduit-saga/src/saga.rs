use std::fmt::Display;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::audit::SagaAuditLog;
use crate::context::{SagaContext, StepResults};
use crate::error::CompensationFailure;
use crate::step::{Compensation, SagaStep};

type BoxedStep<T, E> = Box<dyn SagaStep<Value = T, Error = E>>;

/// A saga ready for execution.
///
/// Steps run one at a time in the order they were added. If any step fails,
/// previously completed steps are compensated in reverse order (LIFO) and the
/// failing step's error is returned as is.
///
/// A saga is built once per business operation and consumed by
/// [`execute`](Self::execute), so steps cannot be added once it has started.
pub struct Saga<T, E> {
    id: String,
    steps: Vec<BoxedStep<T, E>>,
}

impl<T, E> Saga<T, E>
where
    T: Send + Sync + 'static,
    E: Display + Send + 'static,
{
    /// Create an empty saga with a generated `saga_<millis>` identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(format!("saga_{}", Utc::now().timestamp_millis()))
    }

    /// Create an empty saga with the given identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Names of the registered steps, in execution order.
    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.name())
    }

    /// Append a step. Step names are not checked for uniqueness.
    pub fn add_step<S>(&mut self, step: S)
    where
        S: SagaStep<Value = T, Error = E> + 'static,
    {
        self.steps.push(Box::new(step));
    }

    /// Execute the saga, returning every step's result on success.
    ///
    /// On failure, compensates all previously completed steps in reverse order.
    ///
    /// # Errors
    ///
    /// Returns the error of the first step that failed, after rollback.
    pub async fn execute(self) -> Result<StepResults<T>, E> {
        let (result, _audit_log) = self.run().await;
        result
    }

    /// Execute the saga and return both the result and an audit log.
    ///
    /// The audit log tracks all step executions and compensations, including
    /// compensation failures that are otherwise only logged.
    pub async fn execute_with_audit(self) -> (Result<StepResults<T>, E>, SagaAuditLog) {
        self.run().await
    }

    async fn run(self) -> (Result<StepResults<T>, E>, SagaAuditLog) {
        let mut audit_log = SagaAuditLog::new();
        let mut ctx = SagaContext::new(self.id.clone());

        info!(saga = %self.id, steps = self.steps.len(), "starting saga");

        for (index, step) in self.steps.iter().enumerate() {
            let name = step.name();
            debug!(saga = %self.id, step = name, position = index + 1, "executing step");
            audit_log.record_start(name);

            match step.execute(&ctx).await {
                Ok(value) => {
                    audit_log.record_success(step.compensation_description());
                    ctx.push(index, name, value);
                    debug!(saga = %self.id, step = name, "step completed");
                }
                Err(err) => {
                    audit_log.record_failure();
                    warn!(saga = %self.id, step = name, error = %err, "saga failed, rolling back");
                    self.rollback(ctx, &mut audit_log).await;
                    return (Err(err), audit_log);
                }
            }
        }

        info!(saga = %self.id, "saga completed");
        (Ok(ctx.into_results()), audit_log)
    }

    async fn rollback(&self, mut ctx: SagaContext<T>, audit_log: &mut SagaAuditLog) {
        debug!(saga = %self.id, completed = ctx.len(), "starting rollback");

        while let Some((index, output)) = ctx.pop() {
            let step = &self.steps[index];
            let name = step.name();

            match step.compensate(&ctx, &output).await {
                Ok(Compensation::Undone) => {
                    debug!(saga = %self.id, step = name, "step compensated");
                    audit_log.record_compensated(index);
                }
                Ok(Compensation::Irreversible) => {
                    debug!(saga = %self.id, step = name, "nothing to undo");
                    audit_log.record_irreversible(index);
                }
                Err(err) => {
                    error!(saga = %self.id, step = name, error = %err, "compensation failed");
                    audit_log.record_compensation_failed(
                        index,
                        CompensationFailure {
                            step: name.to_string(),
                            description: step.compensation_description(),
                            message: err.to_string(),
                        },
                    );
                }
            }
        }

        debug!(saga = %self.id, "rollback finished");
    }
}

impl<T, E> Default for Saga<T, E>
where
    T: Send + Sync + 'static,
    E: Display + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
