use std::fmt::Display;

use crate::saga::Saga;
use crate::step::SagaStep;

/// Builder for sagas assembled in one expression.
///
/// ```
/// use async_trait::async_trait;
/// use conduit_saga::{SagaBuilder, SagaContext, SagaStep};
///
/// struct Constant(&'static str, i32);
///
/// #[async_trait]
/// impl SagaStep for Constant {
///     type Value = i32;
///     type Error = String;
///     fn name(&self) -> &str { self.0 }
///     async fn execute(&self, _: &SagaContext<i32>) -> Result<i32, String> {
///         Ok(self.1)
///     }
/// }
///
/// let saga = SagaBuilder::with_id("saga_doc")
///     .step(Constant("a", 1))
///     .step(Constant("b", 2))
///     .build();
///
/// assert_eq!(saga.step_names().collect::<Vec<_>>(), vec!["a", "b"]);
/// ```
pub struct SagaBuilder<T, E> {
    saga: Saga<T, E>,
}

impl<T, E> SagaBuilder<T, E>
where
    T: Send + Sync + 'static,
    E: Display + Send + 'static,
{
    /// Start a builder for a saga with a generated identifier.
    #[must_use]
    pub fn new() -> Self {
        Self { saga: Saga::new() }
    }

    /// Start a builder for a saga with the given identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            saga: Saga::with_id(id),
        }
    }

    /// Append a step.
    #[must_use]
    pub fn step<S>(mut self, step: S) -> Self
    where
        S: SagaStep<Value = T, Error = E> + 'static,
    {
        self.saga.add_step(step);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Saga<T, E> {
        self.saga
    }
}

impl<T, E> Default for SagaBuilder<T, E>
where
    T: Send + Sync + 'static,
    E: Display + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
