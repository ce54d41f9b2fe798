use indexmap::IndexMap;

use crate::error::ContextError;

/// Results of a successful saga, keyed by step name in execution order.
pub type StepResults<T> = IndexMap<String, T>;

struct CompletedStep<T> {
    index: usize,
    name: String,
    value: T,
}

/// Ordered view of the steps that have completed so far.
///
/// Grows by one entry per successful step during forward execution and
/// shrinks from the back during rollback, so it is always a prefix of the
/// saga's step list.
pub struct SagaContext<T> {
    saga_id: String,
    completed: Vec<CompletedStep<T>>,
}

impl<T> SagaContext<T> {
    pub(crate) fn new(saga_id: String) -> Self {
        Self {
            saga_id,
            completed: Vec::new(),
        }
    }

    /// Identifier of the running saga.
    #[must_use]
    pub fn saga_id(&self) -> &str {
        &self.saga_id
    }

    /// Result of the most recent completed step with this name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.completed
            .iter()
            .rev()
            .find(|step| step.name == name)
            .map(|step| &step.value)
    }

    /// Like [`get`](Self::get), but a missing result is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::MissingResult`] if no step with this name has
    /// completed.
    pub fn require(&self, name: &str) -> Result<&T, ContextError> {
        self.get(name).ok_or_else(|| ContextError::MissingResult {
            step: name.to_string(),
        })
    }

    /// Number of completed steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// Completed steps in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.completed
            .iter()
            .map(|step| (step.name.as_str(), &step.value))
    }

    pub(crate) fn push(&mut self, index: usize, name: &str, value: T) {
        self.completed.push(CompletedStep {
            index,
            name: name.to_string(),
            value,
        });
    }

    pub(crate) fn pop(&mut self) -> Option<(usize, T)> {
        self.completed.pop().map(|step| (step.index, step.value))
    }

    pub(crate) fn into_results(self) -> StepResults<T> {
        self.completed
            .into_iter()
            .map(|step| (step.name, step.value))
            .collect()
    }
}
