use thiserror::Error;

/// Error raised when a step looks up a prior result that is not there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ContextError {
    /// No completed step with this name exists in the saga context.
    #[error("no result recorded for step '{step}'")]
    MissingResult {
        /// Name of the step that was looked up.
        step: String,
    },

    /// A result exists, but it is not the kind the caller expected.
    #[error("step '{step}' produced an unexpected result, expected {expected}")]
    UnexpectedResult {
        /// Name of the step that was looked up.
        step: String,
        /// Description of the expected result kind.
        expected: &'static str,
    },
}

/// Record of a compensation that failed during rollback.
///
/// These are collected in the audit log and logged; they are never returned
/// in place of the step error that triggered the rollback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("compensation failed for step '{step}': {message}")]
pub struct CompensationFailure {
    /// Name of the step whose compensation failed.
    pub step: String,
    /// Description of what the compensation was trying to do.
    pub description: String,
    /// Rendered error from the compensation.
    pub message: String,
}
