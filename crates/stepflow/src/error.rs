//! Error types for the wizard controller.

use thiserror::Error;

/// Result type alias for flow operations.
pub type FlowResult<T> = Result<T, FlowError>;

/// Errors that can occur when constructing or querying a wizard flow.
///
/// Gating violations (proceeding from or jumping to an unreachable step) are
/// deliberately *not* represented here: the presentation layer is expected to
/// prevent them, and the controller absorbs them as no-ops when it does not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// The step registry was constructed with no steps.
    #[error("step registry must contain at least one step")]
    EmptyRegistry,

    /// Two steps in the registry share the same id.
    #[error("duplicate step id '{id}' in registry")]
    DuplicateStepId { id: String },

    /// A step index outside `[0, count - 1]` was passed to the registry.
    #[error("step index {index} out of range for {count} steps")]
    OutOfRange { index: usize, count: usize },
}
