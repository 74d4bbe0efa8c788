//! The immutable, ordered step registry.
//!
//! This module provides [`StepDescriptor`] and [`StepRegistry`], the static
//! configuration a wizard session is built from. The registry is supplied
//! once at construction and is read-only for the lifetime of the session;
//! its ordering defines the flow order.

use crate::error::{FlowError, FlowResult};

/// A single step of the flow: a stable id plus a display label.
///
/// Descriptors are immutable after construction. The id identifies the step
/// across the intent surface (accordion section ids are step ids); the label
/// is presentation text passed through to the view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    id: String,
    label: String,
}

impl StepDescriptor {
    /// Create a new step descriptor.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Get the step id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the display label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The ordered list of steps in a wizard flow.
///
/// # Example
///
/// ```
/// use stepflow::{StepDescriptor, StepRegistry};
///
/// let registry = StepRegistry::new(vec![
///     StepDescriptor::new("personal-info", "Personal Information"),
///     StepDescriptor::new("review", "Review & Submit"),
/// ])
/// .unwrap();
///
/// assert_eq!(registry.count(), 2);
/// assert_eq!(registry.index_of("review"), Some(1));
/// assert_eq!(registry.index_of("unknown"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRegistry {
    steps: Vec<StepDescriptor>,
}

impl StepRegistry {
    /// Create a registry from an ordered list of descriptors.
    ///
    /// Fails with [`FlowError::EmptyRegistry`] if `steps` is empty and with
    /// [`FlowError::DuplicateStepId`] if two steps share an id. These are
    /// the only construction-time invariants; everything else about a flow
    /// is derived from the descriptor order.
    pub fn new(steps: Vec<StepDescriptor>) -> FlowResult<Self> {
        if steps.is_empty() {
            return Err(FlowError::EmptyRegistry);
        }
        for (i, step) in steps.iter().enumerate() {
            if steps[..i].iter().any(|earlier| earlier.id == step.id) {
                return Err(FlowError::DuplicateStepId {
                    id: step.id.clone(),
                });
            }
        }
        Ok(Self { steps })
    }

    /// Get the number of steps. Always `> 0`.
    pub fn count(&self) -> usize {
        self.steps.len()
    }

    /// Get the descriptor at `index`.
    ///
    /// Fails with [`FlowError::OutOfRange`] for indices outside
    /// `[0, count - 1]`. An out-of-range index here is a programming error
    /// in the caller, not user input.
    pub fn at(&self, index: usize) -> FlowResult<&StepDescriptor> {
        self.steps.get(index).ok_or(FlowError::OutOfRange {
            index,
            count: self.steps.len(),
        })
    }

    /// Find the index of the step with the given id.
    ///
    /// Returns `None` for unknown ids. Ids may come from loosely-typed
    /// external input (accordion section ids), so an unknown id is a soft
    /// failure rather than an error.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    /// Iterate over the descriptors in flow order.
    pub fn iter(&self) -> impl Iterator<Item = &StepDescriptor> {
        self.steps.iter()
    }

    /// The descriptors as a slice, in flow order.
    pub(crate) fn as_slice(&self) -> &[StepDescriptor] {
        &self.steps
    }
}
