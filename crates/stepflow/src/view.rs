//! Presentation-ready view model derivation.
//!
//! A [`WizardViewModel`] is a pure function of the step registry and the
//! current [`WizardState`]: one [`StepView`] per step plus the scalar
//! progress percentage. Deriving it has no side effects and can be repeated
//! at will; re-renders are plain reads of the latest committed state.

use crate::registry::StepRegistry;
use crate::state::{StepStatus, WizardState};

/// What the presentation layer needs to render one step marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    /// The step's display label.
    pub label: String,
    /// The step's visual status.
    pub status: StepStatus,
    /// Whether the step marker should be rendered non-clickable.
    /// `true` exactly when the step is not reachable.
    pub disabled: bool,
}

/// The full derived view of a wizard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardViewModel {
    /// One entry per step, in flow order.
    pub steps: Vec<StepView>,
    /// Overall progress in `[0, 100]`.
    pub progress_percentage: u8,
}

impl WizardViewModel {
    /// Derive the view model for `state` over `registry`.
    pub fn derive(registry: &StepRegistry, state: &WizardState) -> Self {
        let steps = registry
            .iter()
            .enumerate()
            .map(|(index, descriptor)| StepView {
                label: descriptor.label().to_string(),
                status: state.status(index),
                disabled: !state.is_reachable(index),
            })
            .collect();

        Self {
            steps,
            progress_percentage: state.progress_percentage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StepDescriptor;
    use crate::state::CompletionPolicy;

    fn registry() -> StepRegistry {
        StepRegistry::new(vec![
            StepDescriptor::new("a", "Step A"),
            StepDescriptor::new("b", "Step B"),
            StepDescriptor::new("c", "Step C"),
        ])
        .unwrap()
    }

    #[test]
    fn test_initial_view_model() {
        let registry = registry();
        let state = WizardState::initial(&registry, CompletionPolicy::default());
        let view = WizardViewModel::derive(&registry, &state);

        assert_eq!(view.progress_percentage, 0);
        assert_eq!(view.steps.len(), 3);
        assert_eq!(view.steps[0].label, "Step A");
        assert_eq!(view.steps[0].status, StepStatus::PartiallyDone);
        assert!(!view.steps[0].disabled);
        assert_eq!(view.steps[1].status, StepStatus::Pending);
        assert!(view.steps[1].disabled);
        assert!(view.steps[2].disabled);
    }

    #[test]
    fn test_view_model_after_advance() {
        let registry = registry();
        let state = WizardState::initial(&registry, CompletionPolicy::default());
        let state = state.advance(0, &registry).unwrap();
        let view = WizardViewModel::derive(&registry, &state);

        assert_eq!(view.steps[0].status, StepStatus::Done);
        assert_eq!(view.steps[1].status, StepStatus::PartiallyDone);
        assert!(!view.steps[1].disabled);
        assert!(view.steps[2].disabled);
        assert_eq!(view.progress_percentage, 33);
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let registry = registry();
        let state = WizardState::initial(&registry, CompletionPolicy::default());
        let first = WizardViewModel::derive(&registry, &state);
        let second = WizardViewModel::derive(&registry, &state);
        assert_eq!(first, second);
    }
}
