//! The wizard controller: intent surface, state ownership, change signals.
//!
//! [`WizardController`] owns the step registry and the single mutable
//! [`WizardState`] of a session. The presentation layer calls the intent
//! handlers in response to user actions and reads [`view_model`] (or the
//! individual accessors) to render; it never mutates state directly.
//!
//! Each intent runs to completion synchronously: the transition is computed
//! as a fresh state, committed as one wholesale replacement, and only then
//! are change signals emitted. Slots therefore always observe fully
//! committed state.
//!
//! # Signals
//!
//! - `active_step_changed(usize)`: Emitted when the active step changes
//! - `step_completed(usize)`: Emitted for each step that becomes completed
//! - `progress_changed(u8)`: Emitted when the progress percentage changes
//! - `sections_changed(Vec<String>)`: Emitted when the expanded sections change
//!
//! `step_completed` only announces completions. Steps un-completed by a
//! frontier reset or [`restart`] get no per-step notification; such
//! transitions emit `progress_changed`, and slots mirroring per-step status
//! should re-read [`view_model`] then.
//!
//! [`restart`]: WizardController::restart
//!
//! # Example
//!
//! ```
//! use stepflow::{StepDescriptor, WizardController};
//!
//! let mut wizard = WizardController::new(vec![
//!     StepDescriptor::new("personal-info", "Personal Information"),
//!     StepDescriptor::new("employment", "Employment Details"),
//!     StepDescriptor::new("review", "Review & Submit"),
//! ])
//! .unwrap();
//!
//! wizard.active_step_changed.connect(|&step| {
//!     println!("Now on step {}", step);
//! });
//!
//! // The user completes the first step.
//! wizard.on_proceed_clicked(0);
//! assert_eq!(wizard.active_step(), 1);
//! assert_eq!(wizard.progress_percentage(), 33);
//! ```
//!
//! [`view_model`]: WizardController::view_model

use stepflow_core::Signal;

use crate::error::FlowResult;
use crate::registry::{StepDescriptor, StepRegistry};
use crate::state::{CompletionPolicy, WizardState};
use crate::view::WizardViewModel;

/// Controller for one multi-step wizard session.
///
/// See the [module documentation](self) for the interaction model.
pub struct WizardController {
    /// The immutable step registry.
    registry: StepRegistry,
    /// The authoritative session state. This controller is the only writer.
    state: WizardState,

    /// Signal emitted when the active step changes.
    pub active_step_changed: Signal<usize>,
    /// Signal emitted for each step index that becomes completed.
    ///
    /// Un-completion (frontier reset, restart) is not announced per step;
    /// re-read [`view_model`](Self::view_model) on `progress_changed`.
    pub step_completed: Signal<usize>,
    /// Signal emitted when the progress percentage changes.
    pub progress_changed: Signal<u8>,
    /// Signal emitted when the set of expanded sections changes.
    pub sections_changed: Signal<Vec<String>>,
}

impl WizardController {
    /// Create a controller over the given steps with the default
    /// [`CompletionPolicy::ResetOnBacktrack`].
    ///
    /// Fails if the step list is empty or contains duplicate ids.
    pub fn new(steps: Vec<StepDescriptor>) -> FlowResult<Self> {
        Self::new_with_policy(steps, CompletionPolicy::default())
    }

    /// Create a controller over the given steps with an explicit
    /// [`CompletionPolicy`].
    ///
    /// The policy is fixed for the lifetime of the session; there is no way
    /// to switch it on a live controller.
    ///
    /// Fails if the step list is empty or contains duplicate ids.
    pub fn new_with_policy(
        steps: Vec<StepDescriptor>,
        policy: CompletionPolicy,
    ) -> FlowResult<Self> {
        let registry = StepRegistry::new(steps)?;
        let state = WizardState::initial(&registry, policy);
        Ok(Self {
            registry,
            state,
            active_step_changed: Signal::new(),
            step_completed: Signal::new(),
            progress_changed: Signal::new(),
            sections_changed: Signal::new(),
        })
    }

    // =========================================================================
    // Read Surface
    // =========================================================================

    /// The step registry this session was built over.
    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// The configured completion policy.
    pub fn policy(&self) -> CompletionPolicy {
        self.state.policy()
    }

    /// The index of the step currently presented for interaction.
    pub fn active_step(&self) -> usize {
        self.state.active_step()
    }

    /// Whether the step at `index` has been completed.
    pub fn is_completed(&self, index: usize) -> bool {
        self.state.is_completed(index)
    }

    /// Whether the step at `index` is clickable/expandable.
    pub fn is_reachable(&self, index: usize) -> bool {
        self.state.is_reachable(index)
    }

    /// Overall progress in `[0, 100]`.
    pub fn progress_percentage(&self) -> u8 {
        self.state.progress_percentage()
    }

    /// The section ids currently expanded, in order.
    pub fn expanded_sections(&self) -> &[String] {
        self.state.expanded_sections()
    }

    /// Derive the presentation-ready view model for the current state.
    pub fn view_model(&self) -> WizardViewModel {
        WizardViewModel::derive(&self.registry, &self.state)
    }

    // =========================================================================
    // Intent Surface
    // =========================================================================

    /// Handle the "proceed" action on the step at `index`.
    ///
    /// Marks the step completed, moves to its successor, and re-targets the
    /// expanded section. A proceed on an unreachable step is absorbed as a
    /// no-op; the presentation layer should have disabled the action, but a
    /// stale render must degrade safely.
    pub fn on_proceed_clicked(&mut self, index: usize) {
        let Some(next) = self.state.advance(index, &self.registry) else {
            tracing::debug!(
                target: "stepflow::controller",
                index,
                "proceed on unreachable step ignored"
            );
            return;
        };
        tracing::debug!(
            target: "stepflow::controller",
            index,
            active_step = next.active_step(),
            progress = next.progress_percentage(),
            "step confirmed"
        );
        self.commit(next);
    }

    /// Handle a click on the step marker (or accordion header) at `index`.
    ///
    /// Moves the active step and the expanded section there if the step is
    /// reachable; clicking a locked step is inert.
    pub fn on_step_clicked(&mut self, index: usize) {
        let Some(next) = self.state.jump_to(index, &self.registry) else {
            tracing::debug!(
                target: "stepflow::controller",
                index,
                "click on locked step ignored"
            );
            return;
        };
        tracing::debug!(target: "stepflow::controller", index, "jumped to step");
        self.commit(next);
    }

    /// Handle the presentation layer requesting a new set of expanded
    /// sections.
    ///
    /// The requested ids are sanitized down to known, reachable steps
    /// before being committed; unknown and unreachable ids are silently
    /// dropped.
    pub fn on_sections_toggled<I, S>(&mut self, requested_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next = self.state.with_expanded_sections(requested_ids, &self.registry);
        self.commit(next);
    }

    /// Reset the session to its initial state: first step active, nothing
    /// completed, exactly the first section expanded.
    pub fn restart(&mut self) {
        tracing::debug!(target: "stepflow::controller", "session restarted");
        let next = WizardState::initial(&self.registry, self.state.policy());
        self.commit(next);
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Replace the session state wholesale and emit change signals.
    ///
    /// The replacement happens before any signal fires, so slots (and any
    /// re-render they trigger) read only committed state.
    fn commit(&mut self, next: WizardState) {
        let previous = std::mem::replace(&mut self.state, next);

        for index in 0..self.state.step_count() {
            if self.state.is_completed(index) && !previous.is_completed(index) {
                self.step_completed.emit(index);
            }
        }
        if self.state.active_step() != previous.active_step() {
            self.active_step_changed.emit(self.state.active_step());
        }
        if self.state.progress_percentage() != previous.progress_percentage() {
            self.progress_changed.emit(self.state.progress_percentage());
        }
        if self.state.expanded_sections() != previous.expanded_sections() {
            self.sections_changed
                .emit(self.state.expanded_sections().to_vec());
        }
    }
}
