//! The completion/position state vector and its transition rules.
//!
//! This module provides [`WizardState`], the authoritative state of a wizard
//! session, together with the gating rules that decide which steps are
//! reachable and how the state changes in response to user intents.
//!
//! Transitions are pure: they take `&self` and return a fresh state (or
//! `None` when a gated intent is absorbed). The controller commits the
//! returned state as one wholesale replacement, so observers never see a
//! partially updated field.
//!
//! # Completion policies
//!
//! Two completion policies exist and must be chosen at construction via
//! [`CompletionPolicy`]; they are never merged:
//!
//! - [`CompletionPolicy::ResetOnBacktrack`] (default): completion is a
//!   contiguous frontier. Proceeding from a step below the frontier resets
//!   the frontier down to that step, discarding completion of every step in
//!   between - downstream answers are no longer trustworthy after an
//!   earlier step is re-confirmed.
//! - [`CompletionPolicy::Monotonic`]: completion is a set that only grows.
//!   Proceeding from any reachable step adds it and never removes prior
//!   completions, even after jumping backward.
//!
//! The policy also drives [`WizardState::progress_percentage`]: under the
//! reset policy the percentage can go back down after a backtrack.

use std::collections::BTreeSet;

use crate::registry::StepRegistry;

// ============================================================================
// StepStatus
// ============================================================================

/// The visual status of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The step has been completed.
    Done,
    /// The step is the active one but not yet completed.
    PartiallyDone,
    /// The step is neither completed nor active.
    Pending,
}

// ============================================================================
// CompletionPolicy
// ============================================================================

/// How completion status behaves when the user backtracks and proceeds again.
///
/// See the [module documentation](self) for the behavioral difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
    /// Contiguous frontier; re-advancing from an earlier step resets the
    /// frontier down to it.
    #[default]
    ResetOnBacktrack,
    /// Completed-step set; advancing only ever adds.
    Monotonic,
}

// ============================================================================
// Completion
// ============================================================================

/// Tagged internal representation of completion, one variant per policy.
///
/// Callers never match on this directly; the policy-agnostic queries
/// (`is_completed`, `frontier`, `count`) are the single source of truth for
/// both gating and progress.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Completion {
    /// Highest completed index; `None` means nothing is completed yet.
    /// Completion is always the contiguous prefix `0..=highest`.
    Frontier(Option<usize>),
    /// Arbitrary set of completed indices.
    Set(BTreeSet<usize>),
}

impl Completion {
    fn new(policy: CompletionPolicy) -> Self {
        match policy {
            CompletionPolicy::ResetOnBacktrack => Self::Frontier(None),
            CompletionPolicy::Monotonic => Self::Set(BTreeSet::new()),
        }
    }

    fn policy(&self) -> CompletionPolicy {
        match self {
            Self::Frontier(_) => CompletionPolicy::ResetOnBacktrack,
            Self::Set(_) => CompletionPolicy::Monotonic,
        }
    }

    fn is_completed(&self, index: usize) -> bool {
        match self {
            Self::Frontier(highest) => highest.is_some_and(|h| index <= h),
            Self::Set(indices) => indices.contains(&index),
        }
    }

    /// The highest completed index, used as the gating frontier.
    ///
    /// The set model is treated as contiguous for gating purposes: its
    /// frontier is the maximum completed index.
    fn frontier(&self) -> Option<usize> {
        match self {
            Self::Frontier(highest) => *highest,
            Self::Set(indices) => indices.last().copied(),
        }
    }

    fn count(&self) -> usize {
        match self {
            Self::Frontier(highest) => highest.map_or(0, |h| h + 1),
            Self::Set(indices) => indices.len(),
        }
    }

    /// Record completion of `from`, applying the active policy.
    ///
    /// `backtracked` is true when the user proceeded from a step strictly
    /// below the completion frontier; only the frontier model reacts to it.
    fn record(&self, from: usize, backtracked: bool) -> Self {
        match self {
            Self::Frontier(highest) => {
                if backtracked {
                    Self::Frontier(Some(from))
                } else {
                    Self::Frontier(Some(highest.map_or(from, |h| h.max(from))))
                }
            }
            Self::Set(indices) => {
                let mut indices = indices.clone();
                indices.insert(from);
                Self::Set(indices)
            }
        }
    }
}

// ============================================================================
// WizardState
// ============================================================================

/// The authoritative state of one wizard session.
///
/// Created once per session via [`WizardState::initial`] with the first step
/// active, nothing completed, and exactly the first section expanded. The
/// state lives for the duration of the flow and is discarded with it; there
/// is no persistence.
///
/// # Invariants
///
/// - `active_step < step_count` always.
/// - The frontier model's completion is a contiguous prefix below
///   `step_count`.
/// - `expanded_sections` only ever contains ids of reachable steps,
///   enforced on every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    /// Number of steps in the flow, fixed at construction. Always `> 0`.
    step_count: usize,
    /// The step currently presented for interaction.
    active_step: usize,
    /// Completion status under the configured policy.
    completion: Completion,
    /// Ordered set of section ids currently open in the accordion view.
    expanded_sections: Vec<String>,
}

impl WizardState {
    /// The initial state for a session over `registry`.
    pub fn initial(registry: &StepRegistry, policy: CompletionPolicy) -> Self {
        Self {
            step_count: registry.count(),
            active_step: 0,
            completion: Completion::new(policy),
            expanded_sections: vec![registry.as_slice()[0].id().to_string()],
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The number of steps in the flow.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// The index of the step currently presented for interaction.
    pub fn active_step(&self) -> usize {
        self.active_step
    }

    /// The completion policy this state was configured with.
    pub fn policy(&self) -> CompletionPolicy {
        self.completion.policy()
    }

    /// Whether the step at `index` has been completed.
    pub fn is_completed(&self, index: usize) -> bool {
        self.completion.is_completed(index)
    }

    /// The number of completed steps.
    pub fn completed_count(&self) -> usize {
        self.completion.count()
    }

    /// The highest completed step index, if any steps are complete.
    pub fn highest_completed(&self) -> Option<usize> {
        self.completion.frontier()
    }

    /// Whether the step at `index` is reachable: eligible for direct
    /// navigation or section expansion.
    ///
    /// A step is reachable iff it is already completed or it is the
    /// immediate successor of the completion frontier. Out-of-range indices
    /// are never reachable.
    pub fn is_reachable(&self, index: usize) -> bool {
        if index >= self.step_count {
            return false;
        }
        match self.completion.frontier() {
            None => index == 0,
            Some(highest) => index <= highest + 1,
        }
    }

    /// The visual status of the step at `index`.
    pub fn status(&self, index: usize) -> StepStatus {
        if self.completion.is_completed(index) {
            StepStatus::Done
        } else if index == self.active_step {
            StepStatus::PartiallyDone
        } else {
            StepStatus::Pending
        }
    }

    /// Overall progress, as a whole percentage in `[0, 100]`.
    ///
    /// Rounded half-up (conventional arithmetic rounding); deterministic
    /// for identical inputs.
    pub fn progress_percentage(&self) -> u8 {
        let ratio = self.completion.count() as f64 / self.step_count as f64;
        (ratio * 100.0).round() as u8
    }

    /// The section ids currently expanded, in order.
    pub fn expanded_sections(&self) -> &[String] {
        &self.expanded_sections
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Proceed from the step at `from`.
    ///
    /// Marks `from` completed under the configured policy and moves the
    /// active step (and the expanded section) to its successor. The terminal
    /// step has no successor: proceeding from it marks it complete and
    /// leaves position and expansion untouched.
    ///
    /// Returns `None` if `from` is not reachable. The presentation layer is
    /// expected to never offer the action on an unreachable step, but a
    /// stale render must not be able to corrupt state.
    #[must_use]
    pub fn advance(&self, from: usize, registry: &StepRegistry) -> Option<WizardState> {
        if !self.is_reachable(from) {
            tracing::trace!(
                target: "stepflow::state",
                from,
                frontier = ?self.completion.frontier(),
                "advance rejected: step not reachable"
            );
            return None;
        }

        // Backtracking is relative to the completion frontier, not the active
        // step: a jump moves the active step without touching completion, so
        // re-confirming after a jump must still trigger the reset.
        let backtracked = self.completion.frontier().is_some_and(|h| from < h);
        let completion = self.completion.record(from, backtracked);

        let (active_step, expanded_sections) = if from + 1 < self.step_count {
            let next = from + 1;
            // In range: next < step_count == registry.count().
            (next, vec![registry.as_slice()[next].id().to_string()])
        } else {
            (self.active_step, self.expanded_sections.clone())
        };

        Some(WizardState {
            step_count: self.step_count,
            active_step,
            completion,
            expanded_sections,
        })
    }

    /// Jump directly to the step at `index` (step marker or accordion
    /// header click).
    ///
    /// Allowed iff the step is reachable; clicking a locked step is inert,
    /// not an error, so unreachable indices yield `None`.
    #[must_use]
    pub fn jump_to(&self, index: usize, registry: &StepRegistry) -> Option<WizardState> {
        if !self.is_reachable(index) {
            tracing::trace!(
                target: "stepflow::state",
                index,
                frontier = ?self.completion.frontier(),
                "jump rejected: step not reachable"
            );
            return None;
        }

        Some(WizardState {
            step_count: self.step_count,
            active_step: index,
            completion: self.completion.clone(),
            expanded_sections: vec![registry.as_slice()[index].id().to_string()],
        })
    }

    /// Replace the expanded sections with a sanitized copy of `requested`.
    ///
    /// This is the one place unvalidated external input enters the state:
    /// the requested ids are filtered down to known, reachable steps before
    /// being committed. Unknown and unreachable ids are silently dropped,
    /// duplicates collapse to their first occurrence, and request order is
    /// preserved. Never fails.
    #[must_use]
    pub fn with_expanded_sections<I, S>(&self, requested: I, registry: &StepRegistry) -> WizardState
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut expanded_sections: Vec<String> = Vec::new();
        for id in requested {
            let id = id.into();
            let reachable = registry
                .index_of(&id)
                .is_some_and(|index| self.is_reachable(index));
            if reachable && !expanded_sections.contains(&id) {
                expanded_sections.push(id);
            } else {
                tracing::trace!(
                    target: "stepflow::state",
                    id = %id,
                    "section id dropped by expansion filter"
                );
            }
        }

        WizardState {
            step_count: self.step_count,
            active_step: self.active_step,
            completion: self.completion.clone(),
            expanded_sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StepDescriptor;

    fn registry() -> StepRegistry {
        StepRegistry::new(vec![
            StepDescriptor::new("a", "Step A"),
            StepDescriptor::new("b", "Step B"),
            StepDescriptor::new("c", "Step C"),
            StepDescriptor::new("d", "Step D"),
        ])
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let registry = registry();
        for policy in [CompletionPolicy::ResetOnBacktrack, CompletionPolicy::Monotonic] {
            let state = WizardState::initial(&registry, policy);
            assert_eq!(state.active_step(), 0);
            assert_eq!(state.completed_count(), 0);
            assert_eq!(state.progress_percentage(), 0);
            assert_eq!(state.expanded_sections(), ["a".to_string()]);
        }
    }

    #[test]
    fn test_advance_moves_to_successor() {
        let registry = registry();
        let state = WizardState::initial(&registry, CompletionPolicy::default());

        let state = state.advance(0, &registry).unwrap();
        assert_eq!(state.active_step(), 1);
        assert!(state.is_completed(0));
        assert_eq!(state.expanded_sections(), ["b".to_string()]);
    }

    #[test]
    fn test_advance_terminal_step_stays_put() {
        let registry = registry();
        let mut state = WizardState::initial(&registry, CompletionPolicy::default());
        for i in 0..3 {
            state = state.advance(i, &registry).unwrap();
        }
        assert_eq!(state.active_step(), 3);

        let state = state.advance(3, &registry).unwrap();
        assert_eq!(state.active_step(), 3);
        assert!(state.is_completed(3));
        assert_eq!(state.expanded_sections(), ["d".to_string()]);
        assert_eq!(state.progress_percentage(), 100);
    }

    #[test]
    fn test_advance_unreachable_is_rejected() {
        let registry = registry();
        let state = WizardState::initial(&registry, CompletionPolicy::default());
        assert!(state.advance(2, &registry).is_none());
        assert!(state.advance(99, &registry).is_none());
    }

    #[test]
    fn test_reachability_frontier() {
        let registry = registry();
        let state = WizardState::initial(&registry, CompletionPolicy::default());

        // Nothing completed: only step 0 is reachable.
        assert!(state.is_reachable(0));
        assert!(!state.is_reachable(1));

        let state = state.advance(0, &registry).unwrap();
        // Frontier at 0: steps 0 and 1 reachable, 2 and beyond locked.
        assert!(state.is_reachable(0));
        assert!(state.is_reachable(1));
        assert!(!state.is_reachable(2));
        assert!(!state.is_reachable(3));
    }

    #[test]
    fn test_jump_to_completed_step() {
        let registry = registry();
        let state = WizardState::initial(&registry, CompletionPolicy::default());
        let state = state.advance(0, &registry).unwrap();

        let state = state.jump_to(0, &registry).unwrap();
        assert_eq!(state.active_step(), 0);
        assert_eq!(state.expanded_sections(), ["a".to_string()]);
        // Completion is untouched by a jump.
        assert!(state.is_completed(0));
    }

    #[test]
    fn test_jump_to_unreachable_is_rejected() {
        let registry = registry();
        let state = WizardState::initial(&registry, CompletionPolicy::default());
        assert!(state.jump_to(2, &registry).is_none());
        assert!(state.jump_to(4, &registry).is_none());
    }

    #[test]
    fn test_reset_on_backtrack_clears_later_completion() {
        let registry = registry();
        let mut state = WizardState::initial(&registry, CompletionPolicy::ResetOnBacktrack);
        state = state.advance(0, &registry).unwrap();
        state = state.advance(1, &registry).unwrap();
        state = state.advance(2, &registry).unwrap();
        assert_eq!(state.completed_count(), 3);
        assert_eq!(state.progress_percentage(), 75);

        // Jump back to step 0 and re-confirm it.
        state = state.jump_to(0, &registry).unwrap();
        state = state.advance(0, &registry).unwrap();

        // Frontier reset down to 0; steps 1 and 2 are no longer completed.
        assert!(state.is_completed(0));
        assert!(!state.is_completed(1));
        assert!(!state.is_completed(2));
        assert_eq!(state.completed_count(), 1);
        assert_eq!(state.progress_percentage(), 25);
        assert_eq!(state.active_step(), 1);
        assert_eq!(state.expanded_sections(), ["b".to_string()]);
    }

    #[test]
    fn test_reset_locks_later_steps_again() {
        let registry = registry();
        let mut state = WizardState::initial(&registry, CompletionPolicy::ResetOnBacktrack);
        state = state.advance(0, &registry).unwrap();
        state = state.advance(1, &registry).unwrap();
        state = state.advance(2, &registry).unwrap();
        assert!(state.is_reachable(3));

        // Navigate back to step 0, then re-confirm it. The jump alone does
        // not touch completion; the re-confirmation resets the frontier even
        // though step 0 is now the active step.
        state = state.jump_to(0, &registry).unwrap();
        assert_eq!(state.completed_count(), 3);
        state = state.advance(0, &registry).unwrap();

        assert_eq!(state.highest_completed(), Some(0));
        assert!(state.is_reachable(1));
        assert!(!state.is_reachable(2));
        assert!(!state.is_reachable(3));
    }

    #[test]
    fn test_monotonic_preserves_completion_on_backtrack() {
        let registry = registry();
        let mut state = WizardState::initial(&registry, CompletionPolicy::Monotonic);
        state = state.advance(0, &registry).unwrap();
        state = state.advance(1, &registry).unwrap();
        state = state.advance(2, &registry).unwrap();

        state = state.jump_to(0, &registry).unwrap();
        state = state.advance(0, &registry).unwrap();

        // Completed set only ever grows.
        assert!(state.is_completed(0));
        assert!(state.is_completed(1));
        assert!(state.is_completed(2));
        assert_eq!(state.completed_count(), 3);
        assert_eq!(state.active_step(), 1);
    }

    #[test]
    fn test_monotonic_completed_count_non_decreasing() {
        let registry = registry();
        let mut state = WizardState::initial(&registry, CompletionPolicy::Monotonic);
        let mut last_count = state.completed_count();

        // An arbitrary valid intent sequence with backtracking mixed in.
        for &from in &[0usize, 1, 0, 1, 2, 0, 3] {
            if let Some(next) = state.advance(from, &registry) {
                state = next;
            }
            assert!(state.completed_count() >= last_count);
            last_count = state.completed_count();
        }
    }

    #[test]
    fn test_progress_percentages_for_four_steps() {
        let registry = registry();
        let mut state = WizardState::initial(&registry, CompletionPolicy::default());
        assert_eq!(state.progress_percentage(), 0);

        state = state.advance(0, &registry).unwrap();
        assert_eq!(state.progress_percentage(), 25);

        state = state.advance(1, &registry).unwrap();
        assert_eq!(state.progress_percentage(), 50);

        state = state.advance(2, &registry).unwrap();
        state = state.advance(3, &registry).unwrap();
        assert_eq!(state.progress_percentage(), 100);
    }

    #[test]
    fn test_progress_rounding_half_up() {
        let registry = StepRegistry::new(
            (0..8)
                .map(|i| StepDescriptor::new(format!("s{i}"), format!("Step {i}")))
                .collect(),
        )
        .unwrap();
        let state = WizardState::initial(&registry, CompletionPolicy::default());
        // 1/8 = 12.5% rounds half-up to 13.
        let state = state.advance(0, &registry).unwrap();
        assert_eq!(state.progress_percentage(), 13);
    }

    #[test]
    fn test_status_reporting() {
        let registry = registry();
        let state = WizardState::initial(&registry, CompletionPolicy::default());
        assert_eq!(state.status(0), StepStatus::PartiallyDone);
        assert_eq!(state.status(1), StepStatus::Pending);

        let state = state.advance(0, &registry).unwrap();
        assert_eq!(state.status(0), StepStatus::Done);
        assert_eq!(state.status(1), StepStatus::PartiallyDone);
        assert_eq!(state.status(2), StepStatus::Pending);
    }

    #[test]
    fn test_expansion_filter_drops_unreachable_and_unknown() {
        let registry = registry();
        let state = WizardState::initial(&registry, CompletionPolicy::default());
        let state = state.advance(0, &registry).unwrap();

        // "a" and "b" are reachable; "c" is locked; "nope" is unknown.
        let state = state.with_expanded_sections(["b", "c", "nope", "a", "b"], &registry);
        assert_eq!(state.expanded_sections(), ["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_expansion_filter_allows_collapse_all() {
        let registry = registry();
        let state = WizardState::initial(&registry, CompletionPolicy::default());
        let state = state.with_expanded_sections(Vec::<String>::new(), &registry);
        assert!(state.expanded_sections().is_empty());
    }

    #[test]
    fn test_scenario_from_both_policies() {
        // steps = [A,B,C,D]; advance(0), jumpTo(0), advance(0) is identical
        // under both policies: there is nothing beyond the frontier to clear.
        let registry = registry();
        for policy in [CompletionPolicy::ResetOnBacktrack, CompletionPolicy::Monotonic] {
            let mut state = WizardState::initial(&registry, policy);
            state = state.advance(0, &registry).unwrap();
            assert_eq!(state.active_step(), 1);
            assert!(state.is_completed(0));

            state = state.jump_to(0, &registry).unwrap();
            assert_eq!(state.active_step(), 0);

            state = state.advance(0, &registry).unwrap();
            assert_eq!(state.active_step(), 1);
            assert!(state.is_completed(0));
            assert_eq!(state.completed_count(), 1);
        }
    }
}
