//! Stepflow: a headless multi-step wizard controller.
//!
//! Stepflow governs which step of a linear form flow is active, which steps
//! count as completed, and which collapsible sections may be open, in sync
//! with a progress indicator. It is purely an in-memory UI state contract:
//! the presentation layer (stepper, progress bar, accordion) renders the
//! derived view model and calls intents back into the controller on user
//! actions. Form content, validation, and persistence are out of scope.
//!
//! # Components
//!
//! - [`StepRegistry`] / [`StepDescriptor`]: the immutable, ordered step list
//! - [`WizardState`]: the state vector and its gated transitions
//! - [`WizardViewModel`]: the presentation-ready derived view
//! - [`WizardController`]: state ownership, intent handlers, change signals
//!
//! # Example
//!
//! ```
//! use stepflow::{StepDescriptor, StepStatus, WizardController};
//!
//! let mut wizard = WizardController::new(vec![
//!     StepDescriptor::new("personal-info", "Personal Information"),
//!     StepDescriptor::new("employment", "Employment Details"),
//!     StepDescriptor::new("financial", "Financial Information"),
//!     StepDescriptor::new("review", "Review & Submit"),
//! ])
//! .unwrap();
//!
//! // The user fills in the first step and clicks "Proceed".
//! wizard.on_proceed_clicked(0);
//!
//! let view = wizard.view_model();
//! assert_eq!(view.progress_percentage, 25);
//! assert_eq!(view.steps[0].status, StepStatus::Done);
//! assert_eq!(view.steps[1].status, StepStatus::PartiallyDone);
//! assert!(view.steps[2].disabled); // locked until its turn
//! ```
//!
//! # Completion policies
//!
//! What happens when the user jumps backward and proceeds again is a
//! configuration choice, not a fixed behavior: see
//! [`CompletionPolicy`](crate::state::CompletionPolicy).

pub mod controller;
pub mod error;
pub mod registry;
pub mod state;
pub mod view;

pub use controller::WizardController;
pub use error::{FlowError, FlowResult};
pub use registry::{StepDescriptor, StepRegistry};
pub use state::{CompletionPolicy, StepStatus, WizardState};
pub use view::{StepView, WizardViewModel};

// Re-export the signal types appearing in the controller's public surface.
pub use stepflow_core::{ConnectionGuard, ConnectionId, Signal};
