//! Drives a four-step enrollment flow from the command line, printing the
//! derived view model after each intent.
//!
//! Run with logging to watch the controller's decisions:
//!
//! ```sh
//! RUST_LOG=stepflow=debug cargo run --example enrollment
//! ```

use stepflow::{StepDescriptor, StepStatus, WizardController};

fn print_view(wizard: &WizardController) {
    let view = wizard.view_model();
    println!("progress: {}%", view.progress_percentage);
    for (index, step) in view.steps.iter().enumerate() {
        let marker = match step.status {
            StepStatus::Done => "[x]",
            StepStatus::PartiallyDone => "[>]",
            StepStatus::Pending => "[ ]",
        };
        let lock = if step.disabled { " (locked)" } else { "" };
        println!("  {} {} {}{}", marker, index + 1, step.label, lock);
    }
    println!("  expanded: {:?}\n", wizard.expanded_sections());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stepflow=debug".into()),
        )
        .init();

    let mut wizard = WizardController::new(vec![
        StepDescriptor::new("personal-info", "Personal Information"),
        StepDescriptor::new("employment", "Employment Details"),
        StepDescriptor::new("financial", "Financial Information"),
        StepDescriptor::new("review", "Review & Submit"),
    ])?;

    wizard.active_step_changed.connect(|&step| {
        println!("-> active step is now {}", step + 1);
    });
    wizard.progress_changed.connect(|&pct| {
        println!("-> progress: {pct}%");
    });

    println!("initial state:");
    print_view(&wizard);

    println!("proceeding through the first two steps:");
    wizard.on_proceed_clicked(0);
    wizard.on_proceed_clicked(1);
    print_view(&wizard);

    println!("jumping back to step 1 (reachable because completed):");
    wizard.on_step_clicked(0);
    print_view(&wizard);

    println!("re-confirming step 1 resets the frontier (default policy):");
    wizard.on_proceed_clicked(0);
    print_view(&wizard);

    println!("a click on the locked review step is inert:");
    wizard.on_step_clicked(3);
    print_view(&wizard);

    Ok(())
}
