//! Logging facilities for Stepflow.
//!
//! Stepflow uses the `tracing` crate for structured instrumentation. To see
//! logs, install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! State transitions log at `debug` level, rejected intents and signal
//! emission at `trace`. Use the constants in [`targets`] to filter by
//! subsystem, e.g. `RUST_LOG=stepflow::controller=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "stepflow_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "stepflow_core::signal";
    /// Wizard controller target (intent handling, commits).
    pub const CONTROLLER: &str = "stepflow::controller";
    /// State transition target (gating decisions).
    pub const STATE: &str = "stepflow::state";
}
