//! Observability for DCE invocations.
//!
//! - **Logging**: `tracing` subscriber setup for the binary
//! - **Context Tracking**: thread-local invocation phase and current archive
//! - **Panic Hook**: crash reports naming the phase that panicked
//!
//! ```ignore
//! use jsdce::observability::{init_logging, install_panic_hook};
//!
//! fn main() {
//!     init_logging(1);
//!     install_panic_hook();
//! }
//! ```

pub mod context;
pub mod logging;
pub mod panic_hook;

pub use context::{
    get_current_context, reset_context, set_current_archive, set_phase_persistent, ContextGuard,
    DcePhase, InvocationContext,
};
pub use logging::init_logging;
pub use panic_hook::install_panic_hook;
