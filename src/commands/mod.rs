//! CLI command implementations.
//!
//! - **run**: load the task configuration and perform one DCE invocation
//! - **init**: write a starter `jsdce.toml`

pub mod init;
pub mod run;

pub use init::init_config;
pub use run::{render_outcome, run_dce, RunConfig};
