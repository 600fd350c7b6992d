//! Command handlers behind the `waymem` binary.
//!
//! Each handler takes the loaded [`AppContext`] and its parsed arguments and
//! returns a summary; `main` maps errors to exit codes.

pub mod commands;
pub mod context;
pub mod error;

pub use context::AppContext;
pub use error::{exit_code_for_error, is_missing_input, CliExitCode};
