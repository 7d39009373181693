//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod process;

pub use config::ConfigureOptions;
pub use diagnostic::Diagnostic;
pub use process::{CapturedOutput, CommandRunner, ProcessBuilder, SystemRunner};
