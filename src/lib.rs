//! confsynth - pre-build configuration synthesizer
//!
//! This crate probes the C compiler, resolves architecture, ABI and
//! optional-library decisions, and assembles them into one build
//! configuration document for a gyp-style build-file generator.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod toolchain;
pub mod util;

/// Test utilities and mocks for confsynth unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides a scripted command runner and canned compiler output.
#[cfg(test)]
pub mod test_support;

pub use core::{BuildConfiguration, Value};
pub use ops::configure;
pub use resolver::{ConfigureError, Result};
pub use toolchain::ToolchainContext;
pub use util::config::ConfigureOptions;
