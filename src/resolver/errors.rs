//! Configuration error types and diagnostics.

use thiserror::Error;

use crate::core::Flavor;
use crate::resolver::platform::PlatformFeature;
use crate::util::diagnostic::Diagnostic;

/// Fatal error during a configuration run.
///
/// None of these are transient; the driver turns any of them into a
/// nonzero exit.
#[derive(Debug, Error)]
pub enum ConfigureError {
    #[error("no acceptable C compiler found: `{command}` could not be run ({reason})")]
    ToolchainUnavailable { command: String, reason: String },

    #[error("could not parse {what} from `{command}`: {output:?}")]
    UnparsableToolchainOutput {
        command: String,
        what: &'static str,
        output: String,
    },

    #[error("compiler {version} does not report the ARM floating-point ABI")]
    AmbiguousAbi { version: String },

    #[error("invalid value `{value}` for {option}; valid values are: {expected}")]
    InvalidOption {
        option: &'static str,
        value: String,
        expected: String,
    },

    #[error("{feature} is not supported on {flavor}")]
    UnsupportedPlatformFeature {
        feature: PlatformFeature,
        flavor: Flavor,
    },
}

impl ConfigureError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigureError::ToolchainUnavailable { command, reason } => {
                Diagnostic::error("no acceptable C compiler found")
                    .with_context(format!("`{}` could not be run: {}", command, reason))
                    .with_suggestion("Make sure a C compiler is installed on your system")
                    .with_suggestion(
                        "Set the CC environment variable if the compiler lives in a non-standard prefix",
                    )
            }

            ConfigureError::UnparsableToolchainOutput {
                command,
                what,
                output,
            } => Diagnostic::error(format!("could not parse {} reported by the compiler", what))
                .with_context(format!("`{}` printed {:?}", command, output))
                .with_suggestion("Point CC at a GCC- or clang-compatible compiler"),

            ConfigureError::AmbiguousAbi { version } => Diagnostic::error(format!(
                "your compiler ({}) does not report the floating-point ABI to compile for your hardware",
                version
            ))
            .with_context("GCC 4.5 may support hard-float without defining __ARM_PCS or __ARM_PCS_VFP")
            .with_suggestion(
                "Specify the floating-point ABI with --with-arm-float-abi=<soft|softfp|hard>",
            ),

            ConfigureError::InvalidOption {
                option,
                value,
                expected,
            } => Diagnostic::error(format!("invalid value `{}` for {}", value, option))
                .with_context(format!("valid values are: {}", expected)),

            ConfigureError::UnsupportedPlatformFeature { feature, flavor } => {
                Diagnostic::error(format!("{} is not supported on {}", feature, flavor))
                    .with_context(format!(
                        "{} is only available on: {}",
                        feature,
                        feature.supported_description()
                    ))
                    .with_suggestion(format!("Remove {}", feature.enable_flag()))
            }
        }
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigureError>;
