//! Core data types shared by the probes, resolvers and the assembler.

pub mod abi;
pub mod arch;
pub mod compiler;
pub mod configuration;
pub mod feature;

pub use abi::{AbiProfile, ArmAbi, Fpu, MipsAbi};
pub use arch::{Arch, Flavor};
pub use compiler::{CompilerIdentity, CompilerMacroSet, CompilerVersion};
pub use configuration::{BuildConfiguration, BuildType, Value, Variables};
pub use feature::{FeatureToggle, Subsystem};
