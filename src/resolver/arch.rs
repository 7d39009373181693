//! Host and target architecture resolution.

use crate::core::{Arch, CompilerMacroSet, Flavor};
use crate::resolver::errors::{ConfigureError, Result};
use crate::toolchain::{EnvSnapshot, ToolchainContext};
use crate::util::process::CommandRunner;

/// Compiler macros checked in order; the first one defined to a non-zero
/// value decides the host architecture.
///
/// `__i386__` maps to x64, matching what existing build files expect.
const HOST_ARCH_MACROS: [(&str, Arch); 4] = [
    ("__x86_64__", Arch::X64),
    ("__i386__", Arch::X64),
    ("__arm__", Arch::Arm),
    ("__mips__", Arch::Mips),
];

/// Architecture used when no known macro is set.
const DEFAULT_MACRO_ARCH: Arch = Arch::Ia32;

/// `PROCESSOR_ARCHITECTURE` values on Windows hosts.
///
/// NOTE: `x86` maps to x64. This looks like a transcription slip for ia32
/// but is kept so existing Windows builds resolve the same way.
const WINDOWS_ARCH_TABLE: [(&str, Arch); 4] = [
    ("AMD64", Arch::X64),
    ("x86", Arch::X64),
    ("arm", Arch::Arm),
    ("mips", Arch::Mips),
];

/// Architecture used for unknown or missing `PROCESSOR_ARCHITECTURE`.
const DEFAULT_WINDOWS_ARCH: Arch = Arch::X64;

/// Derive the host architecture from predefined compiler macros.
pub fn host_arch_from_macros(macros: &CompilerMacroSet) -> Arch {
    HOST_ARCH_MACROS
        .iter()
        .find(|(name, _)| macros.is_enabled(name))
        .map(|(_, arch)| *arch)
        .unwrap_or(DEFAULT_MACRO_ARCH)
}

/// Derive the host architecture from `PROCESSOR_ARCHITECTURE`.
pub fn host_arch_from_env(env: &EnvSnapshot) -> Arch {
    let value = env.get("PROCESSOR_ARCHITECTURE").unwrap_or("x86");
    tracing::debug!("found arch: {}", value);

    WINDOWS_ARCH_TABLE
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, arch)| *arch)
        .unwrap_or(DEFAULT_WINDOWS_ARCH)
}

/// Resolve the host architecture.
///
/// Windows flavors read the environment and never probe the compiler;
/// everything else asks the compiler for its macros.
pub fn resolve_host<R: CommandRunner>(flavor: Flavor, ctx: &ToolchainContext<R>) -> Result<Arch> {
    if flavor.is_windows() {
        Ok(host_arch_from_env(ctx.env()))
    } else {
        Ok(host_arch_from_macros(ctx.macros()?))
    }
}

/// Resolve the target architecture from an explicit override or the host.
pub fn resolve_target(host: Arch, dest_cpu: Option<&str>) -> Result<Arch> {
    match dest_cpu {
        None => Ok(host),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigureError::InvalidOption {
                option: "--dest-cpu",
                value: value.to_string(),
                expected: Arch::ALL.map(|a| a.as_str()).join(", "),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixtures, MockExecutor, MockProcessOutput};
    use crate::toolchain::CompilerCommand;
    use crate::toolchain::macros::parse_macro_dump;

    fn macros(pairs: &[(&str, &str)]) -> CompilerMacroSet {
        CompilerMacroSet::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_host_arch_from_macros() {
        assert_eq!(host_arch_from_macros(&parse_macro_dump(fixtures::LINUX_X64_MACROS)), Arch::X64);
        assert_eq!(host_arch_from_macros(&parse_macro_dump(fixtures::ARMV7_HARD_MACROS)), Arch::Arm);
        assert_eq!(host_arch_from_macros(&parse_macro_dump(fixtures::MIPSEL_MACROS)), Arch::Mips);
        assert_eq!(host_arch_from_macros(&macros(&[("__i386__", "1")])), Arch::X64);
        assert_eq!(host_arch_from_macros(&CompilerMacroSet::default()), Arch::Ia32);
    }

    #[test]
    fn test_zero_valued_macro_is_ignored() {
        let set = macros(&[("__x86_64__", "0"), ("__arm__", "1")]);
        assert_eq!(host_arch_from_macros(&set), Arch::Arm);

        let set = macros(&[("__x86_64__", "0")]);
        assert_eq!(host_arch_from_macros(&set), Arch::Ia32);
    }

    #[test]
    fn test_table_order_decides_between_multiple_macros() {
        let set = macros(&[("__mips__", "1"), ("__arm__", "1"), ("__x86_64__", "1")]);
        assert_eq!(host_arch_from_macros(&set), Arch::X64);

        let set = macros(&[("__mips__", "1"), ("__arm__", "1")]);
        assert_eq!(host_arch_from_macros(&set), Arch::Arm);
    }

    #[test]
    fn test_host_resolution_is_idempotent() {
        let set = parse_macro_dump(fixtures::ARMV7_HARD_MACROS);
        assert_eq!(host_arch_from_macros(&set), host_arch_from_macros(&set));
    }

    #[test]
    fn test_host_arch_from_env() {
        let env = |v: &str| EnvSnapshot::from_pairs([("PROCESSOR_ARCHITECTURE", v)]);

        assert_eq!(host_arch_from_env(&env("AMD64")), Arch::X64);
        assert_eq!(host_arch_from_env(&env("x86")), Arch::X64);
        assert_eq!(host_arch_from_env(&env("arm")), Arch::Arm);
        assert_eq!(host_arch_from_env(&env("mips")), Arch::Mips);
        assert_eq!(host_arch_from_env(&env("IA64")), Arch::X64);
        assert_eq!(host_arch_from_env(&EnvSnapshot::default()), Arch::X64);
    }

    #[test]
    fn test_resolve_host_on_windows_skips_compiler() {
        let ctx = ToolchainContext::new(
            CompilerCommand::parse("cl").unwrap(),
            EnvSnapshot::from_pairs([("PROCESSOR_ARCHITECTURE", "arm")]),
            MockExecutor::new(),
        );

        assert_eq!(resolve_host(Flavor::Win, &ctx).unwrap(), Arch::Arm);
        assert!(ctx.runner().calls().is_empty());
    }

    #[test]
    fn test_resolve_host_probes_compiler_elsewhere() {
        let mut exec = MockExecutor::new();
        exec.expect("cc -dM -E -", MockProcessOutput::success(fixtures::LINUX_X64_MACROS));
        let ctx = ToolchainContext::new(
            CompilerCommand::parse("cc").unwrap(),
            EnvSnapshot::from_pairs([("PROCESSOR_ARCHITECTURE", "arm")]),
            exec,
        );

        assert_eq!(resolve_host(Flavor::Linux, &ctx).unwrap(), Arch::X64);
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target(Arch::X64, None).unwrap(), Arch::X64);
        assert_eq!(resolve_target(Arch::X64, Some("arm")).unwrap(), Arch::Arm);
        assert_eq!(resolve_target(Arch::Arm, Some("mipsel")).unwrap(), Arch::Mipsel);
    }

    #[test]
    fn test_resolve_target_rejects_unknown_cpu() {
        let err = resolve_target(Arch::X64, Some("sparc")).unwrap_err();
        match err {
            ConfigureError::InvalidOption { option, value, expected } => {
                assert_eq!(option, "--dest-cpu");
                assert_eq!(value, "sparc");
                assert_eq!(expected, "ia32, x64, arm, mips, mipsel");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
