//! The configuration run.

use crate::core::{AbiProfile, Arch, BuildConfiguration, Flavor};
use crate::ops::assemble::{assemble, ResolvedInputs};
use crate::resolver::errors::{ConfigureError, Result};
use crate::resolver::{abi, arch, features, platform};
use crate::toolchain::ToolchainContext;
use crate::util::config::ConfigureOptions;
use crate::util::process::CommandRunner;

/// Resolve the target flavor from `--dest-os` or the host.
pub fn resolve_flavor(dest_os: Option<&str>) -> Result<Flavor> {
    match dest_os {
        None => Ok(Flavor::host()),
        Some(value) => value.parse().map_err(|_| ConfigureError::InvalidOption {
            option: "--dest-os",
            value: value.to_string(),
            expected: Flavor::ALL.map(|f| f.as_str()).join(", "),
        }),
    }
}

/// Run every probe and resolver, then assemble the configuration.
///
/// The first error aborts the run; nothing is retried.
pub fn configure<R: CommandRunner>(
    options: &ConfigureOptions,
    ctx: &ToolchainContext<R>,
) -> Result<BuildConfiguration> {
    let flavor = resolve_flavor(options.dest_os.as_deref())?;
    tracing::info!("configuring for {} with `{}`", flavor, ctx.compiler());

    let host_arch = arch::resolve_host(flavor, ctx)?;
    let target_arch = arch::resolve_target(host_arch, options.dest_cpu.as_deref())?;
    tracing::info!("host arch: {}, target arch: {}", host_arch, target_arch);

    let abi = resolve_abi(target_arch, options, ctx)?;

    let identity = ctx.identity()?;
    tracing::info!("compiler: {}", identity);

    let platform = platform::resolve(flavor, &platform::PlatformRequests::from_options(options))?;
    let toggles = features::resolve_all(ctx.runner(), &options.shared, options.without_ssl);
    let has_winsdk = platform::windows_sdk_available(flavor, ctx.env());
    if flavor.is_windows() && !has_winsdk {
        tracing::info!("ctrpp not found in the Windows SDK, using pre-generated files");
    }

    Ok(assemble(&ResolvedInputs {
        options,
        flavor,
        host_arch,
        target_arch,
        abi,
        identity,
        platform,
        toggles: &toggles,
        has_winsdk,
    }))
}

fn resolve_abi<R: CommandRunner>(
    target_arch: Arch,
    options: &ConfigureOptions,
    ctx: &ToolchainContext<R>,
) -> Result<Option<AbiProfile>> {
    match target_arch {
        Arch::Arm => {
            let arm = abi::resolve_arm(
                ctx.macros()?,
                ctx.identity()?,
                options.arm_float_abi.as_deref(),
            )?;
            Ok(Some(AbiProfile::Arm(arm)))
        }
        arch if arch.is_mips() => {
            let mips = abi::resolve_mips(options.mips_float_abi.as_deref())?;
            Ok(Some(AbiProfile::Mips(mips)))
        }
        _ => Ok(None),
    }
}
