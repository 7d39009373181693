//! Merge resolved decisions into a [`BuildConfiguration`].
//!
//! Assembly is pure: every probe and every failure has happened by the
//! time [`assemble`] runs. Variables are inserted in a fixed order (node,
//! architecture, ABI, compiler, platform, then each subsystem, then the
//! Windows SDK) so that printed output diffs cleanly between runs.

use crate::core::{
    AbiProfile, Arch, BuildConfiguration, BuildType, CompilerIdentity, FeatureToggle, Flavor,
    Subsystem, Value,
};
use crate::resolver::platform::{PlatformFeature, PlatformFeatures};
use crate::util::config::{expand_home, ConfigureOptions};

/// Everything the assembler needs, already resolved.
#[derive(Debug, Clone)]
pub struct ResolvedInputs<'a> {
    pub options: &'a ConfigureOptions,
    pub flavor: Flavor,
    pub host_arch: Arch,
    pub target_arch: Arch,
    pub abi: Option<AbiProfile>,
    pub identity: &'a CompilerIdentity,
    pub platform: PlatformFeatures,
    /// One toggle per subsystem, in [`Subsystem::ALL`] order.
    pub toggles: &'a [FeatureToggle],
    pub has_winsdk: bool,
}

/// Build the configuration document.
pub fn assemble(inputs: &ResolvedInputs<'_>) -> BuildConfiguration {
    let options = inputs.options;
    let mut config = BuildConfiguration {
        build_type: if options.debug {
            BuildType::Debug
        } else {
            BuildType::Release
        },
        ..BuildConfiguration::default()
    };

    assemble_general(&mut config, options);
    assemble_arch(&mut config, inputs);
    assemble_compiler(&mut config, inputs.identity);
    assemble_platform(&mut config, inputs);

    for toggle in inputs.toggles {
        assemble_toggle(&mut config, toggle, options);
    }

    if inputs.has_winsdk {
        config.variables.insert("node_has_winsdk", Value::flag(true));
    }

    config
}

fn assemble_general(config: &mut BuildConfiguration, options: &ConfigureOptions) {
    let vars = &mut config.variables;

    if let Some(ref subsystem) = options.subsystem {
        vars.insert("win_subsystem", Value::str(subsystem));
    }
    vars.insert("v8_enable_gdbjit", Value::int_flag(options.gdb));
    vars.insert("v8_no_strict_aliasing", Value::Int(1));
    vars.insert(
        "node_prefix",
        Value::str(expand_home(options.prefix.as_deref().unwrap_or(""))),
    );
    vars.insert("node_install_npm", Value::flag(!options.without_npm));
    vars.insert(
        "node_unsafe_optimizations",
        Value::int_flag(options.unsafe_optimizations),
    );
}

fn assemble_arch(config: &mut BuildConfiguration, inputs: &ResolvedInputs<'_>) {
    let vars = &mut config.variables;
    vars.insert("host_arch", Value::str(inputs.host_arch.as_str()));
    vars.insert("target_arch", Value::str(inputs.target_arch.as_str()));

    match inputs.abi {
        Some(AbiProfile::Arm(arm)) => {
            vars.insert("armv7", Value::int_flag(arm.armv7));
            vars.insert("arm_fpu", Value::str(arm.fpu().as_str()));
            vars.insert("arm_neon", Value::int_flag(arm.neon));
            vars.insert("v8_use_arm_eabi_hardfloat", Value::flag(arm.hard_float));
        }
        Some(AbiProfile::Mips(mips)) => {
            if let Some(hard) = mips.hard_float {
                vars.insert("v8_use_mips_abi_hardfloat", Value::flag(hard));
            }
        }
        None => {}
    }
}

fn assemble_compiler(config: &mut BuildConfiguration, identity: &CompilerIdentity) {
    let vars = &mut config.variables;
    vars.insert("clang", Value::int_flag(identity.is_clang));

    if let Some(gcc_version) = identity.gcc_version() {
        vars.insert("gcc_version", Value::Int(gcc_version));
    }
    if identity.lacks_visibility() {
        vars.insert("visibility", Value::str(""));
    }
}

fn assemble_platform(config: &mut BuildConfiguration, inputs: &ResolvedInputs<'_>) {
    let platform = &inputs.platform;
    let options = inputs.options;

    config.variables.insert(
        PlatformFeature::Dtrace.variable(),
        Value::flag(platform.dtrace),
    );
    if let Some(systemtap) = platform.systemtap {
        config
            .variables
            .insert("node_use_systemtap", Value::flag(systemtap));
    }
    if inputs.flavor == Flavor::Linux {
        if let Some(ref dir) = options.systemtap_includes {
            config.include_dirs.push(dir.display().to_string());
        }
    }

    if options.no_ifaddrs {
        config.defines.push("SUNOS_NO_IFADDRS".to_string());
    }

    for feature in [PlatformFeature::Etw, PlatformFeature::PerfCtr] {
        config
            .variables
            .insert(feature.variable(), Value::flag(platform.get(feature)));
    }

    let tag = match options.tag {
        Some(ref tag) => format!("-{}", tag),
        None => String::new(),
    };
    config.variables.insert("node_tag", Value::str(tag));
}

fn assemble_toggle(config: &mut BuildConfiguration, toggle: &FeatureToggle, options: &ConfigureOptions) {
    let subsystem = toggle.subsystem;

    match subsystem {
        Subsystem::V8 => {
            config
                .variables
                .insert("v8_use_snapshot", Value::flag(!options.without_snapshot));
        }
        Subsystem::OpenSsl => {
            config
                .variables
                .insert("node_use_openssl", Value::flag(!options.without_ssl));
        }
        _ => {}
    }
    config
        .variables
        .insert(subsystem.shared_variable(), Value::flag(toggle.use_shared));

    if subsystem == Subsystem::OpenSsl {
        if options.without_ssl {
            return;
        }
        if options.no_ssl2 {
            config.defines.push("OPENSSL_NO_SSL2=1".to_string());
        }
    }

    config.libraries.extend(toggle.linker_args());
    config
        .include_dirs
        .extend(toggle.include_dirs.iter().map(|d| d.display().to_string()));
    config.cflags.extend(toggle.cflags.iter().cloned());
}
