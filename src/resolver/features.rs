//! Bundled-vs-shared resolution for optional subsystems.

use std::path::PathBuf;

use crate::core::{FeatureToggle, Subsystem};
use crate::util::config::{LibraryOptions, SharedOptions};
use crate::util::process::{CommandRunner, ProcessBuilder};

/// Package queried for TLS flags.
pub const OPENSSL_PKG_CONFIG_NAME: &str = "openssl";

/// Resolve one subsystem from its overrides.
///
/// `use_shared` follows the shared flag alone. A library name override
/// replaces the default names; path overrides are appended.
pub fn resolve(subsystem: Subsystem, opts: &LibraryOptions) -> FeatureToggle {
    let mut toggle = FeatureToggle::bundled(subsystem);
    toggle.use_shared = opts.shared;

    if let Some(ref names) = opts.libname {
        toggle.library_names = split_library_names(names);
    }
    if let Some(ref dir) = opts.libpath {
        toggle.library_dirs.push(dir.clone());
    }
    if let Some(ref dir) = opts.includes {
        toggle.include_dirs.push(dir.clone());
    }

    toggle
}

/// Resolve OpenSSL, consulting pkg-config for a shared build without
/// explicit library names or paths.
///
/// A failing query falls back to the built-in defaults; it never aborts.
pub fn resolve_openssl<R>(runner: &R, opts: &LibraryOptions) -> FeatureToggle
where
    R: CommandRunner + ?Sized,
{
    let mut toggle = resolve(Subsystem::OpenSsl, opts);

    if !opts.shared || opts.libname.is_some() || opts.libpath.is_some() {
        return toggle;
    }

    match pkg_config(runner, OPENSSL_PKG_CONFIG_NAME) {
        Some(flags) => {
            tracing::debug!(
                "pkg-config {}: libs={:?} cflags={:?}",
                OPENSSL_PKG_CONFIG_NAME,
                flags.libs,
                flags.cflags
            );
            apply_pkg_config(&mut toggle, flags, opts.includes.is_none());
        }
        None => {
            tracing::warn!(
                "pkg-config has no flags for {}, linking with -l{}",
                OPENSSL_PKG_CONFIG_NAME,
                toggle.library_names.join(" -l")
            );
        }
    }

    toggle
}

/// Resolve every subsystem in configuration order.
///
/// With `without_ssl` the OpenSSL toggle is resolved from its overrides
/// only, without querying pkg-config.
pub fn resolve_all<R>(runner: &R, shared: &SharedOptions, without_ssl: bool) -> Vec<FeatureToggle>
where
    R: CommandRunner + ?Sized,
{
    Subsystem::ALL
        .into_iter()
        .map(|subsystem| {
            let opts = shared.get(subsystem);
            match subsystem {
                Subsystem::OpenSsl if !without_ssl => resolve_openssl(runner, opts),
                _ => resolve(subsystem, opts),
            }
        })
        .collect()
}

/// Flags reported by pkg-config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PkgConfigFlags {
    pub libs: Vec<String>,
    pub cflags: Vec<String>,
}

/// Query `pkg-config --libs` and `--cflags` for a package.
///
/// Returns `None` if either query cannot be run or exits nonzero.
pub fn pkg_config<R>(runner: &R, package: &str) -> Option<PkgConfigFlags>
where
    R: CommandRunner + ?Sized,
{
    let libs = query(runner, "--libs", package)?;
    let cflags = query(runner, "--cflags", package)?;
    Some(PkgConfigFlags { libs, cflags })
}

fn query<R>(runner: &R, flag: &str, package: &str) -> Option<Vec<String>>
where
    R: CommandRunner + ?Sized,
{
    let cmd = ProcessBuilder::new("pkg-config").args([flag, package]);
    match runner.run(&cmd) {
        Ok(output) if output.success() => shlex::split(output.first_line()),
        Ok(output) => {
            tracing::debug!(
                "`{}` exited with {:?}: {}",
                cmd.display_command(),
                output.status,
                output.stderr.trim()
            );
            None
        }
        Err(e) => {
            tracing::debug!("failed to run `{}`: {}", cmd.display_command(), e);
            None
        }
    }
}

/// Sort pkg-config linker words into dirs, names and other flags.
fn apply_pkg_config(toggle: &mut FeatureToggle, flags: PkgConfigFlags, use_cflags: bool) {
    let mut names = Vec::new();
    for word in flags.libs {
        if let Some(dir) = word.strip_prefix("-L") {
            toggle.library_dirs.push(PathBuf::from(dir));
        } else if let Some(name) = word.strip_prefix("-l") {
            names.push(name.to_string());
        } else {
            toggle.link_flags.push(word);
        }
    }
    if !names.is_empty() {
        toggle.library_names = names;
    }

    if use_cflags {
        toggle.cflags.extend(flags.cflags);
    }
}

fn split_library_names(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}
