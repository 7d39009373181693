//! Configure options and option files.
//!
//! Options come from three layers:
//! - Global: `~/.confsynth/options.toml` - user-wide defaults
//! - Project: `.confsynth/options.toml` - project-specific overrides
//! - Command line flags
//!
//! Later layers take precedence. `Option` values are replaced when the
//! later layer sets them; boolean flags are OR-ed, so a layer can switch
//! a flag on but never off.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::Subsystem;

/// The flat set of configure options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigureOptions {
    /// Also build the debug configuration
    pub debug: bool,

    /// Install prefix (a leading `~` is expanded)
    pub prefix: Option<String>,

    /// Windows subsystem, `console` or `windows`
    pub subsystem: Option<String>,

    /// Custom build tag
    pub tag: Option<String>,

    /// Add gdb JIT support
    pub gdb: bool,

    pub unsafe_optimizations: bool,

    /// Don't install the bundled npm
    pub without_npm: bool,

    /// Build without V8 snapshots
    pub without_snapshot: bool,

    /// Build without SSL
    pub without_ssl: bool,

    /// Disable OpenSSL v2
    pub no_ssl2: bool,

    /// For SunOS systems without ifaddrs.h
    pub no_ifaddrs: bool,

    /// CPU architecture to build for
    pub dest_cpu: Option<String>,

    /// Operating system to build for
    pub dest_os: Option<String>,

    /// ARM floating-point ABI: soft, softfp or hard
    pub arm_float_abi: Option<String>,

    /// MIPS floating-point ABI: soft or hard
    pub mips_float_abi: Option<String>,

    pub with_dtrace: bool,
    pub without_dtrace: bool,
    pub with_etw: bool,
    pub without_etw: bool,
    pub with_perfctr: bool,
    pub without_perfctr: bool,

    /// Include directory for systemtap headers (linux only)
    pub systemtap_includes: Option<PathBuf>,

    /// Per-subsystem shared library settings
    pub shared: SharedOptions,
}

/// Shared library settings for each optional subsystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedOptions {
    pub zlib: LibraryOptions,
    pub http_parser: LibraryOptions,
    pub cares: LibraryOptions,
    pub libuv: LibraryOptions,
    pub v8: LibraryOptions,
    pub openssl: LibraryOptions,
}

impl SharedOptions {
    pub fn get(&self, subsystem: Subsystem) -> &LibraryOptions {
        match subsystem {
            Subsystem::Zlib => &self.zlib,
            Subsystem::HttpParser => &self.http_parser,
            Subsystem::Cares => &self.cares,
            Subsystem::Libuv => &self.libuv,
            Subsystem::V8 => &self.v8,
            Subsystem::OpenSsl => &self.openssl,
        }
    }

    pub fn get_mut(&mut self, subsystem: Subsystem) -> &mut LibraryOptions {
        match subsystem {
            Subsystem::Zlib => &mut self.zlib,
            Subsystem::HttpParser => &mut self.http_parser,
            Subsystem::Cares => &mut self.cares,
            Subsystem::Libuv => &mut self.libuv,
            Subsystem::V8 => &mut self.v8,
            Subsystem::OpenSsl => &mut self.openssl,
        }
    }
}

/// Overrides for one subsystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryOptions {
    /// Link to the system library instead of the bundled copy
    pub shared: bool,

    /// Directory containing the library headers
    pub includes: Option<PathBuf>,

    /// Directory to search for the shared library
    pub libpath: Option<PathBuf>,

    /// Comma-separated library names to link instead of the defaults
    pub libname: Option<String>,
}

impl LibraryOptions {
    fn merge(&mut self, other: LibraryOptions) {
        self.shared |= other.shared;
        if other.includes.is_some() {
            self.includes = other.includes;
        }
        if other.libpath.is_some() {
            self.libpath = other.libpath;
        }
        if other.libname.is_some() {
            self.libname = other.libname;
        }
    }
}

macro_rules! merge_options {
    ($self:ident, $other:ident; flags: [$($flag:ident),*]; values: [$($value:ident),*]) => {
        $( $self.$flag |= $other.$flag; )*
        $(
            if $other.$value.is_some() {
                $self.$value = $other.$value;
            }
        )*
    };
}

impl ConfigureOptions {
    /// Load options from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read options file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse options file: {}", path.display()))
    }

    /// Load options with fallback to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load options from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another layer into this one (other takes precedence).
    pub fn merge(&mut self, other: ConfigureOptions) {
        merge_options!(self, other;
            flags: [
                debug, gdb, unsafe_optimizations, without_npm, without_snapshot,
                without_ssl, no_ssl2, no_ifaddrs, with_dtrace, without_dtrace,
                with_etw, without_etw, with_perfctr, without_perfctr
            ];
            values: [
                prefix, subsystem, tag, dest_cpu, dest_os, arm_float_abi,
                mips_float_abi, systemtap_includes
            ]
        );

        let mut shared = other.shared;
        for subsystem in Subsystem::ALL {
            let layer = std::mem::take(shared.get_mut(subsystem));
            self.shared.get_mut(subsystem).merge(layer);
        }
    }
}

/// Load merged options from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project options (.confsynth/options.toml)
/// 2. Global options (~/.confsynth/options.toml)
/// 3. Defaults
pub fn load_options(global_path: &Path, project_path: &Path) -> ConfigureOptions {
    let mut options = ConfigureOptions::default();

    if global_path.exists() {
        options.merge(ConfigureOptions::load_or_default(global_path));
    }

    if project_path.exists() {
        options.merge(ConfigureOptions::load_or_default(project_path));
    }

    options
}

/// Get the global confsynth directory (~/.confsynth).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".confsynth"))
}

/// Get the global options path (~/.confsynth/options.toml).
pub fn global_options_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("options.toml"))
}

/// Get the project options path (.confsynth/options.toml).
pub fn project_options_path(project_root: &Path) -> PathBuf {
    project_root.join(".confsynth").join("options.toml")
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return path.to_string(),
    };

    match directories::BaseDirs::new() {
        Some(dirs) => format!("{}{}", dirs.home_dir().display(), rest),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_options_default() {
        let options = ConfigureOptions::default();
        assert!(!options.debug);
        assert!(options.dest_cpu.is_none());
        assert!(!options.shared.openssl.shared);
        assert!(options.shared.zlib.libname.is_none());
    }

    #[test]
    fn test_options_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("options.toml");

        std::fs::write(
            &path,
            r#"
dest_cpu = "arm"
arm_float_abi = "hard"
with_dtrace = true

[shared.openssl]
shared = true
libpath = "/opt/ssl/lib"
libname = "ssl,crypto,z"

[shared.http_parser]
includes = "/opt/hp/include"
"#,
        )
        .unwrap();

        let options = ConfigureOptions::load(&path).unwrap();
        assert_eq!(options.dest_cpu, Some("arm".to_string()));
        assert_eq!(options.arm_float_abi, Some("hard".to_string()));
        assert!(options.with_dtrace);
        assert!(options.shared.openssl.shared);
        assert_eq!(
            options.shared.openssl.libpath,
            Some(PathBuf::from("/opt/ssl/lib"))
        );
        assert_eq!(options.shared.openssl.libname, Some("ssl,crypto,z".to_string()));
        assert!(!options.shared.http_parser.shared);
        assert_eq!(
            options.shared.get(Subsystem::HttpParser).includes,
            Some(PathBuf::from("/opt/hp/include"))
        );
    }

    #[test]
    fn test_options_load_rejects_bad_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("options.toml");
        std::fs::write(&path, "dest_cpu = [").unwrap();

        assert!(ConfigureOptions::load(&path).is_err());
        assert_eq!(ConfigureOptions::load_or_default(&path), ConfigureOptions::default());
    }

    #[test]
    fn test_options_merge() {
        let mut base = ConfigureOptions::default();
        base.dest_cpu = Some("x64".to_string());
        base.tag = Some("nightly".to_string());
        base.without_npm = true;
        base.shared.zlib.shared = true;
        base.shared.zlib.libname = Some("z".to_string());

        let mut layer = ConfigureOptions::default();
        layer.dest_cpu = Some("arm".to_string());
        layer.shared.zlib.libname = Some("zlib1".to_string());
        layer.shared.v8.shared = true;

        base.merge(layer);

        assert_eq!(base.dest_cpu, Some("arm".to_string()));
        // Not overridden
        assert_eq!(base.tag, Some("nightly".to_string()));
        // Flags are never switched off by a later layer
        assert!(base.without_npm);
        assert!(base.shared.zlib.shared);
        assert_eq!(base.shared.zlib.libname, Some("zlib1".to_string()));
        assert!(base.shared.v8.shared);
    }

    #[test]
    fn test_load_options_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
prefix = "/usr/local"
dest_os = "linux"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
dest_os = "solaris"
no_ifaddrs = true
"#,
        )
        .unwrap();

        let options = load_options(&global_path, &project_path);

        assert_eq!(options.prefix, Some("/usr/local".to_string()));
        assert_eq!(options.dest_os, Some("solaris".to_string()));
        assert!(options.no_ifaddrs);
    }

    #[test]
    fn test_load_options_missing_files() {
        let tmp = TempDir::new().unwrap();
        let options = load_options(&tmp.path().join("a.toml"), &tmp.path().join("b.toml"));
        assert_eq!(options, ConfigureOptions::default());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/usr/local"), "/usr/local");
        assert_eq!(expand_home("~other/x"), "~other/x");
        assert_eq!(expand_home(""), "");

        if let Some(dirs) = directories::BaseDirs::new() {
            let home = dirs.home_dir().display().to_string();
            assert_eq!(expand_home("~/node"), format!("{}/node", home));
            assert_eq!(expand_home("~"), home);
        }
    }
}
