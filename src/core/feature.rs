//! Optional subsystems that can be bundled or linked as shared libraries.

use std::fmt;
use std::path::PathBuf;

/// The fixed set of optional subsystems, in configuration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    Zlib,
    HttpParser,
    Cares,
    Libuv,
    V8,
    OpenSsl,
}

impl Subsystem {
    pub const ALL: [Subsystem; 6] = [
        Subsystem::Zlib,
        Subsystem::HttpParser,
        Subsystem::Cares,
        Subsystem::Libuv,
        Subsystem::V8,
        Subsystem::OpenSsl,
    ];

    /// Name used in build variable keys (`node_shared_<name>`).
    pub fn name(&self) -> &'static str {
        match self {
            Subsystem::Zlib => "zlib",
            Subsystem::HttpParser => "http_parser",
            Subsystem::Cares => "cares",
            Subsystem::Libuv => "libuv",
            Subsystem::V8 => "v8",
            Subsystem::OpenSsl => "openssl",
        }
    }

    /// Libraries linked when shared linking is requested without a name override.
    pub fn default_libraries(&self) -> &'static [&'static str] {
        match self {
            Subsystem::Zlib => &["z"],
            Subsystem::HttpParser => &["http_parser"],
            Subsystem::Cares => &["cares"],
            Subsystem::Libuv => &["uv"],
            Subsystem::V8 => &["v8"],
            Subsystem::OpenSsl => &["ssl", "crypto"],
        }
    }

    /// The `node_shared_*` build variable.
    pub fn shared_variable(&self) -> String {
        format!("node_shared_{}", self.name())
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bundled-vs-shared decision for one subsystem.
///
/// `use_shared` is only ever set by the explicit shared flag; library
/// overrides never flip it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureToggle {
    pub subsystem: Subsystem,
    pub use_shared: bool,
    pub include_dirs: Vec<PathBuf>,
    pub library_dirs: Vec<PathBuf>,
    pub library_names: Vec<String>,
    /// Extra compiler flags discovered through pkg-config.
    pub cflags: Vec<String>,
    /// Linker arguments discovered through pkg-config that are neither
    /// `-L` nor `-l`.
    pub link_flags: Vec<String>,
}

impl FeatureToggle {
    /// A bundled subsystem with its default library names.
    pub fn bundled(subsystem: Subsystem) -> Self {
        FeatureToggle {
            subsystem,
            use_shared: false,
            include_dirs: Vec::new(),
            library_dirs: Vec::new(),
            library_names: subsystem
                .default_libraries()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cflags: Vec::new(),
            link_flags: Vec::new(),
        }
    }

    /// Linker arguments contributed by this toggle.
    ///
    /// Empty unless the subsystem is linked as a shared library.
    pub fn linker_args(&self) -> Vec<String> {
        if !self.use_shared {
            return Vec::new();
        }

        let mut args: Vec<String> = self
            .library_dirs
            .iter()
            .map(|d| format!("-L{}", d.display()))
            .collect();
        args.extend(self.library_names.iter().map(|l| format!("-l{}", l)));
        args.extend(self.link_flags.iter().cloned());
        args
    }
}
