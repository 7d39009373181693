//! CPU architecture and operating-system flavor choices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// CPU architecture as understood by the downstream build files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Ia32,
    X64,
    Arm,
    Mips,
    Mipsel,
}

impl Arch {
    /// All accepted values, in the order they are listed to users.
    pub const ALL: [Arch; 5] = [Arch::Ia32, Arch::X64, Arch::Arm, Arch::Mips, Arch::Mipsel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Ia32 => "ia32",
            Arch::X64 => "x64",
            Arch::Arm => "arm",
            Arch::Mips => "mips",
            Arch::Mipsel => "mipsel",
        }
    }

    /// Whether this is one of the MIPS variants.
    pub fn is_mips(&self) -> bool {
        matches!(self, Arch::Mips | Arch::Mipsel)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Arch::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "invalid CPU architecture '{}'; expected one of: {}",
                    s,
                    join_names(Arch::ALL.iter().map(Arch::as_str))
                )
            })
    }
}

/// Operating-system family the build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    Linux,
    Mac,
    Solaris,
    Win,
    FreeBsd,
    OpenBsd,
    NetBsd,
    Android,
}

impl Flavor {
    pub const ALL: [Flavor; 8] = [
        Flavor::Win,
        Flavor::Mac,
        Flavor::Solaris,
        Flavor::FreeBsd,
        Flavor::OpenBsd,
        Flavor::NetBsd,
        Flavor::Linux,
        Flavor::Android,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Flavor::Linux => "linux",
            Flavor::Mac => "mac",
            Flavor::Solaris => "solaris",
            Flavor::Win => "win",
            Flavor::FreeBsd => "freebsd",
            Flavor::OpenBsd => "openbsd",
            Flavor::NetBsd => "netbsd",
            Flavor::Android => "android",
        }
    }

    /// Flavor of the machine this process runs on.
    pub fn host() -> Self {
        Flavor::from_os(std::env::consts::OS)
    }

    /// Map a Rust `target_os` name onto a flavor. Unknown systems are
    /// treated as linux.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Flavor::Win,
            "macos" | "ios" => Flavor::Mac,
            "solaris" | "illumos" => Flavor::Solaris,
            "freebsd" => Flavor::FreeBsd,
            "openbsd" => Flavor::OpenBsd,
            "netbsd" => Flavor::NetBsd,
            "android" => Flavor::Android,
            _ => Flavor::Linux,
        }
    }

    /// Windows-like flavors read the host CPU from the environment
    /// instead of the compiler.
    pub fn is_windows(&self) -> bool {
        matches!(self, Flavor::Win)
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flavor::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "invalid operating system '{}'; expected one of: {}",
                    s,
                    join_names(Flavor::ALL.iter().map(Flavor::as_str))
                )
            })
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}
