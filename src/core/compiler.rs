//! Compiler identity and predefined macro sets.

use std::collections::HashMap;
use std::fmt;

/// The predefined preprocessor macros of a compiler, name to value.
///
/// Produced once per run by the macro probe and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerMacroSet {
    macros: HashMap<String, String>,
}

impl CompilerMacroSet {
    /// Build a macro set from `(name, value)` pairs. Later pairs win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        CompilerMacroSet {
            macros: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Whether the macro is defined at all, whatever its value.
    pub fn is_defined(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    /// Whether the macro is defined to something other than `0`.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.macros.get(name).is_some_and(|v| v != "0")
    }

    /// Value of a macro.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.macros.get(name).map(String::as_str)
    }

    /// Whether any of the given macros is defined.
    pub fn any_defined(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.is_defined(n))
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

/// A dotted compiler version such as `4.8.2`.
///
/// Ordering is component-wise, and a shorter version sorts before any
/// longer version it prefixes, so `4.5` < `4.5.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompilerVersion(Vec<u32>);

impl CompilerVersion {
    pub fn new(components: impl Into<Vec<u32>>) -> Self {
        CompilerVersion(components.into())
    }

    /// Parse `-dumpversion` output. Every component must be numeric.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        s.split('.')
            .map(|part| part.parse::<u32>().ok())
            .collect::<Option<Vec<_>>>()
            .map(CompilerVersion)
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    pub fn major(&self) -> u32 {
        self.0.first().copied().unwrap_or(0)
    }

    /// Minor component, `0` for single-component versions like `12`.
    pub fn minor(&self) -> u32 {
        self.0.get(1).copied().unwrap_or(0)
    }

    /// Whether this version is at least `major.minor.patch`.
    pub fn at_least(&self, major: u32, minor: u32, patch: u32) -> bool {
        self.0.as_slice() >= [major, minor, patch].as_slice()
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Compiler version plus family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerIdentity {
    pub version: CompilerVersion,
    pub is_clang: bool,
}

impl CompilerIdentity {
    pub fn new(version: CompilerVersion, is_clang: bool) -> Self {
        CompilerIdentity { version, is_clang }
    }

    /// The `gcc_version` build variable: `10 * major + minor`.
    ///
    /// Always `None` for clang, whose version numbers are unrelated.
    /// Computed in `i64`, which holds any pair of `u32` components.
    pub fn gcc_version(&self) -> Option<i64> {
        if self.is_clang {
            None
        } else {
            Some(10 * i64::from(self.version.major()) + i64::from(self.version.minor()))
        }
    }

    /// GCC before 4.0 has no `-fvisibility=hidden`.
    pub fn lacks_visibility(&self) -> bool {
        !self.is_clang && !self.version.at_least(4, 0, 0)
    }
}

impl fmt::Display for CompilerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let family = if self.is_clang { "clang" } else { "gcc" };
        write!(f, "{}-{}", family, self.version)
    }
}
