//! The assembled build configuration.
//!
//! A [`BuildConfiguration`] is only ever built by the config assembler;
//! everything else sees it read-only. Its serde form is the gyp-style
//! document the build-file generator consumes:
//!
//! ```text
//! { "variables": { ... },
//!   "target_defaults": { "default_configuration", "include_dirs",
//!                        "libraries", "defines", "cflags" } }
//! ```

use std::fmt;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// A build variable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
}

impl Value {
    /// Booleans are written as the strings `true` / `false`.
    pub fn flag(value: bool) -> Self {
        Value::Str(if value { "true" } else { "false" }.to_string())
    }

    /// Booleans written as `1` / `0`.
    pub fn int_flag(value: bool) -> Self {
        Value::Int(i64::from(value))
    }

    pub fn str(value: impl Into<String>) -> Self {
        Value::Str(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Str(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Str(s) => write!(f, "'{}'", s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Str(s) => serializer.serialize_str(s),
        }
    }
}

/// Build type selected by `--debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }
}

/// Variables in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    entries: Vec<(String, Value)>,
}

impl Variables {
    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Variables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The terminal configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub(crate) build_type: BuildType,
    pub(crate) variables: Variables,
    pub(crate) defines: Vec<String>,
    pub(crate) cflags: Vec<String>,
    pub(crate) libraries: Vec<String>,
    pub(crate) include_dirs: Vec<String>,
}

impl BuildConfiguration {
    pub fn build_type(&self) -> BuildType {
        self.build_type
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Shorthand for `variables().get(key)`.
    pub fn variable(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }

    pub fn defines(&self) -> &[String] {
        &self.defines
    }

    pub fn cflags(&self) -> &[String] {
        &self.cflags
    }

    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    pub fn include_dirs(&self) -> &[String] {
        &self.include_dirs
    }
}

struct TargetDefaults<'a>(&'a BuildConfiguration);

impl Serialize for TargetDefaults<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let config = self.0;
        let mut s = serializer.serialize_struct("target_defaults", 5)?;
        s.serialize_field("default_configuration", config.build_type.as_str())?;
        s.serialize_field("include_dirs", &config.include_dirs)?;
        s.serialize_field("libraries", &config.libraries)?;
        s.serialize_field("defines", &config.defines)?;
        s.serialize_field("cflags", &config.cflags)?;
        s.end()
    }
}

impl Serialize for BuildConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("BuildConfiguration", 2)?;
        s.serialize_field("variables", &self.variables)?;
        s.serialize_field("target_defaults", &TargetDefaults(self))?;
        s.end()
    }
}
