//! Toolchain probing.
//!
//! A [`ToolchainContext`] is created once per configuration run. It owns
//! the compiler command, a snapshot of the environment and the runner used
//! to spawn subprocesses, and memoizes the two compiler probes so that each
//! is run at most once:
//!
//! - [`macros`]: predefined preprocessor macros (`cc -dM -E -`)
//! - [`version`]: version number and compiler family

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;

use crate::core::{CompilerIdentity, CompilerMacroSet};
use crate::resolver::errors::{ConfigureError, Result};
use crate::util::process::{CommandRunner, ProcessBuilder, SystemRunner};

pub mod macros;
pub mod version;

pub use macros::probe_macros;
pub use version::identify;

/// Compiler used when `CC` is not set.
pub const DEFAULT_COMPILER: &str = "cc";

/// A snapshot of the environment variables a run may consult.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        EnvSnapshot {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EnvSnapshot {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// The compiler invocation, e.g. `ccache gcc -m32`, split into words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerCommand {
    words: Vec<String>,
}

impl CompilerCommand {
    /// Parse a command line with shell-style quoting.
    pub fn parse(command: &str) -> Result<Self> {
        match shlex::split(command) {
            Some(words) if !words.is_empty() => Ok(CompilerCommand { words }),
            Some(_) => Err(ConfigureError::ToolchainUnavailable {
                command: command.to_string(),
                reason: "empty compiler command".to_string(),
            }),
            None => Err(ConfigureError::ToolchainUnavailable {
                command: command.to_string(),
                reason: "unbalanced quoting in compiler command".to_string(),
            }),
        }
    }

    /// The program to spawn.
    pub fn program(&self) -> &str {
        &self.words[0]
    }

    /// A process builder for this compiler with `args` appended.
    pub fn process<I, S>(&self, args: I) -> ProcessBuilder
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        ProcessBuilder::new(self.program())
            .args(&self.words[1..])
            .args(args)
    }
}

impl fmt::Display for CompilerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words.join(" "))
    }
}

/// Per-run toolchain state.
pub struct ToolchainContext<R: CommandRunner = SystemRunner> {
    compiler: CompilerCommand,
    env: EnvSnapshot,
    runner: R,
    macros: OnceCell<CompilerMacroSet>,
    identity: OnceCell<CompilerIdentity>,
}

impl ToolchainContext<SystemRunner> {
    /// Context for `cc` in the real environment, spawning real subprocesses.
    pub fn system(cc: &str) -> Result<Self> {
        let compiler = CompilerCommand::parse(cc)?;
        Ok(ToolchainContext::new(compiler, EnvSnapshot::from_process(), SystemRunner))
    }
}

impl<R: CommandRunner> ToolchainContext<R> {
    pub fn new(compiler: CompilerCommand, env: EnvSnapshot, runner: R) -> Self {
        ToolchainContext {
            compiler,
            env,
            runner,
            macros: OnceCell::new(),
            identity: OnceCell::new(),
        }
    }

    pub fn compiler(&self) -> &CompilerCommand {
        &self.compiler
    }

    pub fn env(&self) -> &EnvSnapshot {
        &self.env
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// The compiler's predefined macros, probed on first use.
    pub fn macros(&self) -> Result<&CompilerMacroSet> {
        if let Some(macros) = self.macros.get() {
            return Ok(macros);
        }
        let probed = probe_macros(&self.runner, &self.compiler)?;
        Ok(self.macros.get_or_init(|| probed))
    }

    /// The compiler's version and family, probed on first use.
    pub fn identity(&self) -> Result<&CompilerIdentity> {
        if let Some(identity) = self.identity.get() {
            return Ok(identity);
        }
        let probed = identify(&self.runner, &self.compiler)?;
        Ok(self.identity.get_or_init(|| probed))
    }
}

/// Map a spawn failure onto [`ConfigureError::ToolchainUnavailable`].
pub(crate) fn unavailable(cmd: &ProcessBuilder, err: std::io::Error) -> ConfigureError {
    ConfigureError::ToolchainUnavailable {
        command: cmd.display_command(),
        reason: err.to_string(),
    }
}
