//! Test utilities and mocks for confsynth unit tests.
//!
//! The main piece is [`MockExecutor`], a scripted [`CommandRunner`] that
//! stands in for the compiler and pkg-config.
//!
//! # Example
//!
//! ```rust,ignore
//! use confsynth::test_support::{MockExecutor, MockProcessOutput};
//!
//! let mut exec = MockExecutor::new();
//! exec.expect("gcc -dumpversion", MockProcessOutput::success("4.8.2"));
//! ```

pub mod fixtures;

use std::io;
use std::sync::Mutex;

use crate::util::process::{CapturedOutput, CommandRunner, ProcessBuilder};

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
    /// Simulate a spawn failure instead of a finished process.
    pub spawn_error: Option<io::ErrorKind>,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
            spawn_error: None,
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
            spawn_error: None,
        }
    }

    /// Create an output with both stdout and stderr.
    pub fn with_output(status: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
            spawn_error: None,
        }
    }

    /// The program does not exist.
    pub fn not_found() -> Self {
        MockProcessOutput {
            spawn_error: Some(io::ErrorKind::NotFound),
            ..MockProcessOutput::failure(127, "")
        }
    }

    /// The program exists but cannot be executed.
    pub fn permission_denied() -> Self {
        MockProcessOutput {
            spawn_error: Some(io::ErrorKind::PermissionDenied),
            ..MockProcessOutput::failure(126, "")
        }
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success("")
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match using a regex pattern.
    Regex(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(cmd))
                .unwrap_or(false),
            CommandPattern::Any => true,
        }
    }
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    /// Pattern to match against commands.
    pub pattern: CommandPattern,
    /// Output to return when matched.
    pub output: MockProcessOutput,
    /// Number of times this expectation can be used (None = unlimited).
    pub times: Option<usize>,
    /// Number of times this expectation has been used.
    pub used: usize,
}

impl CommandExpectation {
    /// Create a new expectation.
    pub fn new(pattern: CommandPattern, output: MockProcessOutput) -> Self {
        CommandExpectation {
            pattern,
            output,
            times: None,
            used: 0,
        }
    }

    /// Set the number of times this expectation can be used.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }

    /// Check if this expectation can still be used.
    pub fn available(&self) -> bool {
        match self.times {
            Some(n) => self.used < n,
            None => true,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    expectations: Vec<CommandExpectation>,
    calls: Vec<(String, Option<Vec<u8>>)>,
    default_output: Option<MockProcessOutput>,
}

/// Mock process executor for testing command execution.
///
/// Records every command it is asked to run. Commands that match no
/// expectation and no default fail as if the program was not found.
#[derive(Debug, Default)]
pub struct MockExecutor {
    state: Mutex<MockState>,
}

impl MockExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        MockExecutor::default()
    }

    fn push(&mut self, expectation: CommandExpectation) -> &mut Self {
        self.state_mut().expectations.push(expectation);
        self
    }

    fn state_mut(&mut self) -> &mut MockState {
        self.state.get_mut().unwrap_or_else(|e| e.into_inner())
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&mut self, cmd: &str, output: MockProcessOutput) -> &mut Self {
        self.push(CommandExpectation::new(
            CommandPattern::Exact(cmd.to_string()),
            output,
        ))
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&mut self, prefix: &str, output: MockProcessOutput) -> &mut Self {
        self.push(CommandExpectation::new(
            CommandPattern::StartsWith(prefix.to_string()),
            output,
        ))
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&mut self, substring: &str, output: MockProcessOutput) -> &mut Self {
        self.push(CommandExpectation::new(
            CommandPattern::Contains(substring.to_string()),
            output,
        ))
    }

    /// Add a custom expectation.
    pub fn expect_pattern(&mut self, expectation: CommandExpectation) -> &mut Self {
        self.push(expectation)
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&mut self, output: MockProcessOutput) -> &mut Self {
        self.state_mut().default_output = Some(output);
        self
    }

    /// Get all commands that were called, in order.
    pub fn calls(&self) -> Vec<String> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.iter().map(|(cmd, _)| cmd.clone()).collect()
    }

    /// Whether a command containing `substring` was run.
    pub fn was_called(&self, substring: &str) -> bool {
        self.calls().iter().any(|c| c.contains(substring))
    }

    /// Stdin passed to the first call of `cmd`.
    pub fn stdin_for(&self, cmd: &str) -> Option<Vec<u8>> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .calls
            .iter()
            .find(|(c, _)| c == cmd)
            .and_then(|(_, stdin)| stdin.clone())
    }
}

impl CommandRunner for MockExecutor {
    fn run(&self, cmd: &ProcessBuilder) -> io::Result<CapturedOutput> {
        let full_cmd = cmd.display_command();
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .calls
            .push((full_cmd.clone(), cmd.get_stdin().map(<[u8]>::to_vec)));

        let matched = state
            .expectations
            .iter_mut()
            .find(|exp| exp.pattern.matches(&full_cmd) && exp.available())
            .map(|exp| {
                exp.used += 1;
                exp.output.clone()
            });

        let output = match matched.or_else(|| state.default_output.clone()) {
            Some(output) => output,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("unexpected command: {}", full_cmd),
                ))
            }
        };

        if let Some(kind) = output.spawn_error {
            return Err(io::Error::new(kind, format!("cannot run `{}`", full_cmd)));
        }

        Ok(CapturedOutput {
            status: Some(output.status),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_executor_matching() {
        let mut exec = MockExecutor::new();
        exec.expect("gcc --version", MockProcessOutput::success("gcc 12.0.0"))
            .expect_prefix("pkg-config", MockProcessOutput::failure(1, "no openssl"));

        let out = exec.run(&ProcessBuilder::new("gcc").arg("--version")).unwrap();
        assert!(out.success());
        assert_eq!(out.first_line(), "gcc 12.0.0");

        let out = exec
            .run(&ProcessBuilder::new("pkg-config").args(["--libs", "openssl"]))
            .unwrap();
        assert!(!out.success());

        assert_eq!(exec.calls(), ["gcc --version", "pkg-config --libs openssl"]);
        assert!(exec.was_called("--libs"));
    }

    #[test]
    fn test_mock_executor_unmatched_is_not_found() {
        let exec = MockExecutor::new();
        let err = exec.run(&ProcessBuilder::new("cc")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_mock_executor_limited_expectation() {
        let mut exec = MockExecutor::new();
        exec.expect_pattern(
            CommandExpectation::new(
                CommandPattern::Regex(r"^cc -dM".to_string()),
                MockProcessOutput::success("first"),
            )
            .times(1),
        )
        .set_default(MockProcessOutput::success("fallback"));

        let cmd = ProcessBuilder::new("cc").args(["-dM", "-E", "-"]);
        assert_eq!(exec.run(&cmd).unwrap().stdout, "first");
        assert_eq!(exec.run(&cmd).unwrap().stdout, "fallback");
    }

    #[test]
    fn test_mock_spawn_errors() {
        let mut exec = MockExecutor::new();
        exec.expect_contains("denied", MockProcessOutput::permission_denied());

        let err = exec.run(&ProcessBuilder::new("denied-cc")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
