//! Compiler version and family probe.

use crate::core::{CompilerIdentity, CompilerVersion};
use crate::resolver::errors::{ConfigureError, Result};
use crate::util::process::CommandRunner;

use super::{unavailable, CompilerCommand};

/// Identify the compiler from `--version` and `-dumpversion`.
///
/// The compiler is clang if the first banner line mentions `clang`. A
/// version that is not a dotted list of integers is a hard error rather
/// than a silent `0`.
pub fn identify<R>(runner: &R, compiler: &CompilerCommand) -> Result<CompilerIdentity>
where
    R: CommandRunner + ?Sized,
{
    let banner_cmd = compiler.process(["--version"]);
    let banner = runner
        .run(&banner_cmd)
        .map_err(|e| unavailable(&banner_cmd, e))?;
    let is_clang = banner.first_line().contains("clang");

    let dump_cmd = compiler.process(["-dumpversion"]);
    let dump = runner
        .run(&dump_cmd)
        .map_err(|e| unavailable(&dump_cmd, e))?;

    let version = CompilerVersion::parse(&dump.stdout).ok_or_else(|| {
        ConfigureError::UnparsableToolchainOutput {
            command: dump_cmd.display_command(),
            what: "compiler version",
            output: dump.stdout.trim().to_string(),
        }
    })?;

    let identity = CompilerIdentity::new(version, is_clang);
    tracing::debug!("compiler identified as {}", identity);
    Ok(identity)
}
