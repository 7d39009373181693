//! Predefined macro probe.

use crate::core::CompilerMacroSet;
use crate::resolver::errors::Result;
use crate::util::process::CommandRunner;

use super::{unavailable, CompilerCommand};

/// Preprocess stdin and dump every predefined macro.
pub const MACRO_DUMP_ARGS: [&str; 3] = ["-dM", "-E", "-"];

/// Ask the compiler for its predefined macros.
///
/// Fails only when the compiler cannot be spawned. The exit status is not
/// checked: whatever `#define` lines were printed are used.
pub fn probe_macros<R>(runner: &R, compiler: &CompilerCommand) -> Result<CompilerMacroSet>
where
    R: CommandRunner + ?Sized,
{
    let cmd = compiler.process(MACRO_DUMP_ARGS).stdin("\n");
    let output = runner.run(&cmd).map_err(|e| unavailable(&cmd, e))?;

    if !output.success() {
        tracing::warn!(
            "`{}` exited with {:?}: {}",
            cmd.display_command(),
            output.status,
            output.stderr.trim()
        );
    }

    let macros = parse_macro_dump(&output.stdout);
    tracing::debug!("compiler defines {} macros", macros.len());
    Ok(macros)
}

/// Parse `#define NAME VALUE` lines.
///
/// Lines that do not split into at least three words (banners, valueless
/// defines, unbalanced quotes) are skipped. Only the third word is kept as
/// the value.
///
/// The directive is cut off before splitting: `shlex` reads a word starting
/// with `#` as a comment.
pub fn parse_macro_dump(text: &str) -> CompilerMacroSet {
    CompilerMacroSet::from_pairs(text.lines().filter_map(|line| {
        let (_directive, rest) = line.trim_start().split_once(char::is_whitespace)?;
        let mut parts = shlex::split(rest)?.into_iter();
        let name = parts.next()?;
        let value = parts.next()?;
        Some((name, value))
    }))
}
