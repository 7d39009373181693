//! `confsynth probe` command

use anyhow::Result;

use crate::cli::ProbeArgs;
use confsynth::ops::resolve_flavor;
use confsynth::resolver::arch;
use confsynth::toolchain::ToolchainContext;
use confsynth::util::process::find_executable;

pub fn execute(args: &ProbeArgs, cc: &str) -> Result<()> {
    let flavor = resolve_flavor(args.dest_os.as_deref())?;
    let ctx = ToolchainContext::system(cc)?;

    let location = match find_executable(ctx.compiler().program()) {
        Some(path) => path.display().to_string(),
        None => "not found in PATH".to_string(),
    };
    println!("Compiler: {} ({})", ctx.compiler(), location);

    let identity = ctx.identity()?;
    println!("  Identity: {}", identity);
    println!("  Flavor:   {}", flavor);
    println!("  Host:     {}", arch::resolve_host(flavor, &ctx)?);
    if !flavor.is_windows() {
        println!("  Macros:   {} defined", ctx.macros()?.len());
    }

    Ok(())
}
