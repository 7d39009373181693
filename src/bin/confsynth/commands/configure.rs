//! `confsynth configure` command

use anyhow::{Context, Result};

use crate::cli::ConfigureArgs;
use confsynth::toolchain::ToolchainContext;
use confsynth::util::config::{global_options_path, load_options, project_options_path};
use confsynth::util::ConfigureOptions;

pub fn execute(args: &ConfigureArgs, cc: &str) -> Result<()> {
    let options = collect_options(args)?;

    let ctx = ToolchainContext::system(cc)?;

    let config = confsynth::configure(&options, &ctx)?;

    let json = serde_json::to_string_pretty(&config)?;
    println!("{}", json);
    Ok(())
}

/// Global, project, explicit file, then command line.
fn collect_options(args: &ConfigureArgs) -> Result<ConfigureOptions> {
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let global = global_options_path().unwrap_or_default();
    let mut options = load_options(&global, &project_options_path(&cwd));

    if let Some(ref path) = args.options_file {
        options.merge(ConfigureOptions::load(path)?);
    }
    options.merge(args.to_options());

    tracing::debug!("options: {:?}", options);
    Ok(options)
}
