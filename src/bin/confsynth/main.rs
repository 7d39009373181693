//! confsynth CLI - pre-build configuration synthesizer

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use confsynth::util::diagnostic::emit;
use confsynth::ConfigureError;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    // Logs go to stderr; stdout carries the configuration.
    let filter = if cli.verbose {
        EnvFilter::new("confsynth=debug")
    } else {
        EnvFilter::new("confsynth=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(color)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        match e.downcast_ref::<ConfigureError>() {
            Some(err) => emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match cli.command {
        Commands::Configure(ref args) => commands::configure::execute(args, &cli.cc),
        Commands::Probe(ref args) => commands::probe::execute(args, &cli.cc),
    }
}
