use clap::Parser;
use colored::Colorize;
use std::process;
use streamstats::cli::{args::Args, commands};
use tracing_subscriber::EnvFilter;

fn main() {
    // Default to warnings only; RUST_LOG overrides
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("{} {:#}", "Error:".red().bold(), anyhow::Error::new(error));
            process::exit(1);
        }
    }
}
