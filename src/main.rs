use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, debug};

mod cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Logging setup. Logs go to stderr so stdout carries only results.
    let mut builder = Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter(Some("rf_exposure"), LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    debug!("Starting up");
    cli::run(cli)
}
