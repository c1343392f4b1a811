mod api;
mod cli;
mod config;
mod error;
mod logger;
mod orchestrator;
mod poller;
mod records;
mod report;
mod source;
mod sync;
mod ui;

use anyhow::Result;
use clap::Parser;
use console::Style;

use cli::Cli;
use config::SyncConfig;
use sync::RunOptions;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        eprintln!("{} {e:#}", Style::new().red().bold().apply_to("error:"));
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = SyncConfig::load(&cli.config)?;
    let options = RunOptions {
        kinds: cli.enabled_kinds(),
        only_connection: cli.connection.clone(),
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };
    sync::run(&config, &options).await?;
    Ok(())
}
