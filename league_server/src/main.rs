//! Main entry point for the league CLI.

use anyhow::Result;
use clap::Parser;
use league_server::{cli, play::PlayerCli, server, settings::Settings, store, telemetry};
use std::io;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = cli::Cli::parse();

    // Load settings, then let the command line override them
    let mut settings = Settings::load()?;
    args.apply(&mut settings);
    settings.validate()?;

    telemetry::init(&settings.logging)?;

    let store = store::open(&settings.storage)?;

    match args.command {
        cli::Commands::Serve { .. } => server::serve(store, &settings).await,
        cli::Commands::Play => {
            println!("Let's play poker");
            println!("Type {{Name}} wins to record a win");

            let recorded = tokio::task::spawn_blocking(move || {
                PlayerCli::new(store, io::stdin().lock()).play()
            })
            .await??;

            info!("Recorded {} wins", recorded);
            Ok(())
        }
    }
}
