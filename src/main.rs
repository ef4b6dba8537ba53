//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use ffl_league::{
    cli::{Cli, Commands},
    cli::types::UserId,
    commands::{
        cache::handle_cache, import::handle_import, lineup::handle_lineup,
        lineup::handle_set_lineup, matchups::handle_matchups, rosters::handle_rosters,
        stats::handle_stats, transact::handle_transaction, CommandContext,
    },
    config::Config,
    transaction::{TransactionRequest, Workflow},
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ffl_league=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = Cli::parse();
    let mut config = Config::from_env();
    if let Some(user) = app.user {
        config.user = UserId::new(user);
    }

    let command = match app.command {
        Commands::Import { file } => {
            let store = config.open_sqlite().context("Failed to open local store")?;
            return handle_import(&store, &file);
        }
        Commands::Cache { cmd } => {
            let cache = config.build_cache();
            handle_cache(&cache, &config.user, cmd)?;
            return Ok(());
        }
        other => other,
    };

    let ctx = CommandContext::new(config).context("Failed to open document store")?;
    let client = &ctx.client;
    let ir_window_end = ctx.config.ir_window_end;

    match command {
        Commands::Stats { filters, json } => handle_stats(client, filters, json).await?,
        Commands::Rosters { json } => handle_rosters(client, json).await?,
        Commands::Lineup { team, when, json } => handle_lineup(client, &team, when, json).await?,
        Commands::Matchups { when, json } => handle_matchups(client, when, json).await?,
        Commands::SetLineup {
            team,
            game,
            starters,
            when,
        } => handle_set_lineup(client, &team, &game, &starters, when).await?,
        Commands::DropAdd {
            team,
            drop,
            add,
            json,
        } => {
            let request = TransactionRequest::new(team, Workflow::DropAdd { drop, add });
            handle_transaction(client, ir_window_end, request, json).await?
        }
        Commands::IrPlace {
            team,
            player,
            add,
            json,
        } => {
            let request = TransactionRequest::new(
                team,
                Workflow::PlaceOnIr {
                    injured: player,
                    add,
                },
            );
            handle_transaction(client, ir_window_end, request, json).await?
        }
        Commands::IrRemove {
            team,
            player,
            drop,
            json,
        } => {
            let request = TransactionRequest::new(
                team,
                Workflow::RemoveFromIr {
                    injured: player,
                    drop,
                },
            );
            handle_transaction(client, ir_window_end, request, json).await?
        }
        // handled before the store is opened
        Commands::Import { .. } | Commands::Cache { .. } => {}
    }

    Ok(())
}
