//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use depth_chart::{
    cli::{Commands, DepthChartCli},
    commands::{
        depth_chart::{
            handle_add, handle_backups, handle_chart, handle_clear, handle_players, handle_remove,
            handle_teams,
        },
        import::handle_import,
        CommandContext,
    },
    logging::init_logger,
};

/// Run the CLI.
fn main() -> anyhow::Result<()> {
    let app = DepthChartCli::parse();
    init_logger(app.verbose);

    let ctx = CommandContext::new(app.db.as_deref(), app.config.as_deref())
        .context("failed to open depth chart database")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match app.command {
        Commands::Import { file, json } => handle_import(&ctx, &file, json, &mut out)
            .with_context(|| format!("failed to import {}", file.display()))?,

        Commands::Add { player, rank } => handle_add(
            &ctx,
            player.team,
            &player.position,
            player.number,
            rank,
            &mut out,
        )?,

        Commands::Remove { player } => {
            handle_remove(&ctx, player.team, &player.position, player.number, &mut out)?
        }

        Commands::Backups { player, json } => handle_backups(
            &ctx,
            player.team,
            &player.position,
            player.number,
            json,
            &mut out,
        )?,

        Commands::Chart { team, json } => handle_chart(&ctx, team, json, &mut out)?,

        Commands::Players { team, json } => handle_players(&ctx, team, json, &mut out)?,

        Commands::Teams { json } => handle_teams(&ctx, json, &mut out)?,

        Commands::Clear => handle_clear(&ctx, &mut out)?,
    }

    Ok(())
}
