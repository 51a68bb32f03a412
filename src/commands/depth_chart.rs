//! Depth chart command implementations

use std::io::Write;

use tracing::info;

use super::common::{write_json, write_lines, CommandContext};
use crate::{
    cli::types::{PlayerNumber, Rank, TeamId},
    depth::{chart::player_lines, NO_LIST},
    error::DepthChartError,
    Result,
};

/// Handle the add command
pub fn handle_add(
    ctx: &CommandContext,
    team_id: Option<TeamId>,
    position: &str,
    number: PlayerNumber,
    rank: Option<Rank>,
    out: &mut impl Write,
) -> Result<()> {
    let team_id = ctx.team_id(team_id)?;
    let assignment = ctx.service().add_player(team_id, position, number, rank)?;
    writeln!(out, "{} added to {} at rank {}", number, position, assignment.rank)?;
    Ok(())
}

/// Handle the remove command; prints the removed player or `<NO LIST>`
pub fn handle_remove(
    ctx: &CommandContext,
    team_id: Option<TeamId>,
    position: &str,
    number: PlayerNumber,
    out: &mut impl Write,
) -> Result<()> {
    let team_id = ctx.team_id(team_id)?;
    let removed = ctx.service().remove_player(team_id, position, number)?;
    let lines = match removed {
        Some(player) => vec![player.label()],
        None => vec![NO_LIST.to_string()],
    };
    write_lines(out, &lines)
}

/// Handle the backups command
pub fn handle_backups(
    ctx: &CommandContext,
    team_id: Option<TeamId>,
    position: &str,
    number: PlayerNumber,
    as_json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let team_id = ctx.team_id(team_id)?;
    let backups = ctx.service().backups(team_id, position, number)?;
    if as_json {
        write_json(out, &backups)
    } else {
        write_lines(out, &player_lines(&backups))
    }
}

/// Handle the chart command
pub fn handle_chart(
    ctx: &CommandContext,
    team_id: Option<TeamId>,
    as_json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let team_id = ctx.team_id(team_id)?;
    let chart = ctx.service().full_chart(team_id)?;
    if as_json {
        write_json(out, &chart)
    } else {
        write_lines(out, &chart.lines())
    }
}

/// Handle the players command; prints the roster or `<NO LIST>`
pub fn handle_players(
    ctx: &CommandContext,
    team_id: Option<TeamId>,
    as_json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let team_id = ctx.team_id(team_id)?;
    if ctx.db.get_team(team_id)?.is_none() {
        return Err(DepthChartError::not_found("team", team_id));
    }
    let players = ctx.db.list_players(team_id)?;
    if as_json {
        write_json(out, &players)
    } else {
        write_lines(out, &player_lines(&players))
    }
}

/// Handle the teams command
pub fn handle_teams(ctx: &CommandContext, as_json: bool, out: &mut impl Write) -> Result<()> {
    let teams = ctx.db.list_teams()?;
    if as_json {
        return write_json(out, &teams);
    }
    if teams.is_empty() {
        return write_lines(out, &[NO_LIST.to_string()]);
    }
    let lines: Vec<String> = teams
        .iter()
        .map(|t| format!("{}\t{}", t.team_id, t.name))
        .collect();
    write_lines(out, &lines)
}

/// Handle the clear command
pub fn handle_clear(ctx: &CommandContext, out: &mut impl Write) -> Result<()> {
    ctx.db.clear_all_data()?;
    ctx.locks.clear();
    info!("Cleared all depth chart data");
    writeln!(out, "All data cleared")?;
    Ok(())
}
