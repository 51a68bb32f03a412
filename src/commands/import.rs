//! Bulk import of a sport's teams, rosters and depth charts from JSON
//!
//! Two document shapes are accepted. Nested charts, keyed by `Sport`, list
//! each position's ordered players inline:
//!
//! ```json
//! { "Sport": "NFL", "Teams": [ { "Name": "Tampa Bay Buccaneers",
//!   "Positions": [ { "Name": "QB", "Orders": [
//!     { "SeqNumber": 0, "PlayerDetails": { "Name": "Tom Brady", "Number": 12, "Odds": "+500" } }
//!   ] } ] } ] }
//! ```
//!
//! Team rosters, keyed by `Name`, carry the full roster (bench players
//! included) and a flat list of orders by position name:
//!
//! ```json
//! { "Name": "NFL", "Teams": [ { "Name": "Tampa Bay Buccaneers",
//!   "Positions": [ { "Name": "QB" } ],
//!   "Players": [ { "PlayerNumber": 12, "Name": "Tom Brady", "Odds": "+500" } ],
//!   "Orders": [ { "SeqNumber": 0, "PositionName": "QB", "PlayerNumber": 12 } ] } ] }
//! ```
//!
//! The whole document is checked before anything is written.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::common::{write_json, write_lines, CommandContext};
use crate::{
    cli::types::{PlayerNumber, Rank, SportId, TeamId},
    depth::{DuplicatePolicy, EntityResolver, PositionLocks, RankingEngine},
    error::DepthChartError,
    storage::DepthChartDatabase,
    Result,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct DepthChartDocument {
    pub sport: String,
    #[serde(default)]
    pub teams: Vec<TeamDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct TeamDocument {
    pub name: String,
    #[serde(default)]
    pub positions: Vec<PositionDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct PositionDocument {
    pub name: String,
    #[serde(default)]
    pub orders: Vec<OrderDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct OrderDocument {
    pub seq_number: Option<u32>,
    pub player_details: PlayerDocument,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct PlayerDocument {
    pub name: String,
    pub number: u32,
    pub odds: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct SportDocument {
    pub name: String,
    #[serde(default)]
    pub teams: Vec<RosterTeamDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct RosterTeamDocument {
    pub name: String,
    #[serde(default)]
    pub positions: Vec<PositionNameDocument>,
    #[serde(default)]
    pub players: Vec<RosterPlayerDocument>,
    #[serde(default)]
    pub orders: Vec<RosterOrderDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct PositionNameDocument {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct RosterPlayerDocument {
    pub player_number: u32,
    pub name: String,
    pub odds: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct RosterOrderDocument {
    pub seq_number: Option<u32>,
    pub position_name: String,
    pub player_number: u32,
}

/// A parsed import document in either accepted shape
#[derive(Debug, Clone)]
pub enum ImportDocument {
    /// Positions carry their ordered players inline
    Nested(DepthChartDocument),
    /// Teams carry a roster and orders keyed by position name
    Roster(SportDocument),
}

impl ImportDocument {
    pub fn sport(&self) -> &str {
        match self {
            ImportDocument::Nested(doc) => &doc.sport,
            ImportDocument::Roster(doc) => &doc.name,
        }
    }

    pub fn team_names(&self) -> Vec<&str> {
        match self {
            ImportDocument::Nested(doc) => doc.teams.iter().map(|t| t.name.as_str()).collect(),
            ImportDocument::Roster(doc) => doc.teams.iter().map(|t| t.name.as_str()).collect(),
        }
    }

    /// Reject documents that would fail or lose data part way through an
    /// import. Duplicate placements are only an error under
    /// [`DuplicatePolicy::Reject`].
    pub fn validate(&self, policy: DuplicatePolicy) -> Result<()> {
        let mut teams = HashSet::new();
        for name in self.team_names() {
            if !teams.insert(name) {
                return Err(import_error(format!("team {} listed twice", name)));
            }
        }

        match self {
            ImportDocument::Nested(doc) => doc
                .teams
                .iter()
                .try_for_each(|team| validate_nested_team(team, policy)),
            ImportDocument::Roster(doc) => doc
                .teams
                .iter()
                .try_for_each(|team| validate_roster_team(team, policy)),
        }
    }
}

fn import_error(message: impl Into<String>) -> DepthChartError {
    DepthChartError::Import {
        message: message.into(),
    }
}

fn validate_nested_team(team: &TeamDocument, policy: DuplicatePolicy) -> Result<()> {
    let mut positions = HashSet::new();
    let mut names: HashMap<u32, &str> = HashMap::new();

    for position in &team.positions {
        if !positions.insert(position.name.as_str()) {
            return Err(import_error(format!(
                "team {}: position {} listed twice",
                team.name, position.name
            )));
        }

        let mut placed = HashSet::new();
        for order in &position.orders {
            let details = &order.player_details;
            if let Some(previous) = names.insert(details.number, details.name.as_str()) {
                if previous != details.name {
                    return Err(import_error(format!(
                        "team {}: #{} is both {} and {}",
                        team.name, details.number, previous, details.name
                    )));
                }
            }
            if !placed.insert(details.number) && policy == DuplicatePolicy::Reject {
                return Err(import_error(format!(
                    "team {}: #{} ordered twice at {}",
                    team.name, details.number, position.name
                )));
            }
        }
    }
    Ok(())
}

fn validate_roster_team(team: &RosterTeamDocument, policy: DuplicatePolicy) -> Result<()> {
    let mut positions = HashSet::new();
    for position in &team.positions {
        if !positions.insert(position.name.as_str()) {
            return Err(import_error(format!(
                "team {}: position {} listed twice",
                team.name, position.name
            )));
        }
    }

    let mut numbers = HashSet::new();
    for player in &team.players {
        if !numbers.insert(player.player_number) {
            return Err(import_error(format!(
                "team {}: #{} listed twice",
                team.name, player.player_number
            )));
        }
    }

    let mut placed = HashSet::new();
    for order in &team.orders {
        if !positions.contains(order.position_name.as_str()) {
            return Err(import_error(format!(
                "team {}: order for unknown position {}",
                team.name, order.position_name
            )));
        }
        if !numbers.contains(&order.player_number) {
            return Err(import_error(format!(
                "team {}: order for #{} who is not on the roster",
                team.name, order.player_number
            )));
        }
        let key = (order.position_name.as_str(), order.player_number);
        if !placed.insert(key) && policy == DuplicatePolicy::Reject {
            return Err(import_error(format!(
                "team {}: #{} ordered twice at {}",
                team.name, order.player_number, order.position_name
            )));
        }
    }
    Ok(())
}

/// What an import created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub teams: Vec<TeamId>,
    pub positions: usize,
    pub players: usize,
    pub assignments: usize,
}

impl ImportSummary {
    pub fn lines(&self) -> Vec<String> {
        let team_ids = self
            .teams
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        vec![
            format!("Imported {} teams (ids: {})", self.teams.len(), team_ids),
            format!("Positions created: {}", self.positions),
            format!("Players created: {}", self.players),
            format!("Depth chart entries: {}", self.assignments),
        ]
    }
}

/// Parse an import document, picking the shape from its top-level key.
/// Blank input and unknown fields are rejected.
pub fn parse_document(contents: &str) -> Result<ImportDocument> {
    if contents.trim().is_empty() {
        return Err(import_error("input is empty"));
    }

    let value: serde_json::Value = serde_json::from_str(contents)?;
    if value.get("Sport").is_some() {
        Ok(ImportDocument::Nested(serde_json::from_value(value)?))
    } else if value.get("Name").is_some() {
        Ok(ImportDocument::Roster(serde_json::from_value(value)?))
    } else {
        Err(import_error(
            "expected a Sport key (nested charts) or a Name key (team rosters)",
        ))
    }
}

/// Create the sport, its teams, positions and players, then place every
/// order on the depth chart through the ranking engine.
///
/// Orders are placed in ascending `SeqNumber` order so each lands on its
/// requested rank; an order without a number is appended. Fails before
/// writing anything when the document is invalid or one of its teams is
/// already in the store.
pub fn import_depth_chart(
    db: &DepthChartDatabase,
    locks: &PositionLocks,
    policy: DuplicatePolicy,
    document: &ImportDocument,
) -> Result<ImportSummary> {
    document.validate(policy)?;
    let existing = db.list_teams()?;
    if let Some(name) = document
        .team_names()
        .into_iter()
        .find(|name| existing.iter().any(|team| team.name == *name))
    {
        return Err(import_error(format!("team {} is already in the store", name)));
    }

    let engine = RankingEngine::new(db, locks).with_duplicate_policy(policy);
    let mut summary = ImportSummary::default();

    let sport_id = db.insert_sport(document.sport())?;
    debug!("Created sport {} ({})", document.sport(), sport_id);

    match document {
        ImportDocument::Nested(doc) => {
            for team in &doc.teams {
                import_nested_team(db, &engine, sport_id, team, &mut summary)?;
            }
        }
        ImportDocument::Roster(doc) => {
            for team in &doc.teams {
                import_roster_team(db, &engine, sport_id, team, &mut summary)?;
            }
        }
    }

    Ok(summary)
}

fn import_nested_team(
    db: &DepthChartDatabase,
    engine: &RankingEngine<'_, DepthChartDatabase>,
    sport_id: SportId,
    team: &TeamDocument,
    summary: &mut ImportSummary,
) -> Result<()> {
    let team_id = db.insert_team(sport_id, &team.name)?;
    summary.teams.push(team_id);

    for position in &team.positions {
        let (position_id, created) = db.find_or_insert_position(team_id, &position.name)?;
        summary.positions += usize::from(created);

        let mut orders: Vec<&OrderDocument> = position.orders.iter().collect();
        orders.sort_by_key(|o| o.seq_number.unwrap_or(u32::MAX));

        for order in orders {
            let details = &order.player_details;
            let (player_id, created) = db.find_or_insert_player(
                team_id,
                PlayerNumber::new(details.number),
                &details.name,
                details.odds.as_deref(),
            )?;
            summary.players += usize::from(created);

            engine.insert(position_id, player_id, order.seq_number.map(Rank::new))?;
            summary.assignments += 1;
        }
    }

    info!("Imported team {} ({})", team.name, team_id);
    Ok(())
}

fn import_roster_team(
    db: &DepthChartDatabase,
    engine: &RankingEngine<'_, DepthChartDatabase>,
    sport_id: SportId,
    team: &RosterTeamDocument,
    summary: &mut ImportSummary,
) -> Result<()> {
    let team_id = db.insert_team(sport_id, &team.name)?;
    summary.teams.push(team_id);

    for position in &team.positions {
        let (_, created) = db.find_or_insert_position(team_id, &position.name)?;
        summary.positions += usize::from(created);
    }

    for player in &team.players {
        let (_, created) = db.find_or_insert_player(
            team_id,
            PlayerNumber::new(player.player_number),
            &player.name,
            player.odds.as_deref(),
        )?;
        summary.players += usize::from(created);
    }

    let mut orders: Vec<&RosterOrderDocument> = team.orders.iter().collect();
    orders.sort_by_key(|o| o.seq_number.unwrap_or(u32::MAX));

    for order in orders {
        let number = PlayerNumber::new(order.player_number);
        let position_id = db
            .resolve_position(team_id, &order.position_name)?
            .ok_or_else(|| DepthChartError::not_found("position", &order.position_name))?;
        let player_id = db
            .resolve_player(team_id, number)?
            .ok_or_else(|| DepthChartError::not_found("player", number))?;

        engine.insert(position_id, player_id, order.seq_number.map(Rank::new))?;
        summary.assignments += 1;
    }

    info!(
        "Imported team {} ({}) with {} players on its roster",
        team.name,
        team_id,
        team.players.len()
    );
    Ok(())
}

/// Handle the import command
pub fn handle_import(
    ctx: &CommandContext,
    file: &Path,
    as_json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let contents = std::fs::read_to_string(file)?;
    let document = parse_document(&contents)?;
    let summary = import_depth_chart(&ctx.db, &ctx.locks, ctx.config.duplicate_policy, &document)?;

    if as_json {
        write_json(out, &summary)
    } else {
        write_lines(out, &summary.lines())
    }
}
