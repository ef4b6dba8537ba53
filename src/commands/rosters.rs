//! Rosters command implementation

use serde::Serialize;
use std::collections::BTreeMap;

use crate::{
    cli::types::TeamName,
    league::{LeagueClient, Player},
    store::DocumentStore,
    Result,
};

use super::common::{clip, print_json};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub position: String,
    pub team: Option<String>,
}

impl From<&Player> for RosterEntry {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.to_string(),
            name: player.name.clone(),
            position: player.position.to_string(),
            team: player.team.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRoster {
    pub name: TeamName,
    pub waivers: u32,
    /// Ordered QB, RB, WR, TE, K, DST; roster order within a position.
    pub players: Vec<RosterEntry>,
    pub injured_reserve: Vec<RosterEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivisionRosters {
    pub division: String,
    pub teams: Vec<TeamRoster>,
}

/// Every team's roster grouped by division, divisions and teams sorted by name.
pub async fn collect_rosters<S: DocumentStore>(
    client: &LeagueClient<S>,
) -> Result<Vec<DivisionRosters>> {
    let mut divisions: BTreeMap<String, Vec<TeamRoster>> = BTreeMap::new();

    for team in client.teams().await? {
        let mut players = client.team_players(&team.name).await?;
        players.sort_by_key(|p| p.position);

        let ir = client.players_by_ids(&team.ir_list).await?;
        let injured_reserve = team
            .ir_list
            .iter()
            .filter_map(|id| ir.get(id))
            .map(RosterEntry::from)
            .collect();

        divisions
            .entry(team.division.clone())
            .or_default()
            .push(TeamRoster {
                name: team.name,
                waivers: team.waivers,
                players: players.iter().map(RosterEntry::from).collect(),
                injured_reserve,
            });
    }

    Ok(divisions
        .into_iter()
        .map(|(division, mut teams)| {
            teams.sort_by(|a, b| a.name.cmp(&b.name));
            DivisionRosters { division, teams }
        })
        .collect())
}

/// Handle the rosters command
pub async fn handle_rosters<S: DocumentStore>(client: &LeagueClient<S>, as_json: bool) -> Result<()> {
    let divisions = collect_rosters(client).await?;

    if as_json {
        return print_json(&divisions);
    }

    for division in &divisions {
        println!("== {} division ==", division.division);
        for team in &division.teams {
            println!("{} (waivers: {})", team.name, team.waivers);
            for player in &team.players {
                println!(
                    "  {:<4} {:<24} {}",
                    player.position,
                    clip(&player.name, 24),
                    player.team.as_deref().unwrap_or("")
                );
            }
            for player in &team.injured_reserve {
                println!("  {:<4} {:<24} [IR]", player.position, clip(&player.name, 24));
            }
        }
        println!();
    }
    Ok(())
}
