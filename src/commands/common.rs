//! Common utilities and helper functions shared across commands.

use serde::Serialize;

use crate::{
    cli::{types::SlotKind, WeekArgs},
    config::Config,
    league::{LeagueClient, Player, PlayerPool},
    lineup::Assignment,
    scoring::ScoreLookup,
    store::{AnyStore, DocumentStore},
    PlayerId, Position, Result, Season, Week,
};

/// Resources needed by most commands
pub struct CommandContext {
    pub config: Config,
    pub client: LeagueClient<AnyStore>,
}

impl CommandContext {
    /// Open the configured store and cache for the configured user
    pub fn new(config: Config) -> Result<Self> {
        let store = config.open_store()?;
        let cache = config.build_cache();
        let client = LeagueClient::new(store, cache, config.user.clone());
        Ok(Self { config, client })
    }
}

/// Fill in a missing season or week from the league's current date.
pub async fn resolve_week<S: DocumentStore>(
    client: &LeagueClient<S>,
    when: WeekArgs,
) -> Result<(Season, Week)> {
    if let (Some(season), Some(week)) = (when.season, when.week) {
        return Ok((season, week));
    }
    let today = client.current_date().await?;
    Ok((
        when.season.unwrap_or(today.year),
        when.week.unwrap_or(today.week),
    ))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Clip a name to a table column.
pub fn clip(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}

/// A player as shown in lineup and roster output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerLine {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub team: Option<String>,
    pub points: f64,
}

impl PlayerLine {
    pub fn new(player: &Player, points: f64) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            position: player.position,
            team: player.team.clone(),
            points,
        }
    }
}

/// One lineup seat and its occupant, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatLine {
    pub slot: SlotKind,
    pub player: Option<PlayerLine>,
}

/// Seats in fill order with each occupant's points for the week.
pub fn seat_lines(
    assignment: &Assignment,
    pool: &PlayerPool,
    lookup: &impl ScoreLookup,
    season: Season,
    week: Week,
) -> Vec<SeatLine> {
    assignment
        .iter()
        .map(|(slot, _, occupant)| SeatLine {
            slot,
            player: occupant
                .and_then(|id| pool.get(id))
                .map(|p| PlayerLine::new(p, lookup.week_points(&p.id, season, week))),
        })
        .collect()
}

pub fn print_seats(seats: &[SeatLine]) {
    for seat in seats {
        match &seat.player {
            Some(p) => println!(
                "  {:<5} {:<24} {:<4} {:>7.2}",
                seat.slot.as_str(),
                clip(&p.name, 24),
                p.position,
                p.points
            ),
            None => println!("  {:<5} {:<24}", seat.slot.as_str(), "(empty)"),
        }
    }
}
