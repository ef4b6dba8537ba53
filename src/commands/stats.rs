//! Player statistics command implementation

use crate::{
    cli::{types::WeekSelection, StatsFilters},
    league::LeagueClient,
    scoring::{summarize_players, PlayerSummary, StatsQuery},
    store::DocumentStore,
    Result,
};

use super::common::{clip, print_json};

/// Summaries for every player matching `filters`, best first.
pub async fn collect_stats<S: DocumentStore>(
    client: &LeagueClient<S>,
    filters: StatsFilters,
) -> Result<Vec<PlayerSummary>> {
    let today = client.current_date().await?;
    let season = filters.season.unwrap_or(today.year);
    let view_week = match filters.week {
        WeekSelection::Single(week) => week,
        WeekSelection::All => today.week,
    };

    let pool = client.players(season, view_week).await?;
    let ownership = client.ownership().await?;
    let query = StatsQuery {
        season,
        weeks: filters.week,
        positions: filters.positions,
        nfl_teams: filters.nfl_teams,
        owners: filters.owners,
        name: filters.name,
        sort: filters.sort,
    };
    Ok(summarize_players(&pool, &ownership, &query))
}

/// Handle the stats command
pub async fn handle_stats<S: DocumentStore>(
    client: &LeagueClient<S>,
    filters: StatsFilters,
    as_json: bool,
) -> Result<()> {
    let weeks = filters.week;
    let rows = collect_stats(client, filters).await?;

    if as_json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("No players match the given filters.");
        return Ok(());
    }

    println!("Player stats (weeks: {})", weeks);
    println!(
        "{:<24} {:<4} {:<5} {:<20} {:>8} {:>8} {:>5}",
        "Name", "Pos", "Team", "Owner", "Total", "Avg", "Wks"
    );
    println!(
        "{:<24} {:<4} {:<5} {:<20} {:>8} {:>8} {:>5}",
        "----", "---", "----", "-----", "-----", "---", "---"
    );
    for row in &rows {
        println!(
            "{:<24} {:<4} {:<5} {:<20} {:>8.2} {:>8.2} {:>5}",
            clip(&row.name, 24),
            row.position,
            row.team.as_deref().unwrap_or("-"),
            clip(&row.owner, 20),
            row.summary.total,
            row.summary.average,
            row.summary.weeks,
        );
    }
    Ok(())
}
