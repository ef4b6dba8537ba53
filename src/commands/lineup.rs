//! Lineup display and lineup save commands

use serde::Serialize;

use crate::{
    cli::{types::TeamName, WeekArgs},
    league::{LeagueClient, PlayerPool},
    lineup::assign_slots,
    scoring::assignment_points,
    store::DocumentStore,
    PlayerId, Result, Season, Week,
};

use super::common::{print_json, print_seats, resolve_week, seat_lines, PlayerLine, SeatLine};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupReport {
    pub team: TeamName,
    pub season: Season,
    pub week: Week,
    pub seats: Vec<SeatLine>,
    pub bench: Vec<PlayerLine>,
    pub total: f64,
}

/// The lineup slot assignment seats from roster order, scored for one week.
pub async fn collect_lineup<S: DocumentStore>(
    client: &LeagueClient<S>,
    team: &TeamName,
    season: Season,
    week: Week,
) -> Result<LineupReport> {
    let players = client.team_players(team).await?;
    let assignment = assign_slots(&players, None);
    let bench = assignment
        .bench(&players)
        .into_iter()
        .map(|p| PlayerLine::new(p, p.scoring.week_points(season, week)))
        .collect();

    let pool: PlayerPool = players.iter().map(|p| (p.id.clone(), p.clone())).collect();
    Ok(LineupReport {
        team: team.clone(),
        season,
        week,
        seats: seat_lines(&assignment, &pool, &pool, season, week),
        bench,
        total: assignment_points(&pool, &assignment, season, week),
    })
}

/// Handle the lineup command
pub async fn handle_lineup<S: DocumentStore>(
    client: &LeagueClient<S>,
    team: &TeamName,
    when: WeekArgs,
    as_json: bool,
) -> Result<()> {
    let (season, week) = resolve_week(client, when).await?;
    let report = collect_lineup(client, team, season, week).await?;

    if as_json {
        return print_json(&report);
    }

    println!("{} lineup, {} week {}", report.team, report.season, report.week);
    print_seats(&report.seats);
    if !report.bench.is_empty() {
        println!("  Bench:");
        for p in &report.bench {
            println!("  {:<5} {:<24} {:<4} {:>7.2}", "BN", p.name, p.position, p.points);
        }
    }
    println!("Total: {:.2}", report.total);
    Ok(())
}

/// Handle the set-lineup command
pub async fn handle_set_lineup<S: DocumentStore>(
    client: &LeagueClient<S>,
    team: &TeamName,
    game: &str,
    starters: &[PlayerId],
    when: WeekArgs,
) -> Result<()> {
    let (season, week) = resolve_week(client, when).await?;
    let stored = client
        .save_starters(season, week, game, team, starters)
        .await?;

    let dropped = starters.iter().filter(|id| !stored.contains(id)).count();
    println!(
        "✓ Saved {} starters for {} in game {} (week {})",
        stored.len(),
        team,
        game,
        week
    );
    if dropped > 0 {
        println!("  {} player(s) did not fit a lineup slot and stay on the bench", dropped);
    }
    Ok(())
}

