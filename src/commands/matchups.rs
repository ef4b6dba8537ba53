//! Matchups command implementation

use serde::Serialize;

use crate::{
    cli::{types::TeamName, WeekArgs},
    league::{LeagueClient, Matchup, Player, PlayerPool, Side},
    lineup::assign_slots,
    scoring::{matchup_score, WeekPoints},
    store::DocumentStore,
    PlayerId, Result, Season, Week,
};

use super::common::{print_json, print_seats, resolve_week, seat_lines, SeatLine};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideReport {
    pub team: TeamName,
    pub seats: Vec<SeatLine>,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupReport {
    pub id: String,
    pub home: SideReport,
    pub away: SideReport,
}

/// Every game of a week with stored starters seated into slots and scored.
pub async fn collect_matchups<S: DocumentStore>(
    client: &LeagueClient<S>,
    season: Season,
    week: Week,
) -> Result<Vec<MatchupReport>> {
    let matchups = client.matchups(season, week).await?;
    let starters: Vec<PlayerId> = matchups
        .iter()
        .flat_map(|m| m.home_starters.iter().chain(m.away_starters.iter()))
        .cloned()
        .collect();

    let pool = client.players_by_ids(&starters).await?;
    let lookup = WeekPoints {
        season,
        week,
        points: client.week_scores(season, week, &starters).await?,
    };

    Ok(matchups
        .iter()
        .map(|m| {
            let score = matchup_score(&lookup, m);
            let report = |side: Side| SideReport {
                team: m.team(side).clone(),
                seats: side_seats(m, side, &pool, &lookup),
                points: score.get(side),
            };
            MatchupReport {
                id: m.id.clone(),
                home: report(Side::Home),
                away: report(Side::Away),
            }
        })
        .collect())
}

fn side_seats(matchup: &Matchup, side: Side, pool: &PlayerPool, lookup: &WeekPoints) -> Vec<SeatLine> {
    let starters = matchup.starters(side);
    let candidates: Vec<&Player> = starters.iter().filter_map(|id| pool.get(id)).collect();
    let assignment = assign_slots(&candidates, Some(starters));
    seat_lines(&assignment, pool, lookup, matchup.season, matchup.week)
}

/// Handle the matchups command
pub async fn handle_matchups<S: DocumentStore>(
    client: &LeagueClient<S>,
    when: WeekArgs,
    as_json: bool,
) -> Result<()> {
    let (season, week) = resolve_week(client, when).await?;
    let reports = collect_matchups(client, season, week).await?;

    if as_json {
        return print_json(&reports);
    }

    if reports.is_empty() {
        println!("No matchups for {} week {}.", season, week);
        return Ok(());
    }

    println!("Matchups for {} week {}", season, week);
    for report in &reports {
        println!();
        println!(
            "[{}] {} {:.2} vs {} {:.2}",
            report.id, report.home.team, report.home.points, report.away.team, report.away.points
        );
        for side in [&report.home, &report.away] {
            println!(" {}:", side.team);
            print_seats(&side.seats);
        }
    }
    Ok(())
}
