//! Typed, cache-fronted access to league documents.
//!
//! Reads go through the `CacheLayer` and fall back to the store on a miss.
//! The `fetch_*` methods skip the cache entirely and are what transaction
//! validation uses to see authoritative state.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

use super::models::{FantasyTeam, Matchup, Player};
use super::ownership::OwnershipIndex;
use crate::cli::types::{LeagueDate, PlayerId, Season, TeamName, UserId, Week};
use crate::core::{
    CacheChange, CacheLayer, CurrentDateKey, MatchupsKey, PlayersKey, RostersKey, ScoresKey,
};
use crate::error::{LeagueError, Result, ValidationFailure};
use crate::lineup::assign_slots;
use crate::store::{paths, DefenseDoc, DocumentStore, FantasyTeamDoc, MatchupDoc, PlayerDoc};

/// Every player and defense unit keyed by ID.
pub type PlayerPool = HashMap<PlayerId, Player>;

pub struct LeagueClient<S> {
    store: S,
    cache: Arc<CacheLayer>,
    user: UserId,
    /// Shared by every reader; replaced wholesale when a transaction commits.
    ownership: RwLock<Option<Arc<OwnershipIndex>>>,
}

impl<S: DocumentStore> LeagueClient<S> {
    pub fn new(store: S, cache: Arc<CacheLayer>, user: UserId) -> Self {
        Self {
            store,
            cache,
            user,
            ownership: RwLock::new(None),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &Arc<CacheLayer> {
        &self.cache
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// The league's current year and week.
    pub async fn current_date(&self) -> Result<LeagueDate> {
        if let Some(date) = self.cache.read::<LeagueDate>(&CurrentDateKey) {
            return Ok(date);
        }

        let doc = self
            .store
            .get(paths::CURRENT_DATE)
            .await?
            .ok_or_else(|| LeagueError::NotFound {
                path: paths::CURRENT_DATE.to_string(),
            })?;
        let date: LeagueDate = serde_json::from_value(doc)?;
        self.cache.write(&CurrentDateKey, &date);
        Ok(date)
    }

    /// All players and defenses, as loaded for a season/week view.
    pub async fn players(&self, season: Season, week: Week) -> Result<PlayerPool> {
        let key = PlayersKey {
            user: self.user.clone(),
            season,
            week,
        };
        if let Some(players) = self.cache.read::<Vec<Player>>(&key) {
            return Ok(into_pool(players));
        }

        let mut players = Vec::new();
        for doc in self.store.list(paths::PLAYERS).await? {
            let parsed: PlayerDoc = serde_json::from_value(doc.data)?;
            players.push(Player::from_doc(PlayerId::new(doc.id), parsed));
        }
        for doc in self.store.list(paths::DEFENSE).await? {
            let parsed: DefenseDoc = serde_json::from_value(doc.data)?;
            players.push(Player::from_defense(PlayerId::new(doc.id), parsed));
        }
        debug!(count = players.len(), "loaded player pool from store");

        self.cache.write(&key, &players);
        Ok(into_pool(players))
    }

    /// Look up specific players; IDs with no document are left out.
    pub async fn players_by_ids(&self, ids: &[PlayerId]) -> Result<PlayerPool> {
        let mut pool = PlayerPool::with_capacity(ids.len());
        for id in ids {
            if pool.contains_key(id) {
                continue;
            }
            if let Some(player) = self.fetch_player(id).await? {
                pool.insert(id.clone(), player);
            }
        }
        Ok(pool)
    }

    /// One week's points for the given players, cached per user and week.
    pub async fn week_scores(
        &self,
        season: Season,
        week: Week,
        ids: &[PlayerId],
    ) -> Result<HashMap<PlayerId, f64>> {
        let key = ScoresKey {
            user: self.user.clone(),
            season,
            week,
        };
        let mut scores: HashMap<PlayerId, f64> = self.cache.read(&key).unwrap_or_default();

        let missing: Vec<PlayerId> = ids
            .iter()
            .filter(|id| !scores.contains_key(*id))
            .cloned()
            .collect();
        if missing.is_empty() {
            return Ok(scores);
        }

        let fetched = self.players_by_ids(&missing).await?;
        for id in missing {
            let points = fetched
                .get(&id)
                .map(|p| p.scoring.week_points(season, week))
                .unwrap_or(0.0);
            scores.insert(id, points);
        }
        self.cache.write(&key, &scores);
        Ok(scores)
    }

    /// Every fantasy team.
    pub async fn teams(&self) -> Result<Vec<FantasyTeam>> {
        let key = RostersKey {
            user: self.user.clone(),
            team: None,
        };
        if let Some(teams) = self.cache.read::<Vec<FantasyTeam>>(&key) {
            return Ok(teams);
        }

        let teams = self.fetch_teams().await?;
        self.cache.write(&key, &teams);
        Ok(teams)
    }

    /// One team from the cached team list.
    pub async fn team(&self, name: &TeamName) -> Result<FantasyTeam> {
        self.teams()
            .await?
            .into_iter()
            .find(|team| &team.name == name)
            .ok_or_else(|| {
                ValidationFailure::TeamNotFound {
                    team: name.clone(),
                }
                .into()
            })
    }

    /// The players on a team's roster, in roster order.
    pub async fn team_players(&self, name: &TeamName) -> Result<Vec<Player>> {
        let key = RostersKey {
            user: self.user.clone(),
            team: Some(name.clone()),
        };
        if let Some(players) = self.cache.read::<Vec<Player>>(&key) {
            return Ok(players);
        }

        let team = self.team(name).await?;
        let mut pool = self.players_by_ids(&team.roster).await?;
        let players: Vec<Player> = team
            .roster
            .iter()
            .filter_map(|id| pool.remove(id))
            .collect();

        self.cache.write(&key, &players);
        Ok(players)
    }

    /// Who owns whom.
    ///
    /// Built once from the cached rosters, then kept until a commit replaces
    /// it or a conflict discards it.
    pub async fn ownership(&self) -> Result<Arc<OwnershipIndex>> {
        if let Some(index) = self.current_ownership() {
            return Ok(index);
        }
        let index = OwnershipIndex::build(&self.teams().await?);
        Ok(self.replace_ownership(index))
    }

    /// Install a freshly derived index, e.g. after a committed transaction.
    pub fn replace_ownership(&self, index: OwnershipIndex) -> Arc<OwnershipIndex> {
        let index = Arc::new(index);
        if let Ok(mut slot) = self.ownership.write() {
            *slot = Some(index.clone());
        }
        debug!(owned = index.len(), "ownership index replaced");
        index
    }

    /// Drop the index so the next read rebuilds it from rosters.
    pub fn forget_ownership(&self) {
        if let Ok(mut slot) = self.ownership.write() {
            *slot = None;
        }
    }

    fn current_ownership(&self) -> Option<Arc<OwnershipIndex>> {
        self.ownership.read().ok().and_then(|slot| slot.clone())
    }

    /// All games of one week, ordered by game ID.
    pub async fn matchups(&self, season: Season, week: Week) -> Result<Vec<Matchup>> {
        let today = self.current_date().await?;
        let key = MatchupsKey {
            user: self.user.clone(),
            season,
            week,
            is_past_week: today.is_past(season, week),
        };
        if let Some(matchups) = self.cache.read::<Vec<Matchup>>(&key) {
            return Ok(matchups);
        }

        let mut matchups = Vec::new();
        for doc in self.store.list(&paths::games(season, week)).await? {
            let parsed: MatchupDoc = serde_json::from_value(doc.data)?;
            matchups.push(Matchup::from_doc(doc.id, season, week, parsed));
        }
        matchups.sort_by(|a, b| a.id.cmp(&b.id));

        self.cache.write(&key, &matchups);
        Ok(matchups)
    }

    /// Save one team's starters for a game.
    ///
    /// Starters must all be on the team's roster. They are normalized through
    /// slot assignment before saving, so the stored list always satisfies
    /// slot capacity and eligibility. Returns the starters as stored.
    pub async fn save_starters(
        &self,
        season: Season,
        week: Week,
        game_id: &str,
        team: &TeamName,
        starters: &[PlayerId],
    ) -> Result<Vec<PlayerId>> {
        let path = paths::game(season, week, game_id);
        let doc = self
            .store
            .get(&path)
            .await?
            .ok_or_else(|| LeagueError::NotFound { path: path.clone() })?;
        let matchup = Matchup::from_doc(
            game_id.to_string(),
            season,
            week,
            serde_json::from_value(doc)?,
        );
        let side = matchup
            .side_of(team)
            .ok_or_else(|| ValidationFailure::TeamNotInMatchup {
                team: team.clone(),
                game: game_id.to_string(),
            })?;

        let roster = self.team(team).await?;
        if let Some(outsider) = starters.iter().find(|id| !roster.has_on_roster(id)) {
            return Err(ValidationFailure::StarterNotRostered {
                team: team.clone(),
                player: outsider.clone(),
            }
            .into());
        }

        let players = self.team_players(team).await?;
        let stored = assign_slots(&players, Some(starters)).starters();
        let bench: Vec<&PlayerId> = roster
            .roster
            .iter()
            .filter(|id| !stored.contains(id))
            .collect();

        let mut fields = Map::new();
        fields.insert(side.starters_field().to_string(), serde_json::to_value(&stored)?);
        fields.insert(side.bench_field().to_string(), serde_json::to_value(&bench)?);
        self.store.update_fields(&path, fields).await?;

        info!(team = %team, game = game_id, starters = stored.len(), "saved starters");
        self.cache
            .invalidate_on_change(&self.user, CacheChange::LineupChange { season, week });
        Ok(stored)
    }

    /// A player or defense straight from the store.
    pub async fn fetch_player(&self, id: &PlayerId) -> Result<Option<Player>> {
        let Some(doc) = self.store.get(&paths::player(id)).await? else {
            return Ok(None);
        };
        let player = if id.is_defense() {
            Player::from_defense(id.clone(), serde_json::from_value::<DefenseDoc>(doc)?)
        } else {
            Player::from_doc(id.clone(), serde_json::from_value::<PlayerDoc>(doc)?)
        };
        Ok(Some(player))
    }

    /// A team straight from the store.
    pub async fn fetch_team(&self, name: &TeamName) -> Result<Option<FantasyTeam>> {
        match self.store.get(&paths::fantasy_team(name)).await? {
            Some(doc) => Ok(Some(parse_team(name.as_str(), doc)?)),
            None => Ok(None),
        }
    }

    /// Every team straight from the store.
    pub async fn fetch_teams(&self) -> Result<Vec<FantasyTeam>> {
        self.store
            .list(paths::FANTASY_TEAMS)
            .await?
            .into_iter()
            .map(|doc| parse_team(&doc.id, doc.data))
            .collect()
    }
}

fn parse_team(name: &str, doc: Value) -> Result<FantasyTeam> {
    let parsed: FantasyTeamDoc = serde_json::from_value(doc)?;
    Ok(FantasyTeam::from_doc(TeamName::new(name), parsed))
}

fn into_pool(players: Vec<Player>) -> PlayerPool {
    players.into_iter().map(|p| (p.id.clone(), p)).collect()
}
