//! Cache keys, data classes, and the versioned entry format
//!
//! Every cached payload belongs to one data class with its own TTL. Keys are
//! deterministic strings built from the class prefix, the acting user, and
//! any season/week scope:
//!
//! ```text
//! ff_players_{user}_{year}_{week}
//! ff_matchups_{user}_{year}_{week}
//! ff_rosters_{user}[_{team}]
//! ff_scores_{user}_{year}_{week}
//! ff_current_date_
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fmt, fs,
    io::{Read, Write},
    path::Path,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use crate::cli::types::{Season, TeamName, UserId, Week};

/// Bumped whenever cached payload shapes change; older entries read as misses.
pub const CACHE_VERSION: &str = "1.0.0";

/// Shared prefix of every key this crate writes.
pub const KEY_PREFIX: &str = "ff_";

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Current Unix time in milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Kinds of data the cache holds, each with its own TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataClass {
    Players,
    Matchups,
    Rosters,
    Scores,
    CurrentDate,
}

impl DataClass {
    pub const ALL: [DataClass; 5] = [
        DataClass::Players,
        DataClass::Matchups,
        DataClass::Rosters,
        DataClass::Scores,
        DataClass::CurrentDate,
    ];

    /// Classes dropped when a roster-changing transaction lands.
    pub const ROSTER_AFFECTED: [DataClass; 4] = [
        DataClass::Players,
        DataClass::Rosters,
        DataClass::Scores,
        DataClass::Matchups,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            DataClass::Players => "ff_players_",
            DataClass::Matchups => "ff_matchups_",
            DataClass::Rosters => "ff_rosters_",
            DataClass::Scores => "ff_scores_",
            DataClass::CurrentDate => "ff_current_date_",
        }
    }

    /// The league date is shared by every user on the device.
    pub fn is_user_scoped(&self) -> bool {
        !matches!(self, DataClass::CurrentDate)
    }

    pub fn of_key(key: &str) -> Option<DataClass> {
        Self::ALL
            .into_iter()
            .find(|class| key.starts_with(class.prefix()))
    }

    /// True when `key` is this class's entry (or one of them) for `user`.
    pub fn owns_key(&self, key: &str, user: &UserId) -> bool {
        if !self.is_user_scoped() {
            return key.starts_with(self.prefix());
        }
        let stem = format!("{}{}", self.prefix(), user.cache_segment());
        key == stem || key.starts_with(&format!("{stem}_"))
    }
}

impl fmt::Display for DataClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataClass::Players => "players",
            DataClass::Matchups => "matchups",
            DataClass::Rosters => "rosters",
            DataClass::Scores => "scores",
            DataClass::CurrentDate => "current_date",
        };
        write!(f, "{}", s)
    }
}

/// Time-to-live per data class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheTtls {
    pub players: Duration,
    /// Applies to the league's current week only; past weeks never expire.
    pub matchups: Duration,
    pub rosters: Duration,
    pub scores: Duration,
    pub current_date: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            players: Duration::from_secs(24 * 60 * 60),
            matchups: Duration::from_secs(30 * 60),
            rosters: Duration::from_secs(60 * 60),
            scores: Duration::from_secs(15 * 60),
            current_date: Duration::from_secs(60 * 60),
        }
    }
}

impl CacheTtls {
    pub fn for_class(&self, class: DataClass) -> Duration {
        match class {
            DataClass::Players => self.players,
            DataClass::Matchups => self.matchups,
            DataClass::Rosters => self.rosters,
            DataClass::Scores => self.scores,
            DataClass::CurrentDate => self.current_date,
        }
    }
}

/// Stored form of one cached payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: Value,
    /// Write time, Unix milliseconds.
    pub timestamp: u64,
    pub version: String,
    /// Class TTL stamped at write time; `None` never expires.
    #[serde(rename = "maxAge", default)]
    pub max_age_ms: Option<u64>,
}

impl CacheEntry {
    pub fn new(data: Value, ttl: Option<Duration>) -> Self {
        Self {
            data,
            timestamp: now_ms(),
            version: CACHE_VERSION.to_string(),
            max_age_ms: ttl.map(|ttl| ttl.as_millis() as u64),
        }
    }

    pub fn is_current_version(&self) -> bool {
        self.version == CACHE_VERSION
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        match self.max_age_ms {
            Some(max_age) => now.saturating_sub(self.timestamp) > max_age,
            None => false,
        }
    }

    /// Usable only when written by this schema version and still within TTL.
    pub fn is_valid_at(&self, now: u64) -> bool {
        self.is_current_version() && !self.is_expired_at(now)
    }
}

/// A deterministic cache key for one data class.
pub trait CacheKey {
    fn class(&self) -> DataClass;

    /// String form used as the backend key (and file stem).
    fn to_file_key(&self) -> String;

    /// TTL for an entry written under this key.
    fn ttl(&self, ttls: &CacheTtls) -> Option<Duration> {
        Some(ttls.for_class(self.class()))
    }
}

fn scoped_key(class: DataClass, user: &UserId, season: Season, week: Week) -> String {
    format!(
        "{}{}_{}_{}",
        class.prefix(),
        user.cache_segment(),
        season.as_u16(),
        week.as_u16()
    )
}

/// Players and defenses loaded for a season/week view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayersKey {
    pub user: UserId,
    pub season: Season,
    pub week: Week,
}

impl CacheKey for PlayersKey {
    fn class(&self) -> DataClass {
        DataClass::Players
    }

    fn to_file_key(&self) -> String {
        scoped_key(DataClass::Players, &self.user, self.season, self.week)
    }
}

/// Matchups of one week.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchupsKey {
    pub user: UserId,
    pub season: Season,
    pub week: Week,
    /// Whether the week is before the league's current date; not part of the key string.
    pub is_past_week: bool,
}

impl CacheKey for MatchupsKey {
    fn class(&self) -> DataClass {
        DataClass::Matchups
    }

    fn to_file_key(&self) -> String {
        scoped_key(DataClass::Matchups, &self.user, self.season, self.week)
    }

    /// Finished weeks are immutable and never expire. The current week and
    /// weeks still ahead can change, so they use the matchups TTL.
    fn ttl(&self, ttls: &CacheTtls) -> Option<Duration> {
        (!self.is_past_week).then_some(ttls.matchups)
    }
}

/// Rosters: every team (`team == None`) or one team's roster players.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RostersKey {
    pub user: UserId,
    pub team: Option<TeamName>,
}

impl CacheKey for RostersKey {
    fn class(&self) -> DataClass {
        DataClass::Rosters
    }

    fn to_file_key(&self) -> String {
        let stem = format!("{}{}", DataClass::Rosters.prefix(), self.user.cache_segment());
        match &self.team {
            Some(team) => format!("{}_{}", stem, team.cache_segment()),
            None => stem,
        }
    }
}

/// Per-player scores looked up for a season/week.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoresKey {
    pub user: UserId,
    pub season: Season,
    pub week: Week,
}

impl CacheKey for ScoresKey {
    fn class(&self) -> DataClass {
        DataClass::Scores
    }

    fn to_file_key(&self) -> String {
        scoped_key(DataClass::Scores, &self.user, self.season, self.week)
    }
}

/// The league's current year/week; shared across users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrentDateKey;

impl CacheKey for CurrentDateKey {
    fn class(&self) -> DataClass {
        DataClass::CurrentDate
    }

    fn to_file_key(&self) -> String {
        DataClass::CurrentDate.prefix().to_string()
    }
}
