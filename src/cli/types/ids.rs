//! Identifier types for players, fantasy teams, and users.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::LeagueError;

/// Identifiers of this length or shorter name a defense/special-teams unit.
pub const DEFENSE_ID_MAX_LEN: usize = 3;

/// Type-safe wrapper for player document IDs.
///
/// Individual players are keyed by their store document ID; defense/special
/// teams units are keyed by the NFL team abbreviation (`"BUF"`, `"SF"`).
///
/// # Examples
///
/// ```rust
/// use ffl_league::PlayerId;
///
/// assert!(PlayerId::from("KC").is_defense());
/// assert!(!PlayerId::from("3918298").is_defense());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Defense units live under `defense/{abbrev}` rather than `players/{id}`.
    pub fn is_defense(&self) -> bool {
        !self.0.is_empty() && self.0.chars().count() <= DEFENSE_ID_MAX_LEN
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for PlayerId {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LeagueError::Store {
                message: "empty player id".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Fantasy team name; doubles as the `fantasyTeams/{name}` document ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(pub String);

impl TeamName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case- and whitespace-insensitive comparison used for display ordering.
    pub fn matches(&self, other: &str) -> bool {
        self.0.trim().eq_ignore_ascii_case(other.trim())
    }

    /// File-safe and collision-free form of the name for cache keys.
    ///
    /// Spaces become `_`; `_`, `%` and any other character outside
    /// `[A-Za-z0-9@.+-]` are percent-encoded byte by byte.
    pub fn cache_segment(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        for c in self.0.chars() {
            match c {
                ' ' => out.push('_'),
                c if c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '-' | '+') => out.push(c),
                c => {
                    let mut buf = [0u8; 4];
                    for byte in c.encode_utf8(&mut buf).bytes() {
                        out.push_str(&format!("%{byte:02X}"));
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TeamName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TeamName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for TeamName {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

/// Opaque user identity handed over by the identity provider.
///
/// Only used to scope cache entries and authenticate store requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub const ANONYMOUS: &'static str = "nouser";

    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.trim().is_empty() {
            Self::anonymous()
        } else {
            Self(id)
        }
    }

    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segment embedded in cache keys. Characters that are unsafe in file
    /// names are replaced so keys map one-to-one onto cache files.
    pub fn cache_segment(&self) -> String {
        self.0
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '-' | '+') {
                    c
                } else {
                    '-'
                }
            })
            .collect()
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defense_ids() {
        assert!(PlayerId::from("SF").is_defense());
        assert!(PlayerId::from("BUF").is_defense());
        assert!(!PlayerId::from("4362628").is_defense());
        assert!(!PlayerId::from("ABCD").is_defense());
        assert!(PlayerId::from("12").is_defense());
        assert!(PlayerId::from("KC2").is_defense());
        assert!(!PlayerId::from("").is_defense());
    }

    #[test]
    fn test_player_id_parse_trims() {
        let id: PlayerId = " 123 ".parse().unwrap();
        assert_eq!(id.as_str(), "123");
        assert!("   ".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_player_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&PlayerId::from("42")).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn test_team_name_matches_ignores_case() {
        let team = TeamName::from("Mick");
        assert!(team.matches(" mick "));
        assert!(!team.matches("Mike"));
    }

    #[test]
    fn test_team_cache_segment() {
        assert_eq!(TeamName::from("Big Mike").cache_segment(), "Big_Mike");
        assert_eq!(TeamName::from("Big_Mike").cache_segment(), "Big%5FMike");
        assert_eq!(TeamName::from("A/B").cache_segment(), "A%2FB");
        assert_eq!(TeamName::from("100%").cache_segment(), "100%25");
        assert_eq!(TeamName::from("Zoë").cache_segment(), "Zo%C3%AB");
    }

    #[test]
    fn test_user_cache_segment() {
        assert_eq!(UserId::new("a.b@x.com").cache_segment(), "a.b@x.com");
        assert_eq!(UserId::new("we/ird_id").cache_segment(), "we-ird-id");
        assert_eq!(UserId::new("").as_str(), UserId::ANONYMOUS);
    }
}
