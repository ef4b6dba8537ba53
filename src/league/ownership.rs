//! Derived index of which fantasy team owns which player.

use std::collections::HashMap;

use super::models::FantasyTeam;
use crate::cli::types::{PlayerId, TeamName};

/// Player ID → owning team, covering rosters and IR lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipIndex {
    owners: HashMap<PlayerId, TeamName>,
}

impl OwnershipIndex {
    pub fn build<'a>(teams: impl IntoIterator<Item = &'a FantasyTeam>) -> Self {
        let mut owners = HashMap::new();
        for team in teams {
            for id in team.roster.iter().chain(team.ir_list.iter()) {
                owners.insert(id.clone(), team.name.clone());
            }
        }
        Self { owners }
    }

    pub fn owner_of(&self, player: &PlayerId) -> Option<&TeamName> {
        self.owners.get(player)
    }

    pub fn is_free_agent(&self, player: &PlayerId) -> bool {
        !self.owners.contains_key(player)
    }

    /// Owner name for display, `Free Agent` when unowned.
    pub fn label(&self, player: &PlayerId) -> &str {
        self.owner_of(player)
            .map(TeamName::as_str)
            .unwrap_or(crate::cli::types::OwnerFilter::FREE_AGENT_LABEL)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, roster: &[&str], ir: &[&str]) -> FantasyTeam {
        FantasyTeam {
            name: TeamName::from(name),
            roster: roster.iter().map(|id| PlayerId::from(*id)).collect(),
            ir_list: ir.iter().map(|id| PlayerId::from(*id)).collect(),
            waivers: 2,
            division: "blue".to_string(),
        }
    }

    #[test]
    fn test_index_covers_roster_and_ir() {
        let teams = vec![team("Paul", &["1", "2"], &["9"]), team("Mick", &["3"], &[])];
        let index = OwnershipIndex::build(&teams);

        assert_eq!(index.owner_of(&PlayerId::from("1")).unwrap().as_str(), "Paul");
        assert_eq!(index.owner_of(&PlayerId::from("9")).unwrap().as_str(), "Paul");
        assert_eq!(index.owner_of(&PlayerId::from("3")).unwrap().as_str(), "Mick");
        assert!(index.is_free_agent(&PlayerId::from("4")));
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_label_for_free_agent() {
        let index = OwnershipIndex::build(&[team("Paul", &["1"], &[])]);
        assert_eq!(index.label(&PlayerId::from("1")), "Paul");
        assert_eq!(index.label(&PlayerId::from("2")), "Free Agent");
    }
}
