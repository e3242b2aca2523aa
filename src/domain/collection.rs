use super::models::{Team, TeamId};
use std::collections::BTreeMap;

/// Collection of teams indexed by ID
pub struct TeamCollection {
    teams: BTreeMap<TeamId, Team>,
}

impl TeamCollection {
    pub fn new() -> Self {
        Self {
            teams: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, team: Team) {
        self.teams.insert(team.team_id, team);
    }

    /// Team with the given ID, created on first use
    pub fn entry(&mut self, id: TeamId) -> &mut Team {
        self.teams
            .entry(id)
            .or_insert_with(|| Team::new(id, format!("Team {}", id)))
    }

    /// Teams ordered by ID
    pub fn into_vec(self) -> Vec<Team> {
        self.teams.into_values().collect()
    }
}

impl Default for TeamCollection {
    fn default() -> Self {
        Self::new()
    }
}
