use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::RankingError;

pub type TeamId = i64;
pub type Score = f64;

/// Result of a team's real matchup in one scoring period.
///
/// Serialized as its one-letter code; `U` marks a week with a score but no
/// decided game, such as a bye.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Outcome {
    Win,
    Loss,
    Tie,
    Undecided,
}

impl Outcome {
    pub fn as_str(&self) -> &str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Tie => "T",
            Outcome::Undecided => "U",
        }
    }
}

impl FromStr for Outcome {
    type Err = RankingError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim() {
            "W" | "w" => Ok(Outcome::Win),
            "L" | "l" => Ok(Outcome::Loss),
            "T" | "t" => Ok(Outcome::Tie),
            "U" | "u" => Ok(Outcome::Undecided),
            other => Err(RankingError::UnknownOutcome(other.to_string())),
        }
    }
}

impl TryFrom<String> for Outcome {
    type Error = RankingError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

impl From<Outcome> for String {
    fn from(outcome: Outcome) -> Self {
        outcome.as_str().to_string()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fantasy team with its weekly scores and real results, oldest week first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    pub name: String,
    #[serde(default)]
    pub scores: Vec<Score>,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

impl Team {
    pub fn new(team_id: TeamId, name: impl Into<String>) -> Self {
        Self {
            team_id,
            name: name.into(),
            scores: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    /// Append one played week
    pub fn record_week(&mut self, score: Score, outcome: Outcome) {
        self.scores.push(score);
        self.outcomes.push(outcome);
    }

    pub fn weeks_played(&self) -> usize {
        self.scores.len()
    }

    pub fn score_at(&self, week_idx: usize) -> Option<Score> {
        self.scores.get(week_idx).copied()
    }
}

/// Snapshot of a league as delivered by a data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub league_id: i64,
    pub season: i32,
    /// Provider's notion of the week reached so far
    pub current_week: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub teams: Vec<Team>,
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl League {
    /// Longest score history in the roster
    pub fn weeks_available(&self) -> usize {
        self.teams.iter().map(Team::weeks_played).max().unwrap_or(0)
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("League {}", self.league_id))
    }

    pub fn cache_key(&self) -> String {
        league_cache_key(self.league_id, self.season)
    }
}

pub fn league_cache_key(league_id: i64, season: i32) -> String {
    format!("league_{}_{}", league_id, season)
}
