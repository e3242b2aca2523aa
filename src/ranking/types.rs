use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Outcome, Score, TeamId};

/// One week's hypothetical records, keyed by team
pub type WeeklyRecords = BTreeMap<TeamId, PeriodRecord>;

/// A team's record against the whole league for a single week
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub wins: usize,
    pub losses: usize,
    pub score: Score,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLoss {
    pub wins: usize,
    pub losses: usize,
}

impl WinLoss {
    pub fn new(wins: usize, losses: usize) -> Self {
        Self { wins, losses }
    }

    pub fn games(&self) -> usize {
        self.wins + self.losses
    }

    /// Share of wins, 0 when nothing was played
    pub fn win_pct(&self) -> f64 {
        ratio(self.wins, self.games())
    }
}

impl fmt::Display for WinLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.wins, self.losses)
    }
}

/// Real head-to-head results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualRecord {
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
}

impl ActualRecord {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut record, outcome| {
                match outcome {
                    Outcome::Win => record.wins += 1,
                    Outcome::Loss => record.losses += 1,
                    Outcome::Tie => record.ties += 1,
                    Outcome::Undecided => {}
                }
                record
            })
    }

    /// Wins over decided games; ties are left out
    pub fn win_pct(&self) -> f64 {
        ratio(self.wins, self.wins + self.losses)
    }
}

impl fmt::Display for ActualRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.wins, self.losses)?;
        if self.ties > 0 {
            write!(f, "-{}", self.ties)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerRankingResult {
    pub name: String,
    pub team_id: TeamId,
    /// True win ratio, the sort key
    pub ranking: f64,
    pub weekly_records: Vec<PeriodRecord>,
    pub scores: Vec<Score>,
    pub actual_record: ActualRecord,
    pub total_points: f64,
    pub total_wins: usize,
    pub total_losses: usize,
    pub median_record: Option<WinLoss>,
    /// Actual plus median record. Not a literal game count.
    pub combined_record: Option<WinLoss>,
}

impl PowerRankingResult {
    pub fn true_record(&self) -> WinLoss {
        WinLoss::new(self.total_wins, self.total_losses)
    }

    pub fn games_played(&self) -> usize {
        self.scores.len()
    }

    /// `None` when the team has no scored week in the window
    pub fn points_per_game(&self) -> Option<f64> {
        match self.games_played() {
            0 => None,
            games => Some(self.total_points / games as f64),
        }
    }

    pub fn true_win_pct(&self) -> f64 {
        self.true_record().win_pct()
    }

    pub fn median_win_pct(&self) -> Option<f64> {
        self.median_record.map(|record| record.win_pct())
    }

    pub fn actual_win_pct(&self) -> f64 {
        self.actual_record.win_pct()
    }
}

/// Sorted results together with the week they run through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerRankings {
    pub week: usize,
    pub teams: Vec<PowerRankingResult>,
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_result() -> PowerRankingResult {
        PowerRankingResult {
            name: "Nobody".to_string(),
            team_id: 1,
            ranking: 0.0,
            weekly_records: Vec::new(),
            scores: Vec::new(),
            actual_record: ActualRecord::default(),
            total_points: 0.0,
            total_wins: 0,
            total_losses: 0,
            median_record: Some(WinLoss::new(0, 0)),
            combined_record: None,
        }
    }

    #[test]
    fn test_actual_record_counts_outcomes() {
        let record = ActualRecord::from_outcomes(&[
            Outcome::Win,
            Outcome::Tie,
            Outcome::Loss,
            Outcome::Undecided,
            Outcome::Win,
        ]);

        assert_eq!(record, ActualRecord { wins: 2, losses: 1, ties: 1 });
        assert_eq!(record.to_string(), "2-1-1");
        assert!((record.win_pct() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_actual_record_hides_zero_ties() {
        let record = ActualRecord { wins: 5, losses: 3, ties: 0 };
        assert_eq!(record.to_string(), "5-3");
    }

    #[test]
    fn test_zero_denominators_resolve_to_sentinels() {
        let result = empty_result();

        assert_eq!(result.points_per_game(), None);
        assert_eq!(result.true_win_pct(), 0.0);
        assert_eq!(result.median_win_pct(), Some(0.0));
        assert_eq!(result.actual_win_pct(), 0.0);
    }

    #[test]
    fn test_points_per_game() {
        let mut result = empty_result();
        result.scores = vec![100.0, 50.0];
        result.total_points = 150.0;

        assert_eq!(result.points_per_game(), Some(75.0));
    }
}
