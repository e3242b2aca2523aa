use log::debug;

use super::types::{PeriodRecord, WeeklyRecords};
use crate::domain::{Score, Team, TeamId};

/// Plays every team against every other team, one week at a time.
///
/// Returns one map per week in `0..week`. A team without a score for a week
/// takes no part in that week. Equal scores keep the order of `teams`, so pass
/// them sorted by ID for a deterministic tie-break.
pub fn calculate_weekly_records(teams: &[&Team], week: usize) -> Vec<WeeklyRecords> {
    (0..week)
        .map(|week_idx| records_for_week(teams, week_idx))
        .collect()
}

fn records_for_week(teams: &[&Team], week_idx: usize) -> WeeklyRecords {
    let ranked = rank_by_score(collect_week_scores(teams, week_idx));
    let participants = ranked.len();
    debug!("Week {}: {} teams scored", week_idx + 1, participants);

    ranked
        .into_iter()
        .enumerate()
        .map(|(rank, (team_id, score))| {
            let record = PeriodRecord {
                wins: participants - (rank + 1),
                losses: rank,
                score,
            };
            (team_id, record)
        })
        .collect()
}

fn collect_week_scores(teams: &[&Team], week_idx: usize) -> Vec<(TeamId, Score)> {
    teams
        .iter()
        .filter_map(|team| team.score_at(week_idx).map(|score| (team.team_id, score)))
        .collect()
}

// `sort_by` is stable: equal scores stay in input order
fn rank_by_score(mut scores: Vec<(TeamId, Score)>) -> Vec<(TeamId, Score)> {
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));
    scores
}
