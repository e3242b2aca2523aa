use std::collections::HashSet;

use log::info;

use super::median::{beats_median, weekly_medians};
use super::types::{ActualRecord, PowerRankingResult, PowerRankings, WeeklyRecords, WinLoss};
use super::weekly::calculate_weekly_records;
use crate::config::settings::RankingSettings;
use crate::domain::{League, Score, Team};
use crate::errors::RankingError;

/// Ranks every team in the league by its all-play record
pub fn calculate_power_rankings(
    league: &League,
    requested_week: Option<i32>,
    settings: &RankingSettings,
) -> Result<PowerRankings, RankingError> {
    info!(
        "Calculating power rankings for {} teams in {}",
        league.teams.len(),
        league.display_name()
    );

    // 1. Reject malformed rosters up front
    validate_teams(&league.teams)?;

    // 2. Decide how many weeks to look at
    let week = resolve_week(requested_week, league, settings)?;
    info!("Ranking through week {}", week);

    // 3. Fixed team order drives every tie-break
    let teams = sorted_by_id(&league.teams);

    // 4. Simulate each week as a full round robin
    let weekly_records = calculate_weekly_records(&teams, week);

    // 5. Roll the weeks up into season records
    let results = aggregate_power_rankings(&teams, &weekly_records, week, settings.include_median);
    info!("Power rankings complete");

    Ok(PowerRankings {
        week,
        teams: results,
    })
}

/// Effective number of weeks for a request.
///
/// Defaults to the league's current week, then caps at the regular season
/// length and at the weeks that actually have scores.
pub fn resolve_week(
    requested: Option<i32>,
    league: &League,
    settings: &RankingSettings,
) -> Result<usize, RankingError> {
    let requested = match requested {
        Some(week) if week < 0 => return Err(RankingError::NegativeWeek(week)),
        Some(week) => week as usize,
        None => league.current_week as usize,
    };

    let week = requested
        .min(settings.max_week)
        .min(league.weeks_available());

    if week < requested {
        info!("Requested week {} capped to {}", requested, week);
    }
    Ok(week)
}

pub fn validate_teams(teams: &[Team]) -> Result<(), RankingError> {
    let mut seen = HashSet::new();

    for team in teams {
        if !seen.insert(team.team_id) {
            return Err(RankingError::DuplicateTeam(team.team_id));
        }

        if team.scores.len() != team.outcomes.len() {
            return Err(RankingError::MismatchedHistory {
                team_id: team.team_id,
                scores: team.scores.len(),
                outcomes: team.outcomes.len(),
            });
        }

        if let Some(week_idx) = team.scores.iter().position(|s| !s.is_finite()) {
            return Err(RankingError::NonFiniteScore {
                team_id: team.team_id,
                week: week_idx + 1,
            });
        }
    }

    Ok(())
}

/// Builds one result per team from the weekly records, best ranking first.
///
/// Equal rankings keep the order of `teams`.
pub fn aggregate_power_rankings(
    teams: &[&Team],
    weekly_records: &[WeeklyRecords],
    week: usize,
    include_median: bool,
) -> Vec<PowerRankingResult> {
    let weekly_records = &weekly_records[..week.min(weekly_records.len())];
    let medians = if include_median {
        weekly_medians(weekly_records)
    } else {
        Vec::new()
    };

    let mut results: Vec<PowerRankingResult> = teams
        .iter()
        .map(|team| build_team_result(team, weekly_records, &medians, week, include_median))
        .collect();

    sort_by_ranking(&mut results);
    results
}

fn build_team_result(
    team: &Team,
    weekly_records: &[WeeklyRecords],
    medians: &[Option<Score>],
    week: usize,
    include_median: bool,
) -> PowerRankingResult {
    let mut team_weekly_records = Vec::new();
    let mut total_wins = 0;
    let mut total_losses = 0;
    let mut median_wins = 0;

    for (week_idx, records) in weekly_records.iter().enumerate() {
        let Some(record) = records.get(&team.team_id) else {
            continue;
        };

        total_wins += record.wins;
        total_losses += record.losses;
        if include_median && beats_median(record.score, medians.get(week_idx).copied().flatten()) {
            median_wins += 1;
        }
        team_weekly_records.push(*record);
    }

    let scores: Vec<Score> = team_weekly_records.iter().map(|r| r.score).collect();
    let actual_record = ActualRecord::from_outcomes(&team.outcomes[..week.min(team.outcomes.len())]);

    // Weeks without a score count against the median record too
    let median_record =
        include_median.then(|| WinLoss::new(median_wins, week.saturating_sub(median_wins)));
    let combined_record = median_record.map(|median| {
        WinLoss::new(
            actual_record.wins + median.wins,
            actual_record.losses + median.losses,
        )
    });

    PowerRankingResult {
        name: team.name.clone(),
        team_id: team.team_id,
        ranking: WinLoss::new(total_wins, total_losses).win_pct(),
        weekly_records: team_weekly_records,
        total_points: scores.iter().sum(),
        scores,
        actual_record,
        total_wins,
        total_losses,
        median_record,
        combined_record,
    }
}

fn sorted_by_id(teams: &[Team]) -> Vec<&Team> {
    let mut sorted: Vec<&Team> = teams.iter().collect();
    sorted.sort_by_key(|team| team.team_id);
    sorted
}

// Stable, so equal rankings stay in team ID order
fn sort_by_ranking(results: &mut [PowerRankingResult]) {
    results.sort_by(|a, b| b.ranking.total_cmp(&a.ranking));
}
