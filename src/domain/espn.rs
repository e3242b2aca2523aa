use std::collections::BTreeSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::collection::TeamCollection;
use super::models::{League, Outcome, Score, Team, TeamId};

// --- ESPN fantasy football v3 response structures ---

/// Raw league response from the ESPN fantasy API
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueResponse {
    pub id: i64,
    pub season_id: i32,
    pub status: LeagueStatus,
    #[serde(default)]
    pub settings: Option<LeagueSettings>,
    #[serde(default)]
    pub teams: Vec<TeamResponse>,
    #[serde(default)]
    pub schedule: Vec<MatchupResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueStatus {
    pub current_matchup_period: u32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LeagueSettings {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TeamResponse {
    pub id: TeamId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl TeamResponse {
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_ref().filter(|n| !n.trim().is_empty()) {
            return name.trim().to_string();
        }

        let parts: Vec<&str> = [self.location.as_deref(), self.nickname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            format!("Team {}", self.id)
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupResponse {
    pub matchup_period_id: u32,
    pub home: Option<MatchupSide>,
    pub away: Option<MatchupSide>,
    #[serde(default)]
    pub winner: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupSide {
    pub team_id: TeamId,
    #[serde(default)]
    pub total_points: Score,
}

impl MatchupResponse {
    /// A decided game between two teams
    pub fn is_decided_game(&self) -> bool {
        self.away.is_some() && matches!(self.winner.as_str(), "HOME" | "AWAY" | "TIE")
    }

    fn home_outcome(&self) -> Outcome {
        match self.winner.as_str() {
            "HOME" => Outcome::Win,
            "AWAY" => Outcome::Loss,
            "TIE" => Outcome::Tie,
            _ => Outcome::Undecided,
        }
    }

    fn away_outcome(&self) -> Outcome {
        match self.home_outcome() {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            other => other,
        }
    }
}

impl LeagueResponse {
    /// Flatten the schedule into per-team score and outcome histories.
    ///
    /// Index `i` of every history is the `i`-th completed week. Byes keep the
    /// team's score with whatever outcome ESPN reports for them.
    pub fn into_league(self) -> League {
        let mut collection = TeamCollection::new();
        for team in &self.teams {
            collection.add(Team::new(team.id, team.display_name()));
        }

        let completed: BTreeSet<u32> = self
            .schedule
            .iter()
            .filter(|m| m.is_decided_game())
            .map(|m| m.matchup_period_id)
            .collect();

        let mut schedule: Vec<&MatchupResponse> = self
            .schedule
            .iter()
            .filter(|m| completed.contains(&m.matchup_period_id))
            .collect();
        schedule.sort_by_key(|m| m.matchup_period_id);

        for matchup in schedule {
            let Some(home) = &matchup.home else {
                continue;
            };
            // Position of this week among the completed ones
            let week_idx = completed.range(..matchup.matchup_period_id).count();

            debug!(
                "Week {}: team {} {:.2} vs {} ({})",
                matchup.matchup_period_id,
                home.team_id,
                home.total_points,
                matchup
                    .away
                    .as_ref()
                    .map(|away| format!("team {} {:.2}", away.team_id, away.total_points))
                    .unwrap_or_else(|| "bye".to_string()),
                matchup.winner
            );

            record_side(&mut collection, week_idx, home, matchup.home_outcome());
            if let Some(away) = &matchup.away {
                record_side(&mut collection, week_idx, away, matchup.away_outcome());
            }
        }

        League {
            league_id: self.id,
            season: self.season_id,
            current_week: self.status.current_matchup_period,
            name: self.settings.and_then(|s| s.name),
            teams: collection.into_vec(),
            fetched_at: None,
        }
    }
}

// A team that skipped an earlier week cannot be placed without shifting its
// later scores, so its history stops at the gap
fn record_side(
    collection: &mut TeamCollection,
    week_idx: usize,
    side: &MatchupSide,
    outcome: Outcome,
) {
    let team = collection.entry(side.team_id);
    if team.weeks_played() != week_idx {
        warn!(
            "Team {} has {} weeks before week {}; dropping its later weeks",
            side.team_id,
            team.weeks_played(),
            week_idx + 1
        );
        return;
    }
    team.record_week(side.total_points, outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::RankingSettings;
    use crate::ranking::calculate_power_rankings;

    const LEAGUE_JSON: &str = r#"{
        "id": 123456,
        "seasonId": 2023,
        "status": { "currentMatchupPeriod": 3 },
        "settings": { "name": "Sunday League" },
        "teams": [
            { "id": 2, "location": "Big", "nickname": "Dogs" },
            { "id": 1, "name": "Alpha Squad" },
            { "id": 3 }
        ],
        "schedule": [
            {
                "matchupPeriodId": 2,
                "home": { "teamId": 1, "totalPoints": 80.5 },
                "away": { "teamId": 2, "totalPoints": 80.5 },
                "winner": "TIE"
            },
            {
                "matchupPeriodId": 1,
                "home": { "teamId": 1, "totalPoints": 101.2 },
                "away": { "teamId": 2, "totalPoints": 95.0 },
                "winner": "HOME"
            },
            {
                "matchupPeriodId": 1,
                "home": { "teamId": 3, "totalPoints": 77.7 },
                "winner": "HOME"
            },
            {
                "matchupPeriodId": 3,
                "home": { "teamId": 1, "totalPoints": 40.0 },
                "away": { "teamId": 3, "totalPoints": 12.0 },
                "winner": "UNDECIDED"
            }
        ]
    }"#;

    fn parse() -> League {
        let response: LeagueResponse = serde_json::from_str(LEAGUE_JSON).unwrap();
        response.into_league()
    }

    #[test]
    fn test_team_names() {
        let league = parse();
        let names: Vec<&str> = league.teams.iter().map(|t| t.name.as_str()).collect();

        assert_eq!(names, vec!["Alpha Squad", "Big Dogs", "Team 3"]);
        assert_eq!(league.name.as_deref(), Some("Sunday League"));
        assert_eq!(league.current_week, 3);
        assert_eq!(league.season, 2023);
    }

    #[test]
    fn test_schedule_is_flattened_in_week_order() {
        let league = parse();
        let alpha = &league.teams[0];
        let dogs = &league.teams[1];

        assert_eq!(alpha.scores, vec![101.2, 80.5]);
        assert_eq!(alpha.outcomes, vec![Outcome::Win, Outcome::Tie]);
        assert_eq!(dogs.scores, vec![95.0, 80.5]);
        assert_eq!(dogs.outcomes, vec![Outcome::Loss, Outcome::Tie]);
    }

    #[test]
    fn test_bye_keeps_its_score_and_undecided_week_is_skipped() {
        let league = parse();
        let team3 = &league.teams[2];

        assert_eq!(team3.scores, vec![77.7]);
        assert_eq!(team3.outcomes, vec![Outcome::Win]);
        assert_eq!(league.weeks_available(), 2);
    }

    fn rotating_bye_league() -> League {
        let json = r#"{
            "id": 1,
            "seasonId": 2023,
            "status": { "currentMatchupPeriod": 3 },
            "teams": [{ "id": 1 }, { "id": 2 }, { "id": 3 }],
            "schedule": [
                {
                    "matchupPeriodId": 1,
                    "home": { "teamId": 1, "totalPoints": 100.0 },
                    "away": { "teamId": 2, "totalPoints": 90.0 },
                    "winner": "HOME"
                },
                {
                    "matchupPeriodId": 1,
                    "home": { "teamId": 3, "totalPoints": 50.0 },
                    "winner": "UNDECIDED"
                },
                {
                    "matchupPeriodId": 2,
                    "home": { "teamId": 1, "totalPoints": 10.0 },
                    "away": { "teamId": 3, "totalPoints": 200.0 },
                    "winner": "AWAY"
                },
                {
                    "matchupPeriodId": 2,
                    "home": { "teamId": 2, "totalPoints": 60.0 },
                    "winner": "UNDECIDED"
                }
            ]
        }"#;
        serde_json::from_str::<LeagueResponse>(json).unwrap().into_league()
    }

    #[test]
    fn test_rotating_byes_keep_scores_in_their_week() {
        let league = rotating_bye_league();
        let t2 = &league.teams[1];
        let t3 = &league.teams[2];

        assert_eq!(t3.score_at(0), Some(50.0));
        assert_eq!(t3.score_at(1), Some(200.0));
        assert_eq!(t3.outcomes, vec![Outcome::Undecided, Outcome::Win]);
        assert_eq!(t2.scores, vec![90.0, 60.0]);
        assert_eq!(t2.outcomes, vec![Outcome::Loss, Outcome::Undecided]);
    }

    #[test]
    fn test_rotating_byes_rank_each_week_separately() {
        let league = rotating_bye_league();
        let rankings =
            calculate_power_rankings(&league, Some(2), &RankingSettings::default()).unwrap();
        let t3 = rankings.teams.iter().find(|r| r.team_id == 3).unwrap();

        // Bottom scorer in week 1, top scorer in week 2
        assert_eq!(t3.weekly_records[0].wins, 0);
        assert_eq!(t3.weekly_records[1].wins, 2);
        assert_eq!((t3.total_wins, t3.total_losses), (2, 2));
        assert_eq!(t3.actual_record.wins, 1);
        assert_eq!(t3.actual_record.losses, 0);
    }

    #[test]
    fn test_team_missing_a_week_stops_at_the_gap() {
        let json = r#"{
            "id": 1,
            "seasonId": 2023,
            "status": { "currentMatchupPeriod": 3 },
            "teams": [{ "id": 1 }, { "id": 2 }, { "id": 3 }],
            "schedule": [
                {
                    "matchupPeriodId": 1,
                    "home": { "teamId": 1, "totalPoints": 100.0 },
                    "away": { "teamId": 2, "totalPoints": 90.0 },
                    "winner": "HOME"
                },
                {
                    "matchupPeriodId": 2,
                    "home": { "teamId": 1, "totalPoints": 10.0 },
                    "away": { "teamId": 3, "totalPoints": 200.0 },
                    "winner": "AWAY"
                }
            ]
        }"#;
        let league = serde_json::from_str::<LeagueResponse>(json).unwrap().into_league();

        assert_eq!(league.teams[0].scores, vec![100.0, 10.0]);
        assert!(league.teams[2].scores.is_empty());
    }
}
