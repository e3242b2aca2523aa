use std::cmp::Ordering;
use std::fmt;

use colored::Colorize;

use crate::ranking::{PowerRankingResult, PowerRankings};

const NAME_WIDTH: usize = 24;

fn short_name(name: &str) -> String {
    name.chars().take(NAME_WIDTH).collect()
}

fn format_ppg(ppg: Option<f64>) -> String {
    ppg.map(|p| format!("{:.2}", p))
        .unwrap_or_else(|| "-".to_string())
}

fn format_optional<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn has_median(rankings: &PowerRankings) -> bool {
    rankings.teams.iter().any(|t| t.median_record.is_some())
}

/// Main table: rank, rating and every record
pub struct PowerTable<'a>(pub &'a PowerRankings);

/// Teams re-sorted by scoring average
pub struct PpgTable<'a>(pub &'a PowerRankings);

/// One column of all-play records per week
pub struct WeeklyTable<'a>(pub &'a PowerRankings);

/// Per-team block with records and win percentages
pub struct Breakdown<'a>(pub &'a PowerRankings);

pub fn render_power_rankings(rankings: &PowerRankings) -> String {
    PowerTable(rankings).to_string()
}

pub fn render_ppg_rankings(rankings: &PowerRankings) -> String {
    PpgTable(rankings).to_string()
}

pub fn render_weekly_records(rankings: &PowerRankings) -> String {
    WeeklyTable(rankings).to_string()
}

pub fn render_breakdown(rankings: &PowerRankings) -> String {
    Breakdown(rankings).to_string()
}

impl fmt::Display for PowerTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rankings = self.0;
        let with_median = has_median(rankings);

        let title = format!(
            "Regular Season Power Rankings through Week {}",
            rankings.week
        );
        writeln!(f, "\n{}\n", title.bold())?;

        if with_median {
            writeln!(
                f,
                "{:<4} {:<25} {:<10} {:<15} {:<15} {:<15} {:<15}",
                "Rank", "Team", "Rating", "True Record", "vs Median", "Combined", "Actual Record"
            )?;
            writeln!(f, "{}", "-".repeat(100))?;
        } else {
            writeln!(
                f,
                "{:<4} {:<25} {:<10} {:<15} {:<15}",
                "Rank", "Team", "Rating", "True Record", "Actual Record"
            )?;
            writeln!(f, "{}", "-".repeat(70))?;
        }

        for (i, team) in rankings.teams.iter().enumerate() {
            let rank = i + 1;
            let name = short_name(&team.name);
            let true_record = team.true_record().to_string();
            let actual = team.actual_record.to_string();

            if with_median {
                writeln!(
                    f,
                    "{:<4} {:<25} {:<10.3} {:<15} {:<15} {:<15} {:<15}",
                    rank,
                    name,
                    team.ranking,
                    true_record,
                    format_optional(team.median_record),
                    format_optional(team.combined_record),
                    actual
                )?;
            } else {
                writeln!(
                    f,
                    "{:<4} {:<25} {:<10.3} {:<15} {:<15}",
                    rank, name, team.ranking, true_record, actual
                )?;
            }
        }

        Ok(())
    }
}

/// Highest points per game first; teams that never scored go last
pub fn ppg_order(teams: &[PowerRankingResult]) -> Vec<&PowerRankingResult> {
    let mut ordered: Vec<&PowerRankingResult> = teams.iter().collect();
    ordered.sort_by(|a, b| match (a.points_per_game(), b.points_per_game()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ordered
}

impl fmt::Display for PpgTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}\n", "Points Per Game Rankings:".bold())?;
        writeln!(
            f,
            "{:<4} {:<25} {:<15} {:<15} {:<15}",
            "Rank", "Team", "PPG", "Total Points", "Games Played"
        )?;
        writeln!(f, "{}", "-".repeat(75))?;

        for (i, team) in ppg_order(&self.0.teams).into_iter().enumerate() {
            writeln!(
                f,
                "{:<4} {:<25} {:<15} {:<15.2} {:<15}",
                i + 1,
                short_name(&team.name),
                format_ppg(team.points_per_game()),
                team.total_points,
                team.games_played()
            )?;
        }

        Ok(())
    }
}

impl fmt::Display for WeeklyTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rankings = self.0;

        writeln!(f, "\n{}\n", "Weekly Scoring Records:".bold())?;

        write!(f, "{:<25}", "Team")?;
        for week in 1..=rankings.week {
            write!(f, "{:<10}", format!("Week {}", week))?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(25 + 10 * rankings.week))?;

        for team in &rankings.teams {
            write!(f, "{:<25}", short_name(&team.name))?;
            for record in &team.weekly_records {
                write!(f, "{:<10}", format!("{}-{}", record.wins, record.losses))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Breakdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}\n", "Detailed Breakdown:".bold())?;

        for (i, team) in self.0.teams.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, team.name)?;
            writeln!(f, "   Points Per Game: {}", format_ppg(team.points_per_game()))?;
            writeln!(f, "   True Record (vs Everyone): {}", team.true_record())?;
            if let Some(median) = team.median_record {
                writeln!(f, "   Median Record: {}", median)?;
            }
            if let Some(combined) = team.combined_record {
                writeln!(f, "   Combined Record: {}", combined)?;
            }
            writeln!(f, "   Actual Record: {}", team.actual_record)?;

            writeln!(f, "   Win Percentages:")?;
            writeln!(f, "      True: {:.3}", team.true_win_pct())?;
            if let Some(median_pct) = team.median_win_pct() {
                writeln!(f, "      Median: {:.3}", median_pct)?;
            }
            writeln!(f, "      Actual: {:.3}", team.actual_win_pct())?;
            writeln!(f)?;
        }

        Ok(())
    }
}
