mod tables;

use anyhow::{Context, Result};

use crate::ranking::PowerRankings;

pub use tables::{
    ppg_order, render_breakdown, render_power_rankings, render_ppg_rankings,
    render_weekly_records,
};

/// All four console sections, in reading order
pub fn render_report(rankings: &PowerRankings) -> String {
    [
        render_power_rankings(rankings),
        render_ppg_rankings(rankings),
        render_weekly_records(rankings),
        render_breakdown(rankings),
    ]
    .concat()
}

pub fn print_report(rankings: &PowerRankings) {
    print!("{}", render_report(rankings));
}

pub fn render_json(rankings: &PowerRankings) -> Result<String> {
    serde_json::to_string_pretty(rankings).context("Failed to serialize power rankings")
}
