use super::types::WeeklyRecords;
use crate::domain::Score;

/// Median of a set of scores; the mean of the middle pair for even counts
pub fn median(values: &[Score]) -> Option<Score> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Median score of every week
pub fn weekly_medians(weekly_records: &[WeeklyRecords]) -> Vec<Option<Score>> {
    weekly_records
        .iter()
        .map(|week| {
            let scores: Vec<Score> = week.values().map(|r| r.score).collect();
            median(&scores)
        })
        .collect()
}

/// Only a score strictly above the median counts; equal is a loss
pub fn beats_median(score: Score, median: Option<Score>) -> bool {
    median.is_some_and(|m| score > m)
}
