mod median;
pub mod power;
pub mod types;
pub mod weekly;

pub use power::{aggregate_power_rankings, calculate_power_rankings, resolve_week};
pub use types::{ActualRecord, PeriodRecord, PowerRankingResult, PowerRankings, WeeklyRecords, WinLoss};
pub use weekly::calculate_weekly_records;
