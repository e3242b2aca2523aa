use anyhow::{Context, Result, anyhow};
use log::info;
use std::fs;
use std::path::PathBuf;

use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::domain::{League, league_cache_key};
use crate::errors::with_parse_context;
use crate::ranking::{self, PowerRankings};
use crate::report;

/// Where the league snapshot comes from
#[derive(Debug, Clone, PartialEq)]
pub enum LeagueSource {
    File(PathBuf),
    Cached { league_id: i64, season: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
}

pub struct ProcessingService {
    config: AppConfig,
    cache: Cache,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let cache = Cache::new(&config.cache_dir)?;
        Ok(Self { config, cache })
    }

    pub fn run(&self, source: &LeagueSource, week: Option<i32>, format: OutputFormat) -> Result<()> {
        info!("=== Starting Power Rankings ===\n");

        // Step 1: Load the league snapshot
        let league = self.load_league(source)?;
        info!("  → Loaded {} with {} teams\n", league.display_name(), league.teams.len());

        // Step 2: Rank
        let rankings = self.rank(&league, week)?;
        info!("  → Ranked {} teams through week {}\n", rankings.teams.len(), rankings.week);

        // Step 3: Hand off to the report
        match format {
            OutputFormat::Table => report::print_report(&rankings),
            OutputFormat::Json => println!("{}", report::render_json(&rankings)?),
        }

        info!("=== Power Rankings Complete ===");
        Ok(())
    }

    pub fn load_league(&self, source: &LeagueSource) -> Result<League> {
        match source {
            LeagueSource::File(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read league file {}", path.display()))?;
                with_parse_context(
                    serde_json::from_str(&json),
                    &format!("league snapshot {}", path.display()),
                )
            }
            LeagueSource::Cached { league_id, season } => self
                .cache
                .load_parsed(&league_cache_key(*league_id, *season))?
                .ok_or_else(|| {
                    anyhow!(
                        "No cached league {} for season {}; run `fetch` first",
                        league_id,
                        season
                    )
                }),
        }
    }

    pub fn rank(&self, league: &League, week: Option<i32>) -> Result<PowerRankings> {
        ranking::calculate_power_rankings(league, week, &self.config.ranking)
            .with_context(|| format!("Failed to rank {}", league.display_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Outcome, Team};
    use tempfile::TempDir;

    fn service(temp_dir: &TempDir) -> ProcessingService {
        let config = AppConfig {
            cache_dir: temp_dir.path().join("cache"),
            ..AppConfig::new()
        };
        ProcessingService::new(config).unwrap()
    }

    fn league() -> League {
        let mut one = Team::new(1, "One");
        one.record_week(90.0, Outcome::Win);
        let mut two = Team::new(2, "Two");
        two.record_week(70.0, Outcome::Loss);
        League {
            league_id: 5,
            season: 2022,
            current_week: 1,
            name: None,
            teams: vec![two, one],
            fetched_at: None,
        }
    }

    #[test]
    fn test_rank_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("league.json");
        fs::write(&path, serde_json::to_string(&league()).unwrap()).unwrap();
        let service = service(&temp_dir);

        let loaded = service.load_league(&LeagueSource::File(path)).unwrap();
        let rankings = service.rank(&loaded, None).unwrap();

        assert_eq!(rankings.week, 1);
        assert_eq!(rankings.teams[0].name, "One");
    }

    #[test]
    fn test_rank_from_cache() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        service.cache.save_parsed("league_5_2022", &league()).unwrap();

        let source = LeagueSource::Cached {
            league_id: 5,
            season: 2022,
        };
        service.run(&source, Some(1), OutputFormat::Json).unwrap();
    }

    #[test]
    fn test_missing_snapshot_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let source = LeagueSource::Cached {
            league_id: 8,
            season: 2020,
        };
        let err = service.load_league(&source).unwrap_err();
        assert!(err.to_string().contains("run `fetch` first"));
    }

    #[test]
    fn test_invalid_week_is_a_hard_error() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let err = service.rank(&league(), Some(-1)).unwrap_err();
        assert!(format!("{:#}", err).contains("cannot be negative"));
    }

    #[test]
    fn test_bad_file_names_the_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "[1, 2").unwrap();
        let service = service(&temp_dir);

        let err = service.load_league(&LeagueSource::File(path)).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
