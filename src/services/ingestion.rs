use anyhow::Result;
use log::info;

use crate::api::EspnClient;
use crate::cache::Cache;
use crate::config::{AppConfig, EspnCredentials};
use crate::domain::League;

pub struct IngestionService {
    cache: Cache,
    api_client: EspnClient,
}

impl IngestionService {
    pub fn new(config: &AppConfig, credentials: &EspnCredentials) -> Result<Self> {
        Ok(Self {
            cache: Cache::new(&config.cache_dir)?,
            api_client: EspnClient::new(&config.espn, credentials)?,
        })
    }

    pub async fn run(&self, league_id: i64, season: i32, refresh: bool) -> Result<League> {
        info!("=== Starting League Ingestion ===\n");

        // Step 1: Fetch league data
        let league = self.fetch_league(league_id, season, refresh).await?;
        info!(
            "  → Fetched {} ({} teams, current week {})\n",
            league.display_name(),
            league.teams.len(),
            league.current_week
        );

        // Step 2: Save to parsed cache
        self.save_parsed_cache(&league)?;
        info!("  → Saved to parsed cache\n");

        info!("=== Ingestion Complete ===");
        Ok(league)
    }

    async fn fetch_league(&self, league_id: i64, season: i32, refresh: bool) -> Result<League> {
        info!("Step 1: Fetching league {} for season {}...", league_id, season);
        self.api_client
            .fetch_and_cache_league(league_id, season, &self.cache, refresh)
            .await
    }

    fn save_parsed_cache(&self, league: &League) -> Result<()> {
        info!("Step 2: Saving league snapshot...");
        self.cache.save_parsed(&league.cache_key(), league)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ingestion_writes_parsed_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig {
            cache_dir: temp_dir.path().to_path_buf(),
            ..AppConfig::new()
        };
        let raw = serde_json::json!({
            "id": 5,
            "seasonId": 2022,
            "status": { "currentMatchupPeriod": 1 },
            "teams": [{ "id": 1, "name": "One" }, { "id": 2, "name": "Two" }],
            "schedule": [{
                "matchupPeriodId": 1,
                "home": { "teamId": 1, "totalPoints": 90.0 },
                "away": { "teamId": 2, "totalPoints": 70.0 },
                "winner": "HOME"
            }]
        });
        Cache::new(temp_dir.path())
            .unwrap()
            .save_raw("league_5_2022", &raw)
            .unwrap();

        let service = IngestionService::new(&config, &EspnCredentials::default()).unwrap();
        let league = service.run(5, 2022, false).await.unwrap();

        let cache = Cache::new(temp_dir.path()).unwrap();
        let saved: Option<League> = cache.load_parsed("league_5_2022").unwrap();
        assert_eq!(saved, Some(league));
    }
}
