use crate::cache::Cache;
use crate::config::{EspnCredentials, EspnSettings};
use crate::domain::{League, LeagueResponse, league_cache_key};
use crate::errors::{with_fetch_context, with_parse_context};
use crate::http::HttpClient;
use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use reqwest::StatusCode;
use serde_json::Value;

const LEAGUE_VIEWS: [&str; 3] = ["mTeam", "mMatchupScore", "mSettings"];

/// ESPN fantasy football API client
pub struct EspnClient {
    client: HttpClient,
    api_base_url: String,
    first_supported_season: i32,
}

impl EspnClient {
    /// Create a new ESPN API client
    pub fn new(settings: &EspnSettings, credentials: &EspnCredentials) -> Result<Self> {
        let client = HttpClient::new(settings.user_agent, settings.timeout_secs, credentials)?;
        Ok(Self {
            client,
            api_base_url: settings.api_base_url.to_string(),
            first_supported_season: settings.first_supported_season,
        })
    }

    /// Fetch league raw text
    pub async fn fetch_league_raw(&self, league_id: i64, season: i32) -> Result<String> {
        self.check_season(season)?;

        let url = self.build_league_url(league_id, season);
        info!("Fetching league {} season {} from {}", league_id, season, url);

        let response = self.client.get(&url).await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => anyhow::bail!(
                "League {} is private: set ESPN_S2 and ESPN_SWID (status {})",
                league_id,
                response.status()
            ),
            StatusCode::NOT_FOUND => {
                anyhow::bail!("League {} not found for season {}", league_id, season)
            }
            status => anyhow::bail!("API returned status: {}", status),
        }

        with_fetch_context(response.text().await, &url)
    }

    /// Fetch a league with cache integration
    /// Saves FULL raw JSON to cache, then parses it.
    pub async fn fetch_and_cache_league(
        &self,
        league_id: i64,
        season: i32,
        cache: &Cache,
        refresh: bool,
    ) -> Result<League> {
        let key = league_cache_key(league_id, season);

        // 1. Try load from cache
        let cached_value = if refresh { None } else { cache.load_raw(&key)? };

        let json_value = if let Some(val) = cached_value {
            info!("Using cached response for {}", key);
            val
        } else {
            // 2. Fetch raw text
            let text = self.fetch_league_raw(league_id, season).await?;

            // 3. Parse to Value to ensure valid JSON and save FULL structure
            let value: Value = with_parse_context(
                serde_json::from_str(&text),
                &format!("JSON for league {}", league_id),
            )?;

            // 4. Save Value to cache
            if let Err(e) = cache.save_raw(&key, &value) {
                warn!("Failed to save league {} to cache: {:?}", league_id, e);
            }

            value
        };

        // 5. Map into the league snapshot
        let response: LeagueResponse = with_parse_context(
            serde_json::from_value(json_value),
            &format!("ESPN league response for {}", league_id),
        )?;

        let mut league = response.into_league();
        league.fetched_at = Some(Utc::now());
        Ok(league)
    }

    // --- Helper Methods ---

    fn build_league_url(&self, league_id: i64, season: i32) -> String {
        let views: Vec<String> = LEAGUE_VIEWS.iter().map(|v| format!("view={}", v)).collect();
        format!(
            "{}/seasons/{}/segments/0/leagues/{}?{}",
            self.api_base_url,
            season,
            league_id,
            views.join("&")
        )
    }

    fn check_season(&self, season: i32) -> Result<()> {
        if season < self.first_supported_season {
            anyhow::bail!(
                "Season {} is not available; the league API serves {} onwards",
                season,
                self.first_supported_season
            );
        }
        Ok(())
    }
}
