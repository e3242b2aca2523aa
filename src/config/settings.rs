use std::path::PathBuf;

pub struct RankingSettings {
    /// Last week of the regular season; later weeks are never ranked
    pub max_week: usize,
    /// Adds the vs-median and combined records to every result
    pub include_median: bool,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            max_week: 14,
            include_median: true,
        }
    }
}

pub struct EspnSettings {
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub api_base_url: &'static str,
    /// Oldest season served by the v3 league endpoint
    pub first_supported_season: i32,
}

impl Default for EspnSettings {
    fn default() -> Self {
        Self {
            user_agent: "FantasyPowerRankings/1.0",
            timeout_secs: 30,
            api_base_url: "https://lm-api-reads.fantasy.espn.com/apis/v3/games/ffl",
            first_supported_season: 2018,
        }
    }
}

/// Cookies for private leagues, taken from ESPN_S2 and ESPN_SWID
#[derive(Clone, Default)]
pub struct EspnCredentials {
    pub espn_s2: Option<String>,
    pub swid: Option<String>,
}

impl EspnCredentials {
    pub fn from_env() -> Self {
        Self {
            espn_s2: std::env::var("ESPN_S2").ok().filter(|v| !v.is_empty()),
            swid: std::env::var("ESPN_SWID").ok().filter(|v| !v.is_empty()),
        }
    }

    pub fn cookie_header(&self) -> Option<String> {
        match (&self.espn_s2, &self.swid) {
            (Some(s2), Some(swid)) => Some(format!("espn_s2={}; SWID={}", s2, swid)),
            _ => None,
        }
    }
}

pub struct AppConfig {
    pub ranking: RankingSettings,
    pub espn: EspnSettings,
    pub cache_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            ranking: RankingSettings::default(),
            espn: EspnSettings::default(),
            cache_dir: PathBuf::from("cache"),
        }
    }

    /// Apply command-line overrides to the ranking settings
    pub fn with_ranking_overrides(mut self, max_week: Option<usize>, no_median: bool) -> Self {
        if let Some(max_week) = max_week {
            self.ranking.max_week = max_week;
        }
        if no_median {
            self.ranking.include_median = false;
        }
        self
    }
}
