pub mod settings;

pub use settings::{AppConfig, EspnCredentials, EspnSettings, RankingSettings};
