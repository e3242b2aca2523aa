pub mod espn_client;

pub use espn_client::EspnClient;
