pub mod ingestion;
pub mod processing;

pub use ingestion::IngestionService;
pub use processing::{LeagueSource, OutputFormat, ProcessingService};
