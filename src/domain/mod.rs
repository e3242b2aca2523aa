mod collection;
pub mod espn;
pub mod models;

pub use collection::TeamCollection;
pub use espn::LeagueResponse;
pub use models::*;
