//! Data module - dataset loading and derived fields

mod buckets;
mod loader;
mod processor;

pub use buckets::{BucketError, BucketSet, MARKET_VALUE_EDGES, MARKET_VALUE_LABELS};
pub use loader::{source_from_config, DataSource, LoaderError};
pub use processor::{DataProcessor, Histogram, MARKET_VALUE_BIN};

/// Column names of the player dataset (case-sensitive).
pub mod columns {
    pub const AGE: &str = "Age";
    pub const CURRENT_CLUB: &str = "Current club";
    pub const CLUB_LEAGUE: &str = "Club league";
    pub const MARKET_VALUE: &str = "Market value";
    pub const GOALS_SCORED: &str = "Goals scored";
    pub const ASSISTS: &str = "Assists";
    pub const SELECTIONS: &str = "Selections";
    pub const YOUTH_TEAM_COUNTRY: &str = "Youth Team Country";
    pub const SENIOR_DEBUT_COUNTRY: &str = "Senior Debut Country";
}
