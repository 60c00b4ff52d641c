pub mod activities;
pub mod data;
pub mod models;

pub use data::{CategoryBreakdown, ClubDetail, MatchSummary, PlayerTally, ScorerRow};
pub use models::{CategorySelector, LeagueSnapshot, RecordLine, StandingsRow};
