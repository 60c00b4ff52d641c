pub mod club_detail;
pub mod scorer;

pub use club_detail::{CategoryBreakdown, ClubDetail, MatchSummary, PlayerTally};
pub use scorer::ScorerRow;
