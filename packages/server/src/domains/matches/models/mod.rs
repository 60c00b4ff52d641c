pub mod event;
pub mod match_record;

pub use event::{EventType, MatchEvent, NewMatchEvent};
pub use match_record::{Match, MatchSide, MatchState, NewMatch, ScoreAdjustment};
