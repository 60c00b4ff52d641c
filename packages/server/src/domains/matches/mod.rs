pub mod activities;
pub mod data;
pub mod models;

pub use data::MatchPlayer;
pub use models::{
    EventType, Match, MatchEvent, MatchSide, MatchState, NewMatch, NewMatchEvent, ScoreAdjustment,
};
