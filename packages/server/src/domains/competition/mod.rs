pub mod activities;
pub mod data;
pub mod models;

pub use data::{ImportSummary, RosterRow};
pub use models::{
    normalize_national_id, Category, Club, MatchDay, NewCategory, NewClub, NewPlayer, Outcome,
    Player, Series, Team, UpdatePlayer, Venue,
};
