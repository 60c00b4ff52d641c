pub mod roster;

pub use roster::MatchPlayer;
