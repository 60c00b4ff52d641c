pub mod roster;

pub use roster::{ImportSummary, RosterRow};
