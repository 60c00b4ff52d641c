pub mod ledger;
pub mod queries;
pub mod schedule;

pub use ledger::{add_event, finalize_result, remove_event};
pub use queries::{list_matches, match_events, match_players};
pub use schedule::schedule_match;
