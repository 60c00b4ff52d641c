pub mod selector;
pub mod snapshot;
pub mod table;

pub use selector::CategorySelector;
pub use snapshot::LeagueSnapshot;
pub use table::{RecordLine, StandingsRow};
