// Common types shared across the league domains

pub mod actor;
pub mod entity_ids;
pub mod error;
pub mod id;

pub use actor::Actor;
pub use entity_ids::*;
pub use error::{LeagueError, LeagueResult};
pub use id::Id;
