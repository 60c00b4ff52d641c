pub mod category;
pub mod club;
pub mod player;
pub mod team;
pub mod venue;

pub use category::{Category, NewCategory, Outcome};
pub use club::{Club, NewClub, Series};
pub use player::{normalize_national_id, NewPlayer, Player, UpdatePlayer};
pub use team::Team;
pub use venue::{MatchDay, Venue};
