pub mod club_detail;
pub mod scorers;
pub mod table;

pub use club_detail::{club_detail, compose_club_detail};
pub use scorers::{compute_top_scorers, top_scorers};
pub use table::{category_table, compute_family_standings, compute_standings, family_table};
