pub mod roster;

pub use roster::import_roster;
