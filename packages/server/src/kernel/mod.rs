//! Kernel module - storage seam and dependency wiring.

pub mod deps;
pub mod postgres_store;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use postgres_store::PostgresLeagueStore;
pub use test_dependencies::{InMemoryLeagueStore, TestDependencies};
pub use traits::*;
