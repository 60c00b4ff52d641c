//! Server dependencies for activities (using traits for testability)
//!
//! Every engine operation receives a `&ServerDeps`. Production wires in the
//! Postgres store; tests wire in the in-memory store from `TestDependencies`.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::CompetitionRules;
use crate::kernel::{BaseLeagueStore, PostgresLeagueStore};

#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseLeagueStore>,
    pub rules: CompetitionRules,
}

impl ServerDeps {
    pub fn new(store: Arc<dyn BaseLeagueStore>, rules: CompetitionRules) -> Self {
        Self { store, rules }
    }

    /// Dependencies backed by Postgres.
    pub fn postgres(pool: PgPool, rules: CompetitionRules) -> Self {
        Self::new(Arc::new(PostgresLeagueStore::new(pool)), rules)
    }
}
