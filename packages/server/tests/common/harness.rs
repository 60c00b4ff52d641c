//! Test harnesses.
//!
//! `TestHarness` runs the engine over the in-memory store and needs nothing
//! external. `PostgresHarness` starts one shared Postgres container for the
//! whole run, migrates it once, and hands each test a fresh pool.

use anyhow::{Context, Result};
use league_core::kernel::{InMemoryLeagueStore, ServerDeps, TestDependencies};
use league_core::CompetitionRules;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

fn init_tracing() {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// In-memory harness
// =============================================================================

/// Engine wired to a fresh in-memory store.
///
/// ```ignore
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let fixture = seed_fixture(&ctx.store, primera_adulto());
///     add_event(fixture.m.id, ..., &ctx.deps).await.unwrap();
/// }
/// ```
pub struct TestHarness {
    pub store: Arc<InMemoryLeagueStore>,
    pub deps: ServerDeps,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::with_rules(CompetitionRules::default())
    }
}

impl TestHarness {
    pub fn with_rules(rules: CompetitionRules) -> Self {
        init_tracing();
        let test_deps = TestDependencies::new().with_rules(rules);
        Self {
            store: test_deps.store.clone(),
            deps: test_deps.deps(),
        }
    }
}

// =============================================================================
// Postgres harness
// =============================================================================

/// Shared container, started and migrated once per test binary.
struct SharedPostgres {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_POSTGRES: OnceCell<SharedPostgres> = OnceCell::const_new();

impl SharedPostgres {
    async fn init() -> Result<Self> {
        init_tracing();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let host = postgres.get_host().await?;
        let port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_POSTGRES
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared Postgres container")
            })
            .await
    }
}

/// Engine wired to a real Postgres database.
pub struct PostgresHarness {
    pub db_pool: PgPool,
    pub deps: ServerDeps,
}

impl AsyncTestContext for PostgresHarness {
    async fn setup() -> Self {
        let shared = SharedPostgres::get().await;
        let db_pool = PgPool::connect(&shared.db_url)
            .await
            .expect("Failed to connect to test database");
        let deps = ServerDeps::postgres(db_pool.clone(), CompetitionRules::default());
        Self { db_pool, deps }
    }
}
