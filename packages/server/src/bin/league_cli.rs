//! Operator CLI for the league engine
//!
//! Every command prints its result as pretty JSON on stdout; logs go to
//! stderr through tracing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use league_core::common::{Actor, CategoryId, ClubId, MatchEventId, MatchId, PlayerId, UserId};
use league_core::config::Config;
use league_core::domains::audit::activities::{match_audit_log, recent_audit_log};
use league_core::domains::audit::User;
use league_core::domains::competition::Series;
use league_core::domains::matches::activities::{add_event, finalize_result, remove_event};
use league_core::domains::matches::EventType;
use league_core::domains::standings::activities::{
    compose_club_detail, compute_family_standings, compute_standings, compute_top_scorers,
};
use league_core::domains::standings::CategorySelector;
use league_core::kernel::ServerDeps;

#[derive(Parser)]
#[command(name = "league_cli")]
#[command(about = "Match ledger and standings for the amateur league")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Register an operator that --user can refer to
    AddUser { username: String },

    /// Table for one category
    Standings {
        #[arg(long)]
        category: CategoryId,
        #[arg(long)]
        series: Option<Series>,
    },

    /// Combined table for a category family ("Adultos")
    FamilyStandings {
        #[arg(long)]
        group: String,
        #[arg(long)]
        series: Option<Series>,
    },

    /// Goal ranking for a category id or a family label
    TopScorers {
        selector: CategorySelector,
        #[arg(long)]
        series: Option<Series>,
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Record, fixtures and squad of a club
    Club { id: ClubId },

    /// Audit trail, for one match or across the league
    AuditLog {
        #[arg(long = "match")]
        match_id: Option<MatchId>,
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Record a goal or card
    AddEvent {
        #[arg(long = "match")]
        match_id: MatchId,
        #[arg(long)]
        player: PlayerId,
        #[arg(long = "type")]
        event_type: EventType,
        #[arg(long)]
        minute: i32,
        #[arg(long)]
        user: Option<UserId>,
    },

    /// Delete a recorded event
    RemoveEvent {
        id: MatchEventId,
        #[arg(long)]
        user: Option<UserId>,
    },

    /// Override the score and played flag of a match
    Finalize {
        #[arg(long = "match")]
        match_id: MatchId,
        #[arg(long)]
        home: i32,
        #[arg(long)]
        away: i32,
        /// Reopen instead of closing the match
        #[arg(long)]
        reopen: bool,
        #[arg(long)]
        user: Option<UserId>,
    },
}

fn output<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

async fn connect(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,league_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let pool = connect(&config).await?;

    if let Commands::Migrate = cli.command {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Migrations applied");
        return output(&serde_json::json!({ "success": true }));
    }

    if let Commands::AddUser { username } = &cli.command {
        let user = User::create(username, &pool)
            .await
            .context("Failed to create user")?;
        tracing::info!(user_id = %user.id, "User registered");
        return output(&user);
    }

    let deps = ServerDeps::postgres(pool, config.rules.clone());

    match cli.command {
        Commands::Migrate | Commands::AddUser { .. } => Ok(()),
        Commands::Standings { category, series } => {
            output(&compute_standings(category, series, &deps).await?)
        }
        Commands::FamilyStandings { group, series } => {
            output(&compute_family_standings(&group, series, &deps).await?)
        }
        Commands::TopScorers {
            selector,
            series,
            limit,
        } => output(&compute_top_scorers(&selector, series, limit, &deps).await?),
        Commands::Club { id } => output(&compose_club_detail(id, &deps).await?),
        Commands::AuditLog { match_id, limit } => match match_id {
            Some(match_id) => output(&match_audit_log(match_id, &deps).await?),
            None => output(&recent_audit_log(limit, &deps).await?),
        },
        Commands::AddEvent {
            match_id,
            player,
            event_type,
            minute,
            user,
        } => {
            let actor = Actor::from(user);
            output(&add_event(match_id, player, event_type, minute, actor, &deps).await?)
        }
        Commands::RemoveEvent { id, user } => {
            let removed = remove_event(id, Actor::from(user), &deps).await?;
            output(&serde_json::json!({ "success": removed }))
        }
        Commands::Finalize {
            match_id,
            home,
            away,
            reopen,
            user,
        } => {
            let actor = Actor::from(user);
            output(&finalize_result(match_id, home, away, !reopen, actor, &deps).await?)
        }
    }
}
