//! Postgres implementation of `BaseLeagueStore`.
//!
//! Lookups delegate to the model query functions. Ledger commits open one
//! transaction each; score arithmetic happens in SQL under the row lock so
//! concurrent operators on the same match serialize instead of losing
//! updates.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::common::{CategoryId, ClubId, MatchEventId, MatchId, PlayerId, TeamId, UserId};
use crate::domains::audit::models::{AuditLogEntry, NewAuditEntry, User};
use crate::domains::competition::models::{Category, Club, NewPlayer, Player, Team};
use crate::domains::matches::models::{Match, MatchEvent, NewMatch, NewMatchEvent, ScoreAdjustment};
use crate::domains::standings::models::LeagueSnapshot;
use crate::kernel::BaseLeagueStore;

#[derive(Clone)]
pub struct PostgresLeagueStore {
    pool: PgPool,
}

impl PostgresLeagueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BaseLeagueStore for PostgresLeagueStore {
    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>> {
        Category::find_by_id(id, &self.pool).await
    }

    async fn find_club(&self, id: ClubId) -> Result<Option<Club>> {
        Club::find_by_id(id, &self.pool).await
    }

    async fn find_team(&self, id: TeamId) -> Result<Option<Team>> {
        Team::find_by_id(id, &self.pool).await
    }

    async fn find_player(&self, id: PlayerId) -> Result<Option<Player>> {
        Player::find_by_id(id, &self.pool).await
    }

    async fn find_player_by_national_id(&self, national_id: &str) -> Result<Option<Player>> {
        Player::find_by_national_id(national_id, &self.pool).await
    }

    async fn find_match(&self, id: MatchId) -> Result<Option<Match>> {
        Match::find_by_id(id, &self.pool).await
    }

    async fn find_event(&self, id: MatchEventId) -> Result<Option<MatchEvent>> {
        MatchEvent::find_by_id(id, &self.pool).await
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        User::find_by_id(id, &self.pool).await
    }

    async fn roster(&self, team_id: TeamId) -> Result<Vec<Player>> {
        Player::find_by_team(team_id, &self.pool).await
    }

    async fn events_for_match(&self, match_id: MatchId) -> Result<Vec<MatchEvent>> {
        MatchEvent::find_for_match(match_id, &self.pool).await
    }

    async fn audit_log_for_match(&self, match_id: MatchId) -> Result<Vec<AuditLogEntry>> {
        AuditLogEntry::find_for_match(match_id, &self.pool).await
    }

    async fn recent_audit_log(&self, limit: i64) -> Result<Vec<AuditLogEntry>> {
        AuditLogEntry::find_recent(limit, &self.pool).await
    }

    async fn snapshot(&self) -> Result<LeagueSnapshot> {
        LeagueSnapshot::load(&self.pool).await
    }

    async fn insert_player(&self, input: &NewPlayer) -> Result<Option<Player>> {
        Player::create(input, &self.pool).await
    }

    async fn reassign_player(&self, id: PlayerId, name: &str, team_id: TeamId) -> Result<Player> {
        Player::reassign(id, name, team_id, &self.pool).await
    }

    async fn insert_match(&self, input: &NewMatch) -> Result<Option<Match>> {
        Match::create(input, &self.pool).await
    }

    async fn commit_event_added(
        &self,
        event: &NewMatchEvent,
        scorer_team: TeamId,
        adjustment: Option<ScoreAdjustment>,
        audit: &NewAuditEntry,
    ) -> Result<Option<MatchEvent>> {
        let mut tx = self.pool.begin().await?;

        Match::lock(event.match_id, &mut *tx)
            .await?
            .ok_or_else(|| anyhow!("match {} was deleted mid-operation", event.match_id))?;

        // A roster import may have moved the player since the caller read it
        if Player::lock_team(event.player_id, &mut *tx).await? != Some(scorer_team) {
            debug!(player_id = %event.player_id, "Scorer changed team before commit");
            return Ok(None);
        }

        let created = MatchEvent::insert(event, &mut *tx).await?;

        if let Some(adjustment) = adjustment {
            Match::adjust_score(event.match_id, adjustment, &mut *tx).await?;
        }

        AuditLogEntry::insert(audit, &mut *tx).await?;

        tx.commit().await?;
        debug!(event_id = %created.id, "Committed event insert");

        Ok(Some(created))
    }

    async fn commit_event_removed(
        &self,
        event_id: MatchEventId,
        adjustment: Option<ScoreAdjustment>,
        audit: &NewAuditEntry,
    ) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        // Dropping tx without commit rolls back
        let Some(deleted) = MatchEvent::delete(event_id, &mut *tx).await? else {
            return Ok(false);
        };

        if let Some(adjustment) = adjustment {
            Match::lock(deleted.match_id, &mut *tx).await?;
            Match::adjust_score(deleted.match_id, adjustment, &mut *tx).await?;
        }

        AuditLogEntry::insert(audit, &mut *tx).await?;

        tx.commit().await?;
        debug!(event_id = %event_id, "Committed event removal");

        Ok(true)
    }

    async fn commit_result(
        &self,
        match_id: MatchId,
        home_score: i32,
        away_score: i32,
        is_played: bool,
        audit: &NewAuditEntry,
    ) -> Result<Option<Match>> {
        let mut tx = self.pool.begin().await?;

        let Some(updated) =
            Match::set_result(match_id, home_score, away_score, is_played, &mut *tx).await?
        else {
            return Ok(None);
        };

        AuditLogEntry::insert(audit, &mut *tx).await?;

        tx.commit().await?;
        debug!(match_id = %match_id, "Committed result override");

        Ok(Some(updated))
    }
}
