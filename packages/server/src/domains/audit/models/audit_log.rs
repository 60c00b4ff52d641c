use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use std::fmt;

use crate::common::{Actor, AuditLogId, MatchId, UserId};
use crate::domains::matches::models::EventType;

/// Name used in audit details when the player row is gone.
pub const UNKNOWN_PLAYER: &str = "Player";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "audit_action", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    EventAdded,
    EventRemoved,
    StatusChange,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::EventAdded => "EVENT_ADDED",
            AuditAction::EventRemoved => "EVENT_REMOVED",
            AuditAction::StatusChange => "STATUS_CHANGE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of one mutation to a match. Rows are only ever inserted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditLogEntry {
    pub id: AuditLogId,
    pub match_id: Option<MatchId>,
    /// `None` for system-initiated changes.
    pub user_id: Option<UserId>,
    pub action: AuditAction,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

/// An audit entry that has not been written yet. Built by the ledger before
/// its transaction opens and committed together with the score change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub match_id: Option<MatchId>,
    pub actor: Actor,
    pub action: AuditAction,
    pub details: String,
}

impl NewAuditEntry {
    pub fn event_added(
        match_id: MatchId,
        actor: Actor,
        event_type: EventType,
        player_name: Option<&str>,
        minute: i32,
    ) -> Self {
        Self {
            match_id: Some(match_id),
            actor,
            action: AuditAction::EventAdded,
            details: format!(
                "{} - {} (Min {})",
                event_type,
                player_name.unwrap_or(UNKNOWN_PLAYER),
                minute
            ),
        }
    }

    pub fn event_removed(
        match_id: MatchId,
        actor: Actor,
        event_type: EventType,
        player_name: Option<&str>,
    ) -> Self {
        Self {
            match_id: Some(match_id),
            actor,
            action: AuditAction::EventRemoved,
            details: format!(
                "{} REMOVED - {}",
                event_type,
                player_name.unwrap_or(UNKNOWN_PLAYER)
            ),
        }
    }

    pub fn status_change(
        match_id: MatchId,
        actor: Actor,
        home_score: i32,
        away_score: i32,
        is_played: bool,
    ) -> Self {
        let status = if is_played {
            "MATCH FINALIZED"
        } else {
            "MATCH REOPENED"
        };

        Self {
            match_id: Some(match_id),
            actor,
            action: AuditAction::StatusChange,
            details: format!("{} - Score {}-{}", status, home_score, away_score),
        }
    }

    pub fn into_entry(self) -> AuditLogEntry {
        AuditLogEntry {
            id: AuditLogId::new(),
            match_id: self.match_id,
            user_id: self.actor.user_id(),
            action: self.action,
            details: self.details,
            created_at: Utc::now(),
        }
    }
}

impl AuditLogEntry {
    pub async fn insert(entry: &NewAuditEntry, conn: &mut PgConnection) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO audit_logs (id, match_id, user_id, action, details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(AuditLogId::new())
        .bind(entry.match_id)
        .bind(entry.actor.user_id())
        .bind(entry.action)
        .bind(&entry.details)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_recent(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM audit_logs ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_for_match(match_id: MatchId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM audit_logs WHERE match_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(match_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
