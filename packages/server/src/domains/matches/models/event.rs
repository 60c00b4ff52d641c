use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use std::fmt;
use std::str::FromStr;

use crate::common::{MatchEventId, MatchId, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_event_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Goal,
    YellowCard,
    RedCard,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Goal => "GOAL",
            EventType::YellowCard => "YELLOW_CARD",
            EventType::RedCard => "RED_CARD",
        }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, EventType::Goal)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "GOAL" => Ok(EventType::Goal),
            "YELLOW_CARD" => Ok(EventType::YellowCard),
            "RED_CARD" => Ok(EventType::RedCard),
            other => Err(anyhow!("unknown event type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MatchEvent {
    pub id: MatchEventId,
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub event_type: EventType,
    pub minute: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMatchEvent {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub event_type: EventType,
    pub minute: i32,
}

impl MatchEvent {
    pub fn new(input: &NewMatchEvent) -> Self {
        Self {
            id: MatchEventId::new(),
            match_id: input.match_id,
            player_id: input.player_id,
            event_type: input.event_type,
            minute: input.minute,
            created_at: Utc::now(),
        }
    }

    pub async fn find_by_id(id: MatchEventId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM match_events WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_for_match(match_id: MatchId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM match_events WHERE match_id = $1 ORDER BY minute, created_at",
        )
        .bind(match_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM match_events ORDER BY created_at")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn insert(input: &NewMatchEvent, conn: &mut PgConnection) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO match_events (id, match_id, player_id, event_type, minute)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(MatchEventId::new())
        .bind(input.match_id)
        .bind(input.player_id)
        .bind(input.event_type)
        .bind(input.minute)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    /// Delete and return the event, or `None` if another writer got there first.
    pub async fn delete(id: MatchEventId, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("DELETE FROM match_events WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_parses_wire_and_cli_spellings() {
        assert_eq!("GOAL".parse::<EventType>().unwrap(), EventType::Goal);
        assert_eq!("yellow-card".parse::<EventType>().unwrap(), EventType::YellowCard);
        assert_eq!(EventType::RedCard.to_string(), "RED_CARD");
        assert!("PENALTY".parse::<EventType>().is_err());
    }
}
