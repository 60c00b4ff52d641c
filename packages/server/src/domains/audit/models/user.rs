use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::UserId;

/// An operator account that audit entries are attributed to. Credentials
/// live with the login layer; this table only anchors `audit_logs.user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            created_at: Utc::now(),
        }
    }

    pub async fn create(username: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("INSERT INTO users (id, username) VALUES ($1, $2) RETURNING *")
            .bind(UserId::new())
            .bind(username)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
