use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CategoryId, ClubId, TeamId};

/// A club's entry in one category. Unique per (club, category).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: TeamId,
    pub club_id: ClubId,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(club_id: ClubId, category_id: CategoryId) -> Self {
        Self {
            id: TeamId::new(),
            club_id,
            category_id,
            created_at: Utc::now(),
        }
    }

    /// Register a club in a category, returning the existing team when the
    /// pair is already registered.
    pub async fn find_or_create(
        club_id: ClubId,
        category_id: CategoryId,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, club_id, category_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (club_id, category_id) DO NOTHING
            "#,
        )
        .bind(TeamId::new())
        .bind(club_id)
        .bind(category_id)
        .execute(pool)
        .await?;

        sqlx::query_as::<_, Self>("SELECT * FROM teams WHERE club_id = $1 AND category_id = $2")
            .bind(club_id)
            .bind(category_id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(id: TeamId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_category(category_id: CategoryId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM teams WHERE category_id = $1 ORDER BY created_at")
            .bind(category_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM teams ORDER BY created_at")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn delete(id: TeamId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
