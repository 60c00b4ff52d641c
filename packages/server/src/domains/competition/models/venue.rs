use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MatchDayId, VenueId};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Venue {
    pub async fn create(name: &str, location: Option<&str>, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO venues (id, name, location) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(VenueId::new())
        .bind(name)
        .bind(location)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM venues ORDER BY name")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}

/// A named round grouping matches across categories.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MatchDay {
    pub id: MatchDayId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl MatchDay {
    pub async fn create(
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO match_days (id, name, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(MatchDayId::new())
        .bind(name)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM match_days ORDER BY start_date")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn delete(id: MatchDayId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM match_days WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
