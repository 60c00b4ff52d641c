use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{PlayerId, TeamId};

lazy_static! {
    // Separators used when national ids are typed by hand: dots, dashes, spaces
    static ref NATIONAL_ID_NOISE: Regex = Regex::new(r"[\s.\-_/,]").unwrap();
}

/// Canonical form of a national id: separators stripped, upper-cased.
///
/// `"12.345.678-k"` and `"12345678K"` name the same person.
pub fn normalize_national_id(raw: &str) -> String {
    NATIONAL_ID_NOISE.replace_all(raw.trim(), "").to_uppercase()
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: PlayerId,
    pub team_id: TeamId,
    pub name: String,
    /// Always stored normalized; see [`normalize_national_id`].
    pub national_id: String,
    pub jersey_number: Option<i32>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlayer {
    pub team_id: TeamId,
    pub name: String,
    pub national_id: String,
    pub jersey_number: Option<i32>,
    pub birth_date: Option<NaiveDate>,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlayer {
    pub name: Option<String>,
    pub national_id: Option<String>,
    pub jersey_number: Option<i32>,
}

impl Player {
    pub fn new(input: NewPlayer) -> Self {
        Self {
            id: PlayerId::new(),
            team_id: input.team_id,
            name: input.name,
            national_id: normalize_national_id(&input.national_id),
            jersey_number: input.jersey_number,
            birth_date: input.birth_date,
            created_at: Utc::now(),
        }
    }

    /// Insert a player. Returns `None` when the normalized national id is
    /// already registered.
    pub async fn create(input: &NewPlayer, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO players (id, team_id, name, national_id, jersey_number, birth_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (national_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(PlayerId::new())
        .bind(input.team_id)
        .bind(&input.name)
        .bind(normalize_national_id(&input.national_id))
        .bind(input.jersey_number)
        .bind(input.birth_date)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(id: PlayerId, input: &UpdatePlayer, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE players
            SET name = COALESCE($2, name),
                national_id = COALESCE($3, national_id),
                jersey_number = COALESCE($4, jersey_number)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.national_id.as_deref().map(normalize_national_id))
        .bind(input.jersey_number)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Rename a player and move them onto another team (roster re-import).
    pub async fn reassign(id: PlayerId, name: &str, team_id: TeamId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE players SET name = $2, team_id = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(team_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: PlayerId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM players WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Current team of a player, share-locked until the transaction ends so
    /// a concurrent reassignment waits for it.
    pub async fn lock_team(id: PlayerId, conn: &mut PgConnection) -> Result<Option<TeamId>> {
        let row = sqlx::query_as::<_, (TeamId,)>("SELECT team_id FROM players WHERE id = $1 FOR SHARE")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(row.map(|(team_id,)| team_id))
    }

    pub async fn find_by_national_id(national_id: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM players WHERE national_id = $1")
            .bind(normalize_national_id(national_id))
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_team(team_id: TeamId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM players WHERE team_id = $1 ORDER BY name")
            .bind(team_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM players ORDER BY name")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn delete(id: PlayerId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_separators_and_upper_cases() {
        assert_eq!(normalize_national_id("12.345.678-k"), "12345678K");
        assert_eq!(normalize_national_id(" 9 876 543-2 "), "98765432");
    }

    #[test]
    fn normalized_ids_collide_for_the_same_person() {
        assert_eq!(
            normalize_national_id("12.345.678-K"),
            normalize_national_id("12345678k")
        );
    }

    #[test]
    fn new_player_stores_the_normalized_id() {
        let player = Player::new(NewPlayer {
            team_id: TeamId::new(),
            name: "Iván Zamorano".to_string(),
            national_id: "9.876.543-k".to_string(),
            jersey_number: Some(9),
            birth_date: None,
        });
        assert_eq!(player.national_id, "9876543K");
    }
}
