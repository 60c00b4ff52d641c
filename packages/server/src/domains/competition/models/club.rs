use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;

use crate::common::ClubId;

/// Parallel competition a club plays in within the adult family.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default,
)]
#[sqlx(type_name = "league_series", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Series {
    #[default]
    Honor,
    Ascenso,
}

impl Series {
    pub fn as_str(&self) -> &'static str {
        match self {
            Series::Honor => "HONOR",
            Series::Ascenso => "ASCENSO",
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Series {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HONOR" => Ok(Series::Honor),
            "ASCENSO" => Ok(Series::Ascenso),
            other => Err(anyhow!("unknown league series: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub logo_url: Option<String>,
    pub series: Series,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClub {
    pub name: String,
    pub logo_url: Option<String>,
    pub series: Series,
}

impl Club {
    pub fn new(input: NewClub) -> Self {
        Self {
            id: ClubId::new(),
            name: input.name,
            logo_url: input.logo_url,
            series: input.series,
            created_at: Utc::now(),
        }
    }

    pub async fn create(input: &NewClub, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO clubs (id, name, logo_url, series)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(ClubId::new())
        .bind(&input.name)
        .bind(&input.logo_url)
        .bind(input.series)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(id: ClubId, input: &NewClub, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE clubs SET name = $2, logo_url = $3, series = $4 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.logo_url)
        .bind(input.series)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: ClubId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM clubs WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM clubs ORDER BY name")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_parses_case_insensitively() {
        assert_eq!("honor".parse::<Series>().unwrap(), Series::Honor);
        assert_eq!(" ASCENSO ".parse::<Series>().unwrap(), Series::Ascenso);
        assert!("PRIMERA".parse::<Series>().is_err());
    }

    #[test]
    fn series_serializes_as_upper_case_tag() {
        assert_eq!(serde_json::to_string(&Series::Ascenso).unwrap(), "\"ASCENSO\"");
    }
}
