use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::CategoryId;

/// Result of one match from one team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn from_goals(goals_for: i32, goals_against: i32) -> Self {
        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        }
    }
}

/// A competition bracket such as "Primera Adulto" or "Juvenil".
///
/// Categories sharing a `parent_group` are combined for family standings and
/// scorer rankings, each keeping its own point values.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent_group: Option<String>,
    pub points_win: i32,
    pub points_draw: i32,
    pub points_loss: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub parent_group: Option<String>,
    pub points_win: i32,
    pub points_draw: i32,
    pub points_loss: i32,
}

impl NewCategory {
    /// A category with the standard 3/1/0 scoring.
    pub fn standard(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_group: None,
            points_win: 3,
            points_draw: 1,
            points_loss: 0,
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.parent_group = Some(group.into());
        self
    }

    pub fn with_points(mut self, win: i32, draw: i32, loss: i32) -> Self {
        self.points_win = win;
        self.points_draw = draw;
        self.points_loss = loss;
        self
    }
}

impl Category {
    pub fn new(input: NewCategory) -> Self {
        Self {
            id: CategoryId::new(),
            name: input.name,
            parent_group: input.parent_group,
            points_win: input.points_win,
            points_draw: input.points_draw,
            points_loss: input.points_loss,
            created_at: Utc::now(),
        }
    }

    pub fn points_for(&self, outcome: Outcome) -> i32 {
        match outcome {
            Outcome::Win => self.points_win,
            Outcome::Draw => self.points_draw,
            Outcome::Loss => self.points_loss,
        }
    }

    pub fn belongs_to_group(&self, group: &str) -> bool {
        self.parent_group
            .as_deref()
            .is_some_and(|g| g.eq_ignore_ascii_case(group))
    }

    pub async fn create(input: &NewCategory, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO categories (id, name, parent_group, points_win, points_draw, points_loss)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(CategoryId::new())
        .bind(&input.name)
        .bind(&input.parent_group)
        .bind(input.points_win)
        .bind(input.points_draw)
        .bind(input.points_loss)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: CategoryId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM categories ORDER BY name")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_group(group: &str, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM categories WHERE lower(parent_group) = lower($1) ORDER BY name",
        )
        .bind(group)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
