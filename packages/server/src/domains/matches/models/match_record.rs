use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use typed_builder::TypedBuilder;

use crate::common::{CategoryId, MatchDayId, MatchId, TeamId, VenueId};

/// Which end of the scoreboard a team occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSide {
    Home,
    Away,
}

/// Derived lifecycle state. Only `is_played` is stored; `Live` is inferred
/// from a nonzero score on an unplayed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    Scheduled,
    Live,
    Finalized,
}

/// A signed change to one side's score, applied inside the ledger
/// transaction and floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreAdjustment {
    pub side: MatchSide,
    pub delta: i32,
}

impl ScoreAdjustment {
    pub fn goal_for(side: MatchSide) -> Self {
        Self { side, delta: 1 }
    }

    pub fn goal_revoked(side: MatchSide) -> Self {
        Self { side, delta: -1 }
    }

    /// Apply to a (home, away) pair without letting either side drop below zero.
    pub fn apply(&self, home: i32, away: i32) -> (i32, i32) {
        match self.side {
            MatchSide::Home => ((home + self.delta).max(0), away),
            MatchSide::Away => (home, (away + self.delta).max(0)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Match {
    pub id: MatchId,
    pub category_id: CategoryId,
    pub match_day_id: Option<MatchDayId>,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub venue_id: Option<VenueId>,
    pub kickoff: Option<DateTime<Utc>>,
    pub home_score: i32,
    pub away_score: i32,
    pub is_played: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct NewMatch {
    pub category_id: CategoryId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    #[builder(default, setter(strip_option))]
    pub match_day_id: Option<MatchDayId>,
    #[builder(default, setter(strip_option))]
    pub venue_id: Option<VenueId>,
    #[builder(default, setter(strip_option))]
    pub kickoff: Option<DateTime<Utc>>,
}

impl Match {
    /// A freshly scheduled match: 0-0 and not played.
    pub fn scheduled(input: &NewMatch) -> Self {
        Self {
            id: MatchId::new(),
            category_id: input.category_id,
            match_day_id: input.match_day_id,
            home_team_id: input.home_team_id,
            away_team_id: input.away_team_id,
            venue_id: input.venue_id,
            kickoff: input.kickoff,
            home_score: 0,
            away_score: 0,
            is_played: false,
            created_at: Utc::now(),
        }
    }

    /// Whether this match counts toward tables: finalized, or unplayed with
    /// at least one goal on the board (live tables).
    pub fn is_standings_eligible(&self) -> bool {
        self.is_played || self.home_score > 0 || self.away_score > 0
    }

    pub fn state(&self) -> MatchState {
        if self.is_played {
            MatchState::Finalized
        } else if self.is_standings_eligible() {
            MatchState::Live
        } else {
            MatchState::Scheduled
        }
    }

    pub fn side_of(&self, team_id: TeamId) -> Option<MatchSide> {
        if team_id == self.home_team_id {
            Some(MatchSide::Home)
        } else if team_id == self.away_team_id {
            Some(MatchSide::Away)
        } else {
            None
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.side_of(team_id).is_some()
    }

    /// (goals for, goals against) from `team_id`'s point of view.
    pub fn goals_for(&self, team_id: TeamId) -> Option<(i32, i32)> {
        self.side_of(team_id).map(|side| match side {
            MatchSide::Home => (self.home_score, self.away_score),
            MatchSide::Away => (self.away_score, self.home_score),
        })
    }

    pub fn opponent_of(&self, team_id: TeamId) -> Option<TeamId> {
        self.side_of(team_id).map(|side| match side {
            MatchSide::Home => self.away_team_id,
            MatchSide::Away => self.home_team_id,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn find_by_id(id: MatchId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM matches WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM matches ORDER BY kickoff NULLS LAST, created_at")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a scheduled match. Returns `None` when the same fixture (category,
    /// home, away, kickoff) is already on the calendar.
    pub async fn create(input: &NewMatch, pool: &PgPool) -> Result<Option<Self>> {
        let mut tx = pool.begin().await?;

        let existing = sqlx::query_as::<_, (MatchId,)>(
            r#"
            SELECT id FROM matches
            WHERE category_id = $1
              AND home_team_id = $2
              AND away_team_id = $3
              AND kickoff IS NOT DISTINCT FROM $4
            "#,
        )
        .bind(input.category_id)
        .bind(input.home_team_id)
        .bind(input.away_team_id)
        .bind(input.kickoff)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_some() {
            return Ok(None);
        }

        let created = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO matches (id, category_id, match_day_id, home_team_id, away_team_id, venue_id, kickoff)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(MatchId::new())
        .bind(input.category_id)
        .bind(input.match_day_id)
        .bind(input.home_team_id)
        .bind(input.away_team_id)
        .bind(input.venue_id)
        .bind(input.kickoff)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(created))
    }

    // =========================================================================
    // Ledger writes (run inside the caller's transaction)
    // =========================================================================

    /// Lock the match row for the rest of the transaction.
    pub async fn lock(id: MatchId, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM matches WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(Into::into)
    }

    pub async fn adjust_score(
        id: MatchId,
        adjustment: ScoreAdjustment,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        let sql = match adjustment.side {
            MatchSide::Home => {
                "UPDATE matches SET home_score = GREATEST(home_score + $2, 0) WHERE id = $1 RETURNING *"
            }
            MatchSide::Away => {
                "UPDATE matches SET away_score = GREATEST(away_score + $2, 0) WHERE id = $1 RETURNING *"
            }
        };

        sqlx::query_as::<_, Self>(sql)
            .bind(id)
            .bind(adjustment.delta)
            .fetch_one(conn)
            .await
            .map_err(Into::into)
    }

    pub async fn set_result(
        id: MatchId,
        home_score: i32,
        away_score: i32,
        is_played: bool,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE matches
            SET home_score = $2, away_score = $3, is_played = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(home_score)
        .bind(away_score)
        .bind(is_played)
        .fetch_optional(conn)
        .await
        .map_err(Into::into)
    }
}
