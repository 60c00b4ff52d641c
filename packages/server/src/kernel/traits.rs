// Trait definitions for dependency injection
//
// BaseLeagueStore is the seam between the engine and durable storage. It
// carries no scoring logic: the ledger decides WHAT changes (which side, which
// audit line) and the store only guarantees that each commit_* call lands
// atomically.
//
// Naming convention: Base* for trait names.

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{CategoryId, ClubId, MatchEventId, MatchId, PlayerId, TeamId, UserId};
use crate::domains::audit::models::{AuditLogEntry, NewAuditEntry, User};
use crate::domains::competition::models::{Category, Club, NewPlayer, Player, Team};
use crate::domains::matches::models::{Match, MatchEvent, NewMatch, NewMatchEvent, ScoreAdjustment};
use crate::domains::standings::models::LeagueSnapshot;

#[async_trait]
pub trait BaseLeagueStore: Send + Sync {
    // =========================================================================
    // Lookups
    // =========================================================================

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>>;

    async fn find_club(&self, id: ClubId) -> Result<Option<Club>>;

    async fn find_team(&self, id: TeamId) -> Result<Option<Team>>;

    async fn find_player(&self, id: PlayerId) -> Result<Option<Player>>;

    /// Look up by national id; the argument is normalized by the store.
    async fn find_player_by_national_id(&self, national_id: &str) -> Result<Option<Player>>;

    async fn find_match(&self, id: MatchId) -> Result<Option<Match>>;

    async fn find_event(&self, id: MatchEventId) -> Result<Option<MatchEvent>>;

    async fn find_user(&self, id: UserId) -> Result<Option<User>>;

    /// Players of a team, ordered by name.
    async fn roster(&self, team_id: TeamId) -> Result<Vec<Player>>;

    /// Events of a match, ordered by minute.
    async fn events_for_match(&self, match_id: MatchId) -> Result<Vec<MatchEvent>>;

    /// Newest first.
    async fn audit_log_for_match(&self, match_id: MatchId) -> Result<Vec<AuditLogEntry>>;

    /// Newest first, at most `limit` entries.
    async fn recent_audit_log(&self, limit: i64) -> Result<Vec<AuditLogEntry>>;

    /// Full current state for read-side aggregation.
    async fn snapshot(&self) -> Result<LeagueSnapshot>;

    // =========================================================================
    // Plain writes
    // =========================================================================

    /// `None` when the normalized national id is already registered.
    async fn insert_player(&self, input: &NewPlayer) -> Result<Option<Player>>;

    async fn reassign_player(&self, id: PlayerId, name: &str, team_id: TeamId) -> Result<Player>;

    /// `None` when the same fixture is already scheduled.
    async fn insert_match(&self, input: &NewMatch) -> Result<Option<Match>>;

    // =========================================================================
    // Ledger writes - each call is one transaction
    // =========================================================================

    /// Insert the event, apply the score adjustment (if any) and write the
    /// audit entry, all or nothing. `scorer_team` is the team the caller read
    /// for the player; if the player has moved since, nothing is written and
    /// `None` is returned.
    async fn commit_event_added(
        &self,
        event: &NewMatchEvent,
        scorer_team: TeamId,
        adjustment: Option<ScoreAdjustment>,
        audit: &NewAuditEntry,
    ) -> Result<Option<MatchEvent>>;

    /// Delete the event, apply the adjustment (floored at zero) and write the
    /// audit entry, all or nothing. Returns `false` without writing anything
    /// if the event no longer exists.
    async fn commit_event_removed(
        &self,
        event_id: MatchEventId,
        adjustment: Option<ScoreAdjustment>,
        audit: &NewAuditEntry,
    ) -> Result<bool>;

    /// Overwrite both scores and the played flag, writing the audit entry in
    /// the same transaction. `None` if the match does not exist.
    async fn commit_result(
        &self,
        match_id: MatchId,
        home_score: i32,
        away_score: i32,
        is_played: bool,
        audit: &NewAuditEntry,
    ) -> Result<Option<Match>>;
}
