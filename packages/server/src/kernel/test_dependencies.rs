// TestDependencies - in-memory implementations for testing
//
// InMemoryLeagueStore mirrors the transactional contract of the Postgres
// store: every commit_* call works on a private copy of the state and swaps
// it in only if every step succeeded. Audit writes referencing an unknown
// user fail like the foreign key does in Postgres, and can be made to fail on
// demand to exercise the rollback path.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{BaseLeagueStore, ServerDeps};
use crate::common::{CategoryId, ClubId, MatchEventId, MatchId, PlayerId, TeamId, UserId};
use crate::config::CompetitionRules;
use crate::domains::audit::models::{AuditLogEntry, NewAuditEntry, User};
use crate::domains::competition::models::{
    normalize_national_id, Category, Club, NewCategory, NewClub, NewPlayer, Player, Team,
};
use crate::domains::matches::models::{Match, MatchEvent, NewMatch, NewMatchEvent, ScoreAdjustment};
use crate::domains::standings::models::LeagueSnapshot;

// =============================================================================
// State
// =============================================================================

#[derive(Debug, Clone, Default)]
struct LeagueState {
    users: Vec<User>,
    categories: Vec<Category>,
    clubs: Vec<Club>,
    teams: Vec<Team>,
    players: Vec<Player>,
    matches: Vec<Match>,
    events: Vec<MatchEvent>,
    /// Append order; readers reverse it for newest-first views.
    audit: Vec<AuditLogEntry>,
}

impl LeagueState {
    fn match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    fn adjust(&mut self, id: MatchId, adjustment: ScoreAdjustment) -> Result<()> {
        let Some(m) = self.match_mut(id) else {
            bail!("match {} was deleted mid-operation", id);
        };
        let (home, away) = adjustment.apply(m.home_score, m.away_score);
        m.home_score = home;
        m.away_score = away;
        Ok(())
    }
}

// =============================================================================
// In-memory store
// =============================================================================

#[derive(Default)]
pub struct InMemoryLeagueStore {
    state: Mutex<LeagueState>,
    fail_audit_writes: AtomicBool,
}

impl InMemoryLeagueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent audit write fail, aborting its transaction.
    pub fn fail_audit_writes(&self, fail: bool) {
        self.fail_audit_writes.store(fail, Ordering::SeqCst);
    }

    fn state(&self) -> MutexGuard<'_, LeagueState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` against a copy of the state; keep the copy only on success.
    fn transact<T>(&self, f: impl FnOnce(&mut LeagueState) -> Result<T>) -> Result<T> {
        let mut guard = self.state();
        let mut draft = guard.clone();
        let out = f(&mut draft)?;
        *guard = draft;
        Ok(out)
    }

    fn append_audit(&self, state: &mut LeagueState, entry: &NewAuditEntry) -> Result<()> {
        if self.fail_audit_writes.load(Ordering::SeqCst) {
            bail!("audit log unavailable");
        }
        if let Some(user_id) = entry.actor.user_id() {
            if !state.users.iter().any(|u| u.id == user_id) {
                bail!("audit entry references unknown user {}", user_id);
            }
        }
        state.audit.push(entry.clone().into_entry());
        Ok(())
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    pub fn add_user(&self, username: &str) -> User {
        let user = User::new(username);
        self.state().users.push(user.clone());
        user
    }

    pub fn add_category(&self, input: NewCategory) -> Category {
        let category = Category::new(input);
        self.state().categories.push(category.clone());
        category
    }

    pub fn add_club(&self, input: NewClub) -> Club {
        let club = Club::new(input);
        self.state().clubs.push(club.clone());
        club
    }

    pub fn add_team(&self, club_id: ClubId, category_id: CategoryId) -> Team {
        let team = Team::new(club_id, category_id);
        self.state().teams.push(team.clone());
        team
    }

    pub fn add_player(&self, input: NewPlayer) -> Player {
        let player = Player::new(input);
        self.state().players.push(player.clone());
        player
    }

    pub fn add_match(&self, input: NewMatch) -> Match {
        let m = Match::scheduled(&input);
        self.state().matches.push(m.clone());
        m
    }

    /// Overwrite a match's score without touching the ledger. Seeds
    /// historical results for read-side tests.
    pub fn set_score(&self, match_id: MatchId, home_score: i32, away_score: i32, is_played: bool) {
        if let Some(m) = self.state().match_mut(match_id) {
            m.home_score = home_score;
            m.away_score = away_score;
            m.is_played = is_played;
        }
    }

    /// Every audit entry, oldest first.
    pub fn audit_entries(&self) -> Vec<AuditLogEntry> {
        self.state().audit.clone()
    }

    pub fn event_count(&self) -> usize {
        self.state().events.len()
    }
}

#[async_trait]
impl BaseLeagueStore for InMemoryLeagueStore {
    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(self.state().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_club(&self, id: ClubId) -> Result<Option<Club>> {
        Ok(self.state().clubs.iter().find(|c| c.id == id).cloned())
    }

    async fn find_team(&self, id: TeamId) -> Result<Option<Team>> {
        Ok(self.state().teams.iter().find(|t| t.id == id).cloned())
    }

    async fn find_player(&self, id: PlayerId) -> Result<Option<Player>> {
        Ok(self.state().players.iter().find(|p| p.id == id).cloned())
    }

    async fn find_player_by_national_id(&self, national_id: &str) -> Result<Option<Player>> {
        let wanted = normalize_national_id(national_id);
        Ok(self
            .state()
            .players
            .iter()
            .find(|p| p.national_id == wanted)
            .cloned())
    }

    async fn find_match(&self, id: MatchId) -> Result<Option<Match>> {
        Ok(self.state().matches.iter().find(|m| m.id == id).cloned())
    }

    async fn find_event(&self, id: MatchEventId) -> Result<Option<MatchEvent>> {
        Ok(self.state().events.iter().find(|e| e.id == id).cloned())
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.state().users.iter().find(|u| u.id == id).cloned())
    }

    async fn roster(&self, team_id: TeamId) -> Result<Vec<Player>> {
        let mut players: Vec<Player> = self
            .state()
            .players
            .iter()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }

    async fn events_for_match(&self, match_id: MatchId) -> Result<Vec<MatchEvent>> {
        let mut events: Vec<MatchEvent> = self
            .state()
            .events
            .iter()
            .filter(|e| e.match_id == match_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.minute);
        Ok(events)
    }

    async fn audit_log_for_match(&self, match_id: MatchId) -> Result<Vec<AuditLogEntry>> {
        Ok(self
            .state()
            .audit
            .iter()
            .rev()
            .filter(|a| a.match_id == Some(match_id))
            .cloned()
            .collect())
    }

    async fn recent_audit_log(&self, limit: i64) -> Result<Vec<AuditLogEntry>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self.state().audit.iter().rev().take(limit).cloned().collect())
    }

    async fn snapshot(&self) -> Result<LeagueSnapshot> {
        let state = self.state().clone();
        Ok(LeagueSnapshot::new(
            state.categories,
            state.clubs,
            state.teams,
            state.players,
            state.matches,
            state.events,
        ))
    }

    async fn insert_player(&self, input: &NewPlayer) -> Result<Option<Player>> {
        self.transact(|state| {
            let player = Player::new(input.clone());
            if state.players.iter().any(|p| p.national_id == player.national_id) {
                return Ok(None);
            }
            state.players.push(player.clone());
            Ok(Some(player))
        })
    }

    async fn reassign_player(&self, id: PlayerId, name: &str, team_id: TeamId) -> Result<Player> {
        self.transact(|state| {
            let Some(player) = state.players.iter_mut().find(|p| p.id == id) else {
                bail!("player {} does not exist", id);
            };
            player.name = name.to_string();
            player.team_id = team_id;
            Ok(player.clone())
        })
    }

    async fn insert_match(&self, input: &NewMatch) -> Result<Option<Match>> {
        self.transact(|state| {
            let duplicate = state.matches.iter().any(|m| {
                m.category_id == input.category_id
                    && m.home_team_id == input.home_team_id
                    && m.away_team_id == input.away_team_id
                    && m.kickoff == input.kickoff
            });
            if duplicate {
                return Ok(None);
            }
            let m = Match::scheduled(input);
            state.matches.push(m.clone());
            Ok(Some(m))
        })
    }

    async fn commit_event_added(
        &self,
        event: &NewMatchEvent,
        scorer_team: TeamId,
        adjustment: Option<ScoreAdjustment>,
        audit: &NewAuditEntry,
    ) -> Result<Option<MatchEvent>> {
        self.transact(|state| {
            if !state.matches.iter().any(|m| m.id == event.match_id) {
                bail!("match {} was deleted mid-operation", event.match_id);
            }

            let current_team = state
                .players
                .iter()
                .find(|p| p.id == event.player_id)
                .map(|p| p.team_id);
            if current_team != Some(scorer_team) {
                return Ok(None);
            }

            let created = MatchEvent::new(event);
            state.events.push(created.clone());

            if let Some(adjustment) = adjustment {
                state.adjust(event.match_id, adjustment)?;
            }

            self.append_audit(state, audit)?;
            Ok(Some(created))
        })
    }

    async fn commit_event_removed(
        &self,
        event_id: MatchEventId,
        adjustment: Option<ScoreAdjustment>,
        audit: &NewAuditEntry,
    ) -> Result<bool> {
        self.transact(|state| {
            let Some(pos) = state.events.iter().position(|e| e.id == event_id) else {
                return Ok(false);
            };
            let removed = state.events.remove(pos);

            if let Some(adjustment) = adjustment {
                state.adjust(removed.match_id, adjustment)?;
            }

            self.append_audit(state, audit)?;
            Ok(true)
        })
    }

    async fn commit_result(
        &self,
        match_id: MatchId,
        home_score: i32,
        away_score: i32,
        is_played: bool,
        audit: &NewAuditEntry,
    ) -> Result<Option<Match>> {
        self.transact(|state| {
            let Some(m) = state.match_mut(match_id) else {
                return Ok(None);
            };
            m.home_score = home_score;
            m.away_score = away_score;
            m.is_played = is_played;
            let updated = m.clone();

            self.append_audit(state, audit)?;
            Ok(Some(updated))
        })
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builds `ServerDeps` over an in-memory store, keeping a handle on the store
/// so tests can seed data and inspect the audit trail.
pub struct TestDependencies {
    pub store: Arc<InMemoryLeagueStore>,
    pub rules: CompetitionRules,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryLeagueStore::new()),
            rules: CompetitionRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: CompetitionRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn deps(&self) -> ServerDeps {
        ServerDeps::new(self.store.clone(), self.rules.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Actor;
    use crate::domains::competition::models::Series;
    use crate::domains::matches::models::{EventType, MatchSide};

    fn seeded() -> (InMemoryLeagueStore, Match, Player) {
        let store = InMemoryLeagueStore::new();
        let category = store.add_category(NewCategory::standard("Juvenil"));
        let home = store.add_club(NewClub {
            name: "Renca Norte".to_string(),
            logo_url: None,
            series: Series::Honor,
        });
        let away = store.add_club(NewClub {
            name: "Villa Sur".to_string(),
            logo_url: None,
            series: Series::Honor,
        });
        let home_team = store.add_team(home.id, category.id);
        let away_team = store.add_team(away.id, category.id);
        let player = store.add_player(NewPlayer {
            team_id: home_team.id,
            name: "Diego Rojas".to_string(),
            national_id: "11.111.111-1".to_string(),
            jersey_number: Some(9),
            birth_date: None,
        });
        let m = store.add_match(
            NewMatch::builder()
                .category_id(category.id)
                .home_team_id(home_team.id)
                .away_team_id(away_team.id)
                .build(),
        );
        (store, m, player)
    }

    #[tokio::test]
    async fn failed_audit_write_discards_the_whole_commit() {
        let (store, m, player) = seeded();
        store.fail_audit_writes(true);

        let event = NewMatchEvent {
            match_id: m.id,
            player_id: player.id,
            event_type: EventType::Goal,
            minute: 10,
        };
        let audit = NewAuditEntry::event_added(m.id, Actor::System, EventType::Goal, Some("Diego Rojas"), 10);

        let result = store
            .commit_event_added(
                &event,
                player.team_id,
                Some(ScoreAdjustment::goal_for(MatchSide::Home)),
                &audit,
            )
            .await;

        assert!(result.is_err());
        let after = store.find_match(m.id).await.unwrap().unwrap();
        assert_eq!(after.home_score, 0);
        assert_eq!(store.event_count(), 0);
        assert!(store.audit_entries().is_empty());
    }

    #[tokio::test]
    async fn event_for_a_moved_scorer_is_not_committed() {
        let (store, m, player) = seeded();
        let old_team = player.team_id;
        store
            .reassign_player(player.id, &player.name, m.away_team_id)
            .await
            .unwrap();

        let event = NewMatchEvent {
            match_id: m.id,
            player_id: player.id,
            event_type: EventType::Goal,
            minute: 10,
        };
        let audit = NewAuditEntry::event_added(m.id, Actor::System, EventType::Goal, Some("Diego Rojas"), 10);

        let committed = store
            .commit_event_added(&event, old_team, Some(ScoreAdjustment::goal_for(MatchSide::Home)), &audit)
            .await
            .unwrap();

        assert!(committed.is_none());
        let after = store.find_match(m.id).await.unwrap().unwrap();
        assert_eq!(after.home_score, 0);
        assert_eq!(store.event_count(), 0);
        assert!(store.audit_entries().is_empty());
    }

    #[tokio::test]
    async fn audit_entry_for_unknown_user_aborts_the_commit() {
        let (store, m, _) = seeded();
        let audit = NewAuditEntry::status_change(m.id, Actor::User(UserId::new()), 2, 0, true);

        let result = store.commit_result(m.id, 2, 0, true, &audit).await;

        assert!(result.is_err());
        let after = store.find_match(m.id).await.unwrap().unwrap();
        assert_eq!((after.home_score, after.is_played), (0, false));
    }

    #[tokio::test]
    async fn national_id_lookup_normalizes_the_argument() {
        let (store, _, player) = seeded();
        let found = store.find_player_by_national_id("111111111").await.unwrap();
        assert_eq!(found.map(|p| p.id), Some(player.id));
    }

    #[tokio::test]
    async fn duplicate_national_id_is_not_inserted() {
        let (store, _, player) = seeded();
        let again = store
            .insert_player(&NewPlayer {
                team_id: player.team_id,
                name: "Otro".to_string(),
                national_id: "11111111-1".to_string(),
                jersey_number: None,
                birth_date: None,
            })
            .await
            .unwrap();
        assert!(again.is_none());
    }
}
