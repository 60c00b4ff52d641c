use anyhow::{Context, Result};
use sqlx::PgPool;
use std::collections::HashMap;

use crate::common::{CategoryId, ClubId, PlayerId, TeamId};
use crate::domains::competition::models::{Category, Club, Player, Team};
use crate::domains::matches::models::{Match, MatchEvent};

/// Every record the read-side aggregators need, loaded in one pass.
///
/// Tables are always recomputed from a fresh snapshot; nothing derived from
/// it is stored.
#[derive(Debug, Clone, Default)]
pub struct LeagueSnapshot {
    pub categories: Vec<Category>,
    pub clubs: Vec<Club>,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
    pub events: Vec<MatchEvent>,
    index: SnapshotIndex,
}

#[derive(Debug, Clone, Default)]
struct SnapshotIndex {
    categories: HashMap<CategoryId, usize>,
    clubs: HashMap<ClubId, usize>,
    teams: HashMap<TeamId, usize>,
}

impl LeagueSnapshot {
    pub fn new(
        categories: Vec<Category>,
        clubs: Vec<Club>,
        teams: Vec<Team>,
        players: Vec<Player>,
        matches: Vec<Match>,
        events: Vec<MatchEvent>,
    ) -> Self {
        let index = SnapshotIndex {
            categories: categories.iter().enumerate().map(|(i, c)| (c.id, i)).collect(),
            clubs: clubs.iter().enumerate().map(|(i, c)| (c.id, i)).collect(),
            teams: teams.iter().enumerate().map(|(i, t)| (t.id, i)).collect(),
        };

        Self {
            categories,
            clubs,
            teams,
            players,
            matches,
            events,
            index,
        }
    }

    pub async fn load(pool: &PgPool) -> Result<Self> {
        let categories = Category::find_all(pool).await.context("loading categories")?;
        let clubs = Club::find_all(pool).await.context("loading clubs")?;
        let teams = Team::find_all(pool).await.context("loading teams")?;
        let players = Player::find_all(pool).await.context("loading players")?;
        let matches = Match::find_all(pool).await.context("loading matches")?;
        let events = MatchEvent::find_all(pool).await.context("loading match events")?;

        Ok(Self::new(categories, clubs, teams, players, matches, events))
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.index.categories.get(&id).map(|&i| &self.categories[i])
    }

    pub fn club(&self, id: ClubId) -> Option<&Club> {
        self.index.clubs.get(&id).map(|&i| &self.clubs[i])
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.index.teams.get(&id).map(|&i| &self.teams[i])
    }

    /// The club fielding a team.
    pub fn club_of_team(&self, team_id: TeamId) -> Option<&Club> {
        self.team(team_id).and_then(|t| self.club(t.club_id))
    }

    pub fn teams_in_category(&self, category_id: CategoryId) -> impl Iterator<Item = &Team> {
        self.teams.iter().filter(move |t| t.category_id == category_id)
    }

    pub fn teams_of_club(&self, club_id: ClubId) -> impl Iterator<Item = &Team> {
        self.teams.iter().filter(move |t| t.club_id == club_id)
    }

    pub fn categories_in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Category> {
        self.categories.iter().filter(move |c| c.belongs_to_group(group))
    }

    pub fn matches_of_team(&self, team_id: TeamId) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.involves(team_id))
    }

    pub fn roster(&self, team_id: TeamId) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.team_id == team_id)
    }

    pub fn events_of_player(&self, player_id: PlayerId) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().filter(move |e| e.player_id == player_id)
    }
}
