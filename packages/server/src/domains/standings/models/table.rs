use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::common::{ClubId, TeamId};
use crate::domains::competition::models::{Category, Club, Outcome};
use crate::domains::matches::models::Match;

/// Running win/draw/loss record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLine {
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: i32,
}

impl RecordLine {
    /// Count one match for `team_id`, scored with `category`'s point values.
    /// Matches the team did not take part in are ignored.
    pub fn record(&mut self, m: &Match, team_id: TeamId, category: &Category) {
        let Some((goals_for, goals_against)) = m.goals_for(team_id) else {
            return;
        };

        let outcome = Outcome::from_goals(goals_for, goals_against);

        self.played += 1;
        self.goals_for += goals_for;
        self.goals_against += goals_against;
        self.points += category.points_for(outcome);

        match outcome {
            Outcome::Win => self.won += 1,
            Outcome::Draw => self.drawn += 1,
            Outcome::Loss => self.lost += 1,
        }
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for - self.goals_against
    }
}

/// One line of a league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub club_id: ClubId,
    pub club_name: String,
    pub logo_url: Option<String>,
    /// Set for single-category tables; `None` for family tables, which
    /// combine several of the club's teams.
    pub team_id: Option<TeamId>,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
    pub points: i32,
}

impl StandingsRow {
    pub fn new(club: &Club, team_id: Option<TeamId>, line: RecordLine) -> Self {
        Self {
            club_id: club.id,
            club_name: club.name.clone(),
            logo_url: club.logo_url.clone(),
            team_id,
            played: line.played,
            won: line.won,
            drawn: line.drawn,
            lost: line.lost,
            goals_for: line.goals_for,
            goals_against: line.goals_against,
            goal_difference: line.goal_difference(),
            points: line.points,
        }
    }

    /// Single-category order: points, goal difference, goals scored.
    pub fn category_order(a: &Self, b: &Self) -> Ordering {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    }

    /// Family order: points, then goal difference only.
    pub fn family_order(a: &Self, b: &Self) -> Ordering {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
    }
}
