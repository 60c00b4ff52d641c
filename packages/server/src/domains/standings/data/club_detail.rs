use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::common::{CategoryId, ClubId, MatchId, PlayerId, TeamId};
use crate::domains::competition::models::Series;
use crate::domains::matches::models::{MatchSide, MatchState};
use crate::domains::standings::models::RecordLine;

/// Everything a club page shows, one block per category the club plays in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubDetail {
    pub club_id: ClubId,
    pub name: String,
    pub logo_url: Option<String>,
    pub series: Series,
    /// Keyed by category name.
    pub categories: BTreeMap<String, CategoryBreakdown>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category_id: CategoryId,
    pub team_id: TeamId,
    pub stats: RecordLine,
    /// Most recent first.
    pub past: Vec<MatchSummary>,
    /// Soonest first.
    pub upcoming: Vec<MatchSummary>,
    /// Ordered by name.
    pub roster: Vec<PlayerTally>,
}

/// A match from the club's side of the pitch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub side: MatchSide,
    pub state: MatchState,
    pub kickoff: Option<DateTime<Utc>>,
    pub opponent_club_id: Option<ClubId>,
    pub opponent_name: Option<String>,
    pub opponent_logo_url: Option<String>,
    pub home_score: i32,
    pub away_score: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTally {
    pub player_id: PlayerId,
    pub name: String,
    pub jersey_number: Option<i32>,
    pub goals: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}
