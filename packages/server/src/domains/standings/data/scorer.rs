use serde::{Deserialize, Serialize};

use crate::common::{ClubId, PlayerId};

/// One line of a top-scorer ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerRow {
    pub player_id: PlayerId,
    pub player_name: String,
    pub club_id: ClubId,
    pub club_name: String,
    pub logo_url: Option<String>,
    pub goals: u32,
}
