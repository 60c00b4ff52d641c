use serde::{Deserialize, Serialize};

use crate::domains::competition::models::Player;
use crate::domains::matches::models::MatchSide;

/// A player eligible to appear in a match's event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPlayer {
    pub side: MatchSide,
    #[serde(flatten)]
    pub player: Player,
}
