//! Typed ID definitions for all league entities.
//!
//! ```rust
//! use league_core::common::{MatchId, PlayerId};
//!
//! let match_id = MatchId::new();
//! let player_id = PlayerId::new();
//!
//! // This would be a compile error:
//! // let wrong: MatchId = player_id;
//! # let _ = (match_id, player_id);
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Club entities.
pub struct ClubEntity;

/// Marker type for Category entities (e.g. "Primera Adulto").
pub struct CategoryEntity;

/// Marker type for Team entities (a club fielding a roster in one category).
pub struct TeamEntity;

/// Marker type for Player entities.
pub struct PlayerEntity;

/// Marker type for Venue entities.
pub struct VenueEntity;

/// Marker type for MatchDay entities (a round).
pub struct MatchDayEntity;

/// Marker type for Match entities.
pub struct MatchEntity;

/// Marker type for MatchEvent entities (goals and cards).
pub struct MatchEventEntity;

/// Marker type for AuditLogEntry entities.
pub struct AuditLogEntity;

/// Marker type for operator accounts.
pub struct UserEntity;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type ClubId = Id<ClubEntity>;
pub type CategoryId = Id<CategoryEntity>;
pub type TeamId = Id<TeamEntity>;
pub type PlayerId = Id<PlayerEntity>;
pub type VenueId = Id<VenueEntity>;
pub type MatchDayId = Id<MatchDayEntity>;
pub type MatchId = Id<MatchEntity>;
pub type MatchEventId = Id<MatchEventEntity>;
pub type AuditLogId = Id<AuditLogEntity>;
pub type UserId = Id<UserEntity>;
