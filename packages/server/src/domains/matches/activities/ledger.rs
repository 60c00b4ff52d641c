//! Match event ledger.
//!
//! The only code paths that change a match's score. Each operation resolves
//! and validates its references first, decides the score adjustment and the
//! audit line, then hands both to the store as one commit. A match's score
//! therefore always equals its net GOAL events per side, except after an
//! explicit `finalize_result` override, which is itself audited.

use tracing::{info, warn};

use crate::common::{Actor, LeagueError, LeagueResult, MatchEventId, MatchId, PlayerId};
use crate::domains::audit::models::NewAuditEntry;
use crate::domains::matches::models::{
    EventType, Match, MatchEvent, NewMatchEvent, ScoreAdjustment,
};
use crate::kernel::ServerDeps;

async fn load_match(match_id: MatchId, deps: &ServerDeps) -> LeagueResult<Match> {
    deps.store
        .find_match(match_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Match", match_id))
}

/// Audit rows reference the acting user, so an unknown user is rejected
/// before anything is written.
async fn check_actor(actor: Actor, deps: &ServerDeps) -> LeagueResult<()> {
    if let Actor::User(user_id) = actor {
        if deps.store.find_user(user_id).await?.is_none() {
            return Err(LeagueError::not_found("User", user_id));
        }
    }
    Ok(())
}

fn not_on_either_side(match_id: MatchId, player_id: PlayerId) -> LeagueError {
    LeagueError::InvalidPlayer {
        player_id: player_id.to_string(),
        match_id: match_id.to_string(),
    }
}

/// Record a goal or card. A goal credits the side of the scorer's team.
pub async fn add_event(
    match_id: MatchId,
    player_id: PlayerId,
    event_type: EventType,
    minute: i32,
    actor: Actor,
    deps: &ServerDeps,
) -> LeagueResult<MatchEvent> {
    if minute < 0 {
        return Err(LeagueError::InvalidInput(format!(
            "minute must be non-negative, got {}",
            minute
        )));
    }
    check_actor(actor, deps).await?;

    let m = load_match(match_id, deps).await?;
    let player = deps
        .store
        .find_player(player_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Player", player_id))?;

    let Some(side) = m.side_of(player.team_id) else {
        warn!(
            match_id = %match_id,
            player_id = %player_id,
            team_id = %player.team_id,
            "Rejected event for player outside both teams"
        );
        return Err(not_on_either_side(match_id, player_id));
    };

    let adjustment = event_type.is_goal().then(|| ScoreAdjustment::goal_for(side));
    let event = NewMatchEvent {
        match_id,
        player_id,
        event_type,
        minute,
    };
    let audit = NewAuditEntry::event_added(match_id, actor, event_type, Some(&player.name), minute);

    let Some(created) = deps
        .store
        .commit_event_added(&event, player.team_id, adjustment, &audit)
        .await?
    else {
        warn!(
            match_id = %match_id,
            player_id = %player_id,
            "Rejected event: player changed team before commit"
        );
        return Err(not_on_either_side(match_id, player_id));
    };

    info!(
        match_id = %match_id,
        event_id = %created.id,
        event_type = %event_type,
        minute,
        actor = %actor,
        "Match event added"
    );

    Ok(created)
}

/// Delete an event. Removing a goal takes it back off the scoreboard, never
/// below zero.
pub async fn remove_event(
    event_id: MatchEventId,
    actor: Actor,
    deps: &ServerDeps,
) -> LeagueResult<bool> {
    check_actor(actor, deps).await?;

    let event = deps
        .store
        .find_event(event_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("MatchEvent", event_id))?;

    let m = load_match(event.match_id, deps).await?;
    let player = deps.store.find_player(event.player_id).await?;

    // Side follows the player's current team
    let adjustment = if event.event_type.is_goal() {
        let side = player.as_ref().and_then(|p| m.side_of(p.team_id));
        if side.is_none() {
            warn!(
                event_id = %event_id,
                match_id = %m.id,
                "Removed goal no longer maps to a side; score left unchanged"
            );
        }
        side.map(ScoreAdjustment::goal_revoked)
    } else {
        None
    };

    let audit = NewAuditEntry::event_removed(
        m.id,
        actor,
        event.event_type,
        player.as_ref().map(|p| p.name.as_str()),
    );

    let removed = deps
        .store
        .commit_event_removed(event_id, adjustment, &audit)
        .await?;

    if !removed {
        // Another operator removed it between our read and the commit
        return Err(LeagueError::not_found("MatchEvent", event_id));
    }

    info!(
        match_id = %m.id,
        event_id = %event_id,
        event_type = %event.event_type,
        actor = %actor,
        "Match event removed"
    );

    Ok(true)
}

/// Overwrite the score and played flag. The one sanctioned way for the
/// score to diverge from the event ledger.
pub async fn finalize_result(
    match_id: MatchId,
    home_score: i32,
    away_score: i32,
    is_played: bool,
    actor: Actor,
    deps: &ServerDeps,
) -> LeagueResult<Match> {
    if home_score < 0 || away_score < 0 {
        return Err(LeagueError::InvalidInput(format!(
            "scores must be non-negative, got {}-{}",
            home_score, away_score
        )));
    }
    check_actor(actor, deps).await?;

    let audit = NewAuditEntry::status_change(match_id, actor, home_score, away_score, is_played);

    let updated = deps
        .store
        .commit_result(match_id, home_score, away_score, is_played, &audit)
        .await?
        .ok_or_else(|| LeagueError::not_found("Match", match_id))?;

    info!(
        match_id = %match_id,
        home_score,
        away_score,
        is_played,
        actor = %actor,
        "Match result set"
    );

    Ok(updated)
}
