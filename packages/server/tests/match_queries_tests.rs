//! Integration tests for scheduling, match read views and audit views.

mod common;

use chrono::{TimeZone, Utc};
use crate::common::{juvenil, primera_adulto, seed_club, seed_fixture, seed_match, TestHarness};
use league_core::common::{Actor, CategoryId, LeagueError, MatchId, TeamId};
use league_core::domains::audit::activities::{match_audit_log, recent_audit_log};
use league_core::domains::audit::models::AuditAction;
use league_core::domains::competition::models::Series;
use league_core::domains::matches::activities::{
    add_event, finalize_result, list_matches, match_events, match_players, schedule_match,
};
use league_core::domains::matches::models::{EventType, MatchSide, NewMatch};
use test_context::test_context;

// =============================================================================
// Scheduling
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn scheduled_match_starts_unplayed_at_nil_nil(ctx: &TestHarness) {
    let f = seed_fixture(&ctx.store, juvenil());
    let kickoff = Utc.with_ymd_and_hms(2025, 3, 9, 15, 0, 0).unwrap();

    let m = schedule_match(
        NewMatch::builder()
            .category_id(f.category.id)
            .home_team_id(f.away_team.id)
            .away_team_id(f.home_team.id)
            .kickoff(kickoff)
            .build(),
        &ctx.deps,
    )
    .await
    .unwrap();

    assert_eq!((m.home_score, m.away_score, m.is_played), (0, 0, false));
    assert_eq!(m.kickoff, Some(kickoff));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn same_fixture_twice_is_a_duplicate(ctx: &TestHarness) {
    let f = seed_fixture(&ctx.store, juvenil());
    let fixture = || {
        NewMatch::builder()
            .category_id(f.category.id)
            .home_team_id(f.away_team.id)
            .away_team_id(f.home_team.id)
            .build()
    };

    schedule_match(fixture(), &ctx.deps).await.unwrap();
    let err = schedule_match(fixture(), &ctx.deps).await.unwrap_err();
    assert!(matches!(err, LeagueError::DuplicateMatch));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn teams_must_play_in_the_match_category(ctx: &TestHarness) {
    let f = seed_fixture(&ctx.store, juvenil());
    let adults = ctx.store.add_category(primera_adulto());
    let adult_team = ctx.store.add_team(f.home_club.id, adults.id);

    let err = schedule_match(
        NewMatch::builder()
            .category_id(f.category.id)
            .home_team_id(adult_team.id)
            .away_team_id(f.away_team.id)
            .build(),
        &ctx.deps,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, LeagueError::InvalidTeam { .. }));

    let err = schedule_match(
        NewMatch::builder()
            .category_id(f.category.id)
            .home_team_id(f.home_team.id)
            .away_team_id(f.home_team.id)
            .build(),
        &ctx.deps,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, LeagueError::InvalidTeam { .. }));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn scheduling_with_missing_references_is_not_found(ctx: &TestHarness) {
    let f = seed_fixture(&ctx.store, juvenil());

    let err = schedule_match(
        NewMatch::builder()
            .category_id(CategoryId::new())
            .home_team_id(f.home_team.id)
            .away_team_id(f.away_team.id)
            .build(),
        &ctx.deps,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, LeagueError::NotFound { entity: "Category", .. }));

    let err = schedule_match(
        NewMatch::builder()
            .category_id(f.category.id)
            .home_team_id(f.home_team.id)
            .away_team_id(TeamId::new())
            .build(),
        &ctx.deps,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, LeagueError::NotFound { entity: "Team", .. }));
}

// =============================================================================
// Match views
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn adult_fixtures_are_listed_by_home_club_series(ctx: &TestHarness) {
    let f = seed_fixture(&ctx.store, primera_adulto());
    let ascenso = seed_club(&ctx.store, "Lo Boza", Series::Ascenso);
    let ascenso_team = ctx.store.add_team(ascenso.id, f.category.id);
    let hosted = seed_match(&ctx.store, &f.category, &ascenso_team, &f.home_team);

    let honor = list_matches(f.category.id, Some(Series::Honor), &ctx.deps)
        .await
        .unwrap();
    let ascenso_matches = list_matches(f.category.id, Some(Series::Ascenso), &ctx.deps)
        .await
        .unwrap();

    assert_eq!(honor.iter().map(|m| m.id).collect::<Vec<_>>(), vec![f.m.id]);
    assert_eq!(
        ascenso_matches.iter().map(|m| m.id).collect::<Vec<_>>(),
        vec![hosted.id]
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn youth_fixtures_ignore_series(ctx: &TestHarness) {
    let f = seed_fixture(&ctx.store, juvenil());
    let ascenso = seed_club(&ctx.store, "Lo Boza", Series::Ascenso);
    let ascenso_team = ctx.store.add_team(ascenso.id, f.category.id);
    seed_match(&ctx.store, &f.category, &ascenso_team, &f.home_team);

    let all = list_matches(f.category.id, Some(Series::Honor), &ctx.deps)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn match_players_lists_home_then_away(ctx: &TestHarness) {
    let f = seed_fixture(&ctx.store, juvenil());

    let players = match_players(f.m.id, &ctx.deps).await.unwrap();

    let sides: Vec<_> = players.iter().map(|p| (p.side, p.player.id)).collect();
    assert_eq!(
        sides,
        vec![
            (MatchSide::Home, f.home_player.id),
            (MatchSide::Away, f.away_player.id)
        ]
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn events_come_back_in_minute_order(ctx: &TestHarness) {
    let f = seed_fixture(&ctx.store, juvenil());
    for minute in [70, 5, 33] {
        add_event(f.m.id, f.home_player.id, EventType::YellowCard, minute, Actor::System, &ctx.deps)
            .await
            .unwrap();
    }

    let events = match_events(f.m.id, &ctx.deps).await.unwrap();
    let minutes: Vec<_> = events.iter().map(|e| e.minute).collect();
    assert_eq!(minutes, vec![5, 33, 70]);

    let err = match_events(MatchId::new(), &ctx.deps).await.unwrap_err();
    assert!(matches!(err, LeagueError::NotFound { .. }));
}

// =============================================================================
// Audit views
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn recent_audit_log_is_newest_first_with_fixture_label(ctx: &TestHarness) {
    let f = seed_fixture(&ctx.store, juvenil());
    add_event(f.m.id, f.home_player.id, EventType::Goal, 1, Actor::System, &ctx.deps)
        .await
        .unwrap();
    finalize_result(f.m.id, 1, 0, true, Actor::System, &ctx.deps)
        .await
        .unwrap();

    let log = recent_audit_log(None, &ctx.deps).await.unwrap();

    assert_eq!(log.len(), 2);
    assert_eq!(log[0].entry.action, AuditAction::StatusChange);
    assert_eq!(log[1].entry.action, AuditAction::EventAdded);
    assert!(log.iter().all(|v| v.match_info == "Renca Norte vs Villa Sur"));

    let limited = recent_audit_log(Some(1), &ctx.deps).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].entry.action, AuditAction::StatusChange);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn match_audit_log_only_covers_that_match(ctx: &TestHarness) {
    let f = seed_fixture(&ctx.store, juvenil());
    let other = seed_match(&ctx.store, &f.category, &f.away_team, &f.home_team);

    finalize_result(f.m.id, 0, 0, true, Actor::System, &ctx.deps)
        .await
        .unwrap();
    finalize_result(other.id, 2, 2, true, Actor::System, &ctx.deps)
        .await
        .unwrap();

    let log = match_audit_log(other.id, &ctx.deps).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].details, "MATCH FINALIZED - Score 2-2");

    let err = match_audit_log(MatchId::new(), &ctx.deps).await.unwrap_err();
    assert!(matches!(err, LeagueError::NotFound { entity: "Match", .. }));
}
