use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::common::{ClubId, LeagueError, LeagueResult};
use crate::domains::competition::models::{Category, Team};
use crate::domains::matches::activities::queries::by_kickoff;
use crate::domains::matches::models::{EventType, Match};
use crate::domains::standings::data::{CategoryBreakdown, ClubDetail, MatchSummary, PlayerTally};
use crate::domains::standings::models::{LeagueSnapshot, RecordLine};
use crate::kernel::ServerDeps;

fn summarize(snapshot: &LeagueSnapshot, m: &Match, team: &Team) -> Option<MatchSummary> {
    let side = m.side_of(team.id)?;
    let opponent = m
        .opponent_of(team.id)
        .and_then(|opponent| snapshot.club_of_team(opponent));

    Some(MatchSummary {
        match_id: m.id,
        side,
        state: m.state(),
        kickoff: m.kickoff,
        opponent_club_id: opponent.map(|c| c.id),
        opponent_name: opponent.map(|c| c.name.clone()),
        opponent_logo_url: opponent.and_then(|c| c.logo_url.clone()),
        home_score: m.home_score,
        away_score: m.away_score,
    })
}

fn tally_roster(snapshot: &LeagueSnapshot, team: &Team) -> Vec<PlayerTally> {
    let mut roster: Vec<PlayerTally> = snapshot
        .roster(team.id)
        .map(|player| {
            let mut tally = PlayerTally {
                player_id: player.id,
                name: player.name.clone(),
                jersey_number: player.jersey_number,
                ..Default::default()
            };
            for event in snapshot.events_of_player(player.id) {
                match event.event_type {
                    EventType::Goal => tally.goals += 1,
                    EventType::YellowCard => tally.yellow_cards += 1,
                    EventType::RedCard => tally.red_cards += 1,
                }
            }
            tally
        })
        .collect();

    roster.sort_by(|a, b| a.name.cmp(&b.name));
    roster
}

fn breakdown(snapshot: &LeagueSnapshot, team: &Team, category: &Category) -> CategoryBreakdown {
    let mut stats = RecordLine::default();
    let mut past: Vec<&Match> = Vec::new();
    let mut upcoming: Vec<&Match> = Vec::new();

    for m in snapshot.matches_of_team(team.id) {
        if m.is_standings_eligible() {
            stats.record(m, team.id, category);
            past.push(m);
        } else {
            upcoming.push(m);
        }
    }

    past.sort_by(|a, b| by_kickoff(b, a));
    upcoming.sort_by(|a, b| by_kickoff(a, b));

    CategoryBreakdown {
        category_id: category.id,
        team_id: team.id,
        stats,
        past: past
            .into_iter()
            .filter_map(|m| summarize(snapshot, m, team))
            .collect(),
        upcoming: upcoming
            .into_iter()
            .filter_map(|m| summarize(snapshot, m, team))
            .collect(),
        roster: tally_roster(snapshot, team),
    }
}

/// A club's record, fixtures and squad in every category it fields a team.
pub fn club_detail(snapshot: &LeagueSnapshot, club_id: ClubId) -> LeagueResult<ClubDetail> {
    let club = snapshot
        .club(club_id)
        .ok_or_else(|| LeagueError::not_found("Club", club_id))?;

    let mut categories = BTreeMap::new();
    for team in snapshot.teams_of_club(club_id) {
        let Some(category) = snapshot.category(team.category_id) else {
            warn!(team_id = %team.id, category_id = %team.category_id, "Team references a missing category");
            continue;
        };
        categories.insert(category.name.clone(), breakdown(snapshot, team, category));
    }

    Ok(ClubDetail {
        club_id: club.id,
        name: club.name.clone(),
        logo_url: club.logo_url.clone(),
        series: club.series,
        categories,
    })
}

pub async fn compose_club_detail(club_id: ClubId, deps: &ServerDeps) -> LeagueResult<ClubDetail> {
    let snapshot = deps.store.snapshot().await?;
    let detail = club_detail(&snapshot, club_id)?;

    debug!(club_id = %club_id, categories = detail.categories.len(), "Composed club detail");
    Ok(detail)
}
