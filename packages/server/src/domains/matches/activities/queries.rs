use std::cmp::Ordering;

use tracing::debug;

use crate::common::{CategoryId, LeagueError, LeagueResult, MatchId};
use crate::domains::competition::models::Series;
use crate::domains::matches::data::MatchPlayer;
use crate::domains::matches::models::{Match, MatchEvent, MatchSide};
use crate::kernel::ServerDeps;

/// Kickoff ascending, unscheduled kickoffs last.
pub(crate) fn by_kickoff(a: &Match, b: &Match) -> Ordering {
    match (a.kickoff, b.kickoff) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.created_at.cmp(&b.created_at),
    }
}

/// A category's fixtures. In a series-partitioned category only matches
/// hosted by a club of `series` are listed.
pub async fn list_matches(
    category_id: CategoryId,
    series: Option<Series>,
    deps: &ServerDeps,
) -> LeagueResult<Vec<Match>> {
    let snapshot = deps.store.snapshot().await?;
    let category = snapshot
        .category(category_id)
        .ok_or_else(|| LeagueError::not_found("Category", category_id))?;

    let series = series.unwrap_or(deps.rules.default_series);
    let partitioned = deps
        .rules
        .is_series_partitioned(category.parent_group.as_deref());

    let mut matches: Vec<Match> = snapshot
        .matches
        .iter()
        .filter(|m| m.category_id == category_id)
        .filter(|m| {
            !partitioned
                || snapshot
                    .club_of_team(m.home_team_id)
                    .is_some_and(|club| club.series == series)
        })
        .cloned()
        .collect();
    matches.sort_by(by_kickoff);

    debug!(category_id = %category_id, series = %series, count = matches.len(), "Listed matches");
    Ok(matches)
}

/// Both rosters, home side first.
pub async fn match_players(match_id: MatchId, deps: &ServerDeps) -> LeagueResult<Vec<MatchPlayer>> {
    let m = deps
        .store
        .find_match(match_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Match", match_id))?;

    let mut players = Vec::new();
    for (side, team_id) in [
        (MatchSide::Home, m.home_team_id),
        (MatchSide::Away, m.away_team_id),
    ] {
        players.extend(
            deps.store
                .roster(team_id)
                .await?
                .into_iter()
                .map(|player| MatchPlayer { side, player }),
        );
    }

    Ok(players)
}

/// Events of a match in minute order.
pub async fn match_events(match_id: MatchId, deps: &ServerDeps) -> LeagueResult<Vec<MatchEvent>> {
    if deps.store.find_match(match_id).await?.is_none() {
        return Err(LeagueError::not_found("Match", match_id));
    }
    Ok(deps.store.events_for_match(match_id).await?)
}
