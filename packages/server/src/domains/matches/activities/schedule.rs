use tracing::{info, warn};

use crate::common::{CategoryId, LeagueError, LeagueResult, TeamId};
use crate::domains::matches::models::{Match, NewMatch};
use crate::kernel::ServerDeps;

fn invalid_team(team_id: TeamId, category_id: CategoryId) -> LeagueError {
    LeagueError::InvalidTeam {
        team_id: team_id.to_string(),
        category_id: category_id.to_string(),
    }
}

/// Put a fixture on the calendar. The match starts Scheduled at 0-0.
pub async fn schedule_match(input: NewMatch, deps: &ServerDeps) -> LeagueResult<Match> {
    let category_id = input.category_id;

    deps.store
        .find_category(category_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Category", category_id))?;

    if input.home_team_id == input.away_team_id {
        warn!(team_id = %input.home_team_id, "Rejected fixture against itself");
        return Err(invalid_team(input.away_team_id, category_id));
    }

    for team_id in [input.home_team_id, input.away_team_id] {
        let team = deps
            .store
            .find_team(team_id)
            .await?
            .ok_or_else(|| LeagueError::not_found("Team", team_id))?;

        if team.category_id != category_id {
            warn!(
                team_id = %team_id,
                category_id = %category_id,
                "Rejected fixture with team from another category"
            );
            return Err(invalid_team(team_id, category_id));
        }
    }

    let created = deps
        .store
        .insert_match(&input)
        .await?
        .ok_or(LeagueError::DuplicateMatch)?;

    info!(
        match_id = %created.id,
        category_id = %category_id,
        home_team_id = %created.home_team_id,
        away_team_id = %created.away_team_id,
        "Match scheduled"
    );

    Ok(created)
}
