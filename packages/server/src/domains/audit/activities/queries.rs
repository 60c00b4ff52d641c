use std::collections::HashMap;

use tracing::debug;

use crate::common::{LeagueError, LeagueResult, MatchId};
use crate::domains::audit::data::{AuditLogView, NO_MATCH_INFO};
use crate::domains::audit::models::AuditLogEntry;
use crate::kernel::ServerDeps;

pub const DEFAULT_AUDIT_LIMIT: i64 = 100;

async fn fixture_label(match_id: MatchId, deps: &ServerDeps) -> anyhow::Result<Option<String>> {
    let Some(m) = deps.store.find_match(match_id).await? else {
        return Ok(None);
    };

    let mut names = Vec::with_capacity(2);
    for team_id in [m.home_team_id, m.away_team_id] {
        let Some(team) = deps.store.find_team(team_id).await? else {
            return Ok(None);
        };
        let Some(club) = deps.store.find_club(team.club_id).await? else {
            return Ok(None);
        };
        names.push(club.name);
    }

    Ok(Some(names.join(" vs ")))
}

/// Latest audit entries across all matches, newest first.
pub async fn recent_audit_log(
    limit: Option<i64>,
    deps: &ServerDeps,
) -> LeagueResult<Vec<AuditLogView>> {
    let limit = limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
    if limit < 0 {
        return Err(LeagueError::InvalidInput(format!(
            "limit must be non-negative, got {}",
            limit
        )));
    }

    let entries = deps.store.recent_audit_log(limit).await?;
    let mut labels: HashMap<MatchId, String> = HashMap::new();
    let mut views = Vec::with_capacity(entries.len());

    for entry in entries {
        let match_info = match entry.match_id {
            Some(match_id) => match labels.get(&match_id) {
                Some(label) => label.clone(),
                None => {
                    let label = fixture_label(match_id, deps)
                        .await?
                        .unwrap_or_else(|| NO_MATCH_INFO.to_string());
                    labels.insert(match_id, label.clone());
                    label
                }
            },
            None => NO_MATCH_INFO.to_string(),
        };
        views.push(AuditLogView { entry, match_info });
    }

    debug!(count = views.len(), "Loaded recent audit log");
    Ok(views)
}

/// Full history of one match, newest first.
pub async fn match_audit_log(
    match_id: MatchId,
    deps: &ServerDeps,
) -> LeagueResult<Vec<AuditLogEntry>> {
    if deps.store.find_match(match_id).await?.is_none() {
        return Err(LeagueError::not_found("Match", match_id));
    }
    Ok(deps.store.audit_log_for_match(match_id).await?)
}
