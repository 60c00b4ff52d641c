//! Roster import
//!
//! Players are keyed by normalized national id, so re-uploading a roster (or
//! uploading it for a different team) moves and renames existing players
//! instead of duplicating them.

use tracing::{info, warn};

use crate::common::{LeagueError, LeagueResult, TeamId};
use crate::domains::competition::data::{ImportSummary, RosterRow};
use crate::domains::competition::models::{normalize_national_id, NewPlayer};
use crate::kernel::ServerDeps;

/// Spreadsheet row of the first data line (row 1 is the header).
const FIRST_DATA_ROW: usize = 2;

pub async fn import_roster(
    team_id: TeamId,
    rows: Vec<RosterRow>,
    deps: &ServerDeps,
) -> LeagueResult<ImportSummary> {
    if deps.store.find_team(team_id).await?.is_none() {
        return Err(LeagueError::not_found("Team", team_id));
    }

    info!(team_id = %team_id, rows = rows.len(), "Importing roster");

    let mut summary = ImportSummary::default();

    for (index, row) in rows.into_iter().enumerate() {
        let name = row.name.trim();
        let national_id = normalize_national_id(&row.national_id);
        if name.is_empty() || national_id.is_empty() {
            continue;
        }

        let row_number = index + FIRST_DATA_ROW;
        match upsert_row(team_id, name, &national_id, deps).await {
            Ok(RowOutcome::Created) => summary.created += 1,
            Ok(RowOutcome::Updated) => summary.updated += 1,
            Err(e) => {
                warn!(row = row_number, error = %e, "Roster row rejected");
                summary.errors.push(format!("Row {}: {}", row_number, e));
            }
        }
    }

    info!(
        team_id = %team_id,
        created = summary.created,
        updated = summary.updated,
        errors = summary.errors.len(),
        "Roster import finished"
    );

    Ok(summary)
}

enum RowOutcome {
    Created,
    Updated,
}

async fn upsert_row(
    team_id: TeamId,
    name: &str,
    national_id: &str,
    deps: &ServerDeps,
) -> anyhow::Result<RowOutcome> {
    if let Some(existing) = deps.store.find_player_by_national_id(national_id).await? {
        deps.store.reassign_player(existing.id, name, team_id).await?;
        return Ok(RowOutcome::Updated);
    }

    let input = NewPlayer {
        team_id,
        name: name.to_string(),
        national_id: national_id.to_string(),
        jersey_number: None,
        birth_date: None,
    };

    match deps.store.insert_player(&input).await? {
        Some(_) => Ok(RowOutcome::Created),
        // Lost a race with a concurrent import of the same person
        None => Err(anyhow::anyhow!("national id {} already registered", national_id)),
    }
}
