use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::common::{CategoryId, LeagueError, LeagueResult, PlayerId};
use crate::config::CompetitionRules;
use crate::domains::competition::models::{Category, Series};
use crate::domains::standings::data::ScorerRow;
use crate::domains::standings::models::{CategorySelector, LeagueSnapshot};
use crate::kernel::ServerDeps;

fn resolve<'a>(
    snapshot: &'a LeagueSnapshot,
    selector: &CategorySelector,
) -> LeagueResult<Vec<&'a Category>> {
    let categories: Vec<&Category> = match selector {
        CategorySelector::Category(id) => snapshot.category(*id).into_iter().collect(),
        CategorySelector::Group(group) => snapshot
            .categories
            .iter()
            .filter(|c| c.belongs_to_group(group))
            .collect(),
    };

    if categories.is_empty() {
        return Err(LeagueError::InvalidCategory(selector.to_string()));
    }
    Ok(categories)
}

/// Goal ranking over the selected categories, at most `limit` rows. The
/// series filter applies only when a selected category is series-partitioned.
/// Players tied on goals keep roster order.
pub fn top_scorers(
    snapshot: &LeagueSnapshot,
    selector: &CategorySelector,
    series: Series,
    limit: usize,
    rules: &CompetitionRules,
) -> LeagueResult<Vec<ScorerRow>> {
    let categories = resolve(snapshot, selector)?;
    let partitioned = categories
        .iter()
        .any(|c| rules.is_series_partitioned(c.parent_group.as_deref()));
    let category_ids: HashSet<CategoryId> = categories.iter().map(|c| c.id).collect();

    let mut goals: HashMap<PlayerId, u32> = HashMap::new();
    for event in snapshot.events.iter().filter(|e| e.event_type.is_goal()) {
        *goals.entry(event.player_id).or_default() += 1;
    }

    let mut rows: Vec<ScorerRow> = snapshot
        .players
        .iter()
        .filter_map(|player| {
            let count = *goals.get(&player.id)?;
            let team = snapshot.team(player.team_id)?;
            if !category_ids.contains(&team.category_id) {
                return None;
            }
            let club = snapshot.club(team.club_id)?;
            if partitioned && club.series != series {
                return None;
            }

            Some(ScorerRow {
                player_id: player.id,
                player_name: player.name.clone(),
                club_id: club.id,
                club_name: club.name.clone(),
                logo_url: club.logo_url.clone(),
                goals: count,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.goals.cmp(&a.goals));
    rows.truncate(limit);
    Ok(rows)
}

pub async fn compute_top_scorers(
    selector: &CategorySelector,
    series: Option<Series>,
    limit: Option<usize>,
    deps: &ServerDeps,
) -> LeagueResult<Vec<ScorerRow>> {
    let series = series.unwrap_or(deps.rules.default_series);
    let limit = limit.unwrap_or(deps.rules.top_scorers_limit);
    let snapshot = deps.store.snapshot().await?;
    let rows = top_scorers(&snapshot, selector, series, limit, &deps.rules)?;

    debug!(selector = %selector, series = %series, rows = rows.len(), "Computed top scorers");
    Ok(rows)
}
