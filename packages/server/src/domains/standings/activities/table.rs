//! League tables.
//!
//! Recomputed from a fresh snapshot on every call. A match counts once it is
//! standings-eligible (played, or live with a goal on the board).

use tracing::debug;

use crate::common::{CategoryId, LeagueError, LeagueResult};
use crate::config::CompetitionRules;
use crate::domains::competition::models::Series;
use crate::domains::standings::models::{LeagueSnapshot, RecordLine, StandingsRow};
use crate::kernel::ServerDeps;

/// Table for one category. In a series-partitioned category only clubs of
/// `series` are listed.
pub fn category_table(
    snapshot: &LeagueSnapshot,
    category_id: CategoryId,
    series: Series,
    rules: &CompetitionRules,
) -> LeagueResult<Vec<StandingsRow>> {
    let category = snapshot
        .category(category_id)
        .ok_or_else(|| LeagueError::not_found("Category", category_id))?;
    let partitioned = rules.is_series_partitioned(category.parent_group.as_deref());

    let mut rows: Vec<StandingsRow> = snapshot
        .teams_in_category(category_id)
        .filter_map(|team| {
            let club = snapshot.club(team.club_id)?;
            if partitioned && club.series != series {
                return None;
            }

            let mut line = RecordLine::default();
            for m in snapshot
                .matches_of_team(team.id)
                .filter(|m| m.is_standings_eligible())
            {
                line.record(m, team.id, category);
            }

            Some(StandingsRow::new(club, Some(team.id), line))
        })
        .collect();

    rows.sort_by(StandingsRow::category_order);
    Ok(rows)
}

/// Combined table for every category of `group`: one row per club of
/// `series`, summing all of the club's teams in the group. Each match is
/// scored with its own category's point values.
pub fn family_table(
    snapshot: &LeagueSnapshot,
    group: &str,
    series: Series,
) -> LeagueResult<Vec<StandingsRow>> {
    if snapshot.categories_in_group(group).next().is_none() {
        return Err(LeagueError::InvalidCategory(group.to_string()));
    }

    let mut rows: Vec<StandingsRow> = snapshot
        .clubs
        .iter()
        .filter(|club| club.series == series)
        .map(|club| {
            let mut line = RecordLine::default();

            for team in snapshot.teams_of_club(club.id) {
                let Some(team_category) = snapshot.category(team.category_id) else {
                    continue;
                };
                if !team_category.belongs_to_group(group) {
                    continue;
                }

                for m in snapshot
                    .matches_of_team(team.id)
                    .filter(|m| m.is_standings_eligible())
                {
                    let scoring = snapshot.category(m.category_id).unwrap_or(team_category);
                    line.record(m, team.id, scoring);
                }
            }

            StandingsRow::new(club, None, line)
        })
        .collect();

    rows.sort_by(StandingsRow::family_order);
    Ok(rows)
}

pub async fn compute_standings(
    category_id: CategoryId,
    series: Option<Series>,
    deps: &ServerDeps,
) -> LeagueResult<Vec<StandingsRow>> {
    let series = series.unwrap_or(deps.rules.default_series);
    let snapshot = deps.store.snapshot().await?;
    let rows = category_table(&snapshot, category_id, series, &deps.rules)?;

    debug!(category_id = %category_id, series = %series, rows = rows.len(), "Computed standings");
    Ok(rows)
}

pub async fn compute_family_standings(
    group: &str,
    series: Option<Series>,
    deps: &ServerDeps,
) -> LeagueResult<Vec<StandingsRow>> {
    let series = series.unwrap_or(deps.rules.default_series);
    let snapshot = deps.store.snapshot().await?;
    let rows = family_table(&snapshot, group, series)?;

    debug!(group, series = %series, rows = rows.len(), "Computed family standings");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::competition::models::{Category, Club, NewCategory, NewClub, Team};
    use crate::domains::matches::models::{Match, NewMatch};

    fn club(name: &str, series: Series) -> Club {
        Club::new(NewClub {
            name: name.to_string(),
            logo_url: None,
            series,
        })
    }

    fn played(category: &Category, home: &Team, away: &Team, h: i32, a: i32) -> Match {
        let mut m = Match::scheduled(
            &NewMatch::builder()
                .category_id(category.id)
                .home_team_id(home.id)
                .away_team_id(away.id)
                .build(),
        );
        m.home_score = h;
        m.away_score = a;
        m.is_played = true;
        m
    }

    #[test]
    fn primera_adulto_win_is_worth_six() {
        let primera = Category::new(
            NewCategory::standard("Primera Adulto")
                .in_group("Adultos")
                .with_points(6, 3, 0),
        );
        let a = club("Club A", Series::Honor);
        let b = club("Club B", Series::Honor);
        let ta = Team::new(a.id, primera.id);
        let tb = Team::new(b.id, primera.id);
        let m = played(&primera, &ta, &tb, 2, 1);

        let snapshot = LeagueSnapshot::new(
            vec![primera.clone()],
            vec![a.clone(), b.clone()],
            vec![ta, tb],
            vec![],
            vec![m],
            vec![],
        );

        let rows = category_table(&snapshot, primera.id, Series::Honor, &CompetitionRules::default())
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].club_id, a.id);
        assert_eq!((rows[0].played, rows[0].won, rows[0].points, rows[0].goal_difference), (1, 1, 6, 1));
        assert_eq!(rows[1].club_id, b.id);
        assert_eq!((rows[1].played, rows[1].lost, rows[1].points, rows[1].goal_difference), (1, 1, 0, -1));
    }

    #[test]
    fn scheduled_nil_nil_is_not_counted() {
        let juvenil = Category::new(NewCategory::standard("Juvenil"));
        let a = club("Club A", Series::Honor);
        let b = club("Club B", Series::Honor);
        let ta = Team::new(a.id, juvenil.id);
        let tb = Team::new(b.id, juvenil.id);
        let mut m = played(&juvenil, &ta, &tb, 0, 0);
        m.is_played = false;

        let snapshot =
            LeagueSnapshot::new(vec![juvenil.clone()], vec![a, b], vec![ta, tb], vec![], vec![m], vec![]);

        let rows =
            category_table(&snapshot, juvenil.id, Series::Honor, &CompetitionRules::default()).unwrap();
        assert!(rows.iter().all(|r| r.played == 0 && r.points == 0));
    }

    #[test]
    fn youth_categories_ignore_the_series_filter() {
        let juvenil = Category::new(NewCategory::standard("Juvenil"));
        let a = club("Club A", Series::Honor);
        let b = club("Club B", Series::Ascenso);
        let ta = Team::new(a.id, juvenil.id);
        let tb = Team::new(b.id, juvenil.id);

        let snapshot =
            LeagueSnapshot::new(vec![juvenil.clone()], vec![a, b], vec![ta, tb], vec![], vec![], vec![]);

        let rows =
            category_table(&snapshot, juvenil.id, Series::Honor, &CompetitionRules::default()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn family_table_is_one_row_per_club_of_the_series() {
        let primera = Category::new(
            NewCategory::standard("Primera Adulto")
                .in_group("Adultos")
                .with_points(6, 3, 0),
        );
        let segunda = Category::new(NewCategory::standard("Segunda Adulto").in_group("Adultos"));
        let a = club("Club A", Series::Honor);
        let b = club("Club B", Series::Honor);
        let c = club("Club C", Series::Ascenso);

        let a1 = Team::new(a.id, primera.id);
        let b1 = Team::new(b.id, primera.id);
        let a2 = Team::new(a.id, segunda.id);
        let b2 = Team::new(b.id, segunda.id);
        let c2 = Team::new(c.id, segunda.id);

        let matches = vec![
            played(&primera, &a1, &b1, 1, 0),
            played(&segunda, &b2, &a2, 1, 1),
        ];

        let snapshot = LeagueSnapshot::new(
            vec![primera, segunda],
            vec![a.clone(), b.clone(), c],
            vec![a1, b1, a2, b2, c2],
            vec![],
            matches,
            vec![],
        );

        let rows = family_table(&snapshot, "adultos", Series::Honor).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].club_id, a.id);
        assert_eq!(rows[0].points, 6 + 1);
        assert_eq!(rows[0].played, 2);
        assert_eq!(rows[0].team_id, None);
        assert_eq!(rows[1].club_id, b.id);
        assert_eq!(rows[1].points, 1);
    }

    #[test]
    fn storage_order_of_matches_does_not_change_totals() {
        let primera = Category::new(
            NewCategory::standard("Primera Adulto")
                .in_group("Adultos")
                .with_points(6, 3, 0),
        );
        let clubs = vec![
            club("Club A", Series::Honor),
            club("Club B", Series::Honor),
            club("Club C", Series::Honor),
        ];
        let teams: Vec<Team> = clubs.iter().map(|c| Team::new(c.id, primera.id)).collect();
        let matches = vec![
            played(&primera, &teams[0], &teams[1], 2, 0),
            played(&primera, &teams[1], &teams[2], 1, 1),
            played(&primera, &teams[2], &teams[0], 3, 1),
            played(&primera, &teams[1], &teams[0], 0, 4),
        ];
        let mut rotated = matches.clone();
        rotated.rotate_left(2);
        let mut reversed = matches.clone();
        reversed.reverse();

        let tables: Vec<_> = [matches, rotated, reversed]
            .into_iter()
            .map(|ms| {
                let snapshot = LeagueSnapshot::new(
                    vec![primera.clone()],
                    clubs.clone(),
                    teams.clone(),
                    vec![],
                    ms,
                    vec![],
                );
                let category =
                    category_table(&snapshot, primera.id, Series::Honor, &CompetitionRules::default())
                        .unwrap();
                let family = family_table(&snapshot, "Adultos", Series::Honor).unwrap();
                (category, family)
            })
            .collect();

        assert_eq!(tables[0].0[0].points, 12);
        assert_eq!(tables[0].0[0].goals_for, 7);
        assert_eq!(tables[0], tables[1]);
        assert_eq!(tables[0], tables[2]);
    }

    #[test]
    fn unknown_group_is_rejected() {
        let snapshot = LeagueSnapshot::default();
        let err = family_table(&snapshot, "Senior", Series::Honor).unwrap_err();
        assert!(matches!(err, LeagueError::InvalidCategory(_)));
    }
}
