//! Test fixtures for seeding the in-memory store.

use league_core::domains::competition::models::{
    Category, Club, NewCategory, NewClub, NewPlayer, Player, Series, Team,
};
use league_core::domains::matches::models::{Match, NewMatch};
use league_core::kernel::InMemoryLeagueStore;

pub fn primera_adulto() -> NewCategory {
    NewCategory::standard("Primera Adulto")
        .in_group("Adultos")
        .with_points(6, 3, 0)
}

pub fn segunda_adulto() -> NewCategory {
    NewCategory::standard("Segunda Adulto").in_group("Adultos")
}

pub fn juvenil() -> NewCategory {
    NewCategory::standard("Juvenil")
}

pub fn seed_club(store: &InMemoryLeagueStore, name: &str, series: Series) -> Club {
    store.add_club(NewClub {
        name: name.to_string(),
        logo_url: Some(format!("{}.png", name.to_lowercase().replace(' ', "-"))),
        series,
    })
}

pub fn seed_player(store: &InMemoryLeagueStore, team: &Team, name: &str, national_id: &str) -> Player {
    store.add_player(NewPlayer {
        team_id: team.id,
        name: name.to_string(),
        national_id: national_id.to_string(),
        jersey_number: None,
        birth_date: None,
    })
}

pub fn seed_match(store: &InMemoryLeagueStore, category: &Category, home: &Team, away: &Team) -> Match {
    store.add_match(
        NewMatch::builder()
            .category_id(category.id)
            .home_team_id(home.id)
            .away_team_id(away.id)
            .build(),
    )
}

/// One scheduled match between two clubs, with one player on each side.
pub struct MatchFixture {
    pub category: Category,
    pub home_club: Club,
    pub away_club: Club,
    pub home_team: Team,
    pub away_team: Team,
    pub home_player: Player,
    pub away_player: Player,
    pub m: Match,
}

pub fn seed_fixture(store: &InMemoryLeagueStore, category: NewCategory) -> MatchFixture {
    let category = store.add_category(category);
    let home_club = seed_club(store, "Renca Norte", Series::Honor);
    let away_club = seed_club(store, "Villa Sur", Series::Honor);
    let home_team = store.add_team(home_club.id, category.id);
    let away_team = store.add_team(away_club.id, category.id);
    let home_player = seed_player(store, &home_team, "Diego Rojas", "11.111.111-1");
    let away_player = seed_player(store, &away_team, "Matias Soto", "22.222.222-2");
    let m = seed_match(store, &category, &home_team, &away_team);

    MatchFixture {
        category,
        home_club,
        away_club,
        home_team,
        away_team,
        home_player,
        away_player,
        m,
    }
}
