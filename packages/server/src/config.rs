use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::competition::Series;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub rules: CompetitionRules,
}

/// League-wide rules the aggregators consult.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitionRules {
    /// Parent-group label whose categories are split by club series
    /// (youth categories are not).
    pub series_group: String,
    /// Series used when a caller does not name one.
    pub default_series: Series,
    /// Default length of the top-scorer table.
    pub top_scorers_limit: usize,
}

impl Default for CompetitionRules {
    fn default() -> Self {
        Self {
            series_group: "Adultos".to_string(),
            default_series: Series::Honor,
            top_scorers_limit: 20,
        }
    }
}

impl CompetitionRules {
    /// Whether a category's parent group is split into parallel series.
    pub fn is_series_partitioned(&self, parent_group: Option<&str>) -> bool {
        parent_group.is_some_and(|group| group.eq_ignore_ascii_case(&self.series_group))
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = CompetitionRules::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            rules: CompetitionRules {
                series_group: env::var("SERIES_GROUP").unwrap_or(defaults.series_group),
                default_series: match env::var("DEFAULT_SERIES") {
                    Ok(raw) => raw
                        .parse()
                        .context("DEFAULT_SERIES must be HONOR or ASCENSO")?,
                    Err(_) => defaults.default_series,
                },
                top_scorers_limit: env::var("TOP_SCORERS_LIMIT")
                    .unwrap_or_else(|_| defaults.top_scorers_limit.to_string())
                    .parse()
                    .context("TOP_SCORERS_LIMIT must be a valid number")?,
            },
        })
    }
}
