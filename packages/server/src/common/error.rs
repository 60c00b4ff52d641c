use thiserror::Error;

/// Failures reported by the match ledger and the standings engine.
///
/// Every variant except `StorageFailure` describes a bad reference or bad
/// argument supplied by the caller and is never retried internally.
/// Storage errors caused by a dangling foreign key surface as
/// `IntegrityViolation` since retrying them cannot succeed.
#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Player {player_id} is not on either side of match {match_id}")]
    InvalidPlayer { player_id: String, match_id: String },

    #[error("Unresolvable category selector: {0}")]
    InvalidCategory(String),

    #[error("Team {team_id} does not play in category {category_id}")]
    InvalidTeam { team_id: String, category_id: String },

    #[error("A match with the same teams and kickoff already exists in this category")]
    DuplicateMatch,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),

    #[error("Storage failure: {0}")]
    StorageFailure(#[source] anyhow::Error),
}

pub type LeagueResult<T> = Result<T, LeagueError>;

impl LeagueError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Only storage-level failures (write conflicts, lost connections) are
    /// worth retrying; everything else will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LeagueError::StorageFailure(_))
    }
}

fn is_foreign_key_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<sqlx::Error>(),
            Some(sqlx::Error::Database(db)) if db.is_foreign_key_violation()
        )
    })
}

impl From<anyhow::Error> for LeagueError {
    fn from(err: anyhow::Error) -> Self {
        if is_foreign_key_violation(&err) {
            return LeagueError::IntegrityViolation(format!("{:#}", err));
        }
        LeagueError::StorageFailure(err)
    }
}

impl From<sqlx::Error> for LeagueError {
    fn from(err: sqlx::Error) -> Self {
        anyhow::Error::from(err).into()
    }
}
