use serde::{Deserialize, Serialize};
use std::fmt;

use super::UserId;

/// Who is performing a mutation.
///
/// Passed explicitly into every engine call that writes to a match so the
/// audit trail can attribute it. A change with no operator behind it (imports,
/// maintenance jobs) is `System`, never a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "user_id", rename_all = "snake_case")]
pub enum Actor {
    User(UserId),
    System,
}

impl Actor {
    /// The user to store on the audit row; `None` means system-initiated.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Actor::User(id) => Some(*id),
            Actor::System => None,
        }
    }
}

impl From<Option<UserId>> for Actor {
    fn from(user: Option<UserId>) -> Self {
        user.map(Actor::User).unwrap_or(Actor::System)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::User(id) => write!(f, "user:{}", id),
            Actor::System => f.write_str("system"),
        }
    }
}
