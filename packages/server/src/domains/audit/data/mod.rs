use serde::{Deserialize, Serialize};

use crate::domains::audit::models::AuditLogEntry;

/// Label shown for entries that are not tied to a match.
pub const NO_MATCH_INFO: &str = "N/A";

/// An audit entry as presented to operators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogView {
    #[serde(flatten)]
    pub entry: AuditLogEntry,
    /// "Home vs Away", or `N/A`.
    pub match_info: String,
}
