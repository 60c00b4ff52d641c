use serde::{Deserialize, Serialize};

/// One row of a roster upload, already lifted out of the spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRow {
    pub name: String,
    pub national_id: String,
}

impl RosterRow {
    pub fn new(name: impl Into<String>, national_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            national_id: national_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    /// One message per failed row, prefixed with its spreadsheet row number.
    pub errors: Vec<String>,
}
