use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::CategoryId;

/// Scope of a scorer ranking: one category, or every category of a parent
/// group ("Adultos").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CategorySelector {
    Category(CategoryId),
    Group(String),
}

impl FromStr for CategorySelector {
    type Err = std::convert::Infallible;

    /// A UUID selects a category; anything else names a parent group.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match CategoryId::parse(s) {
            Ok(id) => CategorySelector::Category(id),
            Err(_) => CategorySelector::Group(s.to_string()),
        })
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategorySelector::Category(id) => write!(f, "{}", id),
            CategorySelector::Group(label) => f.write_str(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_selects_a_single_category() {
        let id = CategoryId::new();
        let selector: CategorySelector = id.to_string().parse().unwrap();
        assert_eq!(selector, CategorySelector::Category(id));
    }

    #[test]
    fn other_text_selects_a_group() {
        let selector: CategorySelector = " adultos ".parse().unwrap();
        assert_eq!(selector, CategorySelector::Group("adultos".to_string()));
    }
}
