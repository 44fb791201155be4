//! Role-category selections

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

/// Sentinel value meaning "every role category"
pub const ALL_ROLES: &str = "All";

/// The set of role categories a query is restricted to
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum RoleSelection {
    /// No restriction
    #[default]
    All,
    /// Only positions and transitions in these categories
    Categories(BTreeSet<String>),
}

impl RoleSelection {
    /// Build a selection from user-supplied values
    ///
    /// An empty list, or any list containing [`ALL_ROLES`], selects every category.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories = BTreeSet::new();
        for value in values {
            let value = value.into();
            if value == ALL_ROLES {
                return Self::All;
            }
            categories.insert(value);
        }

        if categories.is_empty() {
            Self::All
        } else {
            Self::Categories(categories)
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether a row with the given category falls inside the selection
    ///
    /// Rows without a category only match [`RoleSelection::All`].
    #[must_use]
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Categories(selected) => category.is_some_and(|c| selected.contains(c)),
        }
    }

    /// Selected categories, empty for [`RoleSelection::All`]
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        match self {
            Self::All => Vec::new(),
            Self::Categories(selected) => selected.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for RoleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all roles"),
            Self::Categories(selected) => write!(f, "[{}]", selected.iter().join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_sentinel_select_all() {
        assert_eq!(RoleSelection::from_values(Vec::<String>::new()), RoleSelection::All);
        assert_eq!(RoleSelection::from_values(["eng", "All"]), RoleSelection::All);
    }

    #[test]
    fn test_categories_match() {
        let selection = RoleSelection::from_values(["eng", "sales"]);
        assert!(selection.matches(Some("eng")));
        assert!(!selection.matches(Some("ops")));
        assert!(!selection.matches(None));
        assert!(RoleSelection::All.matches(None));
        assert_eq!(selection.to_string(), "[eng, sales]");
        assert_eq!(selection.categories(), vec!["eng", "sales"]);
    }
}
