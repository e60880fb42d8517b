use crate::error::MenuError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of menu sections. Declaration order is display order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Entrees,
    Plats,
    Desserts,
    Boissons,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Entrees,
        Category::Plats,
        Category::Desserts,
        Category::Boissons,
    ];

    /// Key used in URLs, JSON and storage.
    pub fn key(self) -> &'static str {
        match self {
            Category::Entrees => "entrees",
            Category::Plats => "plats",
            Category::Desserts => "desserts",
            Category::Boissons => "boissons",
        }
    }

    /// Label shown on the category tabs.
    pub fn label(self) -> &'static str {
        match self {
            Category::Entrees => "Entrées",
            Category::Plats => "Plats",
            Category::Desserts => "Desserts",
            Category::Boissons => "Boissons",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| MenuError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_keys() {
        for category in Category::ALL {
            assert_eq!(category.key().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_parse_rejects_labels_and_unknown_keys() {
        assert!("Entrées".parse::<Category>().is_err());
        assert!("cocktails".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_index_matches_display_order() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }
}
