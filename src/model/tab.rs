use serde::{Deserialize, Serialize};

/// The two lists a user can switch between.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::FromRepr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Tab {
    #[default]
    AllCompetitions = 0,
    MyCompetitions = 1,
}

impl Tab {
    /// Map a tab bar selection index to a tab. Unknown indices select nothing.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::from_repr(index)
    }

    /// Position of the tab in the tab bar.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Navigation title shown above the list.
    pub fn title(self) -> &'static str {
        match self {
            Tab::AllCompetitions => "competitions",
            Tab::MyCompetitions => "My competitions",
        }
    }

    /// Symbol name of the tab bar icon.
    pub fn icon(self) -> &'static str {
        match self {
            Tab::AllCompetitions => "person.3",
            Tab::MyCompetitions => "person",
        }
    }

    /// Only the full list offers a join action on its cards.
    pub fn offers_join(self) -> bool {
        matches!(self, Tab::AllCompetitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_from_index() {
        assert_eq!(Tab::from_index(0), Some(Tab::AllCompetitions));
        assert_eq!(Tab::from_index(1), Some(Tab::MyCompetitions));
        assert_eq!(Tab::from_index(2), None);
        assert_eq!(Tab::MyCompetitions.index(), 1);
    }

    #[test]
    fn test_tab_chrome() {
        assert_eq!(Tab::default(), Tab::AllCompetitions);
        assert_eq!(Tab::AllCompetitions.title(), "competitions");
        assert_eq!(Tab::MyCompetitions.icon(), "person");
        assert!(Tab::AllCompetitions.offers_join());
        assert!(!Tab::MyCompetitions.offers_join());
        assert_eq!(Tab::MyCompetitions.to_string(), "my-competitions");
    }
}
