use serde::Serialize;

use super::competition::{CompetitionId, CompetitionRecord};
use super::tab::Tab;

/// A consistent view of everything the store exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreState {
    /// Display order, fixed at seeding.
    pub all_competitions: Vec<CompetitionRecord>,
    /// Join order.
    pub my_competitions: Vec<CompetitionRecord>,
    pub notification_active: bool,
}

impl StoreState {
    /// The list a tab renders.
    pub fn competitions_for(&self, tab: Tab) -> &[CompetitionRecord] {
        match tab {
            Tab::AllCompetitions => &self.all_competitions,
            Tab::MyCompetitions => &self.my_competitions,
        }
    }

    pub fn find(&self, id: CompetitionId) -> Option<&CompetitionRecord> {
        self.all_competitions.iter().find(|c| c.id == id)
    }

    pub fn has_joined(&self, id: CompetitionId) -> bool {
        self.my_competitions.iter().any(|c| c.id == id)
    }

    /// Move a competition into the joined list. Leaves the notification flag
    /// alone; raising it is the store's business.
    pub(crate) fn join(&mut self, id: CompetitionId) -> JoinOutcome {
        let Some(record) = self.all_competitions.iter_mut().find(|c| c.id == id) else {
            return JoinOutcome::UnknownCompetition;
        };
        if self.my_competitions.iter().any(|c| c.id == id) {
            return JoinOutcome::AlreadyJoined;
        }

        record.is_joined = true;
        self.my_competitions.push(record.clone());
        JoinOutcome::Joined
    }
}

/// Which path a join request took. Neither non-joining path is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum JoinOutcome {
    Joined,
    AlreadyJoined,
    UnknownCompetition,
}

impl JoinOutcome {
    pub fn is_joined(self) -> bool {
        matches!(self, JoinOutcome::Joined)
    }
}

/// Fine-grained change notifications, one per observable change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A record was marked joined and appended to the joined list.
    Joined { record: CompetitionRecord },
    NotificationShown,
    NotificationCleared,
}
