use tokio::runtime::TryCurrentError;

use crate::model::CompetitionId;

/// Errors raised while assembling a [`CompetitionStore`](crate::CompetitionStore).
///
/// Joining never fails; these only surface from
/// [`CompetitionStoreBuilder::build`](crate::CompetitionStoreBuilder::build).
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Two seed records share the same identifier.
    #[error("duplicate competition id in seed: {id}")]
    DuplicateCompetition { id: CompetitionId },

    /// A pre-joined id does not refer to any seed record.
    #[error("pre-joined competition {id} is not in the seed")]
    UnknownCompetition { id: CompetitionId },

    /// A [`StoreConfig`](crate::StoreConfig) value is out of range.
    #[error("invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// The default scheduler needs a Tokio runtime to spawn timers on.
    #[error("no tokio runtime available for the notification timer: {0}")]
    NoRuntime(#[from] TryCurrentError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
