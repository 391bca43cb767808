use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// How long the "joined" notification stays up after the latest join.
pub const DEFAULT_NOTIFICATION_DELAY: Duration = Duration::from_millis(1500);

/// Buffered [`StoreEvent`](crate::StoreEvent)s per subscriber before the
/// slowest one starts lagging.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Largest accepted `event_capacity`. The event buffer is allocated up front.
pub const MAX_EVENT_CAPACITY: usize = 1 << 16;

/// Text of the self-dismissing notification shown after a join.
pub const NOTIFICATION_MESSAGE: &str = "Added successfully!";

/// Tunables for a [`CompetitionStore`](crate::CompetitionStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    #[serde(rename = "notification_delay_ms", with = "millis")]
    pub notification_delay: Duration,
    pub event_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            notification_delay: DEFAULT_NOTIFICATION_DELAY,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Reject values the store cannot be built with.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_EVENT_CAPACITY).contains(&self.event_capacity) {
            return Err(StoreError::InvalidConfig {
                field: "event_capacity",
                reason: format!(
                    "{} is outside 1..={MAX_EVENT_CAPACITY}",
                    self.event_capacity
                ),
            });
        }
        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
