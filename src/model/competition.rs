use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::EnumString;
use uuid::Uuid;

/// Opaque identifier of a competition. Assigned once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitionId(Uuid);

impl CompetitionId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build a stable identifier from a number, handy for fixtures.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CompetitionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CompetitionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for CompetitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Card tint used when rendering a competition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    Red,
    Orange,
    Yellow,
    Green,
    Mint,
    Teal,
    Cyan,
    Blue,
    Indigo,
    Purple,
    Pink,
    Brown,
    Gray,
}

/// A joinable competition together with its joined status.
///
/// Everything except `is_joined` is fixed at creation. `date` is a display
/// string and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionRecord {
    pub id: CompetitionId,
    pub title: String,
    pub date: String,
    pub competitor_count: u32,
    pub accent_color: AccentColor,
    pub image_ref: String,
    #[serde(default)]
    pub is_joined: bool,
    /// Carried through untouched; nothing filters on it yet.
    #[serde(default)]
    pub is_expired: bool,
}

impl CompetitionRecord {
    /// Create an unjoined, unexpired record with a freshly generated id.
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        competitor_count: u32,
        accent_color: AccentColor,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: CompetitionId::new(),
            title: title.into(),
            date: date.into(),
            competitor_count,
            accent_color,
            image_ref: image_ref.into(),
            is_joined: false,
            is_expired: false,
        }
    }

    /// Replace the generated id with a caller-assigned one.
    pub fn with_id(mut self, id: CompetitionId) -> Self {
        self.id = id;
        self
    }

    /// Mark the record as expired.
    pub fn expired(mut self) -> Self {
        self.is_expired = true;
        self
    }

    /// Whether the card should offer a join action.
    pub fn can_join(&self) -> bool {
        !self.is_joined
    }

    pub fn start_label(&self) -> String {
        format!("competition start - {}", self.date)
    }

    pub fn competitors_label(&self) -> String {
        format!("Number of competitors - {}", self.competitor_count)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_new_record_is_open_for_joining() {
        let record =
            CompetitionRecord::new("Running", "6/08 10:30", 215, AccentColor::Red, "running");
        assert!(record.can_join());
        assert!(!record.is_expired);
        assert_eq!(record.start_label(), "competition start - 6/08 10:30");
        assert_eq!(record.competitors_label(), "Number of competitors - 215");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = CompetitionRecord::new("A", "", 0, AccentColor::Blue, "a");
        let b = CompetitionRecord::new("A", "", 0, AccentColor::Blue, "a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_accent_color_strings() {
        assert_eq!(AccentColor::Yellow.to_string(), "yellow");
        assert_eq!(AccentColor::from_str("green").unwrap(), AccentColor::Green);
        assert!(AccentColor::from_str("chartreuse").is_err());
    }

    #[test]
    fn test_record_deserializes_with_default_flags() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000007",
            "title": "Swimming",
            "date": "11/08 10:00",
            "competitor_count": 10,
            "accent_color": "blue",
            "image_ref": "swimming"
        }"#;
        let record: CompetitionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, CompetitionId::from_u128(7));
        assert_eq!(record.accent_color, AccentColor::Blue);
        assert!(!record.is_joined);
        assert!(!record.is_expired);
    }
}
