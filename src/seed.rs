//! Initial data handed to a store at construction.

use crate::model::{AccentColor, CompetitionId, CompetitionRecord};

/// Records for the full list plus the ids that start out joined.
///
/// Pre-joined ids go through the same transition as a runtime join, so the
/// full list and the joined list agree from the first render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seed {
    pub competitions: Vec<CompetitionRecord>,
    pub joined: Vec<CompetitionId>,
}

impl Seed {
    pub fn new(competitions: Vec<CompetitionRecord>) -> Self {
        Self {
            competitions,
            joined: Vec::new(),
        }
    }

    pub fn with_joined(mut self, joined: impl IntoIterator<Item = CompetitionId>) -> Self {
        self.joined.extend(joined);
        self
    }
}

/// The stock lineup: four sports, with running already joined.
pub fn sample() -> Seed {
    let running = CompetitionRecord::new("Running", "6/08 10:30", 215, AccentColor::Red, "running");
    let joined = [running.id];

    Seed::new(vec![
        running,
        CompetitionRecord::new("Football", "17/08 09:30", 100, AccentColor::Green, "football"),
        CompetitionRecord::new("Volleyball", "3/08 10:30", 20, AccentColor::Yellow, "volleyball"),
        CompetitionRecord::new("Swimming", "11/08 10:00", 10, AccentColor::Blue, "swimming"),
    ])
    .with_joined(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_lineup() {
        let seed = sample();
        let titles: Vec<_> = seed.competitions.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Running", "Football", "Volleyball", "Swimming"]);
        assert_eq!(seed.joined, vec![seed.competitions[0].id]);
        assert!(seed.competitions.iter().all(|c| !c.is_joined && !c.is_expired));
    }
}
