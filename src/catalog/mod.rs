//! Event catalog - the immutable training content tree
//!
//! Events own an ordered list of Days, Days own an ordered list of Tasks.
//! The catalog is regenerated deterministically by [`generator`] and cached
//! in the durable store behind a version tag: a tag mismatch (or a corrupt
//! blob) throws the cache away and regenerates, without ever touching user
//! progress.

pub mod generator;

use serde::{Deserialize, Serialize};

use crate::store::BlobStore;

/// Version tag for the cached catalog blob. Bump to force regeneration
/// on the next startup.
pub const CATALOG_VERSION: &str = "2.1.0";

/// Store key for the serialized catalog
pub(crate) const CATALOG_KEY: &str = "events_catalog";
/// Store key for the catalog version tag
pub(crate) const CATALOG_VERSION_KEY: &str = "catalog_version";

/// What a task pays out on first completion
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Reward {
    pub xp: u32,
    pub gems: u32,
}

/// Kind of exercise a task presents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    EcgQuiz,
    RhythmRecognition,
    ClinicalScenario,
    FlashcardReview,
    CrisisSimulator,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EcgQuiz => "ecg-quiz",
            Self::RhythmRecognition => "rhythm-recognition",
            Self::ClinicalScenario => "clinical-scenario",
            Self::FlashcardReview => "flashcard-review",
            Self::CrisisSimulator => "crisis-simulator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }
}

/// A single multiple-choice question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct: usize,
    pub explanation: String,
}

/// Smallest completable unit: one quiz, flashcard set or scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// Owning day, assigned at catalog construction. Completion and lookup
    /// paths resolve ownership through this field, never by parsing the id.
    pub day_id: String,
    pub title: String,
    pub kind: TaskKind,
    pub difficulty: Difficulty,
    /// Expected time to finish, minutes
    pub estimated_min: u32,
    pub reward: Reward,
    /// ECG strip shown alongside the task, if any
    #[serde(default)]
    pub ecg_image: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A dated bundle of tasks; days unlock sequentially within an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Day {
    pub id: String,
    /// 1-based, contiguous within the event
    pub day_number: u32,
    pub title: String,
    pub topic: String,
    pub tasks: Vec<Task>,
}

/// Top-level challenge: an ordered run of days
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub total_days: u32,
    pub days: Vec<Day>,
}

impl Event {
    pub fn day(&self, day_id: &str) -> Option<&Day> {
        self.days.iter().find(|d| d.id == day_id)
    }

    pub fn day_by_number(&self, day_number: u32) -> Option<&Day> {
        self.days.iter().find(|d| d.day_number == day_number)
    }
}

/// Look up an event in a catalog slice
pub fn find_event<'a>(catalog: &'a [Event], event_id: &str) -> Option<&'a Event> {
    catalog.iter().find(|e| e.id == event_id)
}

/// Load the cached catalog, regenerating when the version tag is stale or
/// the blob is absent/corrupt. Never touches the progress key.
pub fn load_or_regenerate(store: &dyn BlobStore) -> Vec<Event> {
    let stored_version = store.load(CATALOG_VERSION_KEY).unwrap_or_else(|e| {
        tracing::warn!("Failed to read catalog version tag: {e}");
        None
    });

    if stored_version.as_deref() == Some(CATALOG_VERSION) {
        match store.load(CATALOG_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Event>>(&blob) {
                Ok(events) => {
                    tracing::debug!("Loaded catalog from store ({} events)", events.len());
                    return events;
                }
                Err(e) => tracing::warn!("Stored catalog unparseable, regenerating: {e}"),
            },
            Ok(None) => tracing::debug!("No cached catalog, generating"),
            Err(e) => tracing::warn!("Failed to read cached catalog: {e}"),
        }
    } else {
        tracing::info!(
            "Catalog version changed ({} -> {CATALOG_VERSION}), regenerating",
            stored_version.as_deref().unwrap_or("none")
        );
    }

    regenerate(store)
}

/// Generate a fresh catalog and persist it with the current version tag
pub fn regenerate(store: &dyn BlobStore) -> Vec<Event> {
    let events = generator::generate_events();

    match serde_json::to_string(&events) {
        Ok(blob) => {
            if let Err(e) = store.save(CATALOG_KEY, &blob) {
                tracing::warn!("Failed to cache catalog: {e}");
            }
            if let Err(e) = store.save(CATALOG_VERSION_KEY, CATALOG_VERSION) {
                tracing::warn!("Failed to save catalog version tag: {e}");
            }
        }
        Err(e) => tracing::warn!("Failed to serialize catalog: {e}"),
    }

    tracing::info!("Generated catalog with {} events", events.len());
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_regenerate_on_empty_store() {
        let store = MemoryStore::new();
        let events = load_or_regenerate(&store);
        assert!(!events.is_empty());

        // Blob and tag are cached
        assert_eq!(
            store.load(CATALOG_VERSION_KEY).unwrap().as_deref(),
            Some(CATALOG_VERSION)
        );
        assert!(store.load(CATALOG_KEY).unwrap().is_some());
    }

    #[test]
    fn test_version_mismatch_regenerates() {
        let store = MemoryStore::new();
        store.save(CATALOG_VERSION_KEY, "0.0.1").unwrap();
        store.save(CATALOG_KEY, "[]").unwrap();

        let events = load_or_regenerate(&store);
        assert!(!events.is_empty(), "stale empty catalog must be replaced");
        assert_eq!(
            store.load(CATALOG_VERSION_KEY).unwrap().as_deref(),
            Some(CATALOG_VERSION)
        );
    }

    #[test]
    fn test_corrupt_blob_regenerates() {
        let store = MemoryStore::new();
        store.save(CATALOG_VERSION_KEY, CATALOG_VERSION).unwrap();
        store.save(CATALOG_KEY, "not json {{").unwrap();

        let events = load_or_regenerate(&store);
        assert!(!events.is_empty());
    }

    #[test]
    fn test_tasks_reference_owning_day() {
        let store = MemoryStore::new();
        for event in load_or_regenerate(&store) {
            for day in &event.days {
                for task in &day.tasks {
                    assert_eq!(task.day_id, day.id, "task {} owner mismatch", task.id);
                }
            }
        }
    }

    #[test]
    fn test_day_numbers_contiguous() {
        let store = MemoryStore::new();
        for event in load_or_regenerate(&store) {
            assert_eq!(event.total_days as usize, event.days.len());
            for (idx, day) in event.days.iter().enumerate() {
                assert_eq!(day.day_number as usize, idx + 1);
            }
        }
    }
}
