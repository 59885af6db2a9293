//! Progression engine
//!
//! [`EventsService`] ties the pieces together: versioned catalog bootstrap,
//! progress hydration, unlock resolution, completion recording with the
//! day/event cascade, and write-through persistence after every mutation.
//!
//! ```text
//! UI/CLI --> complete_task --> recorder --> day/event cascade
//!    |                                          |
//!    +--< views (catalog + progress)    snapshot v BlobStore
//! ```
//!
//! The service is a plain constructible object: tests hand it a
//! `MemoryStore`, the binary hands it the SQLite store.

mod locator;
mod recorder;
mod unlock;
mod view;

pub use locator::TaskLocator;
pub use recorder::ProgressEvent;
pub use view::{DayView, EventView, TaskView};

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, Event, CATALOG_VERSION};
use crate::progress::{EventProgress, OverallStats, UserProgress};
use crate::store::{BlobStore, SqliteStore};

/// Store key for the progress snapshot
pub(crate) const PROGRESS_KEY: &str = "user_progress";
/// Key prefix of the per-task score side table
pub(crate) const SCORE_KEY_PREFIX: &str = "task_score";

pub(crate) fn score_key(event_id: &str, task_id: &str) -> String {
    format!("{SCORE_KEY_PREFIX}:{event_id}:{task_id}")
}

/// Full-snapshot backup format for export/import
#[derive(Debug, Serialize, Deserialize)]
struct ExportEnvelope {
    version: String,
    exported_at: DateTime<Utc>,
    progress: UserProgress,
    /// Per-task score side table, keyed by store key
    #[serde(default)]
    task_scores: BTreeMap<String, u32>,
}

/// The progression and unlock engine
pub struct EventsService {
    store: Arc<dyn BlobStore>,
    catalog: Vec<Event>,
    locator: TaskLocator,
    progress: UserProgress,
}

impl EventsService {
    /// Bootstrap against the given store: load or regenerate the catalog
    /// (version-gated), then hydrate progress. Corrupt or missing blobs
    /// fall back to fresh state; this constructor never fails.
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        let catalog = catalog::load_or_regenerate(store.as_ref());
        let locator = TaskLocator::build(&catalog);
        let progress = load_progress(store.as_ref());
        Self {
            store,
            catalog,
            locator,
            progress,
        }
    }

    /// Service over the default on-disk store (~/.pulsequest/state.db)
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Arc::new(SqliteStore::open_default()?)))
    }

    /// Service over an explicit catalog, bypassing the cached/generated
    /// one. Progress is still hydrated from the store. Used by tests and
    /// embedders that bring their own content tree.
    pub fn with_catalog(store: Arc<dyn BlobStore>, catalog: Vec<Event>) -> Self {
        let locator = TaskLocator::build(&catalog);
        let progress = load_progress(store.as_ref());
        Self {
            store,
            catalog,
            locator,
            progress,
        }
    }

    // ========================================
    // READ MODEL
    // ========================================

    /// Raw catalog, without progress annotations
    pub fn catalog(&self) -> &[Event] {
        &self.catalog
    }

    /// All events merged with progress, every day/task annotated with
    /// `unlocked` / `completed` / `best_score`
    pub fn events(&self) -> Vec<EventView> {
        let score_of = self.score_reader();
        view::compose_events(&self.catalog, &self.progress, &score_of)
    }

    pub fn event(&self, event_id: &str) -> Option<EventView> {
        let score_of = self.score_reader();
        catalog::find_event(&self.catalog, event_id)
            .map(|e| view::compose_event(&self.catalog, &self.progress, e, &score_of))
    }

    pub fn day(&self, event_id: &str, day_id: &str) -> Option<DayView> {
        let score_of = self.score_reader();
        let event = catalog::find_event(&self.catalog, event_id)?;
        let day = event.day(day_id)?;
        Some(view::compose_day(
            &self.catalog,
            &self.progress,
            event,
            day,
            &score_of,
        ))
    }

    pub fn task(&self, event_id: &str, day_id: &str, task_id: &str) -> Option<TaskView> {
        let score_of = self.score_reader();
        let event = catalog::find_event(&self.catalog, event_id)?;
        let day = event.day(day_id)?;
        let task = day.tasks.iter().find(|t| t.id == task_id)?;
        Some(view::compose_task(
            &self.catalog,
            &self.progress,
            event,
            day,
            task,
            &score_of,
        ))
    }

    pub fn user_stats(&self) -> &OverallStats {
        &self.progress.overall_stats
    }

    pub fn event_progress(&self, event_id: &str) -> Option<&EventProgress> {
        self.progress.events.get(event_id)
    }

    /// Resolve the day that owns a task (structured catalog reference)
    pub fn owning_day(&self, event_id: &str, task_id: &str) -> Option<&str> {
        self.locator.owning_day(event_id, task_id)
    }

    // ========================================
    // RESOLVERS
    // ========================================

    pub fn is_day_unlocked(&self, event_id: &str, day_number: u32) -> bool {
        unlock::is_day_unlocked(&self.catalog, &self.progress, event_id, day_number)
    }

    pub fn is_day_completed(&self, event_id: &str, day_id: &str) -> bool {
        unlock::is_day_completed(&self.progress, event_id, day_id)
    }

    pub fn is_task_unlocked(&self, event_id: &str, day_id: &str, task_id: &str) -> bool {
        unlock::is_task_unlocked(&self.catalog, &self.progress, event_id, day_id, task_id)
    }

    pub fn is_task_completed(&self, event_id: &str, task_id: &str) -> bool {
        unlock::is_task_completed(&self.progress, event_id, task_id)
    }

    // ========================================
    // MUTATION
    // ========================================

    /// Record a task completion. Idempotent: a repeat of an already
    /// completed task changes nothing and returns no events. On first
    /// completion the full snapshot is written through to the store.
    pub fn complete_task(
        &mut self,
        event_id: &str,
        day_id: &str,
        task_id: &str,
        score: u32,
        time_spent_min: u32,
    ) -> Vec<ProgressEvent> {
        let events = recorder::record_completion(
            &self.catalog,
            &mut self.progress,
            event_id,
            day_id,
            task_id,
            score,
            time_spent_min,
            Utc::now(),
        );

        if !events.is_empty() {
            if let Err(e) = self
                .store
                .save(&score_key(event_id, task_id), &score.to_string())
            {
                tracing::warn!("Failed to record task score: {e}");
            }
            self.persist();
        }
        events
    }

    /// Clear all progress and the score side table. The catalog cache is
    /// left untouched.
    pub fn reset_progress(&mut self) {
        self.progress = UserProgress::new(Utc::now());
        self.persist();

        for event in &self.catalog {
            for day in &event.days {
                for task in &day.tasks {
                    if let Err(e) = self.store.remove(&score_key(&event.id, &task.id)) {
                        tracing::warn!("Failed to remove score for {}: {e}", task.id);
                    }
                }
            }
        }
        tracing::info!("Progress reset");
    }

    /// Force a fresh catalog, ignoring the cached blob. Progress is
    /// untouched.
    pub fn regenerate_catalog(&mut self) {
        self.catalog = catalog::regenerate(self.store.as_ref());
        self.locator = TaskLocator::build(&self.catalog);
    }

    // ========================================
    // BACKUP / RESTORE
    // ========================================

    /// Serialize the full progress snapshot, including per-task scores
    pub fn export_progress(&self) -> String {
        let mut task_scores = BTreeMap::new();
        for event in &self.catalog {
            for day in &event.days {
                for task in &day.tasks {
                    let key = score_key(&event.id, &task.id);
                    if let Some(score) = self.read_score(&event.id, &task.id) {
                        task_scores.insert(key, score);
                    }
                }
            }
        }

        let envelope = ExportEnvelope {
            version: CATALOG_VERSION.to_string(),
            exported_at: Utc::now(),
            progress: self.progress.clone(),
            task_scores,
        };
        serde_json::to_string_pretty(&envelope).unwrap_or_else(|e| {
            tracing::warn!("Failed to serialize export: {e}");
            String::new()
        })
    }

    /// Restore from an exported snapshot. Returns `false` on malformed
    /// input, leaving the current state untouched. Bare progress
    /// snapshots (no envelope) from older exports are accepted too.
    pub fn import_progress(&mut self, data: &str) -> bool {
        let (progress, task_scores) = match serde_json::from_str::<ExportEnvelope>(data) {
            Ok(envelope) => (envelope.progress, envelope.task_scores),
            Err(_) => match serde_json::from_str::<UserProgress>(data) {
                Ok(progress) => (progress, BTreeMap::new()),
                Err(e) => {
                    tracing::warn!("Import rejected, malformed snapshot: {e}");
                    return false;
                }
            },
        };

        self.progress = progress;
        self.persist();

        for (key, score) in &task_scores {
            if !key.starts_with(SCORE_KEY_PREFIX) {
                continue;
            }
            if let Err(e) = self.store.save(key, &score.to_string()) {
                tracing::warn!("Failed to restore score {key}: {e}");
            }
        }
        tracing::info!("Progress imported");
        true
    }

    // ========================================
    // PERSISTENCE
    // ========================================

    /// Write-through of the whole snapshot. Failures are logged, never
    /// raised: the in-memory state stays authoritative for this session.
    fn persist(&self) {
        match serde_json::to_string(&self.progress) {
            Ok(blob) => {
                if let Err(e) = self.store.save(PROGRESS_KEY, &blob) {
                    tracing::warn!("Failed to persist progress: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize progress: {e}"),
        }
    }

    fn read_score(&self, event_id: &str, task_id: &str) -> Option<u32> {
        match self.store.load(&score_key(event_id, task_id)) {
            Ok(value) => value.and_then(|v| v.parse().ok()),
            Err(e) => {
                tracing::warn!("Failed to read task score: {e}");
                None
            }
        }
    }

    fn score_reader(&self) -> impl Fn(&str, &str) -> Option<u32> + '_ {
        move |event_id: &str, task_id: &str| self.read_score(event_id, task_id)
    }
}

/// Hydrate progress from the store, falling back to a fresh record on
/// absence or corruption
fn load_progress(store: &dyn BlobStore) -> UserProgress {
    match store.load(PROGRESS_KEY) {
        Ok(Some(blob)) => match serde_json::from_str(&blob) {
            Ok(progress) => {
                tracing::debug!("Loaded user progress from store");
                progress
            }
            Err(e) => {
                tracing::warn!("Stored progress unparseable, starting fresh: {e}");
                UserProgress::new(Utc::now())
            }
        },
        Ok(None) => {
            tracing::debug!("No stored progress, starting fresh");
            UserProgress::new(Utc::now())
        }
        Err(e) => {
            tracing::warn!("Failed to read progress: {e}");
            UserProgress::new(Utc::now())
        }
    }
}
