//! PulseQuest - gamified ECG interpretation training
//!
//! The library half is the progression engine behind the training app:
//! an immutable catalog of Events -> Days -> Tasks, per-user progress
//! with sequential day unlocks, and the completion cascade that rolls a
//! finished task up into day and event completion. All state lives in a
//! flat key/value blob store and is written through after every
//! mutation, so a session can stop at any point without losing progress.
//!
//! ```ignore
//! let mut service = EventsService::new(Arc::new(MemoryStore::new()));
//! service.complete_task("code-pulse", "code-pulse-day-1",
//!                       "code-pulse-day-1-task-1", 80, 5);
//! let events = service.events(); // catalog annotated with progress
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod progress;
pub mod store;

pub use engine::{EventsService, ProgressEvent};
