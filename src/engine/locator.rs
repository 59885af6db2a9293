//! Task -> owning day resolution
//!
//! Built once from the catalog's structured `day_id` back-references.
//! Callers that only hold `(event, task)` resolve the day here; an id the
//! catalog does not know yields `None` and downstream lookups degrade to
//! "not found".

use std::collections::HashMap;

use crate::catalog::Event;

pub struct TaskLocator {
    owners: HashMap<(String, String), String>,
}

impl TaskLocator {
    pub fn build(catalog: &[Event]) -> Self {
        let mut owners = HashMap::new();
        for event in catalog {
            for day in &event.days {
                for task in &day.tasks {
                    owners.insert((event.id.clone(), task.id.clone()), task.day_id.clone());
                }
            }
        }
        Self { owners }
    }

    pub fn owning_day(&self, event_id: &str, task_id: &str) -> Option<&str> {
        self.owners
            .get(&(event_id.to_string(), task_id.to_string()))
            .map(String::as_str)
    }
}
