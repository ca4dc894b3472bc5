//! Orchestration event trace.
//!
//! The collection keeps an append-only, in-process record of what happened
//! while the selection loop ran: units added or replaced, selections blocked
//! on dependencies, answers accepted, the loop finishing. The trace exists
//! for audit and debugging (and gives tests something firmer than stdout to
//! assert against); it is not persisted across runs.
//!
//! Each event serializes to one JSON object, so [`events_ndjson`] renders the
//! whole trace as NDJSON (one object per line).

use crate::error::{PromptSetError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Actions recorded in the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Unit added to the collection.
    Added,
    /// Unit with a duplicate name replaced in place.
    Replaced,
    /// Unit removed from the collection.
    Removed,
    /// Unit ran and its answer was accepted.
    Answered,
    /// Selection hit an already-answered, non-editable unit.
    AlreadyAnswered,
    /// Selection blocked on an unmet dependency.
    Blocked,
    /// The finish policy terminated the loop.
    Finished,
}

/// One traced orchestration event.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// When the event was recorded.
    pub ts: DateTime<Utc>,
    /// What happened.
    pub action: EventAction,
    /// The unit involved, when the action concerns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Action-specific detail (e.g. the blocking dependency's label).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Event {
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            unit: None,
            detail: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Render a trace as NDJSON, one event per line.
pub fn events_ndjson(events: &[Event]) -> Result<String> {
    let mut out = String::new();
    for event in events {
        let line = serde_json::to_string(event)
            .map_err(|e| PromptSetError::Configuration(format!("failed to serialize event: {}", e)))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}
