//! Topic domain model.
//!
//! # Responsibility
//! - Define the agenda item record consumed by the timing engine.
//! - Provide lifecycle helpers for completion and soft-delete semantics.
//!
//! # Invariants
//! - `id` is stable and is the only key used by meeting orderings.
//! - `is_deleted` is the source of truth for tombstone state.
//! - `duration` is already normalized; see [`Minutes`].

use crate::model::instant::deserialize_lenient;
use crate::model::lenient::{deserialize_flag, deserialize_label, deserialize_text};
use crate::model::minutes::Minutes;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

/// Stable identifier referenced by meeting orderings.
pub type TopicId = String;

/// Presentation category of a topic. Irrelevant to timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicKind {
    Presentation,
    #[default]
    Discussion,
    Decision,
    Break,
}

impl TopicKind {
    /// Maps a persisted label; unknown labels read as the default kind.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "presentation" => Self::Presentation,
            "discussion" => Self::Discussion,
            "decision" => Self::Decision,
            "break" => Self::Break,
            _ => {
                debug!("event=kind_normalized module=model status=fallback");
                Self::default()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TopicKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(deserialize_label(deserializer)?
            .map(|label| Self::from_label(&label))
            .unwrap_or_default())
    }
}

/// One timed discussion item as persisted by the authoring layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: TopicId,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    /// Allotted time. Persisted numbers and numeric strings are both accepted.
    #[serde(default)]
    pub duration: Minutes,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub notes: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type", default)]
    pub kind: TopicKind,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_completed: bool,
    /// Set together with `is_completed`; may be missing on inconsistent data.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,
    /// Soft delete tombstone. Deleted topics never take part in timing.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_deleted: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Topic {
    /// Creates an open, active discussion topic.
    pub fn new(id: impl Into<TopicId>, title: impl Into<String>, duration: Minutes) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration,
            notes: String::new(),
            description: String::new(),
            kind: TopicKind::default(),
            is_completed: false,
            completed_at: None,
            is_deleted: false,
            owner_id: None,
            owner_name: None,
            created_at: None,
        }
    }

    /// Marks the topic done at `at`.
    pub fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.is_completed = true;
        self.completed_at = Some(at);
    }

    /// Clears completion state.
    pub fn reopen(&mut self) {
        self.is_completed = false;
        self.completed_at = None;
    }

    /// Marks this topic as softly deleted (tombstoned).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears soft delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this topic takes part in layout and timer computations.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}
