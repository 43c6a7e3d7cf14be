//! Meeting anchor record.
//!
//! # Responsibility
//! - Carry the anchor fields the engine reads: start instants, scheduled
//!   duration, ordering and lifecycle status.
//!
//! # Invariants
//! - `scheduled_duration` keeps "absent" distinct from "zero".
//! - `topic_order` is an unvalidated, possibly stale list of topic ids.

use crate::model::instant::deserialize_lenient;
use crate::model::lenient::{deserialize_flag, deserialize_label, deserialize_text};
use crate::model::minutes::Minutes;
use crate::model::topic::TopicId;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

/// Meeting lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    #[default]
    Planning,
    Running,
    Ended,
}

impl MeetingStatus {
    /// Maps a persisted label; unknown labels read as planning.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "planning" => Self::Planning,
            "running" => Self::Running,
            "ended" => Self::Ended,
            _ => {
                debug!("event=status_normalized module=model status=fallback");
                Self::default()
            }
        }
    }
}

impl<'de> Deserialize<'de> for MeetingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(deserialize_label(deserializer)?
            .map(|label| Self::from_label(&label))
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub owner_id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default)]
    pub status: MeetingStatus,
    /// Planned start.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub scheduled_at: Option<DateTime<Utc>>,
    /// IANA zone name, passed through for presentation only.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub timezone: String,
    /// Planned total length. `None` when the record carries no value at all.
    #[serde(default)]
    pub scheduled_duration: Option<Minutes>,
    #[serde(default)]
    pub topic_order: Vec<TopicId>,
    /// Actual start, set when the meeting enters `Running`.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_deleted: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_archived: bool,
}

impl Meeting {
    /// Creates a planning meeting with an empty agenda.
    pub fn new(id: impl Into<String>, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            scheduled_at: Some(scheduled_at),
            ..Self::default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == MeetingStatus::Running
    }

    /// Instant layout computations are relative to.
    ///
    /// The actual start wins once the meeting has left planning and recorded
    /// one; otherwise the planned start is used.
    pub fn layout_anchor(&self) -> Option<DateTime<Utc>> {
        match (self.status, self.started_at) {
            (MeetingStatus::Running | MeetingStatus::Ended, Some(started_at)) => Some(started_at),
            _ => self.scheduled_at,
        }
    }

    /// Scheduled length with an absent value read as zero.
    pub fn scheduled_minutes(&self) -> Minutes {
        self.scheduled_duration.unwrap_or(Minutes::ZERO)
    }
}
