//! Topic time layout.
//!
//! # Responsibility
//! - Turn an anchor instant plus an ordered agenda into per-topic
//!   start/end instants.
//!
//! # Invariants
//! - Slots are contiguous and non-overlapping, in ordering sequence.
//! - Skipped entries (stale, deleted, repeated) never advance the cursor.
//! - Zero-length topics occupy a zero-width slot (`start == end`).

use crate::engine::ordering::resolve_ordered_topics;
use crate::model::minutes::Minutes;
use crate::model::topic::{Topic, TopicId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A topic with its computed slot. Borrowed for one computation cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedTopic<'a> {
    #[serde(flatten)]
    pub topic: &'a Topic,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl CalculatedTopic<'_> {
    pub fn id(&self) -> &str {
        self.topic.id.as_str()
    }
}

/// Lays out `ordering` back to back starting at `anchor`.
pub fn calculate_topic_times<'a>(
    anchor: DateTime<Utc>,
    topics: &'a [Topic],
    ordering: &[TopicId],
) -> Vec<CalculatedTopic<'a>> {
    let mut cursor = anchor;
    resolve_ordered_topics(topics, ordering)
        .into_iter()
        .map(|topic| {
            let start_time = cursor;
            let end_time = advance(start_time, topic.duration);
            cursor = end_time;
            CalculatedTopic {
                topic,
                start_time,
                end_time,
            }
        })
        .collect()
}

/// End of the last slot, or `anchor` for an empty layout.
pub fn projected_end(anchor: DateTime<Utc>, layout: &[CalculatedTopic<'_>]) -> DateTime<Utc> {
    layout.last().map_or(anchor, |slot| slot.end_time)
}

/// Numeric sum of the durations of the resolved agenda.
pub fn total_minutes(topics: &[Topic], ordering: &[TopicId]) -> Minutes {
    resolve_ordered_topics(topics, ordering)
        .into_iter()
        .map(|topic| topic.duration)
        .sum()
}

/// Moves `instant` forward by `minutes`, saturating at the latest instant.
pub fn advance(instant: DateTime<Utc>, minutes: Minutes) -> DateTime<Utc> {
    instant
        .checked_add_signed(minutes.to_duration())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
