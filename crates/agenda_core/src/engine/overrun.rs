//! Scheduled-end boundary analysis.
//!
//! # Responsibility
//! - Classify each topic slot against the meeting's scheduled end.
//! - Pick the single topic that hosts the scheduled-end marker and locate
//!   the marker inside it.
//!
//! # Invariants
//! - Offsets are minutes relative to the layout anchor, summed numerically.
//! - At most one topic hosts the marker: the first one that straddles the
//!   scheduled end or starts exactly on it, else the last one when it ends
//!   exactly on it.
//! - Marker offsets are always within `[0, 1]`.

use crate::engine::ordering::resolve_ordered_topics;
use crate::model::minutes::Minutes;
use crate::model::topic::{Topic, TopicId};
use serde::{Deserialize, Serialize};

/// How an absent scheduled duration is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSchedule {
    /// Absent means zero: the first topic hosts the marker at offset 0.
    #[default]
    TreatAsZero,
    /// Absent means unbounded: no marker and no overrun flags.
    SuppressMarker,
}

/// Where a topic slot sits relative to the scheduled end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPosition {
    /// Slot ends at or before the scheduled end.
    Before,
    /// Scheduled end falls strictly inside the slot.
    Straddling,
    /// Slot starts exactly on the scheduled end.
    StartsAtBoundary,
    /// Slot starts after the scheduled end.
    After,
}

impl BoundaryPosition {
    /// Slot starts at or after the scheduled end.
    pub fn is_overrun(self) -> bool {
        matches!(self, Self::StartsAtBoundary | Self::After)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicOverrun {
    pub topic_id: TopicId,
    /// Cumulative minutes before this topic.
    pub start_offset: Minutes,
    /// Cumulative minutes including this topic.
    pub end_offset: Minutes,
    pub position: BoundaryPosition,
    /// Fraction of the slot at which the marker sits; only set on the host.
    /// `1.0` when the agenda ends exactly on the scheduled end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_offset: Option<f64>,
}

impl TopicOverrun {
    pub fn is_overrun(&self) -> bool {
        self.position.is_overrun()
    }

    pub fn is_straddling(&self) -> bool {
        self.position == BoundaryPosition::Straddling
    }

    pub fn hosts_boundary(&self) -> bool {
        self.boundary_offset.is_some()
    }
}

/// Marker placement on the hosting topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryMarker {
    pub topic_id: TopicId,
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrunReport {
    /// Effective scheduled length; `None` when the marker is suppressed.
    pub scheduled: Option<Minutes>,
    pub topics: Vec<TopicOverrun>,
    pub boundary: Option<BoundaryMarker>,
}

impl OverrunReport {
    pub fn topic(&self, id: &str) -> Option<&TopicOverrun> {
        self.topics.iter().find(|entry| entry.topic_id == id)
    }

    pub fn overrun_count(&self) -> usize {
        self.topics.iter().filter(|entry| entry.is_overrun()).count()
    }
}

/// Analyzes the agenda against `scheduled`, reading an absent value as zero.
pub fn analyze_overrun(
    topics: &[Topic],
    ordering: &[TopicId],
    scheduled: Option<Minutes>,
) -> OverrunReport {
    analyze_overrun_with(topics, ordering, scheduled, MissingSchedule::TreatAsZero)
}

/// Analyzes the agenda against `scheduled` using `missing` for absent values.
pub fn analyze_overrun_with(
    topics: &[Topic],
    ordering: &[TopicId],
    scheduled: Option<Minutes>,
    missing: MissingSchedule,
) -> OverrunReport {
    let scheduled = match (scheduled, missing) {
        (Some(minutes), _) => Some(minutes),
        (None, MissingSchedule::TreatAsZero) => Some(Minutes::ZERO),
        (None, MissingSchedule::SuppressMarker) => None,
    };

    let mut cumulative = Minutes::ZERO;
    let mut boundary: Option<BoundaryMarker> = None;
    let mut entries = Vec::new();

    for topic in resolve_ordered_topics(topics, ordering) {
        let start_offset = cumulative;
        let end_offset = cumulative + topic.duration;
        cumulative = end_offset;

        let Some(limit) = scheduled else {
            entries.push(TopicOverrun {
                topic_id: topic.id.clone(),
                start_offset,
                end_offset,
                position: BoundaryPosition::Before,
                boundary_offset: None,
            });
            continue;
        };

        let position = classify(start_offset, end_offset, limit);
        let boundary_offset = match position {
            BoundaryPosition::Straddling if boundary.is_none() => {
                Some(straddle_offset(start_offset, end_offset, limit))
            }
            BoundaryPosition::StartsAtBoundary if boundary.is_none() => Some(0.0),
            _ => None,
        };
        if let Some(offset) = boundary_offset {
            boundary = Some(BoundaryMarker {
                topic_id: topic.id.clone(),
                offset,
            });
        }

        entries.push(TopicOverrun {
            topic_id: topic.id.clone(),
            start_offset,
            end_offset,
            position,
            boundary_offset,
        });
    }

    // Agenda that exactly fills the schedule: marker sits at the bottom of the last slot.
    if boundary.is_none() {
        if let (Some(limit), Some(last)) = (scheduled, entries.last_mut()) {
            if last.end_offset.as_f64() == limit.as_f64() {
                last.boundary_offset = Some(1.0);
                boundary = Some(BoundaryMarker {
                    topic_id: last.topic_id.clone(),
                    offset: 1.0,
                });
            }
        }
    }

    OverrunReport {
        scheduled,
        topics: entries,
        boundary,
    }
}

fn classify(start: Minutes, end: Minutes, scheduled: Minutes) -> BoundaryPosition {
    let (start, end, scheduled) = (start.as_f64(), end.as_f64(), scheduled.as_f64());
    if start == scheduled {
        BoundaryPosition::StartsAtBoundary
    } else if start > scheduled {
        BoundaryPosition::After
    } else if end > scheduled {
        BoundaryPosition::Straddling
    } else {
        BoundaryPosition::Before
    }
}

fn straddle_offset(start: Minutes, end: Minutes, scheduled: Minutes) -> f64 {
    let span = end.as_f64() - start.as_f64();
    if span <= 0.0 {
        return 0.0;
    }
    ((scheduled.as_f64() - start.as_f64()) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::{classify, straddle_offset, BoundaryPosition};
    use crate::model::minutes::Minutes;

    fn m(value: u32) -> Minutes {
        Minutes::from(value)
    }

    #[test]
    fn classify_covers_every_position() {
        assert_eq!(classify(m(0), m(10), m(25)), BoundaryPosition::Before);
        assert_eq!(classify(m(15), m(25), m(25)), BoundaryPosition::Before);
        assert_eq!(classify(m(20), m(40), m(25)), BoundaryPosition::Straddling);
        assert_eq!(classify(m(25), m(30), m(25)), BoundaryPosition::StartsAtBoundary);
        assert_eq!(classify(m(25), m(25), m(25)), BoundaryPosition::StartsAtBoundary);
        assert_eq!(classify(m(30), m(40), m(25)), BoundaryPosition::After);
    }

    #[test]
    fn straddle_offset_is_clamped_for_degenerate_slots() {
        assert_eq!(straddle_offset(m(20), m(40), m(25)), 0.25);
        assert_eq!(straddle_offset(m(20), m(20), m(20)), 0.0);
        assert_eq!(straddle_offset(m(20), m(40), m(50)), 1.0);
    }
}
