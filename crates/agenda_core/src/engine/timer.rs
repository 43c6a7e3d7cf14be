//! Live countdown for a running meeting.
//!
//! # Responsibility
//! - Determine the active topic of a running meeting.
//! - Compute its signed remaining seconds for one clock sample.
//!
//! # Invariants
//! - The clock sample is always supplied by the caller; the system clock is
//!   never read here.
//! - The active topic is the first incomplete topic in resolved order.
//! - Completion transitions happen outside; this module only reads them.

use crate::engine::ordering::resolve_ordered_topics;
use crate::model::meeting::Meeting;
use crate::model::topic::{Topic, TopicId};
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;

/// Countdown state for one clock sample.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub active_topic_id: Option<TopicId>,
    /// Negative once the active topic has run past its allotted time.
    pub seconds_remaining: Option<i64>,
    pub is_overtime: bool,
}

impl TimerState {
    /// No active topic and no countdown.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.active_topic_id.is_none()
    }
}

/// Timer state for `meeting`, idle unless the meeting is running.
pub fn meeting_timer_state(meeting: &Meeting, topics: &[Topic], now: DateTime<Utc>) -> TimerState {
    if !meeting.is_running() {
        return TimerState::idle();
    }
    compute_timer_state(meeting.started_at, topics, &meeting.topic_order, now)
}

/// Computes the countdown of the active topic at `now`.
///
/// Returns the idle state when `started_at` is missing, the agenda resolves to
/// nothing, or every topic is completed.
pub fn compute_timer_state(
    started_at: Option<DateTime<Utc>>,
    topics: &[Topic],
    ordering: &[TopicId],
    now: DateTime<Utc>,
) -> TimerState {
    let Some(started_at) = started_at else {
        debug!("event=timer_idle module=engine reason=missing_started_at");
        return TimerState::idle();
    };

    let ordered = resolve_ordered_topics(topics, ordering);
    let Some(active_index) = ordered.iter().position(|topic| !topic.is_completed) else {
        return TimerState::idle();
    };
    let active = ordered[active_index];

    let slot_start = match active_index.checked_sub(1).map(|index| ordered[index]) {
        None => started_at,
        Some(previous) => previous.completed_at.unwrap_or_else(|| {
            debug!(
                "event=timer_fallback module=engine reason=missing_completed_at topic_id={}",
                previous.id
            );
            started_at
        }),
    };

    let elapsed = now.signed_duration_since(slot_start).num_seconds();
    let remaining = active.duration.as_seconds().saturating_sub(elapsed);

    TimerState {
        active_topic_id: Some(active.id.clone()),
        seconds_remaining: Some(remaining),
        is_overtime: remaining < 0,
    }
}
