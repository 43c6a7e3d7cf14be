//! Agenda view use-case service.
//!
//! # Responsibility
//! - Run layout, boundary analysis and countdown for one meeting snapshot.
//! - Apply engine options consistently across the three computations.
//!
//! # Invariants
//! - The clock sample is an explicit argument; the service keeps no state
//!   besides its options.
//! - A meeting without a usable anchor still gets the relative overrun
//!   analysis; only instant-valued fields are left empty.

use crate::engine::layout::{
    advance, calculate_topic_times, projected_end, total_minutes, CalculatedTopic,
};
use crate::engine::overrun::{analyze_overrun_with, MissingSchedule, OverrunReport};
use crate::engine::timer::{meeting_timer_state, TimerState};
use crate::model::meeting::{Meeting, MeetingStatus};
use crate::model::minutes::Minutes;
use crate::model::topic::Topic;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// Engine behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EngineOptions {
    pub missing_schedule: MissingSchedule,
}

/// Everything presentation needs for one render cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaView<'a> {
    pub status: MeetingStatus,
    pub anchor: Option<DateTime<Utc>>,
    pub layout: Vec<CalculatedTopic<'a>>,
    pub overrun: OverrunReport,
    pub timer: TimerState,
    pub total_minutes: Minutes,
    pub projected_end: Option<DateTime<Utc>>,
    /// Label instant for the boundary marker.
    pub scheduled_end: Option<DateTime<Utc>>,
}

/// Stateless facade over the timing engine.
#[derive(Debug, Clone, Default)]
pub struct AgendaService {
    options: EngineOptions,
}

impl AgendaService {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Slots relative to the meeting's layout anchor; empty without one.
    pub fn layout<'a>(&self, meeting: &Meeting, topics: &'a [Topic]) -> Vec<CalculatedTopic<'a>> {
        match meeting.layout_anchor() {
            Some(anchor) => calculate_topic_times(anchor, topics, &meeting.topic_order),
            None => Vec::new(),
        }
    }

    pub fn overrun(&self, meeting: &Meeting, topics: &[Topic]) -> OverrunReport {
        analyze_overrun_with(
            topics,
            &meeting.topic_order,
            meeting.scheduled_duration,
            self.options.missing_schedule,
        )
    }

    pub fn timer(&self, meeting: &Meeting, topics: &[Topic], now: DateTime<Utc>) -> TimerState {
        meeting_timer_state(meeting, topics, now)
    }

    /// Builds the complete view for `meeting` at clock sample `now`.
    pub fn view<'a>(
        &self,
        meeting: &Meeting,
        topics: &'a [Topic],
        now: DateTime<Utc>,
    ) -> AgendaView<'a> {
        let anchor = meeting.layout_anchor();
        let layout = self.layout(meeting, topics);
        let overrun = self.overrun(meeting, topics);
        let timer = self.timer(meeting, topics, now);
        let total_minutes = total_minutes(topics, &meeting.topic_order);

        let projected_end = anchor.map(|anchor| projected_end(anchor, &layout));
        let scheduled_end = anchor
            .zip(overrun.scheduled)
            .map(|(anchor, scheduled)| advance(anchor, scheduled));

        if anchor.is_none() {
            debug!("event=agenda_view module=service status=degraded reason=missing_anchor");
        }
        debug!(
            "event=agenda_view module=service status=ok topics={} overrun={} timer_active={}",
            overrun.topics.len(),
            overrun.overrun_count(),
            !timer.is_idle()
        );

        AgendaView {
            status: meeting.status,
            anchor,
            layout,
            overrun,
            timer,
            total_minutes,
            projected_end,
            scheduled_end,
        }
    }
}
