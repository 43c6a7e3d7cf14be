//! Agenda timing engine.
//! This crate is the single source of truth for meeting timing invariants.

pub mod engine;
pub mod logging;
pub mod model;
pub mod service;

pub use engine::layout::{
    advance, calculate_topic_times, projected_end, total_minutes, CalculatedTopic,
};
pub use engine::ordering::resolve_ordered_topics;
pub use engine::overrun::{
    analyze_overrun, analyze_overrun_with, BoundaryMarker, BoundaryPosition, MissingSchedule,
    OverrunReport, TopicOverrun,
};
pub use engine::timer::{compute_timer_state, meeting_timer_state, TimerState};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::instant::{parse_instant, InstantParseError};
pub use model::meeting::{Meeting, MeetingStatus};
pub use model::minutes::{Minutes, MinutesParseError};
pub use model::topic::{Topic, TopicId, TopicKind};
pub use service::agenda_service::{AgendaService, AgendaView, EngineOptions};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
