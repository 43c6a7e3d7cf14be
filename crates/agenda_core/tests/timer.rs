use agenda_core::{
    compute_timer_state, meeting_timer_state, Meeting, MeetingStatus, Minutes, TimerState, Topic,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn started() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

fn at_minutes(minutes: i64) -> DateTime<Utc> {
    started() + Duration::minutes(minutes)
}

fn two_topics() -> Vec<Topic> {
    vec![
        Topic::new("a", "First", Minutes::from(10)),
        Topic::new("b", "Second", Minutes::from(10)),
    ]
}

fn order(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn first_topic_counts_down_from_meeting_start() {
    let topics = two_topics();
    let state = compute_timer_state(Some(started()), &topics, &order(&["a", "b"]), at_minutes(5));

    assert_eq!(
        state,
        TimerState {
            active_topic_id: Some("a".to_string()),
            seconds_remaining: Some(300),
            is_overtime: false,
        }
    );
}

#[test]
fn unfinished_topic_goes_into_overtime() {
    let topics = two_topics();
    let state = compute_timer_state(Some(started()), &topics, &order(&["a", "b"]), at_minutes(12));

    assert_eq!(state.active_topic_id.as_deref(), Some("a"));
    assert_eq!(state.seconds_remaining, Some(-120));
    assert!(state.is_overtime);
}

#[test]
fn next_topic_counts_from_predecessor_completion() {
    let mut topics = two_topics();
    topics[0].mark_completed(at_minutes(9));

    let state = compute_timer_state(Some(started()), &topics, &order(&["a", "b"]), at_minutes(11));

    assert_eq!(state.active_topic_id.as_deref(), Some("b"));
    assert_eq!(state.seconds_remaining, Some(480));
    assert!(!state.is_overtime);
}

#[test]
fn missing_predecessor_completion_falls_back_to_meeting_start() {
    let mut topics = two_topics();
    topics[0].is_completed = true;

    let state = compute_timer_state(Some(started()), &topics, &order(&["a", "b"]), at_minutes(11));

    assert_eq!(state.active_topic_id.as_deref(), Some("b"));
    assert_eq!(state.seconds_remaining, Some(600 - 660));
    assert!(state.is_overtime);
}

#[test]
fn exactly_on_time_is_not_overtime() {
    let topics = two_topics();
    let state = compute_timer_state(Some(started()), &topics, &order(&["a", "b"]), at_minutes(10));

    assert_eq!(state.seconds_remaining, Some(0));
    assert!(!state.is_overtime);
}

#[test]
fn partial_seconds_are_truncated() {
    let topics = two_topics();
    let now = started() + Duration::milliseconds(1_999);
    let state = compute_timer_state(Some(started()), &topics, &order(&["a", "b"]), now);

    assert_eq!(state.seconds_remaining, Some(599));
}

#[test]
fn all_completed_is_idle() {
    let mut topics = two_topics();
    topics[0].mark_completed(at_minutes(9));
    topics[1].mark_completed(at_minutes(18));

    let state = compute_timer_state(Some(started()), &topics, &order(&["a", "b"]), at_minutes(20));

    assert_eq!(state, TimerState::idle());
    assert!(state.is_idle());
    assert_eq!(state.seconds_remaining, None);
}

#[test]
fn missing_start_or_agenda_is_idle() {
    let topics = two_topics();
    assert!(compute_timer_state(None, &topics, &order(&["a", "b"]), at_minutes(1)).is_idle());
    let state = compute_timer_state(Some(started()), &[], &order(&["a", "b"]), at_minutes(1));
    assert!(state.is_idle());
    assert!(compute_timer_state(Some(started()), &topics, &[], at_minutes(1)).is_idle());
}

#[test]
fn deleted_topics_are_skipped_by_the_timer() {
    let mut topics = vec![
        Topic::new("gone", "Removed", Minutes::from(30)),
        Topic::new("a", "First", Minutes::from(10)),
    ];
    topics[0].soft_delete();

    let state =
        compute_timer_state(Some(started()), &topics, &order(&["gone", "a"]), at_minutes(4));

    assert_eq!(state.active_topic_id.as_deref(), Some("a"));
    assert_eq!(state.seconds_remaining, Some(360));
}

#[test]
fn textual_duration_is_normalized_for_countdown() {
    let topics: Vec<Topic> =
        serde_json::from_str(r#"[{"id": "a", "duration": "10"}]"#).unwrap();
    let state = compute_timer_state(Some(started()), &topics, &order(&["a"]), at_minutes(1));

    assert_eq!(state.seconds_remaining, Some(540));
}

#[test]
fn meeting_timer_is_idle_unless_running() {
    let topics = two_topics();
    let mut meeting = Meeting::new("m1", started());
    meeting.topic_order = order(&["a", "b"]);
    meeting.started_at = Some(started());

    assert!(meeting_timer_state(&meeting, &topics, at_minutes(5)).is_idle());
    meeting.status = MeetingStatus::Ended;
    assert!(meeting_timer_state(&meeting, &topics, at_minutes(5)).is_idle());

    meeting.status = MeetingStatus::Running;
    let state = meeting_timer_state(&meeting, &topics, at_minutes(5));
    assert_eq!(state.seconds_remaining, Some(300));

    meeting.started_at = None;
    assert!(meeting_timer_state(&meeting, &topics, at_minutes(5)).is_idle());
}

#[test]
fn repeated_samples_are_idempotent() {
    let topics = two_topics();
    let ordering = order(&["a", "b"]);
    let first = compute_timer_state(Some(started()), &topics, &ordering, at_minutes(3));
    let second = compute_timer_state(Some(started()), &topics, &ordering, at_minutes(3));

    assert_eq!(first, second);
    assert_eq!(topics, two_topics());
}
