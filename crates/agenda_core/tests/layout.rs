use agenda_core::{calculate_topic_times, projected_end, total_minutes, Minutes, Topic};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

fn topics(durations: &[(&str, u32)]) -> Vec<Topic> {
    durations
        .iter()
        .map(|(id, minutes)| Topic::new(*id, format!("Topic {id}"), Minutes::from(*minutes)))
        .collect()
}

fn order(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn slots_are_contiguous_prefix_sums() {
    let topics = topics(&[("a", 10), ("b", 15), ("c", 5), ("d", 30)]);
    let layout = calculate_topic_times(anchor(), &topics, &order(&["a", "b", "c", "d"]));

    let mut elapsed = 0;
    for (slot, minutes) in layout.iter().zip([10, 15, 5, 30]) {
        assert_eq!(slot.start_time, anchor() + Duration::minutes(elapsed));
        assert_eq!(slot.end_time, slot.start_time + Duration::minutes(minutes));
        elapsed += minutes;
    }
    for pair in layout.windows(2) {
        assert_eq!(pair[0].end_time, pair[1].start_time);
    }
    assert_eq!(projected_end(anchor(), &layout), anchor() + Duration::minutes(60));
}

#[test]
fn layout_follows_ordering_sequence() {
    let topics = topics(&[("a", 10), ("b", 20)]);
    let layout = calculate_topic_times(anchor(), &topics, &order(&["b", "a"]));

    let ids: Vec<&str> = layout.iter().map(|slot| slot.id()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(layout[1].start_time, anchor() + Duration::minutes(20));
}

#[test]
fn zero_length_topics_occupy_zero_width_slots() {
    let topics = topics(&[("a", 10), ("z", 0), ("b", 5)]);
    let layout = calculate_topic_times(anchor(), &topics, &order(&["a", "z", "b"]));

    assert_eq!(layout[1].start_time, layout[1].end_time);
    assert_eq!(layout[1].start_time, anchor() + Duration::minutes(10));
    assert_eq!(layout[2].start_time, anchor() + Duration::minutes(10));
}

#[test]
fn stale_deleted_and_repeated_entries_do_not_advance_the_cursor() {
    let mut topics = topics(&[("a", 10), ("gone", 25), ("b", 5)]);
    topics[1].soft_delete();

    let layout = calculate_topic_times(
        anchor(),
        &topics,
        &order(&["a", "missing", "gone", "a", "b"]),
    );

    let ids: Vec<&str> = layout.iter().map(|slot| slot.id()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(layout[1].start_time, anchor() + Duration::minutes(10));
    assert_eq!(
        total_minutes(&topics, &order(&["a", "missing", "gone", "a", "b"])),
        Minutes::from(15)
    );
}

#[test]
fn textual_durations_are_summed_not_concatenated() {
    let topics: Vec<Topic> = serde_json::from_str(
        r#"[
            {"id": "1", "duration": "10"},
            {"id": "2", "duration": "10"},
            {"id": "3", "duration": 20}
        ]"#,
    )
    .unwrap();

    let layout = calculate_topic_times(anchor(), &topics, &order(&["1", "2", "3"]));
    assert_eq!(layout[2].start_time, anchor() + Duration::minutes(20));
    assert_eq!(layout[2].end_time, anchor() + Duration::minutes(40));
}

#[test]
fn negative_and_garbage_durations_clamp_to_zero() {
    let topics: Vec<Topic> = serde_json::from_str(
        r#"[
            {"id": "1", "duration": -15},
            {"id": "2", "duration": "n/a"},
            {"id": "3", "duration": 5}
        ]"#,
    )
    .unwrap();

    let layout = calculate_topic_times(anchor(), &topics, &order(&["1", "2", "3"]));
    assert_eq!(layout[0].end_time, anchor());
    assert_eq!(layout[1].end_time, anchor());
    assert_eq!(layout[2].end_time, anchor() + Duration::minutes(5));
}

#[test]
fn layout_is_idempotent_and_leaves_inputs_untouched() {
    let topics = topics(&[("a", 10), ("b", 20)]);
    let ordering = order(&["a", "b"]);
    let topics_before = topics.clone();
    let ordering_before = ordering.clone();

    let first = calculate_topic_times(anchor(), &topics, &ordering);
    let second = calculate_topic_times(anchor(), &topics, &ordering);

    assert_eq!(first, second);
    assert_eq!(topics, topics_before);
    assert_eq!(ordering, ordering_before);
}

#[test]
fn empty_ordering_yields_empty_layout() {
    let topics = topics(&[("a", 10)]);
    let layout = calculate_topic_times(anchor(), &topics, &[]);

    assert!(layout.is_empty());
    assert_eq!(projected_end(anchor(), &layout), anchor());
}

#[test]
fn calculated_topic_serializes_pass_through_fields() {
    let topics = topics(&[("a", 10)]);
    let layout = calculate_topic_times(anchor(), &topics, &order(&["a"]));

    let json = serde_json::to_value(&layout[0]).unwrap();
    assert_eq!(json["id"], "a");
    assert_eq!(json["title"], "Topic a");
    assert_eq!(json["startTime"], "2026-03-02T09:00:00Z");
    assert_eq!(json["endTime"], "2026-03-02T09:10:00Z");
}
