//! Ordered, filtered topic resolution shared by every engine component.
//!
//! # Invariants
//! - Ordering entries with no matching topic are skipped.
//! - Soft-deleted topics are skipped.
//! - Only the first occurrence of a repeated ordering entry is kept.
//! - When the topic set repeats an id, the last record for that id wins.

use crate::model::topic::{Topic, TopicId};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Resolves `ordering` against `topics`, returning active topics in order.
pub fn resolve_ordered_topics<'a>(topics: &'a [Topic], ordering: &[TopicId]) -> Vec<&'a Topic> {
    let by_id: HashMap<&str, &Topic> = topics
        .iter()
        .map(|topic| (topic.id.as_str(), topic))
        .collect();
    let mut seen = HashSet::with_capacity(ordering.len());
    let mut resolved = Vec::with_capacity(ordering.len());

    for id in ordering {
        if !seen.insert(id.as_str()) {
            debug!("event=ordering_duplicate module=engine status=skipped topic_id={id}");
            continue;
        }
        match by_id.get(id.as_str()) {
            Some(topic) if topic.is_active() => resolved.push(*topic),
            Some(_) => {}
            None => debug!("event=ordering_stale module=engine status=skipped topic_id={id}"),
        }
    }

    resolved
}
