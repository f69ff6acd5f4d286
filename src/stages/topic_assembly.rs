use tracing::warn;

use crate::models::{Segment, Topic, TopicAnnotation};

/// Convert topic annotations into Topic records.
///
/// Missing bounds are resolved from the segments the annotation's name
/// references (case-insensitive containment in the segment text): the
/// earliest matching start and latest matching end. When nothing matches,
/// the bound stays null rather than rejecting the topic: topics are
/// informational, not mandatory for rendering.
///
/// Output is ordered by start time ascending; topics without a start sort
/// last and keep their input order among themselves.
pub fn assemble_topics(segments: &[Segment], annotations: &[TopicAnnotation]) -> Vec<Topic> {
    let mut topics: Vec<Topic> = annotations
        .iter()
        .map(|annotation| resolve_annotation(segments, annotation))
        .collect();

    // Stable sort: bounded topics by start, unbounded after them in
    // annotation order.
    topics.sort_by(|a, b| match (a.start, b.start) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    for (position, topic) in topics.iter_mut().enumerate() {
        topic.topic_id = position as i64 + 1;
    }
    topics
}

fn resolve_annotation(segments: &[Segment], annotation: &TopicAnnotation) -> Topic {
    let mut start = annotation.start_time;
    let mut end = annotation.end_time;

    if start.is_none() || end.is_none() {
        let needle = annotation.topic_name.to_lowercase();
        let matching: Vec<&Segment> = segments
            .iter()
            .filter(|segment| segment.text.to_lowercase().contains(&needle))
            .collect();

        if matching.is_empty() {
            warn!(
                topic = %annotation.topic_name,
                "no segment references this topic; storing with null bounds"
            );
        } else {
            if start.is_none() {
                start = matching
                    .iter()
                    .map(|s| s.start)
                    .min_by(f64::total_cmp);
            }
            if end.is_none() {
                end = matching.iter().map(|s| s.end).max_by(f64::total_cmp);
            }
        }
    }

    Topic {
        topic_id: 0, // assigned after ordering
        name: annotation.topic_name.clone(),
        start,
        end,
        importance: annotation.importance_score.unwrap_or(0.0),
    }
}
