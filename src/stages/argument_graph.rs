use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::error::EngineError;
use crate::models::{Argument, ArgumentAnnotation, DiscussionThread, SupportingPoint, Topic};

/// Forest of argument trees grouped by thread, arena-indexed: parent/child
/// relations are id pairs, never embedded ownership.
#[derive(Debug, Clone, Default)]
pub struct ArgumentForest {
    pub threads: Vec<DiscussionThread>,
    pub arguments: Vec<Argument>,
    pub points: Vec<SupportingPoint>,
}

impl ArgumentForest {
    /// Index from parent id to child ids, children ordered by timestamp
    /// (argument id on ties).
    pub fn children_index(&self) -> HashMap<i64, Vec<i64>> {
        let by_id: HashMap<i64, &Argument> =
            self.arguments.iter().map(|a| (a.argument_id, a)).collect();
        let mut index: HashMap<i64, Vec<i64>> = HashMap::new();
        for argument in &self.arguments {
            if let Some(parent_id) = argument.parent_id {
                index.entry(parent_id).or_default().push(argument.argument_id);
            }
        }
        for children in index.values_mut() {
            children.sort_by(|a, b| {
                let (ta, tb) = (by_id[a].timestamp, by_id[b].timestamp);
                ta.total_cmp(&tb).then(a.cmp(b))
            });
        }
        index
    }

    pub fn roots(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter().filter(|a| a.is_root())
    }
}

/// Build the argument forest for one recording.
///
/// 1. First pass creates an Argument record per annotation and assigns
///    identity; the annotation's external key maps to the internal id.
/// 2. Second pass wires parent links. An unknown parent key is a dangling
///    reference: the argument and its whole subtree are dropped with a
///    warning and the rest of the recording continues. A parent
///    timestamped strictly after its child, or any parent cycle, aborts
///    the recording.
/// 3. Each argument joins the thread of the topic whose bounds contain its
///    timestamp; among qualifying topics the latest start wins. Threads
///    exist only for topics that received at least one argument.
/// 4. Threads without an initial argument are backfilled with their
///    earliest root.
/// 5. Supporting points attach to resolved arguments only; a point whose
///    target is unknown or dropped is itself dropped with a warning.
pub fn build_argument_graph(
    recording_id: &str,
    topics: &[Topic],
    annotations: &[ArgumentAnnotation],
) -> Result<ArgumentForest, EngineError> {
    // Pass 1: identity.
    let mut key_to_id: HashMap<&str, i64> = HashMap::with_capacity(annotations.len());
    for (position, annotation) in annotations.iter().enumerate() {
        validate_annotation(recording_id, annotation)?;
        let id = position as i64 + 1;
        if key_to_id.insert(annotation.id.as_str(), id).is_some() {
            return Err(EngineError::Validation {
                recording_id: recording_id.to_string(),
                entity: format!("argument {}", annotation.id),
                reason: "duplicate external key".to_string(),
            });
        }
    }

    // Pass 2: parent wiring. Dangling parent keys seed the drop set.
    let mut parent_of: HashMap<i64, i64> = HashMap::new();
    let mut dropped: HashSet<i64> = HashSet::new();
    for annotation in annotations {
        let id = key_to_id[annotation.id.as_str()];
        let Some(parent_key) = annotation.parent_ref.as_deref() else {
            continue;
        };
        match key_to_id.get(parent_key) {
            None => {
                let err = EngineError::DanglingReference {
                    recording_id: recording_id.to_string(),
                    entity: format!("argument {}", annotation.id),
                    reference: parent_key.to_string(),
                };
                warn!("{err}; dropping its subtree");
                dropped.insert(id);
            }
            Some(&parent_id) => {
                let parent = &annotations[(parent_id - 1) as usize];
                if parent.timestamp > annotation.timestamp {
                    return Err(EngineError::TemporalOrder {
                        recording_id: recording_id.to_string(),
                        child: annotation.id.clone(),
                        parent: parent.id.clone(),
                    });
                }
                parent_of.insert(id, parent_id);
            }
        }
    }

    // Cycle check: every parent chain must reach a root within as many
    // steps as there are arguments.
    for annotation in annotations {
        let start = key_to_id[annotation.id.as_str()];
        let mut current = start;
        let mut steps = 0usize;
        while let Some(&parent) = parent_of.get(&current) {
            steps += 1;
            if steps > annotations.len() {
                return Err(EngineError::Cycle {
                    recording_id: recording_id.to_string(),
                    argument: annotation.id.clone(),
                });
            }
            current = parent;
        }
    }

    // Drop propagation: a child of a dropped argument is dropped too.
    // Chains are acyclic, so one pass per tree depth converges.
    loop {
        let before = dropped.len();
        for (&child, &parent) in &parent_of {
            if dropped.contains(&parent) {
                dropped.insert(child);
            }
        }
        if dropped.len() == before {
            break;
        }
    }

    // Thread assignment over the surviving arguments.
    let mut arguments: Vec<Argument> = Vec::with_capacity(annotations.len() - dropped.len());
    let mut used_topics: HashSet<i64> = HashSet::new();
    for annotation in annotations {
        let id = key_to_id[annotation.id.as_str()];
        if dropped.contains(&id) {
            continue;
        }
        let topic_id = containing_topic(topics, annotation.timestamp);
        if let Some(topic_id) = topic_id {
            used_topics.insert(topic_id);
        }
        arguments.push(Argument {
            argument_id: id,
            thread_id: topic_id, // rewritten to the thread id below
            speaker_id: annotation.speaker_id.clone(),
            timestamp: annotation.timestamp,
            main_claim: annotation.main_claim.clone(),
            kind: annotation.argument_type,
            parent_id: parent_of.get(&id).copied(),
            confidence: annotation.confidence_score.unwrap_or(1.0),
        });
    }

    // One thread per topic that received arguments, in topic order.
    let mut topic_ids: Vec<i64> = used_topics.into_iter().collect();
    topic_ids.sort();
    let thread_of_topic: HashMap<i64, i64> = topic_ids
        .iter()
        .enumerate()
        .map(|(position, &topic_id)| (topic_id, position as i64 + 1))
        .collect();
    for argument in &mut arguments {
        argument.thread_id = argument
            .thread_id
            .and_then(|topic_id| thread_of_topic.get(&topic_id).copied());
    }

    // Backfill each thread's initial argument with its earliest root.
    let mut threads: Vec<DiscussionThread> = topic_ids
        .iter()
        .map(|&topic_id| DiscussionThread {
            thread_id: thread_of_topic[&topic_id],
            topic_id,
            initial_argument_id: None,
            summary: None,
        })
        .collect();
    for thread in &mut threads {
        thread.initial_argument_id = arguments
            .iter()
            .filter(|a| a.thread_id == Some(thread.thread_id) && a.is_root())
            .min_by(|a, b| {
                a.timestamp
                    .total_cmp(&b.timestamp)
                    .then(a.argument_id.cmp(&b.argument_id))
            })
            .map(|a| a.argument_id);
    }

    // Supporting points, attached to surviving arguments only.
    let live: HashSet<i64> = arguments.iter().map(|a| a.argument_id).collect();
    let mut points = Vec::new();
    for annotation in annotations {
        for point in &annotation.supporting_points {
            let target_key = point.argument_ref.as_deref().unwrap_or(&annotation.id);
            let target = key_to_id
                .get(target_key)
                .copied()
                .filter(|id| live.contains(id));
            let Some(argument_id) = target else {
                let err = EngineError::DanglingReference {
                    recording_id: recording_id.to_string(),
                    entity: "supporting point".to_string(),
                    reference: target_key.to_string(),
                };
                warn!("{err}; dropping the point");
                continue;
            };
            if let Some(confidence) = point.confidence_score {
                if !(0.0..=1.0).contains(&confidence) {
                    return Err(EngineError::Validation {
                        recording_id: recording_id.to_string(),
                        entity: format!("supporting point on argument {target_key}"),
                        reason: format!("confidence {confidence} outside [0, 1]"),
                    });
                }
            }
            points.push(SupportingPoint {
                point_id: points.len() as i64 + 1,
                argument_id,
                text: point.text.clone(),
                evidence: point.evidence.clone(),
                confidence: point.confidence_score.unwrap_or(1.0),
            });
        }
    }

    Ok(ArgumentForest {
        threads,
        arguments,
        points,
    })
}

/// The topic whose bounds contain `timestamp`, preferring the latest start
/// when several qualify. Topics arrive sorted by start, so the last match
/// wins.
fn containing_topic(topics: &[Topic], timestamp: f64) -> Option<i64> {
    topics
        .iter()
        .filter(|topic| topic.contains(timestamp))
        .next_back()
        .map(|topic| topic.topic_id)
}

fn validate_annotation(
    recording_id: &str,
    annotation: &ArgumentAnnotation,
) -> Result<(), EngineError> {
    if let Some(confidence) = annotation.confidence_score {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(EngineError::Validation {
                recording_id: recording_id.to_string(),
                entity: format!("argument {}", annotation.id),
                reason: format!("confidence {confidence} outside [0, 1]"),
            });
        }
    }
    if !annotation.timestamp.is_finite() {
        return Err(EngineError::Validation {
            recording_id: recording_id.to_string(),
            entity: format!("argument {}", annotation.id),
            reason: "non-finite timestamp".to_string(),
        });
    }
    Ok(())
}
