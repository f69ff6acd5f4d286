use serde::{Deserialize, Serialize};

/// A named, optionally time-bounded subject of discussion within a
/// recording. Topic spans are informational: the analyzer does not
/// guarantee they partition the recording or avoid overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Identifier scoped to the recording, assigned by the assembler
    pub topic_id: i64,
    pub name: String,
    /// Start bound in seconds; `None` when no span could be resolved
    pub start: Option<f64>,
    /// End bound in seconds; `None` when no span could be resolved
    pub end: Option<f64>,
    /// Importance score from the analyzer, 0.0 when it supplied none
    pub importance: f64,
}

impl Topic {
    /// Whether both time bounds are known
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Whether `timestamp` falls inside this topic's bounds.
    /// Unbounded topics contain nothing.
    pub fn contains(&self, timestamp: f64) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= timestamp && timestamp <= end,
            _ => false,
        }
    }
}

/// Grouping unit for one connected argument tree, scoped to one topic
/// within one recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionThread {
    pub thread_id: i64,
    pub topic_id: i64,
    /// Root argument the thread opens with; backfilled with the earliest
    /// root when the analyzer did not name one
    pub initial_argument_id: Option<i64>,
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containment_needs_both_bounds() {
        let bounded = Topic {
            topic_id: 1,
            name: "budget".to_string(),
            start: Some(10.0),
            end: Some(20.0),
            importance: 0.0,
        };
        assert!(bounded.contains(10.0));
        assert!(bounded.contains(20.0));
        assert!(!bounded.contains(20.1));

        let unbounded = Topic {
            start: None,
            ..bounded.clone()
        };
        assert!(!unbounded.contains(15.0));
    }
}
