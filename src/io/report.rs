use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{
    Argument, DiscussionThread, Recording, SentimentSample, SentimentSummary, SupportingPoint,
    Topic,
};

/// Topic timeline for the report renderer: parallel arrays, index-aligned,
/// one entry per topic with resolved bounds. Field names are part of the
/// renderer contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicTimeline {
    pub labels: Vec<String>,
    pub start: Vec<f64>,
    pub end: Vec<f64>,
}

impl TopicTimeline {
    pub fn from_topics(topics: &[Topic]) -> Self {
        let mut timeline = TopicTimeline::default();
        for topic in topics {
            let (Some(start), Some(end)) = (topic.start, topic.end) else {
                continue;
            };
            timeline.labels.push(topic.name.clone());
            timeline.start.push(start);
            timeline.end.push(end);
        }
        timeline
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Sentiment payload for the report renderer. Each sub-field is
/// independently absent when there is no data; the renderer treats absence
/// differently from a present-but-empty structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_sentiment: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<SentimentSample>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_sentiments: Option<BTreeMap<String, f64>>,
}

impl SentimentPayload {
    pub fn from_summary(summary: &SentimentSummary) -> Self {
        Self {
            overall_sentiment: summary.overall,
            timeline: (!summary.timeline.is_empty()).then(|| summary.timeline.clone()),
            speaker_sentiments: (!summary.speaker_sentiments.is_empty())
                .then(|| summary.speaker_sentiments.clone()),
        }
    }
}

/// Speaking time per speaker, parallel arrays for the renderer's speaker
/// statistics chart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakerStats {
    pub speakers: Vec<String>,
    pub durations: Vec<f64>,
}

/// One argument with its supporting points and children, reconstructed
/// from the stored parent links.
#[derive(Debug, Clone, Serialize)]
pub struct ArgumentNode {
    pub argument: Argument,
    pub points: Vec<SupportingPoint>,
    pub children: Vec<ArgumentNode>,
}

/// One thread's argument tree.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadView {
    pub thread: DiscussionThread,
    pub topic_name: String,
    pub roots: Vec<ArgumentNode>,
}

/// Complete read view of one recording's discussion structure.
#[derive(Debug, Clone, Serialize)]
pub struct DiscussionSummary {
    pub recording: Recording,
    pub topics: Vec<Topic>,
    pub threads: Vec<ThreadView>,
}

/// Everything the report renderer consumes for one recording.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPayload {
    pub timeline: TopicTimeline,
    pub sentiment: SentimentPayload,
    pub speakers: SpeakerStats,
}

impl ReportPayload {
    /// Write the payload to a pretty-printed JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write report payload")?;
        Ok(())
    }

    /// Write the payload to any sink as pretty-printed JSON
    pub fn write_to(&self, mut sink: impl Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut sink, self).context("Failed to write report payload")?;
        sink.write_all(b"\n").context("Failed to write report payload")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_skips_unbounded_topics() {
        let topics = vec![
            Topic {
                topic_id: 1,
                name: "budget".to_string(),
                start: Some(0.0),
                end: Some(9.0),
                importance: 0.8,
            },
            Topic {
                topic_id: 2,
                name: "loose end".to_string(),
                start: None,
                end: None,
                importance: 0.0,
            },
        ];
        let timeline = TopicTimeline::from_topics(&topics);
        assert_eq!(timeline.labels, vec!["budget"]);
        assert_eq!(timeline.start, vec![0.0]);
        assert_eq!(timeline.end, vec![9.0]);
    }

    #[test]
    fn test_empty_summary_serializes_with_no_sub_fields() {
        let payload = SentimentPayload::from_summary(&SentimentSummary::default());
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_present_sub_fields_keep_renderer_names() {
        let summary = SentimentSummary {
            overall: Some(0.1),
            timeline: vec![SentimentSample {
                speaker_id: "A".to_string(),
                timestamp: 0.0,
                sentiment_score: 0.1,
                text: "x".to_string(),
            }],
            speaker_sentiments: [("A".to_string(), 0.1)].into_iter().collect(),
        };
        let json = serde_json::to_value(SentimentPayload::from_summary(&summary)).unwrap();
        assert_eq!(json["overall_sentiment"], 0.1);
        assert_eq!(json["timeline"][0]["sentiment_score"], 0.1);
        assert_eq!(json["timeline"][0]["speaker_id"], "A");
        assert_eq!(json["speaker_sentiments"]["A"], 0.1);
    }
}
