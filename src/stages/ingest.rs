use tracing::info;

use crate::error::EngineError;
use crate::models::AnalysisBundle;
use crate::stages::{
    aggregate_sentiment, assemble_topics, build_argument_graph, normalize_segments,
};
use crate::store::Store;

/// Counts from one completed ingestion.
#[derive(Debug, Clone)]
pub struct IngestSummary {
    pub recording_id: String,
    pub segments: usize,
    pub topics: usize,
    pub threads: usize,
    pub arguments: usize,
    pub supporting_points: usize,
    pub scored_segments: usize,
}

/// Run the full engine over one analysis bundle and persist the result.
///
/// One recording is one unit of work: any structural error aborts before
/// the store is touched, and the store writes everything in a single
/// transaction, so readers never observe a partial recording.
pub fn ingest_bundle(
    store: &mut Store,
    bundle: &AnalysisBundle,
    replace: bool,
) -> Result<IngestSummary, EngineError> {
    let recording_id = bundle.recording.recording_id.clone();

    let segments = normalize_segments(&bundle.recording, &bundle.segments)?;
    info!(recording_id = %recording_id, segments = segments.len(), "segments normalized");

    // Topic assembly and sentiment aggregation both read only the
    // normalized segments; the argument graph needs topic bounds.
    let topics = assemble_topics(&segments, &bundle.topics);
    let sentiment = aggregate_sentiment(&recording_id, &segments, &bundle.sentiments)?;
    let forest = build_argument_graph(&recording_id, &topics, &bundle.arguments)?;

    info!(
        recording_id = %recording_id,
        topics = topics.len(),
        threads = forest.threads.len(),
        arguments = forest.arguments.len(),
        "discussion structure built"
    );

    let summary = IngestSummary {
        recording_id: recording_id.clone(),
        segments: segments.len(),
        topics: topics.len(),
        threads: forest.threads.len(),
        arguments: forest.arguments.len(),
        supporting_points: forest.points.len(),
        scored_segments: sentiment.timeline.len(),
    };

    store.persist_recording(
        &bundle.recording,
        &segments,
        &topics,
        &forest,
        &sentiment,
        replace,
    )?;
    info!(recording_id = %recording_id, "recording persisted");

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawSegment, Recording, SentimentAnnotation};

    fn bundle(recording_id: &str) -> AnalysisBundle {
        AnalysisBundle {
            recording: Recording {
                recording_id: recording_id.to_string(),
                source_path: "/tmp/rec.wav".into(),
                duration: Some(60.0),
                format: "wav".to_string(),
                recorded_at: chrono::Utc::now(),
            },
            segments: vec![
                RawSegment {
                    speaker_id: "A".to_string(),
                    start_time: 0.0,
                    end_time: 5.0,
                    text: "x".to_string(),
                    confidence: Some(0.8),
                },
                RawSegment {
                    speaker_id: "B".to_string(),
                    start_time: 4.0,
                    end_time: 9.0,
                    text: "y".to_string(),
                    confidence: None,
                },
            ],
            topics: vec![],
            arguments: vec![],
            sentiments: vec![
                SentimentAnnotation {
                    segment_index: 0,
                    score: 0.8,
                },
                SentimentAnnotation {
                    segment_index: 1,
                    score: -0.6,
                },
            ],
        }
    }

    #[test]
    fn test_ingest_then_conflict_then_replace() {
        let mut store = Store::open_in_memory().unwrap();

        let summary = ingest_bundle(&mut store, &bundle("rec-1"), false).unwrap();
        assert_eq!(summary.segments, 2);
        assert_eq!(summary.scored_segments, 2);

        let err = ingest_bundle(&mut store, &bundle("rec-1"), false).unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));

        // Replace succeeds and leaves exactly one copy behind.
        ingest_bundle(&mut store, &bundle("rec-1"), true).unwrap();
        let rows = store.segments("rec-1", None, None).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_failed_bundle_persists_nothing() {
        let mut store = Store::open_in_memory().unwrap();
        let mut bad = bundle("rec-2");
        bad.segments[1].end_time = bad.segments[1].start_time; // inverted timing

        assert!(ingest_bundle(&mut store, &bad, false).is_err());
        let err = store.recording("rec-2").unwrap_err();
        assert!(matches!(err, EngineError::RecordingNotFound { .. }));
    }
}
