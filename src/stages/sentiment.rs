use std::collections::BTreeMap;
use std::collections::HashMap;

use tracing::warn;

use crate::error::EngineError;
use crate::models::{Segment, SentimentAnnotation, SentimentSample, SentimentSummary};

/// Compute the overall score, the time-ordered sentiment timeline, and the
/// per-speaker aggregates for one recording.
///
/// A segment without a score is excluded from every aggregate; it is never
/// treated as 0. With zero scored segments the summary carries no overall
/// score and empty collections, which the read layer reports as "no data".
/// The timeline is never resampled or smoothed here; smoothing belongs to
/// the rendering layer.
pub fn aggregate_sentiment(
    recording_id: &str,
    segments: &[Segment],
    annotations: &[SentimentAnnotation],
) -> Result<SentimentSummary, EngineError> {
    let mut scores: HashMap<usize, f64> = HashMap::with_capacity(annotations.len());
    for annotation in annotations {
        if !annotation.score.is_finite() || !(-1.0..=1.0).contains(&annotation.score) {
            return Err(EngineError::Validation {
                recording_id: recording_id.to_string(),
                entity: format!("sentiment for segment {}", annotation.segment_index),
                reason: format!("score {} outside [-1, 1]", annotation.score),
            });
        }
        if annotation.segment_index >= segments.len() {
            warn!(
                recording_id = %recording_id,
                segment_index = annotation.segment_index,
                "sentiment annotation for unknown segment; skipping"
            );
            continue;
        }
        scores.insert(annotation.segment_index, annotation.score);
    }

    // Segments arrive already sorted by start (input order on ties), so the
    // timeline inherits the required ordering.
    let mut timeline = Vec::new();
    let mut speaker_totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for segment in segments {
        let Some(&score) = scores.get(&segment.source_index) else {
            continue;
        };
        timeline.push(SentimentSample {
            speaker_id: segment.speaker_id.clone(),
            timestamp: segment.start,
            sentiment_score: score,
            text: segment.text.clone(),
        });
        let entry = speaker_totals
            .entry(segment.speaker_id.clone())
            .or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    let overall = if timeline.is_empty() {
        None
    } else {
        Some(timeline.iter().map(|s| s.sentiment_score).sum::<f64>() / timeline.len() as f64)
    };

    let speaker_sentiments = speaker_totals
        .into_iter()
        .map(|(speaker, (total, count))| (speaker, total / count as f64))
        .collect();

    Ok(SentimentSummary {
        overall,
        timeline,
        speaker_sentiments,
    })
}
