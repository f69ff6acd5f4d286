use tracing::debug;

use crate::error::EngineError;
use crate::models::{RawSegment, Recording, Segment};

/// Validate and time-order the raw segments of one recording.
///
/// Pure function, no side effects:
/// 1. Rejects segments with non-finite timing, `end <= start`, bounds
///    outside `[0, duration]` (when the duration is known), or a
///    confidence outside `[0, 1]`.
/// 2. Sorts by start time, stable on ties so input order survives.
/// 3. Rejects temporal overlap between segments of the same speaker;
///    cross-speaker overlap is ordinary cross-talk and passes through.
///
/// The output is a permutation of the input; each segment keeps its
/// original position in `source_index`.
pub fn normalize_segments(
    recording: &Recording,
    raw: &[RawSegment],
) -> Result<Vec<Segment>, EngineError> {
    let recording_id = &recording.recording_id;

    let mut segments = Vec::with_capacity(raw.len());
    for (index, segment) in raw.iter().enumerate() {
        validate_segment(recording, index, segment)?;
        segments.push(Segment {
            speaker_id: segment.speaker_id.clone(),
            start: segment.start_time,
            end: segment.end_time,
            text: segment.text.clone(),
            confidence: segment.confidence,
            source_index: index,
        });
    }

    segments.sort_by(|a, b| a.start.total_cmp(&b.start));

    detect_same_speaker_overlap(recording_id, &segments)?;

    debug!(
        recording_id = %recording_id,
        segments = segments.len(),
        "normalized segment sequence"
    );
    Ok(segments)
}

fn validate_segment(
    recording: &Recording,
    index: usize,
    segment: &RawSegment,
) -> Result<(), EngineError> {
    let reject = |reason: String| EngineError::Validation {
        recording_id: recording.recording_id.clone(),
        entity: format!("segment {index}"),
        reason,
    };

    if !segment.start_time.is_finite() || !segment.end_time.is_finite() {
        return Err(reject("non-finite timestamp".to_string()));
    }
    if segment.end_time <= segment.start_time {
        return Err(reject(format!(
            "end {} is not after start {}",
            segment.end_time, segment.start_time
        )));
    }
    if let Some(duration) = recording.duration {
        if segment.start_time < 0.0 || segment.end_time > duration {
            return Err(reject(format!(
                "span [{}, {}] outside recording bounds [0, {}]",
                segment.start_time, segment.end_time, duration
            )));
        }
    }
    if let Some(confidence) = segment.confidence {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(reject(format!("confidence {confidence} outside [0, 1]")));
        }
    }
    Ok(())
}

/// Walk the sorted sequence tracking the last open segment per speaker.
/// Reported indices are positions in the raw input, so the producer can
/// find the offending rows.
fn detect_same_speaker_overlap(
    recording_id: &str,
    segments: &[Segment],
) -> Result<(), EngineError> {
    let mut last_by_speaker: std::collections::HashMap<&str, &Segment> =
        std::collections::HashMap::new();

    for segment in segments {
        if let Some(previous) = last_by_speaker.get(segment.speaker_id.as_str()) {
            if previous.overlaps(segment) {
                return Err(EngineError::Overlap {
                    recording_id: recording_id.to_string(),
                    speaker_id: segment.speaker_id.clone(),
                    first: previous.source_index,
                    second: segment.source_index,
                });
            }
        }
        last_by_speaker.insert(segment.speaker_id.as_str(), segment);
    }
    Ok(())
}
