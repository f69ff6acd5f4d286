use serde::{Deserialize, Serialize};

/// One speaker-attributed span of transcribed text, as handed over by the
/// diarization pipeline. Order and timing are not trusted until the
/// normalizer has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSegment {
    pub speaker_id: String,
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
    /// Transcription confidence in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A validated segment in normalized time order.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub speaker_id: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds, strictly after `start`
    pub end: f64,
    pub text: String,
    pub confidence: Option<f64>,
    /// Position in the raw input list; annotations keyed by input position
    /// keep their identity across the normalizer's reordering
    pub source_index: usize,
}

impl Segment {
    /// Duration of this segment in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the two segments share any span of time
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64, end: f64) -> Segment {
        Segment {
            speaker_id: "s0".to_string(),
            start,
            end,
            text: String::new(),
            confidence: None,
            source_index: 0,
        }
    }

    #[test]
    fn test_overlap_detection() {
        assert!(segment(0.0, 5.0).overlaps(&segment(4.0, 9.0)));
        assert!(!segment(0.0, 5.0).overlaps(&segment(5.0, 9.0)));
        assert!(!segment(0.0, 5.0).overlaps(&segment(6.0, 9.0)));
    }
}
