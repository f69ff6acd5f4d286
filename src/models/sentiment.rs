use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One scored segment on the discussion timeline. Derived data: recomputed
/// whenever segments or annotations change, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSample {
    pub speaker_id: String,
    /// Segment start time in seconds
    pub timestamp: f64,
    /// Score in [-1, 1]
    pub sentiment_score: f64,
    /// The text the score was computed from
    pub text: String,
}

/// Aggregated sentiment for one recording.
///
/// Segments without a score are excluded from every aggregate; a recording
/// where nothing was scored has `overall == None` and empty collections.
#[derive(Debug, Clone, Default)]
pub struct SentimentSummary {
    /// Mean score across all scored segments
    pub overall: Option<f64>,
    /// Scored segments in ascending start order, input order on ties
    pub timeline: Vec<SentimentSample>,
    /// Mean score per speaker; speakers with no scored segment are absent
    pub speaker_sentiments: BTreeMap<String, f64>,
}

/// Interpretation band for a sentiment score. Not stored; computed on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBand {
    Negative,
    Neutral,
    Positive,
}

impl SentimentBand {
    /// Boundary values fall outward: exactly -0.3 is Negative, exactly 0.3
    /// is Positive.
    pub fn classify(score: f64) -> Self {
        if score <= -0.3 {
            SentimentBand::Negative
        } else if score >= 0.3 {
            SentimentBand::Positive
        } else {
            SentimentBand::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SentimentBand::Negative => "Negative",
            SentimentBand::Neutral => "Neutral",
            SentimentBand::Positive => "Positive",
        }
    }
}
