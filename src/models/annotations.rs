use serde::{Deserialize, Serialize};

use super::{ArgumentKind, RawSegment, Recording};

/// Topic annotation from the external analyzer. Bounds and importance are
/// optional; the assembler resolves or defaults them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicAnnotation {
    pub topic_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance_score: Option<f64>,
}

/// Argument annotation from the external analyzer. `id` is the stable
/// external key that `parent_ref` and supporting-point references resolve
/// against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgumentAnnotation {
    pub id: String,
    pub speaker_id: String,
    pub timestamp: f64,
    pub main_claim: String,
    pub argument_type: ArgumentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supporting_points: Vec<SupportingPointAnnotation>,
}

/// Supporting point carried by an argument annotation. `argument_ref`
/// redirects the point to another argument's key; when absent the point
/// attaches to the annotation that carries it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportingPointAnnotation {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument_ref: Option<String>,
}

/// Per-segment sentiment score, keyed by the segment's position in the raw
/// input list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentAnnotation {
    pub segment_index: usize,
    /// Score in [-1, 1]
    pub score: f64,
}

/// Everything the engine consumes for one recording: the raw transcript
/// plus the analyzer's annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisBundle {
    pub recording: Recording,
    pub segments: Vec<RawSegment>,
    #[serde(default)]
    pub topics: Vec<TopicAnnotation>,
    #[serde(default)]
    pub arguments: Vec<ArgumentAnnotation>,
    #[serde(default)]
    pub sentiments: Vec<SentimentAnnotation>,
}
