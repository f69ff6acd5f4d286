use serde::{Deserialize, Serialize};

/// Fixed vocabulary of argument tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentKind {
    Claim,
    Rebuttal,
    Question,
    Agreement,
    Clarification,
    Other,
}

impl ArgumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentKind::Claim => "claim",
            ArgumentKind::Rebuttal => "rebuttal",
            ArgumentKind::Question => "question",
            ArgumentKind::Agreement => "agreement",
            ArgumentKind::Clarification => "clarification",
            ArgumentKind::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "claim" => Some(ArgumentKind::Claim),
            "rebuttal" => Some(ArgumentKind::Rebuttal),
            "question" => Some(ArgumentKind::Question),
            "agreement" => Some(ArgumentKind::Agreement),
            "clarification" => Some(ArgumentKind::Clarification),
            "other" => Some(ArgumentKind::Other),
            _ => None,
        }
    }
}

/// A claim made by a speaker at a point in time, optionally parented by an
/// earlier argument in the same recording.
///
/// Parent links form a tree: acyclic, parent timestamp never strictly
/// later than the child's. A parentless argument is a tree root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Identifier scoped to the recording, assigned by the graph builder
    pub argument_id: i64,
    /// Thread this argument was assigned to; `None` when no bounded topic
    /// contained its timestamp
    pub thread_id: Option<i64>,
    pub speaker_id: String,
    /// When the claim was made, in seconds from recording start
    pub timestamp: f64,
    pub main_claim: String,
    pub kind: ArgumentKind,
    pub parent_id: Option<i64>,
    /// Extraction confidence in [0, 1], 1.0 when the analyzer supplied none
    pub confidence: f64,
}

impl Argument {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Evidence or elaboration attached to one argument. Leaf-only data:
/// supporting points are never parented by other supporting points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportingPoint {
    pub point_id: i64,
    pub argument_id: i64,
    pub text: String,
    pub evidence: Option<String>,
    pub confidence: f64,
}
