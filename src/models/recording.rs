use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity and source metadata for one ingested recording.
///
/// Created once per source file and immutable thereafter; every other
/// entity hangs off its `recording_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Stable identity; generated when the producer does not supply one
    #[serde(default = "generate_recording_id")]
    pub recording_id: String,
    /// Path of the source audio file this analysis came from
    pub source_path: PathBuf,
    /// Duration in seconds, when the audio layer reported it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Container format of the source file ("wav", "mp3", ...)
    pub format: String,
    /// When the discussion was recorded
    #[serde(default = "Utc::now")]
    pub recorded_at: DateTime<Utc>,
}

fn generate_recording_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_id_is_generated() {
        let json = r#"{"source_path": "/tmp/a.wav", "format": "wav"}"#;
        let recording: Recording = serde_json::from_str(json).unwrap();
        assert!(!recording.recording_id.is_empty());
        assert!(recording.duration.is_none());
    }

    #[test]
    fn test_explicit_id_is_kept() {
        let json = r#"{"recording_id": "rec-1", "source_path": "/tmp/a.wav",
                       "duration": 120.5, "format": "wav"}"#;
        let recording: Recording = serde_json::from_str(json).unwrap();
        assert_eq!(recording.recording_id, "rec-1");
        assert_eq!(recording.duration, Some(120.5));
    }
}
