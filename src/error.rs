use thiserror::Error;

/// Errors raised while structuring a recording's analysis data.
///
/// Structural errors (`Validation`, `Overlap`, `Cycle`, `TemporalOrder`,
/// `Conflict`) abort ingestion of the offending recording; nothing partial
/// is persisted. `DanglingReference` is recoverable: the referencing
/// subtree is dropped with a warning and ingestion continues.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed input entity (bad timing, out-of-range score, duplicate key)
    #[error("recording {recording_id}: {entity}: {reason}")]
    Validation {
        recording_id: String,
        entity: String,
        reason: String,
    },

    /// Two segments from the same speaker overlap in time
    #[error(
        "recording {recording_id}: speaker {speaker_id} overlaps itself in segments {first} and {second}"
    )]
    Overlap {
        recording_id: String,
        speaker_id: String,
        first: usize,
        second: usize,
    },

    /// Argument parent links form a cycle
    #[error("recording {recording_id}: argument {argument} never reaches a root (parent cycle)")]
    Cycle {
        recording_id: String,
        argument: String,
    },

    /// An argument's parent is timestamped strictly later than the argument
    #[error("recording {recording_id}: argument {child} predates its parent {parent}")]
    TemporalOrder {
        recording_id: String,
        child: String,
        parent: String,
    },

    /// A reference to an argument that does not exist (or was dropped)
    #[error("recording {recording_id}: {entity} references unknown argument {reference}")]
    DanglingReference {
        recording_id: String,
        entity: String,
        reference: String,
    },

    /// Re-ingestion of an existing recording without an explicit replace
    #[error("recording {recording_id} already ingested; use replace to overwrite")]
    Conflict { recording_id: String },

    /// Lookup of a recording that was never ingested
    #[error("recording {recording_id} not found")]
    RecordingNotFound { recording_id: String },

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("timestamp parse error: {0}")]
    Timestamp(String),
}
