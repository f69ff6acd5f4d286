pub mod error;
pub mod io;
pub mod models;
pub mod stages;
pub mod store;

pub use error::EngineError;
pub use io::{
    parse_bundle_file, parse_bundle_json, ReportPayload, SentimentPayload, SpeakerStats,
    TopicTimeline,
};
pub use models::{
    AnalysisBundle, Argument, ArgumentKind, DiscussionThread, RawSegment, Recording, Segment,
    SentimentBand, SentimentSample, SentimentSummary, SupportingPoint, Topic,
};
pub use stages::{
    aggregate_sentiment, assemble_topics, build_argument_graph, ingest_bundle, normalize_segments,
    ArgumentForest, IngestSummary,
};
pub use store::Store;
