use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use crate::error::EngineError;
use crate::io::report::{
    ArgumentNode, DiscussionSummary, SentimentPayload, SpeakerStats, ThreadView, TopicTimeline,
};
use crate::models::{
    Argument, ArgumentKind, DiscussionThread, Recording, Segment, SentimentSample,
    SentimentSummary, SupportingPoint, Topic,
};
use crate::stages::ArgumentForest;

pub const SCHEMA_VERSION: i64 = 1;

/// Durable store for structured discussion records.
///
/// All rows for one recording are written in a single transaction, so a
/// concurrent reader sees either the whole recording or none of it.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, EngineError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, EngineError> {
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn schema_version(&self) -> Result<i64, EngineError> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?)
    }

    fn migrate(&self) -> Result<(), EngineError> {
        let current = self.schema_version()?;
        if current < 1 {
            let sql = include_str!("../../migrations/0001_schema.sql");
            self.conn.execute_batch(sql)?;
            self.conn.execute("PRAGMA user_version = 1", []).map(|_| ())?;
        }
        Ok(())
    }

    pub fn has_recording(&self, recording_id: &str) -> Result<bool, EngineError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM recordings WHERE recording_id = ?1 LIMIT 1",
                [recording_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Persist everything for one recording.
    ///
    /// Fails with `Conflict` when the recording id already exists and
    /// `replace` is false. With `replace`, all dependent rows are removed
    /// before the new set is written, inside the same transaction:
    /// a failure anywhere rolls back to the prior persisted state.
    pub fn persist_recording(
        &mut self,
        recording: &Recording,
        segments: &[Segment],
        topics: &[Topic],
        forest: &ArgumentForest,
        sentiment: &SentimentSummary,
        replace: bool,
    ) -> Result<(), EngineError> {
        let tx = self.conn.transaction()?;
        // Threads reference their initial argument and arguments reference
        // their thread; deferring lets the transaction insert both sides
        // before the constraints are checked at commit.
        tx.execute_batch("PRAGMA defer_foreign_keys = ON")?;

        let exists = tx
            .query_row(
                "SELECT 1 FROM recordings WHERE recording_id = ?1 LIMIT 1",
                [&recording.recording_id],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if exists {
            if !replace {
                return Err(EngineError::Conflict {
                    recording_id: recording.recording_id.clone(),
                });
            }
            info!(
                recording_id = %recording.recording_id,
                "replacing previously ingested recording"
            );
            for table in [
                "sentiment_analysis",
                "supporting_points",
                "arguments",
                "threads",
                "topics",
                "transcriptions",
                "recordings",
            ] {
                tx.execute(
                    &format!("DELETE FROM {table} WHERE recording_id = ?1"),
                    [&recording.recording_id],
                )?;
            }
        }

        tx.execute(
            "INSERT INTO recordings (recording_id, file_path, duration, format, recording_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                recording.recording_id,
                recording.source_path.to_string_lossy().into_owned(),
                recording.duration,
                recording.format,
                recording.recorded_at.to_rfc3339(),
            ],
        )?;

        for segment in segments {
            tx.execute(
                "INSERT INTO transcriptions
                 (recording_id, segment_index, speaker_id, start_time, end_time, text, confidence)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    recording.recording_id,
                    segment.source_index as i64,
                    segment.speaker_id,
                    segment.start,
                    segment.end,
                    segment.text,
                    segment.confidence,
                ],
            )?;
        }

        for topic in topics {
            tx.execute(
                "INSERT INTO topics
                 (recording_id, topic_id, topic_name, start_time, end_time, importance_score)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    recording.recording_id,
                    topic.topic_id,
                    topic.name,
                    topic.start,
                    topic.end,
                    topic.importance,
                ],
            )?;
        }

        for thread in &forest.threads {
            tx.execute(
                "INSERT INTO threads
                 (recording_id, thread_id, topic_id, initial_argument_id, summary)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    recording.recording_id,
                    thread.thread_id,
                    thread.topic_id,
                    thread.initial_argument_id,
                    thread.summary,
                ],
            )?;
        }

        for argument in &forest.arguments {
            tx.execute(
                "INSERT INTO arguments
                 (recording_id, argument_id, thread_id, speaker_id, timestamp,
                  main_claim, argument_type, parent_id, confidence_score)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    recording.recording_id,
                    argument.argument_id,
                    argument.thread_id,
                    argument.speaker_id,
                    argument.timestamp,
                    argument.main_claim,
                    argument.kind.as_str(),
                    argument.parent_id,
                    argument.confidence,
                ],
            )?;
        }

        for point in &forest.points {
            tx.execute(
                "INSERT INTO supporting_points
                 (recording_id, point_id, argument_id, text, evidence, confidence_score)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    recording.recording_id,
                    point.point_id,
                    point.argument_id,
                    point.text,
                    point.evidence,
                    point.confidence,
                ],
            )?;
        }

        for (entry_id, sample) in sentiment.timeline.iter().enumerate() {
            tx.execute(
                "INSERT INTO sentiment_analysis
                 (recording_id, entry_id, speaker_id, timestamp, sentiment_score, text)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    recording.recording_id,
                    entry_id as i64,
                    sample.speaker_id,
                    sample.timestamp,
                    sample.sentiment_score,
                    sample.text,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    pub fn recording(&self, recording_id: &str) -> Result<Recording, EngineError> {
        let row = self
            .conn
            .query_row(
                "SELECT recording_id, file_path, duration, format, recording_date
                 FROM recordings WHERE recording_id = ?1",
                [recording_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<f64>>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((recording_id, file_path, duration, format, recording_date)) = row else {
            return Err(EngineError::RecordingNotFound {
                recording_id: recording_id.to_string(),
            });
        };

        Ok(Recording {
            recording_id,
            source_path: file_path.into(),
            duration,
            format,
            recorded_at: parse_timestamp(&recording_date)?,
        })
    }

    /// Transcription segments ordered by start time, optionally clipped to
    /// a `[from, to]` window (a segment qualifies when any part of it
    /// touches the window).
    pub fn segments(
        &self,
        recording_id: &str,
        from: Option<f64>,
        to: Option<f64>,
    ) -> Result<Vec<Segment>, EngineError> {
        let mut statement = self.conn.prepare(
            "SELECT segment_index, speaker_id, start_time, end_time, text, confidence
             FROM transcriptions
             WHERE recording_id = ?1
             ORDER BY start_time, segment_index",
        )?;
        let rows = statement.query_map([recording_id], |row| {
            Ok(Segment {
                source_index: row.get::<_, i64>(0)? as usize,
                speaker_id: row.get(1)?,
                start: row.get(2)?,
                end: row.get(3)?,
                text: row.get(4)?,
                confidence: row.get(5)?,
            })
        })?;

        let mut segments = Vec::new();
        for row in rows {
            let segment = row?;
            if from.is_some_and(|from| segment.end < from) {
                continue;
            }
            if to.is_some_and(|to| segment.start > to) {
                continue;
            }
            segments.push(segment);
        }
        Ok(segments)
    }

    pub fn topics(&self, recording_id: &str) -> Result<Vec<Topic>, EngineError> {
        let mut statement = self.conn.prepare(
            "SELECT topic_id, topic_name, start_time, end_time, importance_score
             FROM topics WHERE recording_id = ?1
             ORDER BY topic_id",
        )?;
        let rows = statement.query_map([recording_id], |row| {
            Ok(Topic {
                topic_id: row.get(0)?,
                name: row.get(1)?,
                start: row.get(2)?,
                end: row.get(3)?,
                importance: row.get(4)?,
            })
        })?;

        let mut topics = Vec::new();
        for row in rows {
            topics.push(row?);
        }
        Ok(topics)
    }

    /// Topic timeline for the renderer, bounded topics only.
    pub fn topic_timeline(&self, recording_id: &str) -> Result<TopicTimeline, EngineError> {
        Ok(TopicTimeline::from_topics(&self.topics(recording_id)?))
    }

    /// Sentiment payload for the renderer, reconstructed from the stored
    /// timeline rows. Sub-fields are absent when nothing was scored.
    pub fn sentiment_payload(&self, recording_id: &str) -> Result<SentimentPayload, EngineError> {
        let mut statement = self.conn.prepare(
            "SELECT speaker_id, timestamp, sentiment_score, text
             FROM sentiment_analysis
             WHERE recording_id = ?1
             ORDER BY timestamp, entry_id",
        )?;
        let rows = statement.query_map([recording_id], |row| {
            Ok(SentimentSample {
                speaker_id: row.get(0)?,
                timestamp: row.get(1)?,
                sentiment_score: row.get(2)?,
                text: row.get(3)?,
            })
        })?;

        let mut timeline = Vec::new();
        for row in rows {
            timeline.push(row?);
        }

        let mut summary = SentimentSummary::default();
        if !timeline.is_empty() {
            summary.overall = Some(
                timeline.iter().map(|s| s.sentiment_score).sum::<f64>() / timeline.len() as f64,
            );
            for sample in &timeline {
                let entry = summary
                    .speaker_sentiments
                    .entry(sample.speaker_id.clone())
                    .or_insert(0.0);
                *entry += sample.sentiment_score;
            }
            let mut counts: HashMap<String, usize> = HashMap::new();
            for sample in &timeline {
                *counts.entry(sample.speaker_id.clone()).or_default() += 1;
            }
            for (speaker, total) in summary.speaker_sentiments.iter_mut() {
                *total /= counts[speaker] as f64;
            }
            summary.timeline = timeline;
        }
        Ok(SentimentPayload::from_summary(&summary))
    }

    /// Total speaking time per speaker, in seconds.
    pub fn speaker_durations(&self, recording_id: &str) -> Result<SpeakerStats, EngineError> {
        let mut statement = self.conn.prepare(
            "SELECT speaker_id, SUM(end_time - start_time)
             FROM transcriptions
             WHERE recording_id = ?1
             GROUP BY speaker_id
             ORDER BY speaker_id",
        )?;
        let rows = statement.query_map([recording_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;

        let mut stats = SpeakerStats::default();
        for row in rows {
            let (speaker, duration) = row?;
            stats.speakers.push(speaker);
            stats.durations.push(duration);
        }
        Ok(stats)
    }

    /// Argument trees per thread, children ordered by timestamp.
    pub fn argument_trees(&self, recording_id: &str) -> Result<Vec<ThreadView>, EngineError> {
        let topic_names: HashMap<i64, String> = self
            .topics(recording_id)?
            .into_iter()
            .map(|topic| (topic.topic_id, topic.name))
            .collect();

        let mut statement = self.conn.prepare(
            "SELECT thread_id, topic_id, initial_argument_id, summary
             FROM threads WHERE recording_id = ?1
             ORDER BY thread_id",
        )?;
        let rows = statement.query_map([recording_id], |row| {
            Ok(DiscussionThread {
                thread_id: row.get(0)?,
                topic_id: row.get(1)?,
                initial_argument_id: row.get(2)?,
                summary: row.get(3)?,
            })
        })?;
        let mut threads = Vec::new();
        for row in rows {
            threads.push(row?);
        }

        let arguments = self.arguments(recording_id)?;
        let points = self.supporting_points(recording_id)?;

        let mut points_of: HashMap<i64, Vec<SupportingPoint>> = HashMap::new();
        for point in points {
            points_of.entry(point.argument_id).or_default().push(point);
        }
        let mut children_of: HashMap<i64, Vec<i64>> = HashMap::new();
        let by_id: HashMap<i64, Argument> = arguments
            .iter()
            .map(|a| (a.argument_id, a.clone()))
            .collect();
        for argument in &arguments {
            if let Some(parent_id) = argument.parent_id {
                children_of
                    .entry(parent_id)
                    .or_default()
                    .push(argument.argument_id);
            }
        }

        let mut views = Vec::new();
        for thread in threads {
            let roots: Vec<i64> = arguments
                .iter()
                .filter(|a| a.thread_id == Some(thread.thread_id) && a.is_root())
                .map(|a| a.argument_id)
                .collect();
            let topic_name = topic_names
                .get(&thread.topic_id)
                .cloned()
                .unwrap_or_default();
            views.push(ThreadView {
                topic_name,
                roots: roots
                    .iter()
                    .map(|&id| build_node(id, &by_id, &children_of, &mut points_of))
                    .collect(),
                thread,
            });
        }
        Ok(views)
    }

    /// Metadata plus the full discussion structure in one call.
    pub fn discussion_summary(&self, recording_id: &str) -> Result<DiscussionSummary, EngineError> {
        Ok(DiscussionSummary {
            recording: self.recording(recording_id)?,
            topics: self.topics(recording_id)?,
            threads: self.argument_trees(recording_id)?,
        })
    }

    fn arguments(&self, recording_id: &str) -> Result<Vec<Argument>, EngineError> {
        let mut statement = self.conn.prepare(
            "SELECT argument_id, thread_id, speaker_id, timestamp, main_claim,
                    argument_type, parent_id, confidence_score
             FROM arguments WHERE recording_id = ?1
             ORDER BY timestamp, argument_id",
        )?;
        let rows = statement.query_map([recording_id], |row| {
            let kind_raw: String = row.get(5)?;
            let kind = ArgumentKind::parse(&kind_raw).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("invalid argument type: {kind_raw}"),
                    )),
                )
            })?;
            Ok(Argument {
                argument_id: row.get(0)?,
                thread_id: row.get(1)?,
                speaker_id: row.get(2)?,
                timestamp: row.get(3)?,
                main_claim: row.get(4)?,
                kind,
                parent_id: row.get(6)?,
                confidence: row.get(7)?,
            })
        })?;

        let mut arguments = Vec::new();
        for row in rows {
            arguments.push(row?);
        }
        Ok(arguments)
    }

    fn supporting_points(&self, recording_id: &str) -> Result<Vec<SupportingPoint>, EngineError> {
        let mut statement = self.conn.prepare(
            "SELECT point_id, argument_id, text, evidence, confidence_score
             FROM supporting_points WHERE recording_id = ?1
             ORDER BY point_id",
        )?;
        let rows = statement.query_map([recording_id], |row| {
            Ok(SupportingPoint {
                point_id: row.get(0)?,
                argument_id: row.get(1)?,
                text: row.get(2)?,
                evidence: row.get(3)?,
                confidence: row.get(4)?,
            })
        })?;

        let mut points = Vec::new();
        for row in rows {
            points.push(row?);
        }
        Ok(points)
    }
}

fn build_node(
    id: i64,
    by_id: &HashMap<i64, Argument>,
    children_of: &HashMap<i64, Vec<i64>>,
    points_of: &mut HashMap<i64, Vec<SupportingPoint>>,
) -> ArgumentNode {
    let children = children_of
        .get(&id)
        .map(|child_ids| {
            // arguments() returns timestamp order, so child ids are already
            // ordered; keep that order in the tree.
            child_ids
                .iter()
                .map(|&child| build_node(child, by_id, children_of, points_of))
                .collect()
        })
        .unwrap_or_default();
    ArgumentNode {
        argument: by_id[&id].clone(),
        points: points_of.remove(&id).unwrap_or_default(),
        children,
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, EngineError> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|err| EngineError::Timestamp(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArgumentAnnotation, ArgumentKind};
    use crate::stages::build_argument_graph;
    use tempfile::NamedTempFile;

    fn recording(id: &str) -> Recording {
        Recording {
            recording_id: id.to_string(),
            source_path: "/data/meeting.wav".into(),
            duration: Some(120.0),
            format: "wav".to_string(),
            recorded_at: chrono::Utc::now(),
        }
    }

    fn segment(speaker: &str, start: f64, end: f64, text: &str, index: usize) -> Segment {
        Segment {
            speaker_id: speaker.to_string(),
            start,
            end,
            text: text.to_string(),
            confidence: None,
            source_index: index,
        }
    }

    fn sample(speaker: &str, timestamp: f64, score: f64) -> SentimentSample {
        SentimentSample {
            speaker_id: speaker.to_string(),
            timestamp,
            sentiment_score: score,
            text: "said".to_string(),
        }
    }

    fn topic(id: i64, name: &str, start: f64, end: f64) -> Topic {
        Topic {
            topic_id: id,
            name: name.to_string(),
            start: Some(start),
            end: Some(end),
            importance: 0.5,
        }
    }

    fn annotation(id: &str, speaker: &str, t: f64, parent: Option<&str>) -> ArgumentAnnotation {
        ArgumentAnnotation {
            id: id.to_string(),
            speaker_id: speaker.to_string(),
            timestamp: t,
            main_claim: format!("claim {id}"),
            argument_type: ArgumentKind::Claim,
            parent_ref: parent.map(str::to_string),
            confidence_score: None,
            supporting_points: vec![],
        }
    }

    fn persist_sample_recording(store: &mut Store, id: &str) {
        let segments = vec![
            segment("A", 0.0, 5.0, "budget talk", 0),
            segment("B", 4.0, 9.0, "more budget talk", 1),
        ];
        let topics = vec![topic(1, "budget", 0.0, 9.0)];
        let forest = build_argument_graph(
            id,
            &topics,
            &[
                annotation("a1", "A", 2.0, None),
                annotation("a2", "B", 5.0, Some("a1")),
            ],
        )
        .unwrap();
        let sentiment = SentimentSummary {
            overall: Some(0.1),
            timeline: vec![sample("A", 0.0, 0.8), sample("B", 4.0, -0.6)],
            speaker_sentiments: [("A".to_string(), 0.8), ("B".to_string(), -0.6)]
                .into_iter()
                .collect(),
        };
        store
            .persist_recording(&recording(id), &segments, &topics, &forest, &sentiment, false)
            .unwrap();
    }

    #[test]
    fn test_migration_sets_schema_version() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_roundtrip_on_disk() {
        let file = NamedTempFile::new().unwrap();
        let mut store = Store::open(file.path()).unwrap();
        persist_sample_recording(&mut store, "rec-1");

        drop(store);
        let store = Store::open(file.path()).unwrap();
        let loaded = store.recording("rec-1").unwrap();
        assert_eq!(loaded.format, "wav");
        assert_eq!(store.segments("rec-1", None, None).unwrap().len(), 2);
    }

    #[test]
    fn test_conflict_without_replace() {
        let mut store = Store::open_in_memory().unwrap();
        persist_sample_recording(&mut store, "rec-1");

        let err = store
            .persist_recording(
                &recording("rec-1"),
                &[],
                &[],
                &ArgumentForest::default(),
                &SentimentSummary::default(),
                false,
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));

        // Prior state untouched.
        assert_eq!(store.segments("rec-1", None, None).unwrap().len(), 2);
    }

    #[test]
    fn test_replace_swaps_the_full_row_set() {
        let mut store = Store::open_in_memory().unwrap();
        persist_sample_recording(&mut store, "rec-1");

        let new_segments = vec![segment("C", 10.0, 20.0, "fresh take", 0)];
        store
            .persist_recording(
                &recording("rec-1"),
                &new_segments,
                &[],
                &ArgumentForest::default(),
                &SentimentSummary::default(),
                true,
            )
            .unwrap();

        let rows = store.segments("rec-1", None, None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].speaker_id, "C");
        assert!(store.topics("rec-1").unwrap().is_empty());
        assert!(store.argument_trees("rec-1").unwrap().is_empty());
        let payload = store.sentiment_payload("rec-1").unwrap();
        assert!(payload.overall_sentiment.is_none());
        assert!(payload.timeline.is_none());
        assert!(payload.speaker_sentiments.is_none());
    }

    #[test]
    fn test_topic_timeline_payload() {
        let mut store = Store::open_in_memory().unwrap();
        persist_sample_recording(&mut store, "rec-1");

        let timeline = store.topic_timeline("rec-1").unwrap();
        assert_eq!(timeline.labels, vec!["budget"]);
        assert_eq!(timeline.start, vec![0.0]);
        assert_eq!(timeline.end, vec![9.0]);
    }

    #[test]
    fn test_sentiment_payload_reconstruction() {
        let mut store = Store::open_in_memory().unwrap();
        persist_sample_recording(&mut store, "rec-1");

        let payload = store.sentiment_payload("rec-1").unwrap();
        let overall = payload.overall_sentiment.unwrap();
        assert!((overall - 0.1).abs() < 1e-9);

        let timeline = payload.timeline.unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].speaker_id, "A");

        let speakers = payload.speaker_sentiments.unwrap();
        assert_eq!(speakers["A"], 0.8);
        assert_eq!(speakers["B"], -0.6);
    }

    #[test]
    fn test_argument_tree_reconstruction() {
        let mut store = Store::open_in_memory().unwrap();
        persist_sample_recording(&mut store, "rec-1");

        let views = store.argument_trees("rec-1").unwrap();
        assert_eq!(views.len(), 1);
        let view = &views[0];
        assert_eq!(view.topic_name, "budget");
        assert_eq!(view.thread.initial_argument_id, Some(1));
        assert_eq!(view.roots.len(), 1);
        assert_eq!(view.roots[0].argument.main_claim, "claim a1");
        assert_eq!(view.roots[0].children.len(), 1);
        assert_eq!(view.roots[0].children[0].argument.main_claim, "claim a2");
    }

    #[test]
    fn test_segment_window_clipping() {
        let mut store = Store::open_in_memory().unwrap();
        persist_sample_recording(&mut store, "rec-1");

        // Window [6, 20] excludes the first segment (ends at 5).
        let rows = store.segments("rec-1", Some(6.0), Some(20.0)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].speaker_id, "B");

        // Window touching a segment's interior includes it.
        let rows = store.segments("rec-1", None, Some(0.5)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].speaker_id, "A");
    }

    #[test]
    fn test_speaker_durations() {
        let mut store = Store::open_in_memory().unwrap();
        persist_sample_recording(&mut store, "rec-1");

        let stats = store.speaker_durations("rec-1").unwrap();
        assert_eq!(stats.speakers, vec!["A", "B"]);
        assert_eq!(stats.durations, vec![5.0, 5.0]);
    }

    #[test]
    fn test_missing_recording_is_not_found() {
        let store = Store::open_in_memory().unwrap();
        let err = store.recording("nope").unwrap_err();
        assert!(matches!(err, EngineError::RecordingNotFound { .. }));
    }
}
