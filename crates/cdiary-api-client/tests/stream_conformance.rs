//! Conformance of the SSE reader against the job stream's actual wire
//! shape: full-snapshot frames keyed by job id, interleaved with keepalive
//! comments, chunked at arbitrary byte boundaries.

use cdiary_api_client::SseFrameReader;
use cdiary_client_core::types::{JobSnapshotMap, JobStatus};

const FRAME_ONE: &str = concat!(
    "data: {\"job-1\": {\"jobId\": \"job-1\", \"status\": \"READING_DIARY\", ",
    "\"step\": \"reading diary\", \"progress\": 5.0}}\n\n"
);

const FRAME_TWO: &str = concat!(
    ": keepalive\n",
    "data: {\"job-1\": {\"jobId\": \"job-1\", \"status\": \"DONE\", \"step\": \"done\", ",
    "\"progress\": 100.0, \"artifactId\": \"A1\"}, ",
    "\"job-2\": {\"jobId\": \"job-2\", \"status\": \"COMPOSING_STRIP\", ",
    "\"step\": \"composing\", \"progress\": 80.0, \"artifactId\": \"A2\"}}\n\n"
);

fn parse_all(reader: &mut SseFrameReader, chunk: &str) -> Vec<JobSnapshotMap> {
    reader
        .push_chunk(chunk)
        .into_iter()
        .map(|payload| serde_json::from_str(&payload).expect("frame parses"))
        .collect()
}

#[test]
fn whole_frames_parse_into_snapshots() {
    let mut reader = SseFrameReader::default();

    let first = parse_all(&mut reader, FRAME_ONE);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0]["job-1"].status, JobStatus::ReadingDiary);
    assert_eq!(first[0]["job-1"].artifact_id, None);

    let second = parse_all(&mut reader, FRAME_TWO);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].len(), 2);
    assert_eq!(second[0]["job-1"].status, JobStatus::Done);
    assert_eq!(second[0]["job-1"].artifact_id.as_deref(), Some("A1"));
    assert_eq!(second[0]["job-2"].status, JobStatus::ComposingStrip);
}

#[test]
fn byte_by_byte_delivery_yields_the_same_snapshots() {
    let mut reader = SseFrameReader::default();
    let mut snapshots = Vec::new();
    let stream = format!("{FRAME_ONE}{FRAME_TWO}");
    for ch in stream.chars() {
        snapshots.extend(parse_all(&mut reader, &ch.to_string()));
    }
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0]["job-1"].status, JobStatus::ReadingDiary);
    assert_eq!(snapshots[1]["job-2"].artifact_id.as_deref(), Some("A2"));
}

#[test]
fn empty_snapshot_frame_is_a_valid_empty_map() {
    let mut reader = SseFrameReader::default();
    let frames = parse_all(&mut reader, "data: {}\n\n");
    assert_eq!(frames.len(), 1);
    assert!(frames[0].is_empty());
}
