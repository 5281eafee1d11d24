//! Reader for the `/jobs/stream` server-sent-events feed.
//!
//! Each event's data payload is a full JSON snapshot of the in-flight jobs.
//! Frames that fail to parse are logged and skipped; the stream itself
//! stays up.

use std::collections::VecDeque;

use futures::StreamExt;
use futures::stream::BoxStream;

use cdiary_client_core::types::JobSnapshotMap;

use crate::DiaryApiError;

/// Incremental SSE framing: accumulates `data:` lines until the blank line
/// that terminates an event. Comment, `event:`, `id:`, and `retry:` lines
/// are ignored, matching what the backend actually emits.
#[derive(Debug, Default)]
pub struct SseFrameReader {
    buffer: String,
    data_lines: Vec<String>,
}

impl SseFrameReader {
    /// Feed a chunk of the response body; returns the data payloads of all
    /// events completed by this chunk. Partial trailing lines are carried
    /// over to the next call.
    pub fn push_chunk(&mut self, chunk: &str) -> Vec<String> {
        self.buffer.push_str(chunk);
        let mut events = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            let line = line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                if !self.data_lines.is_empty() {
                    events.push(self.data_lines.join("\n"));
                    self.data_lines.clear();
                }
            } else if let Some(data) = line.strip_prefix("data:") {
                self.data_lines
                    .push(data.strip_prefix(' ').unwrap_or(data).to_string());
            }
        }
        events
    }
}

pub struct JobStream {
    body: BoxStream<'static, Result<Vec<u8>, String>>,
    frames: SseFrameReader,
    pending: VecDeque<JobSnapshotMap>,
}

impl JobStream {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        let body = response
            .bytes_stream()
            .map(|chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|error| error.to_string())
            })
            .boxed();
        Self {
            body,
            frames: SseFrameReader::default(),
            pending: VecDeque::new(),
        }
    }

    /// Next full job snapshot, or `None` once the server closes the stream.
    pub async fn next_snapshot(&mut self) -> Result<Option<JobSnapshotMap>, DiaryApiError> {
        loop {
            if let Some(snapshot) = self.pending.pop_front() {
                return Ok(Some(snapshot));
            }
            let Some(chunk) = self.body.next().await else {
                return Ok(None);
            };
            let chunk = chunk.map_err(|message| DiaryApiError::Read { message })?;
            let text = String::from_utf8_lossy(&chunk).into_owned();
            for payload in self.frames.push_chunk(&text) {
                match serde_json::from_str::<JobSnapshotMap>(&payload) {
                    Ok(snapshot) => self.pending.push_back(snapshot),
                    Err(error) => {
                        tracing::warn!(error = %error, "job stream frame failed to parse");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_event_in_one_chunk() {
        let mut reader = SseFrameReader::default();
        let events = reader.push_chunk("data: {\"a\":1}\n\n");
        assert_eq!(events, vec!["{\"a\":1}".to_string()]);
    }

    #[test]
    fn event_split_across_chunks() {
        let mut reader = SseFrameReader::default();
        assert!(reader.push_chunk("data: {\"jobs\"").is_empty());
        assert!(reader.push_chunk(":{}}\n").is_empty());
        let events = reader.push_chunk("\n");
        assert_eq!(events, vec!["{\"jobs\":{}}".to_string()]);
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let mut reader = SseFrameReader::default();
        let events = reader.push_chunk("data: {}\r\n\r\n");
        assert_eq!(events, vec!["{}".to_string()]);
    }

    #[test]
    fn comment_and_metadata_lines_are_ignored() {
        let mut reader = SseFrameReader::default();
        let events = reader.push_chunk(": keepalive\nevent: jobs\nid: 4\ndata: {}\n\n");
        assert_eq!(events, vec!["{}".to_string()]);
    }

    #[test]
    fn multi_line_data_joins_with_newlines() {
        let mut reader = SseFrameReader::default();
        let events = reader.push_chunk("data: {\ndata: }\n\n");
        assert_eq!(events, vec!["{\n}".to_string()]);
    }

    #[test]
    fn several_events_in_one_chunk() {
        let mut reader = SseFrameReader::default();
        let events = reader.push_chunk("data: 1\n\ndata: 2\n\n");
        assert_eq!(events, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn keepalive_blank_lines_emit_nothing() {
        let mut reader = SseFrameReader::default();
        assert!(reader.push_chunk("\n\n\n").is_empty());
    }
}
