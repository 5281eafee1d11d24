use std::collections::BTreeSet;

use serde::Serialize;

use cdiary_client_core::types::{ArtifactSummary, JobSnapshot, JobSnapshotMap, JobStatus};

use crate::search::SearchDebounce;

/// Home-screen feed: the saved artifacts plus the live job snapshot merged
/// over them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeFeedState {
    pub artifacts: Vec<ArtifactSummary>,
    pub active_jobs: JobSnapshotMap,
    pub loading: bool,
    pub search_input: String,
    pub(crate) debounce: SearchDebounce,
    pub(crate) acknowledged_done: BTreeSet<String>,
}

impl HomeFeedState {
    /// Replace the active-job set with a fresh stream frame (frames are full
    /// snapshots, not deltas). Returns true when some job was observed DONE
    /// for the first time; the caller refreshes the artifact list silently,
    /// and repeats of the same DONE job never re-trigger it.
    pub fn absorb_snapshot(&mut self, snapshot: JobSnapshotMap) -> bool {
        let mut newly_done = false;
        for (job_id, job) in &snapshot {
            if job.status == JobStatus::Done && self.acknowledged_done.insert(job_id.clone()) {
                newly_done = true;
            }
        }
        self.active_jobs = snapshot;
        newly_done
    }

    /// Job targeting the given artifact, matched case-insensitively on the
    /// artifact id.
    #[must_use]
    pub fn job_for_artifact(&self, artifact_id: &str) -> Option<&JobSnapshot> {
        self.active_jobs.values().find(|job| {
            job.artifact_id
                .as_deref()
                .is_some_and(|id| id.eq_ignore_ascii_case(artifact_id))
        })
    }

    pub fn remove_artifact(&mut self, artifact_id: &str) {
        self.artifacts
            .retain(|artifact| artifact.artifact_id != artifact_id);
    }
}

/// What a feed row shows in its image slot.
#[derive(Debug, Clone, PartialEq)]
pub enum RowPresentation<'a> {
    /// Progress indicator, optionally annotated with the live job.
    InProgress { job: Option<&'a JobSnapshot> },
    Thumbnail { url: &'a str },
}

/// A row never shows a thumbnail while its job is still running, and never
/// shows an empty-URL thumbnail.
#[must_use]
pub fn row_presentation<'a>(
    artifact: &'a ArtifactSummary,
    job: Option<&'a JobSnapshot>,
) -> RowPresentation<'a> {
    if let Some(job) = job {
        if job.status != JobStatus::Done {
            return RowPresentation::InProgress { job: Some(job) };
        }
    }
    if artifact.thumbnail_url.trim().is_empty() {
        return RowPresentation::InProgress { job };
    }
    RowPresentation::Thumbnail {
        url: &artifact.thumbnail_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(job_id: &str, status: JobStatus, artifact_id: Option<&str>) -> JobSnapshot {
        JobSnapshot {
            job_id: job_id.to_string(),
            status,
            step: String::new(),
            progress: 40.0,
            artifact_id: artifact_id.map(ToString::to_string),
            error: None,
        }
    }

    fn artifact(artifact_id: &str, thumbnail_url: &str) -> ArtifactSummary {
        ArtifactSummary {
            artifact_id: artifact_id.to_string(),
            thumbnail_url: thumbnail_url.to_string(),
            date: "2026-08-01".to_string(),
            summary: "Rode my bike...".to_string(),
            style_preset: "cute".to_string(),
        }
    }

    fn frame(jobs: Vec<JobSnapshot>) -> JobSnapshotMap {
        jobs.into_iter().map(|j| (j.job_id.clone(), j)).collect()
    }

    #[test]
    fn done_job_triggers_refresh_exactly_once() {
        let mut feed = HomeFeedState::default();
        let running = frame(vec![job("j1", JobStatus::GeneratingImages, Some("A1"))]);
        assert!(!feed.absorb_snapshot(running));

        let done = frame(vec![job("j1", JobStatus::Done, Some("A1"))]);
        assert!(feed.absorb_snapshot(done.clone()));
        assert!(!feed.absorb_snapshot(done.clone()));
        assert!(!feed.absorb_snapshot(done));
    }

    #[test]
    fn each_new_done_job_counts_independently() {
        let mut feed = HomeFeedState::default();
        assert!(feed.absorb_snapshot(frame(vec![job("j1", JobStatus::Done, Some("A1"))])));
        assert!(feed.absorb_snapshot(frame(vec![
            job("j1", JobStatus::Done, Some("A1")),
            job("j2", JobStatus::Done, Some("A2")),
        ])));
    }

    #[test]
    fn snapshot_replaces_rather_than_merges() {
        let mut feed = HomeFeedState::default();
        feed.absorb_snapshot(frame(vec![
            job("j1", JobStatus::ReadingDiary, None),
            job("j2", JobStatus::ComposingStrip, Some("A2")),
        ]));
        feed.absorb_snapshot(frame(vec![job("j2", JobStatus::ComposingStrip, Some("A2"))]));
        assert_eq!(feed.active_jobs.len(), 1);
        assert!(!feed.active_jobs.contains_key("j1"));
    }

    #[test]
    fn artifact_match_is_case_insensitive() {
        let mut feed = HomeFeedState::default();
        feed.absorb_snapshot(frame(vec![job(
            "j1",
            JobStatus::GeneratingImages,
            Some("ABC-123"),
        )]));
        assert!(feed.job_for_artifact("abc-123").is_some());
        assert!(feed.job_for_artifact("abc-124").is_none());
    }

    #[test]
    fn running_job_forces_progress_presentation() {
        let art = artifact("A1", "https://cdn.example.com/a1.png");
        let running = job("j1", JobStatus::ComposingStrip, Some("A1"));
        assert!(matches!(
            row_presentation(&art, Some(&running)),
            RowPresentation::InProgress { job: Some(_) }
        ));
    }

    #[test]
    fn missing_thumbnail_forces_progress_presentation() {
        let art = artifact("A1", "  ");
        assert!(matches!(
            row_presentation(&art, None),
            RowPresentation::InProgress { job: None }
        ));
    }

    #[test]
    fn done_job_with_thumbnail_shows_the_thumbnail() {
        let art = artifact("A1", "https://cdn.example.com/a1.png");
        let done = job("j1", JobStatus::Done, Some("A1"));
        assert_eq!(
            row_presentation(&art, Some(&done)),
            RowPresentation::Thumbnail {
                url: "https://cdn.example.com/a1.png"
            }
        );
    }

    #[test]
    fn remove_artifact_drops_only_the_matching_row() {
        let mut feed = HomeFeedState {
            artifacts: vec![artifact("A1", "x"), artifact("A2", "y")],
            ..Default::default()
        };
        feed.remove_artifact("A1");
        assert_eq!(feed.artifacts.len(), 1);
        assert_eq!(feed.artifacts[0].artifact_id, "A2");
    }
}
