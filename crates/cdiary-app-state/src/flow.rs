use serde::Serialize;

use cdiary_client_core::draft::{DiaryDraft, Mood};
use cdiary_client_core::types::{
    ArtifactDetail, DiaryEntryRequest, GenerationOptions, JobSnapshot, JobStatus, StylePreset,
};

/// Fixed cadence for `GET /jobs/{id}` while a generation is on screen.
pub const JOB_POLL_INTERVAL_MS: u64 = 1_000;

/// Write-to-result flow. The draft travels inside the phase so a reload of
/// the style step can fall back to the persisted copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GeneratePhase {
    #[default]
    Drafting,
    ChoosingStyle {
        draft: DiaryDraft,
    },
    Submitting {
        draft: DiaryDraft,
        style: StylePreset,
    },
    Polling {
        job_id: String,
        last: Option<JobSnapshot>,
    },
    Done {
        artifact_id: String,
    },
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollVerdict {
    Continue,
    Complete { artifact_id: String },
    Failed { error: Option<String> },
}

/// One polling step. DONE without an artifact id is a failure: there is no
/// result screen to route to.
#[must_use]
pub fn assess_poll(snapshot: &JobSnapshot) -> PollVerdict {
    match snapshot.status {
        JobStatus::Done => match snapshot.artifact_id.as_deref() {
            Some(artifact_id) if !artifact_id.is_empty() => PollVerdict::Complete {
                artifact_id: artifact_id.to_string(),
            },
            _ => PollVerdict::Failed {
                error: snapshot.error.clone(),
            },
        },
        JobStatus::Failed => PollVerdict::Failed {
            error: snapshot.error.clone(),
        },
        _ => PollVerdict::Continue,
    }
}

#[must_use]
pub fn generation_request(draft: &DiaryDraft, style: StylePreset) -> DiaryEntryRequest {
    DiaryEntryRequest {
        diary_text: draft.text.clone(),
        mood: draft.mood,
        style_preset: style,
        protagonist_name: None,
        options: GenerationOptions::default(),
    }
}

/// Re-submit an existing artifact's inputs as a brand-new job. Legacy rows
/// may carry an unknown mood or style string; those fall back to defaults.
#[must_use]
pub fn regeneration_request(detail: &ArtifactDetail) -> DiaryEntryRequest {
    DiaryEntryRequest {
        diary_text: detail.diary_text.clone(),
        mood: detail
            .mood
            .as_deref()
            .and_then(Mood::parse)
            .unwrap_or_default(),
        style_preset: StylePreset::parse(&detail.style_preset).unwrap_or(StylePreset::Cute),
        protagonist_name: None,
        options: detail.options.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdiary_client_core::types::Storyboard;
    use chrono::{TimeZone, Utc};

    fn snapshot(status: JobStatus, artifact_id: Option<&str>, error: Option<&str>) -> JobSnapshot {
        JobSnapshot {
            job_id: "j1".to_string(),
            status,
            step: String::new(),
            progress: 0.0,
            artifact_id: artifact_id.map(ToString::to_string),
            error: error.map(ToString::to_string),
        }
    }

    #[test]
    fn non_terminal_statuses_keep_polling() {
        for status in [
            JobStatus::ReadingDiary,
            JobStatus::BuildingStoryboard,
            JobStatus::GeneratingImages,
            JobStatus::ComposingStrip,
        ] {
            assert_eq!(assess_poll(&snapshot(status, None, None)), PollVerdict::Continue);
        }
    }

    #[test]
    fn done_with_artifact_completes() {
        assert_eq!(
            assess_poll(&snapshot(JobStatus::Done, Some("A1"), None)),
            PollVerdict::Complete {
                artifact_id: "A1".to_string()
            }
        );
    }

    #[test]
    fn done_without_artifact_fails() {
        assert_eq!(
            assess_poll(&snapshot(JobStatus::Done, None, None)),
            PollVerdict::Failed { error: None }
        );
    }

    #[test]
    fn failed_carries_the_server_error() {
        assert_eq!(
            assess_poll(&snapshot(JobStatus::Failed, None, Some("model refused"))),
            PollVerdict::Failed {
                error: Some("model refused".to_string())
            }
        );
    }

    #[test]
    fn regeneration_reuses_the_original_inputs() {
        let detail = ArtifactDetail {
            artifact_id: "A1".to_string(),
            final_strip_url: String::new(),
            panel_urls: Vec::new(),
            storyboard: Storyboard::default(),
            style_preset: "drama".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 9, 30, 0).unwrap(),
            diary_date: None,
            diary_text: "Walked in the rain.".to_string(),
            mood: Some("sad".to_string()),
            options: Some(GenerationOptions {
                more_funny: false,
                focus_emotion: true,
                less_text: false,
            }),
        };
        let request = regeneration_request(&detail);
        assert_eq!(request.diary_text, "Walked in the rain.");
        assert_eq!(request.mood, Mood::Sad);
        assert_eq!(request.style_preset, StylePreset::Drama);
        assert!(request.options.focus_emotion);
    }

    #[test]
    fn regeneration_falls_back_on_legacy_fields() {
        let detail = ArtifactDetail {
            artifact_id: "A1".to_string(),
            final_strip_url: String::new(),
            panel_urls: Vec::new(),
            storyboard: Storyboard::default(),
            style_preset: "comic".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 9, 30, 0).unwrap(),
            diary_date: None,
            diary_text: "Old entry.".to_string(),
            mood: None,
            options: None,
        };
        let request = regeneration_request(&detail);
        assert_eq!(request.mood, Mood::SoftSmile);
        assert_eq!(request.style_preset, StylePreset::Cute);
        assert_eq!(request.options, GenerationOptions::default());
    }
}
