//! Wire schemas for the cartoon-diary backend.
//!
//! Field names mirror the backend's JSON exactly; the camelCase renames are
//! part of the contract, not a style choice.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::draft::Mood;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    Cute,
    Comedy,
    Drama,
    Minimal,
}

impl StylePreset {
    pub const ALL: [StylePreset; 4] = [
        StylePreset::Cute,
        StylePreset::Comedy,
        StylePreset::Drama,
        StylePreset::Minimal,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cute => "cute",
            Self::Comedy => "comedy",
            Self::Drama => "drama",
            Self::Minimal => "minimal",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cute" => Some(Self::Cute),
            "comedy" => Some(Self::Comedy),
            "drama" => Some(Self::Drama),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    pub more_funny: bool,
    pub focus_emotion: bool,
    pub less_text: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntryRequest {
    pub diary_text: String,
    pub mood: Mood,
    pub style_preset: StylePreset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protagonist_name: Option<String>,
    #[serde(default)]
    pub options: GenerationOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    ReadingDiary,
    BuildingStoryboard,
    GeneratingImages,
    ComposingStrip,
    Done,
    Failed,
}

impl JobStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSnapshot {
    pub job_id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One frame of the `/jobs/stream` feed: the full set of in-flight jobs,
/// keyed by job id. Every frame replaces the previous one.
pub type JobSnapshotMap = BTreeMap<String, JobSnapshot>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAccepted {
    pub job_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSummary {
    pub artifact_id: String,
    #[serde(default)]
    pub thumbnail_url: String,
    pub date: String,
    pub summary: String,
    #[serde(default)]
    pub style_preset: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactListing {
    pub items: Vec<ArtifactSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryboardPanel {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storyboard {
    #[serde(default)]
    pub panels: Vec<StoryboardPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDetail {
    pub artifact_id: String,
    #[serde(default)]
    pub final_strip_url: String,
    #[serde(default)]
    pub panel_urls: Vec<String>,
    #[serde(default)]
    pub storyboard: Storyboard,
    #[serde(default)]
    pub style_preset: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub diary_date: Option<NaiveDate>,
    #[serde(default)]
    pub diary_text: String,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub options: Option<GenerationOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub profile_prompt: Option<String>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_s3_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
}

/// Generated portrait as a `data:image/png;base64,...` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    #[serde(default)]
    pub status: String,
    pub image_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveProfileImageRequest {
    pub user_id: String,
    pub image_data: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProfileImage {
    pub s3_key: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Raw diary row from the diary endpoints (as opposed to the artifact
/// views, which are camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryRecord {
    pub id: String,
    pub diary_date: NaiveDate,
    pub content: String,
    #[serde(default)]
    pub image_s3_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdated {
    pub status: String,
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub profile_image_s3_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn diary_entry_request_serializes_to_camel_case_wire() {
        let request = DiaryEntryRequest {
            diary_text: "Rode my bike to the river.".to_string(),
            mood: Mood::VeryHappy,
            style_preset: StylePreset::Comedy,
            protagonist_name: None,
            options: GenerationOptions::default(),
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({
                "diaryText": "Rode my bike to the river.",
                "mood": "very_happy",
                "stylePreset": "comedy",
                "options": {
                    "moreFunny": false,
                    "focusEmotion": false,
                    "lessText": false,
                }
            })
        );
    }

    #[test]
    fn job_snapshot_map_parses_a_stream_frame() {
        let raw = r#"{
            "job-1": {"jobId": "job-1", "status": "GENERATING_IMAGES", "step": "panel 2/4", "progress": 55.0, "artifactId": "A1"},
            "job-2": {"jobId": "job-2", "status": "DONE", "step": "done", "progress": 100, "artifactId": "A2"}
        }"#;
        let snapshot: JobSnapshotMap = serde_json::from_str(raw).expect("parse frame");
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["job-1"].status, JobStatus::GeneratingImages);
        assert_eq!(snapshot["job-2"].artifact_id.as_deref(), Some("A2"));
        assert!(snapshot["job-2"].status.is_terminal());
    }

    #[test]
    fn artifact_summary_accepts_missing_thumbnail() {
        let raw = r#"{"artifactId": "A1", "date": "2026-08-01", "summary": "Rode my bike...", "stylePreset": "cute"}"#;
        let summary: ArtifactSummary = serde_json::from_str(raw).expect("parse summary");
        assert!(summary.thumbnail_url.is_empty());
    }

    #[test]
    fn artifact_detail_tolerates_legacy_rows() {
        let raw = r#"{
            "artifactId": "A1",
            "finalStripUrl": "https://cdn.example.com/a1.png",
            "panelUrls": ["https://cdn.example.com/a1-0.png"],
            "storyboard": {"panels": [{"text": "Morning."}]},
            "stylePreset": "comic",
            "createdAt": "2026-08-01T09:30:00Z",
            "diaryText": "Morning ride."
        }"#;
        let detail: ArtifactDetail = serde_json::from_str(raw).expect("parse detail");
        assert_eq!(detail.mood, None);
        assert_eq!(detail.options, None);
        assert_eq!(detail.storyboard.panels.len(), 1);
    }

    #[test]
    fn style_preset_parse_is_case_insensitive() {
        assert_eq!(StylePreset::parse(" Drama "), Some(StylePreset::Drama));
        assert_eq!(StylePreset::parse("comic"), None);
    }
}
