use serde::{Deserialize, Serialize};

use crate::locale::Language;

/// Fixed mood palette shown on the write screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Surprised,
    VeryHappy,
    #[default]
    SoftSmile,
    Motivated,
    Emotionless,
    Sad,
    Crying,
    Curious,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Surprised,
        Mood::VeryHappy,
        Mood::SoftSmile,
        Mood::Motivated,
        Mood::Emotionless,
        Mood::Sad,
        Mood::Crying,
        Mood::Curious,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Surprised => "surprised",
            Self::VeryHappy => "very_happy",
            Self::SoftSmile => "soft_smile",
            Self::Motivated => "motivated",
            Self::Emotionless => "emotionless",
            Self::Sad => "sad",
            Self::Crying => "crying",
            Self::Curious => "curious",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mood| mood.as_str() == raw.trim())
    }

    #[must_use]
    pub fn label(self, language: Language) -> &'static str {
        let (ko, en) = match self {
            Self::Surprised => ("놀람", "Surprised"),
            Self::VeryHappy => ("아주 행복", "Very Happy"),
            Self::SoftSmile => ("미소", "Soft Smile"),
            Self::Motivated => ("의욕 충만", "Motivated"),
            Self::Emotionless => ("무표정", "Emotionless"),
            Self::Sad => ("슬픔", "Sad"),
            Self::Crying => ("눈물", "Crying"),
            Self::Curious => ("궁금함", "Curious"),
        };
        match language {
            Language::Ko => ko,
            Language::En => en,
        }
    }
}

/// In-progress diary entry, persisted between the write step and the style
/// step. Overwritten on every new draft and never explicitly deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryDraft {
    pub text: String,
    #[serde(default)]
    pub mood: Mood,
}

pub trait DraftStore {
    type Error;

    fn load_draft(&self) -> Result<Option<DiaryDraft>, Self::Error>;
    fn persist_draft(&self, draft: &DiaryDraft) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_ids_round_trip_through_parse() {
        for mood in Mood::ALL {
            assert_eq!(Mood::parse(mood.as_str()), Some(mood));
        }
        assert_eq!(Mood::parse("grumpy"), None);
    }

    #[test]
    fn default_mood_is_soft_smile() {
        assert_eq!(Mood::default(), Mood::SoftSmile);
    }

    #[test]
    fn draft_round_trips_through_stored_json() {
        let draft = DiaryDraft {
            text: "Walked in the rain.".to_string(),
            mood: Mood::Sad,
        };
        let raw = serde_json::to_string(&draft).expect("serialize draft");
        assert_eq!(raw, r#"{"text":"Walked in the rain.","mood":"sad"}"#);
        let restored: DiaryDraft = serde_json::from_str(&raw).expect("parse draft");
        assert_eq!(restored, draft);
    }

    #[test]
    fn draft_without_mood_falls_back_to_default() {
        let restored: DiaryDraft =
            serde_json::from_str(r#"{"text":"old draft"}"#).expect("parse draft");
        assert_eq!(restored.mood, Mood::SoftSmile);
    }
}
