use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Female,
    Male,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HairLength {
    #[default]
    Long,
    Medium,
    Short,
}

/// The protagonist's look, persisted locally after character creation. The
/// server only keeps the portrait image; these discrete choices exist so
/// the creation screen can be re-entered with the previous selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterConfig {
    pub gender: Gender,
    pub hair_length: HairLength,
    pub has_glasses: bool,
    pub has_freckles: bool,
    pub image_url: String,
    pub s3_key: String,
}

pub trait CharacterStore {
    type Error;

    fn load_character(&self) -> Result<Option<CharacterConfig>, Self::Error>;
    fn persist_character(&self, character: &CharacterConfig) -> Result<(), Self::Error>;
}

/// Natural-language portrait prompt for the image generator. The wording is
/// part of the product: the generator is tuned against exactly this shape.
#[must_use]
pub fn build_portrait_prompt(
    gender: Gender,
    hair_length: HairLength,
    has_glasses: bool,
    has_freckles: bool,
) -> String {
    let gender_term = match gender {
        Gender::Female => "girl",
        Gender::Male => "boy",
    };
    let hair_term = match hair_length {
        HairLength::Long => "long hair",
        HairLength::Medium => "shoulder-length bob hair",
        HairLength::Short => "short pixie cut hair",
    };
    let glasses_term = if has_glasses { ", wearing glasses" } else { "" };
    let freckles_term = if has_freckles { ", with freckles" } else { "" };

    format!(
        "A cute cartoon character, {gender_term} with {hair_term}{glasses_term}{freckles_term}. \
         Simple, clean lines, flat colors, webtoon style. Single face portrait, close-up, \
         front view, face only. Solo character. NO body, NO full body, NO multiple views, \
         NO character sheet, NO split screen. Neutral background."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portrait_prompt_includes_selected_features() {
        let prompt = build_portrait_prompt(Gender::Female, HairLength::Medium, true, false);
        assert!(prompt.starts_with("A cute cartoon character, girl with shoulder-length bob hair"));
        assert!(prompt.contains(", wearing glasses"));
        assert!(!prompt.contains("freckles"));
        assert!(prompt.ends_with("Neutral background."));
    }

    #[test]
    fn portrait_prompt_omits_unselected_features() {
        let prompt = build_portrait_prompt(Gender::Male, HairLength::Short, false, true);
        assert!(prompt.contains("boy with short pixie cut hair, with freckles."));
        assert!(!prompt.contains("glasses"));
    }

    #[test]
    fn character_config_round_trips_through_stored_json() {
        let config = CharacterConfig {
            gender: Gender::Male,
            hair_length: HairLength::Medium,
            has_glasses: true,
            has_freckles: true,
            image_url: "https://bucket.s3.example.com/profiles/u1.png".to_string(),
            s3_key: "profiles/u1.png".to_string(),
        };
        let raw = serde_json::to_string(&config).expect("serialize character");
        let restored: CharacterConfig = serde_json::from_str(&raw).expect("parse character");
        assert_eq!(restored, config);
    }

    #[test]
    fn character_config_uses_the_stored_field_names() {
        let raw = r#"{
            "gender": "female",
            "hairLength": "long",
            "hasGlasses": false,
            "hasFreckles": false,
            "imageUrl": "https://bucket.s3.example.com/profiles/u2.png",
            "s3Key": "profiles/u2.png"
        }"#;
        let restored: CharacterConfig = serde_json::from_str(raw).expect("parse character");
        assert_eq!(restored.gender, Gender::Female);
        assert_eq!(restored.hair_length, HairLength::Long);
        assert_eq!(restored.s3_key, "profiles/u2.png");
    }
}
