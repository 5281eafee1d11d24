//! Per-screen scratch state that never leaves the shell: form inputs,
//! previews, and load results for surfaces the reducer does not own.

use cdiary_client_core::character::{Gender, HairLength};
use cdiary_client_core::draft::Mood;
use cdiary_client_core::types::{ArtifactDetail, StylePreset, UserProfile};

/// Write screen inputs, mirrored from the DOM so a re-render does not lose
/// the text mid-typing.
#[derive(Debug, Clone)]
pub(crate) struct WriteSurfaceState {
    pub(crate) text: String,
    pub(crate) mood: Mood,
    pub(crate) style: StylePreset,
}

impl Default for WriteSurfaceState {
    fn default() -> Self {
        Self {
            text: String::new(),
            mood: Mood::default(),
            style: StylePreset::Cute,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct AuthSurfaceState {
    pub(crate) error: Option<String>,
    pub(crate) submitting: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CharacterSurfaceState {
    pub(crate) gender: Gender,
    pub(crate) hair_length: HairLength,
    pub(crate) has_glasses: bool,
    pub(crate) has_freckles: bool,
    /// Freshly generated portrait as a data URL, before it is saved.
    pub(crate) preview: Option<String>,
    pub(crate) generating: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ProfileSurfaceState {
    pub(crate) profile: Option<UserProfile>,
    pub(crate) loading: bool,
    pub(crate) editing: bool,
    pub(crate) regenerating: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ResultSurfaceState {
    pub(crate) artifact_id: Option<String>,
    pub(crate) detail: Option<ArtifactDetail>,
    pub(crate) loading: bool,
}
