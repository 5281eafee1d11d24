use super::*;

    /// localStorage-backed implementation of the client-core storage
    /// traits. Reads and writes are synchronous; last write wins.
    pub(crate) struct BrowserStore;

    fn local_storage() -> Result<web_sys::Storage, String> {
        let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
        window
            .local_storage()
            .map_err(|_| "failed to access local storage".to_string())?
            .ok_or_else(|| "local storage is unavailable".to_string())
    }

    fn read_key(key: &str) -> Result<Option<String>, String> {
        local_storage()?
            .get_item(key)
            .map_err(|_| format!("failed to read {key} from local storage"))
    }

    fn write_key(key: &str, value: &str) -> Result<(), String> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| format!("failed to write {key} to local storage"))
    }

    fn remove_key(key: &str) -> Result<(), String> {
        local_storage()?
            .remove_item(key)
            .map_err(|_| format!("failed to remove {key} from local storage"))
    }

    impl SessionStore for BrowserStore {
        type Error = String;

        fn load_session(&self) -> Result<Option<SessionState>, String> {
            let token = read_key(storage_keys::TOKEN)?;
            let user_id = read_key(storage_keys::USER_ID)?;
            match (token, user_id) {
                (Some(token), Some(user_id)) if !token.is_empty() && !user_id.is_empty() => {
                    Ok(Some(SessionState { token, user_id }))
                }
                _ => Ok(None),
            }
        }

        fn persist_session(&self, session: &SessionState) -> Result<(), String> {
            write_key(storage_keys::TOKEN, &session.token)?;
            write_key(storage_keys::USER_ID, &session.user_id)
        }

        fn clear_session(&self) -> Result<(), String> {
            remove_key(storage_keys::TOKEN)?;
            remove_key(storage_keys::USER_ID)
        }
    }

    impl DraftStore for BrowserStore {
        type Error = String;

        fn load_draft(&self) -> Result<Option<DiaryDraft>, String> {
            let Some(raw) = read_key(storage_keys::DRAFT_DIARY)? else {
                return Ok(None);
            };
            match serde_json::from_str(&raw) {
                Ok(draft) => Ok(Some(draft)),
                Err(error) => {
                    // A corrupt draft is not worth failing the screen over.
                    console_warn(&format!("stored draft is unreadable: {error}"));
                    Ok(None)
                }
            }
        }

        fn persist_draft(&self, draft: &DiaryDraft) -> Result<(), String> {
            let raw = serde_json::to_string(draft)
                .map_err(|error| format!("failed to encode draft: {error}"))?;
            write_key(storage_keys::DRAFT_DIARY, &raw)
        }
    }

    impl CharacterStore for BrowserStore {
        type Error = String;

        fn load_character(&self) -> Result<Option<CharacterConfig>, String> {
            let Some(raw) = read_key(storage_keys::USER_CHARACTER)? else {
                return Ok(None);
            };
            match serde_json::from_str(&raw) {
                Ok(character) => Ok(Some(character)),
                Err(error) => {
                    console_warn(&format!("stored character is unreadable: {error}"));
                    Ok(None)
                }
            }
        }

        fn persist_character(&self, character: &CharacterConfig) -> Result<(), String> {
            let raw = serde_json::to_string(character)
                .map_err(|error| format!("failed to encode character: {error}"))?;
            write_key(storage_keys::USER_CHARACTER, &raw)
        }
    }

    pub(super) fn load_language() -> Language {
        read_key(storage_keys::LANGUAGE)
            .ok()
            .flatten()
            .as_deref()
            .and_then(Language::parse)
            .unwrap_or_default()
    }

    pub(super) fn persist_language(language: Language) {
        if let Err(error) = write_key(storage_keys::LANGUAGE, language.as_str()) {
            console_warn(&error);
        }
    }

    /// Account deletion wipes every key, matching the sign-out-everywhere
    /// behavior users expect from a withdrawal.
    pub(super) fn clear_all_storage() {
        match local_storage() {
            Ok(storage) => {
                let _ = storage.clear();
            }
            Err(error) => console_warn(&error),
        }
    }
