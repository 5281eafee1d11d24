use thiserror::Error;

/// Minimum trimmed length of a diary entry before generation may start.
pub const MIN_DIARY_TEXT_CHARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("base url must not be empty")]
    EmptyBaseUrl,
    #[error("base url must use http:// or https:// and include a host")]
    InvalidBaseUrl,
    #[error("diary text must contain at least {MIN_DIARY_TEXT_CHARS} characters")]
    DiaryTextTooShort,
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Whether the draft text clears the minimum-length gate. Screens use this
/// to disable the next action without raising an error.
#[must_use]
pub fn diary_text_ready(text: &str) -> bool {
    text.trim().chars().count() >= MIN_DIARY_TEXT_CHARS
}

pub fn validate_diary_text(text: &str) -> Result<(), InputError> {
    if diary_text_ready(text) {
        Ok(())
    } else {
        Err(InputError::DiaryTextTooShort)
    }
}

pub fn normalize_username(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyUsername);
    }
    Ok(trimmed.to_string())
}

pub fn validate_password(raw: &str) -> Result<(), InputError> {
    if raw.is_empty() {
        return Err(InputError::EmptyPassword);
    }
    Ok(())
}

/// Registration-only check; it runs before any network call.
pub fn validate_password_confirmation(password: &str, confirm: &str) -> Result<(), InputError> {
    if password != confirm {
        return Err(InputError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diary_text_gate_counts_trimmed_chars() {
        assert!(!diary_text_ready(""));
        assert!(!diary_text_ready("  hi  "));
        assert!(!diary_text_ready("abcd"));
        assert!(diary_text_ready("abcde"));
        assert!(diary_text_ready("  five!  "));
    }

    #[test]
    fn diary_text_gate_counts_characters_not_bytes() {
        // Five hangul syllables are fifteen bytes but still pass the gate.
        assert!(diary_text_ready("오늘의 일기"));
        assert!(!diary_text_ready("오늘"));
    }

    #[test]
    fn validate_diary_text_rejects_short_input() {
        assert_eq!(
            validate_diary_text("hey"),
            Err(InputError::DiaryTextTooShort)
        );
        assert_eq!(validate_diary_text("long enough"), Ok(()));
    }

    #[test]
    fn username_is_trimmed_and_required() {
        assert_eq!(normalize_username("  dana  "), Ok("dana".to_string()));
        assert_eq!(normalize_username("   "), Err(InputError::EmptyUsername));
    }

    #[test]
    fn password_confirmation_must_match() {
        assert_eq!(
            validate_password_confirmation("a", "b"),
            Err(InputError::PasswordMismatch)
        );
        assert_eq!(validate_password_confirmation("same", "same"), Ok(()));
    }
}
