use crate::input::InputError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5050/api";
pub const ENV_API_BASE_URL: &str = "CDIARY_API_BASE_URL";

/// Resolve the backend base URL: the environment override wins, else the
/// local development default. The second element labels the source for
/// diagnostics.
pub fn resolve_api_base_url() -> Result<(String, &'static str), InputError> {
    if let Some(base_url) = env_non_empty(ENV_API_BASE_URL) {
        return normalize_base_url(&base_url).map(|normalized| (normalized, ENV_API_BASE_URL));
    }
    normalize_base_url(DEFAULT_API_BASE_URL).map(|normalized| (normalized, "default_local"))
}

pub fn normalize_base_url(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(InputError::EmptyBaseUrl);
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(InputError::InvalidBaseUrl);
    }
    let Some((_, remainder)) = trimmed.split_once("://") else {
        return Err(InputError::InvalidBaseUrl);
    };
    if remainder.trim().is_empty() || remainder.starts_with('/') {
        return Err(InputError::InvalidBaseUrl);
    }
    Ok(trimmed.to_string())
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn with_env<T>(value: Option<&str>, test: impl FnOnce() -> T) -> T {
        let lock = ENV_LOCK.get_or_init(|| Mutex::new(()));
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let previous = std::env::var(ENV_API_BASE_URL).ok();

        if let Some(value) = value {
            unsafe { std::env::set_var(ENV_API_BASE_URL, value) };
        } else {
            unsafe { std::env::remove_var(ENV_API_BASE_URL) };
        }

        let result = test();

        if let Some(value) = previous {
            unsafe { std::env::set_var(ENV_API_BASE_URL, value) };
        } else {
            unsafe { std::env::remove_var(ENV_API_BASE_URL) };
        }

        result
    }

    #[test]
    fn normalize_base_url_trims_and_drops_trailing_slash() {
        let normalized = normalize_base_url(" http://localhost:5050/api/ ").expect("valid url");
        assert_eq!(normalized, "http://localhost:5050/api");
    }

    #[test]
    fn normalize_base_url_requires_http_scheme() {
        let error = normalize_base_url("localhost:5050").expect_err("expected invalid url");
        assert_eq!(error, InputError::InvalidBaseUrl);
    }

    #[test]
    fn normalize_base_url_rejects_empty_host() {
        let error = normalize_base_url("http:///api").expect_err("expected invalid url");
        assert_eq!(error, InputError::InvalidBaseUrl);
    }

    #[test]
    fn resolve_defaults_to_local_dev_address() {
        with_env(None, || {
            let (resolved, source) = resolve_api_base_url().expect("default url");
            assert_eq!(resolved, DEFAULT_API_BASE_URL);
            assert_eq!(source, "default_local");
        });
    }

    #[test]
    fn resolve_prefers_env_override() {
        with_env(Some("https://diary.example.com/api/"), || {
            let (resolved, source) = resolve_api_base_url().expect("env url");
            assert_eq!(resolved, "https://diary.example.com/api");
            assert_eq!(source, ENV_API_BASE_URL);
        });
    }
}
