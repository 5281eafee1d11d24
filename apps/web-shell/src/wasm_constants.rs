pub(crate) const APP_ROOT_ID: &str = "cdiary-shell-root";
pub(crate) const APP_STYLE_ID: &str = "cdiary-shell-style";
pub(crate) const BOOT_STATUS_ID: &str = "cdiary-shell-status";

pub(crate) const SEARCH_INPUT_ID: &str = "cdiary-home-search";
pub(crate) const FEED_LIST_ID: &str = "cdiary-home-feed";

pub(crate) const SIGNIN_USERNAME_ID: &str = "cdiary-signin-username";
pub(crate) const SIGNIN_PASSWORD_ID: &str = "cdiary-signin-password";
pub(crate) const SIGNUP_USERNAME_ID: &str = "cdiary-signup-username";
pub(crate) const SIGNUP_EMAIL_ID: &str = "cdiary-signup-email";
pub(crate) const SIGNUP_PASSWORD_ID: &str = "cdiary-signup-password";
pub(crate) const SIGNUP_CONFIRM_ID: &str = "cdiary-signup-confirm";

pub(crate) const WRITE_TEXT_ID: &str = "cdiary-write-text";
pub(crate) const WRITE_COUNT_ID: &str = "cdiary-write-count";
pub(crate) const WRITE_NEXT_ID: &str = "cdiary-write-next";

pub(crate) const PROFILE_USERNAME_INPUT_ID: &str = "cdiary-profile-username";

/// Global override hook for the API base URL, read once at boot.
pub(crate) const API_BASE_GLOBAL: &str = "__CDIARY_API_BASE__";

pub(crate) const JOB_POLL_INTERVAL_MS: u64 = cdiary_app_state::flow::JOB_POLL_INTERVAL_MS;
pub(crate) const SEARCH_DEBOUNCE_MS: u64 = cdiary_app_state::search::SEARCH_DEBOUNCE_MS;
pub(crate) const STREAM_RECONNECT_DELAY_MS: u64 = 3_000;
