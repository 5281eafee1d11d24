//! Shared client core for the cartoon-diary app.
//!
//! Everything here is platform-agnostic: the wasm web shell and the native
//! API client both consume these wire schemas, validation rules, persisted
//! state types, and storage traits. Nothing in this crate performs I/O.

pub mod character;
pub mod config;
pub mod draft;
pub mod input;
pub mod locale;
pub mod session;
pub mod types;

/// localStorage keys. The names are load-bearing: they must keep matching
/// what earlier releases of the web client wrote.
pub mod storage_keys {
    pub const TOKEN: &str = "token";
    pub const USER_ID: &str = "userId";
    pub const LANGUAGE: &str = "language";
    pub const DRAFT_DIARY: &str = "draftDiary";
    pub const USER_CHARACTER: &str = "user_character";
}
