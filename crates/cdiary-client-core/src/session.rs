use serde::{Deserialize, Serialize};

/// Authenticated session as the client persists it: a bearer token plus the
/// user id it was minted for. There is no client-side expiry; a present
/// token is treated as valid until the backend rejects a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub token: String,
    pub user_id: String,
}

impl SessionState {
    #[must_use]
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
        }
    }
}

pub trait SessionStore {
    type Error;

    fn load_session(&self) -> Result<Option<SessionState>, Self::Error>;
    fn persist_session(&self, session: &SessionState) -> Result<(), Self::Error>;
    fn clear_session(&self) -> Result<(), Self::Error>;
}
