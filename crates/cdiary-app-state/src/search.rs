use serde::Serialize;

/// Quiescence window before a search keystroke becomes a backend query.
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Row cap for the recent-artifacts listing.
pub const RECENT_FEED_LIMIT: u32 = 20;

/// The backend request a feed load resolves to. An empty (or whitespace)
/// query must use the recent listing, never the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FeedQuery {
    Recent { user_id: String, limit: u32 },
    Search { user_id: String, query: String },
}

#[must_use]
pub fn feed_query(user_id: &str, raw_query: &str) -> FeedQuery {
    let trimmed = raw_query.trim();
    if trimmed.is_empty() {
        FeedQuery::Recent {
            user_id: user_id.to_string(),
            limit: RECENT_FEED_LIMIT,
        }
    } else {
        FeedQuery::Search {
            user_id: user_id.to_string(),
            query: trimmed.to_string(),
        }
    }
}

/// Deadline-based debounce. The shell feeds it wall-clock milliseconds;
/// nothing here reads a clock, so the 500 ms contract is testable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchDebounce {
    pending: Option<PendingSearch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct PendingSearch {
    query: String,
    fire_at_ms: u64,
}

impl SearchDebounce {
    /// Every keystroke pushes the deadline out to `now + 500 ms`.
    pub fn note_input(&mut self, query: &str, now_ms: u64) {
        self.pending = Some(PendingSearch {
            query: query.to_string(),
            fire_at_ms: now_ms + SEARCH_DEBOUNCE_MS,
        });
    }

    /// Takes the pending query once its deadline has passed. At most one
    /// take per burst of keystrokes.
    pub fn take_due(&mut self, now_ms: u64) -> Option<String> {
        match &self.pending {
            Some(pending) if pending.fire_at_ms <= now_ms => {
                self.pending.take().map(|pending| pending.query)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_resolves_to_recent_listing() {
        assert_eq!(
            feed_query("u1", "   "),
            FeedQuery::Recent {
                user_id: "u1".to_string(),
                limit: RECENT_FEED_LIMIT,
            }
        );
    }

    #[test]
    fn non_empty_query_resolves_to_search() {
        assert_eq!(
            feed_query("u1", " bike "),
            FeedQuery::Search {
                user_id: "u1".to_string(),
                query: "bike".to_string(),
            }
        );
    }

    #[test]
    fn burst_of_keystrokes_fires_once_at_last_plus_window() {
        let mut debounce = SearchDebounce::default();
        debounce.note_input("b", 0);
        debounce.note_input("bi", 120);
        debounce.note_input("bik", 240);

        assert_eq!(debounce.take_due(500), None);
        assert_eq!(debounce.take_due(739), None);
        assert_eq!(debounce.take_due(740), Some("bik".to_string()));
        assert_eq!(debounce.take_due(9_999), None);
        assert!(debounce.is_idle());
    }

    #[test]
    fn quiescent_keystroke_fires_exactly_on_deadline() {
        let mut debounce = SearchDebounce::default();
        debounce.note_input("rain", 1_000);
        assert_eq!(debounce.take_due(1_499), None);
        assert_eq!(debounce.take_due(1_500), Some("rain".to_string()));
    }
}
