use serde::Serialize;

use cdiary_client_core::draft::{DiaryDraft, Mood};
use cdiary_client_core::input;
use cdiary_client_core::locale::{self, Language, MessageKey};
use cdiary_client_core::session::SessionState;
use cdiary_client_core::types::{
    ArtifactDetail, ArtifactSummary, DiaryEntryRequest, JobSnapshot, JobSnapshotMap, StylePreset,
};

use crate::feed::HomeFeedState;
use crate::flow::{self, GeneratePhase, PollVerdict};
use crate::route::{AppRoute, resolve_navigation};
use crate::search::{FeedQuery, feed_query};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub route: AppRoute,
    pub session: Option<SessionState>,
    pub language: Language,
    pub feed: HomeFeedState,
    pub generate: GeneratePhase,
}

impl AppState {
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.user_id.as_str())
    }

    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    Navigate { route: AppRoute },
    SessionEstablished { session: SessionState },
    SessionCleared,
    LanguageChanged { language: Language },

    FeedLoaded { items: Vec<ArtifactSummary> },
    FeedLoadFailed,
    ArtifactRemoved { artifact_id: String },
    JobStreamFrame { jobs: JobSnapshotMap },
    SearchInput { query: String, now_ms: u64 },
    SearchTimerFired { now_ms: u64 },

    DraftAdvanced { text: String, mood: Mood },
    StyleConfirmed { style: StylePreset },
    GenerationAccepted { job_id: String },
    GenerationRejected,
    JobPolled { snapshot: JobSnapshot },
    RegenerateRequested { detail: ArtifactDetail },
}

/// Side effects the shell must execute after a reduction. The reducer never
/// performs them itself.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEffect {
    LoadFeed { query: FeedQuery, show_loading: bool },
    PersistDraft { draft: DiaryDraft },
    BeginGeneration { request: DiaryEntryRequest },
    Alert { message: String },
}

pub fn apply_action(state: &mut AppState, action: AppAction) -> Vec<AppEffect> {
    match action {
        AppAction::Navigate { route } => {
            let resolved = resolve_navigation(route, state.has_session());
            enter_route(state, resolved)
        }
        AppAction::SessionEstablished { session } => {
            state.session = Some(session);
            Vec::new()
        }
        AppAction::SessionCleared => {
            state.session = None;
            state.feed = HomeFeedState::default();
            state.generate = GeneratePhase::default();
            Vec::new()
        }
        AppAction::LanguageChanged { language } => {
            state.language = language;
            Vec::new()
        }

        AppAction::FeedLoaded { items } => {
            state.feed.artifacts = items;
            state.feed.loading = false;
            Vec::new()
        }
        AppAction::FeedLoadFailed => {
            state.feed.loading = false;
            Vec::new()
        }
        AppAction::ArtifactRemoved { artifact_id } => {
            state.feed.remove_artifact(&artifact_id);
            Vec::new()
        }
        AppAction::JobStreamFrame { jobs } => {
            let newly_done = state.feed.absorb_snapshot(jobs);
            if !newly_done {
                return Vec::new();
            }
            let Some(user_id) = state.user_id() else {
                return Vec::new();
            };
            // Silent refresh: the finished strip replaces its progress row
            // without a loading flash.
            vec![AppEffect::LoadFeed {
                query: feed_query(user_id, &state.feed.search_input),
                show_loading: false,
            }]
        }
        AppAction::SearchInput { query, now_ms } => {
            state.feed.search_input = query.clone();
            state.feed.debounce.note_input(&query, now_ms);
            Vec::new()
        }
        AppAction::SearchTimerFired { now_ms } => {
            let Some(raw_query) = state.feed.debounce.take_due(now_ms) else {
                return Vec::new();
            };
            let Some(user_id) = state.user_id() else {
                return Vec::new();
            };
            let query = feed_query(user_id, &raw_query);
            state.feed.loading = true;
            vec![AppEffect::LoadFeed {
                query,
                show_loading: true,
            }]
        }

        AppAction::DraftAdvanced { text, mood } => {
            if input::validate_diary_text(&text).is_err() {
                return Vec::new();
            }
            let draft = DiaryDraft { text, mood };
            state.generate = GeneratePhase::ChoosingStyle {
                draft: draft.clone(),
            };
            vec![AppEffect::PersistDraft { draft }]
        }
        AppAction::StyleConfirmed { style } => {
            let GeneratePhase::ChoosingStyle { draft } = &state.generate else {
                return Vec::new();
            };
            let draft = draft.clone();
            let request = flow::generation_request(&draft, style);
            state.generate = GeneratePhase::Submitting { draft, style };
            vec![AppEffect::BeginGeneration { request }]
        }
        AppAction::GenerationAccepted { job_id } => {
            state.generate = GeneratePhase::Polling {
                job_id: job_id.clone(),
                last: None,
            };
            state.route = AppRoute::Generate { job_id };
            Vec::new()
        }
        AppAction::GenerationRejected => {
            let message = alert_text(state.language, MessageKey::GenStartFailed);
            if let GeneratePhase::Submitting { draft, .. } = &state.generate {
                state.generate = GeneratePhase::ChoosingStyle {
                    draft: draft.clone(),
                };
            }
            vec![AppEffect::Alert { message }]
        }
        AppAction::JobPolled { snapshot } => {
            let GeneratePhase::Polling { job_id, .. } = &state.generate else {
                return Vec::new();
            };
            if *job_id != snapshot.job_id {
                // Stale response from a job this screen no longer owns.
                return Vec::new();
            }
            match flow::assess_poll(&snapshot) {
                PollVerdict::Continue => {
                    state.generate = GeneratePhase::Polling {
                        job_id: snapshot.job_id.clone(),
                        last: Some(snapshot),
                    };
                    Vec::new()
                }
                PollVerdict::Complete { artifact_id } => {
                    state.generate = GeneratePhase::Done {
                        artifact_id: artifact_id.clone(),
                    };
                    state.route = AppRoute::Result { artifact_id };
                    Vec::new()
                }
                PollVerdict::Failed { error } => {
                    state.generate = GeneratePhase::Failed;
                    let message = error
                        .unwrap_or_else(|| alert_text(state.language, MessageKey::GenerationFailed));
                    let mut effects = vec![AppEffect::Alert { message }];
                    effects.extend(enter_route(state, AppRoute::Home));
                    effects
                }
            }
        }
        AppAction::RegenerateRequested { detail } => {
            let request = flow::regeneration_request(&detail);
            state.generate = GeneratePhase::Submitting {
                draft: DiaryDraft {
                    text: request.diary_text.clone(),
                    mood: request.mood,
                },
                style: request.style_preset,
            };
            vec![AppEffect::BeginGeneration { request }]
        }
    }
}

/// Apply a resolved route, with per-screen mount state. Home gets a fresh
/// feed (the acknowledged-done set included) exactly as a remount would.
fn enter_route(state: &mut AppState, route: AppRoute) -> Vec<AppEffect> {
    state.route = route;
    match &state.route {
        AppRoute::Home => {
            let Some(user_id) = state.user_id() else {
                return Vec::new();
            };
            let query = feed_query(user_id, "");
            state.feed = HomeFeedState {
                loading: true,
                ..HomeFeedState::default()
            };
            vec![AppEffect::LoadFeed {
                query,
                show_loading: true,
            }]
        }
        AppRoute::Write => {
            state.generate = GeneratePhase::Drafting;
            Vec::new()
        }
        AppRoute::Generate { job_id } => {
            // Direct entry (deep link, reload) still has to poll this job.
            let already = matches!(
                &state.generate,
                GeneratePhase::Polling { job_id: current, .. } if current == job_id
            );
            if !already {
                state.generate = GeneratePhase::Polling {
                    job_id: job_id.clone(),
                    last: None,
                };
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn alert_text(language: Language, key: MessageKey) -> String {
    locale::text(language, key).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdiary_client_core::types::JobStatus;
    use crate::search::RECENT_FEED_LIMIT;

    fn signed_in_state() -> AppState {
        AppState {
            session: Some(SessionState::new("tok", "u1")),
            ..AppState::default()
        }
    }

    fn stream_frame(job_id: &str, status: JobStatus, artifact_id: Option<&str>) -> JobSnapshotMap {
        let snapshot = JobSnapshot {
            job_id: job_id.to_string(),
            status,
            step: String::new(),
            progress: 10.0,
            artifact_id: artifact_id.map(ToString::to_string),
            error: None,
        };
        [(job_id.to_string(), snapshot)].into_iter().collect()
    }

    #[test]
    fn protected_navigation_without_session_lands_on_sign_in() {
        let mut state = AppState::default();
        let effects = apply_action(
            &mut state,
            AppAction::Navigate {
                route: AppRoute::Write,
            },
        );
        assert_eq!(state.route, AppRoute::SignIn);
        assert!(effects.is_empty());
    }

    #[test]
    fn root_with_session_redirects_home_and_loads_recent() {
        let mut state = signed_in_state();
        let effects = apply_action(
            &mut state,
            AppAction::Navigate {
                route: AppRoute::Landing,
            },
        );
        assert_eq!(state.route, AppRoute::Home);
        assert!(state.feed.loading);
        assert_eq!(
            effects,
            vec![AppEffect::LoadFeed {
                query: FeedQuery::Recent {
                    user_id: "u1".to_string(),
                    limit: RECENT_FEED_LIMIT,
                },
                show_loading: true,
            }]
        );
    }

    #[test]
    fn short_draft_produces_no_effects_and_no_transition() {
        let mut state = signed_in_state();
        state.route = AppRoute::Write;
        let effects = apply_action(
            &mut state,
            AppAction::DraftAdvanced {
                text: "hey".to_string(),
                mood: Mood::SoftSmile,
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state.generate, GeneratePhase::Drafting);
    }

    #[test]
    fn valid_draft_persists_and_moves_to_style_choice() {
        let mut state = signed_in_state();
        state.route = AppRoute::Write;
        let effects = apply_action(
            &mut state,
            AppAction::DraftAdvanced {
                text: "Rode my bike to the river.".to_string(),
                mood: Mood::VeryHappy,
            },
        );
        assert!(matches!(
            state.generate,
            GeneratePhase::ChoosingStyle { .. }
        ));
        assert!(matches!(effects.as_slice(), [AppEffect::PersistDraft { .. }]));
    }

    #[test]
    fn style_confirmation_plans_the_generation_call() {
        let mut state = signed_in_state();
        apply_action(
            &mut state,
            AppAction::DraftAdvanced {
                text: "Rode my bike to the river.".to_string(),
                mood: Mood::VeryHappy,
            },
        );
        let effects = apply_action(
            &mut state,
            AppAction::StyleConfirmed {
                style: StylePreset::Comedy,
            },
        );
        let [AppEffect::BeginGeneration { request }] = effects.as_slice() else {
            panic!("expected a BeginGeneration effect, got {effects:?}");
        };
        assert_eq!(request.style_preset, StylePreset::Comedy);
        assert_eq!(request.mood, Mood::VeryHappy);
    }

    #[test]
    fn style_confirmation_without_a_draft_is_ignored() {
        let mut state = signed_in_state();
        let effects = apply_action(
            &mut state,
            AppAction::StyleConfirmed {
                style: StylePreset::Cute,
            },
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn done_job_refreshes_the_feed_at_most_once() {
        let mut state = signed_in_state();
        apply_action(
            &mut state,
            AppAction::Navigate {
                route: AppRoute::Home,
            },
        );

        let running = stream_frame("j1", JobStatus::GeneratingImages, Some("A1"));
        assert!(apply_action(&mut state, AppAction::JobStreamFrame { jobs: running }).is_empty());

        let done = stream_frame("j1", JobStatus::Done, Some("A1"));
        let effects = apply_action(
            &mut state,
            AppAction::JobStreamFrame { jobs: done.clone() },
        );
        assert_eq!(
            effects,
            vec![AppEffect::LoadFeed {
                query: FeedQuery::Recent {
                    user_id: "u1".to_string(),
                    limit: RECENT_FEED_LIMIT,
                },
                show_loading: false,
            }]
        );

        for _ in 0..3 {
            let repeat = apply_action(
                &mut state,
                AppAction::JobStreamFrame { jobs: done.clone() },
            );
            assert!(repeat.is_empty());
        }
    }

    #[test]
    fn keystroke_burst_queries_once_after_the_window() {
        let mut state = signed_in_state();
        apply_action(
            &mut state,
            AppAction::Navigate {
                route: AppRoute::Home,
            },
        );

        for (query, at) in [("b", 0_u64), ("bi", 150), ("bik", 300)] {
            let effects = apply_action(
                &mut state,
                AppAction::SearchInput {
                    query: query.to_string(),
                    now_ms: at,
                },
            );
            assert!(effects.is_empty());
        }

        // A timer from an earlier keystroke fires before the final deadline.
        assert!(apply_action(&mut state, AppAction::SearchTimerFired { now_ms: 500 }).is_empty());

        let effects = apply_action(&mut state, AppAction::SearchTimerFired { now_ms: 800 });
        assert_eq!(
            effects,
            vec![AppEffect::LoadFeed {
                query: FeedQuery::Search {
                    user_id: "u1".to_string(),
                    query: "bik".to_string(),
                },
                show_loading: true,
            }]
        );

        assert!(apply_action(&mut state, AppAction::SearchTimerFired { now_ms: 900 }).is_empty());
    }

    #[test]
    fn empty_search_uses_the_recent_listing() {
        let mut state = signed_in_state();
        apply_action(
            &mut state,
            AppAction::Navigate {
                route: AppRoute::Home,
            },
        );
        apply_action(
            &mut state,
            AppAction::SearchInput {
                query: "  ".to_string(),
                now_ms: 0,
            },
        );
        let effects = apply_action(&mut state, AppAction::SearchTimerFired { now_ms: 500 });
        assert_eq!(
            effects,
            vec![AppEffect::LoadFeed {
                query: FeedQuery::Recent {
                    user_id: "u1".to_string(),
                    limit: RECENT_FEED_LIMIT,
                },
                show_loading: true,
            }]
        );
    }

    #[test]
    fn failed_poll_alerts_and_returns_home() {
        let mut state = signed_in_state();
        apply_action(
            &mut state,
            AppAction::GenerationAccepted {
                job_id: "j1".to_string(),
            },
        );
        assert_eq!(
            state.route,
            AppRoute::Generate {
                job_id: "j1".to_string()
            }
        );

        let effects = apply_action(
            &mut state,
            AppAction::JobPolled {
                snapshot: JobSnapshot {
                    job_id: "j1".to_string(),
                    status: JobStatus::Failed,
                    step: String::new(),
                    progress: 0.0,
                    artifact_id: None,
                    error: None,
                },
            },
        );
        assert_eq!(state.route, AppRoute::Home);
        assert!(matches!(
            effects.as_slice(),
            [AppEffect::Alert { .. }, AppEffect::LoadFeed { .. }]
        ));
    }

    #[test]
    fn completed_poll_routes_to_the_result() {
        let mut state = signed_in_state();
        apply_action(
            &mut state,
            AppAction::GenerationAccepted {
                job_id: "j1".to_string(),
            },
        );
        let effects = apply_action(
            &mut state,
            AppAction::JobPolled {
                snapshot: JobSnapshot {
                    job_id: "j1".to_string(),
                    status: JobStatus::Done,
                    step: "done".to_string(),
                    progress: 100.0,
                    artifact_id: Some("A1".to_string()),
                    error: None,
                },
            },
        );
        assert!(effects.is_empty());
        assert_eq!(
            state.route,
            AppRoute::Result {
                artifact_id: "A1".to_string()
            }
        );
    }

    #[test]
    fn deep_link_to_the_generating_screen_starts_polling() {
        let mut state = signed_in_state();
        let effects = apply_action(
            &mut state,
            AppAction::Navigate {
                route: AppRoute::Generate {
                    job_id: "j1".to_string(),
                },
            },
        );
        assert!(effects.is_empty());
        assert_eq!(
            state.generate,
            GeneratePhase::Polling {
                job_id: "j1".to_string(),
                last: None,
            }
        );

        // The snapshot a deep-linked screen polls is not discarded.
        let effects = apply_action(
            &mut state,
            AppAction::JobPolled {
                snapshot: JobSnapshot {
                    job_id: "j1".to_string(),
                    status: JobStatus::Done,
                    step: "done".to_string(),
                    progress: 100.0,
                    artifact_id: Some("A1".to_string()),
                    error: None,
                },
            },
        );
        assert!(effects.is_empty());
        assert_eq!(
            state.route,
            AppRoute::Result {
                artifact_id: "A1".to_string()
            }
        );
    }

    #[test]
    fn stale_poll_for_another_job_is_a_no_op() {
        let mut state = signed_in_state();
        apply_action(
            &mut state,
            AppAction::GenerationAccepted {
                job_id: "j2".to_string(),
            },
        );
        let before = state.clone();
        let effects = apply_action(
            &mut state,
            AppAction::JobPolled {
                snapshot: JobSnapshot {
                    job_id: "j1".to_string(),
                    status: JobStatus::Failed,
                    step: String::new(),
                    progress: 0.0,
                    artifact_id: None,
                    error: None,
                },
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn clearing_the_session_resets_screen_state() {
        let mut state = signed_in_state();
        apply_action(
            &mut state,
            AppAction::Navigate {
                route: AppRoute::Home,
            },
        );
        apply_action(&mut state, AppAction::SessionCleared);
        assert!(state.session.is_none());
        assert_eq!(state.feed, HomeFeedState::default());
        assert_eq!(state.generate, GeneratePhase::Drafting);
    }
}
