//! Rust/WASM entrypoint for the cartoon-diary web client.
//!
//! State transitions live in `cdiary-app-state`; this crate owns the
//! browser: DOM rendering, history, localStorage, fetches, the job stream,
//! and the timers that drive polling and search debounce.

#[cfg(target_arch = "wasm32")]
mod wasm_constants;
#[cfg(target_arch = "wasm32")]
mod wasm_state;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    use gloo_net::http::Request;
    use gloo_timers::future::sleep;
    use wasm_bindgen::prelude::{Closure, wasm_bindgen};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{
        Document, EventSource, HtmlAnchorElement, HtmlElement, HtmlInputElement,
        HtmlTextAreaElement, MessageEvent, MouseEvent,
    };

    use cdiary_app_state::feed::{RowPresentation, row_presentation};
    use cdiary_app_state::flow::GeneratePhase;
    use cdiary_app_state::route::is_shell_route_path;
    use cdiary_app_state::search::FeedQuery;
    use cdiary_app_state::{AppAction, AppEffect, AppRoute, AppState, apply_action};
    use cdiary_client_core::character::{
        CharacterConfig, CharacterStore, Gender, HairLength, build_portrait_prompt,
    };
    use cdiary_client_core::draft::{DiaryDraft, DraftStore, Mood};
    use cdiary_client_core::locale::{self, Language, MessageKey};
    use cdiary_client_core::session::{SessionState, SessionStore};
    use cdiary_client_core::types::{
        ArtifactDetail, ArtifactListing, ArtifactSummary, DiaryEntryRequest, GenerateAccepted,
        GeneratedImage, ImageGenerationRequest, JobSnapshot, JobSnapshotMap, LoginRequest,
        RegisterRequest, SaveProfileImageRequest, SavedProfileImage, StatusMessage, StylePreset,
        TokenResponse, UserProfile, UserUpdateRequest, UserUpdated,
    };
    use cdiary_client_core::{config, input, storage_keys};

    use crate::wasm_constants::*;
    use crate::wasm_state::{
        AuthSurfaceState, CharacterSurfaceState, ProfileSurfaceState, ResultSurfaceState,
        WriteSurfaceState,
    };

    mod dom;
    mod lifecycle;
    mod network;
    mod routing;
    mod storage;
    mod stream;

    use dom::*;
    use lifecycle::*;
    use network::*;
    use routing::*;
    use storage::*;
    use stream::*;

    thread_local! {
        static APP_STATE: RefCell<AppState> = RefCell::new(AppState::default());
        static API_BASE_URL: RefCell<String> = RefCell::new(String::new());

        static WRITE_SURFACE: RefCell<WriteSurfaceState> = RefCell::new(WriteSurfaceState::default());
        static AUTH_SURFACE: RefCell<AuthSurfaceState> = RefCell::new(AuthSurfaceState::default());
        static CHARACTER_SURFACE: RefCell<CharacterSurfaceState> = RefCell::new(CharacterSurfaceState::default());
        static PROFILE_SURFACE: RefCell<ProfileSurfaceState> = RefCell::new(ProfileSurfaceState::default());
        static RESULT_SURFACE: RefCell<ResultSurfaceState> = RefCell::new(ResultSurfaceState::default());

        static JOB_STREAM: RefCell<Option<EventSource>> = const { RefCell::new(None) };
        static STREAM_MESSAGE_HANDLER: RefCell<Option<Closure<dyn FnMut(MessageEvent)>>> = const { RefCell::new(None) };
        static STREAM_ERROR_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static RETIRED_MESSAGE_HANDLERS: RefCell<Vec<Closure<dyn FnMut(MessageEvent)>>> = const { RefCell::new(Vec::new()) };
        static RETIRED_ERROR_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(Vec::new()) };
        static STREAM_EPOCH: Cell<u64> = const { Cell::new(0) };

        static POLL_EPOCH: Cell<u64> = const { Cell::new(0) };
        static CURRENT_POLL_JOB: RefCell<Option<String>> = const { RefCell::new(None) };
        static GENERATION_IN_FLIGHT: Cell<bool> = const { Cell::new(false) };

        static ROUTE_POPSTATE_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static ROUTE_LINK_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static ACTION_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static GLOBAL_INPUT_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        spawn_local(async {
            if let Err(error) = boot().await {
                set_boot_error(&error);
            }
        });
    }

    #[wasm_bindgen]
    pub fn app_state_json() -> String {
        APP_STATE.with(|state| {
            serde_json::to_string(&*state.borrow()).unwrap_or_else(|_| "{}".to_string())
        })
    }

    #[wasm_bindgen]
    pub fn navigate(path: String) {
        let route = AppRoute::from_path_or_landing(&path);
        apply_route_transition(route, true);
    }

    #[wasm_bindgen]
    pub fn sign_out() {
        perform_sign_out();
    }

    #[wasm_bindgen]
    pub fn set_language(code: String) {
        if let Some(language) = Language::parse(&code) {
            persist_language(language);
            dispatch(AppAction::LanguageChanged { language });
        }
    }

    async fn boot() -> Result<(), String> {
        ensure_app_dom()?;
        set_boot_phase("booting", "restoring session");

        let base = resolve_shell_api_base();
        API_BASE_URL.with(|slot| *slot.borrow_mut() = base);

        let session = match BrowserStore.load_session() {
            Ok(session) => session,
            Err(error) => {
                console_warn(&error);
                None
            }
        };
        let language = load_language();
        APP_STATE.with(|state| {
            let mut state = state.borrow_mut();
            state.session = session;
            state.language = language;
        });

        install_browser_navigation_handlers();
        install_global_action_handlers();

        let route = AppRoute::from_path_or_landing(&current_pathname());
        apply_route_transition(route, false);
        set_boot_phase("ready", "shell interactive");
        Ok(())
    }

    pub(crate) fn snapshot_state() -> AppState {
        APP_STATE.with(|state| state.borrow().clone())
    }

    fn current_language() -> Language {
        APP_STATE.with(|state| state.borrow().language)
    }

    fn current_user_id() -> Option<String> {
        APP_STATE.with(|state| state.borrow().user_id().map(ToString::to_string))
    }

    /// Reduce, then execute whatever the reducer asked for. Rendering is
    /// skipped when nothing observable changed (stale timers, no-op polls).
    fn dispatch(action: AppAction) {
        let previous = snapshot_state();
        let effects = APP_STATE.with(|state| apply_action(&mut state.borrow_mut(), action));
        let current = snapshot_state();
        if current.route != previous.route {
            push_route_to_browser_history(&current.route);
            sync_route_services(&current);
        }
        for effect in effects {
            run_effect(effect);
        }
        if current != previous {
            render_app_dom();
        }
    }

    /// Navigation entry point for links, popstate, boot, and programmatic
    /// moves. Unlike [`dispatch`], it always re-syncs services and renders.
    pub(crate) fn apply_route_transition(route: AppRoute, push_history: bool) {
        let effects = APP_STATE
            .with(|state| apply_action(&mut state.borrow_mut(), AppAction::Navigate { route }));
        let state = snapshot_state();
        if push_history {
            push_route_to_browser_history(&state.route);
        } else {
            // The guard may have rewritten the requested route; keep the
            // address bar honest without growing history.
            replace_route_in_browser_history(&state.route);
        }
        sync_route_services(&state);
        for effect in effects {
            run_effect(effect);
        }
        render_app_dom();
    }

    /// Per-route services: the job stream lives exactly as long as the home
    /// screen, polling exactly as long as the generating screen.
    fn sync_route_services(state: &AppState) {
        if state.route == AppRoute::Home {
            ensure_job_stream();
        } else {
            close_job_stream();
        }
        match &state.route {
            AppRoute::Generate { job_id } => ensure_polling(job_id.clone()),
            _ => stop_polling(),
        }
        match &state.route {
            AppRoute::Result { artifact_id } => ensure_artifact_loaded(artifact_id.clone()),
            AppRoute::Regenerate { artifact_id } => begin_regeneration(artifact_id.clone()),
            AppRoute::Profile => ensure_profile_loaded(),
            AppRoute::Write => restore_draft_surface(),
            _ => {}
        }
    }

    /// A reload that lands on the write screen starts from the persisted
    /// draft rather than a blank page.
    fn restore_draft_surface() {
        let empty = WRITE_SURFACE.with(|surface| surface.borrow().text.is_empty());
        if !empty {
            return;
        }
        match BrowserStore.load_draft() {
            Ok(Some(draft)) => WRITE_SURFACE.with(|surface| {
                let mut surface = surface.borrow_mut();
                surface.text = draft.text;
                surface.mood = draft.mood;
            }),
            Ok(None) => {}
            Err(error) => console_warn(&error),
        }
    }

    fn run_effect(effect: AppEffect) {
        match effect {
            AppEffect::LoadFeed { query, .. } => spawn_feed_load(query),
            AppEffect::PersistDraft { draft } => {
                if let Err(error) = BrowserStore.persist_draft(&draft) {
                    console_warn(&error);
                }
            }
            AppEffect::BeginGeneration { request } => begin_generation(request),
            AppEffect::Alert { message } => show_alert(&message),
        }
    }

    fn spawn_feed_load(query: FeedQuery) {
        spawn_local(async move {
            match load_feed(&query).await {
                Ok(items) => dispatch(AppAction::FeedLoaded { items }),
                Err(error) => {
                    console_warn(&format!("feed load failed: {error}"));
                    dispatch(AppAction::FeedLoadFailed);
                }
            }
        });
    }

    fn begin_generation(request: DiaryEntryRequest) {
        if GENERATION_IN_FLIGHT.with(|flag| flag.get()) {
            return;
        }
        GENERATION_IN_FLIGHT.with(|flag| flag.set(true));
        render_app_dom();
        spawn_local(async move {
            let outcome = generate_diary(&request).await;
            GENERATION_IN_FLIGHT.with(|flag| flag.set(false));
            match outcome {
                Ok(accepted) => dispatch(AppAction::GenerationAccepted {
                    job_id: accepted.job_id,
                }),
                Err(error) => {
                    console_warn(&format!("generation start failed: {error}"));
                    let from_regenerate = APP_STATE
                        .with(|state| matches!(state.borrow().route, AppRoute::Regenerate { .. }));
                    dispatch(AppAction::GenerationRejected);
                    if from_regenerate {
                        apply_route_transition(AppRoute::Home, true);
                    }
                }
            }
        });
    }

    fn ensure_polling(job_id: String) {
        let already =
            CURRENT_POLL_JOB.with(|current| current.borrow().as_deref() == Some(job_id.as_str()));
        if already {
            return;
        }
        CURRENT_POLL_JOB.with(|current| *current.borrow_mut() = Some(job_id.clone()));
        let epoch = POLL_EPOCH.with(|epoch| {
            let next = epoch.get() + 1;
            epoch.set(next);
            next
        });
        spawn_local(async move {
            loop {
                if POLL_EPOCH.with(|current| current.get()) != epoch {
                    break;
                }
                match job_status(&job_id).await {
                    Ok(snapshot) => dispatch(AppAction::JobPolled { snapshot }),
                    // A missed poll is not terminal; the next tick retries.
                    Err(error) => console_warn(&format!("job poll failed: {error}")),
                }
                if POLL_EPOCH.with(|current| current.get()) != epoch {
                    break;
                }
                sleep(Duration::from_millis(JOB_POLL_INTERVAL_MS)).await;
            }
        });
    }

    fn stop_polling() {
        CURRENT_POLL_JOB.with(|current| *current.borrow_mut() = None);
        POLL_EPOCH.with(|epoch| epoch.set(epoch.get() + 1));
    }

    fn install_global_action_handlers() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        ACTION_CLICK_HANDLER.with(|slot| {
            if slot.borrow().is_some() {
                return;
            }
            let callback =
                Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event: web_sys::Event| {
                    let Some(target) = event.target() else {
                        return;
                    };
                    let Ok(element) = target.dyn_into::<web_sys::Element>() else {
                        return;
                    };
                    let Ok(Some(actionable)) = element.closest("[data-action]") else {
                        return;
                    };
                    if actionable.has_attribute("disabled") {
                        return;
                    }
                    let Some(action) = actionable.get_attribute("data-action") else {
                        return;
                    };
                    event.prevent_default();
                    handle_action(&action, &actionable);
                }));
            let _ = document
                .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
            *slot.borrow_mut() = Some(callback);
        });

        GLOBAL_INPUT_HANDLER.with(|slot| {
            if slot.borrow().is_some() {
                return;
            }
            let callback =
                Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event: web_sys::Event| {
                    let Some(target) = event.target() else {
                        return;
                    };
                    let Ok(element) = target.dyn_into::<web_sys::Element>() else {
                        return;
                    };
                    let id = element.id();
                    if id == SEARCH_INPUT_ID {
                        if let Ok(search) = element.dyn_into::<HtmlInputElement>() {
                            on_search_input(search.value());
                        }
                    } else if id == WRITE_TEXT_ID {
                        if let Ok(textarea) = element.dyn_into::<HtmlTextAreaElement>() {
                            on_write_input(textarea.value());
                        }
                    }
                }));
            let _ = document
                .add_event_listener_with_callback("input", callback.as_ref().unchecked_ref());
            *slot.borrow_mut() = Some(callback);
        });
    }

    fn handle_action(action: &str, element: &web_sys::Element) {
        let value = element.get_attribute("data-value").unwrap_or_default();
        let artifact_id = element.get_attribute("data-artifact-id").unwrap_or_default();
        match action {
            "go-home" => apply_route_transition(AppRoute::Home, true),
            "go-write" => apply_route_transition(AppRoute::Write, true),
            "go-profile" => apply_route_transition(AppRoute::Profile, true),
            "go-signin" => apply_route_transition(AppRoute::SignIn, true),
            "go-signup" => apply_route_transition(AppRoute::SignUp, true),
            "go-character" => apply_route_transition(AppRoute::CharacterCreate, true),
            "toggle-language" => toggle_language(),

            "sign-in-submit" => submit_sign_in(),
            "sign-up-submit" => submit_sign_up(),
            "sign-out" => perform_sign_out(),

            "open-artifact" => {
                if !artifact_id.is_empty() {
                    apply_route_transition(AppRoute::Result { artifact_id }, true);
                }
            }
            "delete-artifact" => {
                if !artifact_id.is_empty() {
                    delete_artifact_clicked(artifact_id);
                }
            }

            "select-mood" => {
                if let Some(mood) = Mood::parse(&value) {
                    WRITE_SURFACE.with(|surface| surface.borrow_mut().mood = mood);
                    render_app_dom();
                }
            }
            "select-style" => {
                if let Some(style) = StylePreset::parse(&value) {
                    WRITE_SURFACE.with(|surface| surface.borrow_mut().style = style);
                    render_app_dom();
                }
            }
            "write-next" => write_next(),
            "write-back" => dispatch(AppAction::Navigate {
                route: AppRoute::Write,
            }),
            "style-generate" => {
                let style = WRITE_SURFACE.with(|surface| surface.borrow().style);
                dispatch(AppAction::StyleConfirmed { style });
            }

            "char-gender" => {
                let gender = if value == "male" {
                    Gender::Male
                } else {
                    Gender::Female
                };
                CHARACTER_SURFACE.with(|surface| surface.borrow_mut().gender = gender);
                render_app_dom();
            }
            "char-hair" => {
                let hair_length = match value.as_str() {
                    "medium" => HairLength::Medium,
                    "short" => HairLength::Short,
                    _ => HairLength::Long,
                };
                CHARACTER_SURFACE.with(|surface| surface.borrow_mut().hair_length = hair_length);
                render_app_dom();
            }
            "char-glasses" => {
                CHARACTER_SURFACE.with(|surface| {
                    let mut surface = surface.borrow_mut();
                    surface.has_glasses = !surface.has_glasses;
                });
                render_app_dom();
            }
            "char-freckles" => {
                CHARACTER_SURFACE.with(|surface| {
                    let mut surface = surface.borrow_mut();
                    surface.has_freckles = !surface.has_freckles;
                });
                render_app_dom();
            }
            "char-generate" => character_generate(),
            "char-save" => character_save(),

            "profile-edit" => {
                PROFILE_SURFACE.with(|surface| surface.borrow_mut().editing = true);
                render_app_dom();
            }
            "profile-cancel" => {
                PROFILE_SURFACE.with(|surface| surface.borrow_mut().editing = false);
                render_app_dom();
            }
            "profile-save" => profile_save_username(),
            "profile-withdraw" => profile_withdraw(),
            "profile-regen-avatar" => profile_regenerate_avatar(),

            "result-regenerate" => {
                if !artifact_id.is_empty() {
                    apply_route_transition(AppRoute::Regenerate { artifact_id }, true);
                }
            }
            "result-share" => {
                if !artifact_id.is_empty() {
                    apply_route_transition(AppRoute::Share { artifact_id }, true);
                }
            }

            other => console_warn(&format!("unhandled action: {other}")),
        }
    }

    /// Keystrokes reduce silently (no re-render mid-typing); each one also
    /// arms a timer that re-checks the debounce deadline once it lapses.
    fn on_search_input(value: String) {
        let now_ms = epoch_millis_now();
        let _ = APP_STATE.with(|state| {
            apply_action(
                &mut state.borrow_mut(),
                AppAction::SearchInput {
                    query: value,
                    now_ms,
                },
            )
        });
        spawn_local(async {
            sleep(Duration::from_millis(SEARCH_DEBOUNCE_MS)).await;
            dispatch(AppAction::SearchTimerFired {
                now_ms: epoch_millis_now(),
            });
        });
    }

    /// Live character count and submit gating without a full re-render.
    fn on_write_input(value: String) {
        let ready = input::diary_text_ready(&value);
        let count = value.chars().count();
        WRITE_SURFACE.with(|surface| surface.borrow_mut().text = value);
        let Ok(document) = shell_document() else {
            return;
        };
        if let Some(counter) = document.get_element_by_id(WRITE_COUNT_ID) {
            if let Ok(counter) = counter.dyn_into::<HtmlElement>() {
                let language = current_language();
                counter.set_inner_text(&format!(
                    "{count} {}",
                    locale::text(language, MessageKey::CharsCount)
                ));
            }
        }
        if let Some(next) = document.get_element_by_id(WRITE_NEXT_ID) {
            if ready {
                let _ = next.remove_attribute("disabled");
            } else {
                let _ = next.set_attribute("disabled", "disabled");
            }
        }
    }

    fn write_next() {
        let (text, mood) =
            WRITE_SURFACE.with(|surface| (surface.borrow().text.clone(), surface.borrow().mood));
        dispatch(AppAction::DraftAdvanced { text, mood });
    }

    fn toggle_language() {
        let language = match current_language() {
            Language::Ko => Language::En,
            Language::En => Language::Ko,
        };
        persist_language(language);
        dispatch(AppAction::LanguageChanged { language });
    }

    fn set_auth_error(error: Option<String>) {
        AUTH_SURFACE.with(|surface| {
            let mut surface = surface.borrow_mut();
            surface.error = error;
            surface.submitting = false;
        });
        render_app_dom();
    }

    fn set_auth_submitting() {
        AUTH_SURFACE.with(|surface| {
            let mut surface = surface.borrow_mut();
            surface.error = None;
            surface.submitting = true;
        });
        render_app_dom();
    }

    fn submit_sign_in() {
        let Ok(document) = shell_document() else {
            return;
        };
        let language = current_language();
        let username = input_value(&document, SIGNIN_USERNAME_ID);
        let password = input_value(&document, SIGNIN_PASSWORD_ID);
        let Ok(username) = input::normalize_username(&username) else {
            set_auth_error(Some(
                locale::text(language, MessageKey::InvalidAuth).to_string(),
            ));
            return;
        };
        if input::validate_password(&password).is_err() {
            set_auth_error(Some(
                locale::text(language, MessageKey::InvalidAuth).to_string(),
            ));
            return;
        }
        set_auth_submitting();
        spawn_local(async move {
            let request = LoginRequest { username, password };
            match login(&request).await {
                Ok(token) => finish_sign_in(token, AppRoute::Home, None),
                Err(error) => {
                    console_warn(&format!("login failed: {error}"));
                    set_auth_error(Some(error.user_message(language, MessageKey::InvalidAuth)));
                }
            }
        });
    }

    fn submit_sign_up() {
        let Ok(document) = shell_document() else {
            return;
        };
        let language = current_language();
        let username = input_value(&document, SIGNUP_USERNAME_ID);
        let email = input_value(&document, SIGNUP_EMAIL_ID);
        let password = input_value(&document, SIGNUP_PASSWORD_ID);
        let confirm = input_value(&document, SIGNUP_CONFIRM_ID);

        let Ok(username) = input::normalize_username(&username) else {
            set_auth_error(Some(
                locale::text(language, MessageKey::RegistrationFailed).to_string(),
            ));
            return;
        };
        if input::validate_password(&password).is_err() {
            set_auth_error(Some(
                locale::text(language, MessageKey::RegistrationFailed).to_string(),
            ));
            return;
        }
        // The mismatch check short-circuits before any network call.
        if input::validate_password_confirmation(&password, &confirm).is_err() {
            set_auth_error(Some(
                locale::text(language, MessageKey::PasswordMismatch).to_string(),
            ));
            return;
        }

        set_auth_submitting();
        let email = email.trim().to_string();
        spawn_local(async move {
            let request = RegisterRequest {
                username,
                email: (!email.is_empty()).then_some(email),
                password,
            };
            match register(&request).await {
                Ok(token) => finish_sign_in(
                    token,
                    AppRoute::CharacterCreate,
                    Some(locale::text(language, MessageKey::RegisterSuccess).to_string()),
                ),
                Err(error) => {
                    console_warn(&format!("registration failed: {error}"));
                    set_auth_error(Some(
                        error.user_message(language, MessageKey::RegistrationFailed),
                    ));
                }
            }
        });
    }

    fn finish_sign_in(token: TokenResponse, destination: AppRoute, success_message: Option<String>) {
        let session = SessionState::new(token.access_token, token.user_id);
        if let Err(error) = BrowserStore.persist_session(&session) {
            console_warn(&error);
        }
        AUTH_SURFACE.with(|surface| *surface.borrow_mut() = AuthSurfaceState::default());
        dispatch(AppAction::SessionEstablished { session });
        if let Some(message) = success_message {
            show_alert(&message);
        }
        apply_route_transition(destination, true);
    }

    fn perform_sign_out() {
        if let Err(error) = BrowserStore.clear_session() {
            console_warn(&error);
        }
        PROFILE_SURFACE.with(|surface| *surface.borrow_mut() = ProfileSurfaceState::default());
        dispatch(AppAction::SessionCleared);
        apply_route_transition(AppRoute::Landing, true);
    }

    fn delete_artifact_clicked(artifact_id: String) {
        let language = current_language();
        if !show_confirm(locale::text(language, MessageKey::DeleteConfirm)) {
            return;
        }
        spawn_local(async move {
            match delete_artifact(&artifact_id).await {
                Ok(_) => dispatch(AppAction::ArtifactRemoved { artifact_id }),
                Err(error) => {
                    console_warn(&format!("delete failed: {error}"));
                    show_alert(&error.user_message(language, MessageKey::DeleteFailed));
                }
            }
        });
    }

    fn ensure_profile_loaded() {
        let Some(user_id) = current_user_id() else {
            return;
        };
        let already = PROFILE_SURFACE.with(|surface| {
            let surface = surface.borrow();
            surface.loading
                || surface
                    .profile
                    .as_ref()
                    .is_some_and(|profile| profile.id == user_id)
        });
        if already {
            return;
        }
        PROFILE_SURFACE.with(|surface| {
            let mut surface = surface.borrow_mut();
            surface.loading = true;
            surface.profile = None;
            surface.editing = false;
        });
        spawn_local(async move {
            match get_user(&user_id).await {
                Ok(profile) => PROFILE_SURFACE.with(|surface| {
                    let mut surface = surface.borrow_mut();
                    surface.profile = Some(profile);
                    surface.loading = false;
                }),
                Err(error) => {
                    // Failed read: log and leave the screen in its loading
                    // presentation, matching the rest of the product.
                    console_warn(&format!("profile load failed: {error}"));
                    PROFILE_SURFACE.with(|surface| surface.borrow_mut().loading = false);
                }
            }
            render_app_dom();
        });
    }

    fn profile_save_username() {
        let Ok(document) = shell_document() else {
            return;
        };
        let language = current_language();
        let Some(user_id) = current_user_id() else {
            return;
        };
        let Ok(username) = input::normalize_username(&input_value(
            &document,
            PROFILE_USERNAME_INPUT_ID,
        )) else {
            return;
        };
        spawn_local(async move {
            let request = UserUpdateRequest {
                name: Some(username),
                ..UserUpdateRequest::default()
            };
            match update_user(&user_id, &request).await {
                Ok(_) => {
                    PROFILE_SURFACE.with(|surface| {
                        let mut surface = surface.borrow_mut();
                        surface.editing = false;
                        surface.profile = None;
                    });
                    show_alert(locale::text(language, MessageKey::ProfileUpdated));
                    ensure_profile_loaded();
                    render_app_dom();
                }
                Err(error) => {
                    console_warn(&format!("profile update failed: {error}"));
                    show_alert(&error.user_message(language, MessageKey::UpdateFailed));
                }
            }
        });
    }

    fn profile_withdraw() {
        let language = current_language();
        if !show_confirm(locale::text(language, MessageKey::WithdrawConfirm)) {
            return;
        }
        let Some(user_id) = current_user_id() else {
            return;
        };
        spawn_local(async move {
            match delete_user(&user_id).await {
                Ok(_) => {
                    clear_all_storage();
                    PROFILE_SURFACE
                        .with(|surface| *surface.borrow_mut() = ProfileSurfaceState::default());
                    dispatch(AppAction::SessionCleared);
                    apply_route_transition(AppRoute::Landing, true);
                }
                Err(error) => {
                    console_warn(&format!("account deletion failed: {error}"));
                    show_alert(&error.user_message(language, MessageKey::WithdrawFailed));
                }
            }
        });
    }

    fn profile_regenerate_avatar() {
        let language = current_language();
        let Some(user_id) = current_user_id() else {
            return;
        };
        if PROFILE_SURFACE.with(|surface| surface.borrow().regenerating) {
            return;
        }
        // Prefer the prompt stored on the profile; fall back to rebuilding
        // it from the locally saved character.
        let prompt = PROFILE_SURFACE
            .with(|surface| {
                surface
                    .borrow()
                    .profile
                    .as_ref()
                    .and_then(|profile| profile.profile_prompt.clone())
            })
            .or_else(|| {
                BrowserStore.load_character().ok().flatten().map(|character| {
                    build_portrait_prompt(
                        character.gender,
                        character.hair_length,
                        character.has_glasses,
                        character.has_freckles,
                    )
                })
            });
        let Some(prompt) = prompt else {
            // Nothing to regenerate from; send the user to the creator.
            apply_route_transition(AppRoute::CharacterCreate, true);
            return;
        };
        PROFILE_SURFACE.with(|surface| surface.borrow_mut().regenerating = true);
        render_app_dom();
        spawn_local(async move {
            let outcome = regenerate_avatar_flow(&user_id, &prompt).await;
            PROFILE_SURFACE.with(|surface| {
                let mut surface = surface.borrow_mut();
                surface.regenerating = false;
                if outcome.is_ok() {
                    surface.profile = None;
                }
            });
            if let Err(error) = outcome {
                console_warn(&format!("avatar regeneration failed: {error}"));
                show_alert(&error.user_message(language, MessageKey::RegenFailed));
            }
            ensure_profile_loaded();
            render_app_dom();
        });
    }

    async fn regenerate_avatar_flow(user_id: &str, prompt: &str) -> Result<(), ApiError> {
        let image = generate_image(prompt).await?;
        let saved = save_profile_image(&SaveProfileImageRequest {
            user_id: user_id.to_string(),
            image_data: image.image_data,
            prompt: prompt.to_string(),
        })
        .await?;
        let request = UserUpdateRequest {
            name: None,
            profile_image_s3_key: Some(saved.s3_key.clone()),
            profile_prompt: Some(prompt.to_string()),
        };
        update_user(user_id, &request).await?;
        if let Ok(Some(mut character)) = BrowserStore.load_character() {
            character.image_url = saved.image_url;
            character.s3_key = saved.s3_key;
            if let Err(error) = BrowserStore.persist_character(&character) {
                console_warn(&error);
            }
        }
        Ok(())
    }

    fn character_generate() {
        if CHARACTER_SURFACE.with(|surface| surface.borrow().generating) {
            return;
        }
        let language = current_language();
        let prompt = CHARACTER_SURFACE.with(|surface| {
            let mut surface = surface.borrow_mut();
            surface.generating = true;
            surface.preview = None;
            build_portrait_prompt(
                surface.gender,
                surface.hair_length,
                surface.has_glasses,
                surface.has_freckles,
            )
        });
        render_app_dom();
        spawn_local(async move {
            let outcome = generate_image(&prompt).await;
            CHARACTER_SURFACE.with(|surface| {
                let mut surface = surface.borrow_mut();
                surface.generating = false;
                if let Ok(image) = &outcome {
                    surface.preview = Some(image.image_data.clone());
                }
            });
            if let Err(error) = outcome {
                console_warn(&format!("character generation failed: {error}"));
                show_alert(&error.user_message(language, MessageKey::CharacterGenFailed));
            }
            render_app_dom();
        });
    }

    fn character_save() {
        let language = current_language();
        let Some(user_id) = current_user_id() else {
            return;
        };
        let surface = CHARACTER_SURFACE.with(|surface| surface.borrow().clone());
        let Some(preview) = surface.preview.clone() else {
            return;
        };
        let prompt = build_portrait_prompt(
            surface.gender,
            surface.hair_length,
            surface.has_glasses,
            surface.has_freckles,
        );
        spawn_local(async move {
            let request = SaveProfileImageRequest {
                user_id: user_id.clone(),
                image_data: preview,
                prompt: prompt.clone(),
            };
            match save_profile_image(&request).await {
                Ok(saved) => {
                    let character = CharacterConfig {
                        gender: surface.gender,
                        hair_length: surface.hair_length,
                        has_glasses: surface.has_glasses,
                        has_freckles: surface.has_freckles,
                        image_url: saved.image_url.clone(),
                        s3_key: saved.s3_key.clone(),
                    };
                    if let Err(error) = BrowserStore.persist_character(&character) {
                        console_warn(&error);
                    }
                    let update = UserUpdateRequest {
                        name: None,
                        profile_image_s3_key: Some(saved.s3_key),
                        profile_prompt: Some(prompt),
                    };
                    if let Err(error) = update_user(&user_id, &update).await {
                        console_warn(&format!("profile image link failed: {error}"));
                    }
                    CHARACTER_SURFACE
                        .with(|surface| *surface.borrow_mut() = CharacterSurfaceState::default());
                    PROFILE_SURFACE.with(|surface| surface.borrow_mut().profile = None);
                    apply_route_transition(AppRoute::Profile, true);
                }
                Err(error) => {
                    console_warn(&format!("character save failed: {error}"));
                    show_alert(&error.user_message(language, MessageKey::CharacterSaveFailed));
                }
            }
        });
    }

    fn ensure_artifact_loaded(artifact_id: String) {
        let already = RESULT_SURFACE.with(|surface| {
            let surface = surface.borrow();
            surface.artifact_id.as_deref() == Some(artifact_id.as_str())
                && (surface.loading || surface.detail.is_some())
        });
        if already {
            return;
        }
        RESULT_SURFACE.with(|surface| {
            *surface.borrow_mut() = ResultSurfaceState {
                artifact_id: Some(artifact_id.clone()),
                detail: None,
                loading: true,
            };
        });
        spawn_local(async move {
            match artifact(&artifact_id).await {
                Ok(detail) => RESULT_SURFACE.with(|surface| {
                    let mut surface = surface.borrow_mut();
                    // A stale response for a screen we already left must
                    // not clobber the current artifact.
                    if surface.artifact_id.as_deref() == Some(artifact_id.as_str()) {
                        surface.detail = Some(detail);
                        surface.loading = false;
                    }
                }),
                Err(error) => {
                    console_warn(&format!("artifact load failed: {error}"));
                    RESULT_SURFACE.with(|surface| surface.borrow_mut().loading = false);
                }
            }
            render_app_dom();
        });
    }

    /// The regenerate route re-submits an artifact's original inputs as a
    /// new job: fetch the detail, then let the reducer plan the call.
    fn begin_regeneration(artifact_id: String) {
        if GENERATION_IN_FLIGHT.with(|flag| flag.get()) {
            return;
        }
        let language = current_language();
        spawn_local(async move {
            match artifact(&artifact_id).await {
                Ok(detail) => dispatch(AppAction::RegenerateRequested { detail }),
                Err(error) => {
                    console_warn(&format!("regeneration setup failed: {error}"));
                    show_alert(&error.user_message(language, MessageKey::RegenStartFailed));
                    apply_route_transition(AppRoute::Home, true);
                }
            }
        });
    }

    fn show_alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn show_confirm(message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn input_value(document: &Document, id: &str) -> String {
        document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }
}
