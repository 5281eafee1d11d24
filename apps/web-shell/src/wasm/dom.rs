use super::*;

    const STYLE_SHEET: &str = r"
    #cdiary-shell-root { max-width: 480px; margin: 0 auto; min-height: 100vh;
        display: flex; flex-direction: column; background: #fff;
        font-family: -apple-system, 'Apple SD Gothic Neo', 'Noto Sans KR', sans-serif;
        color: #111827; }
    .cd-topbar { display: flex; align-items: center; justify-content: space-between;
        padding: 12px 16px; border-bottom: 1px solid #f3f4f6; }
    .cd-topbar-title { font-size: 17px; font-weight: 700; }
    .cd-screen { flex: 1; padding: 16px; display: flex; flex-direction: column; gap: 12px; }
    .cd-centered { align-items: center; justify-content: center; text-align: center; }
    .cd-btn { padding: 10px 14px; border-radius: 12px; border: 1px solid #e5e7eb;
        background: #fff; color: #374151; font-weight: 600; cursor: pointer; }
    .cd-btn-primary { background: #2563eb; border-color: #2563eb; color: #fff; }
    .cd-btn-danger { background: #fff; border-color: #fecaca; color: #ef4444; }
    .cd-btn:disabled { opacity: 0.5; cursor: default; }
    .cd-btn-block { width: 100%; }
    .cd-input { width: 100%; box-sizing: border-box; padding: 10px 12px;
        border: 1px solid #d1d5db; border-radius: 8px; font-size: 14px; }
    .cd-textarea { min-height: 180px; resize: none; }
    .cd-label { font-size: 13px; font-weight: 600; color: #374151; }
    .cd-muted { color: #6b7280; font-size: 13px; }
    .cd-error { color: #ef4444; font-size: 13px; }
    .cd-list { display: flex; flex-direction: column; gap: 12px; }
    .cd-row { display: flex; height: 96px; border: 1px solid #f3f4f6; border-radius: 12px;
        overflow: hidden; cursor: pointer; background: #fff;
        box-shadow: 0 1px 2px rgba(0,0,0,0.05); }
    .cd-thumb { width: 96px; flex-shrink: 0; background-size: cover;
        background-position: center; background-color: #eff6ff; }
    .cd-progress { width: 96px; flex-shrink: 0; display: flex; flex-direction: column;
        align-items: center; justify-content: center; gap: 4px;
        background: #eff6ff; font-size: 11px; color: #2563eb; }
    .cd-row-body { flex: 1; padding: 12px; min-width: 0; display: flex;
        flex-direction: column; justify-content: center; gap: 4px; }
    .cd-row-meta { display: flex; gap: 8px; align-items: center; font-size: 12px;
        color: #6b7280; }
    .cd-badge { padding: 1px 6px; background: #eff6ff; border-radius: 4px;
        font-size: 10px; text-transform: uppercase; letter-spacing: 0.04em; }
    .cd-row-summary { font-weight: 600; white-space: nowrap; overflow: hidden;
        text-overflow: ellipsis; }
    .cd-grid2 { display: grid; grid-template-columns: 1fr 1fr; gap: 10px; }
    .cd-grid3 { display: grid; grid-template-columns: 1fr 1fr 1fr; gap: 8px; }
    .cd-choice { padding: 12px; border-radius: 10px; border: 2px solid #e5e7eb;
        background: #fff; text-align: center; font-weight: 600; cursor: pointer; }
    .cd-choice-selected { border-color: #2563eb; background: #eff6ff; }
    .cd-choice-desc { display: block; font-size: 11px; color: #6b7280; font-weight: 400;
        margin-top: 4px; }
    .cd-mood-row { display: flex; gap: 8px; overflow-x: auto; padding-bottom: 4px; }
    .cd-mood { font-size: 26px; padding: 8px; border-radius: 999px; border: 2px solid
        transparent; background: none; cursor: pointer; flex-shrink: 0; }
    .cd-mood-selected { border-color: #2563eb; background: #eff6ff; }
    .cd-spinner { width: 56px; height: 56px; border: 4px solid #dbeafe;
        border-top-color: #2563eb; border-radius: 50%;
        animation: cd-spin 0.9s linear infinite; }
    @keyframes cd-spin { to { transform: rotate(360deg); } }
    .cd-avatar { width: 128px; height: 128px; border-radius: 50%; object-fit: cover;
        background: #e5e7eb; border: 4px solid #fff;
        box-shadow: 0 2px 8px rgba(0,0,0,0.12); }
    .cd-portrait { width: 192px; height: 192px; border-radius: 16px; object-fit: cover;
        box-shadow: 0 4px 12px rgba(0,0,0,0.15); }
    .cd-strip { width: 100%; border-radius: 12px; }
    .cd-footer { padding: 16px; border-top: 1px solid #f3f4f6; }
    .cd-actions { display: flex; gap: 10px; }
    .cd-actions > .cd-btn { flex: 1; }
    .cd-count { text-align: right; font-size: 12px; color: #6b7280; }
    ";

    pub(super) fn shell_document() -> Result<Document, String> {
        web_sys::window()
            .ok_or_else(|| "window is unavailable".to_string())?
            .document()
            .ok_or_else(|| "document is unavailable".to_string())
    }

    /// Idempotent bootstrap of the static DOM: stylesheet, boot status
    /// line, and the root every render writes into.
    pub(super) fn ensure_app_dom() -> Result<(), String> {
        let document = shell_document()?;
        let body = document
            .body()
            .ok_or_else(|| "document body is unavailable".to_string())?;

        if document.get_element_by_id(APP_STYLE_ID).is_none() {
            let style = document
                .create_element("style")
                .map_err(|_| "failed to create stylesheet".to_string())?;
            style.set_id(APP_STYLE_ID);
            style.set_text_content(Some(STYLE_SHEET));
            body.append_child(&style)
                .map_err(|_| "failed to append stylesheet".to_string())?;
        }

        if document.get_element_by_id(BOOT_STATUS_ID).is_none() {
            let status = el(&document, "div", "cd-muted")?;
            status.set_id(BOOT_STATUS_ID);
            let _ = status.style().set_property("display", "none");
            body.append_child(&status)
                .map_err(|_| "failed to append status element".to_string())?;
        }

        if document.get_element_by_id(APP_ROOT_ID).is_none() {
            let root = document
                .create_element("section")
                .map_err(|_| "failed to create shell root".to_string())?;
            root.set_id(APP_ROOT_ID);
            body.append_child(&root)
                .map_err(|_| "failed to append shell root".to_string())?;
        }

        Ok(())
    }

    pub(super) fn render_app_dom() {
        if let Err(error) = render_app_dom_inner() {
            console_warn(&format!("render failed: {error}"));
        }
    }

    fn render_app_dom_inner() -> Result<(), String> {
        let document = shell_document()?;
        let root = document
            .get_element_by_id(APP_ROOT_ID)
            .ok_or_else(|| "shell root missing".to_string())?;

        let focused_id = document
            .active_element()
            .map(|element| element.id())
            .filter(|id| !id.is_empty());

        root.set_inner_html("");
        let state = snapshot_state();
        let screen = match &state.route {
            AppRoute::Landing => build_landing(&document, &state)?,
            AppRoute::SignUp => build_sign_up(&document, &state)?,
            AppRoute::SignIn => build_sign_in(&document, &state)?,
            AppRoute::Home => build_home(&document, &state)?,
            AppRoute::Profile => build_profile(&document, &state)?,
            AppRoute::CharacterCreate => build_character_create(&document, &state)?,
            AppRoute::Write => build_write(&document, &state)?,
            AppRoute::Generate { .. } => build_generating(&document, &state)?,
            AppRoute::Result { .. } => build_result(&document, &state)?,
            AppRoute::Regenerate { .. } => build_regenerating(&document, &state)?,
            AppRoute::Share { .. } => build_share(&document, &state)?,
        };
        root.append_child(&screen)
            .map_err(|_| "failed to mount screen".to_string())?;

        // Rebuilding the tree drops focus; give it back to the same control.
        if let Some(id) = focused_id {
            if let Some(element) = document.get_element_by_id(&id) {
                if let Ok(element) = element.dyn_into::<HtmlElement>() {
                    let _ = element.focus();
                }
            }
        }
        Ok(())
    }

    fn el(document: &Document, tag: &str, class_name: &str) -> Result<HtmlElement, String> {
        let element = document
            .create_element(tag)
            .map_err(|_| format!("failed to create <{tag}>"))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| format!("<{tag}> is not an HtmlElement"))?;
        if !class_name.is_empty() {
            element.set_class_name(class_name);
        }
        Ok(element)
    }

    fn text_el(
        document: &Document,
        tag: &str,
        class_name: &str,
        text: &str,
    ) -> Result<HtmlElement, String> {
        let element = el(document, tag, class_name)?;
        element.set_inner_text(text);
        Ok(element)
    }

    fn action_button(
        document: &Document,
        class_name: &str,
        label: &str,
        action: &str,
    ) -> Result<HtmlElement, String> {
        let button = el(document, "button", class_name)?;
        let _ = button.set_attribute("type", "button");
        let _ = button.set_attribute("data-action", action);
        button.set_inner_text(label);
        Ok(button)
    }

    fn append(parent: &HtmlElement, child: &HtmlElement) {
        let _ = parent.append_child(child);
    }

    fn labeled_input(
        document: &Document,
        id: &str,
        input_type: &str,
        label: &str,
        value: &str,
    ) -> Result<HtmlElement, String> {
        let container = el(document, "div", "")?;
        append(&container, &text_el(document, "label", "cd-label", label)?);
        let input = el(document, "input", "cd-input")?;
        input.set_id(id);
        let _ = input.set_attribute("type", input_type);
        if let Ok(input) = input.clone().dyn_into::<HtmlInputElement>() {
            input.set_value(value);
        }
        append(&container, &input);
        Ok(container)
    }

    fn topbar(
        document: &Document,
        title: &str,
        trailing: Option<HtmlElement>,
    ) -> Result<HtmlElement, String> {
        let bar = el(document, "header", "cd-topbar")?;
        append(&bar, &text_el(document, "div", "cd-topbar-title", title)?);
        if let Some(trailing) = trailing {
            append(&bar, &trailing);
        }
        Ok(bar)
    }

    fn msg(state: &AppState, key: MessageKey) -> &'static str {
        locale::text(state.language, key)
    }

    fn build_landing(document: &Document, state: &AppState) -> Result<HtmlElement, String> {
        let screen = el(document, "main", "cd-screen cd-centered")?;
        append(
            &screen,
            &text_el(document, "h1", "", msg(state, MessageKey::AppTitle))?,
        );
        append(
            &screen,
            &text_el(document, "p", "cd-muted", msg(state, MessageKey::Welcome))?,
        );
        append(
            &screen,
            &action_button(
                document,
                "cd-btn cd-btn-primary cd-btn-block",
                msg(state, MessageKey::SignInTitle),
                "go-signin",
            )?,
        );
        append(
            &screen,
            &action_button(
                document,
                "cd-btn cd-btn-block",
                msg(state, MessageKey::SignUpTitle),
                "go-signup",
            )?,
        );
        let toggle_label = match state.language {
            Language::Ko => "English",
            Language::En => "한국어",
        };
        let toggle = action_button(document, "cd-btn", toggle_label, "toggle-language")?;
        append(&screen, &toggle);
        Ok(screen)
    }

    fn auth_error_line(
        document: &Document,
        surface: &AuthSurfaceState,
    ) -> Result<Option<HtmlElement>, String> {
        match &surface.error {
            Some(error) => Ok(Some(text_el(document, "p", "cd-error", error)?)),
            None => Ok(None),
        }
    }

    fn build_sign_in(document: &Document, state: &AppState) -> Result<HtmlElement, String> {
        let surface = AUTH_SURFACE.with(|surface| surface.borrow().clone());
        let screen = el(document, "main", "cd-screen")?;
        append(
            &screen,
            &topbar(document, msg(state, MessageKey::SignInTitle), None)?,
        );
        append(
            &screen,
            &text_el(document, "h2", "", msg(state, MessageKey::WelcomeBack))?,
        );
        append(
            &screen,
            &labeled_input(
                document,
                SIGNIN_USERNAME_ID,
                "text",
                msg(state, MessageKey::Username),
                "",
            )?,
        );
        append(
            &screen,
            &labeled_input(
                document,
                SIGNIN_PASSWORD_ID,
                "password",
                msg(state, MessageKey::Password),
                "",
            )?,
        );
        if let Some(error) = auth_error_line(document, &surface)? {
            append(&screen, &error);
        }
        let submit = action_button(
            document,
            "cd-btn cd-btn-primary cd-btn-block",
            msg(state, MessageKey::SignInTitle),
            "sign-in-submit",
        )?;
        if surface.submitting {
            let _ = submit.set_attribute("disabled", "disabled");
        }
        append(&screen, &submit);
        append(
            &screen,
            &action_button(
                document,
                "cd-btn cd-btn-block",
                msg(state, MessageKey::NoAccount),
                "go-signup",
            )?,
        );
        Ok(screen)
    }

    fn build_sign_up(document: &Document, state: &AppState) -> Result<HtmlElement, String> {
        let surface = AUTH_SURFACE.with(|surface| surface.borrow().clone());
        let screen = el(document, "main", "cd-screen")?;
        append(
            &screen,
            &topbar(document, msg(state, MessageKey::SignUpTitle), None)?,
        );
        append(
            &screen,
            &text_el(document, "h2", "", msg(state, MessageKey::CreateAccount))?,
        );
        append(
            &screen,
            &labeled_input(
                document,
                SIGNUP_USERNAME_ID,
                "text",
                msg(state, MessageKey::Username),
                "",
            )?,
        );
        append(
            &screen,
            &labeled_input(
                document,
                SIGNUP_EMAIL_ID,
                "email",
                msg(state, MessageKey::Email),
                "",
            )?,
        );
        append(
            &screen,
            &labeled_input(
                document,
                SIGNUP_PASSWORD_ID,
                "password",
                msg(state, MessageKey::Password),
                "",
            )?,
        );
        append(
            &screen,
            &labeled_input(
                document,
                SIGNUP_CONFIRM_ID,
                "password",
                msg(state, MessageKey::ConfirmPassword),
                "",
            )?,
        );
        if let Some(error) = auth_error_line(document, &surface)? {
            append(&screen, &error);
        }
        let submit = action_button(
            document,
            "cd-btn cd-btn-primary cd-btn-block",
            msg(state, MessageKey::SignUpTitle),
            "sign-up-submit",
        )?;
        if surface.submitting {
            let _ = submit.set_attribute("disabled", "disabled");
        }
        append(&screen, &submit);
        append(
            &screen,
            &action_button(
                document,
                "cd-btn cd-btn-block",
                msg(state, MessageKey::AlreadyHaveAccount),
                "go-signin",
            )?,
        );
        Ok(screen)
    }

    fn build_home(document: &Document, state: &AppState) -> Result<HtmlElement, String> {
        let screen = el(document, "main", "cd-screen")?;

        let actions = el(document, "div", "cd-actions")?;
        append(
            &actions,
            &action_button(
                document,
                "cd-btn",
                msg(state, MessageKey::ProfileTitle),
                "go-profile",
            )?,
        );
        append(
            &actions,
            &action_button(
                document,
                "cd-btn cd-btn-primary",
                &format!("+ {}", msg(state, MessageKey::NewDiary)),
                "go-write",
            )?,
        );
        append(
            &screen,
            &topbar(document, msg(state, MessageKey::AppTitle), Some(actions))?,
        );

        let search = el(document, "input", "cd-input")?;
        search.set_id(SEARCH_INPUT_ID);
        let _ = search.set_attribute("type", "search");
        let _ = search.set_attribute("placeholder", msg(state, MessageKey::SearchPlaceholder));
        if let Ok(search) = search.clone().dyn_into::<HtmlInputElement>() {
            search.set_value(&state.feed.search_input);
        }
        append(&screen, &search);

        let list = el(document, "div", "cd-list")?;
        list.set_id(FEED_LIST_ID);
        if state.feed.loading {
            append(
                &list,
                &text_el(
                    document,
                    "div",
                    "cd-muted",
                    msg(state, MessageKey::LoadingDiaries),
                )?,
            );
        } else if state.feed.artifacts.is_empty() {
            if state.feed.search_input.trim().is_empty() {
                append(
                    &list,
                    &text_el(document, "p", "cd-muted", msg(state, MessageKey::NoDiaries))?,
                );
                append(
                    &list,
                    &action_button(
                        document,
                        "cd-btn cd-btn-block",
                        msg(state, MessageKey::NewDiary),
                        "go-write",
                    )?,
                );
            } else {
                append(
                    &list,
                    &text_el(
                        document,
                        "p",
                        "cd-muted",
                        msg(state, MessageKey::SearchNoResults),
                    )?,
                );
                append(
                    &list,
                    &text_el(
                        document,
                        "p",
                        "cd-muted",
                        msg(state, MessageKey::SearchTryOther),
                    )?,
                );
            }
        } else {
            for artifact in &state.feed.artifacts {
                append(&list, &build_feed_row(document, state, artifact)?);
            }
        }
        append(&screen, &list);
        Ok(screen)
    }

    fn build_feed_row(
        document: &Document,
        state: &AppState,
        artifact: &ArtifactSummary,
    ) -> Result<HtmlElement, String> {
        let row = el(document, "div", "cd-row")?;
        let _ = row.set_attribute("data-action", "open-artifact");
        let _ = row.set_attribute("data-artifact-id", &artifact.artifact_id);

        let job = state.feed.job_for_artifact(&artifact.artifact_id);
        match row_presentation(artifact, job) {
            RowPresentation::Thumbnail { url } => {
                let thumb = el(document, "div", "cd-thumb")?;
                let _ = thumb
                    .style()
                    .set_property("background-image", &format!("url({url})"));
                append(&row, &thumb);
            }
            RowPresentation::InProgress { job } => {
                let progress = el(document, "div", "cd-progress")?;
                let spinner = el(document, "div", "cd-spinner")?;
                let _ = spinner.style().set_property("width", "20px");
                let _ = spinner.style().set_property("height", "20px");
                append(&progress, &spinner);
                let caption = match job {
                    Some(job) if !job.step.is_empty() => {
                        format!("{} {:.0}%", job.step, job.progress)
                    }
                    Some(job) => format!("{:.0}%", job.progress),
                    None => msg(state, MessageKey::Generating).to_string(),
                };
                append(&progress, &text_el(document, "div", "", &caption)?);
                append(&row, &progress);
            }
        }

        let body = el(document, "div", "cd-row-body")?;
        let meta = el(document, "div", "cd-row-meta")?;
        append(&meta, &text_el(document, "span", "", &artifact.date)?);
        if !artifact.style_preset.is_empty() {
            append(
                &meta,
                &text_el(document, "span", "cd-badge", &artifact.style_preset)?,
            );
        }
        append(&body, &meta);
        append(
            &body,
            &text_el(document, "div", "cd-row-summary", &artifact.summary)?,
        );
        append(&row, &body);

        let delete = action_button(document, "cd-btn cd-btn-danger", "✕", "delete-artifact")?;
        let _ = delete.set_attribute("data-artifact-id", &artifact.artifact_id);
        let _ = delete.style().set_property("align-self", "center");
        let _ = delete.style().set_property("margin-right", "8px");
        append(&row, &delete);
        Ok(row)
    }

    fn build_profile(document: &Document, state: &AppState) -> Result<HtmlElement, String> {
        let surface = PROFILE_SURFACE.with(|surface| surface.borrow().clone());
        let screen = el(document, "main", "cd-screen")?;
        let back = action_button(document, "cd-btn", "←", "go-home")?;
        append(
            &screen,
            &topbar(document, msg(state, MessageKey::ProfileTitle), Some(back))?,
        );

        if surface.loading {
            append(
                &screen,
                &text_el(document, "div", "cd-muted", msg(state, MessageKey::Loading))?,
            );
            return Ok(screen);
        }
        let Some(profile) = &surface.profile else {
            append(
                &screen,
                &text_el(document, "div", "cd-muted", msg(state, MessageKey::Loading))?,
            );
            return Ok(screen);
        };

        if let Some(url) = profile
            .profile_image_url
            .as_ref()
            .filter(|url| !url.is_empty())
        {
            let avatar = el(document, "img", "cd-avatar")?;
            let _ = avatar.set_attribute("src", url);
            let _ = avatar.style().set_property("align-self", "center");
            append(&screen, &avatar);
        } else {
            let placeholder = el(document, "div", "cd-avatar")?;
            let _ = placeholder.style().set_property("align-self", "center");
            append(&screen, &placeholder);
        }

        append(
            &screen,
            &text_el(document, "label", "cd-label", msg(state, MessageKey::Username))?,
        );
        if surface.editing {
            let input = el(document, "input", "cd-input")?;
            input.set_id(PROFILE_USERNAME_INPUT_ID);
            let _ = input.set_attribute("type", "text");
            if let Ok(input) = input.clone().dyn_into::<HtmlInputElement>() {
                input.set_value(&profile.username);
            }
            append(&screen, &input);
            let row = el(document, "div", "cd-actions")?;
            append(
                &row,
                &action_button(
                    document,
                    "cd-btn",
                    msg(state, MessageKey::Cancel),
                    "profile-cancel",
                )?,
            );
            append(
                &row,
                &action_button(
                    document,
                    "cd-btn cd-btn-primary",
                    msg(state, MessageKey::Save),
                    "profile-save",
                )?,
            );
            append(&screen, &row);
        } else {
            append(&screen, &text_el(document, "div", "", &profile.username)?);
            append(
                &screen,
                &action_button(
                    document,
                    "cd-btn cd-btn-primary cd-btn-block",
                    msg(state, MessageKey::EditProfile),
                    "profile-edit",
                )?,
            );
        }

        append(
            &screen,
            &text_el(document, "label", "cd-label", msg(state, MessageKey::Email))?,
        );
        append(
            &screen,
            &text_el(
                document,
                "div",
                "cd-muted",
                profile.email.as_deref().unwrap_or("-"),
            )?,
        );

        let regen = action_button(
            document,
            "cd-btn cd-btn-block",
            msg(state, MessageKey::RegenImage),
            "profile-regen-avatar",
        )?;
        if surface.regenerating {
            let _ = regen.set_attribute("disabled", "disabled");
        }
        append(&screen, &regen);
        append(
            &screen,
            &action_button(
                document,
                "cd-btn cd-btn-block",
                msg(state, MessageKey::ChangeCharacterSettings),
                "go-character",
            )?,
        );
        append(
            &screen,
            &action_button(
                document,
                "cd-btn cd-btn-block",
                msg(state, MessageKey::Logout),
                "sign-out",
            )?,
        );
        append(
            &screen,
            &action_button(
                document,
                "cd-btn cd-btn-danger cd-btn-block",
                msg(state, MessageKey::Withdraw),
                "profile-withdraw",
            )?,
        );
        Ok(screen)
    }

    fn choice_button(
        document: &Document,
        label: &str,
        selected: bool,
        action: &str,
        value: &str,
    ) -> Result<HtmlElement, String> {
        let class = if selected {
            "cd-choice cd-choice-selected"
        } else {
            "cd-choice"
        };
        let button = action_button(document, class, label, action)?;
        let _ = button.set_attribute("data-value", value);
        Ok(button)
    }

    fn build_character_create(
        document: &Document,
        state: &AppState,
    ) -> Result<HtmlElement, String> {
        let surface = CHARACTER_SURFACE.with(|surface| surface.borrow().clone());
        let screen = el(document, "main", "cd-screen")?;
        let back = action_button(document, "cd-btn", "←", "go-profile")?;
        append(
            &screen,
            &topbar(
                document,
                msg(state, MessageKey::CreateCharacterTitle),
                Some(back),
            )?,
        );

        let header = el(document, "div", "cd-screen cd-centered")?;
        if let Some(preview) = &surface.preview {
            let portrait = el(document, "img", "cd-portrait")?;
            let _ = portrait.set_attribute("src", preview);
            append(&header, &portrait);
            append(
                &header,
                &text_el(document, "h2", "", msg(state, MessageKey::CharacterLikeIt))?,
            );
            append(
                &header,
                &text_el(
                    document,
                    "p",
                    "cd-muted",
                    msg(state, MessageKey::CharacterSaveOrRegen),
                )?,
            );
        } else {
            if surface.generating {
                append(&header, &el(document, "div", "cd-spinner")?);
            }
            append(
                &header,
                &text_el(
                    document,
                    "h2",
                    "",
                    msg(state, MessageKey::CreateCharacterTitle),
                )?,
            );
            append(
                &header,
                &text_el(
                    document,
                    "p",
                    "cd-muted",
                    msg(state, MessageKey::CharacterCreationDescription),
                )?,
            );
        }
        append(&screen, &header);

        if surface.preview.is_none() {
            append(
                &screen,
                &text_el(document, "label", "cd-label", msg(state, MessageKey::Gender))?,
            );
            let genders = el(document, "div", "cd-grid2")?;
            append(
                &genders,
                &choice_button(
                    document,
                    msg(state, MessageKey::Female),
                    surface.gender == Gender::Female,
                    "char-gender",
                    "female",
                )?,
            );
            append(
                &genders,
                &choice_button(
                    document,
                    msg(state, MessageKey::Male),
                    surface.gender == Gender::Male,
                    "char-gender",
                    "male",
                )?,
            );
            append(&screen, &genders);

            append(
                &screen,
                &text_el(
                    document,
                    "label",
                    "cd-label",
                    msg(state, MessageKey::HairStyle),
                )?,
            );
            let hair = el(document, "div", "cd-grid3")?;
            for (length, key, value) in [
                (HairLength::Long, MessageKey::HairLong, "long"),
                (HairLength::Medium, MessageKey::HairMedium, "medium"),
                (HairLength::Short, MessageKey::HairShort, "short"),
            ] {
                append(
                    &hair,
                    &choice_button(
                        document,
                        msg(state, key),
                        surface.hair_length == length,
                        "char-hair",
                        value,
                    )?,
                );
            }
            append(&screen, &hair);

            append(
                &screen,
                &text_el(document, "label", "cd-label", msg(state, MessageKey::Others))?,
            );
            let extras = el(document, "div", "cd-grid2")?;
            append(
                &extras,
                &choice_button(
                    document,
                    msg(state, MessageKey::Glasses),
                    surface.has_glasses,
                    "char-glasses",
                    "",
                )?,
            );
            append(
                &extras,
                &choice_button(
                    document,
                    msg(state, MessageKey::Freckles),
                    surface.has_freckles,
                    "char-freckles",
                    "",
                )?,
            );
            append(&screen, &extras);
        }

        let footer = el(document, "div", "cd-actions")?;
        if surface.preview.is_some() {
            let regen = action_button(
                document,
                "cd-btn",
                msg(state, MessageKey::Regen),
                "char-generate",
            )?;
            if surface.generating {
                let _ = regen.set_attribute("disabled", "disabled");
            }
            append(&footer, &regen);
            append(
                &footer,
                &action_button(
                    document,
                    "cd-btn cd-btn-primary",
                    msg(state, MessageKey::SaveCharacter),
                    "char-save",
                )?,
            );
        } else {
            let label = if surface.generating {
                msg(state, MessageKey::Generating)
            } else {
                msg(state, MessageKey::GenerateCharacter)
            };
            let generate =
                action_button(document, "cd-btn cd-btn-primary", label, "char-generate")?;
            if surface.generating {
                let _ = generate.set_attribute("disabled", "disabled");
            }
            append(&footer, &generate);
        }
        append(&screen, &footer);
        Ok(screen)
    }

    fn mood_face(mood: Mood) -> &'static str {
        match mood {
            Mood::Surprised => "😲",
            Mood::VeryHappy => "😄",
            Mood::SoftSmile => "🙂",
            Mood::Motivated => "💪",
            Mood::Emotionless => "😐",
            Mood::Sad => "😢",
            Mood::Crying => "😭",
            Mood::Curious => "🤔",
        }
    }

    fn build_write(document: &Document, state: &AppState) -> Result<HtmlElement, String> {
        match &state.generate {
            GeneratePhase::ChoosingStyle { .. } => build_style_step(document, state),
            GeneratePhase::Submitting { .. } => {
                build_wait_screen(document, state, MessageKey::GenerateComic)
            }
            _ => build_draft_step(document, state),
        }
    }

    fn build_draft_step(document: &Document, state: &AppState) -> Result<HtmlElement, String> {
        let surface = WRITE_SURFACE.with(|surface| surface.borrow().clone());
        let screen = el(document, "main", "cd-screen")?;
        let back = action_button(document, "cd-btn", "←", "go-home")?;
        append(
            &screen,
            &topbar(document, msg(state, MessageKey::NewDiary), Some(back))?,
        );

        append(
            &screen,
            &text_el(
                document,
                "label",
                "cd-label",
                msg(state, MessageKey::HowWasDay),
            )?,
        );
        let moods = el(document, "div", "cd-mood-row")?;
        for mood in Mood::ALL {
            let class = if mood == surface.mood {
                "cd-mood cd-mood-selected"
            } else {
                "cd-mood"
            };
            let button = action_button(document, class, mood_face(mood), "select-mood")?;
            let _ = button.set_attribute("data-value", mood.as_str());
            let _ = button.set_attribute("title", mood.label(state.language));
            append(&moods, &button);
        }
        append(&screen, &moods);

        append(
            &screen,
            &text_el(
                document,
                "label",
                "cd-label",
                msg(state, MessageKey::WriteStory),
            )?,
        );
        let textarea = el(document, "textarea", "cd-input cd-textarea")?;
        textarea.set_id(WRITE_TEXT_ID);
        let _ = textarea.set_attribute("placeholder", msg(state, MessageKey::WritePlaceholder));
        if let Ok(textarea) = textarea.clone().dyn_into::<HtmlTextAreaElement>() {
            textarea.set_value(&surface.text);
        }
        append(&screen, &textarea);

        let count = text_el(
            document,
            "div",
            "cd-count",
            &format!(
                "{} {}",
                surface.text.chars().count(),
                msg(state, MessageKey::CharsCount)
            ),
        )?;
        count.set_id(WRITE_COUNT_ID);
        append(&screen, &count);

        let footer = el(document, "div", "cd-footer")?;
        let next = action_button(
            document,
            "cd-btn cd-btn-primary cd-btn-block",
            msg(state, MessageKey::TurnIntoComic),
            "write-next",
        )?;
        next.set_id(WRITE_NEXT_ID);
        if !input::diary_text_ready(&surface.text) {
            let _ = next.set_attribute("disabled", "disabled");
        }
        append(&footer, &next);
        append(&screen, &footer);
        Ok(screen)
    }

    fn build_style_step(document: &Document, state: &AppState) -> Result<HtmlElement, String> {
        let surface = WRITE_SURFACE.with(|surface| surface.borrow().clone());
        let screen = el(document, "main", "cd-screen")?;
        let back = action_button(document, "cd-btn", "←", "write-back")?;
        append(
            &screen,
            &topbar(document, msg(state, MessageKey::ChooseStyle), Some(back))?,
        );

        let grid = el(document, "div", "cd-grid2")?;
        for (preset, name_key, desc_key) in [
            (StylePreset::Cute, MessageKey::StyleCute, MessageKey::StyleCuteDesc),
            (
                StylePreset::Comedy,
                MessageKey::StyleComedy,
                MessageKey::StyleComedyDesc,
            ),
            (
                StylePreset::Drama,
                MessageKey::StyleDrama,
                MessageKey::StyleDramaDesc,
            ),
            (
                StylePreset::Minimal,
                MessageKey::StyleSimple,
                MessageKey::StyleSimpleDesc,
            ),
        ] {
            let selected = surface.style == preset;
            let card = choice_button(
                document,
                msg(state, name_key),
                selected,
                "select-style",
                preset.as_str(),
            )?;
            let desc = text_el(document, "span", "cd-choice-desc", msg(state, desc_key))?;
            // Clicks on the description still resolve to the card action.
            let _ = desc.set_attribute("data-action", "select-style");
            let _ = desc.set_attribute("data-value", preset.as_str());
            append(&card, &desc);
            append(&grid, &card);
        }
        append(&screen, &grid);

        let footer = el(document, "div", "cd-footer")?;
        let generate = action_button(
            document,
            "cd-btn cd-btn-primary cd-btn-block",
            msg(state, MessageKey::GenerateComic),
            "style-generate",
        )?;
        if GENERATION_IN_FLIGHT.with(|flag| flag.get()) {
            let _ = generate.set_attribute("disabled", "disabled");
        }
        append(&footer, &generate);
        append(&screen, &footer);
        Ok(screen)
    }

    fn build_wait_screen(
        document: &Document,
        state: &AppState,
        title_key: MessageKey,
    ) -> Result<HtmlElement, String> {
        let screen = el(document, "main", "cd-screen cd-centered")?;
        append(&screen, &el(document, "div", "cd-spinner")?);
        append(&screen, &text_el(document, "h2", "", msg(state, title_key))?);
        append(
            &screen,
            &text_el(document, "p", "cd-muted", msg(state, MessageKey::PleaseWait))?,
        );
        Ok(screen)
    }

    fn build_generating(document: &Document, state: &AppState) -> Result<HtmlElement, String> {
        let screen = build_wait_screen(document, state, MessageKey::CreatingComic)?;
        if let GeneratePhase::Polling {
            last: Some(snapshot),
            ..
        } = &state.generate
        {
            let caption = if snapshot.step.is_empty() {
                format!("{:.0}%", snapshot.progress)
            } else {
                format!("{} · {:.0}%", snapshot.step, snapshot.progress)
            };
            append(&screen, &text_el(document, "p", "cd-muted", &caption)?);
        }
        Ok(screen)
    }

    fn build_regenerating(document: &Document, state: &AppState) -> Result<HtmlElement, String> {
        build_wait_screen(document, state, MessageKey::Regenerate)
    }

    fn build_result(document: &Document, state: &AppState) -> Result<HtmlElement, String> {
        let surface = RESULT_SURFACE.with(|surface| surface.borrow().clone());
        let screen = el(document, "main", "cd-screen")?;
        let back = action_button(document, "cd-btn", "←", "go-home")?;
        append(
            &screen,
            &topbar(document, msg(state, MessageKey::YourComic), Some(back))?,
        );

        let Some(detail) = &surface.detail else {
            append(
                &screen,
                &text_el(document, "div", "cd-muted", msg(state, MessageKey::Loading))?,
            );
            return Ok(screen);
        };

        if !detail.final_strip_url.is_empty() {
            let strip = el(document, "img", "cd-strip")?;
            let _ = strip.set_attribute("src", &detail.final_strip_url);
            append(&screen, &strip);
        }

        let meta = el(document, "div", "cd-row-meta")?;
        if !detail.style_preset.is_empty() {
            append(
                &meta,
                &text_el(document, "span", "cd-badge", &detail.style_preset)?,
            );
        }
        if let Some(date) = &detail.diary_date {
            append(&meta, &text_el(document, "span", "", &date.to_string())?);
        }
        append(&screen, &meta);

        append(
            &screen,
            &text_el(
                document,
                "label",
                "cd-label",
                msg(state, MessageKey::TodayDiary),
            )?,
        );
        append(&screen, &text_el(document, "p", "", &detail.diary_text)?);

        let footer = el(document, "div", "cd-actions")?;
        let regenerate = action_button(
            document,
            "cd-btn",
            msg(state, MessageKey::Regenerate),
            "result-regenerate",
        )?;
        let _ = regenerate.set_attribute("data-artifact-id", &detail.artifact_id);
        append(&footer, &regenerate);
        let share = action_button(
            document,
            "cd-btn cd-btn-primary",
            msg(state, MessageKey::SaveShare),
            "result-share",
        )?;
        let _ = share.set_attribute("data-artifact-id", &detail.artifact_id);
        append(&footer, &share);
        append(&screen, &footer);
        Ok(screen)
    }

    fn build_share(document: &Document, state: &AppState) -> Result<HtmlElement, String> {
        let screen = el(document, "main", "cd-screen cd-centered")?;
        let back = action_button(document, "cd-btn", "←", "go-home")?;
        append(
            &screen,
            &topbar(document, msg(state, MessageKey::SaveShare), Some(back))?,
        );
        append(
            &screen,
            &text_el(document, "p", "cd-muted", msg(state, MessageKey::PleaseWait))?,
        );
        Ok(screen)
    }
