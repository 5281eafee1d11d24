use super::*;

    pub(super) fn install_browser_navigation_handlers() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        ROUTE_POPSTATE_HANDLER.with(|slot| {
            if slot.borrow().is_some() {
                return;
            }
            let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
                let route = AppRoute::from_path_or_landing(&current_pathname());
                apply_route_transition(route, false);
            }));
            let _ = window
                .add_event_listener_with_callback("popstate", callback.as_ref().unchecked_ref());
            *slot.borrow_mut() = Some(callback);
        });

        ROUTE_LINK_CLICK_HANDLER.with(|slot| {
            if slot.borrow().is_some() {
                return;
            }
            let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event| {
                intercept_internal_link_click(event);
            }));
            let _ = document.add_event_listener_with_callback_and_bool(
                "click",
                callback.as_ref().unchecked_ref(),
                true,
            );
            *slot.borrow_mut() = Some(callback);
        });
    }

    pub(super) fn intercept_internal_link_click(event: web_sys::Event) {
        if event.default_prevented() {
            return;
        }
        let Some(mouse_event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        if mouse_event.button() != 0
            || mouse_event.meta_key()
            || mouse_event.ctrl_key()
            || mouse_event.shift_key()
            || mouse_event.alt_key()
        {
            return;
        }

        let Some(anchor) = anchor_from_event(&event) else {
            return;
        };
        let href_attribute = anchor.get_attribute("href").unwrap_or_default();
        if href_attribute.trim().is_empty() || href_attribute.starts_with('#') {
            return;
        }
        let target = anchor.target();
        if !target.is_empty() && target != "_self" {
            return;
        }

        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(origin) = window.location().origin() else {
            return;
        };

        let href = anchor.href();
        if href.is_empty() {
            return;
        }

        let path_with_query = if href.starts_with(&origin) {
            href.strip_prefix(&origin).unwrap_or_default().to_string()
        } else if href.starts_with('/') {
            href
        } else {
            return;
        };

        let path_before_query = path_with_query.split('?').next().unwrap_or_default();
        let path = path_before_query
            .split('#')
            .next()
            .unwrap_or(path_before_query);
        if path.is_empty() || !is_shell_route_path(path) {
            return;
        }

        event.prevent_default();
        let route = AppRoute::from_path_or_landing(path);
        apply_route_transition(route, true);
    }

    pub(super) fn anchor_from_event(event: &web_sys::Event) -> Option<HtmlAnchorElement> {
        let composed_path = event.composed_path();
        for index in 0..composed_path.length() {
            let value = composed_path.get(index);
            if let Ok(anchor) = value.dyn_into::<HtmlAnchorElement>() {
                return Some(anchor);
            }
        }
        None
    }

    pub(super) fn push_route_to_browser_history(route: &AppRoute) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(history) = window.history() else {
            return;
        };
        let route_path = route.to_path();
        if current_pathname() == route_path {
            return;
        }
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&route_path));
    }

    pub(super) fn replace_route_in_browser_history(route: &AppRoute) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(history) = window.history() else {
            return;
        };
        let route_path = route.to_path();
        if current_pathname() == route_path {
            return;
        }
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&route_path));
    }
