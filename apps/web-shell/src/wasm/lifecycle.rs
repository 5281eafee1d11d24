use super::*;

    pub(super) fn set_boot_phase(phase: &str, detail: &str) {
        update_status_dom(phase, detail, false);
    }

    pub(super) fn set_boot_error(message: &str) {
        console_warn(message);
        update_status_dom("error", message, true);
    }

    pub(super) fn update_status_dom(phase: &str, detail: &str, is_error: bool) {
        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                if let Some(status) = document.get_element_by_id(BOOT_STATUS_ID) {
                    if let Ok(status) = status.dyn_into::<HtmlElement>() {
                        let label = if is_error { "Boot error" } else { "Boot" };
                        status.set_inner_text(&format!("{label}: {phase} ({detail})"));
                        // Only the failure state stays visible.
                        let display = if is_error { "block" } else { "none" };
                        let _ = status.style().set_property("display", display);
                    }
                }
            }
        }
    }

    pub(super) fn console_warn(message: &str) {
        web_sys::console::warn_1(&JsValue::from_str(message));
    }

    pub(super) fn epoch_millis_now() -> u64 {
        let now = js_sys::Date::now();
        if !now.is_finite() || now.is_sign_negative() {
            return 0;
        }
        now.floor().min(u64::MAX as f64) as u64
    }

    pub(super) fn current_pathname() -> String {
        let Some(window) = web_sys::window() else {
            return "/".to_string();
        };
        let Ok(pathname) = window.location().pathname() else {
            return "/".to_string();
        };
        if pathname.trim().is_empty() {
            "/".to_string()
        } else {
            pathname
        }
    }
