// outbound events for the page around the terminal
use crate::session::Effect;

pub const OPEN_APP: &str = "linkos:open-app";
pub const SWITCH_SITE_THEME: &str = "linkos:switch-site-theme";
pub const TERMINAL_THEME: &str = "linkos:terminal-theme";
pub const CLOSE_TERMINAL: &str = "linkos:close-terminal";

pub fn event_name(effect: &Effect) -> &'static str {
    match effect {
        Effect::OpenApp { .. } => OPEN_APP,
        Effect::SwitchSiteTheme { .. } => SWITCH_SITE_THEME,
        Effect::TerminalTheme { .. } => TERMINAL_THEME,
        Effect::CloseTerminal => CLOSE_TERMINAL,
    }
}

pub fn event_detail(effect: &Effect) -> serde_json::Value {
    match effect {
        Effect::OpenApp { app } => serde_json::json!({ "app": app }),
        Effect::SwitchSiteTheme { theme } => serde_json::json!({ "theme": theme }),
        Effect::TerminalTheme { theme } => {
            let colors = crate::theme::find(theme);
            serde_json::json!({ "theme": theme, "colors": colors })
        }
        Effect::CloseTerminal => serde_json::json!({}),
    }
}

/// dispatch an effect as a CustomEvent on window. a `__linkosCallback`
/// function on window, when present, gets the event instead
#[cfg(target_arch = "wasm32")]
pub fn emit(effect: &Effect) {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CustomEvent, CustomEventInit};

    let name = event_name(effect);
    let Some(win) = web_sys::window() else {
        log::warn!("events: no window, dropping {}", name);
        return;
    };
    let detail = serde_wasm_bindgen::to_value(&event_detail(effect)).unwrap_or(JsValue::NULL);

    if let Ok(callback) = js_sys::Reflect::get(win.as_ref(), &"__linkosCallback".into()) {
        if let Ok(callback) = callback.dyn_into::<js_sys::Function>() {
            match callback.call2(&JsValue::NULL, &name.into(), &detail) {
                Ok(_) => return,
                Err(e) => log::error!("events: callback failed for {}: {:?}", name, e),
            }
        }
    }

    let mut init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_detail(&detail);
    match CustomEvent::new_with_event_init_dict(name, &init) {
        Ok(event) => {
            if let Err(e) = win.dispatch_event(&event) {
                log::error!("events: dispatch of {} failed: {:?}", name, e);
            } else {
                log::debug!("events: sent {}", name);
            }
        }
        Err(e) => log::error!("events: could not create {}: {:?}", name, e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn emit(effect: &Effect) {
    log::info!("event {} {}", event_name(effect), event_detail(effect));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::SiteTheme;

    #[test]
    fn test_event_names_and_detail() {
        let open = Effect::OpenApp { app: "portfolio".to_string() };
        assert_eq!(event_name(&open), "linkos:open-app");
        assert_eq!(event_detail(&open)["app"], "portfolio");

        let site = Effect::SwitchSiteTheme { theme: SiteTheme::Light };
        assert_eq!(event_detail(&site)["theme"], "light");

        let term = Effect::TerminalTheme { theme: "matrix".to_string() };
        assert_eq!(event_name(&term), "linkos:terminal-theme");
        assert_eq!(event_detail(&term)["colors"]["foreground"], "#00ff41");

        assert_eq!(event_name(&Effect::CloseTerminal), "linkos:close-terminal");
        assert_eq!(event_detail(&Effect::CloseTerminal), serde_json::json!({}));
    }
}
