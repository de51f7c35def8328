/// Runtime knobs for the behavior layer.
///
/// Pages may override any of these through `window.ENV` (see [`UiConfig::load`]).
/// Timings are in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UiConfig {
    pub api_url: String,
    pub search_debounce_ms: i32,
    pub autosave_ms: i32,
    pub copy_feedback_ms: i32,
    pub loading_reset_ms: i32,
    pub alert_dismiss_ms: i32,
    pub scroll_duration_ms: i32,
    pub scroll_offset_px: i32,
}

impl UiConfig {
    pub fn with_origin(origin: &str) -> Self {
        Self {
            api_url: origin.trim_end_matches('/').to_string(),
            search_debounce_ms: 300,
            autosave_ms: 2000,
            copy_feedback_ms: 1000,
            loading_reset_ms: 5000,
            alert_dismiss_ms: 5000,
            scroll_duration_ms: 600,
            scroll_offset_px: 100,
        }
    }

    /// Reads `window.ENV` on top of the defaults.
    ///
    /// We accept both `API_URL` and `api_url` spellings for every key.
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::with_origin("");
        };
        let origin = window.location().origin().unwrap_or_default();

        let env = window
            .get("ENV")
            .filter(|env| env.is_object())
            .and_then(|env| js_sys::JSON::stringify(&env).ok())
            .and_then(|s| s.as_string())
            .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).ok())
            .unwrap_or(serde_json::Value::Null);

        Self::from_env(&origin, &env)
    }

    pub(crate) fn from_env(origin: &str, env: &serde_json::Value) -> Self {
        let mut cfg = Self::with_origin(origin);

        let lookup = |key: &str| {
            env.get(key)
                .or_else(|| env.get(key.to_lowercase()))
                .filter(|v| !v.is_null())
        };

        if let Some(url) = lookup("API_URL").and_then(|v| v.as_str()) {
            if !url.trim().is_empty() {
                cfg.api_url = url.trim().trim_end_matches('/').to_string();
            }
        }

        let ms = |key: &str, default: i32| -> i32 {
            lookup(key)
                .and_then(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok())))
                .filter(|n| (0..=i32::MAX as i64).contains(n))
                .map(|n| n as i32)
                .unwrap_or(default)
        };

        cfg.search_debounce_ms = ms("SEARCH_DEBOUNCE_MS", cfg.search_debounce_ms);
        cfg.autosave_ms = ms("AUTOSAVE_MS", cfg.autosave_ms);
        cfg.copy_feedback_ms = ms("COPY_FEEDBACK_MS", cfg.copy_feedback_ms);
        cfg.loading_reset_ms = ms("LOADING_RESET_MS", cfg.loading_reset_ms);
        cfg.alert_dismiss_ms = ms("ALERT_DISMISS_MS", cfg.alert_dismiss_ms);
        cfg.scroll_duration_ms = ms("SCROLL_DURATION_MS", cfg.scroll_duration_ms);
        cfg.scroll_offset_px = ms("SCROLL_OFFSET_PX", cfg.scroll_offset_px);

        cfg
    }
}
