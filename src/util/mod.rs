use crate::interop::object_from_pairs;
use wasm_bindgen::JsValue;

pub(crate) fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Local-time `Jan 5, 2024, 03:07 PM` for anything `new Date(value)`
/// accepts; `Invalid Date` otherwise.
pub(crate) fn format_date(value: &JsValue) -> String {
    let d = js_sys::Date::new(value);
    let options = object_from_pairs(&[
        ("year", "numeric".into()),
        ("month", "short".into()),
        ("day", "numeric".into()),
        ("hour", "2-digit".into()),
        ("minute", "2-digit".into()),
    ]);
    d.to_locale_date_string("en-US", &options).into()
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// jQuery's default "swing" easing.
pub(crate) fn swing(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    0.5 - (p * std::f64::consts::PI).cos() / 2.0
}
