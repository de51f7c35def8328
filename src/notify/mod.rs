use crate::dom::{self, add_class, DomResult, Listener};
use crate::interop;
use crate::timers::run_after;
use leptos::logging::warn;
use strum::{Display, EnumString};
use wasm_bindgen::JsCast;

/// Bootstrap contextual color, used as the `alert-*` / `bg-*` suffix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum AlertKind {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    #[default]
    Info,
    Light,
    Dark,
}

impl AlertKind {
    /// Unknown names fall back to `Info`.
    pub fn parse_lenient(s: &str) -> Self {
        s.trim().to_lowercase().parse().unwrap_or_default()
    }
}

const ALERT_STYLE: &str = "position: fixed; top: 20px; right: 20px; z-index: 9999; max-width: 350px;";

pub(crate) fn alert_class(kind: AlertKind) -> String {
    format!("alert alert-{kind} alert-dismissible fade show")
}

pub(crate) fn toast_class(kind: AlertKind) -> String {
    format!("toast align-items-center text-white bg-{kind} border-0")
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Notifier {
    dismiss_ms: i32,
}

impl Notifier {
    pub fn new(dismiss_ms: i32) -> Self {
        Self { dismiss_ms }
    }

    /// Fixed-position dismissible alert; `message` is inserted as HTML.
    pub fn alert(&self, kind: AlertKind, message: &str) {
        if let Err(e) = self.try_alert(kind, message) {
            warn!("[notify] alert not shown: {e}");
        }
    }

    fn try_alert(&self, kind: AlertKind, message: &str) -> DomResult<()> {
        let doc = dom::document()?;
        let body = doc.body().ok_or_else(|| dom::DomError::NotFound("body".into()))?;

        let el = doc.create_element("div")?;
        el.set_class_name(&alert_class(kind));
        el.set_attribute("role", "alert")?;
        el.set_attribute("style", ALERT_STYLE)?;
        el.set_inner_html(&format!(
            "{message}<button type=\"button\" class=\"btn-close\" data-bs-dismiss=\"alert\"></button>"
        ));
        body.append_child(&el)?;

        // Without Bootstrap the close button needs its own handler. It lives
        // as long as the alert does.
        let close = if interop::has_bootstrap() {
            None
        } else {
            match el.query_selector(".btn-close")? {
                Some(btn) => {
                    let target = el.clone();
                    Some(Listener::attach(&btn, "click", move |_| target.remove())?)
                }
                None => None,
            }
        };

        run_after(self.dismiss_ms, move || {
            el.remove();
            drop(close);
        });
        Ok(())
    }

    /// Toast inside `.toast-container`. No-op when the page has no container.
    pub fn toast(&self, kind: AlertKind, message: &str) {
        if let Err(e) = self.try_toast(kind, message) {
            warn!("[notify] toast not shown: {e}");
        }
    }

    fn try_toast(&self, kind: AlertKind, message: &str) -> DomResult<()> {
        let doc = dom::document()?;
        let container: web_sys::Element = dom::query(".toast-container")?;

        let el = doc.create_element("div")?;
        el.set_class_name(&toast_class(kind));
        el.set_attribute("role", "alert")?;
        el.set_inner_html(&format!(
            "<div class=\"d-flex\"><div class=\"toast-body\">{message}</div>\
             <button type=\"button\" class=\"btn-close btn-close-white me-2 m-auto\" data-bs-dismiss=\"toast\"></button></div>"
        ));
        container.append_child(&el)?;

        if interop::show_toast(&el) {
            let target = el.clone();
            let cb = wasm_bindgen::closure::Closure::once_into_js(move || target.remove());
            el.add_event_listener_with_callback("hidden.bs.toast", cb.unchecked_ref())?;
        } else {
            add_class(&el, "show");
            run_after(self.dismiss_ms, move || el.remove());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_kind_parse_lenient() {
        assert_eq!(AlertKind::parse_lenient("success"), AlertKind::Success);
        assert_eq!(AlertKind::parse_lenient(" Danger "), AlertKind::Danger);
        assert_eq!(AlertKind::parse_lenient("sparkly"), AlertKind::Info);
        assert_eq!(AlertKind::parse_lenient(""), AlertKind::Info);
    }

    #[test]
    fn test_alert_and_toast_classes() {
        assert_eq!(
            alert_class(AlertKind::Danger),
            "alert alert-danger alert-dismissible fade show"
        );
        assert_eq!(
            toast_class(AlertKind::Info),
            "toast align-items-center text-white bg-info border-0"
        );
    }
}
