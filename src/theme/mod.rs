use crate::api::ApiClient;
use crate::dom::{self, DomResult, ListenerSet};
use leptos::logging::warn;
use leptos::prelude::window;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

pub(crate) const THEME_FAILED: &str = "Theme change failed";

fn control_value(el: &web_sys::Element) -> Option<String> {
    if let Some(select) = el.dyn_ref::<web_sys::HtmlSelectElement>() {
        return Some(select.value());
    }
    el.dyn_ref::<web_sys::HtmlInputElement>().map(|i| i.value())
}

/// `.theme-switcher` posts the choice and reloads on success.
pub(crate) fn attach_theme_switcher(api: ApiClient, listeners: &ListenerSet) -> DomResult<usize> {
    let switchers: Vec<web_sys::Element> = dom::query_all(".theme-switcher");
    for el in &switchers {
        let api = api.clone();
        let el2 = el.clone();
        listeners.on(el, "change", move |_| {
            let Some(theme) = control_value(&el2) else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                match api.set_theme(&theme).await {
                    Ok(()) => {
                        let _ = window().location().reload();
                    }
                    Err(e) => {
                        warn!("[theme] change to {theme:?} failed: {e}");
                        let _ = window().alert_with_message(THEME_FAILED);
                    }
                }
            });
        })?;
    }
    Ok(switchers.len())
}
