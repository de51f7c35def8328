use crate::dom::{self, DomResult, ListenerSet};
use crate::editor;
use crate::interop;
use crate::search::{self, Search};
use leptos::ev;
use leptos::logging::warn;
use leptos_dom::helpers::window_event_listener;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shortcut {
    /// Ctrl/Cmd+S
    Save,
    /// Ctrl/Cmd+/
    FocusSearch,
    /// Escape, with or without modifiers.
    Close,
}

impl Shortcut {
    pub fn classify(key: &str, ctrl_or_meta: bool) -> Option<Self> {
        match key {
            "Escape" | "Esc" => Some(Self::Close),
            "s" | "S" if ctrl_or_meta => Some(Self::Save),
            "/" if ctrl_or_meta => Some(Self::FocusSearch),
            _ => None,
        }
    }
}

/// `form.submit()` skips `submit` listeners, so they get a dispatched event
/// first. A listener cancelling it also cancels the submission.
fn fallback_submit(form: &web_sys::HtmlFormElement) -> DomResult<()> {
    let ev = dom::cancelable_event("submit")?;
    if form.dispatch_event(&ev)? {
        form.submit()?;
    }
    Ok(())
}

fn run(shortcut: Shortcut, ev: &web_sys::KeyboardEvent, search: Option<&Search>) {
    match shortcut {
        Shortcut::Save => {
            // request_submit fires `submit`, which clears the unsaved flag.
            if let Ok(form) = dom::by_id::<web_sys::HtmlFormElement>(editor::FORM_ID) {
                ev.prevent_default();
                if form.request_submit().is_err() {
                    if let Err(e) = fallback_submit(&form) {
                        warn!("[shortcuts] save failed: {e}");
                    }
                }
            }
        }
        Shortcut::FocusSearch => {
            ev.prevent_default();
            match search {
                Some(s) => s.focus(),
                None => {
                    if let Ok(input) = dom::by_id::<web_sys::HtmlElement>(search::INPUT_ID) {
                        let _ = input.focus();
                    }
                }
            }
        }
        Shortcut::Close => {
            match search {
                Some(s) => s.hide(),
                None => {
                    if let Ok(results) = dom::by_id::<web_sys::Element>(search::RESULTS_ID) {
                        dom::add_class(&results, search::HIDDEN_CLASS);
                    }
                }
            }
            for modal in dom::query_all::<web_sys::Element>(".modal") {
                interop::close_modal(&modal);
            }
        }
    }
}

pub(crate) fn attach_shortcuts(search: Option<Search>, listeners: &ListenerSet) {
    listeners.keep(window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        let Some(shortcut) = Shortcut::classify(&ev.key(), ev.ctrl_key() || ev.meta_key()) else {
            return;
        };
        run(shortcut, &ev, search.as_ref());
    }));
}
