use crate::config::UiConfig;
use crate::dom::{self, DomResult, ListenerSet};
use crate::drafts;
use crate::timers::Debouncer;
use leptos::ev;
use leptos::logging::log;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;

pub(crate) const CONTENT_ID: &str = "content";
pub(crate) const FORM_ID: &str = "editor-form";
pub(crate) const PATH_SELECTOR: &str = r#"input[name="path"]"#;

pub(crate) const UNLOAD_WARNING: &str =
    "You have unsaved changes. Are you sure you want to leave?";

/// The native leave-page prompt is requested only with unsaved changes.
pub(crate) fn unload_prompt(unsaved: bool) -> Option<&'static str> {
    unsaved.then_some(UNLOAD_WARNING)
}

/// Local draft autosave for the page editor.
///
/// Drafts are keyed by the document path and are never removed here, so a
/// draft written before a successful save is offered again on next load.
#[derive(Clone)]
pub(crate) struct Editor {
    content: web_sys::HtmlTextAreaElement,
    unsaved: RwSignal<bool>,
    autosave: Debouncer,
}

impl Editor {
    /// Wires autosave if the page has a content field.
    pub fn attach(
        cfg: &UiConfig,
        unsaved: RwSignal<bool>,
        listeners: &ListenerSet,
    ) -> DomResult<Option<Self>> {
        let Ok(content) = dom::by_id::<web_sys::HtmlTextAreaElement>(CONTENT_ID) else {
            return Ok(None);
        };

        let e = Self {
            content,
            unsaved,
            autosave: Debouncer::new(cfg.autosave_ms),
        };

        let e2 = e.clone();
        listeners.on(&e.content, "input", move |_| e2.on_input())?;

        Ok(Some(e))
    }

    fn path() -> String {
        dom::query::<web_sys::HtmlInputElement>(PATH_SELECTOR)
            .map(|i| i.value())
            .unwrap_or_default()
    }

    fn on_input(&self) {
        self.unsaved.set(true);
        let e2 = self.clone();
        self.autosave.schedule(move || e2.save_draft());
    }

    fn save_draft(&self) {
        let path = Self::path();
        if drafts::save_draft(&path, &self.content.value()) {
            log!("[editor] auto-saved draft for {path}");
        }
    }

    /// Offers a stored draft that differs from the rendered content.
    pub fn offer_restore(&self) {
        let path = Self::path();
        let Some(draft) = drafts::restorable(drafts::load_draft(&path), &self.content.value())
        else {
            return;
        };

        let accepted = window()
            .confirm_with_message(drafts::RESTORE_PROMPT)
            .unwrap_or(false);
        if accepted {
            self.content.set_value(&draft);
            self.unsaved.set(true);
        }
    }

    pub fn cancel_pending(&self) {
        self.autosave.cancel();
    }
}

/// Submitting the editor form clears the flag; leaving the page with the
/// flag set asks the browser for its confirmation prompt.
pub(crate) fn attach_unsaved_guard(unsaved: RwSignal<bool>, listeners: &ListenerSet) -> DomResult<()> {
    if let Ok(form) = dom::by_id::<web_sys::HtmlFormElement>(FORM_ID) {
        listeners.on(&form, "submit", move |_| unsaved.set(false))?;
    }

    listeners.keep(window_event_listener(
        ev::beforeunload,
        move |ev: web_sys::BeforeUnloadEvent| {
            if let Some(msg) = unload_prompt(unsaved.get_untracked()) {
                ev.prevent_default();
                ev.set_return_value(msg);
            }
        },
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unload_prompt_only_when_unsaved() {
        assert_eq!(unload_prompt(false), None);
        assert_eq!(unload_prompt(true), Some(UNLOAD_WARNING));
    }
}
