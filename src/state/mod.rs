use crate::api::ApiClient;
use crate::bridge;
use crate::config::UiConfig;
use crate::dom::{self, DomResult, ListenerSet};
use crate::editor::{self, Editor};
use crate::enhance;
use crate::forms::{self, Forms};
use crate::notify::Notifier;
use crate::scroll::SmoothScroll;
use crate::search::Search;
use crate::shortcuts;
use crate::theme;
use leptos::ev;
use leptos::logging::{log, warn};
use leptos::prelude::RwSignal;
use leptos_dom::helpers::window_event_listener;
use std::cell::RefCell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

thread_local! {
    static CONTROLLER: RefCell<Option<UiController>> = const { RefCell::new(None) };
}

fn report<T: std::fmt::Debug>(step: &str, r: DomResult<T>) {
    match r {
        Ok(v) => log!("[ui] {step}: {v:?}"),
        Err(e) => warn!("[ui] {step} skipped: {e}"),
    }
}

/// Page-scoped owner of every behavior attached to the document.
///
/// Constructed once per page by [`UiController::install`] and torn down on
/// a `pagehide` that is not headed for the back/forward cache. The unsaved-change flag lives in the editor and guard
/// closures; debounce timers live inside `search` and `editor`.
#[derive(Clone)]
pub(crate) struct UiController {
    pub notifier: Notifier,
    pub forms: Forms,

    listeners: ListenerSet,
    search: Option<Search>,
    editor: Option<Editor>,
}

impl UiController {
    /// Starts the controller once the document has been parsed.
    pub fn install() {
        let Ok(doc) = dom::document() else {
            warn!("[ui] no document, nothing to attach");
            return;
        };
        if doc.ready_state() != "loading" {
            Self::install_now();
            return;
        }
        let cb = Closure::once_into_js(Self::install_now);
        if let Err(e) = doc.add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref()) {
            warn!("[ui] could not defer start: {e:?}");
        }
    }

    fn install_now() {
        let already = CONTROLLER.with(|c| c.borrow().is_some());
        if already {
            return;
        }
        let controller = Self::start(UiConfig::load());
        bridge::install(&controller);
        CONTROLLER.with(|c| *c.borrow_mut() = Some(controller));
    }

    pub fn start(config: UiConfig) -> Self {
        log!("[ui] starting (api: {})", config.api_url);

        let api = ApiClient::from_config(&config);
        let notifier = Notifier::new(config.alert_dismiss_ms);
        let forms = Forms::new(api.clone(), notifier);
        let unsaved = RwSignal::new(false);
        let listeners = ListenerSet::default();

        let search = match Search::attach(&config, api.clone(), &listeners) {
            Ok(s) => s,
            Err(e) => {
                warn!("[ui] search skipped: {e}");
                None
            }
        };

        log!("[ui] tooltips: {}", enhance::init_tooltips());
        report(
            "scrollspy sections",
            enhance::attach_scrollspy(config.scroll_offset_px, &listeners),
        );
        report(
            "code blocks",
            enhance::enhance_code_blocks(config.copy_feedback_ms, &listeners),
        );
        report("tables wrapped", enhance::enhance_tables());

        report(
            "anchor links",
            SmoothScroll::new(&config).attach(&listeners),
        );
        report("auto-resize textareas", forms::attach_auto_resize(&listeners));
        report("validated forms", forms::attach_validation(&listeners));
        report(
            "loading buttons",
            forms::attach_loading_buttons(config.loading_reset_ms, &listeners),
        );
        shortcuts::attach_shortcuts(search.clone(), &listeners);
        report(
            "theme switchers",
            theme::attach_theme_switcher(api, &listeners),
        );

        let editor = match Editor::attach(&config, unsaved, &listeners) {
            Ok(e) => e,
            Err(e) => {
                warn!("[ui] editor skipped: {e}");
                None
            }
        };
        report("unsaved guard", editor::attach_unsaved_guard(unsaved, &listeners));

        let controller = Self {
            notifier,
            forms,
            listeners,
            search,
            editor,
        };

        let c2 = controller.clone();
        controller
            .listeners
            .keep(window_event_listener(ev::pagehide, move |ev: web_sys::PageTransitionEvent| {
                c2.on_pagehide(ev.persisted());
            }));

        if let Some(editor) = &controller.editor {
            editor.offer_restore();
        }

        log!("[ui] ready ({} listeners)", controller.listeners.len());
        controller
    }

    /// A page entering the back/forward cache is restored later without a
    /// new load, so it keeps every behavior attached.
    fn on_pagehide(&self, persisted: bool) {
        if persisted {
            log!("[ui] page cached, keeping listeners");
            return;
        }
        self.shutdown();
        CONTROLLER.with(|c| c.borrow_mut().take());
    }

    /// Detaches every listener and drops pending debounced work.
    pub fn shutdown(&self) {
        if let Some(s) = &self.search {
            s.cancel_pending();
        }
        if let Some(e) = &self.editor {
            e.cancel_pending();
        }
        self.listeners.clear();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn pagehide(persisted: bool) {
        let init = web_sys::PageTransitionEventInit::new();
        init.set_persisted(persisted);
        let ev = web_sys::PageTransitionEvent::new_with_event_init_dict("pagehide", &init).unwrap();
        web_sys::window().unwrap().dispatch_event(&ev).unwrap();
    }

    fn mount_code_block() -> web_sys::Element {
        let doc = dom::document().unwrap();
        let wrapper = doc.create_element("div").unwrap();
        wrapper.set_inner_html("<pre><code>cargo build</code></pre>");
        doc.body().unwrap().append_child(&wrapper).unwrap();
        wrapper
    }

    #[wasm_bindgen_test]
    fn test_cached_pagehide_keeps_behaviors() {
        let w = mount_code_block();
        let controller = UiController::start(UiConfig::with_origin("http://127.0.0.1:9"));
        let attached = controller.listeners.len();
        assert!(attached > 0);

        pagehide(true);
        assert_eq!(controller.listeners.len(), attached);

        let btn: web_sys::HtmlElement = w
            .query_selector(".copy-btn")
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();
        btn.click();
        assert_eq!(btn.text_content().as_deref(), Some("Copied!"));

        controller.shutdown();
        w.remove();
    }

    #[wasm_bindgen_test]
    fn test_unloading_pagehide_detaches_everything() {
        let controller = UiController::start(UiConfig::with_origin("http://127.0.0.1:9"));
        assert!(controller.listeners.len() > 0);

        pagehide(false);
        assert_eq!(controller.listeners.len(), 0);
    }
}
