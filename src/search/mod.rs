use crate::api::ApiClient;
use crate::config::UiConfig;
use crate::dom::{self, add_class, remove_class, DomResult, ListenerSet};
use crate::models::SearchResult;
use crate::timers::Debouncer;
use crate::util::escape_html;
use leptos::ev;
use leptos::logging::warn;
use leptos_dom::helpers::window_event_listener;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

pub(crate) const INPUT_ID: &str = "search-input";
pub(crate) const RESULTS_ID: &str = "search-results";
pub(crate) const FORM_ID: &str = "search-form";
pub(crate) const HIDDEN_CLASS: &str = "d-none";

pub(crate) const MIN_QUERY_CHARS: usize = 2;
pub(crate) const RESULT_LIMIT: u32 = 5;

/// Trimmed query, or `None` when too short to send.
pub(crate) fn normalize_query(raw: &str) -> Option<String> {
    let q = raw.trim();
    (q.chars().count() >= MIN_QUERY_CHARS).then(|| q.to_string())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SearchPanel {
    Searching,
    Results(Vec<SearchResult>),
    Failed,
}

impl SearchPanel {
    pub fn html(&self) -> String {
        match self {
            Self::Searching => r#"<div class="p-2 text-muted">Searching...</div>"#.to_string(),
            Self::Failed => r#"<div class="p-2 text-danger">Search failed</div>"#.to_string(),
            Self::Results(results) if results.is_empty() => {
                r#"<div class="p-2 text-muted">No results found</div>"#.to_string()
            }
            Self::Results(results) => results.iter().map(result_item_html).collect(),
        }
    }
}

/// Title is text, snippet is trusted markup from the search backend.
fn result_item_html(r: &SearchResult) -> String {
    format!(
        r#"<div class="search-result-item" data-slug="{slug}"><div class="search-result-title">{title}</div><div class="search-result-snippet">{snippet}</div></div>"#,
        slug = escape_html(&r.slug),
        title = escape_html(&r.title),
        snippet = r.snippet,
    )
}

/// Slug of the result entry containing `target`, if any.
pub(crate) fn result_slug(target: &web_sys::Element) -> Option<String> {
    target
        .closest(".search-result-item")
        .ok()
        .flatten()
        .and_then(|item| item.get_attribute("data-slug"))
}

/// Live search box: debounced lookups rendered into the results panel.
#[derive(Clone)]
pub(crate) struct Search {
    input: web_sys::HtmlInputElement,
    results: web_sys::HtmlElement,
    api: ApiClient,
    debounce: Debouncer,

    /// Bumped per lookup; responses from older lookups are dropped.
    seq: Rc<Cell<u64>>,
}

impl Search {
    /// Wires the search box if the page has one.
    pub fn attach(cfg: &UiConfig, api: ApiClient, listeners: &ListenerSet) -> DomResult<Option<Self>> {
        let Ok(input) = dom::by_id::<web_sys::HtmlInputElement>(INPUT_ID) else {
            return Ok(None);
        };
        let results = dom::by_id::<web_sys::HtmlElement>(RESULTS_ID)?;

        let s = Self {
            input,
            results,
            api,
            debounce: Debouncer::new(cfg.search_debounce_ms),
            seq: Rc::new(Cell::new(0)),
        };

        let s2 = s.clone();
        listeners.on(&s.input, "input", move |_| s2.on_input())?;

        // Result items carry their slug; one delegated handler navigates.
        listeners.on(&s.results, "click", move |ev| {
            if let Some(slug) = dom::event_element(&ev).and_then(|el| result_slug(&el)) {
                let _ = leptos::prelude::window().location().set_href(&slug);
            }
        })?;

        let s3 = s.clone();
        listeners.keep(window_event_listener(ev::click, move |ev: web_sys::MouseEvent| {
            let inside = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                .and_then(|el| el.closest(&format!("#{FORM_ID}")).ok().flatten())
                .is_some();
            if !inside {
                s3.hide();
            }
        }));

        Ok(Some(s))
    }

    fn on_input(&self) {
        match normalize_query(&self.input.value()) {
            None => {
                self.debounce.cancel();
                self.clear();
            }
            Some(query) => {
                let s2 = self.clone();
                self.debounce.schedule(move || s2.lookup(query));
            }
        }
    }

    fn lookup(&self, query: String) {
        let id = self.seq.get() + 1;
        self.seq.set(id);
        self.render(&SearchPanel::Searching);

        let s2 = self.clone();
        spawn_local(async move {
            let panel = match s2.api.search(&query, RESULT_LIMIT).await {
                Ok(results) => SearchPanel::Results(results),
                Err(e) => {
                    warn!("[search] lookup for {query:?} failed: {e}");
                    SearchPanel::Failed
                }
            };
            if s2.seq.get() == id {
                s2.render(&panel);
            }
        });
    }

    pub fn render(&self, panel: &SearchPanel) {
        remove_class(&self.results, HIDDEN_CLASS);
        self.results.set_inner_html(&panel.html());
    }

    /// Hidden and emptied; any response still in flight is discarded.
    pub fn clear(&self) {
        self.seq.set(self.seq.get() + 1);
        add_class(&self.results, HIDDEN_CLASS);
        self.results.set_inner_html("");
    }

    pub fn hide(&self) {
        add_class(&self.results, HIDDEN_CLASS);
    }

    pub fn focus(&self) {
        let _ = self.input.focus();
    }

    pub fn cancel_pending(&self) {
        self.debounce.cancel();
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    fn has_pending_lookup(&self) -> bool {
        self.debounce.is_pending()
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_search_markup() {
        let doc = dom::document().unwrap();
        if let Some(old) = doc.get_element_by_id(FORM_ID) {
            old.remove();
        }
        let wrapper = doc.create_element("div").unwrap();
        wrapper.set_inner_html(&format!(
            r#"<form id="{FORM_ID}"><input id="{INPUT_ID}"><div id="{RESULTS_ID}" class="{HIDDEN_CLASS}"></div></form>"#
        ));
        let form = wrapper.first_element_child().unwrap();
        doc.body().unwrap().append_child(&form).unwrap();
    }

    fn type_into(input: &web_sys::HtmlInputElement, value: &str) {
        input.set_value(value);
        let ev = web_sys::Event::new("input").unwrap();
        input.dispatch_event(&ev).unwrap();
    }

    fn attach() -> (Search, ListenerSet) {
        mount_search_markup();
        let mut cfg = UiConfig::with_origin("http://127.0.0.1:9");
        cfg.search_debounce_ms = 40;
        let listeners = ListenerSet::default();
        let s = Search::attach(&cfg, ApiClient::from_config(&cfg), &listeners)
            .unwrap()
            .expect("search markup is mounted");
        (s, listeners)
    }

    #[wasm_bindgen_test]
    async fn test_short_query_hides_and_issues_nothing() {
        let (s, listeners) = attach();
        s.results.set_inner_html("stale");
        remove_class(&s.results, HIDDEN_CLASS);

        type_into(&s.input, " a ");
        assert!(!s.has_pending_lookup());
        assert!(dom::has_class(&s.results, HIDDEN_CLASS));
        assert_eq!(s.results.inner_html(), "");

        TimeoutFuture::new(80).await;
        assert_eq!(s.seq.get(), 1); // only the clear, never a lookup
        listeners.clear();
    }

    #[wasm_bindgen_test]
    async fn test_rapid_edits_collapse_to_one_lookup() {
        let (s, listeners) = attach();
        let before = s.seq.get();

        type_into(&s.input, "ru");
        TimeoutFuture::new(10).await;
        type_into(&s.input, "rus");
        TimeoutFuture::new(10).await;
        type_into(&s.input, "rust");
        assert!(s.has_pending_lookup());
        assert_eq!(s.seq.get(), before);

        TimeoutFuture::new(80).await;
        assert_eq!(s.seq.get(), before + 1);
        assert!(!dom::has_class(&s.results, HIDDEN_CLASS));
        listeners.clear();
    }

    #[wasm_bindgen_test]
    fn test_result_slug_from_nested_target() {
        let (s, listeners) = attach();
        s.render(&SearchPanel::Results(vec![
            SearchResult {
                title: "Install".to_string(),
                snippet: "how to <mark>install</mark>".to_string(),
                slug: "/docs/install".to_string(),
            },
            SearchResult {
                title: "Usage".to_string(),
                snippet: String::new(),
                slug: "/docs/usage".to_string(),
            },
        ]));

        let titles = dom::query_all_in::<web_sys::Element>(&s.results, ".search-result-title");
        assert_eq!(result_slug(&titles[1]).as_deref(), Some("/docs/usage"));

        let mark: web_sys::Element = s.results.query_selector("mark").unwrap().unwrap();
        assert_eq!(result_slug(&mark).as_deref(), Some("/docs/install"));

        assert_eq!(result_slug(&s.results), None);
        listeners.clear();
    }

    #[wasm_bindgen_test]
    fn test_outside_click_hides_results() {
        let (s, listeners) = attach();
        s.render(&SearchPanel::Results(vec![]));
        assert!(!dom::has_class(&s.results, HIDDEN_CLASS));

        let body = dom::document().unwrap().body().unwrap();
        body.click();
        assert!(dom::has_class(&s.results, HIDDEN_CLASS));
        listeners.clear();
    }
}
