mod table;

pub(crate) use table::{build_records, read_table, table_id};

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::dom::{self, add_class, DomError, DomResult, ListenerSet};
use crate::interop;
use crate::notify::{AlertKind, Notifier};
use crate::timers::run_after;
use crate::util::escape_html;
use leptos::logging::{log, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

pub(crate) const FORM_SUCCESS_DEFAULT: &str = "Form submitted successfully!";
pub(crate) const DATA_SUCCESS_DEFAULT: &str = "Data saved successfully!";
pub(crate) const TABLE_NOT_FOUND: &str = "Data table not found.";
pub(crate) const LOADING_DEFAULT: &str = "Loading...";

pub(crate) fn form_error_message(e: &ApiError) -> String {
    format!("Error submitting form: {}", escape_html(&e.to_string()))
}

pub(crate) fn data_error_message(e: &ApiError) -> String {
    format!("Error saving data: {}", escape_html(&e.to_string()))
}

/// Text-valued entries of the form. File inputs are skipped.
pub(crate) fn collect_form_fields(form: &web_sys::HtmlFormElement) -> DomResult<Vec<(String, String)>> {
    let data = web_sys::FormData::new_with_form(form)?;
    let iter = js_sys::try_iter(&data)?
        .ok_or_else(|| DomError::Js("FormData is not iterable".to_string()))?;

    let mut fields = Vec::new();
    for entry in iter {
        let pair: js_sys::Array = entry?.unchecked_into();
        let Some(name) = pair.get(0).as_string() else {
            continue;
        };
        match pair.get(1).as_string() {
            Some(value) => fields.push((name, value)),
            None => warn!("[forms] skipping non-text field {name:?}"),
        }
    }
    Ok(fields)
}

/// Background submission for forms and editable data tables.
#[derive(Clone)]
pub(crate) struct Forms {
    api: ApiClient,
    notifier: Notifier,
}

impl Forms {
    pub fn new(api: ApiClient, notifier: Notifier) -> Self {
        Self { api, notifier }
    }

    /// Submits `#<form_id>` with the current page path attached.
    /// A missing form is a silent no-op.
    pub fn submit_form(&self, form_id: &str) {
        let Ok(form) = dom::by_id::<web_sys::HtmlFormElement>(form_id) else {
            return;
        };

        let mut fields = match collect_form_fields(&form) {
            Ok(f) => f,
            Err(e) => {
                self.notifier.alert(AlertKind::Danger, &format!("Error submitting form: {e}"));
                return;
            }
        };
        let page_url = leptos::prelude::window()
            .location()
            .pathname()
            .unwrap_or_default();
        fields.push(("page_url".to_string(), page_url));

        let s = self.clone();
        spawn_local(async move {
            let outcome = s.api.submit_form(fields).await;
            s.finish_submit(&form, outcome);
        });
    }

    /// Success resets the form and closes its enclosing `.modal`; either way
    /// the outcome is shown as an alert.
    fn finish_submit(&self, form: &web_sys::HtmlFormElement, outcome: ApiResult<Option<String>>) {
        match outcome {
            Ok(message) => {
                let msg = message.unwrap_or_else(|| FORM_SUCCESS_DEFAULT.to_string());
                self.notifier.alert(AlertKind::Success, &msg);
                form.reset();
                if let Ok(Some(modal)) = form.closest(".modal") {
                    interop::close_modal(&modal);
                }
            }
            Err(e) => {
                warn!("[forms] submit {:?} failed: {e}", form.id());
                self.notifier.alert(AlertKind::Danger, &form_error_message(&e));
            }
        }
    }

    /// Posts the rows of `#data-editor-<source>` as JSON records.
    pub fn save_data(&self, source: &str) {
        let Ok(table) = dom::by_id::<web_sys::Element>(&table_id(source)) else {
            self.notifier.alert(AlertKind::Danger, TABLE_NOT_FOUND);
            return;
        };

        let (headers, rows) = read_table(&table);
        let records = build_records(&headers, &rows);
        log!("[forms] saving {} row(s) for {source:?}", records.len());

        let s = self.clone();
        let source = source.to_string();
        spawn_local(async move {
            match s.api.save_data(&source, &records).await {
                Ok(message) => {
                    let msg = message.unwrap_or_else(|| DATA_SUCCESS_DEFAULT.to_string());
                    s.notifier.alert(AlertKind::Success, &msg);
                }
                Err(e) => {
                    warn!("[forms] save {source:?} failed: {e}");
                    s.notifier.alert(AlertKind::Danger, &data_error_message(&e));
                }
            }
        });
    }
}

/// `.needs-validation` forms: block invalid submits, always mark validated.
pub(crate) fn attach_validation(listeners: &ListenerSet) -> DomResult<usize> {
    let forms: Vec<web_sys::HtmlFormElement> = dom::query_all(".needs-validation");
    for form in &forms {
        let f = form.clone();
        listeners.on(form, "submit", move |ev| {
            if !f.check_validity() {
                ev.prevent_default();
                ev.stop_propagation();
            }
            add_class(&f, "was-validated");
        })?;
    }
    Ok(forms.len())
}

pub(crate) fn loading_html(label: Option<&str>) -> String {
    let label = label.filter(|l| !l.is_empty()).unwrap_or(LOADING_DEFAULT);
    format!(
        r#"<span class="spinner-border spinner-border-sm me-2"></span>{}"#,
        escape_html(label)
    )
}

fn set_disabled(el: &web_sys::Element, disabled: bool) {
    if let Some(btn) = el.dyn_ref::<web_sys::HtmlButtonElement>() {
        btn.set_disabled(disabled);
    } else if disabled {
        let _ = el.set_attribute("disabled", "");
    } else {
        let _ = el.remove_attribute("disabled");
    }
}

/// `.btn[data-loading]`: spinner + label on click, restored after `reset_ms`
/// whether or not the triggered work finished.
pub(crate) fn attach_loading_buttons(reset_ms: i32, listeners: &ListenerSet) -> DomResult<usize> {
    let buttons: Vec<web_sys::Element> = dom::query_all(".btn[data-loading]");
    for btn in &buttons {
        let b = btn.clone();
        listeners.on(btn, "click", move |_| {
            let original = b.inner_html();
            let label = b.get_attribute("data-loading");
            b.set_inner_html(&loading_html(label.as_deref()));
            set_disabled(&b, true);

            let b2 = b.clone();
            run_after(reset_ms, move || {
                b2.set_inner_html(&original);
                set_disabled(&b2, false);
            });
        })?;
    }
    Ok(buttons.len())
}

fn fit_to_content(area: &web_sys::HtmlTextAreaElement) {
    dom::set_style(area, "height", "auto");
    dom::set_style(area, "height", &format!("{}px", area.scroll_height()));
}

/// `textarea.auto-resize` grows with its content.
pub(crate) fn attach_auto_resize(listeners: &ListenerSet) -> DomResult<usize> {
    let areas: Vec<web_sys::HtmlTextAreaElement> = dom::query_all("textarea.auto-resize");
    for area in &areas {
        fit_to_content(area);
        let a = area.clone();
        listeners.on(area, "input", move |_| fit_to_content(&a))?;
    }
    Ok(areas.len())
}
