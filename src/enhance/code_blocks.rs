use crate::dom::{self, add_class, remove_class, DomError, DomResult, ListenerSet};
use crate::timers::run_after;
use wasm_bindgen::JsCast;

const COPY_LABEL: &str = "Copy";
const COPIED_LABEL: &str = "Copied!";
const COPY_BUTTON_CLASS: &str = "btn btn-sm btn-outline-secondary copy-btn";

/// Copies `text` through a throwaway textarea and `execCommand("copy")`.
pub(crate) fn copy_to_clipboard(text: &str) -> DomResult<bool> {
    let doc = dom::document()?;
    let body = doc.body().ok_or_else(|| DomError::NotFound("body".into()))?;

    let area = doc
        .create_element("textarea")?
        .dyn_into::<web_sys::HtmlTextAreaElement>()
        .map_err(|_| DomError::Cast("textarea".into()))?;
    area.set_value(text);
    body.append_child(&area)?;
    area.select();

    let copied = doc
        .dyn_into::<web_sys::HtmlDocument>()
        .map_err(|_| DomError::Cast("document".into()))
        .and_then(|d| d.exec_command("copy").map_err(DomError::from));
    area.remove();
    copied
}

/// Appends a copy button to every `pre code` block that lacks one.
/// Returns the number of buttons added this call.
pub(crate) fn enhance_code_blocks(feedback_ms: i32, listeners: &ListenerSet) -> DomResult<usize> {
    let doc = dom::document()?;
    let mut added = 0;

    for code in dom::query_all::<web_sys::Element>("pre code") {
        let Some(pre) = code.parent_element() else {
            continue;
        };
        if pre.query_selector(".copy-btn")?.is_some() {
            continue;
        }

        if let Some(pre) = pre.dyn_ref::<web_sys::HtmlElement>() {
            dom::set_style(pre, "position", "relative");
        }

        let btn = doc.create_element("button")?;
        btn.set_class_name(COPY_BUTTON_CLASS);
        btn.set_text_content(Some(COPY_LABEL));
        pre.append_child(&btn)?;

        let btn2 = btn.clone();
        listeners.on(&btn, "click", move |ev| {
            ev.prevent_default();

            let text = code.text_content().unwrap_or_default();
            if let Err(e) = copy_to_clipboard(&text) {
                leptos::logging::warn!("[enhance] copy failed: {e}");
            }

            btn2.set_text_content(Some(COPIED_LABEL));
            add_class(&btn2, "btn-success");
            let btn3 = btn2.clone();
            run_after(feedback_ms, move || {
                btn3.set_text_content(Some(COPY_LABEL));
                remove_class(&btn3, "btn-success");
            });
        })?;
        added += 1;
    }

    Ok(added)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_copy_button_added_once_and_feedback_reverts() {
        let doc = dom::document().unwrap();
        let pre = doc.create_element("pre").unwrap();
        pre.set_inner_html("<code>cargo build</code>");
        doc.body().unwrap().append_child(&pre).unwrap();

        let listeners = ListenerSet::default();
        assert!(enhance_code_blocks(30, &listeners).unwrap() >= 1);
        assert_eq!(enhance_code_blocks(30, &listeners).unwrap(), 0);

        let buttons: Vec<web_sys::HtmlElement> = dom::query_all_in(&pre, ".copy-btn");
        assert_eq!(buttons.len(), 1);
        let btn = &buttons[0];

        btn.click();
        assert_eq!(btn.text_content().as_deref(), Some(COPIED_LABEL));
        assert!(dom::has_class(btn, "btn-success"));

        TimeoutFuture::new(80).await;
        assert_eq!(btn.text_content().as_deref(), Some(COPY_LABEL));
        assert!(!dom::has_class(btn, "btn-success"));

        listeners.clear();
        pre.remove();
    }
}
