//! One-shot markup enhancements run at startup.
//!
//! Every enhancer is idempotent: running it again over the same document
//! leaves it unchanged.

mod code_blocks;
mod scrollspy;
mod tables;

pub(crate) use code_blocks::enhance_code_blocks;
pub(crate) use scrollspy::attach_scrollspy;
pub(crate) use tables::enhance_tables;

use crate::dom;
use crate::interop;
use leptos::logging::log;

const TOOLTIP_SELECTOR: &str = r#"[data-bs-toggle="tooltip"]"#;
const TOOLTIP_MARK: &str = "data-cms-tooltip";

/// Attaches a Bootstrap tooltip to every flagged element. Returns how many
/// were attached this call.
pub(crate) fn init_tooltips() -> usize {
    let targets: Vec<web_sys::Element> = dom::query_all(TOOLTIP_SELECTOR);
    if targets.is_empty() {
        return 0;
    }
    if !interop::has_bootstrap() {
        log!("[enhance] bootstrap not loaded; {} tooltip(s) left as-is", targets.len());
        return 0;
    }

    let mut attached = 0;
    for el in targets {
        if el.has_attribute(TOOLTIP_MARK) {
            continue;
        }
        if interop::attach_tooltip(&el) {
            let _ = el.set_attribute(TOOLTIP_MARK, "");
            attached += 1;
        }
    }
    attached
}
