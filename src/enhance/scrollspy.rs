use crate::dom::{self, add_class, remove_class, DomResult, ListenerSet};
use leptos::ev;
use leptos_dom::helpers::window_event_listener;

pub(crate) const DOCS_PAGE_CLASS: &str = "docs-page";
const NAV_LINKS_SELECTOR: &str = r##"#docs-nav a[href^="#"]"##;
const ACTIVE_CLASS: &str = "active";

/// Index of the last section whose top is at or above `scroll_y + offset`.
///
/// `tops` must be in document order.
pub(crate) fn active_section(tops: &[f64], scroll_y: f64, offset: f64) -> Option<usize> {
    let line = scroll_y + offset;
    tops.iter().rposition(|&top| top <= line)
}

#[derive(Clone)]
struct Section {
    link: web_sys::Element,
    target: web_sys::Element,
}

fn collect_sections(doc: &web_sys::Document) -> Vec<Section> {
    dom::query_all::<web_sys::Element>(NAV_LINKS_SELECTOR)
        .into_iter()
        .filter_map(|link| {
            let href = link.get_attribute("href")?;
            let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
            let target = doc.get_element_by_id(id)?;
            Some(Section { link, target })
        })
        .collect()
}

fn refresh(sections: &[Section], offset: f64) {
    let Some(win) = web_sys::window() else {
        return;
    };
    let scroll_y = win.scroll_y().unwrap_or(0.0);
    let tops: Vec<f64> = sections
        .iter()
        .map(|s| s.target.get_bounding_client_rect().top() + scroll_y)
        .collect();

    let active = active_section(&tops, scroll_y, offset);
    for (i, s) in sections.iter().enumerate() {
        if Some(i) == active {
            add_class(&s.link, ACTIVE_CLASS);
        } else {
            remove_class(&s.link, ACTIVE_CLASS);
        }
    }
}

/// Highlights the `#docs-nav` link of the section in view on docs pages.
/// Returns the number of tracked sections.
pub(crate) fn attach_scrollspy(offset_px: i32, listeners: &ListenerSet) -> DomResult<usize> {
    let doc = dom::document()?;
    let is_docs = doc
        .body()
        .is_some_and(|b| dom::has_class(&b, DOCS_PAGE_CLASS));
    if !is_docs {
        return Ok(0);
    }

    let sections = collect_sections(&doc);
    if sections.is_empty() {
        return Ok(0);
    }

    let offset = offset_px as f64;
    refresh(&sections, offset);

    let count = sections.len();
    listeners.keep(window_event_listener(ev::scroll, move |_: web_sys::Event| {
        refresh(&sections, offset);
    }));
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_section_before_first() {
        assert_eq!(active_section(&[500.0, 900.0], 0.0, 100.0), None);
    }

    #[test]
    fn test_active_section_uses_offset() {
        let tops = [0.0, 400.0, 800.0];
        assert_eq!(active_section(&tops, 0.0, 100.0), Some(0));
        assert_eq!(active_section(&tops, 299.0, 100.0), Some(0));
        assert_eq!(active_section(&tops, 300.0, 100.0), Some(1));
        assert_eq!(active_section(&tops, 5000.0, 100.0), Some(2));
    }

    #[test]
    fn test_active_section_empty() {
        assert_eq!(active_section(&[], 10.0, 100.0), None);
    }
}
