use crate::config::UiConfig;
use crate::dom::{self, DomResult, ListenerSet};
use crate::util::{now_ms, swing};
use leptos_dom::helpers::{request_animation_frame, window};
use std::cell::Cell;
use std::rc::Rc;

/// Position at eased progress `p` of a scroll from `from` to `to`.
pub(crate) fn scroll_position(from: f64, to: f64, p: f64) -> f64 {
    from + (to - from) * swing(p)
}

/// The in-page id an anchor points at, if any.
pub(crate) fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Animated scrolling for in-page anchors.
#[derive(Clone)]
pub(crate) struct SmoothScroll {
    duration_ms: f64,
    offset_px: f64,

    /// Bumped per animation; an older animation stops at its next frame.
    generation: Rc<Cell<u64>>,
}

impl SmoothScroll {
    pub fn new(cfg: &UiConfig) -> Self {
        Self {
            duration_ms: cfg.scroll_duration_ms as f64,
            offset_px: cfg.scroll_offset_px as f64,
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn attach(&self, listeners: &ListenerSet) -> DomResult<usize> {
        let anchors: Vec<web_sys::Element> = dom::query_all(r##"a[href^="#"]"##);
        for a in &anchors {
            let s = self.clone();
            let a2 = a.clone();
            listeners.on(a, "click", move |ev| {
                let target = a2
                    .get_attribute("href")
                    .as_deref()
                    .and_then(anchor_target_id)
                    .and_then(|id| dom::by_id::<web_sys::Element>(id).ok());
                if let Some(target) = target {
                    ev.prevent_default();
                    s.scroll_to(&target);
                }
            })?;
        }
        Ok(anchors.len())
    }

    pub fn scroll_to(&self, target: &web_sys::Element) {
        let win = window();
        let from = win.scroll_y().unwrap_or(0.0);
        let to = (target.get_bounding_client_rect().top() + from - self.offset_px).max(0.0);

        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.step(now_ms(), from, to, generation);
    }

    fn step(&self, start: f64, from: f64, to: f64, generation: u64) {
        if self.generation.get() != generation {
            return;
        }

        let p = if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms() - start) / self.duration_ms).min(1.0)
        };
        let win = window();
        win.scroll_to_with_x_and_y(win.scroll_x().unwrap_or(0.0), scroll_position(from, to, p));

        if p < 1.0 {
            let s = self.clone();
            request_animation_frame(move || s.step(start, from, to, generation));
        }
    }
}
