use leptos_dom::helpers::WindowListenerHandle;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Clone, Debug, Error)]
pub(crate) enum DomError {
    #[error("element not found: {0}")]
    NotFound(String),

    #[error("{0} is not the expected element type")]
    Cast(String),

    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(v: JsValue) -> Self {
        let msg = v
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| v.as_string())
            .unwrap_or_else(|| format!("{v:?}"));
        Self::Js(msg)
    }
}

pub(crate) type DomResult<T> = Result<T, DomError>;

pub(crate) fn document() -> DomResult<web_sys::Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| DomError::NotFound("document".to_string()))
}

pub(crate) fn by_id<T: JsCast>(id: &str) -> DomResult<T> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| DomError::NotFound(format!("#{id}")))?
        .dyn_into::<T>()
        .map_err(|_| DomError::Cast(format!("#{id}")))
}

pub(crate) fn query<T: JsCast>(selector: &str) -> DomResult<T> {
    document()?
        .query_selector(selector)?
        .ok_or_else(|| DomError::NotFound(selector.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| DomError::Cast(selector.to_string()))
}

fn collect<T: JsCast>(list: web_sys::NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<T>().ok())
        .collect()
}

/// Every element under the document matching `selector` that casts to `T`.
pub(crate) fn query_all<T: JsCast>(selector: &str) -> Vec<T> {
    document()
        .ok()
        .and_then(|d| d.query_selector_all(selector).ok())
        .map(collect)
        .unwrap_or_default()
}

pub(crate) fn query_all_in<T: JsCast>(root: &web_sys::Element, selector: &str) -> Vec<T> {
    root.query_selector_all(selector)
        .map(collect)
        .unwrap_or_default()
}

/// The element an event was dispatched on, if it is one.
pub(crate) fn event_element(ev: &web_sys::Event) -> Option<web_sys::Element> {
    ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok())
}

/// A bubbling, cancelable `Event` of type `kind`, ready to dispatch.
pub(crate) fn cancelable_event(kind: &str) -> DomResult<web_sys::Event> {
    let ev = document()?.create_event("Event")?;
    ev.init_event_with_bubbles_and_cancelable(kind, true, true);
    Ok(ev)
}

pub(crate) fn add_class(el: &web_sys::Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub(crate) fn remove_class(el: &web_sys::Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

pub(crate) fn has_class(el: &web_sys::Element, class: &str) -> bool {
    el.class_list().contains(class)
}

pub(crate) fn set_style(el: &web_sys::HtmlElement, prop: &str, value: &str) {
    let _ = el.style().set_property(prop, value);
}

/// An attached DOM listener; removed from its target on drop.
pub(crate) struct Listener {
    target: web_sys::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn attach(
        target: &web_sys::EventTarget,
        event: &'static str,
        f: impl FnMut(web_sys::Event) + 'static,
    ) -> DomResult<Self> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(web_sys::Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Listeners owned by the page controller. Clearing the set detaches them all.
#[derive(Clone, Default)]
pub(crate) struct ListenerSet {
    elements: Rc<RefCell<Vec<Listener>>>,
    window: Rc<RefCell<Vec<WindowListenerHandle>>>,
}

impl ListenerSet {
    pub fn on(
        &self,
        target: &web_sys::EventTarget,
        event: &'static str,
        f: impl FnMut(web_sys::Event) + 'static,
    ) -> DomResult<()> {
        let l = Listener::attach(target, event, f)?;
        self.elements.borrow_mut().push(l);
        Ok(())
    }

    /// Keeps a `window_event_listener` handle alive until [`ListenerSet::clear`].
    pub fn keep(&self, handle: WindowListenerHandle) {
        self.window.borrow_mut().push(handle);
    }

    pub fn len(&self) -> usize {
        self.elements.borrow().len() + self.window.borrow().len()
    }

    /// Must not be called from inside one of the owned callbacks.
    pub fn clear(&self) {
        let drained: Vec<Listener> = self.elements.borrow_mut().drain(..).collect();
        drop(drained);

        let handles: Vec<WindowListenerHandle> = self.window.borrow_mut().drain(..).collect();
        for h in handles {
            h.remove();
        }
    }
}
