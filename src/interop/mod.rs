//! Calls into the page's Bootstrap bundle, when one is loaded.
//!
//! Bootstrap is optional: every helper reports whether it found the
//! component so callers can fall back to plain class toggling.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};

fn bootstrap_component(name: &str) -> Option<Function> {
    let window = web_sys::window()?;
    let bs = window.get("bootstrap")?;
    Reflect::get(&bs, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

pub(crate) fn has_bootstrap() -> bool {
    bootstrap_component("Modal").is_some()
}

fn call_method(target: &JsValue, method: &str) -> bool {
    let Ok(f) = Reflect::get(target, &JsValue::from_str(method)) else {
        return false;
    };
    let Some(f) = f.dyn_ref::<Function>() else {
        return false;
    };
    f.call0(target).is_ok()
}

/// `new bootstrap.<name>(el)`.
fn construct(name: &str, el: &web_sys::Element) -> Option<JsValue> {
    let ctor = bootstrap_component(name)?;
    Reflect::construct(&ctor, &Array::of1(el)).ok()
}

pub(crate) fn attach_tooltip(el: &web_sys::Element) -> bool {
    construct("Tooltip", el).is_some()
}

/// `bootstrap.Modal.getOrCreateInstance(el).hide()`.
pub(crate) fn hide_modal(el: &web_sys::Element) -> bool {
    let Some(ctor) = bootstrap_component("Modal") else {
        return false;
    };
    let Ok(get) = Reflect::get(&ctor, &JsValue::from_str("getOrCreateInstance")) else {
        return false;
    };
    let Some(get) = get.dyn_ref::<Function>() else {
        return false;
    };
    match get.call1(&ctor, el) {
        Ok(instance) => call_method(&instance, "hide"),
        Err(_) => false,
    }
}

/// Hides a `.modal`, through Bootstrap when available, otherwise by
/// undoing the classes and styles Bootstrap would have set.
pub(crate) fn close_modal(el: &web_sys::Element) {
    if hide_modal(el) {
        return;
    }
    let _ = el.class_list().remove_1("show");
    let _ = el.set_attribute("aria-hidden", "true");
    if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
        let _ = html.style().set_property("display", "none");
    }
}

pub(crate) fn show_toast(el: &web_sys::Element) -> bool {
    match construct("Toast", el) {
        Some(toast) => call_method(&toast, "show"),
        None => false,
    }
}

/// Builds a plain JS object from string pairs.
pub(crate) fn object_from_pairs(pairs: &[(&str, JsValue)]) -> Object {
    let obj = Object::new();
    for (k, v) in pairs {
        let _ = Reflect::set(&obj, &JsValue::from_str(k), v);
    }
    obj
}
